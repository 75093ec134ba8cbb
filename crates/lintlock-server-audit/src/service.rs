// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;
use std::time::Duration;

use tracing::{instrument, warn};

use lintlock_server_config::AuditConfig;

use crate::event::{AuditEvent, AuditRecord};
use crate::queue::EventQueue;
use crate::store::AuditStore;

/// The audit service: owns the event queue and the durable store handle.
///
/// Constructed once at startup and shared by reference with anything that
/// reports events; a [`crate::scheduler::FlushScheduler`] drives the
/// periodic drain. There is no global state.
pub struct AuditService {
	queue: EventQueue,
	store: Arc<dyn AuditStore>,
	write_timeout: Duration,
}

impl AuditService {
	pub fn new(queue: EventQueue, store: Arc<dyn AuditStore>, config: &AuditConfig) -> Self {
		Self {
			queue,
			store,
			write_timeout: config.write_timeout(),
		}
	}

	/// Record an audit event.
	///
	/// Synchronous and infallible: the event is normalized, appended to the
	/// in-memory queue, and the canonical record returned. Persistence
	/// happens later on the flush worker, so callers never wait on I/O and
	/// never observe a failure.
	pub fn log_event(&self, event: AuditEvent) -> AuditRecord {
		let record = AuditRecord::from_event(event);
		self.queue.push(record.clone());
		record
	}

	/// Drain the queue and persist the batch.
	///
	/// Returns the number of records persisted: 0 when the queue was empty
	/// or the write failed. The batch write is bounded by the configured
	/// write timeout; a failed or timed-out batch goes back to the front of
	/// the queue for the next cycle, ahead of anything enqueued while the
	/// write was in flight. Errors are logged, never propagated.
	#[instrument(skip(self), fields(store = self.store.name()))]
	pub async fn flush(&self) -> usize {
		if self.queue.is_empty() {
			return 0;
		}

		let batch = self.queue.drain_all();
		if batch.is_empty() {
			return 0;
		}
		let count = batch.len();

		match tokio::time::timeout(self.write_timeout, self.store.insert_batch(&batch)).await {
			Ok(Ok(())) => count,
			Ok(Err(error)) => {
				self.queue.restore_front(batch);
				warn!(
					%error,
					count,
					queued = self.queue.len(),
					"failed to flush audit events"
				);
				0
			}
			Err(_) => {
				self.queue.restore_front(batch);
				warn!(
					timeout_ms = self.write_timeout.as_millis() as u64,
					count,
					queued = self.queue.len(),
					"audit store write timed out"
				);
				0
			}
		}
	}

	/// Number of records waiting for the next flush.
	///
	/// Grows without bound while the store is unreachable; worth exposing
	/// to monitoring.
	pub fn queue_len(&self) -> usize {
		self.queue.len()
	}
}
