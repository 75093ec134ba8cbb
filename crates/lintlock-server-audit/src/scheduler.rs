// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::service::AuditService;

/// Owns the repeating timer that drives [`AuditService::flush`].
///
/// One scheduler exists per process, started once after boot. `start` is
/// idempotent while the worker runs, so there is never more than one active
/// timer.
pub struct FlushScheduler {
	service: Arc<AuditService>,
	shutdown_tx: broadcast::Sender<()>,
	handle: Mutex<Option<JoinHandle<()>>>,
}

impl FlushScheduler {
	pub fn new(service: Arc<AuditService>) -> Self {
		let (shutdown_tx, _) = broadcast::channel(1);
		Self {
			service,
			shutdown_tx,
			handle: Mutex::new(None),
		}
	}

	/// Start the periodic flush worker.
	///
	/// Idempotent: calling while a worker is already running is a no-op and
	/// does not create a second timer.
	pub async fn start(&self, interval: Duration) {
		let mut handle = self.handle.lock().await;
		if handle.as_ref().is_some_and(|worker| !worker.is_finished()) {
			return;
		}

		let service = Arc::clone(&self.service);
		let mut shutdown_rx = self.shutdown_tx.subscribe();

		*handle = Some(tokio::spawn(async move {
			loop {
				tokio::select! {
					_ = tokio::time::sleep(interval) => {
						let flushed = service.flush().await;
						if flushed > 0 {
							debug!(flushed, "flushed audit events");
						}
					}
					_ = shutdown_rx.recv() => {
						info!("audit flush worker shutting down");
						break;
					}
				}
			}
		}));

		info!(
			interval_ms = interval.as_millis() as u64,
			"audit flush worker started"
		);
	}

	/// Stop the worker and wait for it to exit.
	///
	/// Idempotent when already stopped. No flush runs after this returns.
	pub async fn stop(&self) {
		let mut handle = self.handle.lock().await;
		let Some(worker) = handle.take() else {
			return;
		};

		let _ = self.shutdown_tx.send(());
		let _ = worker.await;
	}

	/// Graceful-shutdown path: stop the worker, then drain whatever is
	/// still queued with one last best-effort flush. Returns the number of
	/// records that made it out.
	pub async fn shutdown(&self) -> usize {
		self.stop().await;
		self.service.flush().await
	}
}
