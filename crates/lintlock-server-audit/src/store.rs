// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Durable storage boundary for audit records.

use async_trait::async_trait;

use crate::error::AuditStoreError;
use crate::event::AuditRecord;

#[cfg(feature = "store-sqlite")]
pub mod sqlite;

/// A durable destination for audit records.
///
/// `insert_batch` is all-or-nothing: either every record in the batch is
/// durably written, or the call fails and the flush worker requeues the
/// whole batch. Implementations must not partially persist.
#[async_trait]
pub trait AuditStore: Send + Sync {
	/// Short name used in log lines.
	fn name(&self) -> &str;

	async fn insert_batch(&self, records: &[AuditRecord]) -> Result<(), AuditStoreError>;
}
