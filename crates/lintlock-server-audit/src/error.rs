// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Failure writing to or reading from the durable audit store.
///
/// The flush worker requeues the batch either way; the split only feeds
/// operator-facing log lines.
#[derive(Error, Debug)]
pub enum AuditStoreError {
	#[error("transient error: {0}")]
	Transient(String),

	#[error("permanent error: {0}")]
	Permanent(String),
}
