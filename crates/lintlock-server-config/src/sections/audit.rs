// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Audit logging configuration section.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_FLUSH_INTERVAL_MS: u64 = 5000;
const DEFAULT_WRITE_TIMEOUT_MS: u64 = 10_000;

fn default_flush_interval_ms() -> u64 {
	DEFAULT_FLUSH_INTERVAL_MS
}

fn default_write_timeout_ms() -> u64 {
	DEFAULT_WRITE_TIMEOUT_MS
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuditConfigLayer {
	pub enabled: Option<bool>,
	pub flush_interval_ms: Option<u64>,
	pub write_timeout_ms: Option<u64>,
}

impl AuditConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.enabled.is_some() {
			self.enabled = other.enabled;
		}
		if other.flush_interval_ms.is_some() {
			self.flush_interval_ms = other.flush_interval_ms;
		}
		if other.write_timeout_ms.is_some() {
			self.write_timeout_ms = other.write_timeout_ms;
		}
	}

	pub fn finalize(self) -> AuditConfig {
		AuditConfig {
			enabled: self.enabled.unwrap_or(true),
			flush_interval_ms: self
				.flush_interval_ms
				.unwrap_or_else(default_flush_interval_ms),
			write_timeout_ms: self.write_timeout_ms.unwrap_or_else(default_write_timeout_ms),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditConfig {
	pub enabled: bool,
	/// How often the background worker drains the event queue.
	pub flush_interval_ms: u64,
	/// Upper bound on a single durable write; a timed-out write is treated
	/// as a failed one and the batch is requeued.
	pub write_timeout_ms: u64,
}

impl Default for AuditConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			flush_interval_ms: default_flush_interval_ms(),
			write_timeout_ms: default_write_timeout_ms(),
		}
	}
}

impl AuditConfig {
	pub fn flush_interval(&self) -> Duration {
		Duration::from_millis(self.flush_interval_ms)
	}

	pub fn write_timeout(&self) -> Duration {
		Duration::from_millis(self.write_timeout_ms)
	}
}
