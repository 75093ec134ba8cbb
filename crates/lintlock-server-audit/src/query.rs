// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Read-side filtering and pagination over persisted audit records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lintlock_server_auth::UserId;

use crate::action::ActionKind;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Filter over persisted audit records. All fields are optional and
/// combined with AND; results are newest first.
#[derive(Debug, Clone, Default)]
pub struct AuditLogFilter {
	pub user_id: Option<UserId>,
	/// Typically produced from a UI label via [`ActionKind::resolve`].
	pub action: Option<ActionKind>,
	/// Case-insensitive substring match over description, user name, and
	/// raw action name.
	pub search: Option<String>,
	pub from: Option<DateTime<Utc>>,
	pub until: Option<DateTime<Utc>>,
	pub page: Option<u32>,
	pub limit: Option<u32>,
}

impl AuditLogFilter {
	/// Requested page, 1-based.
	pub fn page(&self) -> u32 {
		self.page.unwrap_or(1).max(1)
	}

	/// Page size, clamped to `1..=MAX_PAGE_SIZE`.
	pub fn limit(&self) -> u32 {
		self.limit
			.unwrap_or(DEFAULT_PAGE_SIZE)
			.clamp(1, MAX_PAGE_SIZE)
	}

	pub fn offset(&self) -> u32 {
		(self.page() - 1) * self.limit()
	}
}

/// The listing projection of one persisted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogSummary {
	pub id: Uuid,
	pub user_id: Option<UserId>,
	pub user_name: Option<String>,
	pub action: ActionKind,
	pub description: String,
	pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
	pub total: u64,
	pub page: u32,
	pub limit: u32,
	pub total_pages: u32,
}

impl Pagination {
	pub fn new(total: u64, page: u32, limit: u32) -> Self {
		let total_pages = (total.div_ceil(u64::from(limit)) as u32).max(1);
		Self {
			total,
			page,
			limit,
			total_pages,
		}
	}
}

/// One page of audit log results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogPage {
	pub entries: Vec<AuditLogSummary>,
	pub pagination: Pagination,
}
