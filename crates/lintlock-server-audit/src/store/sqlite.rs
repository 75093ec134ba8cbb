// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::instrument;
use uuid::Uuid;

use lintlock_server_auth::UserId;

use crate::action::ActionKind;
use crate::error::AuditStoreError;
use crate::event::AuditRecord;
use crate::query::{AuditLogFilter, AuditLogPage, AuditLogSummary, Pagination};
use crate::store::AuditStore;

/// SQLite-backed audit store. The default durable destination, also
/// serving the read side.
pub struct SqliteAuditStore {
	pool: SqlitePool,
	name: String,
}

impl SqliteAuditStore {
	pub fn new(pool: SqlitePool) -> Self {
		Self {
			pool,
			name: "sqlite".to_string(),
		}
	}

	/// Create the `audit_logs` table and its lookup index.
	pub async fn migrate(&self) -> Result<(), AuditStoreError> {
		sqlx::query(
			r#"
			CREATE TABLE IF NOT EXISTS audit_logs (
				id TEXT PRIMARY KEY,
				user_id TEXT,
				user_name TEXT,
				action TEXT NOT NULL,
				entity TEXT,
				entity_id TEXT,
				description TEXT NOT NULL,
				metadata TEXT NOT NULL,
				timestamp TEXT NOT NULL
			)
			"#,
		)
		.execute(&self.pool)
		.await
		.map_err(map_sqlx_error)?;

		sqlx::query(
			"CREATE INDEX IF NOT EXISTS idx_audit_logs_user_time \
			 ON audit_logs (user_id, timestamp DESC)",
		)
		.execute(&self.pool)
		.await
		.map_err(map_sqlx_error)?;

		Ok(())
	}

	/// Filtered, newest-first page of persisted records.
	#[instrument(skip(self, filter))]
	pub async fn search(&self, filter: &AuditLogFilter) -> Result<AuditLogPage, AuditStoreError> {
		let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM audit_logs");
		push_filter(&mut count_query, filter);
		let total: i64 = count_query
			.build_query_scalar()
			.fetch_one(&self.pool)
			.await
			.map_err(map_sqlx_error)?;

		let mut query = QueryBuilder::new(
			"SELECT id, user_id, user_name, action, description, timestamp FROM audit_logs",
		);
		push_filter(&mut query, filter);
		query
			.push(" ORDER BY timestamp DESC LIMIT ")
			.push_bind(i64::from(filter.limit()))
			.push(" OFFSET ")
			.push_bind(i64::from(filter.offset()));

		let rows: Vec<SummaryRow> = query
			.build_query_as()
			.fetch_all(&self.pool)
			.await
			.map_err(map_sqlx_error)?;

		let entries = rows
			.into_iter()
			.map(TryInto::try_into)
			.collect::<Result<Vec<_>, _>>()?;

		Ok(AuditLogPage {
			entries,
			pagination: Pagination::new(total as u64, filter.page(), filter.limit()),
		})
	}
}

#[async_trait]
impl AuditStore for SqliteAuditStore {
	fn name(&self) -> &str {
		&self.name
	}

	#[instrument(skip(self, records), fields(count = records.len()))]
	async fn insert_batch(&self, records: &[AuditRecord]) -> Result<(), AuditStoreError> {
		// one transaction: the batch either lands whole or not at all
		let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

		for record in records {
			let metadata_json = serde_json::to_string(&record.metadata).map_err(|e| {
				AuditStoreError::Permanent(format!("failed to serialize metadata: {e}"))
			})?;

			sqlx::query(
				r#"
				INSERT INTO audit_logs (
					id, user_id, user_name, action, entity, entity_id,
					description, metadata, timestamp
				) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
				"#,
			)
			.bind(record.id.to_string())
			.bind(record.user_id.as_ref().map(|u| u.to_string()))
			.bind(&record.user_name)
			.bind(record.action.as_str())
			.bind(&record.entity)
			.bind(&record.entity_id)
			.bind(&record.description)
			.bind(&metadata_json)
			.bind(record.timestamp.to_rfc3339())
			.execute(&mut *tx)
			.await
			.map_err(map_sqlx_error)?;
		}

		tx.commit().await.map_err(map_sqlx_error)?;
		Ok(())
	}
}

fn push_filter<'a>(query: &mut QueryBuilder<'a, Sqlite>, filter: &'a AuditLogFilter) {
	query.push(" WHERE 1=1");

	if let Some(user_id) = &filter.user_id {
		query.push(" AND user_id = ").push_bind(user_id.as_str());
	}
	if let Some(action) = filter.action {
		query.push(" AND action = ").push_bind(action.as_str());
	}
	if let Some(search) = &filter.search {
		let pattern = format!("%{}%", search.trim());
		query
			.push(" AND (description LIKE ")
			.push_bind(pattern.clone())
			.push(" OR user_name LIKE ")
			.push_bind(pattern.clone())
			.push(" OR action LIKE ")
			.push_bind(pattern)
			.push(")");
	}
	if let Some(from) = filter.from {
		query.push(" AND timestamp >= ").push_bind(from.to_rfc3339());
	}
	if let Some(until) = filter.until {
		query.push(" AND timestamp <= ").push_bind(until.to_rfc3339());
	}
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
	id: String,
	user_id: Option<String>,
	user_name: Option<String>,
	action: String,
	description: String,
	timestamp: String,
}

impl TryFrom<SummaryRow> for AuditLogSummary {
	type Error = AuditStoreError;

	fn try_from(row: SummaryRow) -> Result<Self, Self::Error> {
		let id = Uuid::parse_str(&row.id)
			.map_err(|_| AuditStoreError::Permanent(format!("invalid record id: {}", row.id)))?;
		let action: ActionKind = row
			.action
			.parse()
			.map_err(|_| AuditStoreError::Permanent(format!("unknown action: {}", row.action)))?;
		let timestamp = DateTime::parse_from_rfc3339(&row.timestamp)
			.map(|dt| dt.with_timezone(&Utc))
			.map_err(|_| {
				AuditStoreError::Permanent(format!("invalid timestamp: {}", row.timestamp))
			})?;

		Ok(AuditLogSummary {
			id,
			user_id: row.user_id.map(UserId::from),
			user_name: row.user_name,
			action,
			description: row.description,
			timestamp,
		})
	}
}

fn map_sqlx_error(e: sqlx::Error) -> AuditStoreError {
	if is_transient_error(&e) {
		AuditStoreError::Transient(format!("database error: {e}"))
	} else {
		AuditStoreError::Permanent(format!("database error: {e}"))
	}
}

fn is_transient_error(e: &sqlx::Error) -> bool {
	match e {
		sqlx::Error::Io(_) => true,
		sqlx::Error::PoolTimedOut => true,
		sqlx::Error::PoolClosed => true,
		sqlx::Error::Database(db_err) => {
			let msg = db_err.message().to_lowercase();
			msg.contains("busy") || msg.contains("locked") || msg.contains("timeout")
		}
		_ => false,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::event::AuditEvent;
	use chrono::TimeZone;
	use lintlock_server_auth::Actor;
	use serde_json::json;

	async fn setup() -> SqliteAuditStore {
		let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
		let store = SqliteAuditStore::new(pool);
		store.migrate().await.unwrap();
		store
	}

	fn base_time() -> DateTime<Utc> {
		Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
	}

	fn machine_record(actor: Actor, machine_id: &str, minute: u32) -> AuditRecord {
		let mut record = AuditRecord::from_event(
			AuditEvent::builder(ActionKind::MachineCreated)
				.actor(actor)
				.entity("Machine", machine_id)
				.metadata(
					json!({"machineId": machine_id, "machineName": "Acme Washer"})
						.as_object()
						.cloned()
						.unwrap(),
				)
				.build(),
		);
		record.timestamp = base_time() + chrono::Duration::minutes(i64::from(minute));
		record
	}

	fn jane() -> Actor {
		Actor::new("u1", "Jane", "jane@x.com")
	}

	fn omar() -> Actor {
		Actor::new("u2", "Omar", "omar@x.com")
	}

	#[tokio::test]
	async fn migrate_is_idempotent() {
		let store = setup().await;
		store.migrate().await.unwrap();
	}

	#[tokio::test]
	async fn insert_and_search_roundtrip() {
		let store = setup().await;
		let records = vec![
			machine_record(jane(), "m1", 0),
			machine_record(jane(), "m2", 1),
		];
		store.insert_batch(&records).await.unwrap();

		let page = store.search(&AuditLogFilter::default()).await.unwrap();
		assert_eq!(page.pagination.total, 2);
		assert_eq!(page.entries.len(), 2);

		// newest first
		assert_eq!(page.entries[0].id, records[1].id);
		assert_eq!(page.entries[1].id, records[0].id);

		let entry = &page.entries[1];
		assert_eq!(entry.user_id, Some(UserId::from("u1")));
		assert_eq!(entry.user_name.as_deref(), Some("Jane"));
		assert_eq!(entry.action, ActionKind::MachineCreated);
		assert_eq!(entry.description, "Added new machine \"Acme Washer\" (ID: m1)");
		assert_eq!(entry.timestamp, records[0].timestamp);
	}

	#[tokio::test]
	async fn batch_insert_is_atomic() {
		let store = setup().await;

		let first = machine_record(jane(), "m1", 0);
		let mut duplicate = machine_record(jane(), "m2", 1);
		duplicate.id = first.id;

		let result = store.insert_batch(&[first, duplicate]).await;
		assert!(result.is_err());

		let page = store.search(&AuditLogFilter::default()).await.unwrap();
		assert_eq!(page.pagination.total, 0);
		assert!(page.entries.is_empty());
	}

	#[tokio::test]
	async fn filters_by_user() {
		let store = setup().await;
		store
			.insert_batch(&[
				machine_record(jane(), "m1", 0),
				machine_record(omar(), "m2", 1),
			])
			.await
			.unwrap();

		let filter = AuditLogFilter {
			user_id: Some(UserId::from("u2")),
			..Default::default()
		};
		let page = store.search(&filter).await.unwrap();
		assert_eq!(page.pagination.total, 1);
		assert_eq!(page.entries[0].user_name.as_deref(), Some("Omar"));
	}

	#[tokio::test]
	async fn filters_by_action_resolved_from_label() {
		let store = setup().await;

		let mut deleted = AuditRecord::from_event(
			AuditEvent::builder(ActionKind::MachineDeleted)
				.actor(jane())
				.metadata(json!({"machineId": "m1"}).as_object().cloned().unwrap())
				.build(),
		);
		deleted.timestamp = base_time();
		store
			.insert_batch(&[deleted, machine_record(jane(), "m2", 1)])
			.await
			.unwrap();

		let filter = AuditLogFilter {
			action: ActionKind::resolve("Machine Removed"),
			..Default::default()
		};
		let page = store.search(&filter).await.unwrap();
		assert_eq!(page.pagination.total, 1);
		assert_eq!(page.entries[0].action, ActionKind::MachineDeleted);
	}

	#[tokio::test]
	async fn text_search_matches_description_name_and_action() {
		let store = setup().await;
		store
			.insert_batch(&[
				machine_record(jane(), "m1", 0),
				machine_record(omar(), "m2", 1),
			])
			.await
			.unwrap();

		// case-insensitive description match
		let filter = AuditLogFilter {
			search: Some("acme washer".to_string()),
			..Default::default()
		};
		assert_eq!(store.search(&filter).await.unwrap().pagination.total, 2);

		// user name match
		let filter = AuditLogFilter {
			search: Some("omar".to_string()),
			..Default::default()
		};
		assert_eq!(store.search(&filter).await.unwrap().pagination.total, 1);

		// raw action name match
		let filter = AuditLogFilter {
			search: Some("MACHINE".to_string()),
			..Default::default()
		};
		assert_eq!(store.search(&filter).await.unwrap().pagination.total, 2);

		let filter = AuditLogFilter {
			search: Some("no such thing".to_string()),
			..Default::default()
		};
		assert_eq!(store.search(&filter).await.unwrap().pagination.total, 0);
	}

	#[tokio::test]
	async fn filters_by_time_range() {
		let store = setup().await;
		store
			.insert_batch(&[
				machine_record(jane(), "m1", 0),
				machine_record(jane(), "m2", 10),
				machine_record(jane(), "m3", 20),
			])
			.await
			.unwrap();

		let filter = AuditLogFilter {
			from: Some(base_time() + chrono::Duration::minutes(5)),
			until: Some(base_time() + chrono::Duration::minutes(15)),
			..Default::default()
		};
		let page = store.search(&filter).await.unwrap();
		assert_eq!(page.pagination.total, 1);
		assert_eq!(
			page.entries[0].description,
			"Added new machine \"Acme Washer\" (ID: m2)"
		);
	}

	#[tokio::test]
	async fn paginates_newest_first() {
		let store = setup().await;
		let records: Vec<AuditRecord> = (0..25)
			.map(|i| machine_record(jane(), &format!("m{i:02}"), i))
			.collect();
		store.insert_batch(&records).await.unwrap();

		let filter = AuditLogFilter {
			page: Some(3),
			limit: Some(10),
			..Default::default()
		};
		let page = store.search(&filter).await.unwrap();

		assert_eq!(page.pagination.total, 25);
		assert_eq!(page.pagination.total_pages, 3);
		assert_eq!(page.entries.len(), 5);

		// newest first: page 3 of 25 holds the five oldest records
		assert_eq!(
			page.entries[0].description,
			"Added new machine \"Acme Washer\" (ID: m04)"
		);
		assert_eq!(
			page.entries[4].description,
			"Added new machine \"Acme Washer\" (ID: m00)"
		);
	}
}
