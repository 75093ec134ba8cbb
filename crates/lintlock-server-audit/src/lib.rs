// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Asynchronous audit logging for the LintLock server.
//!
//! Collaborators report business events with [`AuditService::log_event`] -
//! a synchronous, infallible call that normalizes the event into a
//! canonical record and appends it to an in-memory queue. A background
//! worker owned by [`FlushScheduler`] periodically drains the queue and
//! writes each batch to the durable [`AuditStore`]. A failed batch returns
//! to the front of the queue and is retried on the next cycle, so audit
//! logging never blocks or fails a business operation.
//!
//! ```ignore
//! let store = Arc::new(SqliteAuditStore::new(pool));
//! let service = Arc::new(AuditService::new(EventQueue::new(), store, &config.audit));
//! let scheduler = FlushScheduler::new(Arc::clone(&service));
//! scheduler.start(config.audit.flush_interval()).await;
//!
//! service.log_event(
//!     AuditEvent::builder(ActionKind::MachineCreated)
//!         .actor(actor)
//!         .entity("Machine", machine.id)
//!         .metadata(metadata)
//!         .build(),
//! );
//! ```

pub mod action;
pub mod error;
pub mod event;
pub mod query;
pub mod queue;
pub mod scheduler;
pub mod service;
pub mod store;
pub mod template;

pub use action::{ActionKind, UnknownAction};
pub use error::AuditStoreError;
pub use event::{AuditEvent, AuditEventBuilder, AuditRecord, Metadata};
pub use query::{AuditLogFilter, AuditLogPage, AuditLogSummary, Pagination};
pub use queue::EventQueue;
pub use scheduler::FlushScheduler;
pub use service::AuditService;
pub use store::AuditStore;

pub use lintlock_server_auth::{Actor, UserId};
pub use lintlock_server_config::AuditConfig;

#[cfg(feature = "store-sqlite")]
pub use store::sqlite::SqliteAuditStore;
