// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core event types for audit logging.
//!
//! This module provides the foundational types for the audit system:
//!
//! - [`AuditEvent`]: a transient event as reported by a collaborator
//! - [`AuditEventBuilder`]: fluent API for constructing events
//! - [`AuditRecord`]: the canonical, immutable record that gets queued and
//!   persisted
//!
//! Normalization from event to record lives in [`AuditRecord::from_event`]:
//! request-derived metadata is lifted to the top level, actor details fill
//! gaps without overriding anything explicit, and the description is
//! rendered through the template registry with a graceful fallback chain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use lintlock_server_auth::{Actor, UserId};

use crate::action::ActionKind;
use crate::template;

/// Free-form event metadata, as supplied by collaborators.
pub type Metadata = serde_json::Map<String, Value>;

/// A transient audit event reported by a collaborator.
///
/// Not persisted directly; [`AuditRecord::from_event`] normalizes it into
/// the canonical form.
#[derive(Debug, Clone)]
pub struct AuditEvent {
	/// The authenticated user behind the action, absent for
	/// system-initiated events.
	pub actor: Option<Actor>,
	/// Overrides the recorded user name regardless of actor or metadata.
	pub actor_name_override: Option<String>,
	pub action: ActionKind,
	pub entity_type: Option<String>,
	pub entity_id: Option<String>,
	pub metadata: Metadata,
}

impl AuditEvent {
	/// Create a new event builder for the given action.
	pub fn builder(action: ActionKind) -> AuditEventBuilder {
		AuditEventBuilder::new(action)
	}
}

/// Builder for constructing audit events with a fluent API.
#[derive(Debug, Clone)]
pub struct AuditEventBuilder {
	action: ActionKind,
	actor: Option<Actor>,
	actor_name_override: Option<String>,
	entity_type: Option<String>,
	entity_id: Option<String>,
	metadata: Metadata,
}

impl AuditEventBuilder {
	pub fn new(action: ActionKind) -> Self {
		Self {
			action,
			actor: None,
			actor_name_override: None,
			entity_type: None,
			entity_id: None,
			metadata: Metadata::new(),
		}
	}

	/// Attribute the event to an authenticated user.
	pub fn actor(mut self, actor: Actor) -> Self {
		self.actor = Some(actor);
		self
	}

	/// Force the recorded user name, whatever the actor or metadata say.
	pub fn actor_name(mut self, name: impl Into<String>) -> Self {
		self.actor_name_override = Some(name.into());
		self
	}

	/// Set the entity type and id the event refers to.
	pub fn entity(mut self, entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
		self.entity_type = Some(entity_type.into());
		self.entity_id = Some(entity_id.into());
		self
	}

	/// Set the free-form metadata mapping.
	pub fn metadata(mut self, metadata: Metadata) -> Self {
		self.metadata = metadata;
		self
	}

	pub fn build(self) -> AuditEvent {
		AuditEvent {
			actor: self.actor,
			actor_name_override: self.actor_name_override,
			action: self.action,
			entity_type: self.entity_type,
			entity_id: self.entity_id,
			metadata: self.metadata,
		}
	}
}

/// The canonical, immutable form of one audit event.
///
/// Lives in the in-memory queue until a flush durably writes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
	pub id: Uuid,
	pub user_id: Option<UserId>,
	pub user_name: Option<String>,
	pub action: ActionKind,
	pub entity: Option<String>,
	pub entity_id: Option<String>,
	/// Human-readable summary; never empty.
	pub description: String,
	pub metadata: Metadata,
	pub timestamp: DateTime<Utc>,
}

impl AuditRecord {
	/// Normalize a reported event into its canonical record.
	pub fn from_event(event: AuditEvent) -> Self {
		let AuditEvent {
			actor,
			actor_name_override,
			action,
			entity_type,
			entity_id,
			mut metadata,
		} = event;

		// Lift request-derived fields to the top level. First write wins:
		// body over params over query, and a key already present at the top
		// level (even an explicit null) is never replaced.
		for source in ["body", "params", "query"] {
			let Some(Value::Object(sub)) = metadata.get(source).cloned() else {
				continue;
			};
			for (key, value) in sub {
				if !metadata.contains_key(&key) {
					metadata.insert(key, value);
				}
			}
		}

		// Actor details only fill absent (or null) keys.
		if let Some(actor) = &actor {
			fill_if_nullish(&mut metadata, "email", || {
				Value::String(actor.email.clone())
			});
			fill_if_nullish(&mut metadata, "userName", || {
				Value::String(actor.display_name.clone())
			});
		}

		let description = template::render(action, &metadata)
			.or_else(|| {
				metadata
					.get("description")
					.and_then(Value::as_str)
					.filter(|s| !s.is_empty())
					.map(str::to_string)
			})
			.unwrap_or_else(|| action.to_string());

		let user_id = actor
			.as_ref()
			.map(|a| a.id.clone())
			.or_else(|| string_field(&metadata, "userId").map(UserId::from));
		let user_name = actor_name_override
			.or_else(|| actor.as_ref().map(|a| a.display_name.clone()))
			.or_else(|| string_field(&metadata, "userName"));
		let entity = entity_type.or_else(|| string_field(&metadata, "entity"));
		let entity_id = entity_id.or_else(|| string_field(&metadata, "entityId"));

		Self {
			id: Uuid::new_v4(),
			user_id,
			user_name,
			action,
			entity,
			entity_id,
			description,
			metadata,
			timestamp: Utc::now(),
		}
	}
}

fn fill_if_nullish(metadata: &mut Metadata, key: &str, value: impl FnOnce() -> Value) {
	match metadata.get(key) {
		None | Some(Value::Null) => {
			metadata.insert(key.to_string(), value());
		}
		Some(_) => {}
	}
}

fn string_field(metadata: &Metadata, key: &str) -> Option<String> {
	metadata.get(key).and_then(Value::as_str).map(str::to_string)
}
