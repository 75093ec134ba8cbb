// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// The authenticated user attributed as the cause of an action.
///
/// Owned by the authentication layer; consumers (notably the audit
/// subsystem) only read it. System-initiated work carries no actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
	pub id: UserId,
	pub display_name: String,
	pub email: String,
}

impl Actor {
	pub fn new(
		id: impl Into<UserId>,
		display_name: impl Into<String>,
		email: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			display_name: display_name.into(),
			email: email.into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn constructs_from_impl_into() {
		let actor = Actor::new("u1", "Jane", "jane@x.com");
		assert_eq!(actor.id, UserId::from("u1"));
		assert_eq!(actor.display_name, "Jane");
		assert_eq!(actor.email, "jane@x.com");
	}

	#[test]
	fn serde_roundtrip() {
		let actor = Actor::new("u1", "Jane", "jane@x.com");
		let json = serde_json::to_string(&actor).unwrap();
		let back: Actor = serde_json::from_str(&json).unwrap();
		assert_eq!(back, actor);
	}
}
