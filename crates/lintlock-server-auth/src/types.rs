// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;

use serde::{Deserialize, Serialize};

/// A unique identifier for a user account.
///
/// The upstream user store hands out opaque document ids, so this is a
/// string newtype rather than a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_inner(self) -> String {
		self.0
	}
}

impl fmt::Display for UserId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<String> for UserId {
	fn from(id: String) -> Self {
		Self(id)
	}
}

impl From<&str> for UserId {
	fn from(id: &str) -> Self {
		Self(id.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display_matches_inner() {
		let id = UserId::new("64f1c0ffee");
		assert_eq!(id.to_string(), "64f1c0ffee");
		assert_eq!(id.as_str(), "64f1c0ffee");
	}

	#[test]
	fn serializes_transparent() {
		let id = UserId::from("u1");
		assert_eq!(serde_json::to_string(&id).unwrap(), "\"u1\"");

		let back: UserId = serde_json::from_str("\"u1\"").unwrap();
		assert_eq!(back, id);
	}
}
