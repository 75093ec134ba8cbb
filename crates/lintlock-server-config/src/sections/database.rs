// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Database configuration section.

use serde::{Deserialize, Serialize};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

fn default_url() -> String {
	"sqlite://lintlock.db".to_string()
}

fn default_max_connections() -> u32 {
	DEFAULT_MAX_CONNECTIONS
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DatabaseConfigLayer {
	pub url: Option<String>,
	pub max_connections: Option<u32>,
}

impl DatabaseConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.url.is_some() {
			self.url = other.url;
		}
		if other.max_connections.is_some() {
			self.max_connections = other.max_connections;
		}
	}

	pub fn finalize(self) -> DatabaseConfig {
		DatabaseConfig {
			url: self.url.unwrap_or_else(default_url),
			max_connections: self.max_connections.unwrap_or_else(default_max_connections),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatabaseConfig {
	pub url: String,
	pub max_connections: u32,
}

impl Default for DatabaseConfig {
	fn default() -> Self {
		Self {
			url: default_url(),
			max_connections: default_max_connections(),
		}
	}
}
