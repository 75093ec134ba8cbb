// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Centralized configuration management for the LintLock server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`LINTLOCK_SERVER_*`)
//!
//! # Usage
//!
//! ```ignore
//! use lintlock_server_config::load_config;
//!
//! let config = load_config(Some(Path::new("lintlock.toml")))?;
//! println!("flushing audit events every {}ms", config.audit.flush_interval_ms);
//! ```

pub mod error;
pub mod sections;

pub use error::ConfigError;
pub use sections::audit::{AuditConfig, AuditConfigLayer};
pub use sections::database::{DatabaseConfig, DatabaseConfigLayer};

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerConfig {
	pub audit: AuditConfig,
	pub database: DatabaseConfig,
}

/// Partial configuration collected from a single source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfigLayer {
	pub audit: Option<AuditConfigLayer>,
	pub database: Option<DatabaseConfigLayer>,
}

impl ServerConfigLayer {
	/// Overlay another layer on top of this one; the overlay wins where set.
	pub fn merge(&mut self, other: Self) {
		if let Some(overlay) = other.audit {
			self.audit
				.get_or_insert_with(Default::default)
				.merge(overlay);
		}
		if let Some(overlay) = other.database {
			self.database
				.get_or_insert_with(Default::default)
				.merge(overlay);
		}
	}

	/// Resolve the layer into a complete configuration, filling defaults.
	pub fn finalize(self) -> ServerConfig {
		ServerConfig {
			audit: self.audit.unwrap_or_default().finalize(),
			database: self.database.unwrap_or_default().finalize(),
		}
	}

	pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
		toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
	}

	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_env_lookup(|key| std::env::var(key).ok())
	}

	fn from_env_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
		let mut audit = AuditConfigLayer::default();
		if let Some(raw) = get("LINTLOCK_SERVER_AUDIT_ENABLED") {
			audit.enabled = Some(parse_bool("LINTLOCK_SERVER_AUDIT_ENABLED", &raw)?);
		}
		if let Some(raw) = get("LINTLOCK_SERVER_AUDIT_FLUSH_INTERVAL_MS") {
			audit.flush_interval_ms = Some(parse_u64("LINTLOCK_SERVER_AUDIT_FLUSH_INTERVAL_MS", &raw)?);
		}
		if let Some(raw) = get("LINTLOCK_SERVER_AUDIT_WRITE_TIMEOUT_MS") {
			audit.write_timeout_ms = Some(parse_u64("LINTLOCK_SERVER_AUDIT_WRITE_TIMEOUT_MS", &raw)?);
		}

		let mut database = DatabaseConfigLayer::default();
		if let Some(raw) = get("LINTLOCK_SERVER_DATABASE_URL") {
			database.url = Some(raw);
		}
		if let Some(raw) = get("LINTLOCK_SERVER_DATABASE_MAX_CONNECTIONS") {
			database.max_connections =
				Some(parse_u64("LINTLOCK_SERVER_DATABASE_MAX_CONNECTIONS", &raw)? as u32);
		}

		Ok(Self {
			audit: Some(audit),
			database: Some(database),
		})
	}
}

/// Load configuration with standard precedence: defaults, then the TOML
/// file (when given), then environment variables.
pub fn load_config(path: Option<&Path>) -> Result<ServerConfig, ConfigError> {
	let mut layer = ServerConfigLayer::default();

	if let Some(path) = path {
		let raw = std::fs::read_to_string(path)?;
		layer.merge(ServerConfigLayer::from_toml_str(&raw)?);
	}

	layer.merge(ServerConfigLayer::from_env()?);

	let config = layer.finalize();
	info!(
		audit_enabled = config.audit.enabled,
		flush_interval_ms = config.audit.flush_interval_ms,
		"configuration loaded"
	);
	Ok(config)
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
	match raw.to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Ok(true),
		"0" | "false" | "no" | "off" => Ok(false),
		_ => Err(ConfigError::InvalidValue {
			key: key.to_string(),
			value: raw.to_string(),
		}),
	}
}

fn parse_u64(key: &str, raw: &str) -> Result<u64, ConfigError> {
	raw.parse().map_err(|_| ConfigError::InvalidValue {
		key: key.to_string(),
		value: raw.to_string(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	#[test]
	fn finalize_empty_layer_yields_defaults() {
		let config = ServerConfigLayer::default().finalize();
		assert_eq!(config, ServerConfig::default());
	}

	#[test]
	fn parses_toml_sections() {
		let layer = ServerConfigLayer::from_toml_str(
			r#"
			[audit]
			flush_interval_ms = 250

			[database]
			url = "sqlite::memory:"
			"#,
		)
		.unwrap();
		let config = layer.finalize();
		assert_eq!(config.audit.flush_interval_ms, 250);
		assert!(config.audit.enabled);
		assert_eq!(config.database.url, "sqlite::memory:");
		assert_eq!(config.database.max_connections, 5);
	}

	#[test]
	fn rejects_malformed_toml() {
		assert!(matches!(
			ServerConfigLayer::from_toml_str("[audit\nenabled = true"),
			Err(ConfigError::Parse(_))
		));
	}

	#[test]
	fn env_overrides_toml() {
		let mut layer = ServerConfigLayer::from_toml_str(
			r#"
			[audit]
			flush_interval_ms = 250
			enabled = false
			"#,
		)
		.unwrap();

		let vars: HashMap<&str, &str> = [
			("LINTLOCK_SERVER_AUDIT_FLUSH_INTERVAL_MS", "75"),
			("LINTLOCK_SERVER_DATABASE_URL", "sqlite://env.db"),
		]
		.into_iter()
		.collect();
		let env = ServerConfigLayer::from_env_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();

		layer.merge(env);
		let config = layer.finalize();
		assert_eq!(config.audit.flush_interval_ms, 75);
		// untouched by env, kept from the file
		assert!(!config.audit.enabled);
		assert_eq!(config.database.url, "sqlite://env.db");
	}

	#[test]
	fn env_bool_parsing() {
		for (raw, expected) in [("1", true), ("true", true), ("off", false), ("NO", false)] {
			let vars: HashMap<&str, &str> =
				[("LINTLOCK_SERVER_AUDIT_ENABLED", raw)].into_iter().collect();
			let layer =
				ServerConfigLayer::from_env_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
			assert_eq!(layer.finalize().audit.enabled, expected, "raw = {raw}");
		}
	}

	#[test]
	fn env_rejects_bad_numbers() {
		let vars: HashMap<&str, &str> = [("LINTLOCK_SERVER_AUDIT_FLUSH_INTERVAL_MS", "soon")]
			.into_iter()
			.collect();
		let err = ServerConfigLayer::from_env_lookup(|k| vars.get(k).map(|v| v.to_string()))
			.unwrap_err();
		assert!(matches!(err, ConfigError::InvalidValue { .. }));
	}
}
