// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration management for the Praxis admin console.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`PRAXIS_*`)
//! - The keyed console settings object with its shallow `update_section`
//!
//! # Usage
//!
//! ```ignore
//! use praxis_config::load_config;
//!
//! let config = load_config()?;
//! println!("Lockout after {} attempts", config.settings.security.max_login_attempts);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod settings;
pub mod sources;

pub use error::ConfigError;
pub use layer::ConsoleConfigLayer;
pub use sections::*;
pub use settings::{ConsoleSettings, SettingsPatch, SettingsSection};
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved console configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsoleConfig {
	pub logging: LoggingConfig,
	pub settings: ConsoleSettings,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`PRAXIS_*`)
/// 2. Config file (`/etc/praxis/console.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ConsoleConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ConsoleConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

/// Merge the given sources in precedence order and resolve the result.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<ConsoleConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ConsoleConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
pub fn finalize(layer: ConsoleConfigLayer) -> Result<ConsoleConfig, ConfigError> {
	let logging = layer.logging.unwrap_or_default().finalize();
	let settings = ConsoleSettings {
		general: layer.general.unwrap_or_default().finalize(),
		security: layer.security.unwrap_or_default().finalize(),
		email: layer.email.unwrap_or_default().finalize(),
		scheduling: layer.scheduling.unwrap_or_default().finalize(),
		billing: layer.billing.unwrap_or_default().finalize(),
		clinical: layer.clinical.unwrap_or_default().finalize(),
		integrations: layer.integrations.unwrap_or_default().finalize(),
	};

	settings.validate()?;

	info!(
		log_level = %logging.level,
		practice = %settings.general.practice_name,
		max_login_attempts = settings.security.max_login_attempts,
		session_timeout_minutes = settings.security.session_timeout_minutes,
		require_mfa = settings.security.require_mfa,
		"Console configuration loaded"
	);

	Ok(ConsoleConfig { logging, settings })
}
