// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Account security settings: session lifetime, lockout policy, passwords.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SecuritySettingsLayer {
	pub session_timeout_minutes: Option<u32>,
	pub max_login_attempts: Option<u32>,
	pub lockout_duration_minutes: Option<u32>,
	pub password_min_length: Option<u32>,
	pub password_expiry_days: Option<u32>,
	pub require_mfa: Option<bool>,
	pub allowed_ip_ranges: Option<Vec<String>>,
}

impl SecuritySettingsLayer {
	pub fn merge(&mut self, other: Self) {
		if other.session_timeout_minutes.is_some() {
			self.session_timeout_minutes = other.session_timeout_minutes;
		}
		if other.max_login_attempts.is_some() {
			self.max_login_attempts = other.max_login_attempts;
		}
		if other.lockout_duration_minutes.is_some() {
			self.lockout_duration_minutes = other.lockout_duration_minutes;
		}
		if other.password_min_length.is_some() {
			self.password_min_length = other.password_min_length;
		}
		if other.password_expiry_days.is_some() {
			self.password_expiry_days = other.password_expiry_days;
		}
		if other.require_mfa.is_some() {
			self.require_mfa = other.require_mfa;
		}
		if other.allowed_ip_ranges.is_some() {
			self.allowed_ip_ranges = other.allowed_ip_ranges;
		}
	}

	pub fn finalize(self) -> SecuritySettings {
		let defaults = SecuritySettings::default();
		SecuritySettings {
			session_timeout_minutes: self
				.session_timeout_minutes
				.unwrap_or(defaults.session_timeout_minutes),
			max_login_attempts: self.max_login_attempts.unwrap_or(defaults.max_login_attempts),
			lockout_duration_minutes: self
				.lockout_duration_minutes
				.unwrap_or(defaults.lockout_duration_minutes),
			password_min_length: self
				.password_min_length
				.unwrap_or(defaults.password_min_length),
			password_expiry_days: self
				.password_expiry_days
				.unwrap_or(defaults.password_expiry_days),
			require_mfa: self.require_mfa.unwrap_or(defaults.require_mfa),
			allowed_ip_ranges: self.allowed_ip_ranges.unwrap_or(defaults.allowed_ip_ranges),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SecuritySettings {
	pub session_timeout_minutes: u32,
	/// Failed logins before an account is locked.
	pub max_login_attempts: u32,
	pub lockout_duration_minutes: u32,
	pub password_min_length: u32,
	/// Zero disables expiry.
	pub password_expiry_days: u32,
	pub require_mfa: bool,
	/// Empty means no restriction.
	pub allowed_ip_ranges: Vec<String>,
}

impl Default for SecuritySettings {
	fn default() -> Self {
		Self {
			session_timeout_minutes: 30,
			max_login_attempts: 5,
			lockout_duration_minutes: 30,
			password_min_length: 12,
			password_expiry_days: 90,
			require_mfa: false,
			allowed_ip_ranges: Vec::new(),
		}
	}
}

impl SecuritySettings {
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.max_login_attempts < 1 {
			return Err(ConfigError::Validation(
				"security.max_login_attempts must be at least 1".to_string(),
			));
		}
		if self.session_timeout_minutes < 1 {
			return Err(ConfigError::Validation(
				"security.session_timeout_minutes must be at least 1".to_string(),
			));
		}
		if self.lockout_duration_minutes < 1 {
			return Err(ConfigError::Validation(
				"security.lockout_duration_minutes must be at least 1".to_string(),
			));
		}
		if self.password_min_length < 8 {
			return Err(ConfigError::Validation(
				"security.password_min_length must be at least 8".to_string(),
			));
		}
		Ok(())
	}
}

impl From<SecuritySettings> for SecuritySettingsLayer {
	fn from(settings: SecuritySettings) -> Self {
		Self {
			session_timeout_minutes: Some(settings.session_timeout_minutes),
			max_login_attempts: Some(settings.max_login_attempts),
			lockout_duration_minutes: Some(settings.lockout_duration_minutes),
			password_min_length: Some(settings.password_min_length),
			password_expiry_days: Some(settings.password_expiry_days),
			require_mfa: Some(settings.require_mfa),
			allowed_ip_ranges: Some(settings.allowed_ip_ranges),
		}
	}
}
