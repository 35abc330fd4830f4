// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Outbound email settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EmailSettingsLayer {
	pub smtp_host: Option<String>,
	pub smtp_port: Option<u16>,
	pub use_tls: Option<bool>,
	pub from_address: Option<String>,
	pub from_name: Option<String>,
	pub appointment_reminders: Option<bool>,
	pub notification_recipients: Option<Vec<String>>,
}

impl EmailSettingsLayer {
	pub fn merge(&mut self, other: Self) {
		if other.smtp_host.is_some() {
			self.smtp_host = other.smtp_host;
		}
		if other.smtp_port.is_some() {
			self.smtp_port = other.smtp_port;
		}
		if other.use_tls.is_some() {
			self.use_tls = other.use_tls;
		}
		if other.from_address.is_some() {
			self.from_address = other.from_address;
		}
		if other.from_name.is_some() {
			self.from_name = other.from_name;
		}
		if other.appointment_reminders.is_some() {
			self.appointment_reminders = other.appointment_reminders;
		}
		if other.notification_recipients.is_some() {
			self.notification_recipients = other.notification_recipients;
		}
	}

	pub fn finalize(self) -> EmailSettings {
		let defaults = EmailSettings::default();
		EmailSettings {
			smtp_host: self.smtp_host.unwrap_or(defaults.smtp_host),
			smtp_port: self.smtp_port.unwrap_or(defaults.smtp_port),
			use_tls: self.use_tls.unwrap_or(defaults.use_tls),
			from_address: self.from_address.unwrap_or(defaults.from_address),
			from_name: self.from_name.unwrap_or(defaults.from_name),
			appointment_reminders: self
				.appointment_reminders
				.unwrap_or(defaults.appointment_reminders),
			notification_recipients: self
				.notification_recipients
				.unwrap_or(defaults.notification_recipients),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmailSettings {
	pub smtp_host: String,
	pub smtp_port: u16,
	pub use_tls: bool,
	pub from_address: String,
	pub from_name: String,
	pub appointment_reminders: bool,
	pub notification_recipients: Vec<String>,
}

impl Default for EmailSettings {
	fn default() -> Self {
		Self {
			smtp_host: "localhost".to_string(),
			smtp_port: 587,
			use_tls: true,
			from_address: "noreply@praxis.local".to_string(),
			from_name: "Praxis Family Medicine".to_string(),
			appointment_reminders: true,
			notification_recipients: Vec::new(),
		}
	}
}

impl EmailSettings {
	pub fn validate(&self) -> Result<(), ConfigError> {
		if !self.from_address.contains('@') {
			return Err(ConfigError::Validation(format!(
				"email.from_address '{}' is not an email address",
				self.from_address
			)));
		}
		if let Some(bad) = self
			.notification_recipients
			.iter()
			.find(|r| !r.contains('@'))
		{
			return Err(ConfigError::Validation(format!(
				"email.notification_recipients contains invalid address '{bad}'"
			)));
		}
		Ok(())
	}
}

impl From<EmailSettings> for EmailSettingsLayer {
	fn from(settings: EmailSettings) -> Self {
		Self {
			smtp_host: Some(settings.smtp_host),
			smtp_port: Some(settings.smtp_port),
			use_tls: Some(settings.use_tls),
			from_address: Some(settings.from_address),
			from_name: Some(settings.from_name),
			appointment_reminders: Some(settings.appointment_reminders),
			notification_recipients: Some(settings.notification_recipients),
		}
	}
}
