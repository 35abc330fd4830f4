// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Appointment scheduling settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchedulingSettingsLayer {
	pub default_appointment_minutes: Option<u32>,
	pub slot_interval_minutes: Option<u32>,
	pub business_hours_start: Option<String>,
	pub business_hours_end: Option<String>,
	pub working_days: Option<Vec<String>>,
	pub allow_online_booking: Option<bool>,
	pub reminder_hours_before: Option<Vec<u32>>,
}

impl SchedulingSettingsLayer {
	pub fn merge(&mut self, other: Self) {
		if other.default_appointment_minutes.is_some() {
			self.default_appointment_minutes = other.default_appointment_minutes;
		}
		if other.slot_interval_minutes.is_some() {
			self.slot_interval_minutes = other.slot_interval_minutes;
		}
		if other.business_hours_start.is_some() {
			self.business_hours_start = other.business_hours_start;
		}
		if other.business_hours_end.is_some() {
			self.business_hours_end = other.business_hours_end;
		}
		if other.working_days.is_some() {
			self.working_days = other.working_days;
		}
		if other.allow_online_booking.is_some() {
			self.allow_online_booking = other.allow_online_booking;
		}
		if other.reminder_hours_before.is_some() {
			self.reminder_hours_before = other.reminder_hours_before;
		}
	}

	pub fn finalize(self) -> SchedulingSettings {
		let defaults = SchedulingSettings::default();
		SchedulingSettings {
			default_appointment_minutes: self
				.default_appointment_minutes
				.unwrap_or(defaults.default_appointment_minutes),
			slot_interval_minutes: self
				.slot_interval_minutes
				.unwrap_or(defaults.slot_interval_minutes),
			business_hours_start: self
				.business_hours_start
				.unwrap_or(defaults.business_hours_start),
			business_hours_end: self.business_hours_end.unwrap_or(defaults.business_hours_end),
			working_days: self.working_days.unwrap_or(defaults.working_days),
			allow_online_booking: self
				.allow_online_booking
				.unwrap_or(defaults.allow_online_booking),
			reminder_hours_before: self
				.reminder_hours_before
				.unwrap_or(defaults.reminder_hours_before),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchedulingSettings {
	pub default_appointment_minutes: u32,
	pub slot_interval_minutes: u32,
	/// `HH:MM`, practice local time.
	pub business_hours_start: String,
	pub business_hours_end: String,
	pub working_days: Vec<String>,
	pub allow_online_booking: bool,
	pub reminder_hours_before: Vec<u32>,
}

impl Default for SchedulingSettings {
	fn default() -> Self {
		Self {
			default_appointment_minutes: 15,
			slot_interval_minutes: 15,
			business_hours_start: "08:00".to_string(),
			business_hours_end: "17:00".to_string(),
			working_days: ["monday", "tuesday", "wednesday", "thursday", "friday"]
				.iter()
				.map(|d| d.to_string())
				.collect(),
			allow_online_booking: false,
			reminder_hours_before: vec![24],
		}
	}
}

impl SchedulingSettings {
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.slot_interval_minutes < 1 {
			return Err(ConfigError::Validation(
				"scheduling.slot_interval_minutes must be at least 1".to_string(),
			));
		}
		if self.default_appointment_minutes < self.slot_interval_minutes {
			return Err(ConfigError::Validation(
				"scheduling.default_appointment_minutes must not be shorter than one slot"
					.to_string(),
			));
		}
		let start = parse_clock(&self.business_hours_start, "scheduling.business_hours_start")?;
		let end = parse_clock(&self.business_hours_end, "scheduling.business_hours_end")?;
		if start >= end {
			return Err(ConfigError::Validation(
				"scheduling.business_hours_start must be before business_hours_end".to_string(),
			));
		}
		Ok(())
	}
}

/// Parses `HH:MM` into minutes after midnight.
fn parse_clock(value: &str, key: &str) -> Result<u32, ConfigError> {
	let invalid = || ConfigError::InvalidValue {
		key: key.to_string(),
		message: format!("expected HH:MM, got '{value}'"),
	};
	let (hours, minutes) = value.split_once(':').ok_or_else(invalid)?;
	let hours: u32 = hours.parse().map_err(|_| invalid())?;
	let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
	if hours > 23 || minutes > 59 {
		return Err(invalid());
	}
	Ok(hours * 60 + minutes)
}

impl From<SchedulingSettings> for SchedulingSettingsLayer {
	fn from(settings: SchedulingSettings) -> Self {
		Self {
			default_appointment_minutes: Some(settings.default_appointment_minutes),
			slot_interval_minutes: Some(settings.slot_interval_minutes),
			business_hours_start: Some(settings.business_hours_start),
			business_hours_end: Some(settings.business_hours_end),
			working_days: Some(settings.working_days),
			allow_online_booking: Some(settings.allow_online_booking),
			reminder_hours_before: Some(settings.reminder_hours_before),
		}
	}
}
