// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Practice-wide general settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeneralSettingsLayer {
	pub practice_name: Option<String>,
	pub timezone: Option<String>,
	pub date_format: Option<String>,
	pub time_format: Option<String>,
	pub language: Option<String>,
	pub currency: Option<String>,
}

impl GeneralSettingsLayer {
	pub fn merge(&mut self, other: Self) {
		if other.practice_name.is_some() {
			self.practice_name = other.practice_name;
		}
		if other.timezone.is_some() {
			self.timezone = other.timezone;
		}
		if other.date_format.is_some() {
			self.date_format = other.date_format;
		}
		if other.time_format.is_some() {
			self.time_format = other.time_format;
		}
		if other.language.is_some() {
			self.language = other.language;
		}
		if other.currency.is_some() {
			self.currency = other.currency;
		}
	}

	pub fn finalize(self) -> GeneralSettings {
		let defaults = GeneralSettings::default();
		GeneralSettings {
			practice_name: self.practice_name.unwrap_or(defaults.practice_name),
			timezone: self.timezone.unwrap_or(defaults.timezone),
			date_format: self.date_format.unwrap_or(defaults.date_format),
			time_format: self.time_format.unwrap_or(defaults.time_format),
			language: self.language.unwrap_or(defaults.language),
			currency: self.currency.unwrap_or(defaults.currency),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSettings {
	pub practice_name: String,
	/// IANA zone name.
	pub timezone: String,
	pub date_format: String,
	/// `12h` or `24h`.
	pub time_format: String,
	pub language: String,
	/// ISO 4217 code.
	pub currency: String,
}

impl Default for GeneralSettings {
	fn default() -> Self {
		Self {
			practice_name: "Praxis Family Medicine".to_string(),
			timezone: "America/New_York".to_string(),
			date_format: "MM/DD/YYYY".to_string(),
			time_format: "12h".to_string(),
			language: "en".to_string(),
			currency: "USD".to_string(),
		}
	}
}

impl From<GeneralSettings> for GeneralSettingsLayer {
	fn from(settings: GeneralSettings) -> Self {
		Self {
			practice_name: Some(settings.practice_name),
			timezone: Some(settings.timezone),
			date_format: Some(settings.date_format),
			time_format: Some(settings.time_format),
			language: Some(settings.language),
			currency: Some(settings.currency),
		}
	}
}
