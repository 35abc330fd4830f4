// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Third-party integration settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IntegrationsSettingsLayer {
	pub lab_interface_enabled: Option<bool>,
	pub pharmacy_network_enabled: Option<bool>,
	pub clearinghouse: Option<String>,
	pub ehr_export_format: Option<String>,
	pub webhook_urls: Option<Vec<String>>,
}

impl IntegrationsSettingsLayer {
	pub fn merge(&mut self, other: Self) {
		if other.lab_interface_enabled.is_some() {
			self.lab_interface_enabled = other.lab_interface_enabled;
		}
		if other.pharmacy_network_enabled.is_some() {
			self.pharmacy_network_enabled = other.pharmacy_network_enabled;
		}
		if other.clearinghouse.is_some() {
			self.clearinghouse = other.clearinghouse;
		}
		if other.ehr_export_format.is_some() {
			self.ehr_export_format = other.ehr_export_format;
		}
		if other.webhook_urls.is_some() {
			self.webhook_urls = other.webhook_urls;
		}
	}

	pub fn finalize(self) -> IntegrationsSettings {
		let defaults = IntegrationsSettings::default();
		IntegrationsSettings {
			lab_interface_enabled: self
				.lab_interface_enabled
				.unwrap_or(defaults.lab_interface_enabled),
			pharmacy_network_enabled: self
				.pharmacy_network_enabled
				.unwrap_or(defaults.pharmacy_network_enabled),
			clearinghouse: self.clearinghouse.unwrap_or(defaults.clearinghouse),
			ehr_export_format: self.ehr_export_format.unwrap_or(defaults.ehr_export_format),
			webhook_urls: self.webhook_urls.unwrap_or(defaults.webhook_urls),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntegrationsSettings {
	pub lab_interface_enabled: bool,
	pub pharmacy_network_enabled: bool,
	/// Empty when claims are not routed through a clearinghouse.
	pub clearinghouse: String,
	pub ehr_export_format: String,
	pub webhook_urls: Vec<String>,
}

impl Default for IntegrationsSettings {
	fn default() -> Self {
		Self {
			lab_interface_enabled: false,
			pharmacy_network_enabled: false,
			clearinghouse: String::new(),
			ehr_export_format: "ccda".to_string(),
			webhook_urls: Vec::new(),
		}
	}
}

impl From<IntegrationsSettings> for IntegrationsSettingsLayer {
	fn from(settings: IntegrationsSettings) -> Self {
		Self {
			lab_interface_enabled: Some(settings.lab_interface_enabled),
			pharmacy_network_enabled: Some(settings.pharmacy_network_enabled),
			clearinghouse: Some(settings.clearinghouse),
			ehr_export_format: Some(settings.ehr_export_format),
			webhook_urls: Some(settings.webhook_urls),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_values() {
		let settings = IntegrationsSettingsLayer::default().finalize();
		assert!(!settings.lab_interface_enabled);
		assert_eq!(settings.ehr_export_format, "ccda");
		assert!(settings.webhook_urls.is_empty());
	}
}
