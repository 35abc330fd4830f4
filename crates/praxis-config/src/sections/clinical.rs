// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Clinical documentation settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClinicalSettingsLayer {
	pub require_cosignature: Option<bool>,
	pub note_lock_hours: Option<u32>,
	pub default_encounter_template: Option<String>,
	pub e_prescribing_enabled: Option<bool>,
	pub drug_interaction_checks: Option<bool>,
	pub vitals_units: Option<String>,
}

impl ClinicalSettingsLayer {
	pub fn merge(&mut self, other: Self) {
		if other.require_cosignature.is_some() {
			self.require_cosignature = other.require_cosignature;
		}
		if other.note_lock_hours.is_some() {
			self.note_lock_hours = other.note_lock_hours;
		}
		if other.default_encounter_template.is_some() {
			self.default_encounter_template = other.default_encounter_template;
		}
		if other.e_prescribing_enabled.is_some() {
			self.e_prescribing_enabled = other.e_prescribing_enabled;
		}
		if other.drug_interaction_checks.is_some() {
			self.drug_interaction_checks = other.drug_interaction_checks;
		}
		if other.vitals_units.is_some() {
			self.vitals_units = other.vitals_units;
		}
	}

	pub fn finalize(self) -> ClinicalSettings {
		let defaults = ClinicalSettings::default();
		ClinicalSettings {
			require_cosignature: self
				.require_cosignature
				.unwrap_or(defaults.require_cosignature),
			note_lock_hours: self.note_lock_hours.unwrap_or(defaults.note_lock_hours),
			default_encounter_template: self
				.default_encounter_template
				.unwrap_or(defaults.default_encounter_template),
			e_prescribing_enabled: self
				.e_prescribing_enabled
				.unwrap_or(defaults.e_prescribing_enabled),
			drug_interaction_checks: self
				.drug_interaction_checks
				.unwrap_or(defaults.drug_interaction_checks),
			vitals_units: self.vitals_units.unwrap_or(defaults.vitals_units),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicalSettings {
	pub require_cosignature: bool,
	/// Hours after signing before a note becomes read-only.
	pub note_lock_hours: u32,
	pub default_encounter_template: String,
	pub e_prescribing_enabled: bool,
	pub drug_interaction_checks: bool,
	/// `imperial` or `metric`.
	pub vitals_units: String,
}

impl Default for ClinicalSettings {
	fn default() -> Self {
		Self {
			require_cosignature: false,
			note_lock_hours: 24,
			default_encounter_template: "soap".to_string(),
			e_prescribing_enabled: true,
			drug_interaction_checks: true,
			vitals_units: "imperial".to_string(),
		}
	}
}

impl From<ClinicalSettings> for ClinicalSettingsLayer {
	fn from(settings: ClinicalSettings) -> Self {
		Self {
			require_cosignature: Some(settings.require_cosignature),
			note_lock_hours: Some(settings.note_lock_hours),
			default_encounter_template: Some(settings.default_encounter_template),
			e_prescribing_enabled: Some(settings.e_prescribing_enabled),
			drug_interaction_checks: Some(settings.drug_interaction_checks),
			vitals_units: Some(settings.vitals_units),
		}
	}
}
