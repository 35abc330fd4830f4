// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Keyed console settings with a shallow per-section update.
//!
//! [`ConsoleSettings::update_section`] merges exactly one level deep: every
//! field present in the patch replaces the stored value, absent fields are
//! kept, and list values are replaced wholesale rather than appended.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::ConfigError;
use crate::sections::{
	BillingSettings, BillingSettingsLayer, ClinicalSettings, ClinicalSettingsLayer, EmailSettings,
	EmailSettingsLayer, GeneralSettings, GeneralSettingsLayer, IntegrationsSettings,
	IntegrationsSettingsLayer, SchedulingSettings, SchedulingSettingsLayer, SecuritySettings,
	SecuritySettingsLayer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsSection {
	General,
	Security,
	Email,
	Scheduling,
	Billing,
	Clinical,
	Integrations,
}

impl SettingsSection {
	pub fn all() -> &'static [SettingsSection] {
		&[
			SettingsSection::General,
			SettingsSection::Security,
			SettingsSection::Email,
			SettingsSection::Scheduling,
			SettingsSection::Billing,
			SettingsSection::Clinical,
			SettingsSection::Integrations,
		]
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			SettingsSection::General => "general",
			SettingsSection::Security => "security",
			SettingsSection::Email => "email",
			SettingsSection::Scheduling => "scheduling",
			SettingsSection::Billing => "billing",
			SettingsSection::Clinical => "clinical",
			SettingsSection::Integrations => "integrations",
		}
	}
}

impl fmt::Display for SettingsSection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for SettingsSection {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		SettingsSection::all()
			.iter()
			.copied()
			.find(|section| section.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| ConfigError::InvalidValue {
				key: "section".to_string(),
				message: format!("unknown settings section '{s}'"),
			})
	}
}

/// A partial update for one settings section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", content = "patch", rename_all = "snake_case")]
pub enum SettingsPatch {
	General(GeneralSettingsLayer),
	Security(SecuritySettingsLayer),
	Email(EmailSettingsLayer),
	Scheduling(SchedulingSettingsLayer),
	Billing(BillingSettingsLayer),
	Clinical(ClinicalSettingsLayer),
	Integrations(IntegrationsSettingsLayer),
}

impl SettingsPatch {
	pub fn section(&self) -> SettingsSection {
		match self {
			SettingsPatch::General(_) => SettingsSection::General,
			SettingsPatch::Security(_) => SettingsSection::Security,
			SettingsPatch::Email(_) => SettingsSection::Email,
			SettingsPatch::Scheduling(_) => SettingsSection::Scheduling,
			SettingsPatch::Billing(_) => SettingsSection::Billing,
			SettingsPatch::Clinical(_) => SettingsSection::Clinical,
			SettingsPatch::Integrations(_) => SettingsSection::Integrations,
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleSettings {
	pub general: GeneralSettings,
	pub security: SecuritySettings,
	pub email: EmailSettings,
	pub scheduling: SchedulingSettings,
	pub billing: BillingSettings,
	pub clinical: ClinicalSettings,
	pub integrations: IntegrationsSettings,
}

impl ConsoleSettings {
	/// Validate cross-field rules across all sections.
	pub fn validate(&self) -> Result<(), ConfigError> {
		self.security.validate()?;
		self.email.validate()?;
		self.scheduling.validate()?;
		self.billing.validate()?;
		Ok(())
	}

	/// Shallow-merges `patch` into its section.
	///
	/// The result is validated before it is stored; on error the settings are
	/// left untouched.
	#[instrument(skip(self, patch), fields(section = %patch.section()))]
	pub fn update_section(&mut self, patch: SettingsPatch) -> Result<(), ConfigError> {
		let mut next = self.clone();
		match patch {
			SettingsPatch::General(p) => {
				let mut layer = GeneralSettingsLayer::from(next.general);
				layer.merge(p);
				next.general = layer.finalize();
			}
			SettingsPatch::Security(p) => {
				let mut layer = SecuritySettingsLayer::from(next.security);
				layer.merge(p);
				next.security = layer.finalize();
			}
			SettingsPatch::Email(p) => {
				let mut layer = EmailSettingsLayer::from(next.email);
				layer.merge(p);
				next.email = layer.finalize();
			}
			SettingsPatch::Scheduling(p) => {
				let mut layer = SchedulingSettingsLayer::from(next.scheduling);
				layer.merge(p);
				next.scheduling = layer.finalize();
			}
			SettingsPatch::Billing(p) => {
				let mut layer = BillingSettingsLayer::from(next.billing);
				layer.merge(p);
				next.billing = layer.finalize();
			}
			SettingsPatch::Clinical(p) => {
				let mut layer = ClinicalSettingsLayer::from(next.clinical);
				layer.merge(p);
				next.clinical = layer.finalize();
			}
			SettingsPatch::Integrations(p) => {
				let mut layer = IntegrationsSettingsLayer::from(next.integrations);
				layer.merge(p);
				next.integrations = layer.finalize();
			}
		}
		next.validate()?;
		*self = next;
		debug!("settings section updated");
		Ok(())
	}
}
