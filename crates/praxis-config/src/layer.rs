// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration layer for merging from multiple sources.

use serde::{Deserialize, Serialize};

use crate::sections::{
	BillingSettingsLayer, ClinicalSettingsLayer, EmailSettingsLayer, GeneralSettingsLayer,
	IntegrationsSettingsLayer, LoggingConfigLayer, SchedulingSettingsLayer, SecuritySettingsLayer,
};

/// Console configuration layer - all fields are Option for merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConsoleConfigLayer {
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
	#[serde(default)]
	pub general: Option<GeneralSettingsLayer>,
	#[serde(default)]
	pub security: Option<SecuritySettingsLayer>,
	#[serde(default)]
	pub email: Option<EmailSettingsLayer>,
	#[serde(default)]
	pub scheduling: Option<SchedulingSettingsLayer>,
	#[serde(default)]
	pub billing: Option<BillingSettingsLayer>,
	#[serde(default)]
	pub clinical: Option<ClinicalSettingsLayer>,
	#[serde(default)]
	pub integrations: Option<IntegrationsSettingsLayer>,
}

impl ConsoleConfigLayer {
	/// Merge another layer into this one. Other layer takes precedence.
	pub fn merge(&mut self, other: ConsoleConfigLayer) {
		merge_option(&mut self.logging, other.logging, LoggingConfigLayer::merge);
		merge_option(&mut self.general, other.general, GeneralSettingsLayer::merge);
		merge_option(&mut self.security, other.security, SecuritySettingsLayer::merge);
		merge_option(&mut self.email, other.email, EmailSettingsLayer::merge);
		merge_option(
			&mut self.scheduling,
			other.scheduling,
			SchedulingSettingsLayer::merge,
		);
		merge_option(&mut self.billing, other.billing, BillingSettingsLayer::merge);
		merge_option(&mut self.clinical, other.clinical, ClinicalSettingsLayer::merge);
		merge_option(
			&mut self.integrations,
			other.integrations,
			IntegrationsSettingsLayer::merge,
		);
	}
}

fn merge_option<T, F>(target: &mut Option<T>, source: Option<T>, merge_fn: F)
where
	F: FnOnce(&mut T, T),
{
	match (target.as_mut(), source) {
		(Some(t), Some(s)) => merge_fn(t, s),
		(None, Some(s)) => *target = Some(s),
		_ => {}
	}
}
