// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Billing and claims settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BillingSettingsLayer {
	pub payment_terms_days: Option<u32>,
	pub auto_submit_claims: Option<bool>,
	pub accepted_payment_methods: Option<Vec<String>>,
	pub statement_day_of_month: Option<u8>,
	pub late_fee_cents: Option<u32>,
}

impl BillingSettingsLayer {
	pub fn merge(&mut self, other: Self) {
		if other.payment_terms_days.is_some() {
			self.payment_terms_days = other.payment_terms_days;
		}
		if other.auto_submit_claims.is_some() {
			self.auto_submit_claims = other.auto_submit_claims;
		}
		if other.accepted_payment_methods.is_some() {
			self.accepted_payment_methods = other.accepted_payment_methods;
		}
		if other.statement_day_of_month.is_some() {
			self.statement_day_of_month = other.statement_day_of_month;
		}
		if other.late_fee_cents.is_some() {
			self.late_fee_cents = other.late_fee_cents;
		}
	}

	pub fn finalize(self) -> BillingSettings {
		let defaults = BillingSettings::default();
		BillingSettings {
			payment_terms_days: self.payment_terms_days.unwrap_or(defaults.payment_terms_days),
			auto_submit_claims: self.auto_submit_claims.unwrap_or(defaults.auto_submit_claims),
			accepted_payment_methods: self
				.accepted_payment_methods
				.unwrap_or(defaults.accepted_payment_methods),
			statement_day_of_month: self
				.statement_day_of_month
				.unwrap_or(defaults.statement_day_of_month),
			late_fee_cents: self.late_fee_cents.unwrap_or(defaults.late_fee_cents),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillingSettings {
	pub payment_terms_days: u32,
	pub auto_submit_claims: bool,
	pub accepted_payment_methods: Vec<String>,
	/// Day statements are generated, 1 to 28.
	pub statement_day_of_month: u8,
	pub late_fee_cents: u32,
}

impl Default for BillingSettings {
	fn default() -> Self {
		Self {
			payment_terms_days: 30,
			auto_submit_claims: false,
			accepted_payment_methods: vec![
				"cash".to_string(),
				"card".to_string(),
				"insurance".to_string(),
			],
			statement_day_of_month: 1,
			late_fee_cents: 0,
		}
	}
}

impl BillingSettings {
	pub fn validate(&self) -> Result<(), ConfigError> {
		if !(1..=28).contains(&self.statement_day_of_month) {
			return Err(ConfigError::Validation(format!(
				"billing.statement_day_of_month must be between 1 and 28, got {}",
				self.statement_day_of_month
			)));
		}
		Ok(())
	}
}

impl From<BillingSettings> for BillingSettingsLayer {
	fn from(settings: BillingSettings) -> Self {
		Self {
			payment_terms_days: Some(settings.payment_terms_days),
			auto_submit_claims: Some(settings.auto_submit_claims),
			accepted_payment_methods: Some(settings.accepted_payment_methods),
			statement_day_of_month: Some(settings.statement_day_of_month),
			late_fee_cents: Some(settings.late_fee_cents),
		}
	}
}
