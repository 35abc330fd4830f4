// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ConsoleConfigLayer;
use crate::sections::{
	BillingSettingsLayer, ClinicalSettingsLayer, EmailSettingsLayer, GeneralSettingsLayer,
	IntegrationsSettingsLayer, LogFormat, LoggingConfigLayer, SchedulingSettingsLayer,
	SecuritySettingsLayer,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ConsoleConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ConsoleConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ConsoleConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/praxis/console.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ConsoleConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ConsoleConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ConsoleConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: PRAXIS_<SECTION>_<FIELD>
pub struct EnvSource;

impl EnvSource {
	/// Builds a layer from an arbitrary variable lookup.
	pub fn load_from<F>(lookup: F) -> Result<ConsoleConfigLayer, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let env = EnvReader { lookup };
		Ok(ConsoleConfigLayer {
			logging: Some(load_logging(&env)?),
			general: Some(load_general(&env)),
			security: Some(load_security(&env)?),
			email: Some(load_email(&env)?),
			scheduling: Some(load_scheduling(&env)?),
			billing: Some(load_billing(&env)?),
			clinical: Some(load_clinical(&env)?),
			integrations: Some(load_integrations(&env)),
		})
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ConsoleConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Self::load_from(|name| std::env::var(name).ok())
	}
}

struct EnvReader<F> {
	lookup: F,
}

impl<F: Fn(&str) -> Option<String>> EnvReader<F> {
	fn var(&self, name: &str) -> Option<String> {
		(self.lookup)(name).filter(|s| !s.is_empty())
	}

	fn bool(&self, name: &str) -> Option<bool> {
		self.var(name)
			.map(|v| v.eq_ignore_ascii_case("true") || v == "1")
	}

	fn parsed<T: FromStr>(&self, name: &str) -> Result<Option<T>, ConfigError> {
		match self.var(name) {
			Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
				key: name.to_string(),
				message: format!(
					"invalid {} value '{v}'",
					std::any::type_name::<T>()
				),
			}),
			None => Ok(None),
		}
	}

	fn list(&self, name: &str) -> Option<Vec<String>> {
		self.var(name).map(|s| {
			s.split(',')
				.map(|s| s.trim().to_string())
				.filter(|s| !s.is_empty())
				.collect()
		})
	}
}

fn load_logging<F: Fn(&str) -> Option<String>>(
	env: &EnvReader<F>,
) -> Result<LoggingConfigLayer, ConfigError> {
	let format = env
		.var("PRAXIS_LOG_FORMAT")
		.map(|v| LogFormat::from_str_value(&v))
		.transpose()?;

	Ok(LoggingConfigLayer {
		level: env.var("PRAXIS_LOG_LEVEL"),
		format,
	})
}

fn load_general<F: Fn(&str) -> Option<String>>(env: &EnvReader<F>) -> GeneralSettingsLayer {
	GeneralSettingsLayer {
		practice_name: env.var("PRAXIS_GENERAL_PRACTICE_NAME"),
		timezone: env.var("PRAXIS_GENERAL_TIMEZONE"),
		date_format: env.var("PRAXIS_GENERAL_DATE_FORMAT"),
		time_format: env.var("PRAXIS_GENERAL_TIME_FORMAT"),
		language: env.var("PRAXIS_GENERAL_LANGUAGE"),
		currency: env.var("PRAXIS_GENERAL_CURRENCY"),
	}
}

fn load_security<F: Fn(&str) -> Option<String>>(
	env: &EnvReader<F>,
) -> Result<SecuritySettingsLayer, ConfigError> {
	Ok(SecuritySettingsLayer {
		session_timeout_minutes: env.parsed("PRAXIS_SECURITY_SESSION_TIMEOUT_MINUTES")?,
		max_login_attempts: env.parsed("PRAXIS_SECURITY_MAX_LOGIN_ATTEMPTS")?,
		lockout_duration_minutes: env.parsed("PRAXIS_SECURITY_LOCKOUT_DURATION_MINUTES")?,
		password_min_length: env.parsed("PRAXIS_SECURITY_PASSWORD_MIN_LENGTH")?,
		password_expiry_days: env.parsed("PRAXIS_SECURITY_PASSWORD_EXPIRY_DAYS")?,
		require_mfa: env.bool("PRAXIS_SECURITY_REQUIRE_MFA"),
		allowed_ip_ranges: env.list("PRAXIS_SECURITY_ALLOWED_IP_RANGES"),
	})
}

fn load_email<F: Fn(&str) -> Option<String>>(
	env: &EnvReader<F>,
) -> Result<EmailSettingsLayer, ConfigError> {
	Ok(EmailSettingsLayer {
		smtp_host: env.var("PRAXIS_EMAIL_SMTP_HOST"),
		smtp_port: env.parsed("PRAXIS_EMAIL_SMTP_PORT")?,
		use_tls: env.bool("PRAXIS_EMAIL_USE_TLS"),
		from_address: env.var("PRAXIS_EMAIL_FROM_ADDRESS"),
		from_name: env.var("PRAXIS_EMAIL_FROM_NAME"),
		appointment_reminders: env.bool("PRAXIS_EMAIL_APPOINTMENT_REMINDERS"),
		notification_recipients: env.list("PRAXIS_EMAIL_NOTIFICATION_RECIPIENTS"),
	})
}

fn load_scheduling<F: Fn(&str) -> Option<String>>(
	env: &EnvReader<F>,
) -> Result<SchedulingSettingsLayer, ConfigError> {
	let reminder_hours_before = match env.list("PRAXIS_SCHEDULING_REMINDER_HOURS_BEFORE") {
		Some(values) => Some(
			values
				.iter()
				.map(|v| {
					v.parse::<u32>().map_err(|_| ConfigError::InvalidValue {
						key: "PRAXIS_SCHEDULING_REMINDER_HOURS_BEFORE".to_string(),
						message: format!("invalid u32 value '{v}'"),
					})
				})
				.collect::<Result<Vec<_>, _>>()?,
		),
		None => None,
	};

	Ok(SchedulingSettingsLayer {
		default_appointment_minutes: env.parsed("PRAXIS_SCHEDULING_DEFAULT_APPOINTMENT_MINUTES")?,
		slot_interval_minutes: env.parsed("PRAXIS_SCHEDULING_SLOT_INTERVAL_MINUTES")?,
		business_hours_start: env.var("PRAXIS_SCHEDULING_BUSINESS_HOURS_START"),
		business_hours_end: env.var("PRAXIS_SCHEDULING_BUSINESS_HOURS_END"),
		working_days: env.list("PRAXIS_SCHEDULING_WORKING_DAYS"),
		allow_online_booking: env.bool("PRAXIS_SCHEDULING_ALLOW_ONLINE_BOOKING"),
		reminder_hours_before,
	})
}

fn load_billing<F: Fn(&str) -> Option<String>>(
	env: &EnvReader<F>,
) -> Result<BillingSettingsLayer, ConfigError> {
	Ok(BillingSettingsLayer {
		payment_terms_days: env.parsed("PRAXIS_BILLING_PAYMENT_TERMS_DAYS")?,
		auto_submit_claims: env.bool("PRAXIS_BILLING_AUTO_SUBMIT_CLAIMS"),
		accepted_payment_methods: env.list("PRAXIS_BILLING_ACCEPTED_PAYMENT_METHODS"),
		statement_day_of_month: env.parsed("PRAXIS_BILLING_STATEMENT_DAY_OF_MONTH")?,
		late_fee_cents: env.parsed("PRAXIS_BILLING_LATE_FEE_CENTS")?,
	})
}

fn load_clinical<F: Fn(&str) -> Option<String>>(
	env: &EnvReader<F>,
) -> Result<ClinicalSettingsLayer, ConfigError> {
	Ok(ClinicalSettingsLayer {
		require_cosignature: env.bool("PRAXIS_CLINICAL_REQUIRE_COSIGNATURE"),
		note_lock_hours: env.parsed("PRAXIS_CLINICAL_NOTE_LOCK_HOURS")?,
		default_encounter_template: env.var("PRAXIS_CLINICAL_DEFAULT_ENCOUNTER_TEMPLATE"),
		e_prescribing_enabled: env.bool("PRAXIS_CLINICAL_E_PRESCRIBING_ENABLED"),
		drug_interaction_checks: env.bool("PRAXIS_CLINICAL_DRUG_INTERACTION_CHECKS"),
		vitals_units: env.var("PRAXIS_CLINICAL_VITALS_UNITS"),
	})
}

fn load_integrations<F: Fn(&str) -> Option<String>>(
	env: &EnvReader<F>,
) -> IntegrationsSettingsLayer {
	IntegrationsSettingsLayer {
		lab_interface_enabled: env.bool("PRAXIS_INTEGRATIONS_LAB_INTERFACE_ENABLED"),
		pharmacy_network_enabled: env.bool("PRAXIS_INTEGRATIONS_PHARMACY_NETWORK_ENABLED"),
		clearinghouse: env.var("PRAXIS_INTEGRATIONS_CLEARINGHOUSE"),
		ehr_export_format: env.var("PRAXIS_INTEGRATIONS_EHR_EXPORT_FORMAT"),
		webhook_urls: env.list("PRAXIS_INTEGRATIONS_WEBHOOK_URLS"),
	}
}
