// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections for the admin console.

pub mod billing;
pub mod clinical;
pub mod email;
pub mod general;
pub mod integrations;
pub mod logging;
pub mod scheduling;
pub mod security;

pub use billing::{BillingSettings, BillingSettingsLayer};
pub use clinical::{ClinicalSettings, ClinicalSettingsLayer};
pub use email::{EmailSettings, EmailSettingsLayer};
pub use general::{GeneralSettings, GeneralSettingsLayer};
pub use integrations::{IntegrationsSettings, IntegrationsSettingsLayer};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
pub use scheduling::{SchedulingSettings, SchedulingSettingsLayer};
pub use security::{SecuritySettings, SecuritySettingsLayer};
