// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core event types for the audit trail.
//!
//! This module provides the foundational types for the audit system:
//!
//! - [`AuditAction`]: Enumeration of auditable actions
//! - [`AuditSeverity`]: Four-tier criticality, ordered low to critical
//! - [`AuditModule`]: Console area the event happened in
//! - [`AuditLogEntry`]: Immutable audit record with an actor snapshot
//! - [`AuditLogBuilder`]: Fluent API for constructing entries

use chrono::{DateTime, Utc};
use praxis_rbac::{UserId, UserType};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{AuditError, AuditResult};

/// Actions that can be recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
	// Session events
	Login,
	Logout,
	LoginFailed,

	// Record events
	Create,
	Read,
	Update,
	Delete,
	Export,
	Print,

	// Clinical and financial sign-off
	Sign,
	Approve,

	// Access control events
	PermissionChange,
	Security,
}

impl AuditAction {
	/// Returns all actions.
	pub fn all() -> &'static [AuditAction] {
		&[
			AuditAction::Login,
			AuditAction::Logout,
			AuditAction::LoginFailed,
			AuditAction::Create,
			AuditAction::Read,
			AuditAction::Update,
			AuditAction::Delete,
			AuditAction::Export,
			AuditAction::Print,
			AuditAction::Sign,
			AuditAction::Approve,
			AuditAction::PermissionChange,
			AuditAction::Security,
		]
	}

	/// Severity used when the builder is not given one explicitly.
	pub fn default_severity(&self) -> AuditSeverity {
		match self {
			AuditAction::Login | AuditAction::Logout | AuditAction::Read | AuditAction::Print => {
				AuditSeverity::Low
			}
			AuditAction::LoginFailed
			| AuditAction::Create
			| AuditAction::Update
			| AuditAction::Sign
			| AuditAction::Approve => AuditSeverity::Medium,
			AuditAction::Delete | AuditAction::Export | AuditAction::PermissionChange => {
				AuditSeverity::High
			}
			AuditAction::Security => AuditSeverity::Critical,
		}
	}
}

impl fmt::Display for AuditAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			AuditAction::Login => "login",
			AuditAction::Logout => "logout",
			AuditAction::LoginFailed => "login_failed",
			AuditAction::Create => "create",
			AuditAction::Read => "read",
			AuditAction::Update => "update",
			AuditAction::Delete => "delete",
			AuditAction::Export => "export",
			AuditAction::Print => "print",
			AuditAction::Sign => "sign",
			AuditAction::Approve => "approve",
			AuditAction::PermissionChange => "permission_change",
			AuditAction::Security => "security",
		};
		write!(f, "{s}")
	}
}

/// Criticality tier of an audit entry.
///
/// Ordering follows declaration order, so `Low < Medium < High < Critical`.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum AuditSeverity {
	#[default]
	Low,
	Medium,
	High,
	Critical,
}

impl AuditSeverity {
	/// Returns all severity levels from least to most severe.
	pub fn all() -> &'static [AuditSeverity] {
		&[
			AuditSeverity::Low,
			AuditSeverity::Medium,
			AuditSeverity::High,
			AuditSeverity::Critical,
		]
	}
}

impl fmt::Display for AuditSeverity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			AuditSeverity::Low => "low",
			AuditSeverity::Medium => "medium",
			AuditSeverity::High => "high",
			AuditSeverity::Critical => "critical",
		};
		write!(f, "{s}")
	}
}

/// Console area an audit entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditModule {
	Auth,
	Patients,
	Appointments,
	Encounters,
	Billing,
	Reports,
	Messaging,
	Admin,
	Settings,
	System,
}

impl AuditModule {
	pub fn all() -> &'static [AuditModule] {
		&[
			AuditModule::Auth,
			AuditModule::Patients,
			AuditModule::Appointments,
			AuditModule::Encounters,
			AuditModule::Billing,
			AuditModule::Reports,
			AuditModule::Messaging,
			AuditModule::Admin,
			AuditModule::Settings,
			AuditModule::System,
		]
	}
}

impl fmt::Display for AuditModule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			AuditModule::Auth => "auth",
			AuditModule::Patients => "patients",
			AuditModule::Appointments => "appointments",
			AuditModule::Encounters => "encounters",
			AuditModule::Billing => "billing",
			AuditModule::Reports => "reports",
			AuditModule::Messaging => "messaging",
			AuditModule::Admin => "admin",
			AuditModule::Settings => "settings",
			AuditModule::System => "system",
		};
		write!(f, "{s}")
	}
}

/// A single field-level change recorded on an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
	pub field: String,
	pub old_value: serde_json::Value,
	pub new_value: serde_json::Value,
}

/// An entry in the audit log recording a security-relevant event.
///
/// The actor fields are a snapshot taken when the event was written; they are
/// not updated when the user record changes later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
	/// Unique identifier for this audit entry.
	pub id: Uuid,
	/// When the event occurred.
	pub timestamp: DateTime<Utc>,

	pub user_id: UserId,
	pub user_name: String,
	pub user_type: UserType,

	pub action: AuditAction,
	pub severity: AuditSeverity,
	pub module: AuditModule,

	/// Kind of record affected (e.g., "patient", "role", "claim").
	pub resource: String,
	pub resource_id: Option<String>,
	pub resource_name: Option<String>,

	/// Human-readable description of the event.
	pub description: String,
	pub changes: Option<Vec<FieldChange>>,

	/// IP address of the request origin.
	pub ip_address: Option<String>,
	/// User agent string from the request.
	pub user_agent: Option<String>,
	pub session_id: Option<String>,

	pub success: bool,
	pub error_message: Option<String>,
}

impl AuditLogEntry {
	/// Create a new audit log builder for the given action.
	pub fn builder(action: AuditAction, module: AuditModule) -> AuditLogBuilder {
		AuditLogBuilder::new(action, module)
	}

	/// Returns true if this entry counts towards the security event total.
	pub fn is_security_event(&self) -> bool {
		self.action == AuditAction::Security || self.severity == AuditSeverity::Critical
	}

	/// Checks the fields required before an entry may be appended.
	pub fn validate(&self) -> AuditResult<()> {
		if self.user_name.trim().is_empty() {
			return Err(AuditError::MissingField { field: "user_name" });
		}
		if self.resource.trim().is_empty() {
			return Err(AuditError::MissingField { field: "resource" });
		}
		if self.description.trim().is_empty() {
			return Err(AuditError::MissingField {
				field: "description",
			});
		}
		Ok(())
	}
}

/// Builder for constructing audit log entries with a fluent API.
#[derive(Debug, Clone)]
pub struct AuditLogBuilder {
	action: AuditAction,
	module: AuditModule,
	severity: Option<AuditSeverity>,
	timestamp: Option<DateTime<Utc>>,
	user_id: Option<UserId>,
	user_name: String,
	user_type: UserType,
	resource: String,
	resource_id: Option<String>,
	resource_name: Option<String>,
	description: Option<String>,
	changes: Vec<FieldChange>,
	ip_address: Option<String>,
	user_agent: Option<String>,
	session_id: Option<String>,
	error_message: Option<String>,
	success: bool,
}

impl AuditLogBuilder {
	/// Create a new builder for the given action.
	pub fn new(action: AuditAction, module: AuditModule) -> Self {
		Self {
			action,
			module,
			severity: None,
			timestamp: None,
			user_id: None,
			user_name: String::new(),
			user_type: UserType::default(),
			resource: String::new(),
			resource_id: None,
			resource_name: None,
			description: None,
			changes: Vec::new(),
			ip_address: None,
			user_agent: None,
			session_id: None,
			error_message: None,
			success: true,
		}
	}

	/// Set the severity level. Defaults to the action's default severity.
	pub fn severity(mut self, severity: AuditSeverity) -> Self {
		self.severity = Some(severity);
		self
	}

	/// Set the event time. Defaults to now.
	pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
		self.timestamp = Some(timestamp);
		self
	}

	/// Snapshot the user who performed the action.
	pub fn actor(mut self, user_id: UserId, user_name: impl Into<String>, user_type: UserType) -> Self {
		self.user_id = Some(user_id);
		self.user_name = user_name.into();
		self.user_type = user_type;
		self
	}

	/// Set the kind of record affected.
	pub fn resource(mut self, resource: impl Into<String>) -> Self {
		self.resource = resource.into();
		self
	}

	/// Set the ID and display name of the affected record.
	pub fn target(mut self, resource_id: impl Into<String>, resource_name: impl Into<String>) -> Self {
		self.resource_id = Some(resource_id.into());
		self.resource_name = Some(resource_name.into());
		self
	}

	/// Set the human-readable description.
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Record a field-level change.
	pub fn change(
		mut self,
		field: impl Into<String>,
		old_value: serde_json::Value,
		new_value: serde_json::Value,
	) -> Self {
		self.changes.push(FieldChange {
			field: field.into(),
			old_value,
			new_value,
		});
		self
	}

	/// Set the IP address of the request origin.
	pub fn ip_address(mut self, ip: impl Into<String>) -> Self {
		self.ip_address = Some(ip.into());
		self
	}

	/// Set the user agent string from the request.
	pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
		self.user_agent = Some(ua.into());
		self
	}

	pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
		self.session_id = Some(session_id.into());
		self
	}

	/// Mark the event as failed with the given error message.
	pub fn failed(mut self, error_message: impl Into<String>) -> Self {
		self.success = false;
		self.error_message = Some(error_message.into());
		self
	}

	/// Build the audit log entry.
	pub fn build(self) -> AuditLogEntry {
		let description = self
			.description
			.unwrap_or_else(|| format!("{} {}", self.action, self.resource));
		AuditLogEntry {
			id: Uuid::new_v4(),
			timestamp: self.timestamp.unwrap_or_else(Utc::now),
			user_id: self.user_id.unwrap_or_else(UserId::generate),
			user_name: self.user_name,
			user_type: self.user_type,
			action: self.action,
			severity: self
				.severity
				.unwrap_or_else(|| self.action.default_severity()),
			module: self.module,
			resource: self.resource,
			resource_id: self.resource_id,
			resource_name: self.resource_name,
			description,
			changes: if self.changes.is_empty() {
				None
			} else {
				Some(self.changes)
			},
			ip_address: self.ip_address,
			user_agent: self.user_agent,
			session_id: self.session_id,
			success: self.success,
			error_message: self.error_message,
		}
	}
}
