// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions for the access-control model.
//!
//! This module defines the foundational types used throughout the console:
//!
//! - **ID newtypes**: Type-safe wrappers around UUIDs for users, roles and
//!   permissions ([`UserId`], [`RoleId`], [`PermissionId`]) preventing
//!   accidental mixing
//! - **User enums**: account state ([`UserStatus`]), job function
//!   ([`UserType`]) and second factor ([`MfaMethod`])
//! - **Role kind**: seeded versus user-created roles ([`RoleType`])
//! - **Permission vocabulary**: the closed [`PermissionCategory`] and
//!   [`PermissionAction`] enumerations
//!
//! All ID types implement transparent serde serialization (as UUID strings) and
//! provide conversion to/from [`uuid::Uuid`].

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			/// Create a new ID from a UUID.
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			/// Generate a new random ID.
			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}

			/// Build a stable ID from a fixed number, used for seeded records.
			pub const fn from_u128(value: u128) -> Self {
				Self(Uuid::from_u128(value))
			}

			/// Get the inner UUID value.
			pub fn into_inner(self) -> Uuid {
				self.0
			}

			/// Get a reference to the inner UUID.
			pub fn as_uuid(&self) -> &Uuid {
				&self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}

		impl From<$name> for Uuid {
			fn from(id: $name) -> Self {
				id.0
			}
		}
	};
}

define_id_type!(UserId, "Unique identifier for a user.");
define_id_type!(RoleId, "Unique identifier for a role.");
define_id_type!(PermissionId, "Unique identifier for a catalog permission.");

// =============================================================================
// User Status
// =============================================================================

/// Account state of a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
	/// Can sign in and use the console.
	Active,
	/// Disabled by an administrator.
	Inactive,
	/// Created but not yet activated.
	#[default]
	Pending,
	/// Temporarily locked after repeated failed logins.
	Locked,
	/// Suspended pending review.
	Suspended,
}

impl UserStatus {
	/// Returns all statuses in display order.
	pub fn all() -> &'static [UserStatus] {
		&[
			UserStatus::Active,
			UserStatus::Inactive,
			UserStatus::Pending,
			UserStatus::Locked,
			UserStatus::Suspended,
		]
	}
}

impl fmt::Display for UserStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			UserStatus::Active => write!(f, "active"),
			UserStatus::Inactive => write!(f, "inactive"),
			UserStatus::Pending => write!(f, "pending"),
			UserStatus::Locked => write!(f, "locked"),
			UserStatus::Suspended => write!(f, "suspended"),
		}
	}
}

// =============================================================================
// User Type
// =============================================================================

/// Job function of a practice user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
	Physician,
	Nurse,
	MedicalAssistant,
	#[default]
	FrontDesk,
	Billing,
	Administrator,
}

impl UserType {
	/// Returns all user types in display order.
	pub fn all() -> &'static [UserType] {
		&[
			UserType::Physician,
			UserType::Nurse,
			UserType::MedicalAssistant,
			UserType::FrontDesk,
			UserType::Billing,
			UserType::Administrator,
		]
	}
}

impl fmt::Display for UserType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			UserType::Physician => write!(f, "physician"),
			UserType::Nurse => write!(f, "nurse"),
			UserType::MedicalAssistant => write!(f, "medical_assistant"),
			UserType::FrontDesk => write!(f, "front_desk"),
			UserType::Billing => write!(f, "billing"),
			UserType::Administrator => write!(f, "administrator"),
		}
	}
}

// =============================================================================
// MFA Method
// =============================================================================

/// Second factor configured for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MfaMethod {
	Totp,
	Sms,
	Email,
}

impl fmt::Display for MfaMethod {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			MfaMethod::Totp => write!(f, "totp"),
			MfaMethod::Sms => write!(f, "sms"),
			MfaMethod::Email => write!(f, "email"),
		}
	}
}

// =============================================================================
// Role Type
// =============================================================================

/// Whether a role is seeded by the system or created by an administrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleType {
	/// Seeded role; permissions and existence are immutable.
	System,
	/// Administrator-created role.
	#[default]
	Custom,
}

impl fmt::Display for RoleType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RoleType::System => write!(f, "system"),
			RoleType::Custom => write!(f, "custom"),
		}
	}
}

// =============================================================================
// Permission Vocabulary
// =============================================================================

/// Functional area a permission belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionCategory {
	Patients,
	Appointments,
	Encounters,
	Billing,
	Reports,
	Messaging,
	Admin,
	System,
}

impl PermissionCategory {
	/// Returns all categories in matrix display order.
	pub fn all() -> &'static [PermissionCategory] {
		&[
			PermissionCategory::Patients,
			PermissionCategory::Appointments,
			PermissionCategory::Encounters,
			PermissionCategory::Billing,
			PermissionCategory::Reports,
			PermissionCategory::Messaging,
			PermissionCategory::Admin,
			PermissionCategory::System,
		]
	}
}

impl fmt::Display for PermissionCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PermissionCategory::Patients => write!(f, "patients"),
			PermissionCategory::Appointments => write!(f, "appointments"),
			PermissionCategory::Encounters => write!(f, "encounters"),
			PermissionCategory::Billing => write!(f, "billing"),
			PermissionCategory::Reports => write!(f, "reports"),
			PermissionCategory::Messaging => write!(f, "messaging"),
			PermissionCategory::Admin => write!(f, "admin"),
			PermissionCategory::System => write!(f, "system"),
		}
	}
}

/// Operation a permission authorizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionAction {
	Create,
	Read,
	Update,
	Delete,
	Export,
	Print,
	Sign,
	Approve,
}

impl PermissionAction {
	/// Returns all actions.
	pub fn all() -> &'static [PermissionAction] {
		&[
			PermissionAction::Create,
			PermissionAction::Read,
			PermissionAction::Update,
			PermissionAction::Delete,
			PermissionAction::Export,
			PermissionAction::Print,
			PermissionAction::Sign,
			PermissionAction::Approve,
		]
	}
}

impl fmt::Display for PermissionAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PermissionAction::Create => write!(f, "create"),
			PermissionAction::Read => write!(f, "read"),
			PermissionAction::Update => write!(f, "update"),
			PermissionAction::Delete => write!(f, "delete"),
			PermissionAction::Export => write!(f, "export"),
			PermissionAction::Print => write!(f, "print"),
			PermissionAction::Sign => write!(f, "sign"),
			PermissionAction::Approve => write!(f, "approve"),
		}
	}
}
