// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Create requests and partial updates for users and roles.
//!
//! Every patch field is optional and an absent field leaves the stored value
//! alone. Fields that are nullable on the entity use `Option<Option<T>>`:
//! `Some(None)` clears the value, `Some(Some(v))` sets it.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use praxis_rbac::{MfaMethod, PermissionId, Role, RoleId, User, UserStatus, UserType};
use serde::Deserialize;

// =============================================================================
// Users
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CreateUser {
	pub username: String,
	/// May be empty when no address is known yet.
	pub email: String,
	pub first_name: String,
	pub last_name: String,
	pub phone: Option<String>,
	pub title: Option<String>,
	pub department: Option<String>,
	pub user_type: UserType,
	pub npi: Option<String>,
	pub license_number: Option<String>,
	pub hire_date: Option<NaiveDate>,
	pub mfa_enabled: bool,
	pub mfa_method: Option<MfaMethod>,
	pub role_ids: Vec<RoleId>,
}

impl CreateUser {
	pub fn new(username: impl Into<String>) -> Self {
		Self {
			username: username.into(),
			..Default::default()
		}
	}

	pub fn email(mut self, email: impl Into<String>) -> Self {
		self.email = email.into();
		self
	}

	pub fn name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
		self.first_name = first_name.into();
		self.last_name = last_name.into();
		self
	}

	pub fn user_type(mut self, user_type: UserType) -> Self {
		self.user_type = user_type;
		self
	}

	pub fn role(mut self, role_id: RoleId) -> Self {
		self.role_ids.push(role_id);
		self
	}
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
	pub username: Option<String>,
	pub email: Option<String>,
	pub first_name: Option<String>,
	pub last_name: Option<String>,
	pub phone: Option<Option<String>>,
	pub title: Option<Option<String>>,
	pub department: Option<Option<String>>,
	pub user_type: Option<UserType>,
	pub npi: Option<Option<String>>,
	pub license_number: Option<Option<String>>,
	pub hire_date: Option<Option<NaiveDate>>,
	pub status: Option<UserStatus>,
	pub login_attempts: Option<u32>,
	pub locked_until: Option<Option<DateTime<Utc>>>,
	pub last_login: Option<Option<DateTime<Utc>>>,
	pub mfa_enabled: Option<bool>,
	pub mfa_method: Option<Option<MfaMethod>>,
	pub role_ids: Option<Vec<RoleId>>,
}

impl UserPatch {
	pub fn status(status: UserStatus) -> Self {
		Self {
			status: Some(status),
			..Default::default()
		}
	}

	pub fn is_empty(&self) -> bool {
		*self == Self::default()
	}

	/// Copies every present field onto `user`. Does not touch `updated_at`.
	pub fn apply_to(self, user: &mut User) {
		if let Some(v) = self.username {
			user.username = v;
		}
		if let Some(v) = self.email {
			user.email = v;
		}
		if let Some(v) = self.first_name {
			user.first_name = v;
		}
		if let Some(v) = self.last_name {
			user.last_name = v;
		}
		if let Some(v) = self.phone {
			user.phone = v;
		}
		if let Some(v) = self.title {
			user.title = v;
		}
		if let Some(v) = self.department {
			user.department = v;
		}
		if let Some(v) = self.user_type {
			user.user_type = v;
		}
		if let Some(v) = self.npi {
			user.npi = v;
		}
		if let Some(v) = self.license_number {
			user.license_number = v;
		}
		if let Some(v) = self.hire_date {
			user.hire_date = v;
		}
		if let Some(v) = self.status {
			user.status = v;
		}
		if let Some(v) = self.login_attempts {
			user.login_attempts = v;
		}
		if let Some(v) = self.locked_until {
			user.locked_until = v;
		}
		if let Some(v) = self.last_login {
			user.last_login = v;
		}
		if let Some(v) = self.mfa_enabled {
			user.mfa_enabled = v;
		}
		if let Some(v) = self.mfa_method {
			user.mfa_method = v;
		}
		if let Some(v) = self.role_ids {
			user.role_ids = v;
		}
	}
}

// =============================================================================
// Roles
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CreateRole {
	pub name: String,
	pub description: String,
	pub permissions: BTreeSet<PermissionId>,
	pub is_default: bool,
}

impl CreateRole {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Default::default()
		}
	}

	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = description.into();
		self
	}

	pub fn permission(mut self, permission_id: PermissionId) -> Self {
		self.permissions.insert(permission_id);
		self
	}
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RolePatch {
	pub name: Option<String>,
	pub description: Option<String>,
	pub is_default: Option<bool>,
	/// Replaces the whole permission set.
	pub permissions: Option<BTreeSet<PermissionId>>,
}

impl RolePatch {
	/// Returns true if applying the patch would change the role's permissions.
	pub fn changes_permissions(&self, role: &Role) -> bool {
		self.permissions
			.as_ref()
			.map(|p| *p != role.permissions)
			.unwrap_or(false)
	}

	/// Copies every present field onto `role`. Does not touch `updated_at`.
	pub fn apply_to(self, role: &mut Role) {
		if let Some(v) = self.name {
			role.name = v;
		}
		if let Some(v) = self.description {
			role.description = v;
		}
		if let Some(v) = self.is_default {
			role.is_default = v;
		}
		if let Some(v) = self.permissions {
			role.permissions = v;
		}
	}
}
