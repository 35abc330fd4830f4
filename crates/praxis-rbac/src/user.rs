// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User entity and identity-field validation.
//!
//! This module provides:
//! - [`User`] - practice staff member with profile, security state and role membership
//! - [`validate_username`] / [`validate_email`] - checks applied on create and patch

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{MfaMethod, RoleId, UserId, UserStatus, UserType};

/// A console user.
///
/// Role membership is held as a list of [`RoleId`]s, never as embedded role
/// objects.
///
/// # PII Handling
///
/// Names, email, phone and credential numbers are PII and should be redacted
/// in logs; log the [`UserId`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	pub id: UserId,

	pub username: String,
	/// May be empty when the account was created without an address.
	pub email: String,
	pub first_name: String,
	pub last_name: String,
	pub phone: Option<String>,
	pub title: Option<String>,
	pub department: Option<String>,
	pub user_type: UserType,

	/// National Provider Identifier for clinicians.
	pub npi: Option<String>,
	pub license_number: Option<String>,
	pub hire_date: Option<NaiveDate>,

	pub status: UserStatus,
	pub login_attempts: u32,
	/// Set while the account is locked.
	pub locked_until: Option<DateTime<Utc>>,
	pub last_login: Option<DateTime<Utc>>,
	pub mfa_enabled: bool,
	pub mfa_method: Option<MfaMethod>,

	pub role_ids: Vec<RoleId>,

	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl User {
	/// Returns "First Last", falling back to the username when both are empty.
	pub fn display_name(&self) -> String {
		let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
		let full = full.trim();
		if full.is_empty() {
			self.username.clone()
		} else {
			full.to_string()
		}
	}

	/// Returns true if the user can currently use the console.
	pub fn is_active(&self) -> bool {
		self.status == UserStatus::Active
	}

	/// Returns true if the account is locked and the lock has not expired at `now`.
	pub fn is_locked_at(&self, now: DateTime<Utc>) -> bool {
		self.status == UserStatus::Locked && self.locked_until.map(|t| t > now).unwrap_or(true)
	}

	/// Returns true if the user holds the given role.
	pub fn has_role(&self, role_id: RoleId) -> bool {
		self.role_ids.contains(&role_id)
	}
}

/// Validates a username.
/// Rules:
/// - Not blank
/// - At most 64 characters
/// - No whitespace
pub fn validate_username(username: &str) -> Result<(), &'static str> {
	if username.trim().is_empty() {
		return Err("Username is required");
	}
	if username.chars().count() > 64 {
		return Err("Username must be at most 64 characters");
	}
	if username.chars().any(char::is_whitespace) {
		return Err("Username cannot contain whitespace");
	}
	Ok(())
}

/// Validates an email address.
///
/// An empty address is accepted: accounts may be created before an address is
/// known. A non-empty address must have a local part and a domain.
pub fn validate_email(email: &str) -> Result<(), &'static str> {
	if email.is_empty() {
		return Ok(());
	}
	match email.split_once('@') {
		Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
		_ => Err("Email must look like name@domain"),
	}
}
