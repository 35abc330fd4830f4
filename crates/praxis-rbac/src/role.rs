// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role entity.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{PermissionId, RoleId, RoleType};

/// A named bundle of permissions assigned to users.
///
/// System roles are seeded and immutable with respect to their permission set
/// and their existence. Custom roles are created by administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
	pub id: RoleId,
	pub name: String,
	pub description: String,
	pub role_type: RoleType,
	/// Granted permissions, by catalog identity.
	pub permissions: BTreeSet<PermissionId>,
	/// Number of live users holding this role.
	pub user_count: usize,
	/// Assigned to newly created users when no role is given.
	pub is_default: bool,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl Role {
	/// Returns true if this is a seeded system role.
	pub fn is_system(&self) -> bool {
		self.role_type == RoleType::System
	}

	/// Returns true if the role may be deleted in its current state.
	pub fn is_deletable(&self) -> bool {
		!self.is_system() && self.user_count == 0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn make_role(role_type: RoleType, user_count: usize) -> Role {
		Role {
			id: RoleId::generate(),
			name: "Scheduler".to_string(),
			description: String::new(),
			role_type,
			permissions: BTreeSet::new(),
			user_count,
			is_default: false,
			created_at: Utc::now(),
			updated_at: Utc::now(),
		}
	}

	#[test]
	fn system_role_is_never_deletable() {
		assert!(!make_role(RoleType::System, 0).is_deletable());
	}

	#[test]
	fn custom_role_with_users_is_not_deletable() {
		assert!(!make_role(RoleType::Custom, 3).is_deletable());
		assert!(make_role(RoleType::Custom, 0).is_deletable());
	}
}
