// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Permission matrix engine.
//!
//! Answers "does role R hold permission P", mutates role/permission
//! assignment, and projects the category-by-role grid the console renders.
//!
//! Membership is always decided by [`PermissionId`], never by comparing
//! permission contents. All functions except [`toggle_permission`] are pure
//! reads.

use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use crate::permission::Permission;
use crate::role::Role;
use crate::types::{PermissionAction, PermissionCategory, PermissionId, RoleId, RoleType};

/// Rejections raised by matrix mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
	#[error("system role '{role}' is immutable")]
	SystemRoleImmutable { role: String },
}

/// Outcome of a successful toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionToggle {
	Granted,
	Revoked,
}

/// Returns true if `role` holds the permission.
pub fn has_permission(role: &Role, permission_id: &PermissionId) -> bool {
	role.permissions.contains(permission_id)
}

/// Returns the catalog permissions in `category`, in catalog order.
pub fn permissions_by_category(
	catalog: &[Permission],
	category: PermissionCategory,
) -> Vec<&Permission> {
	catalog.iter().filter(|p| p.category == category).collect()
}

/// Adds the permission to the role if absent, removes it if present.
///
/// System roles are rejected and left untouched. The caller is responsible
/// for checking that `permission_id` exists in the catalog.
#[instrument(
	level = "debug",
	skip(role),
	fields(role_id = %role.id, role_type = %role.role_type)
)]
pub fn toggle_permission(
	role: &mut Role,
	permission_id: PermissionId,
) -> Result<PermissionToggle, MatrixError> {
	if role.role_type == RoleType::System {
		return Err(MatrixError::SystemRoleImmutable {
			role: role.name.clone(),
		});
	}

	if role.permissions.remove(&permission_id) {
		Ok(PermissionToggle::Revoked)
	} else {
		role.permissions.insert(permission_id);
		Ok(PermissionToggle::Granted)
	}
}

/// Returns true if any permission the role holds in `category` carries `action`.
pub fn role_allows(
	role: &Role,
	catalog: &[Permission],
	category: PermissionCategory,
	action: PermissionAction,
) -> bool {
	catalog
		.iter()
		.filter(|p| p.category == category && p.allows(action))
		.any(|p| has_permission(role, &p.id))
}

/// Column header of the matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixRole {
	pub id: RoleId,
	pub name: String,
	pub role_type: RoleType,
}

/// One permission row; `granted[i]` belongs to `PermissionMatrix::roles[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixRow {
	pub permission_id: PermissionId,
	pub code: String,
	pub name: String,
	pub granted: Vec<bool>,
}

/// Rows grouped under a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
	pub category: PermissionCategory,
	pub rows: Vec<MatrixRow>,
}

/// Read-side projection of role/permission membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionMatrix {
	pub roles: Vec<MatrixRole>,
	pub categories: Vec<CategoryGroup>,
}

impl PermissionMatrix {
	/// Looks up a single cell.
	pub fn is_granted(&self, role_id: RoleId, permission_id: PermissionId) -> Option<bool> {
		let column = self.roles.iter().position(|r| r.id == role_id)?;
		self.categories
			.iter()
			.flat_map(|g| g.rows.iter())
			.find(|row| row.permission_id == permission_id)
			.map(|row| row.granted[column])
	}
}

/// Builds the category-by-role grid. Categories without permissions are omitted.
pub fn permission_matrix(catalog: &[Permission], roles: &[Role]) -> PermissionMatrix {
	let columns = roles
		.iter()
		.map(|r| MatrixRole {
			id: r.id,
			name: r.name.clone(),
			role_type: r.role_type,
		})
		.collect();

	let categories = PermissionCategory::all()
		.iter()
		.filter_map(|&category| {
			let rows: Vec<MatrixRow> = permissions_by_category(catalog, category)
				.into_iter()
				.map(|p| MatrixRow {
					permission_id: p.id,
					code: p.code.clone(),
					name: p.name.clone(),
					granted: roles.iter().map(|r| has_permission(r, &p.id)).collect(),
				})
				.collect();
			if rows.is_empty() {
				None
			} else {
				Some(CategoryGroup { category, rows })
			}
		})
		.collect();

	PermissionMatrix {
		roles: columns,
		categories,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog;
	use chrono::Utc;
	use proptest::prelude::*;
	use std::collections::BTreeSet;

	fn custom_role(permissions: BTreeSet<PermissionId>) -> Role {
		Role {
			id: RoleId::generate(),
			name: "Scheduler".to_string(),
			description: "Front office scheduling".to_string(),
			role_type: RoleType::Custom,
			permissions,
			user_count: 0,
			is_default: false,
			created_at: Utc::now(),
			updated_at: Utc::now(),
		}
	}

	mod membership {
		use super::*;

		#[test]
		fn has_permission_uses_identity() {
			let catalog = catalog::permission_catalog();
			let granted = catalog[0].id;
			let role = custom_role([granted].into_iter().collect());

			assert!(has_permission(&role, &granted));
			assert!(!has_permission(&role, &catalog[1].id));
		}

		#[test]
		fn permissions_by_category_keeps_catalog_order() {
			let catalog = catalog::permission_catalog();
			let billing = permissions_by_category(&catalog, PermissionCategory::Billing);

			assert!(!billing.is_empty());
			assert!(billing
				.iter()
				.all(|p| p.category == PermissionCategory::Billing));
			let expected: Vec<_> = catalog
				.iter()
				.filter(|p| p.category == PermissionCategory::Billing)
				.map(|p| p.id)
				.collect();
			let actual: Vec<_> = billing.iter().map(|p| p.id).collect();
			assert_eq!(actual, expected);
		}

		#[test]
		fn role_allows_checks_category_and_action() {
			let catalog = catalog::permission_catalog();
			let read = catalog
				.iter()
				.find(|p| p.code == "patients.read")
				.unwrap();
			let role = custom_role([read.id].into_iter().collect());

			assert!(role_allows(
				&role,
				&catalog,
				PermissionCategory::Patients,
				PermissionAction::Read
			));
			assert!(!role_allows(
				&role,
				&catalog,
				PermissionCategory::Patients,
				PermissionAction::Delete
			));
		}
	}

	mod toggle {
		use super::*;

		#[test]
		fn grants_then_revokes() {
			let permission = PermissionId::generate();
			let mut role = custom_role(BTreeSet::new());

			assert_eq!(
				toggle_permission(&mut role, permission),
				Ok(PermissionToggle::Granted)
			);
			assert!(has_permission(&role, &permission));
			assert_eq!(
				toggle_permission(&mut role, permission),
				Ok(PermissionToggle::Revoked)
			);
			assert!(role.permissions.is_empty());
		}

		#[test]
		fn system_role_is_rejected() {
			let mut role = catalog::system_roles()
				.into_iter()
				.next()
				.unwrap();
			let before = role.permissions.clone();

			let err = toggle_permission(&mut role, PermissionId::generate()).unwrap_err();
			assert!(matches!(err, MatrixError::SystemRoleImmutable { .. }));
			assert_eq!(role.permissions, before);
		}
	}

	mod projection {
		use super::*;

		#[test]
		fn matrix_reflects_membership() {
			let catalog = catalog::permission_catalog();
			let roles = catalog::system_roles();
			let matrix = permission_matrix(&catalog, &roles);

			assert_eq!(matrix.roles.len(), roles.len());
			for role in &roles {
				for permission in &catalog {
					assert_eq!(
						matrix.is_granted(role.id, permission.id),
						Some(role.permissions.contains(&permission.id))
					);
				}
			}
		}

		#[test]
		fn empty_categories_are_omitted() {
			let catalog: Vec<Permission> = catalog::permission_catalog()
				.into_iter()
				.filter(|p| p.category == PermissionCategory::Messaging)
				.collect();
			let matrix = permission_matrix(&catalog, &[]);

			assert_eq!(matrix.categories.len(), 1);
			assert_eq!(matrix.categories[0].category, PermissionCategory::Messaging);
			assert!(matrix.categories[0].rows.iter().all(|r| r.granted.is_empty()));
		}

		#[test]
		fn unknown_cell_is_none() {
			let matrix = permission_matrix(&catalog::permission_catalog(), &[]);
			assert_eq!(
				matrix.is_granted(RoleId::generate(), PermissionId::generate()),
				None
			);
		}
	}

	mod proptest_tests {
		use super::*;

		fn arb_permission_set() -> impl Strategy<Value = BTreeSet<PermissionId>> {
			proptest::collection::btree_set(any::<u128>().prop_map(PermissionId::from_u128), 0..16)
		}

		proptest! {
			#[test]
			fn toggle_twice_is_identity(
				permissions in arb_permission_set(),
				target in any::<u128>(),
			) {
				let mut role = custom_role(permissions.clone());
				let target = PermissionId::from_u128(target);

				prop_assert!(toggle_permission(&mut role, target).is_ok());
				prop_assert!(toggle_permission(&mut role, target).is_ok());
				prop_assert_eq!(role.permissions, permissions);
			}

			#[test]
			fn system_role_never_changes(
				permissions in arb_permission_set(),
				target in any::<u128>(),
			) {
				let mut role = custom_role(permissions.clone());
				role.role_type = RoleType::System;

				let result = toggle_permission(&mut role, PermissionId::from_u128(target));
				prop_assert!(result.is_err());
				prop_assert_eq!(role.permissions, permissions);
			}
		}
	}
}
