// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Built-in permission catalog and seeded system roles.
//!
//! IDs are derived from fixed numbers so that the same catalog entry or
//! system role has the same identity in every console instance.

use std::collections::BTreeSet;

use chrono::Utc;

use crate::permission::Permission;
use crate::role::Role;
use crate::types::{PermissionAction, PermissionCategory, PermissionId, RoleId, RoleType};
use crate::types::PermissionAction::{Approve, Create, Delete, Export, Print, Read, Sign, Update};
use crate::types::PermissionCategory as Cat;

const PERMISSION_ID_BASE: u128 = 0x7072_6178_6973_0001_0000_0000_0000_0000;
const ROLE_ID_BASE: u128 = 0x7072_6178_6973_0002_0000_0000_0000_0000;

type CatalogRow = (
	&'static str,
	&'static str,
	&'static str,
	&'static str,
	PermissionCategory,
	&'static [PermissionAction],
);

#[rustfmt::skip]
const PERMISSIONS: &[CatalogRow] = &[
	("patients.read", "View Patients", "View demographics and charts", "patients", Cat::Patients, &[Read, Print]),
	("patients.write", "Edit Patients", "Register and edit patient records", "patients", Cat::Patients, &[Create, Update]),
	("patients.delete", "Delete Patients", "Remove patient records", "patients", Cat::Patients, &[Delete]),
	("patients.export", "Export Patients", "Export patient data", "patients", Cat::Patients, &[Export]),
	("appointments.read", "View Schedule", "View the appointment calendar", "scheduling", Cat::Appointments, &[Read, Print]),
	("appointments.manage", "Manage Appointments", "Book, move and cancel appointments", "scheduling", Cat::Appointments, &[Create, Update, Delete]),
	("encounters.read", "View Encounters", "Read clinical notes", "clinical", Cat::Encounters, &[Read, Print]),
	("encounters.document", "Document Encounters", "Write and amend clinical notes", "clinical", Cat::Encounters, &[Create, Update]),
	("encounters.sign", "Sign Encounters", "Sign and lock clinical notes", "clinical", Cat::Encounters, &[Sign]),
	("billing.read", "View Billing", "View claims and statements", "billing", Cat::Billing, &[Read]),
	("billing.manage", "Manage Billing", "Create and edit claims", "billing", Cat::Billing, &[Create, Update]),
	("billing.export", "Export Billing", "Export and print claim batches", "billing", Cat::Billing, &[Export, Print]),
	("billing.approve", "Approve Adjustments", "Approve write-offs and adjustments", "billing", Cat::Billing, &[Approve]),
	("reports.view", "View Reports", "Run practice reports", "reports", Cat::Reports, &[Read, Print]),
	("reports.export", "Export Reports", "Export report data", "reports", Cat::Reports, &[Export]),
	("messaging.read", "Read Messages", "Read the secure inbox", "messaging", Cat::Messaging, &[Read]),
	("messaging.send", "Send Messages", "Send secure messages", "messaging", Cat::Messaging, &[Create]),
	("admin.users", "Manage Users", "Create, edit and deactivate users", "admin", Cat::Admin, &[Create, Read, Update, Delete]),
	("admin.roles", "Manage Roles", "Edit roles and permissions", "admin", Cat::Admin, &[Create, Read, Update, Delete]),
	("admin.audit", "Review Audit Log", "View and export the audit trail", "admin", Cat::Admin, &[Read, Export]),
	("admin.settings", "Practice Settings", "Edit practice settings", "admin", Cat::Admin, &[Read, Update]),
	("system.config", "System Configuration", "Change system configuration", "system", Cat::System, &[Read, Update]),
	("system.integrations", "Integrations", "Configure external integrations", "system", Cat::System, &[Read, Update]),
	("system.backup", "Backups", "Export full data backups", "system", Cat::System, &[Export]),
];

/// Returns the fixed permission catalog in display order.
pub fn permission_catalog() -> Vec<Permission> {
	PERMISSIONS
		.iter()
		.enumerate()
		.map(
			|(index, &(code, name, description, module, category, actions))| Permission {
				id: PermissionId::from_u128(PERMISSION_ID_BASE + index as u128),
				code: code.to_string(),
				name: name.to_string(),
				description: description.to_string(),
				module: module.to_string(),
				category,
				actions: actions.iter().copied().collect(),
			},
		)
		.collect()
}

/// Returns the ID of a catalog permission by its code.
pub fn permission_id(code: &str) -> Option<PermissionId> {
	PERMISSIONS
		.iter()
		.position(|row| row.0 == code)
		.map(|index| PermissionId::from_u128(PERMISSION_ID_BASE + index as u128))
}

struct SystemRoleSeed {
	name: &'static str,
	description: &'static str,
	is_default: bool,
	grants: fn(&str) -> bool,
}

fn grants_all(_code: &str) -> bool {
	true
}

fn grants_practice_admin(code: &str) -> bool {
	!code.starts_with("system.")
}

fn grants_physician(code: &str) -> bool {
	matches!(
		code,
		"patients.read" | "patients.write" | "appointments.read" | "reports.view"
	) || code.starts_with("encounters.")
		|| code.starts_with("messaging.")
}

fn grants_nurse(code: &str) -> bool {
	matches!(
		code,
		"patients.read" | "patients.write" | "encounters.read" | "encounters.document"
	) || code.starts_with("appointments.")
		|| code.starts_with("messaging.")
}

fn grants_front_desk(code: &str) -> bool {
	matches!(code, "patients.read" | "billing.read")
		|| code.starts_with("appointments.")
		|| code.starts_with("messaging.")
}

fn grants_billing(code: &str) -> bool {
	code == "patients.read" || code.starts_with("billing.") || code.starts_with("reports.")
}

const SYSTEM_ROLES: &[SystemRoleSeed] = &[
	SystemRoleSeed {
		name: "Super Admin",
		description: "Unrestricted access to every module",
		is_default: false,
		grants: grants_all,
	},
	SystemRoleSeed {
		name: "Practice Admin",
		description: "Runs the practice; no system-level configuration",
		is_default: false,
		grants: grants_practice_admin,
	},
	SystemRoleSeed {
		name: "Physician",
		description: "Clinical documentation and signing",
		is_default: false,
		grants: grants_physician,
	},
	SystemRoleSeed {
		name: "Nurse",
		description: "Clinical support and rooming",
		is_default: false,
		grants: grants_nurse,
	},
	SystemRoleSeed {
		name: "Front Desk",
		description: "Scheduling and check-in",
		is_default: true,
		grants: grants_front_desk,
	},
	SystemRoleSeed {
		name: "Billing Specialist",
		description: "Claims, statements and financial reports",
		is_default: false,
		grants: grants_billing,
	},
];

/// Returns the seeded system roles with their permission sets.
///
/// `user_count` starts at zero; the entity store maintains it.
pub fn system_roles() -> Vec<Role> {
	let now = Utc::now();
	SYSTEM_ROLES
		.iter()
		.enumerate()
		.map(|(index, seed)| {
			let permissions: BTreeSet<PermissionId> = PERMISSIONS
				.iter()
				.enumerate()
				.filter(|(_, row)| (seed.grants)(row.0))
				.map(|(i, _)| PermissionId::from_u128(PERMISSION_ID_BASE + i as u128))
				.collect();
			Role {
				id: RoleId::from_u128(ROLE_ID_BASE + index as u128),
				name: seed.name.to_string(),
				description: seed.description.to_string(),
				role_type: RoleType::System,
				permissions,
				user_count: 0,
				is_default: seed.is_default,
				created_at: now,
				updated_at: now,
			}
		})
		.collect()
}

/// Returns the ID of a seeded system role by name.
pub fn system_role_id(name: &str) -> Option<RoleId> {
	SYSTEM_ROLES
		.iter()
		.position(|seed| seed.name == name)
		.map(|index| RoleId::from_u128(ROLE_ID_BASE + index as u128))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	#[test]
	fn codes_and_ids_are_unique() {
		let catalog = permission_catalog();
		let codes: HashSet<_> = catalog.iter().map(|p| p.code.as_str()).collect();
		let ids: HashSet<_> = catalog.iter().map(|p| p.id).collect();
		assert_eq!(codes.len(), catalog.len());
		assert_eq!(ids.len(), catalog.len());
	}

	#[test]
	fn every_category_has_permissions() {
		let catalog = permission_catalog();
		for category in PermissionCategory::all() {
			assert!(
				catalog.iter().any(|p| p.category == *category),
				"no permissions for {category}"
			);
		}
	}

	#[test]
	fn every_permission_has_actions() {
		assert!(permission_catalog().iter().all(|p| !p.actions.is_empty()));
	}

	#[test]
	fn catalog_is_deterministic() {
		assert_eq!(permission_catalog(), permission_catalog());
		assert_eq!(
			permission_id("billing.approve"),
			permission_catalog()
				.iter()
				.find(|p| p.code == "billing.approve")
				.map(|p| p.id)
		);
		assert_eq!(permission_id("nope"), None);
	}

	#[test]
	fn system_roles_are_system_typed() {
		let roles = system_roles();
		assert_eq!(roles.len(), 6);
		assert!(roles.iter().all(|r| r.role_type == RoleType::System));
		assert!(roles.iter().all(|r| r.user_count == 0));
		assert_eq!(roles.iter().filter(|r| r.is_default).count(), 1);
	}

	#[test]
	fn super_admin_holds_everything() {
		let catalog = permission_catalog();
		let roles = system_roles();
		let super_admin = roles.iter().find(|r| r.name == "Super Admin").unwrap();
		assert_eq!(super_admin.permissions.len(), catalog.len());
	}

	#[test]
	fn practice_admin_lacks_system_permissions() {
		let roles = system_roles();
		let admin = roles.iter().find(|r| r.name == "Practice Admin").unwrap();
		assert!(!admin
			.permissions
			.contains(&permission_id("system.config").unwrap()));
		assert!(admin
			.permissions
			.contains(&permission_id("admin.users").unwrap()));
	}

	#[test]
	fn system_role_id_lookup() {
		let roles = system_roles();
		assert_eq!(system_role_id("Nurse"), Some(roles[3].id));
		assert_eq!(system_role_id("Janitor"), None);
	}
}
