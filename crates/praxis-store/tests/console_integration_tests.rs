// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Integration tests for the admin console read/write contract.
//!
//! Tests cover:
//! - User lifecycle defaults and unlock semantics
//! - System role immutability and custom role toggle involution
//! - Role deletion guards
//! - Audit filtering, sorting and summaries over the store
//! - Derived views staying fresh across mutations
//! - Observer notifications

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{Duration, Utc};
use praxis_audit::{
	AuditAction, AuditLogBuilder, AuditLogEntry, AuditLogFilter, AuditModule, AuditSeverity,
	AuditSort, AuditSortField, SortDirection,
};
use praxis_rbac::catalog::{permission_catalog, permission_id, system_role_id};
use praxis_rbac::{PermissionId, RoleType, UserId, UserStatus, UserType};
use praxis_store::{AdminConsole, CreateRole, CreateUser, StoreChange, StoreError, UserPatch};
use proptest::prelude::*;

fn audit_entry(
	user: (UserId, &str),
	action: AuditAction,
	severity: AuditSeverity,
	success: bool,
	minutes_ago: i64,
) -> AuditLogEntry {
	let mut builder = AuditLogBuilder::new(action, AuditModule::Patients)
		.actor(user.0, user.1, UserType::Nurse)
		.resource("patient")
		.severity(severity)
		.timestamp(Utc::now() - Duration::minutes(minutes_ago));
	if !success {
		builder = builder.failed("access denied");
	}
	builder.build()
}

/// A console holding `len` audit entries with severities cycling through all four tiers.
fn console_with_mixed_log(len: usize) -> AdminConsole {
	let mut console = AdminConsole::default();
	let users = [
		(UserId::from_u128(1), "Ana Ortiz"),
		(UserId::from_u128(2), "Ben Okafor"),
		(UserId::from_u128(3), "Cara Lind"),
	];
	for i in 0..len {
		let entry = audit_entry(
			users[i % users.len()],
			AuditAction::all()[i % AuditAction::all().len()],
			AuditSeverity::all()[(i * 7) % 4],
			i % 5 != 0,
			i as i64,
		);
		console.append_audit_entry(entry).unwrap();
	}
	console
}

// ============================================================================
// Users
// ============================================================================

#[test]
fn create_user_with_only_username() {
	let mut console = AdminConsole::default();
	let user = console.create_user(CreateUser::new("x")).unwrap();

	assert_eq!(user.status, UserStatus::Pending);
	assert_eq!(user.login_attempts, 0);
	assert!(!user.mfa_enabled);
	assert_eq!(console.get_user(user.id), Some(&user));
}

#[test]
fn user_without_roles_gets_default_role() {
	let mut console = AdminConsole::default();
	let user = console.create_user(CreateUser::new("nobody")).unwrap();

	let defaults: Vec<_> = console
		.list_roles()
		.iter()
		.filter(|r| r.is_default)
		.map(|r| r.id)
		.collect();
	assert!(!defaults.is_empty());
	assert_eq!(user.role_ids, defaults);
	for id in defaults {
		assert_eq!(console.get_role(id).unwrap().user_count, 1);
	}
}

#[test]
fn unlock_locked_user_with_five_attempts() {
	let mut console = AdminConsole::default();
	let user = console.create_user(CreateUser::new("locked.out")).unwrap();
	let locked = console
		.update_user(
			user.id,
			UserPatch {
				status: Some(UserStatus::Locked),
				login_attempts: Some(5),
				locked_until: Some(Some(Utc::now() + Duration::hours(1))),
				..Default::default()
			},
		)
		.unwrap()
		.unwrap();
	assert_eq!(locked.status, UserStatus::Locked);

	let unlocked = console.unlock_user(user.id).unwrap();
	assert_eq!(unlocked.status, UserStatus::Active);
	assert_eq!(unlocked.login_attempts, 0);
	assert_eq!(unlocked.locked_until, None);
}

#[test]
fn not_found_mutations_return_none() {
	let mut console = AdminConsole::default();
	let ghost = UserId::generate();
	assert_eq!(console.update_user(ghost, UserPatch::default()), Ok(None));
	assert!(console.delete_user(ghost).is_none());
	assert!(console.update_user_status(ghost, UserStatus::Active).is_none());
	assert!(console.unlock_user(ghost).is_none());
}

// ============================================================================
// Roles and the permission matrix
// ============================================================================

#[test]
fn deleting_role_with_users_is_rejected() {
	let mut console = AdminConsole::default();
	let role = console.create_role(CreateRole::new("Care Coordinator")).unwrap();
	console
		.create_user(CreateUser::new("coord").role(role.id))
		.unwrap();
	assert_eq!(console.get_role(role.id).unwrap().user_count, 1);

	let before = console.list_roles().to_vec();
	let err = console.delete_role(role.id).unwrap_err();
	assert!(matches!(err, StoreError::InvariantViolation { .. }));
	assert_eq!(console.list_roles(), before.as_slice());
}

#[test]
fn matrix_reflects_toggles() {
	let mut console = AdminConsole::default();
	let role = console.create_role(CreateRole::new("Scheduler")).unwrap();
	let perm = permission_id("appointments.manage").unwrap();

	assert_eq!(console.permission_matrix().is_granted(role.id, perm), Some(false));
	console.toggle_permission(role.id, perm).unwrap();
	assert_eq!(console.permission_matrix().is_granted(role.id, perm), Some(true));
}

#[test]
fn role_counts_by_type() {
	let mut console = AdminConsole::default();
	let seeded = console.role_counts();
	assert_eq!(seeded.custom, 0);

	console.create_role(CreateRole::new("Scribe")).unwrap();
	let counts = console.role_counts();
	assert_eq!(counts.custom, 1);
	assert_eq!(counts.system, seeded.system);
	assert_eq!(counts.total, seeded.total + 1);
}

fn permission_index() -> impl Strategy<Value = usize> {
	0usize..24
}

proptest! {
	#[test]
	fn system_role_toggle_never_changes_permissions(
		role_index in 0usize..6,
		perm in prop_oneof![
			permission_index().prop_map(|i| permission_catalog()[i].id),
			any::<u128>().prop_map(PermissionId::from_u128),
		],
	) {
		let mut console = AdminConsole::default();
		let role = console
			.list_roles()
			.iter()
			.filter(|r| r.role_type == RoleType::System)
			.nth(role_index)
			.cloned()
			.unwrap();

		let result = console.toggle_permission(role.id, perm);
		prop_assert!(matches!(result, Err(StoreError::InvariantViolation { .. })), "expected InvariantViolation");
		prop_assert_eq!(&console.get_role(role.id).unwrap().permissions, &role.permissions);
	}

	#[test]
	fn custom_role_double_toggle_restores_permissions(
		initial in prop::collection::btree_set(permission_index(), 0..10),
		target in permission_index(),
	) {
		let mut console = AdminConsole::default();
		let ids: Vec<PermissionId> = console.list_permissions().iter().map(|p| p.id).collect();
		let mut request = CreateRole::new("Custom");
		for i in &initial {
			request = request.permission(ids[*i]);
		}
		let role = console.create_role(request).unwrap();

		console.toggle_permission(role.id, ids[target]).unwrap();
		console.toggle_permission(role.id, ids[target]).unwrap();
		prop_assert_eq!(&console.get_role(role.id).unwrap().permissions, &role.permissions);
	}
}

// ============================================================================
// Audit
// ============================================================================

#[test]
fn empty_filter_returns_store_order() {
	let console = console_with_mixed_log(30);
	let filtered = console.filter_audit_logs(&AuditLogFilter::default());
	let ids: Vec<_> = filtered.iter().map(|e| e.id).collect();
	let stored: Vec<_> = console.list_audit_logs().iter().map(|e| e.id).collect();
	assert_eq!(ids, stored);
}

#[test]
fn store_log_is_newest_first() {
	let console = console_with_mixed_log(20);
	let logs = console.list_audit_logs();
	assert!(logs.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
}

#[test]
fn critical_filter_on_fifty_entries() {
	let console = console_with_mixed_log(50);
	let filter = AuditLogFilter {
		severities: Some(vec![AuditSeverity::Critical]),
		..Default::default()
	};

	let result = console.filter_audit_logs(&filter);
	assert!(!result.is_empty());
	assert!(result.iter().all(|e| e.severity == AuditSeverity::Critical));

	let expected: Vec<_> = console
		.list_audit_logs()
		.iter()
		.filter(|e| e.severity == AuditSeverity::Critical)
		.map(|e| e.id)
		.collect();
	assert_eq!(result.iter().map(|e| e.id).collect::<Vec<_>>(), expected);
}

#[test]
fn summary_scenario() {
	let mut console = AdminConsole::default();
	let user = (UserId::from_u128(9), "Dee Park");
	for entry in [
		audit_entry(user, AuditAction::Login, AuditSeverity::Low, true, 3),
		audit_entry(user, AuditAction::Security, AuditSeverity::Critical, false, 2),
		audit_entry(user, AuditAction::Update, AuditSeverity::Medium, true, 1),
	] {
		console.append_audit_entry(entry).unwrap();
	}

	let summary = console.audit_summary();
	assert_eq!(summary.total_events, 3);
	assert_eq!(summary.security_events, 1);
	assert_eq!(summary.failed_events, 1);
	assert_eq!(summary.by_user.len(), 1);
	assert_eq!(summary.by_user[0].count, 3);
}

#[test]
fn summary_totals_and_by_user_order() {
	let console = console_with_mixed_log(41);
	let summary = console.audit_summary();
	assert_eq!(summary.total_events, console.list_audit_logs().len());

	for pair in summary.by_user.windows(2) {
		assert!(pair[0].count >= pair[1].count);
	}
	let recent: Vec<_> = summary.recent_activity.iter().map(|e| e.id).collect();
	let newest: Vec<_> = console.list_audit_logs().iter().take(10).map(|e| e.id).collect();
	assert_eq!(recent, newest);
}

#[test]
fn filtered_summary_matches_filtered_list() {
	let console = console_with_mixed_log(40);
	let filter = AuditLogFilter {
		success: Some(false),
		..Default::default()
	};
	let summary = console.filtered_audit_summary(&filter);
	assert_eq!(summary.total_events, console.filter_audit_logs(&filter).len());
	assert_eq!(summary.failed_events, summary.total_events);
}

#[test]
fn sorted_view_is_separate_from_filter() {
	let console = console_with_mixed_log(25);
	let sort = AuditSort::new(AuditSortField::Timestamp, SortDirection::Ascending);
	let sorted = console.sorted_audit_logs(&AuditLogFilter::default(), sort);
	assert!(sorted.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

	let stored = console.list_audit_logs();
	assert!(stored.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
}

// ============================================================================
// Derived views and observers
// ============================================================================

#[test]
fn derived_views_are_fresh_after_every_mutation() {
	let mut console = AdminConsole::default();
	assert_eq!(console.total_users(), 0);

	let a = console.create_user(CreateUser::new("a")).unwrap();
	let b = console.create_user(CreateUser::new("b").user_type(UserType::Physician)).unwrap();
	assert_eq!(console.total_users(), 2);
	assert_eq!(console.active_users(), 0);

	console.unlock_user(a.id).unwrap();
	assert_eq!(console.active_users(), 1);

	console.update_user_status(b.id, UserStatus::Suspended).unwrap();
	let by_status = console.users_by_status();
	let suspended = by_status
		.iter()
		.find(|g| g.key == UserStatus::Suspended)
		.unwrap();
	assert_eq!(suspended.count, 1);

	let by_type = console.users_by_type();
	let physicians = by_type.iter().find(|g| g.key == UserType::Physician).unwrap();
	assert_eq!(physicians.count, 1);

	console.delete_user(a.id).unwrap();
	assert_eq!(console.total_users(), 1);
	assert_eq!(console.active_users(), 0);
}

#[test]
fn observers_receive_committed_changes() {
	let mut console = AdminConsole::default();
	let changes = Rc::new(RefCell::new(Vec::new()));
	let sink = Rc::clone(&changes);
	console.subscribe(Box::new(move |change: &StoreChange| {
		sink.borrow_mut().push(change.clone());
	}));

	let role = console.create_role(CreateRole::new("Scribe")).unwrap();
	let perm = permission_id("encounters.read").unwrap();
	console.toggle_permission(role.id, perm).unwrap();
	let system = system_role_id("Super Admin").unwrap();
	let _ = console.toggle_permission(system, perm);

	let changes = changes.borrow();
	assert_eq!(changes.len(), 2);
	assert_eq!(changes[0], StoreChange::RoleCreated { role_id: role.id });
	assert!(matches!(
		changes[1],
		StoreChange::PermissionToggled { role_id, .. } if role_id == role.id
	));
}
