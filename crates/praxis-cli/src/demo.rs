// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Deterministic demo dataset for a fresh console.
//!
//! Seeds a small practice: staff across every user type, one custom role and
//! a morning of audit activity. Entry ids and timestamps are fixed so repeated
//! runs render identical audit output.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, TimeZone, Utc};
use praxis_audit::{AuditAction, AuditLogBuilder, AuditModule, AuditSeverity};
use praxis_rbac::catalog::{permission_id, system_role_id};
use praxis_rbac::{User, UserStatus, UserType};
use praxis_store::{AdminConsole, CreateRole, CreateUser};
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use AuditAction as A;
use AuditModule as M;

const CARE_COORDINATOR: &str = "Care Coordinator";

struct DemoUser {
	username: &'static str,
	first_name: &'static str,
	last_name: &'static str,
	user_type: UserType,
	role: &'static str,
	status: UserStatus,
}

const USERS: &[DemoUser] = &[
	DemoUser {
		username: "admin.ross",
		first_name: "Jordan",
		last_name: "Ross",
		user_type: UserType::Administrator,
		role: "Practice Admin",
		status: UserStatus::Active,
	},
	DemoUser {
		username: "dr.chen",
		first_name: "Wei",
		last_name: "Chen",
		user_type: UserType::Physician,
		role: "Physician",
		status: UserStatus::Active,
	},
	DemoUser {
		username: "dr.okafor",
		first_name: "Ngozi",
		last_name: "Okafor",
		user_type: UserType::Physician,
		role: "Physician",
		status: UserStatus::Active,
	},
	DemoUser {
		username: "nurse.alvarez",
		first_name: "Lucia",
		last_name: "Alvarez",
		user_type: UserType::Nurse,
		role: "Nurse",
		status: UserStatus::Active,
	},
	DemoUser {
		username: "nurse.berg",
		first_name: "Anya",
		last_name: "Berg",
		user_type: UserType::Nurse,
		role: "Nurse",
		status: UserStatus::Suspended,
	},
	DemoUser {
		username: "ma.patel",
		first_name: "Ravi",
		last_name: "Patel",
		user_type: UserType::MedicalAssistant,
		role: CARE_COORDINATOR,
		status: UserStatus::Active,
	},
	DemoUser {
		username: "frontdesk.kim",
		first_name: "Hana",
		last_name: "Kim",
		user_type: UserType::FrontDesk,
		role: "Front Desk",
		status: UserStatus::Active,
	},
	DemoUser {
		username: "temp.hughes",
		first_name: "Sam",
		last_name: "Hughes",
		user_type: UserType::FrontDesk,
		role: "Front Desk",
		status: UserStatus::Pending,
	},
	DemoUser {
		username: "billing.moreau",
		first_name: "Claire",
		last_name: "Moreau",
		user_type: UserType::Billing,
		role: "Billing Specialist",
		status: UserStatus::Locked,
	},
];

struct DemoEvent {
	minute: i64,
	actor: &'static str,
	action: AuditAction,
	module: AuditModule,
	resource: &'static str,
	severity: Option<AuditSeverity>,
	success: bool,
	description: &'static str,
}

const fn event(
	minute: i64,
	actor: &'static str,
	action: AuditAction,
	module: AuditModule,
	resource: &'static str,
	description: &'static str,
) -> DemoEvent {
	DemoEvent {
		minute,
		actor,
		action,
		module,
		resource,
		severity: None,
		success: true,
		description,
	}
}

const fn with_severity(mut e: DemoEvent, severity: AuditSeverity) -> DemoEvent {
	e.severity = Some(severity);
	e
}

const fn failed(mut e: DemoEvent) -> DemoEvent {
	e.success = false;
	e
}

const EVENTS: &[DemoEvent] = &[
	event(0, "admin.ross", A::Login, M::Auth, "session", "Signed in"),
	event(4, "admin.ross", A::Create, M::Admin, "user", "Created user temp.hughes"),
	with_severity(
		event(9, "admin.ross", A::PermissionChange, M::Admin, "role", "Granted appointments.manage to Care Coordinator"),
		AuditSeverity::High,
	),
	event(15, "dr.chen", A::Login, M::Auth, "session", "Signed in"),
	event(17, "dr.chen", A::Read, M::Patients, "patient", "Opened chart"),
	event(25, "dr.chen", A::Sign, M::Encounters, "encounter", "Signed progress note"),
	event(31, "nurse.alvarez", A::Update, M::Patients, "patient", "Recorded vitals"),
	failed(with_severity(
		event(40, "billing.moreau", A::LoginFailed, M::Auth, "session", "Invalid password"),
		AuditSeverity::Medium,
	)),
	failed(with_severity(
		event(41, "billing.moreau", A::LoginFailed, M::Auth, "session", "Invalid password"),
		AuditSeverity::Medium,
	)),
	failed(with_severity(
		event(42, "billing.moreau", A::LoginFailed, M::Auth, "session", "Invalid password"),
		AuditSeverity::Medium,
	)),
	with_severity(
		event(43, "billing.moreau", A::Security, M::Auth, "account", "Account locked after repeated failed logins"),
		AuditSeverity::Critical,
	),
	event(55, "frontdesk.kim", A::Create, M::Appointments, "appointment", "Booked follow-up visit"),
	with_severity(
		event(61, "frontdesk.kim", A::Export, M::Reports, "report", "Exported daily schedule"),
		AuditSeverity::Medium,
	),
	failed(with_severity(
		event(70, "dr.okafor", A::Read, M::Patients, "patient", "Access denied to restricted chart"),
		AuditSeverity::High,
	)),
	with_severity(
		event(82, "admin.ross", A::Update, M::Settings, "settings", "Changed session timeout"),
		AuditSeverity::Medium,
	),
	with_severity(
		event(90, "admin.ross", A::Approve, M::Billing, "adjustment", "Approved write-off"),
		AuditSeverity::High,
	),
	with_severity(
		event(97, "nurse.berg", A::Delete, M::Patients, "document", "Deleted scanned document"),
		AuditSeverity::High,
	),
	with_severity(
		event(104, "admin.ross", A::Update, M::Admin, "user", "Suspended nurse.berg"),
		AuditSeverity::Medium,
	),
	event(112, "ma.patel", A::Create, M::Messaging, "message", "Sent refill reminder"),
];

/// Start of the demo activity window.
pub fn demo_epoch() -> Result<DateTime<Utc>> {
	Utc.with_ymd_and_hms(2025, 3, 3, 8, 0, 0)
		.single()
		.context("demo epoch is not a valid UTC time")
}

/// Seeds users, a custom role and audit history into `console`.
pub fn seed(console: &mut AdminConsole) -> Result<()> {
	let coordinator = console.create_role(care_coordinator()?)?;
	debug!(role_id = %coordinator.id, "seeded custom role");

	let mut users = Vec::with_capacity(USERS.len());
	for demo in USERS {
		let role_id = if demo.role == CARE_COORDINATOR {
			coordinator.id
		} else {
			system_role_id(demo.role).with_context(|| format!("unknown system role {}", demo.role))?
		};
		let user = console.create_user(
			CreateUser::new(demo.username)
				.email(format!("{}@praxis.test", demo.username))
				.name(demo.first_name, demo.last_name)
				.user_type(demo.user_type)
				.role(role_id),
		)?;
		let user = apply_status(console, user, demo.status)?;
		users.push(user);
	}

	let epoch = demo_epoch()?;
	for (index, demo) in EVENTS.iter().enumerate() {
		let actor = users
			.iter()
			.find(|u| u.username == demo.actor)
			.with_context(|| format!("unknown demo actor {}", demo.actor))?;
		let mut builder = AuditLogBuilder::new(demo.action, demo.module)
			.timestamp(epoch + Duration::minutes(demo.minute))
			.actor(actor.id, actor.display_name(), actor.user_type)
			.resource(demo.resource)
			.description(demo.description)
			.ip_address(format!("10.0.4.{}", 20 + index))
			.session_id(format!("demo-{}", actor.username));
		if let Some(severity) = demo.severity {
			builder = builder.severity(severity);
		}
		if !demo.success {
			builder = builder.failed(demo.description);
		}
		if demo.action == A::Update && demo.module == M::Settings {
			builder = builder.change("session_timeout_minutes", json!(30), json!(20));
		}
		let mut entry = builder.build();
		entry.id = Uuid::from_u128(index as u128 + 1);
		console.append_audit_entry(entry)?;
	}

	info!(
		users = console.list_users().len(),
		roles = console.list_roles().len(),
		audit_entries = console.list_audit_logs().len(),
		"demo dataset seeded"
	);
	Ok(())
}

fn care_coordinator() -> Result<CreateRole> {
	let mut role = CreateRole::new(CARE_COORDINATOR)
		.description("Schedules visits and handles patient messaging");
	for code in [
		"patients.read",
		"appointments.read",
		"appointments.manage",
		"messaging.read",
		"messaging.send",
	] {
		let id = permission_id(code).with_context(|| format!("unknown permission {code}"))?;
		role = role.permission(id);
	}
	Ok(role)
}

fn apply_status(console: &mut AdminConsole, user: User, status: UserStatus) -> Result<User> {
	let updated = match status {
		UserStatus::Pending => Some(user),
		UserStatus::Active => console.unlock_user(user.id),
		UserStatus::Locked => {
			let mut last = None;
			for _ in 0..console.settings().security.max_login_attempts {
				last = console.record_failed_login(user.id);
			}
			last
		}
		other => console.update_user_status(user.id, other),
	};
	updated.context("seeded user disappeared from the store")
}

#[cfg(test)]
mod tests {
	use super::*;
	use praxis_audit::AuditLogFilter;

	fn seeded() -> AdminConsole {
		let mut console = AdminConsole::default();
		seed(&mut console).unwrap();
		console
	}

	#[test]
	fn seeds_every_demo_user_with_its_status() {
		let console = seeded();
		let counts = console.user_counts();
		assert_eq!(counts.total, USERS.len());
		assert_eq!(counts.status(UserStatus::Locked), 1);
		assert_eq!(counts.status(UserStatus::Suspended), 1);
		assert_eq!(counts.status(UserStatus::Pending), 1);
		assert_eq!(counts.active, 6);
	}

	#[test]
	fn custom_role_counts_its_member() {
		let console = seeded();
		let role = console
			.list_roles()
			.iter()
			.find(|r| r.name == CARE_COORDINATOR)
			.unwrap();
		assert_eq!(role.user_count, 1);
		assert_eq!(console.role_counts().custom, 1);
	}

	#[test]
	fn audit_history_is_deterministic() {
		let a = seeded();
		let b = seeded();
		let ids = |c: &AdminConsole| c.list_audit_logs().iter().map(|e| e.id).collect::<Vec<_>>();
		assert_eq!(ids(&a), ids(&b));
		assert_eq!(a.list_audit_logs().len(), EVENTS.len());
		assert_eq!(a.list_audit_logs()[0].id, Uuid::from_u128(EVENTS.len() as u128));
	}

	#[test]
	fn audit_summary_over_demo() {
		let console = seeded();
		let summary = console.audit_summary();
		assert_eq!(summary.total_events, EVENTS.len());
		assert_eq!(summary.failed_events, 4);
		assert_eq!(summary.security_events, 1);
		assert_eq!(summary.by_user[0].user_name, "Jordan Ross");

		let failed = console.filter_audit_logs(&AuditLogFilter {
			success: Some(false),
			..Default::default()
		});
		assert_eq!(failed.len(), 4);
	}
}
