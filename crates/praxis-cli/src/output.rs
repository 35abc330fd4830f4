// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Table and JSON rendering for console read models.

use std::fmt::Write as _;

use anyhow::Result;
use praxis_audit::{AuditLogEntry, AuditSummary};
use praxis_config::ConsoleSettings;
use praxis_rbac::{PermissionMatrix, Role, User};
use praxis_store::{RoleCounts, UserCounts};
use serde::Serialize;

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
	#[default]
	Table,
	Json,
}

/// Everything the `summary` command reports.
#[derive(Debug, Serialize)]
pub struct SummaryReport {
	pub users: UserCounts,
	pub roles: RoleCounts,
	pub audit: AuditSummary,
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
	Ok(serde_json::to_string_pretty(value)?)
}

fn clip(value: &str, width: usize) -> String {
	if value.chars().count() > width {
		let kept: String = value.chars().take(width.saturating_sub(3)).collect();
		format!("{kept}...")
	} else {
		value.to_string()
	}
}

pub fn render_summary(report: &SummaryReport) -> String {
	let mut out = String::new();
	let users = &report.users;
	let _ = writeln!(out, "Users: {} total, {} active", users.total, users.active);
	for group in &users.by_status {
		let _ = writeln!(out, "  {:<12} {:>4}", group.key, group.count);
	}
	let roles = &report.roles;
	let _ = writeln!(
		out,
		"Roles: {} total ({} system, {} custom)",
		roles.total, roles.system, roles.custom
	);

	let audit = &report.audit;
	let _ = writeln!(
		out,
		"Audit: {} events, {} failed, {} security",
		audit.total_events, audit.failed_events, audit.security_events
	);
	for group in &audit.by_severity {
		let _ = writeln!(out, "  {:<12} {:>4}", group.key, group.count);
	}
	if !audit.by_user.is_empty() {
		let _ = writeln!(out, "Most active users:");
		for user in &audit.by_user {
			let _ = writeln!(out, "  {:<24} {:>4}", clip(&user.user_name, 24), user.count);
		}
	}
	out
}

pub fn render_users(users: &[&User], roles: &[Role]) -> String {
	if users.is_empty() {
		return "No users found.\n".to_string();
	}
	let mut out = String::new();
	let _ = writeln!(
		out,
		"{:<18} {:<22} {:<18} {:<10} {:>5} {:<24}",
		"USERNAME", "NAME", "TYPE", "STATUS", "FAILS", "ROLES"
	);
	let _ = writeln!(out, "{}", "-".repeat(102));
	for user in users {
		let role_names: Vec<&str> = user
			.role_ids
			.iter()
			.filter_map(|id| roles.iter().find(|r| r.id == *id))
			.map(|r| r.name.as_str())
			.collect();
		let _ = writeln!(
			out,
			"{:<18} {:<22} {:<18} {:<10} {:>5} {:<24}",
			clip(&user.username, 18),
			clip(&user.display_name(), 22),
			user.user_type,
			user.status,
			user.login_attempts,
			clip(&role_names.join(", "), 24)
		);
	}
	out
}

pub fn render_roles(roles: &[Role]) -> String {
	let mut out = String::new();
	let _ = writeln!(
		out,
		"{:<22} {:<8} {:>6} {:>6} {:<8}",
		"NAME", "TYPE", "PERMS", "USERS", "DEFAULT"
	);
	let _ = writeln!(out, "{}", "-".repeat(54));
	for role in roles {
		let _ = writeln!(
			out,
			"{:<22} {:<8} {:>6} {:>6} {:<8}",
			clip(&role.name, 22),
			role.role_type,
			role.permissions.len(),
			role.user_count,
			if role.is_default { "yes" } else { "" }
		);
	}
	out
}

pub fn render_matrix(matrix: &PermissionMatrix) -> String {
	let mut out = String::new();
	let _ = write!(out, "{:<24}", "PERMISSION");
	for role in &matrix.roles {
		let _ = write!(out, " {:^10}", clip(&role.name, 10));
	}
	out.push('\n');

	for group in &matrix.categories {
		let _ = writeln!(out, "[{}]", group.category);
		for row in &group.rows {
			let _ = write!(out, "  {:<22}", clip(&row.code, 22));
			for granted in &row.granted {
				let _ = write!(out, " {:^10}", if *granted { "x" } else { "." });
			}
			out.push('\n');
		}
	}
	out
}

pub fn render_audit(entries: &[&AuditLogEntry]) -> String {
	if entries.is_empty() {
		return "No audit entries match.\n".to_string();
	}
	let mut out = String::new();
	let _ = writeln!(
		out,
		"{:<20} {:<18} {:<18} {:<9} {:<13} {:<4} {}",
		"TIMESTAMP", "USER", "ACTION", "SEVERITY", "MODULE", "OK", "DESCRIPTION"
	);
	let _ = writeln!(out, "{}", "-".repeat(120));
	for entry in entries {
		let _ = writeln!(
			out,
			"{:<20} {:<18} {:<18} {:<9} {:<13} {:<4} {}",
			entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
			clip(&entry.user_name, 18),
			entry.action,
			entry.severity,
			entry.module,
			if entry.success { "yes" } else { "NO" },
			entry.description
		);
	}
	out
}

/// Settings render as TOML, the same shape the config file accepts.
pub fn render_settings(settings: &ConsoleSettings) -> Result<String> {
	Ok(toml::to_string_pretty(settings)?)
}
