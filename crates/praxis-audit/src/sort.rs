// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Explicit, stable ordering of audit entries.

use std::borrow::Borrow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::event::AuditLogEntry;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSortField {
	#[default]
	Timestamp,
	Action,
	Severity,
	Module,
	UserName,
	Resource,
	Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
	Ascending,
	Descending,
}

/// Sort key and direction. Defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSort {
	pub field: AuditSortField,
	pub direction: SortDirection,
}

impl Default for AuditSort {
	fn default() -> Self {
		Self {
			field: AuditSortField::Timestamp,
			direction: SortDirection::Descending,
		}
	}
}

impl AuditSort {
	pub fn new(field: AuditSortField, direction: SortDirection) -> Self {
		Self { field, direction }
	}

	fn compare(&self, a: &AuditLogEntry, b: &AuditLogEntry) -> Ordering {
		let ordering = match self.field {
			AuditSortField::Timestamp => a.timestamp.cmp(&b.timestamp),
			AuditSortField::Action => a.action.to_string().cmp(&b.action.to_string()),
			AuditSortField::Severity => a.severity.cmp(&b.severity),
			AuditSortField::Module => a.module.to_string().cmp(&b.module.to_string()),
			AuditSortField::UserName => a
				.user_name
				.to_lowercase()
				.cmp(&b.user_name.to_lowercase()),
			AuditSortField::Resource => a.resource.to_lowercase().cmp(&b.resource.to_lowercase()),
			AuditSortField::Success => a.success.cmp(&b.success),
		};
		match self.direction {
			SortDirection::Ascending => ordering,
			SortDirection::Descending => ordering.reverse(),
		}
	}
}

/// Sorts entries in place. Equal keys keep their relative order.
pub fn sort_audit_logs<E: Borrow<AuditLogEntry>>(entries: &mut [E], sort: AuditSort) {
	entries.sort_by(|a, b| sort.compare(a.borrow(), b.borrow()));
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::event::{AuditAction, AuditLogBuilder, AuditModule, AuditSeverity};
	use chrono::{Duration, Utc};
	use praxis_rbac::{UserId, UserType};

	fn entry(name: &str, severity: AuditSeverity, minutes_ago: i64) -> AuditLogEntry {
		AuditLogBuilder::new(AuditAction::Read, AuditModule::Patients)
			.actor(UserId::generate(), name, UserType::Nurse)
			.resource("patient")
			.severity(severity)
			.timestamp(Utc::now() - Duration::minutes(minutes_ago))
			.build()
	}

	#[test]
	fn default_is_timestamp_descending() {
		let mut logs = vec![
			entry("a", AuditSeverity::Low, 30),
			entry("b", AuditSeverity::Low, 10),
			entry("c", AuditSeverity::Low, 20),
		];
		sort_audit_logs(&mut logs, AuditSort::default());
		let names: Vec<_> = logs.iter().map(|e| e.user_name.as_str()).collect();
		assert_eq!(names, vec!["b", "c", "a"]);
	}

	#[test]
	fn severity_ascending_is_stable() {
		let mut logs = vec![
			entry("first-high", AuditSeverity::High, 1),
			entry("low", AuditSeverity::Low, 2),
			entry("second-high", AuditSeverity::High, 3),
			entry("critical", AuditSeverity::Critical, 4),
		];
		sort_audit_logs(
			&mut logs,
			AuditSort::new(AuditSortField::Severity, SortDirection::Ascending),
		);
		let names: Vec<_> = logs.iter().map(|e| e.user_name.as_str()).collect();
		assert_eq!(names, vec!["low", "first-high", "second-high", "critical"]);
	}

	#[test]
	fn descending_keeps_ties_in_encounter_order() {
		let mut logs = vec![
			entry("x", AuditSeverity::Medium, 1),
			entry("y", AuditSeverity::Medium, 2),
			entry("z", AuditSeverity::Critical, 3),
		];
		sort_audit_logs(
			&mut logs,
			AuditSort::new(AuditSortField::Severity, SortDirection::Descending),
		);
		let names: Vec<_> = logs.iter().map(|e| e.user_name.as_str()).collect();
		assert_eq!(names, vec!["z", "x", "y"]);
	}

	#[test]
	fn sorts_borrowed_entries() {
		let logs = vec![
			entry("Bravo", AuditSeverity::Low, 1),
			entry("alpha", AuditSeverity::Low, 2),
		];
		let mut refs: Vec<&AuditLogEntry> = logs.iter().collect();
		sort_audit_logs(
			&mut refs,
			AuditSort::new(AuditSortField::UserName, SortDirection::Ascending),
		);
		assert_eq!(refs[0].user_name, "alpha");
	}
}
