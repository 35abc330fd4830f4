// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Composable audit log filtering.
//!
//! Every field of [`AuditLogFilter`] is optional. Provided predicates are
//! combined with AND; an unset field (or an empty set) imposes no constraint.
//! Filtering never reorders entries and never fails.

use chrono::{DateTime, Utc};
use praxis_rbac::UserId;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::event::{AuditAction, AuditLogEntry, AuditModule, AuditSeverity};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditLogFilter {
	/// Inclusive lower bound on `timestamp`.
	pub start_date: Option<DateTime<Utc>>,
	/// Inclusive upper bound on `timestamp`.
	pub end_date: Option<DateTime<Utc>>,
	pub user_id: Option<UserId>,
	/// Entry matches if its action is one of these.
	pub actions: Option<Vec<AuditAction>>,
	pub severities: Option<Vec<AuditSeverity>>,
	pub modules: Option<Vec<AuditModule>>,
	pub success: Option<bool>,
	/// Case-insensitive substring over description, user name and resource.
	pub search: Option<String>,
}

impl AuditLogFilter {
	/// Returns true if no predicate is set.
	pub fn is_empty(&self) -> bool {
		self.start_date.is_none()
			&& self.end_date.is_none()
			&& self.user_id.is_none()
			&& is_unconstrained(&self.actions)
			&& is_unconstrained(&self.severities)
			&& is_unconstrained(&self.modules)
			&& self.success.is_none()
			&& self.normalized_search().is_none()
	}

	/// Returns true if `entry` satisfies every provided predicate.
	pub fn matches(&self, entry: &AuditLogEntry) -> bool {
		self.matches_with_search(entry, self.normalized_search().as_deref())
	}

	fn normalized_search(&self) -> Option<String> {
		self.search
			.as_deref()
			.map(str::trim)
			.filter(|s| !s.is_empty())
			.map(str::to_lowercase)
	}

	fn matches_with_search(&self, entry: &AuditLogEntry, search: Option<&str>) -> bool {
		if let Some(start) = self.start_date {
			if entry.timestamp < start {
				return false;
			}
		}
		if let Some(end) = self.end_date {
			if entry.timestamp > end {
				return false;
			}
		}
		if let Some(user_id) = self.user_id {
			if entry.user_id != user_id {
				return false;
			}
		}
		if !in_set(&self.actions, &entry.action) {
			return false;
		}
		if !in_set(&self.severities, &entry.severity) {
			return false;
		}
		if !in_set(&self.modules, &entry.module) {
			return false;
		}
		if let Some(success) = self.success {
			if entry.success != success {
				return false;
			}
		}
		if let Some(needle) = search {
			let hit = [&entry.description, &entry.user_name, &entry.resource]
				.iter()
				.any(|field| field.to_lowercase().contains(needle));
			if !hit {
				return false;
			}
		}
		true
	}
}

fn is_unconstrained<T>(set: &Option<Vec<T>>) -> bool {
	set.as_ref().map(Vec::is_empty).unwrap_or(true)
}

fn in_set<T: PartialEq>(set: &Option<Vec<T>>, value: &T) -> bool {
	match set {
		Some(values) if !values.is_empty() => values.contains(value),
		_ => true,
	}
}

/// Returns the entries matching `filter`, in input order.
pub fn filter_audit_logs<'a>(
	logs: &'a [AuditLogEntry],
	filter: &AuditLogFilter,
) -> Vec<&'a AuditLogEntry> {
	let search = filter.normalized_search();
	let matched: Vec<&AuditLogEntry> = logs
		.iter()
		.filter(|entry| filter.matches_with_search(entry, search.as_deref()))
		.collect();
	debug!(
		input = logs.len(),
		matched = matched.len(),
		"filtered audit logs"
	);
	matched
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::event::AuditLogBuilder;
	use chrono::Duration;
	use praxis_rbac::UserType;
	use proptest::prelude::*;

	fn entry(
		action: AuditAction,
		severity: AuditSeverity,
		module: AuditModule,
		minutes_ago: i64,
	) -> AuditLogEntry {
		AuditLogBuilder::new(action, module)
			.actor(UserId::from_u128(1), "Front Desk", UserType::FrontDesk)
			.resource("appointment")
			.description(format!("{action} appointment"))
			.severity(severity)
			.timestamp(Utc::now() - Duration::minutes(minutes_ago))
			.build()
	}

	fn mixed_log(len: usize) -> Vec<AuditLogEntry> {
		(0..len)
			.map(|i| {
				let severity = AuditSeverity::all()[i % 4];
				let action = AuditAction::all()[i % AuditAction::all().len()];
				let module = AuditModule::all()[i % AuditModule::all().len()];
				entry(action, severity, module, i as i64)
			})
			.collect()
	}

	mod predicates {
		use super::*;

		#[test]
		fn empty_filter_keeps_everything_in_order() {
			let logs = mixed_log(20);
			let filter = AuditLogFilter::default();
			assert!(filter.is_empty());

			let result = filter_audit_logs(&logs, &filter);
			let ids: Vec<_> = result.iter().map(|e| e.id).collect();
			let expected: Vec<_> = logs.iter().map(|e| e.id).collect();
			assert_eq!(ids, expected);
		}

		#[test]
		fn critical_only_on_fifty_entries() {
			let logs = mixed_log(50);
			let filter = AuditLogFilter {
				severities: Some(vec![AuditSeverity::Critical]),
				..Default::default()
			};

			let result = filter_audit_logs(&logs, &filter);
			let expected: Vec<_> = logs
				.iter()
				.filter(|e| e.severity == AuditSeverity::Critical)
				.map(|e| e.id)
				.collect();
			assert!(!result.is_empty());
			assert!(result.iter().all(|e| e.severity == AuditSeverity::Critical));
			assert_eq!(result.iter().map(|e| e.id).collect::<Vec<_>>(), expected);
		}

		#[test]
		fn date_bounds_are_inclusive() {
			let logs = mixed_log(5);
			let filter = AuditLogFilter {
				start_date: Some(logs[3].timestamp),
				end_date: Some(logs[1].timestamp),
				..Default::default()
			};

			let result = filter_audit_logs(&logs, &filter);
			let ids: Vec<_> = result.iter().map(|e| e.id).collect();
			assert_eq!(ids, vec![logs[1].id, logs[2].id, logs[3].id]);
		}

		#[test]
		fn action_set_membership() {
			let logs = mixed_log(26);
			let filter = AuditLogFilter {
				actions: Some(vec![AuditAction::Login, AuditAction::Delete]),
				..Default::default()
			};

			let result = filter_audit_logs(&logs, &filter);
			assert_eq!(result.len(), 4);
			assert!(result
				.iter()
				.all(|e| matches!(e.action, AuditAction::Login | AuditAction::Delete)));
		}

		#[test]
		fn empty_set_is_unconstrained() {
			let logs = mixed_log(8);
			let filter = AuditLogFilter {
				modules: Some(Vec::new()),
				..Default::default()
			};
			assert!(filter.is_empty());
			assert_eq!(filter_audit_logs(&logs, &filter).len(), 8);
		}

		#[test]
		fn user_and_success_predicates() {
			let mut logs = mixed_log(4);
			logs[2].user_id = UserId::from_u128(2);
			logs[2].success = false;

			let by_user = AuditLogFilter {
				user_id: Some(UserId::from_u128(2)),
				..Default::default()
			};
			assert_eq!(filter_audit_logs(&logs, &by_user).len(), 1);

			let failed = AuditLogFilter {
				success: Some(false),
				..Default::default()
			};
			let result = filter_audit_logs(&logs, &failed);
			assert_eq!(result.len(), 1);
			assert_eq!(result[0].id, logs[2].id);
		}

		#[test]
		fn search_matches_any_field_case_insensitively() {
			let mut logs = mixed_log(3);
			logs[0].description = "Exported CLAIM batch".to_string();
			logs[1].user_name = "Claire Claimsworth".to_string();
			logs[2].resource = "invoice".to_string();

			let filter = AuditLogFilter {
				search: Some("claim".to_string()),
				..Default::default()
			};
			let result = filter_audit_logs(&logs, &filter);
			let ids: Vec<_> = result.iter().map(|e| e.id).collect();
			assert_eq!(ids, vec![logs[0].id, logs[1].id]);
		}

		#[test]
		fn blank_search_is_unconstrained() {
			let logs = mixed_log(3);
			let filter = AuditLogFilter {
				search: Some("   ".to_string()),
				..Default::default()
			};
			assert!(filter.is_empty());
			assert_eq!(filter_audit_logs(&logs, &filter).len(), 3);
		}

		#[test]
		fn predicates_are_anded() {
			let logs = mixed_log(40);
			let filter = AuditLogFilter {
				severities: Some(vec![AuditSeverity::Critical]),
				actions: Some(vec![AuditAction::Login]),
				..Default::default()
			};
			let result = filter_audit_logs(&logs, &filter);
			assert!(result
				.iter()
				.all(|e| e.severity == AuditSeverity::Critical && e.action == AuditAction::Login));
		}

		#[test]
		fn no_match_is_empty_not_error() {
			let logs = mixed_log(10);
			let filter = AuditLogFilter {
				search: Some("no such text".to_string()),
				..Default::default()
			};
			assert!(filter_audit_logs(&logs, &filter).is_empty());
		}
	}

	mod proptest_tests {
		use super::*;

		proptest! {
			#[test]
			fn result_is_ordered_subsequence(len in 0usize..60, sev in 0usize..4) {
				let logs = mixed_log(len);
				let filter = AuditLogFilter {
					severities: Some(vec![AuditSeverity::all()[sev]]),
					..Default::default()
				};
				let result = filter_audit_logs(&logs, &filter);

				let mut cursor = logs.iter();
				for matched in &result {
					prop_assert!(cursor.any(|e| e.id == matched.id));
				}
				prop_assert!(result.iter().all(|e| filter.matches(e)));
			}

			#[test]
			fn empty_filter_is_identity(len in 0usize..60) {
				let logs = mixed_log(len);
				let result = filter_audit_logs(&logs, &AuditLogFilter::default());
				prop_assert_eq!(result.len(), logs.len());
			}
		}
	}
}
