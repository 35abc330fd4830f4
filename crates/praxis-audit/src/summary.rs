// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Aggregation of audit entries into an [`AuditSummary`].
//!
//! Group lists carry only keys present in the input, in first-encounter
//! order. `by_user` is sorted by descending count with ties kept in encounter
//! order, then truncated.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use praxis_rbac::UserId;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::event::{AuditAction, AuditLogEntry, AuditModule, AuditSeverity};

/// Number of users kept in [`AuditSummary::by_user`].
pub const TOP_USERS_LIMIT: usize = 10;

/// Number of entries kept in [`AuditSummary::recent_activity`].
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount<K> {
	pub key: K,
	pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActivity {
	pub user_id: UserId,
	/// Name seen on the first entry for this user.
	pub user_name: String,
	pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditSummary {
	pub total_events: usize,
	pub by_action: Vec<GroupCount<AuditAction>>,
	pub by_severity: Vec<GroupCount<AuditSeverity>>,
	pub by_module: Vec<GroupCount<AuditModule>>,
	pub by_user: Vec<UserActivity>,
	pub failed_events: usize,
	/// Entries whose action is `security` or whose severity is `critical`.
	pub security_events: usize,
	pub recent_activity: Vec<AuditLogEntry>,
}

impl AuditSummary {
	pub fn count_for_action(&self, action: AuditAction) -> usize {
		lookup(&self.by_action, &action)
	}

	pub fn count_for_severity(&self, severity: AuditSeverity) -> usize {
		lookup(&self.by_severity, &severity)
	}

	pub fn count_for_module(&self, module: AuditModule) -> usize {
		lookup(&self.by_module, &module)
	}
}

fn lookup<K: PartialEq>(groups: &[GroupCount<K>], key: &K) -> usize {
	groups
		.iter()
		.find(|g| &g.key == key)
		.map(|g| g.count)
		.unwrap_or(0)
}

/// Counts occurrences, remembering the order in which keys first appear.
struct OrderedCounter<K> {
	index: HashMap<K, usize>,
	groups: Vec<GroupCount<K>>,
}

impl<K: Copy + Eq + Hash> OrderedCounter<K> {
	fn new() -> Self {
		Self {
			index: HashMap::new(),
			groups: Vec::new(),
		}
	}

	fn add(&mut self, key: K) -> usize {
		let slot = match self.index.get(&key) {
			Some(&slot) => slot,
			None => {
				self.groups.push(GroupCount { key, count: 0 });
				let slot = self.groups.len() - 1;
				self.index.insert(key, slot);
				slot
			}
		};
		self.groups[slot].count += 1;
		slot
	}

	fn into_groups(self) -> Vec<GroupCount<K>> {
		self.groups
	}
}

/// Summarizes `logs` without reordering them.
pub fn summarize<E: Borrow<AuditLogEntry>>(logs: &[E]) -> AuditSummary {
	let mut by_action = OrderedCounter::new();
	let mut by_severity = OrderedCounter::new();
	let mut by_module = OrderedCounter::new();
	let mut by_user = OrderedCounter::new();
	let mut user_names: Vec<String> = Vec::new();
	let mut failed_events = 0;
	let mut security_events = 0;

	for entry in logs.iter().map(Borrow::borrow) {
		by_action.add(entry.action);
		by_severity.add(entry.severity);
		by_module.add(entry.module);
		if by_user.add(entry.user_id) == user_names.len() {
			user_names.push(entry.user_name.clone());
		}
		if !entry.success {
			failed_events += 1;
		}
		if entry.is_security_event() {
			security_events += 1;
		}
	}

	let mut users: Vec<UserActivity> = by_user
		.into_groups()
		.into_iter()
		.zip(user_names)
		.map(|(group, user_name)| UserActivity {
			user_id: group.key,
			user_name,
			count: group.count,
		})
		.collect();
	// Stable sort keeps encounter order among equal counts.
	users.sort_by(|a, b| b.count.cmp(&a.count));
	users.truncate(TOP_USERS_LIMIT);

	let summary = AuditSummary {
		total_events: logs.len(),
		by_action: by_action.into_groups(),
		by_severity: by_severity.into_groups(),
		by_module: by_module.into_groups(),
		by_user: users,
		failed_events,
		security_events,
		recent_activity: logs
			.iter()
			.take(RECENT_ACTIVITY_LIMIT)
			.map(|e| e.borrow().clone())
			.collect(),
	};

	debug!(
		total = summary.total_events,
		failed = summary.failed_events,
		security = summary.security_events,
		"summarized audit logs"
	);
	summary
}
