// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Derived views over the entity store.
//!
//! Each view is a pure function of one store collection. [`DerivedViews`]
//! memoizes them against the collection revision, so a read after any
//! mutation recomputes and a read between mutations does not.

use std::cell::RefCell;

use praxis_audit::{summarize, AuditSummary, GroupCount};
use praxis_rbac::{Role, RoleType, User, UserStatus, UserType};
use serde::Serialize;
use tracing::trace;

use crate::observer::Collection;
use crate::store::EntityStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserCounts {
	pub total: usize,
	pub active: usize,
	/// Every status, in declaration order, including zero counts.
	pub by_status: Vec<GroupCount<UserStatus>>,
	/// Every user type, in declaration order, including zero counts.
	pub by_type: Vec<GroupCount<UserType>>,
}

impl UserCounts {
	pub fn status(&self, status: UserStatus) -> usize {
		self.by_status
			.iter()
			.find(|g| g.key == status)
			.map(|g| g.count)
			.unwrap_or(0)
	}

	pub fn user_type(&self, user_type: UserType) -> usize {
		self.by_type
			.iter()
			.find(|g| g.key == user_type)
			.map(|g| g.count)
			.unwrap_or(0)
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoleCounts {
	pub total: usize,
	pub system: usize,
	pub custom: usize,
}

pub fn user_counts(users: &[User]) -> UserCounts {
	let by_status = UserStatus::all()
		.iter()
		.map(|&status| GroupCount {
			key: status,
			count: users.iter().filter(|u| u.status == status).count(),
		})
		.collect();
	let by_type = UserType::all()
		.iter()
		.map(|&user_type| GroupCount {
			key: user_type,
			count: users.iter().filter(|u| u.user_type == user_type).count(),
		})
		.collect();

	UserCounts {
		total: users.len(),
		active: users.iter().filter(|u| u.is_active()).count(),
		by_status,
		by_type,
	}
}

pub fn role_counts(roles: &[Role]) -> RoleCounts {
	let system = roles
		.iter()
		.filter(|r| r.role_type == RoleType::System)
		.count();
	RoleCounts {
		total: roles.len(),
		system,
		custom: roles.len() - system,
	}
}

/// Revision-keyed memo of the store's derived views.
#[derive(Debug, Default)]
pub struct DerivedViews {
	users: RefCell<Option<(u64, UserCounts)>>,
	roles: RefCell<Option<(u64, RoleCounts)>>,
	audit: RefCell<Option<(u64, AuditSummary)>>,
}

impl DerivedViews {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn user_counts(&self, store: &EntityStore) -> UserCounts {
		let revision = store.revisions().get(Collection::Users);
		memoized(&self.users, revision, || user_counts(store.list_users()))
	}

	pub fn role_counts(&self, store: &EntityStore) -> RoleCounts {
		let revision = store.revisions().get(Collection::Roles);
		memoized(&self.roles, revision, || role_counts(store.list_roles()))
	}

	/// Summary of the full audit log, newest first.
	pub fn audit_summary(&self, store: &EntityStore) -> AuditSummary {
		let revision = store.revisions().get(Collection::AuditLogs);
		memoized(&self.audit, revision, || summarize(store.list_audit_logs()))
	}
}

fn memoized<T: Clone>(slot: &RefCell<Option<(u64, T)>>, revision: u64, compute: impl FnOnce() -> T) -> T {
	if let Some((cached, value)) = slot.borrow().as_ref() {
		if *cached == revision {
			return value.clone();
		}
	}
	trace!(revision, "recomputing derived view");
	let value = compute();
	slot.replace(Some((revision, value.clone())));
	value
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::patch::{CreateRole, CreateUser};
	use praxis_audit::{AuditAction, AuditLogBuilder, AuditModule};
	use praxis_rbac::UserId;

	#[test]
	fn user_counts_cover_full_domains() {
		let counts = user_counts(&[]);
		assert_eq!(counts.total, 0);
		assert_eq!(counts.by_status.len(), UserStatus::all().len());
		assert_eq!(counts.by_type.len(), UserType::all().len());
		assert!(counts.by_status.iter().all(|g| g.count == 0));
	}

	#[test]
	fn seeded_role_counts() {
		let store = EntityStore::new();
		let counts = role_counts(store.list_roles());
		assert_eq!(counts.total, 6);
		assert_eq!(counts.system, 6);
		assert_eq!(counts.custom, 0);
	}

	#[test]
	fn reads_between_mutations_are_memoized() {
		let mut store = EntityStore::new();
		let views = DerivedViews::new();
		store.create_user(CreateUser::new("a")).unwrap();

		let first = views.user_counts(&store);
		assert_eq!(
			views.users.borrow().as_ref().map(|(rev, _)| *rev),
			Some(store.revisions().users)
		);
		assert_eq!(views.user_counts(&store), first);
	}

	#[test]
	fn reads_after_mutation_are_fresh() {
		let mut store = EntityStore::new();
		let views = DerivedViews::new();

		let user = store.create_user(CreateUser::new("a")).unwrap();
		assert_eq!(views.user_counts(&store).status(UserStatus::Pending), 1);
		assert_eq!(views.user_counts(&store).active, 0);

		store.unlock_user(user.id).unwrap();
		let counts = views.user_counts(&store);
		assert_eq!(counts.status(UserStatus::Pending), 0);
		assert_eq!(counts.active, 1);

		store.create_role(CreateRole::new("Scribe")).unwrap();
		assert_eq!(views.role_counts(&store).custom, 1);

		assert_eq!(views.audit_summary(&store).total_events, 0);
		store
			.append_audit_entry(
				AuditLogBuilder::new(AuditAction::Create, AuditModule::Admin)
					.actor(UserId::generate(), "Admin", UserType::Administrator)
					.resource("role")
					.build(),
			)
			.unwrap();
		assert_eq!(views.audit_summary(&store).total_events, 1);
	}
}
