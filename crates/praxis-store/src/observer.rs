// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Change notifications published by the entity store.

use praxis_rbac::{PermissionId, PermissionToggle, RoleId, UserId};
use serde::Serialize;
use uuid::Uuid;

/// The entity collections owned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
	Users,
	Roles,
	AuditLogs,
}

/// One committed mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreChange {
	UserCreated { user_id: UserId },
	UserUpdated { user_id: UserId },
	UserDeleted { user_id: UserId },
	RoleCreated { role_id: RoleId },
	RoleUpdated { role_id: RoleId },
	RoleDeleted { role_id: RoleId },
	PermissionToggled {
		role_id: RoleId,
		permission_id: PermissionId,
		toggle: PermissionToggle,
	},
	AuditEntryAppended { entry_id: Uuid },
}

impl StoreChange {
	pub fn collection(&self) -> Collection {
		match self {
			StoreChange::UserCreated { .. }
			| StoreChange::UserUpdated { .. }
			| StoreChange::UserDeleted { .. } => Collection::Users,
			StoreChange::RoleCreated { .. }
			| StoreChange::RoleUpdated { .. }
			| StoreChange::RoleDeleted { .. }
			| StoreChange::PermissionToggled { .. } => Collection::Roles,
			StoreChange::AuditEntryAppended { .. } => Collection::AuditLogs,
		}
	}
}

/// Receives a callback after every successful store mutation.
///
/// Observers run synchronously, after the change is committed. The store is
/// mutably borrowed for the duration of the callback, so an observer that needs
/// the new state reads it once the mutating call returns.
pub trait StoreObserver {
	fn on_change(&self, change: &StoreChange);
}

impl<F> StoreObserver for F
where
	F: Fn(&StoreChange),
{
	fn on_change(&self, change: &StoreChange) {
		self(change)
	}
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);
