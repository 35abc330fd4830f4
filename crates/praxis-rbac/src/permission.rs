// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Permission catalog entries.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::{PermissionAction, PermissionCategory, PermissionId};

/// An immutable entry in the permission catalog.
///
/// Permissions are never created or edited at runtime; roles reference them
/// by [`PermissionId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
	pub id: PermissionId,
	/// Stable machine code, e.g. `patients.read`.
	pub code: String,
	pub name: String,
	pub description: String,
	/// Console module that owns the permission.
	pub module: String,
	pub category: PermissionCategory,
	pub actions: BTreeSet<PermissionAction>,
}

impl Permission {
	/// Returns true if this permission authorizes the given action.
	pub fn allows(&self, action: PermissionAction) -> bool {
		self.actions.contains(&action)
	}
}
