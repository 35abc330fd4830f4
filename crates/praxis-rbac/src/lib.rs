// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role-based access control model for the Praxis admin console.
//!
//! This crate provides:
//! - Typed identifiers and closed enumerations ([`types`])
//! - The [`User`], [`Role`] and [`Permission`] entities
//! - The built-in permission catalog and seeded system roles ([`catalog`])
//! - The permission matrix engine ([`matrix`])

pub mod catalog;
pub mod matrix;
pub mod permission;
pub mod role;
pub mod types;
pub mod user;

pub use matrix::{
	has_permission, permission_matrix, permissions_by_category, role_allows, toggle_permission,
	CategoryGroup, MatrixError, MatrixRole, MatrixRow, PermissionMatrix, PermissionToggle,
};
pub use permission::Permission;
pub use role::Role;
pub use types::{
	MfaMethod, PermissionAction, PermissionCategory, PermissionId, RoleId, RoleType, UserId,
	UserStatus, UserType,
};
pub use user::{validate_email, validate_username, User};
