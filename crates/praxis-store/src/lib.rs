// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! State and query engine for the Praxis admin console.
//!
//! This crate provides:
//! - The [`EntityStore`], sole owner of users, roles, permissions and audit entries
//! - Create requests and field-by-field patches ([`patch`])
//! - Change notifications for subscribers ([`observer`])
//! - Revision-keyed derived views ([`views`])
//! - The [`AdminConsole`] facade exposing the read/write contract

pub mod console;
pub mod error;
pub mod observer;
pub mod patch;
pub mod store;
pub mod views;

pub use console::AdminConsole;
pub use error::{StoreError, StoreResult};
pub use observer::{Collection, StoreChange, StoreObserver, SubscriptionId};
pub use patch::{CreateRole, CreateUser, RolePatch, UserPatch};
pub use store::{EntityStore, Revisions, DEFAULT_LOCK_DURATION_MINUTES};
pub use views::{role_counts, user_counts, DerivedViews, RoleCounts, UserCounts};
