// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod error;
pub mod event;
pub mod filter;
pub mod sort;
pub mod summary;

pub use error::{AuditError, AuditResult};
pub use event::{
	AuditAction, AuditLogBuilder, AuditLogEntry, AuditModule, AuditSeverity, FieldChange,
};
pub use filter::{filter_audit_logs, AuditLogFilter};
pub use sort::{sort_audit_logs, AuditSort, AuditSortField, SortDirection};
pub use summary::{
	summarize, AuditSummary, GroupCount, UserActivity, RECENT_ACTIVITY_LIMIT, TOP_USERS_LIMIT,
};
