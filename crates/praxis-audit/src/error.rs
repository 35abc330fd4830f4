// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use thiserror::Error;

pub type AuditResult<T> = Result<T, AuditError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuditError {
	#[error("audit entry is missing required field '{field}'")]
	MissingField { field: &'static str },
}
