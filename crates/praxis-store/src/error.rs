// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use praxis_audit::AuditError;
use praxis_rbac::MatrixError;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Recoverable rejections from entity store mutations.
///
/// A lookup by unknown id is not an error: mutation methods return `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
	#[error("validation failed: {message}")]
	Validation { message: String },

	#[error("invariant violation: {reason}")]
	InvariantViolation { reason: String },
}

impl StoreError {
	pub fn validation(message: impl Into<String>) -> Self {
		StoreError::Validation {
			message: message.into(),
		}
	}

	pub fn invariant(reason: impl Into<String>) -> Self {
		StoreError::InvariantViolation {
			reason: reason.into(),
		}
	}

	pub fn is_invariant_violation(&self) -> bool {
		matches!(self, StoreError::InvariantViolation { .. })
	}
}

impl From<AuditError> for StoreError {
	fn from(e: AuditError) -> Self {
		StoreError::validation(e.to_string())
	}
}

impl From<MatrixError> for StoreError {
	fn from(e: MatrixError) -> Self {
		StoreError::invariant(e.to_string())
	}
}
