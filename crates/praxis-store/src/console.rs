// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The read/write surface consumed by presentation layers.

use chrono::Duration;
use praxis_audit::{
	filter_audit_logs, sort_audit_logs, summarize, AuditLogEntry, AuditLogFilter, AuditSort,
	AuditSummary, GroupCount,
};
use praxis_config::{ConfigError, ConsoleSettings, SecuritySettings, SettingsPatch};
use praxis_rbac::{
	permission_matrix, permissions_by_category, Permission, PermissionCategory, PermissionId,
	PermissionMatrix, PermissionToggle, Role, RoleId, User, UserId, UserStatus, UserType,
};
use tracing::info;

use crate::error::StoreResult;
use crate::observer::{StoreObserver, SubscriptionId};
use crate::patch::{CreateRole, CreateUser, RolePatch, UserPatch};
use crate::store::EntityStore;
use crate::views::{DerivedViews, RoleCounts, UserCounts};

/// Owns the entity store, its derived views and the console settings.
#[derive(Debug)]
pub struct AdminConsole {
	store: EntityStore,
	views: DerivedViews,
	settings: ConsoleSettings,
}

impl Default for AdminConsole {
	fn default() -> Self {
		Self::new(ConsoleSettings::default())
	}
}

impl AdminConsole {
	/// Creates a console over a freshly seeded store.
	pub fn new(settings: ConsoleSettings) -> Self {
		Self::with_store(EntityStore::new(), settings)
	}

	pub fn with_store(mut store: EntityStore, settings: ConsoleSettings) -> Self {
		store.set_lock_duration(lockout_duration(&settings.security));
		Self {
			store,
			views: DerivedViews::new(),
			settings,
		}
	}

	pub fn store(&self) -> &EntityStore {
		&self.store
	}

	// =========================================================================
	// Reads
	// =========================================================================

	pub fn list_users(&self) -> &[User] {
		self.store.list_users()
	}

	pub fn get_user(&self, id: UserId) -> Option<&User> {
		self.store.get_user(id)
	}

	pub fn users_with_status(&self, status: UserStatus) -> Vec<&User> {
		self.store
			.list_users()
			.iter()
			.filter(|u| u.status == status)
			.collect()
	}

	pub fn list_roles(&self) -> &[Role] {
		self.store.list_roles()
	}

	pub fn get_role(&self, id: RoleId) -> Option<&Role> {
		self.store.get_role(id)
	}

	pub fn list_permissions(&self) -> &[Permission] {
		self.store.list_permissions()
	}

	pub fn permissions_by_category(&self, category: PermissionCategory) -> Vec<&Permission> {
		permissions_by_category(self.store.list_permissions(), category)
	}

	pub fn permission_matrix(&self) -> PermissionMatrix {
		permission_matrix(self.store.list_permissions(), self.store.list_roles())
	}

	/// Audit entries, newest first.
	pub fn list_audit_logs(&self) -> &[AuditLogEntry] {
		self.store.list_audit_logs()
	}

	/// Matching entries in stored (newest first) order.
	pub fn filter_audit_logs(&self, filter: &AuditLogFilter) -> Vec<&AuditLogEntry> {
		filter_audit_logs(self.store.list_audit_logs(), filter)
	}

	/// Matching entries, reordered by `sort`.
	pub fn sorted_audit_logs(
		&self,
		filter: &AuditLogFilter,
		sort: AuditSort,
	) -> Vec<&AuditLogEntry> {
		let mut entries = self.filter_audit_logs(filter);
		sort_audit_logs(&mut entries, sort);
		entries
	}

	pub fn audit_summary(&self) -> AuditSummary {
		self.views.audit_summary(&self.store)
	}

	/// Summary over the entries matching `filter`, in stored order.
	pub fn filtered_audit_summary(&self, filter: &AuditLogFilter) -> AuditSummary {
		if filter.is_empty() {
			return self.audit_summary();
		}
		summarize(&self.filter_audit_logs(filter))
	}

	pub fn user_counts(&self) -> UserCounts {
		self.views.user_counts(&self.store)
	}

	pub fn users_by_status(&self) -> Vec<GroupCount<UserStatus>> {
		self.user_counts().by_status
	}

	pub fn users_by_type(&self) -> Vec<GroupCount<UserType>> {
		self.user_counts().by_type
	}

	pub fn total_users(&self) -> usize {
		self.user_counts().total
	}

	pub fn active_users(&self) -> usize {
		self.user_counts().active
	}

	pub fn role_counts(&self) -> RoleCounts {
		self.views.role_counts(&self.store)
	}

	pub fn settings(&self) -> &ConsoleSettings {
		&self.settings
	}

	// =========================================================================
	// Writes
	// =========================================================================

	pub fn create_user(&mut self, request: CreateUser) -> StoreResult<User> {
		self.store.create_user(request)
	}

	pub fn update_user(&mut self, id: UserId, patch: UserPatch) -> StoreResult<Option<User>> {
		self.store.update_user(id, patch)
	}

	pub fn delete_user(&mut self, id: UserId) -> Option<User> {
		self.store.delete_user(id)
	}

	pub fn update_user_status(&mut self, id: UserId, status: UserStatus) -> Option<User> {
		self.store.update_user_status(id, status)
	}

	pub fn unlock_user(&mut self, id: UserId) -> Option<User> {
		self.store.unlock_user(id)
	}

	/// Counts a failed login against the configured lockout policy.
	pub fn record_failed_login(&mut self, id: UserId) -> Option<User> {
		let security = &self.settings.security;
		let max_attempts = security.max_login_attempts;
		let lock_duration = lockout_duration(security);
		self.store.record_failed_login(id, max_attempts, lock_duration)
	}

	pub fn record_successful_login(&mut self, id: UserId) -> Option<User> {
		self.store.record_successful_login(id)
	}

	pub fn create_role(&mut self, request: CreateRole) -> StoreResult<Role> {
		self.store.create_role(request)
	}

	pub fn update_role(&mut self, id: RoleId, patch: RolePatch) -> StoreResult<Option<Role>> {
		self.store.update_role(id, patch)
	}

	pub fn delete_role(&mut self, id: RoleId) -> StoreResult<Option<Role>> {
		self.store.delete_role(id)
	}

	pub fn toggle_permission(
		&mut self,
		role_id: RoleId,
		permission_id: PermissionId,
	) -> StoreResult<Option<PermissionToggle>> {
		self.store.toggle_permission(role_id, permission_id)
	}

	pub fn append_audit_entry(&mut self, entry: AuditLogEntry) -> StoreResult<()> {
		self.store.append_audit_entry(entry)
	}

	/// Shallow-merges one settings section. Invalid patches change nothing.
	pub fn update_section(&mut self, patch: SettingsPatch) -> Result<(), ConfigError> {
		let section = patch.section();
		self.settings.update_section(patch)?;
		self.store
			.set_lock_duration(lockout_duration(&self.settings.security));
		info!(%section, "console settings updated");
		Ok(())
	}

	pub fn subscribe(&mut self, observer: Box<dyn StoreObserver>) -> SubscriptionId {
		self.store.subscribe(observer)
	}

	pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
		self.store.unsubscribe(id)
	}
}

fn lockout_duration(security: &SecuritySettings) -> Duration {
	Duration::minutes(i64::from(security.lockout_duration_minutes))
}

#[cfg(test)]
mod tests {
	use super::*;
	use praxis_config::SecuritySettingsLayer;

	#[test]
	fn failed_logins_follow_security_settings() {
		let mut console = AdminConsole::default();
		console
			.update_section(SettingsPatch::Security(SecuritySettingsLayer {
				max_login_attempts: Some(2),
				lockout_duration_minutes: Some(45),
				..Default::default()
			}))
			.unwrap();

		let user = console.create_user(CreateUser::new("ptaylor")).unwrap();
		console.record_failed_login(user.id).unwrap();
		let locked = console.record_failed_login(user.id).unwrap();
		assert_eq!(locked.status, UserStatus::Locked);
		assert_eq!(console.store().lock_duration(), Duration::minutes(45));
	}

	#[test]
	fn rejected_settings_patch_keeps_lock_duration() {
		let mut console = AdminConsole::default();
		let before = console.store().lock_duration();
		let result = console.update_section(SettingsPatch::Security(SecuritySettingsLayer {
			lockout_duration_minutes: Some(0),
			..Default::default()
		}));
		assert!(result.is_err());
		assert_eq!(console.store().lock_duration(), before);
		assert_eq!(console.settings(), &ConsoleSettings::default());
	}

	#[test]
	fn users_with_status() {
		let mut console = AdminConsole::default();
		let a = console.create_user(CreateUser::new("a")).unwrap();
		console.create_user(CreateUser::new("b")).unwrap();
		console.update_user_status(a.id, UserStatus::Suspended).unwrap();

		let suspended = console.users_with_status(UserStatus::Suspended);
		assert_eq!(suspended.len(), 1);
		assert_eq!(suspended[0].id, a.id);
		assert_eq!(console.users_with_status(UserStatus::Pending).len(), 1);
	}
}
