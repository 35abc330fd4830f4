// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The entity store: single owner of users, roles, permissions and the audit
//! trail.
//!
//! Every mutation either commits completely or leaves state untouched. On
//! commit the affected collection's revision is bumped and observers are
//! notified; rejected mutations never notify.

use chrono::{Duration, Utc};
use praxis_audit::AuditLogEntry;
use praxis_rbac::catalog::{permission_catalog, system_roles};
use praxis_rbac::{
	validate_email, validate_username, Permission, PermissionId, PermissionToggle, Role, RoleId,
	RoleType, User, UserId, UserStatus,
};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::error::{StoreError, StoreResult};
use crate::observer::{Collection, StoreChange, StoreObserver, SubscriptionId};
use crate::patch::{CreateRole, CreateUser, RolePatch, UserPatch};

/// Default lock applied when a user is locked without an explicit expiry.
pub const DEFAULT_LOCK_DURATION_MINUTES: i64 = 30;

/// Per-collection mutation counters.
///
/// A revision only ever increases; two equal revisions mean the collection
/// has not changed in between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Revisions {
	pub users: u64,
	pub roles: u64,
	pub audit_logs: u64,
}

impl Revisions {
	pub fn get(&self, collection: Collection) -> u64 {
		match collection {
			Collection::Users => self.users,
			Collection::Roles => self.roles,
			Collection::AuditLogs => self.audit_logs,
		}
	}

	fn bump(&mut self, collection: Collection) {
		match collection {
			Collection::Users => self.users += 1,
			Collection::Roles => self.roles += 1,
			Collection::AuditLogs => self.audit_logs += 1,
		}
	}
}

pub struct EntityStore {
	users: Vec<User>,
	roles: Vec<Role>,
	permissions: Vec<Permission>,
	/// Newest first.
	audit_logs: Vec<AuditLogEntry>,
	revisions: Revisions,
	observers: Vec<(SubscriptionId, Box<dyn StoreObserver>)>,
	next_subscription: u64,
	lock_duration: Duration,
}

impl Default for EntityStore {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for EntityStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EntityStore")
			.field("users", &self.users.len())
			.field("roles", &self.roles.len())
			.field("permissions", &self.permissions.len())
			.field("audit_logs", &self.audit_logs.len())
			.field("revisions", &self.revisions)
			.field("observers", &self.observers.len())
			.finish()
	}
}

impl EntityStore {
	/// Creates a store seeded with the built-in permission catalog and system roles.
	pub fn new() -> Self {
		Self::with_catalog(permission_catalog(), system_roles())
	}

	/// Creates a store over a given permission reference set and initial roles.
	pub fn with_catalog(permissions: Vec<Permission>, roles: Vec<Role>) -> Self {
		Self {
			users: Vec::new(),
			roles,
			permissions,
			audit_logs: Vec::new(),
			revisions: Revisions::default(),
			observers: Vec::new(),
			next_subscription: 0,
			lock_duration: Duration::minutes(DEFAULT_LOCK_DURATION_MINUTES),
		}
	}

	/// Sets how long a lock lasts when none is given explicitly.
	pub fn set_lock_duration(&mut self, duration: Duration) {
		self.lock_duration = duration;
	}

	pub fn lock_duration(&self) -> Duration {
		self.lock_duration
	}

	pub fn revisions(&self) -> Revisions {
		self.revisions
	}

	// =========================================================================
	// Reads
	// =========================================================================

	pub fn list_users(&self) -> &[User] {
		&self.users
	}

	pub fn get_user(&self, id: UserId) -> Option<&User> {
		self.users.iter().find(|u| u.id == id)
	}

	pub fn list_roles(&self) -> &[Role] {
		&self.roles
	}

	pub fn get_role(&self, id: RoleId) -> Option<&Role> {
		self.roles.iter().find(|r| r.id == id)
	}

	pub fn list_permissions(&self) -> &[Permission] {
		&self.permissions
	}

	pub fn get_permission(&self, id: PermissionId) -> Option<&Permission> {
		self.permissions.iter().find(|p| p.id == id)
	}

	/// Audit entries, newest first.
	pub fn list_audit_logs(&self) -> &[AuditLogEntry] {
		&self.audit_logs
	}

	// =========================================================================
	// Observers
	// =========================================================================

	pub fn subscribe(&mut self, observer: Box<dyn StoreObserver>) -> SubscriptionId {
		let id = SubscriptionId(self.next_subscription);
		self.next_subscription += 1;
		self.observers.push((id, observer));
		debug!(subscription = id.0, "store observer subscribed");
		id
	}

	/// Returns false if the subscription was unknown.
	pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
		let before = self.observers.len();
		self.observers.retain(|(sid, _)| *sid != id);
		self.observers.len() != before
	}

	/// Bumps the changed collection's revision, then notifies observers.
	fn publish(&mut self, change: StoreChange) {
		self.revisions.bump(change.collection());
		for (_, observer) in &self.observers {
			observer.on_change(&change);
		}
	}

	// =========================================================================
	// Users
	// =========================================================================

	/// Creates a user in `pending` status with no failed logins and MFA off.
	/// A request with no roles gets every default role.
	#[instrument(skip(self, request), fields(username = %request.username))]
	pub fn create_user(&mut self, request: CreateUser) -> StoreResult<User> {
		let now = Utc::now();
		let mut role_ids = request.role_ids;
		dedup_in_order(&mut role_ids);
		if role_ids.is_empty() {
			role_ids = self.default_role_ids();
		}

		let user = User {
			id: UserId::generate(),
			username: request.username.trim().to_string(),
			email: request.email.trim().to_string(),
			first_name: request.first_name,
			last_name: request.last_name,
			phone: request.phone,
			title: request.title,
			department: request.department,
			user_type: request.user_type,
			npi: request.npi,
			license_number: request.license_number,
			hire_date: request.hire_date,
			status: UserStatus::Pending,
			login_attempts: 0,
			locked_until: None,
			last_login: None,
			mfa_enabled: request.mfa_enabled,
			mfa_method: request.mfa_method,
			role_ids,
			created_at: now,
			updated_at: now,
		};
		self.validate_user(&user)?;

		self.users.push(user.clone());
		self.refresh_role_user_counts();
		info!(user_id = %user.id, "user created");
		self.publish(StoreChange::UserCreated { user_id: user.id });
		Ok(user)
	}

	/// Applies a field-by-field patch. `Ok(None)` if the user does not exist.
	#[instrument(skip(self, patch), fields(user_id = %id))]
	pub fn update_user(&mut self, id: UserId, patch: UserPatch) -> StoreResult<Option<User>> {
		let Some(index) = self.user_index(id) else {
			debug!("update of unknown user");
			return Ok(None);
		};

		let mut next = self.users[index].clone();
		patch.apply_to(&mut next);
		next.username = next.username.trim().to_string();
		next.email = next.email.trim().to_string();
		dedup_in_order(&mut next.role_ids);
		self.stamp_lock_expiry(&mut next);
		self.validate_user(&next)?;

		Ok(Some(self.commit_user(index, next)))
	}

	/// Removes a user. Audit entries referencing the user are untouched.
	#[instrument(skip(self), fields(user_id = %id))]
	pub fn delete_user(&mut self, id: UserId) -> Option<User> {
		let index = self.user_index(id)?;
		let user = self.users.remove(index);
		self.refresh_role_user_counts();
		info!("user deleted");
		self.publish(StoreChange::UserDeleted { user_id: id });
		Some(user)
	}

	/// Sets the account status. Locking without an expiry applies the
	/// configured lock duration.
	pub fn update_user_status(&mut self, id: UserId, status: UserStatus) -> Option<User> {
		self.modify_user(id, |user| user.status = status)
	}

	/// Reactivates a locked account and clears its failed login counter.
	#[instrument(skip(self), fields(user_id = %id))]
	pub fn unlock_user(&mut self, id: UserId) -> Option<User> {
		self.modify_user(id, |user| {
			user.status = UserStatus::Active;
			user.login_attempts = 0;
			user.locked_until = None;
		})
	}

	/// Counts a failed login; reaching `max_attempts` locks the account for
	/// `lock_duration`.
	#[instrument(skip(self), fields(user_id = %id))]
	pub fn record_failed_login(
		&mut self,
		id: UserId,
		max_attempts: u32,
		lock_duration: Duration,
	) -> Option<User> {
		let user = self.modify_user(id, |user| {
			user.login_attempts = user.login_attempts.saturating_add(1);
			if user.login_attempts >= max_attempts {
				user.status = UserStatus::Locked;
				user.locked_until = Some(Utc::now() + lock_duration);
			}
		})?;
		if user.status == UserStatus::Locked {
			warn!(attempts = user.login_attempts, "account locked after failed logins");
		}
		Some(user)
	}

	/// Resets the failed login counter and stamps `last_login`.
	///
	/// An expired lock is lifted; an unexpired one is left in place.
	pub fn record_successful_login(&mut self, id: UserId) -> Option<User> {
		let now = Utc::now();
		self.modify_user(id, |user| {
			user.login_attempts = 0;
			user.last_login = Some(now);
			if user.status == UserStatus::Locked && !user.is_locked_at(now) {
				user.status = UserStatus::Active;
				user.locked_until = None;
			}
		})
	}

	fn modify_user<F: FnOnce(&mut User)>(&mut self, id: UserId, f: F) -> Option<User> {
		let index = self.user_index(id)?;
		let mut next = self.users[index].clone();
		f(&mut next);
		self.stamp_lock_expiry(&mut next);
		Some(self.commit_user(index, next))
	}

	fn commit_user(&mut self, index: usize, mut user: User) -> User {
		user.updated_at = Utc::now();
		self.users[index] = user.clone();
		self.refresh_role_user_counts();
		debug!(user_id = %user.id, status = %user.status, "user updated");
		self.publish(StoreChange::UserUpdated { user_id: user.id });
		user
	}

	fn stamp_lock_expiry(&self, user: &mut User) {
		match user.status {
			UserStatus::Locked if user.locked_until.is_none() => {
				user.locked_until = Some(Utc::now() + self.lock_duration);
			}
			UserStatus::Locked => {}
			_ => user.locked_until = None,
		}
	}

	fn user_index(&self, id: UserId) -> Option<usize> {
		self.users.iter().position(|u| u.id == id)
	}

	fn validate_user(&self, user: &User) -> StoreResult<()> {
		validate_username(&user.username).map_err(StoreError::validation)?;
		validate_email(&user.email).map_err(StoreError::validation)?;

		let taken = self
			.users
			.iter()
			.any(|u| u.id != user.id && u.username.eq_ignore_ascii_case(&user.username));
		if taken {
			return Err(StoreError::validation(format!(
				"username '{}' is already in use",
				user.username
			)));
		}

		if let Some(missing) = user.role_ids.iter().find(|id| self.get_role(**id).is_none()) {
			return Err(StoreError::validation(format!("unknown role {missing}")));
		}
		Ok(())
	}

	fn default_role_ids(&self) -> Vec<RoleId> {
		self.roles
			.iter()
			.filter(|r| r.is_default)
			.map(|r| r.id)
			.collect()
	}

	/// Recomputes every role's `user_count`; bumps the role revision if any
	/// count changed.
	fn refresh_role_user_counts(&mut self) {
		let mut changed = false;
		for role in &mut self.roles {
			let count = self.users.iter().filter(|u| u.has_role(role.id)).count();
			if role.user_count != count {
				role.user_count = count;
				changed = true;
			}
		}
		if changed {
			self.revisions.bump(Collection::Roles);
		}
	}

	// =========================================================================
	// Roles
	// =========================================================================

	/// Creates a custom role.
	#[instrument(skip(self, request), fields(name = %request.name))]
	pub fn create_role(&mut self, request: CreateRole) -> StoreResult<Role> {
		let now = Utc::now();
		let role = Role {
			id: RoleId::generate(),
			name: request.name.trim().to_string(),
			description: request.description,
			role_type: RoleType::Custom,
			permissions: request.permissions,
			user_count: 0,
			is_default: request.is_default,
			created_at: now,
			updated_at: now,
		};
		self.validate_role(&role)?;

		self.roles.push(role.clone());
		info!(role_id = %role.id, "role created");
		self.publish(StoreChange::RoleCreated { role_id: role.id });
		Ok(role)
	}

	/// Updates role metadata or replaces its permission set.
	///
	/// Changing the permissions of a system role is rejected.
	#[instrument(skip(self, patch), fields(role_id = %id))]
	pub fn update_role(&mut self, id: RoleId, patch: RolePatch) -> StoreResult<Option<Role>> {
		let Some(index) = self.role_index(id) else {
			debug!("update of unknown role");
			return Ok(None);
		};

		let current = &self.roles[index];
		if current.is_system() && patch.changes_permissions(current) {
			warn!("rejected permission change on system role");
			return Err(StoreError::invariant(format!(
				"system role '{}' is immutable",
				current.name
			)));
		}

		let mut next = current.clone();
		patch.apply_to(&mut next);
		next.name = next.name.trim().to_string();
		self.validate_role(&next)?;

		next.updated_at = Utc::now();
		self.roles[index] = next.clone();
		debug!("role updated");
		self.publish(StoreChange::RoleUpdated { role_id: id });
		Ok(Some(next))
	}

	/// Deletes a custom role that no user holds.
	#[instrument(skip(self), fields(role_id = %id))]
	pub fn delete_role(&mut self, id: RoleId) -> StoreResult<Option<Role>> {
		let Some(index) = self.role_index(id) else {
			return Ok(None);
		};

		let role = &self.roles[index];
		if !role.is_deletable() {
			let reason = if role.is_system() {
				warn!("rejected deletion of system role");
				format!("system role '{}' cannot be deleted", role.name)
			} else {
				warn!(user_count = role.user_count, "rejected deletion of assigned role");
				format!("role '{}' is assigned to {} user(s)", role.name, role.user_count)
			};
			return Err(StoreError::invariant(reason));
		}
		let role = self.roles.remove(index);
		info!("role deleted");
		self.publish(StoreChange::RoleDeleted { role_id: id });
		Ok(Some(role))
	}

	/// Grants the permission if the role lacks it, revokes it otherwise.
	///
	/// `Ok(None)` if the role or (for a custom role) the permission is unknown.
	#[instrument(skip(self), fields(role_id = %role_id, permission_id = %permission_id))]
	pub fn toggle_permission(
		&mut self,
		role_id: RoleId,
		permission_id: PermissionId,
	) -> StoreResult<Option<PermissionToggle>> {
		let Some(index) = self.role_index(role_id) else {
			return Ok(None);
		};
		let known = self.get_permission(permission_id).is_some();

		let role = &mut self.roles[index];
		if !known && !role.is_system() {
			return Ok(None);
		}
		let toggle = praxis_rbac::toggle_permission(role, permission_id).map_err(|e| {
			warn!(error = %e, "rejected permission toggle");
			StoreError::from(e)
		})?;
		role.updated_at = Utc::now();

		debug!(?toggle, "permission toggled");
		self.publish(StoreChange::PermissionToggled {
			role_id,
			permission_id,
			toggle,
		});
		Ok(Some(toggle))
	}

	fn role_index(&self, id: RoleId) -> Option<usize> {
		self.roles.iter().position(|r| r.id == id)
	}

	fn validate_role(&self, role: &Role) -> StoreResult<()> {
		if role.name.is_empty() {
			return Err(StoreError::validation("Role name is required"));
		}
		let taken = self
			.roles
			.iter()
			.any(|r| r.id != role.id && r.name.eq_ignore_ascii_case(&role.name));
		if taken {
			return Err(StoreError::validation(format!(
				"role name '{}' is already in use",
				role.name
			)));
		}
		if let Some(missing) = role
			.permissions
			.iter()
			.find(|id| self.get_permission(**id).is_none())
		{
			return Err(StoreError::validation(format!(
				"unknown permission {missing}"
			)));
		}
		Ok(())
	}

	// =========================================================================
	// Audit
	// =========================================================================

	/// Appends an audit entry, keeping the log newest first.
	///
	/// An entry goes before any existing entry with an equal or older
	/// timestamp.
	#[instrument(skip(self, entry), fields(entry_id = %entry.id, action = %entry.action))]
	pub fn append_audit_entry(&mut self, entry: AuditLogEntry) -> StoreResult<()> {
		entry.validate()?;
		if self.audit_logs.iter().any(|e| e.id == entry.id) {
			return Err(StoreError::validation(format!(
				"audit entry {} already recorded",
				entry.id
			)));
		}

		let position = self
			.audit_logs
			.partition_point(|e| e.timestamp > entry.timestamp);
		let entry_id = entry.id;
		self.audit_logs.insert(position, entry);
		debug!(position, "audit entry appended");
		self.publish(StoreChange::AuditEntryAppended { entry_id });
		Ok(())
	}
}

fn dedup_in_order<T: PartialEq + Copy>(items: &mut Vec<T>) {
	let mut seen: Vec<T> = Vec::with_capacity(items.len());
	items.retain(|item| {
		if seen.contains(item) {
			false
		} else {
			seen.push(*item);
			true
		}
	});
}
