// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Praxis CLI - inspect the practice admin console from a terminal.
//!
//! Loads the layered console configuration, seeds the demo practice into a
//! fresh in-memory console and prints the requested read model as a table or
//! as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use praxis_audit::{
	AuditAction, AuditLogFilter, AuditModule, AuditSeverity, AuditSort, AuditSortField,
	SortDirection,
};
use praxis_config::{LogFormat, LoggingConfig};
use praxis_rbac::{PermissionCategory, User, UserId, UserStatus};
use praxis_store::AdminConsole;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod demo;
mod output;
mod version;

use output::{OutputFormat, SummaryReport};

/// Praxis - practice admin console
#[derive(Parser, Debug)]
#[command(name = "praxis", version, about, long_about = None)]
struct Args {
	/// Path to a console configuration file
	#[arg(short, long, env = "PRAXIS_CONFIG")]
	config: Option<PathBuf>,

	/// Output format
	#[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
	format: OutputFormat,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// User, role and audit totals
	Summary,
	/// List users
	Users {
		/// Only users with this status
		#[arg(long, value_parser = parse_enum::<UserStatus>)]
		status: Option<UserStatus>,
	},
	/// List roles with permission and member counts
	Roles,
	/// Show the permission matrix
	Matrix {
		/// Only this permission category
		#[arg(long, value_parser = parse_enum::<PermissionCategory>)]
		category: Option<PermissionCategory>,
	},
	/// Query the audit log
	Audit(AuditArgs),
	/// Show the resolved console settings
	Settings,
	/// Show version and build information
	Version,
}

#[derive(clap::Args, Debug)]
struct AuditArgs {
	/// Keep entries with any of these severities
	#[arg(long, value_delimiter = ',', value_parser = parse_enum::<AuditSeverity>)]
	severity: Vec<AuditSeverity>,

	/// Keep entries with any of these actions
	#[arg(long, value_delimiter = ',', value_parser = parse_enum::<AuditAction>)]
	action: Vec<AuditAction>,

	/// Keep entries from any of these modules
	#[arg(long, value_delimiter = ',', value_parser = parse_enum::<AuditModule>)]
	module: Vec<AuditModule>,

	/// Only entries by this username
	#[arg(long)]
	user: Option<String>,

	/// Only failed operations
	#[arg(long)]
	failed: bool,

	/// Case-insensitive text search
	#[arg(short, long)]
	search: Option<String>,

	/// Entries at or after this RFC 3339 time
	#[arg(long)]
	since: Option<DateTime<Utc>>,

	/// Entries at or before this RFC 3339 time
	#[arg(long)]
	until: Option<DateTime<Utc>>,

	/// Sort key
	#[arg(long, default_value = "timestamp", value_parser = parse_enum::<AuditSortField>)]
	sort: AuditSortField,

	/// Sort ascending instead of descending
	#[arg(long)]
	asc: bool,

	/// Maximum number of entries to print
	#[arg(short, long)]
	limit: Option<usize>,
}

impl AuditArgs {
	fn filter(&self, console: &AdminConsole) -> Result<AuditLogFilter> {
		let user_id = self
			.user
			.as_deref()
			.map(|username| find_user(console, username))
			.transpose()?;

		Ok(AuditLogFilter {
			start_date: self.since,
			end_date: self.until,
			user_id,
			actions: non_empty(&self.action),
			severities: non_empty(&self.severity),
			modules: non_empty(&self.module),
			success: self.failed.then_some(false),
			search: self.search.clone(),
		})
	}

	fn sort(&self) -> AuditSort {
		let direction = if self.asc {
			SortDirection::Ascending
		} else {
			SortDirection::Descending
		};
		AuditSort::new(self.sort, direction)
	}
}

fn non_empty<T: Clone>(values: &[T]) -> Option<Vec<T>> {
	(!values.is_empty()).then(|| values.to_vec())
}

fn find_user(console: &AdminConsole, username: &str) -> Result<UserId> {
	console
		.list_users()
		.iter()
		.find(|u| u.username.eq_ignore_ascii_case(username))
		.map(|u| u.id)
		.with_context(|| format!("no user named '{username}'"))
}

/// Parses a snake_case enum value the way it is serialized, accepting dashes.
fn parse_enum<T: DeserializeOwned>(value: &str) -> Result<T, String> {
	let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
	serde_json::from_value(serde_json::Value::String(normalized))
		.map_err(|_| format!("unrecognized value '{value}'"))
}

fn init_tracing(logging: &LoggingConfig) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

	match logging.format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().with_writer(std::io::stderr))
				.init();
		}
	}
}

fn emit<T: Serialize + ?Sized>(
	format: OutputFormat,
	value: &T,
	table: impl FnOnce(&T) -> String,
) -> Result<String> {
	match format {
		OutputFormat::Json => output::to_json(value),
		OutputFormat::Table => Ok(table(value)),
	}
}

fn run(console: &AdminConsole, command: &Command, format: OutputFormat) -> Result<String> {
	match command {
		Command::Summary => {
			let report = SummaryReport {
				users: console.user_counts(),
				roles: console.role_counts(),
				audit: console.audit_summary(),
			};
			emit(format, &report, output::render_summary)
		}
		Command::Users { status } => {
			let users: Vec<&User> = match status {
				Some(status) => console.users_with_status(*status),
				None => console.list_users().iter().collect(),
			};
			emit(format, &users, |users| {
				output::render_users(users, console.list_roles())
			})
		}
		Command::Roles => emit(format, console.list_roles(), output::render_roles),
		Command::Matrix { category } => {
			let mut matrix = console.permission_matrix();
			if let Some(category) = category {
				matrix.categories.retain(|group| group.category == *category);
			}
			emit(format, &matrix, output::render_matrix)
		}
		Command::Audit(audit) => {
			let filter = audit.filter(console)?;
			let mut entries = console.sorted_audit_logs(&filter, audit.sort());
			if let Some(limit) = audit.limit {
				entries.truncate(limit);
			}
			debug!(matched = entries.len(), "audit query complete");
			emit(format, &entries, |entries| output::render_audit(entries))
		}
		Command::Settings => match format {
			OutputFormat::Json => output::to_json(console.settings()),
			OutputFormat::Table => output::render_settings(console.settings()),
		},
		Command::Version => Ok(format!("{}\n", version::format_version_info())),
	}
}

fn main() -> Result<()> {
	let args = Args::parse();

	// Handle subcommands that do not need configuration
	if let Command::Version = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	let config = match &args.config {
		Some(path) => praxis_config::load_config_with_file(path.clone()),
		None => praxis_config::load_config(),
	}
	.context("failed to load configuration")?;

	init_tracing(&config.logging);
	info!(format = ?args.format, "starting praxis");

	let mut console = AdminConsole::new(config.settings);
	demo::seed(&mut console).context("failed to seed demo dataset")?;

	let rendered = run(&console, &args.command, args.format)?;
	print!("{rendered}");
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	fn seeded() -> AdminConsole {
		let mut console = AdminConsole::default();
		demo::seed(&mut console).unwrap();
		console
	}

	fn audit_args(argv: &[&str]) -> AuditArgs {
		let mut full = vec!["praxis", "audit"];
		full.extend_from_slice(argv);
		match Args::try_parse_from(full).unwrap().command {
			Command::Audit(args) => args,
			other => panic!("expected audit command, got {other:?}"),
		}
	}

	#[test]
	fn cli_definition_is_valid() {
		Args::command().debug_assert();
	}

	#[test]
	fn parse_enum_accepts_dashes_and_case() {
		assert_eq!(
			parse_enum::<AuditAction>("Login-Failed"),
			Ok(AuditAction::LoginFailed)
		);
		assert_eq!(parse_enum::<UserStatus>("locked"), Ok(UserStatus::Locked));
		assert!(parse_enum::<AuditSeverity>("severe").is_err());
	}

	#[test]
	fn audit_flags_build_filter() {
		let console = seeded();
		let args = audit_args(&[
			"--severity",
			"high,critical",
			"--module",
			"patients",
			"--failed",
			"--user",
			"dr.okafor",
		]);
		let filter = args.filter(&console).unwrap();
		assert_eq!(
			filter.severities,
			Some(vec![AuditSeverity::High, AuditSeverity::Critical])
		);
		assert_eq!(filter.modules, Some(vec![AuditModule::Patients]));
		assert_eq!(filter.success, Some(false));
		assert!(filter.actions.is_none());
		assert_eq!(console.filter_audit_logs(&filter).len(), 1);
	}

	#[test]
	fn unknown_audit_user_is_an_error() {
		let console = seeded();
		let args = audit_args(&["--user", "nobody"]);
		assert!(args.filter(&console).is_err());
	}

	#[test]
	fn audit_sort_and_limit() {
		let console = seeded();
		let args = audit_args(&["--sort", "severity", "--limit", "3"]);
		assert_eq!(
			args.sort(),
			AuditSort::new(AuditSortField::Severity, SortDirection::Descending)
		);

		let out = run(&console, &Command::Audit(args), OutputFormat::Json).unwrap();
		let entries: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
		assert_eq!(entries.len(), 3);
		assert_eq!(entries[0]["severity"], "critical");
	}

	#[test]
	fn critical_audit_table() {
		let console = seeded();
		let args = audit_args(&["--severity", "critical"]);
		let out = run(&console, &Command::Audit(args), OutputFormat::Table).unwrap();
		assert_eq!(out.lines().count(), 3);
		assert!(out.contains("Account locked after repeated failed logins"));
	}

	#[test]
	fn summary_json_matches_console() {
		let console = seeded();
		let out = run(&console, &Command::Summary, OutputFormat::Json).unwrap();
		let report: serde_json::Value = serde_json::from_str(&out).unwrap();
		assert_eq!(
			report["audit"]["total_events"],
			console.audit_summary().total_events
		);
		assert_eq!(report["users"]["active"], 6);
		assert_eq!(report["roles"]["custom"], 1);
	}

	#[test]
	fn users_by_status() {
		let console = seeded();
		let out = run(
			&console,
			&Command::Users {
				status: Some(UserStatus::Locked),
			},
			OutputFormat::Table,
		)
		.unwrap();
		assert!(out.contains("billing.moreau"));
		assert!(!out.contains("dr.chen"));
	}

	#[test]
	fn matrix_category_filter() {
		let console = seeded();
		let out = run(
			&console,
			&Command::Matrix {
				category: Some(PermissionCategory::Billing),
			},
			OutputFormat::Table,
		)
		.unwrap();
		assert!(out.contains("[billing]"));
		assert!(!out.contains("[patients]"));
	}

	#[test]
	fn global_format_flag_after_subcommand() {
		let args = Args::try_parse_from(["praxis", "roles", "--format", "json"]).unwrap();
		assert_eq!(args.format, OutputFormat::Json);
	}
}
