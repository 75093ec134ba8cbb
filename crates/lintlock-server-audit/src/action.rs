// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Business actions recorded in the audit log.
//!
//! Every action has two string forms:
//!
//! - the raw identifier (`MACHINE_DELETED`), which is what gets persisted
//!   and what [`std::fmt::Display`] / [`std::str::FromStr`] speak;
//! - a short display label ("Machine Removed") for UI filters, with a
//!   reverse lookup so a label picked in the UI can be turned back into an
//!   [`ActionKind`] when querying persisted records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A business action a collaborator can report to the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
	// Account events
	UserLogin,
	UserLogout,
	UserRegistered,
	UserUpdated,
	UserEmailUpdated,
	UserPasswordUpdated,
	UserTaskRemindersUpdated,
	PasswordResetRequested,
	PasswordReset,
	PhoneUpdated,
	ProfileNameUpdated,

	// Maintenance task events
	TaskAdded,
	TaskCompleted,
	TaskStatusUpdated,
	TaskUpdated,
	TaskCancelled,
	MaintenanceLogCreated,
	UpdateLog,

	// Machine events
	MachineCreated,
	MachineAdded,
	MachineUpdated,
	MachineDeleted,

	// Store events
	StoreCreated,
	StoreUpdated,
	OperatingHoursUpdated,

	// Invitation events
	InviteSent,
	InviteCompleted,
	InviteEmailResend,

	ImageDeleted,

	// Subscription events
	SubscriptionUpgraded,
	SubscriptionPlanCreated,
	SubscriptionPlanUpdated,
	SubscriptionPlanDeleted,
	SubscriptionOverridden,
	SubscriptionReinstated,

	RemoveTechnicianFromStore,

	// Task request events
	TaskRequestCreated,
	TaskRequestUpdated,
	TaskRequestStatusUpdated,
	RequestApproved,
	RequestRejected,
}

impl ActionKind {
	/// Every action, in declaration order. Declaration order is load-bearing
	/// for [`ActionKind::from_label`]: labels are not unique and the first
	/// declared action wins.
	pub const ALL: [ActionKind; 41] = [
		ActionKind::UserLogin,
		ActionKind::UserLogout,
		ActionKind::UserRegistered,
		ActionKind::UserUpdated,
		ActionKind::UserEmailUpdated,
		ActionKind::UserPasswordUpdated,
		ActionKind::UserTaskRemindersUpdated,
		ActionKind::PasswordResetRequested,
		ActionKind::PasswordReset,
		ActionKind::PhoneUpdated,
		ActionKind::ProfileNameUpdated,
		ActionKind::TaskAdded,
		ActionKind::TaskCompleted,
		ActionKind::TaskStatusUpdated,
		ActionKind::TaskUpdated,
		ActionKind::TaskCancelled,
		ActionKind::MaintenanceLogCreated,
		ActionKind::UpdateLog,
		ActionKind::MachineCreated,
		ActionKind::MachineAdded,
		ActionKind::MachineUpdated,
		ActionKind::MachineDeleted,
		ActionKind::StoreCreated,
		ActionKind::StoreUpdated,
		ActionKind::OperatingHoursUpdated,
		ActionKind::InviteSent,
		ActionKind::InviteCompleted,
		ActionKind::InviteEmailResend,
		ActionKind::ImageDeleted,
		ActionKind::SubscriptionUpgraded,
		ActionKind::SubscriptionPlanCreated,
		ActionKind::SubscriptionPlanUpdated,
		ActionKind::SubscriptionPlanDeleted,
		ActionKind::SubscriptionOverridden,
		ActionKind::SubscriptionReinstated,
		ActionKind::RemoveTechnicianFromStore,
		ActionKind::TaskRequestCreated,
		ActionKind::TaskRequestUpdated,
		ActionKind::TaskRequestStatusUpdated,
		ActionKind::RequestApproved,
		ActionKind::RequestRejected,
	];

	/// The raw identifier, as persisted in the audit store.
	pub fn as_str(&self) -> &'static str {
		match self {
			ActionKind::UserLogin => "USER_LOGIN",
			ActionKind::UserLogout => "USER_LOGOUT",
			ActionKind::UserRegistered => "USER_REGISTERED",
			ActionKind::UserUpdated => "USER_UPDATED",
			ActionKind::UserEmailUpdated => "USER_EMAIL_UPDATED",
			ActionKind::UserPasswordUpdated => "USER_PASSWORD_UPDATED",
			ActionKind::UserTaskRemindersUpdated => "USER_TASK_REMINDERS_UPDATED",
			ActionKind::PasswordResetRequested => "PASSWORD_RESET_REQUESTED",
			ActionKind::PasswordReset => "PASSWORD_RESET",
			ActionKind::PhoneUpdated => "PHONE_UPDATED",
			ActionKind::ProfileNameUpdated => "PROFILE_NAME_UPDATED",
			ActionKind::TaskAdded => "TASK_ADDED",
			ActionKind::TaskCompleted => "TASK_COMPLETED",
			ActionKind::TaskStatusUpdated => "TASK_STATUS_UPDATED",
			ActionKind::TaskUpdated => "TASK_UPDATED",
			ActionKind::TaskCancelled => "TASK_CANCELLED",
			ActionKind::MaintenanceLogCreated => "MAINTENANCE_LOG_CREATED",
			ActionKind::UpdateLog => "UPDATE_LOG",
			ActionKind::MachineCreated => "MACHINE_CREATED",
			ActionKind::MachineAdded => "MACHINE_ADDED",
			ActionKind::MachineUpdated => "MACHINE_UPDATED",
			ActionKind::MachineDeleted => "MACHINE_DELETED",
			ActionKind::StoreCreated => "STORE_CREATED",
			ActionKind::StoreUpdated => "STORE_UPDATED",
			ActionKind::OperatingHoursUpdated => "OPERATING_HOURS_UPDATED",
			ActionKind::InviteSent => "INVITE_SENT",
			ActionKind::InviteCompleted => "INVITE_COMPLETED",
			ActionKind::InviteEmailResend => "INVITE_EMAIL_RESEND",
			ActionKind::ImageDeleted => "IMAGE_DELETED",
			ActionKind::SubscriptionUpgraded => "SUBSCRIPTION_UPGRADED",
			ActionKind::SubscriptionPlanCreated => "SUBSCRIPTION_PLAN_CREATED",
			ActionKind::SubscriptionPlanUpdated => "SUBSCRIPTION_PLAN_UPDATED",
			ActionKind::SubscriptionPlanDeleted => "SUBSCRIPTION_PLAN_DELETED",
			ActionKind::SubscriptionOverridden => "SUBSCRIPTION_OVERRIDDEN",
			ActionKind::SubscriptionReinstated => "SUBSCRIPTION_REINSTATED",
			ActionKind::RemoveTechnicianFromStore => "REMOVE_TECHNICIAN_FROM_STORE",
			ActionKind::TaskRequestCreated => "TASK_REQUEST_CREATED",
			ActionKind::TaskRequestUpdated => "TASK_REQUEST_UPDATED",
			ActionKind::TaskRequestStatusUpdated => "TASK_REQUEST_STATUS_UPDATED",
			ActionKind::RequestApproved => "REQUEST_APPROVED",
			ActionKind::RequestRejected => "REQUEST_REJECTED",
		}
	}

	/// Short human label shown in UI filters and search dropdowns.
	pub fn label(&self) -> &'static str {
		match self {
			ActionKind::UserLogin => "User Login",
			ActionKind::UserLogout => "User Logout",
			ActionKind::UserRegistered => "User Registered",
			ActionKind::UserUpdated => "Profile Edited",
			ActionKind::UserEmailUpdated => "Email Updated",
			ActionKind::UserPasswordUpdated => "Password Changed",
			ActionKind::UserTaskRemindersUpdated => "Reminders Updated",
			ActionKind::PasswordResetRequested => "Reset Requested",
			ActionKind::PasswordReset => "Password Reset",
			ActionKind::PhoneUpdated => "Phone Updated",
			ActionKind::ProfileNameUpdated => "Name Updated",
			ActionKind::TaskAdded => "Task Added",
			ActionKind::TaskCompleted => "Task Completed",
			ActionKind::TaskStatusUpdated => "Status Updated",
			ActionKind::TaskUpdated => "Task Updated",
			ActionKind::TaskCancelled => "Task Cancelled",
			ActionKind::MaintenanceLogCreated => "Log Created",
			ActionKind::UpdateLog => "Log Updated",
			ActionKind::MachineCreated => "Machine Added",
			ActionKind::MachineAdded => "Machine Added",
			ActionKind::MachineUpdated => "Machine Updated",
			ActionKind::MachineDeleted => "Machine Removed",
			ActionKind::StoreCreated => "Store Created",
			ActionKind::StoreUpdated => "Store Updated",
			ActionKind::OperatingHoursUpdated => "Hours Updated",
			ActionKind::InviteSent => "Invite Sent",
			ActionKind::InviteCompleted => "Invite Completed",
			ActionKind::InviteEmailResend => "Invite Resent",
			ActionKind::ImageDeleted => "Image Deleted",
			ActionKind::SubscriptionUpgraded => "Plan Upgraded",
			ActionKind::SubscriptionPlanCreated => "Plan Created",
			ActionKind::SubscriptionPlanUpdated => "Plan Updated",
			ActionKind::SubscriptionPlanDeleted => "Plan Deleted",
			ActionKind::SubscriptionOverridden => "Plan Overridden",
			ActionKind::SubscriptionReinstated => "Plan Reinstated",
			ActionKind::RemoveTechnicianFromStore => "Technician Removed",
			ActionKind::TaskRequestCreated => "Request Created",
			ActionKind::TaskRequestUpdated => "Request Updated",
			ActionKind::TaskRequestStatusUpdated => "Status Updated",
			ActionKind::RequestApproved => "Request Approved",
			ActionKind::RequestRejected => "Request Rejected",
		}
	}

	/// Reverse lookup of [`ActionKind::label`]. Labels are not unique
	/// ("Machine Added", "Status Updated"); the first declared action wins.
	pub fn from_label(label: &str) -> Option<ActionKind> {
		Self::ALL.iter().copied().find(|kind| kind.label() == label)
	}

	/// Resolve a UI filter value that may be either a display label or a
	/// raw identifier.
	pub fn resolve(value: &str) -> Option<ActionKind> {
		Self::from_label(value).or_else(|| value.parse().ok())
	}
}

impl fmt::Display for ActionKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ActionKind {
	type Err = UnknownAction;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.iter()
			.copied()
			.find(|kind| kind.as_str() == s)
			.ok_or_else(|| UnknownAction(s.to_string()))
	}
}

/// Error returned when parsing an unrecognized action identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown action: {0}")]
pub struct UnknownAction(pub String);
