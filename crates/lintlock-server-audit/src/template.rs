// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Human-readable description templates, one per auditable action.
//!
//! [`render`] is a pure lookup: it returns `None` for actions without a
//! template and the caller applies the fallback chain (explicit
//! `description` metadata, then the raw action name). Templates never fail:
//! a missing metadata field renders as empty text.

use std::borrow::Cow;

use serde_json::Value;

use crate::action::ActionKind;
use crate::event::Metadata;

/// Render the description template registered for `action`, or `None` when
/// the action has no template.
pub fn render(action: ActionKind, md: &Metadata) -> Option<String> {
	let rendered = match action {
		ActionKind::UserLogin => format!("User {} logged in", text(md, "email")),
		ActionKind::UserLogout => format!("User {} logged out", text(md, "email")),
		ActionKind::UserRegistered => format!("Registered new user {}", text(md, "email")),
		ActionKind::UserUpdated => format!("Updated user {}", text(md, "email")),
		ActionKind::UserEmailUpdated => format!("Updated user email to {}", text(md, "email")),
		ActionKind::UserPasswordUpdated => format!("User {} changed password", text(md, "email")),
		ActionKind::UserTaskRemindersUpdated => format!(
			"User {} set task reminders to {}",
			text(md, "email"),
			text(md, "value")
		),
		ActionKind::PasswordResetRequested => {
			format!("Password reset requested for {}", text(md, "email"))
		}
		ActionKind::PasswordReset => format!("Password reset for {}", text(md, "email")),
		ActionKind::PhoneUpdated => format!(
			"Updated phone number from {} to {} for {}",
			text(md, "oldPhone"),
			text(md, "newPhone"),
			text(md, "targetUser")
		),
		ActionKind::ProfileNameUpdated => format!(
			"Changed profile name from \"{}\" to \"{}\"",
			text(md, "oldName"),
			text(md, "newName")
		),
		ActionKind::TaskAdded => format!(
			"Created task \"{}\" for machine \"{}\"",
			text(md, "taskName"),
			text(md, "machineName")
		),
		ActionKind::TaskCompleted => format!(
			"Marked {}'s task \"{}\" as complete.",
			text(md, "machineName"),
			text(md, "taskId")
		),
		ActionKind::TaskStatusUpdated => format!(
			"Updated task {} status to \"{}\"",
			text(md, "taskId"),
			text(md, "status")
		),
		ActionKind::TaskUpdated => {
			with_detail_suffixes(format!("Updated maintenance \"{}\"", text(md, "name")), md)
		}
		ActionKind::TaskCancelled => format!(
			"Cancelled \"{}\" for machine \"{}\"",
			text(md, "taskName"),
			text(md, "machineName")
		),
		ActionKind::MaintenanceLogCreated => {
			format!("Created maintenance log for task {}", text(md, "task"))
		}
		ActionKind::UpdateLog => {
			with_detail_suffixes(format!("Updated Log \"{}\"", text(md, "logEntry")), md)
		}
		ActionKind::MachineCreated | ActionKind::MachineAdded => format!(
			"Added new machine \"{}\" (ID: {})",
			text(md, "machineName"),
			text(md, "machineId")
		),
		ActionKind::MachineUpdated => format!("Updated machine (ID: {})", text(md, "machineId")),
		ActionKind::MachineDeleted => format!("Deleted machine {}", text(md, "machineId")),
		ActionKind::StoreCreated => format!("Created store \"{}\"", text(md, "storeName")),
		ActionKind::StoreUpdated => format!("Updated store \"{}\"", text(md, "storeName")),
		ActionKind::OperatingHoursUpdated => {
			format!("Updated operating hours for {}", text(md, "storeName"))
		}
		ActionKind::InviteSent => format!(
			"Sent invitation to {} to join {}",
			text(md, "email"),
			text(md, "storeName")
		),
		ActionKind::InviteCompleted => format!(
			"Completed invitation for {} and added to {}",
			text(md, "email"),
			text(md, "storeName")
		),
		ActionKind::InviteEmailResend => format!(
			"Resent invitation email to {} for {}",
			text(md, "email"),
			text(md, "storeName")
		),
		ActionKind::ImageDeleted => format!(
			"Deleted ({}) image for \"{}\"",
			text(md, "imageType"),
			text(md, "name")
		),
		ActionKind::SubscriptionUpgraded => {
			format!("Upgraded subscription to {}", text(md, "planName"))
		}
		ActionKind::SubscriptionPlanCreated => {
			format!("Created subscription plan {}", text(md, "planName"))
		}
		ActionKind::SubscriptionPlanUpdated => {
			format!("Updated subscription plan {}", text(md, "planName"))
		}
		ActionKind::SubscriptionPlanDeleted => {
			format!("Deleted subscription plan {}", text(md, "planName"))
		}
		ActionKind::SubscriptionOverridden => format!(
			"Admin overrode subscription for user \"{}\"",
			text(md, "userName")
		),
		ActionKind::SubscriptionReinstated => format!(
			"Admin reinstated subscription for user \"{}\"",
			text(md, "userName")
		),
		ActionKind::RemoveTechnicianFromStore => format!(
			"Removed technician \"{}\" from store \"{}\"",
			text(md, "technician"),
			text(md, "storeName")
		),
		ActionKind::TaskRequestCreated => format!(
			"Created task request \"{}\" for machine \"{}\"",
			text(md, "task"),
			text(md, "machineName")
		),
		ActionKind::TaskRequestUpdated => {
			with_detail_suffixes(format!("Updated task request \"{}\"", text(md, "id")), md)
		}
		ActionKind::RequestApproved => format!("Approved task request \"{}\"", text(md, "task")),
		ActionKind::RequestRejected => format!("Rejected task request \"{}\"", text(md, "task")),

		ActionKind::TaskRequestStatusUpdated => return None,
	};
	Some(rendered)
}

/// Append the optional `(field: "old" → "new", ...)` and
/// `with N new image(s)` segments used by the update-style templates.
fn with_detail_suffixes(mut out: String, md: &Metadata) -> String {
	if let Some(changes) = change_summary(md) {
		out.push_str(" (");
		out.push_str(&changes);
		out.push(')');
	}
	if let Some(count) = md.get("imagesAdded").and_then(Value::as_u64).filter(|n| *n > 0) {
		out.push_str(&format!(" with {count} new image(s)"));
	}
	out
}

/// Summarize a `changes` mapping of `{field: {old, new}}` pairs as
/// `field: "old" → "new"`, comma-joined. `None` when absent or empty.
fn change_summary(md: &Metadata) -> Option<String> {
	let changes = md.get("changes")?.as_object()?;
	if changes.is_empty() {
		return None;
	}

	let summary = changes
		.iter()
		.map(|(field, diff)| {
			format!(
				"{field}: \"{}\" → \"{}\"",
				diff.get("old").map(value_text).unwrap_or(Cow::Borrowed("")),
				diff.get("new").map(value_text).unwrap_or(Cow::Borrowed(""))
			)
		})
		.collect::<Vec<_>>()
		.join(", ");
	Some(summary)
}

fn text<'a>(md: &'a Metadata, key: &str) -> Cow<'a, str> {
	md.get(key).map(value_text).unwrap_or(Cow::Borrowed(""))
}

fn value_text(value: &Value) -> Cow<'_, str> {
	match value {
		Value::String(s) => Cow::Borrowed(s.as_str()),
		Value::Null => Cow::Borrowed(""),
		other => Cow::Owned(other.to_string()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn md(value: serde_json::Value) -> Metadata {
		value.as_object().cloned().unwrap_or_default()
	}

	#[test]
	fn renders_machine_created() {
		let rendered = render(
			ActionKind::MachineCreated,
			&md(json!({"machineId": "M-01", "machineName": "Acme Washer"})),
		);
		assert_eq!(
			rendered.as_deref(),
			Some("Added new machine \"Acme Washer\" (ID: M-01)")
		);
	}

	#[test]
	fn machine_added_and_created_share_a_template() {
		let metadata = md(json!({"machineId": "M-02", "machineName": "Dryer"}));
		assert_eq!(
			render(ActionKind::MachineAdded, &metadata),
			render(ActionKind::MachineCreated, &metadata)
		);
	}

	#[test]
	fn untemplated_action_returns_none() {
		assert_eq!(
			render(ActionKind::TaskRequestStatusUpdated, &Metadata::new()),
			None
		);
	}

	#[test]
	fn every_other_action_has_a_template() {
		for kind in ActionKind::ALL {
			if kind == ActionKind::TaskRequestStatusUpdated {
				continue;
			}
			assert!(
				render(kind, &Metadata::new()).is_some(),
				"{kind} has no template"
			);
		}
	}

	#[test]
	fn missing_fields_render_as_empty_text() {
		let rendered = render(ActionKind::TaskAdded, &Metadata::new()).unwrap();
		assert_eq!(rendered, "Created task \"\" for machine \"\"");
	}

	#[test]
	fn numeric_fields_are_interpolated() {
		let rendered = render(
			ActionKind::TaskStatusUpdated,
			&md(json!({"taskId": 42, "status": "done"})),
		)
		.unwrap();
		assert_eq!(rendered, "Updated task 42 status to \"done\"");
	}

	mod change_summaries {
		use super::*;

		#[test]
		fn task_updated_with_changes_and_images() {
			let rendered = render(
				ActionKind::TaskUpdated,
				&md(json!({
					"name": "Filter swap",
					"changes": {"status": {"old": "open", "new": "done"}},
					"imagesAdded": 2
				})),
			)
			.unwrap();
			assert_eq!(
				rendered,
				"Updated maintenance \"Filter swap\" (status: \"open\" → \"done\") with 2 new image(s)"
			);
		}

		#[test]
		fn parenthetical_omitted_without_changes() {
			let rendered =
				render(ActionKind::TaskUpdated, &md(json!({"name": "Filter swap"}))).unwrap();
			assert_eq!(rendered, "Updated maintenance \"Filter swap\"");
		}

		#[test]
		fn parenthetical_omitted_for_empty_changes() {
			let rendered = render(
				ActionKind::UpdateLog,
				&md(json!({"logEntry": "L-9", "changes": {}})),
			)
			.unwrap();
			assert_eq!(rendered, "Updated Log \"L-9\"");
		}

		#[test]
		fn image_suffix_omitted_for_zero() {
			let rendered = render(
				ActionKind::TaskRequestUpdated,
				&md(json!({"id": "R-1", "imagesAdded": 0})),
			)
			.unwrap();
			assert_eq!(rendered, "Updated task request \"R-1\"");
		}

		#[test]
		fn multiple_changes_are_comma_joined() {
			// serde_json maps iterate in key order, so the summary is
			// deterministic
			let rendered = render(
				ActionKind::TaskUpdated,
				&md(json!({
					"name": "Belt check",
					"changes": {
						"priority": {"old": "low", "new": "high"},
						"status": {"old": "open", "new": "done"}
					}
				})),
			)
			.unwrap();
			assert_eq!(
				rendered,
				"Updated maintenance \"Belt check\" (priority: \"low\" → \"high\", status: \"open\" → \"done\")"
			);
		}

		#[test]
		fn half_open_diffs_render_empty_sides() {
			let rendered = render(
				ActionKind::UpdateLog,
				&md(json!({"logEntry": "L-1", "changes": {"notes": {"new": "tightened"}}})),
			)
			.unwrap();
			assert_eq!(rendered, "Updated Log \"L-1\" (notes: \"\" → \"tightened\")");
		}
	}
}
