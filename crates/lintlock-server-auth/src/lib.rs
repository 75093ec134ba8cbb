// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication boundary types for the LintLock server.
//!
//! This crate exposes the types the rest of the server reads from the
//! authentication layer:
//!
//! - [`UserId`] - opaque string identifier for a user account
//! - [`Actor`] - the authenticated user attributed as the cause of an action

pub mod types;
pub mod user;

pub use types::UserId;
pub use user::Actor;
