// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Integration records: per-user linkage to third-party fitness services
//!
//! This crate defines the stored shape of a user's Strava and Komoot
//! integration settings, with validation at the serialization boundary and
//! read-only inspection for tooling.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;
