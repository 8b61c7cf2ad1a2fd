// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services that operate on integration records.

pub mod check;
pub mod inspect;

pub use check::{check_source, CheckLine, CheckOutcome, SourceCheck};
pub use inspect::{inspect, IntegrationReport, ProviderReport};
