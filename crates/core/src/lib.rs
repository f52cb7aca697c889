// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ji-core: record types for the job info log

pub mod macros;

pub mod clock;
pub mod event;
pub mod field;
pub mod id;
pub mod job_info;
pub mod query;
pub mod time_fmt;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use event::Event;
pub use field::{IndexedField, UnknownField};
pub use id::short;
#[cfg(any(test, feature = "test-support"))]
pub use job_info::JobInfoBuilder;
pub use job_info::{status, JobInfo, JobInfoId, NewJobInfo};
pub use query::{DateOrder, JobQuery};
pub use time_fmt::{format_elapsed, format_elapsed_ms, parse_duration};
