/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! CurricuForge – weekly school timetable generator
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── config/         – timetable configuration (YAML / JSON) + validation
//! ├── timetable       – Section / Day / Slot output model
//! ├── availability    – per-run teacher occupancy grid
//! └── generator/      – first-fit randomised assignment + post-run report
//! ```
//!
//! Persistence, HTTP exposure and rendering live outside this crate; they
//! consume the serialised [`timetable::Timetable`].

pub mod availability;
pub mod config;
pub mod generator;
pub mod timetable;
