/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error type for the timetable generator.
//!
//! The generator has no failure mode once the loop starts: an unassignable
//! slot becomes [`Slot::Free`](crate::timetable::Slot::Free), never an error.
//! The only errors are precondition violations on the configuration, reported
//! before any section is built so callers never see a half-filled timetable.
//!
//! | Variant | Cause |
//! |---|---|
//! | `NoGrades` | `grade_count == 0` |
//! | `NoSectionsPerGrade` | `sections_per_grade == 0` |
//! | `NoSubjects` | `subjects` is empty |
//! | `NoPeriodsPerDay` | `periods_per_day == 0` |
//!
//! An empty teacher list is **not** an error; every non-lunch slot simply
//! falls back to `Free`.

use thiserror::Error;

/// Error returned from
/// [`TimetableGenerator::generate()`](super::TimetableGenerator::generate)
/// and [`TimetableConfig::validate()`](crate::config::TimetableConfig::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("grade count must be at least 1")]
    NoGrades,

    #[error("sections per grade must be at least 1")]
    NoSectionsPerGrade,

    #[error("no subjects provided, subject list is empty")]
    NoSubjects,

    #[error("periods per day must be at least 1")]
    NoPeriodsPerDay,
}
