/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Post-generation analysis of a timetable.
//!
//! The generator never fails on exhausted capacity: it falls back to free
//! periods instead.  [`TimetableReport`] makes that visible after the fact:
//! how many periods were filled, how many fell back to self-study, and how
//! the classes spread across teachers.
//!
//! [`find_double_bookings`] audits the one hard invariant (a teacher in at
//! most one class per `(day, period)`).  Generator output always passes; the
//! audit exists for timetables that come back from storage or are edited by
//! hand before being re-used.
//!
//! # Fill rate
//! ```text
//! fill_rate = class_slots / (class_slots + free_slots)
//! ```
//! Lunch periods are not schedulable and are excluded.  A timetable with no
//! schedulable periods reports a fill rate of `1.0`.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::timetable::{Section, Slot, Weekday};

// ── DoubleBooking ─────────────────────────────────────────────────────────────

/// A teacher found in more than one class at the same `(day, period)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoubleBooking {
    pub teacher: String,
    pub day: Weekday,
    /// 0-based period index.
    pub period: usize,
    /// Names of every section holding a class with this teacher in the cell.
    pub sections: Vec<String>,
}

/// Returns every `(teacher, day, period)` cell booked more than once.
///
/// Only [`Slot::Class`] counts: the `Staff` label on free periods is not a
/// real teacher.  Results are sorted by teacher, then day, then period.
pub fn find_double_bookings(timetable: &[Section]) -> Vec<DoubleBooking> {
    let mut cells: BTreeMap<(&str, Weekday, usize), Vec<&str>> = BTreeMap::new();

    for section in timetable {
        for (day, period, slot) in section.slots() {
            if let Some(teacher) = slot.booked_teacher() {
                cells
                    .entry((teacher, day, period))
                    .or_default()
                    .push(&section.name);
            }
        }
    }

    cells
        .into_iter()
        .filter(|(_, sections)| sections.len() > 1)
        .map(|((teacher, day, period), sections)| DoubleBooking {
            teacher: teacher.to_string(),
            day,
            period,
            sections: sections.into_iter().map(String::from).collect(),
        })
        .collect()
}

// ── TimetableReport ───────────────────────────────────────────────────────────

/// Summary statistics for one generated timetable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimetableReport {
    pub section_count: usize,
    pub class_slots: usize,
    pub lunch_slots: usize,
    pub free_slots: usize,
    /// Teacher → number of classes taught this week.
    pub teacher_load: BTreeMap<String, usize>,
    pub double_bookings: Vec<DoubleBooking>,
}

impl TimetableReport {
    pub fn from_timetable(timetable: &[Section]) -> Self {
        let mut report = TimetableReport {
            section_count: timetable.len(),
            ..Default::default()
        };

        for section in timetable {
            for (_, _, slot) in section.slots() {
                match slot {
                    Slot::Lunch => report.lunch_slots += 1,
                    Slot::Free => report.free_slots += 1,
                    Slot::Class { teacher, .. } => {
                        report.class_slots += 1;
                        *report.teacher_load.entry(teacher.clone()).or_default() += 1;
                    }
                }
            }
        }

        report.double_bookings = find_double_bookings(timetable);
        report
    }

    /// Periods that could hold a class (everything except lunch).
    pub fn schedulable_slots(&self) -> usize {
        self.class_slots + self.free_slots
    }

    /// Fraction of schedulable periods that received a class.
    pub fn fill_rate(&self) -> f64 {
        match self.schedulable_slots() {
            0 => 1.0,
            n => self.class_slots as f64 / n as f64,
        }
    }

    /// Emit the report through `tracing`.
    ///
    /// Free periods and double bookings are logged at `warn!`; everything else
    /// at `info!`.
    pub fn log(&self) {
        info!(
            sections = self.section_count,
            classes = self.class_slots,
            lunch = self.lunch_slots,
            free = self.free_slots,
            fill_pct = self.fill_rate() * 100.0,
            "timetable summary"
        );

        for (teacher, classes) in &self.teacher_load {
            info!("  [{teacher}]  classes={classes}");
        }

        if self.free_slots > 0 {
            warn!(
                free = self.free_slots,
                schedulable = self.schedulable_slots(),
                "not every period could be staffed; add teachers to reduce self-study periods"
            );
        }

        for booking in &self.double_bookings {
            warn!(
                teacher  = %booking.teacher,
                day      = %booking.day,
                period   = booking.period + 1,
                sections = ?booking.sections,
                "teacher double-booked"
            );
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
