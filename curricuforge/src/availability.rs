/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Per-run teacher availability grid.
//!
//! [`AvailabilityTracker`] records which `(day, period)` cells each teacher is
//! already committed to.  One tracker is built at the top of every
//! [`TimetableGenerator::generate`](crate::generator::TimetableGenerator::generate)
//! call, shared across **all** sections of that run, and dropped when the call
//! returns.  This is what enforces the cross-section no-double-booking rule:
//! a teacher is only picked while their cell is free and is marked busy before
//! any later slot is considered.
//!
//! The tracker is never stored in the generator itself, so there is no
//! `clear()` and no way for two runs to observe each other's bookings.

use std::collections::BTreeMap;

use tracing::trace;

use crate::timetable::DAYS_PER_WEEK;

/// Occupancy grid: teacher → day index → period index → occupied.
///
/// `BTreeMap` (not `HashMap`) so debug dumps list teachers alphabetically.
type Grid = BTreeMap<String, Vec<Vec<bool>>>;

/// Tracks which teachers are booked at which `(day, period)` cells.
#[derive(Debug, Clone)]
pub struct AvailabilityTracker {
    grid: Grid,
    periods_per_day: usize,
}

impl AvailabilityTracker {
    /// Builds a tracker with every cell of every teacher unoccupied.
    ///
    /// Duplicate names share one row: the same name is the same person.
    pub fn new<S: AsRef<str>>(teachers: &[S], periods_per_day: usize) -> Self {
        let mut grid = Grid::new();
        for teacher in teachers {
            grid.entry(teacher.as_ref().to_string())
                .or_insert_with(|| Self::empty_week(periods_per_day));
        }
        Self {
            grid,
            periods_per_day,
        }
    }

    fn empty_week(periods_per_day: usize) -> Vec<Vec<bool>> {
        vec![vec![false; periods_per_day]; DAYS_PER_WEEK]
    }

    /// Returns `true` unless `teacher` is marked occupied at `(day, period)`.
    ///
    /// Unknown teachers and out-of-range cells count as available.
    pub fn is_available(&self, teacher: &str, day: usize, period: usize) -> bool {
        !self
            .grid
            .get(teacher)
            .and_then(|week| week.get(day))
            .and_then(|periods| periods.get(period))
            .copied()
            .unwrap_or(false)
    }

    /// Marks `teacher` busy at `(day, period)`.  Idempotent.
    ///
    /// A teacher missing from the tracker gets a fresh row; cells outside the
    /// week are ignored.
    pub fn mark_occupied(&mut self, teacher: &str, day: usize, period: usize) {
        let periods_per_day = self.periods_per_day;
        let week = self
            .grid
            .entry(teacher.to_string())
            .or_insert_with(|| Self::empty_week(periods_per_day));

        if let Some(cell) = week.get_mut(day).and_then(|p| p.get_mut(period)) {
            *cell = true;
            trace!(teacher, day, period, "cell occupied");
        }
    }

    /// Number of cells `teacher` is booked for this run.
    pub fn occupied_count(&self, teacher: &str) -> usize {
        self.grid
            .get(teacher)
            .map(|week| week.iter().flatten().filter(|&&busy| busy).count())
            .unwrap_or(0)
    }

    /// Distinct tracked teachers, alphabetically.
    pub fn teachers(&self) -> impl Iterator<Item = &str> + '_ {
        self.grid.keys().map(String::as_str)
    }

    /// Number of distinct teachers tracked.
    pub fn teacher_count(&self) -> usize {
        self.grid.len()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
