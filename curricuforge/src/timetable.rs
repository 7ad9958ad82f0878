/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Timetable data structures produced by the generator.
//!
//! The output is a strictly nested tree:
//!
//! ```text
//! Timetable = Vec<Section>
//!   Section  (grade, letter)     – exactly DAYS_PER_WEEK days
//!     Day    (Monday..Friday)    – exactly periods_per_day slots
//!       Slot Lunch | Class { subject, teacher } | Free
//! ```
//!
//! # Wire shape
//! Every [`Slot`] serialises to the flat record downstream consumers expect:
//!
//! ```json
//! { "type": "Class", "subject": "Math", "teacher": "Mr. Smith" }
//! { "type": "Lunch", "subject": "LUNCH BREAK", "teacher": "" }
//! { "type": "Free",  "subject": "LIBRARY / SELF STUDY", "teacher": "Staff" }
//! ```
//!
//! Internally the slot is a typed enum so a `Class` can never be missing its
//! teacher and a `Free` slot can never carry a real one.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Number of school days in a week (Monday–Friday).
pub const DAYS_PER_WEEK: usize = 5;

/// Subject label carried by every [`Slot::Lunch`].
pub const LUNCH_LABEL: &str = "LUNCH BREAK";

/// Subject label carried by every [`Slot::Free`].
pub const FREE_LABEL: &str = "LIBRARY / SELF STUDY";

/// Placeholder teacher for [`Slot::Free`].  Not a real resource: it is never
/// tracked for availability and may appear any number of times per cell.
pub const STAFF_LABEL: &str = "Staff";

// ── Weekday ───────────────────────────────────────────────────────────────────

/// Fixed school week.  The discriminant doubles as the day index (0–4) used
/// by the availability tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// All school days in calendar order.
    pub const ALL: [Weekday; DAYS_PER_WEEK] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// 0-based day index (Monday = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Slot ──────────────────────────────────────────────────────────────────────

/// Discriminant of a [`Slot`], serialised as the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    Lunch,
    Class,
    Free,
}

/// One period within one day within one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SlotRecord", try_from = "SlotRecord")]
pub enum Slot {
    /// Fixed lunch break.  Never consults the availability tracker.
    Lunch,

    /// A taught period.  `teacher` is booked for this (day, period) across the
    /// whole timetable.
    Class { subject: String, teacher: String },

    /// Fallback when every teacher is already booked for this (day, period).
    Free,
}

impl Slot {
    /// Builds a [`Slot::Class`].
    pub fn class(subject: impl Into<String>, teacher: impl Into<String>) -> Self {
        Slot::Class {
            subject: subject.into(),
            teacher: teacher.into(),
        }
    }

    pub fn kind(&self) -> SlotKind {
        match self {
            Slot::Lunch => SlotKind::Lunch,
            Slot::Class { .. } => SlotKind::Class,
            Slot::Free => SlotKind::Free,
        }
    }

    /// Subject label as shown to readers of the timetable.
    pub fn subject(&self) -> &str {
        match self {
            Slot::Lunch => LUNCH_LABEL,
            Slot::Class { subject, .. } => subject,
            Slot::Free => FREE_LABEL,
        }
    }

    /// Teacher label as shown to readers of the timetable.
    ///
    /// Empty for lunch, [`STAFF_LABEL`] for free periods.  Use
    /// [`booked_teacher`](Self::booked_teacher) when only real bookings matter.
    pub fn teacher(&self) -> &str {
        match self {
            Slot::Lunch => "",
            Slot::Class { teacher, .. } => teacher,
            Slot::Free => STAFF_LABEL,
        }
    }

    /// The teacher this slot actually occupies, if any.
    pub fn booked_teacher(&self) -> Option<&str> {
        match self {
            Slot::Class { teacher, .. } => Some(teacher),
            _ => None,
        }
    }

    pub fn is_class(&self) -> bool {
        matches!(self, Slot::Class { .. })
    }
}

/// Error produced when a serialised slot record cannot be turned back into a
/// [`Slot`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlotRecordError {
    #[error("class slot is missing its subject")]
    MissingSubject,

    #[error("class slot for '{subject}' is missing its teacher")]
    MissingTeacher { subject: String },
}

/// Flat wire form of a [`Slot`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SlotRecord {
    #[serde(rename = "type")]
    kind: SlotKind,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    teacher: String,
}

impl From<Slot> for SlotRecord {
    fn from(slot: Slot) -> Self {
        let kind = slot.kind();
        match slot {
            Slot::Class { subject, teacher } => SlotRecord {
                kind,
                subject,
                teacher,
            },
            other => SlotRecord {
                kind,
                subject: other.subject().to_string(),
                teacher: other.teacher().to_string(),
            },
        }
    }
}

impl TryFrom<SlotRecord> for Slot {
    type Error = SlotRecordError;

    fn try_from(record: SlotRecord) -> Result<Self, Self::Error> {
        match record.kind {
            SlotKind::Lunch => Ok(Slot::Lunch),
            SlotKind::Free => Ok(Slot::Free),
            SlotKind::Class => {
                if record.subject.is_empty() {
                    return Err(SlotRecordError::MissingSubject);
                }
                if record.teacher.is_empty() {
                    return Err(SlotRecordError::MissingTeacher {
                        subject: record.subject,
                    });
                }
                Ok(Slot::Class {
                    subject: record.subject,
                    teacher: record.teacher,
                })
            }
        }
    }
}

// ── Day / Section ─────────────────────────────────────────────────────────────

/// One weekday of a section's timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub day: Weekday,
    /// Index `p` holds period `p + 1`.
    pub slots: Vec<Slot>,
}

impl Day {
    pub fn new(day: Weekday, periods_per_day: usize) -> Self {
        Self {
            day,
            slots: Vec::with_capacity(periods_per_day),
        }
    }
}

/// One classroom cohort within a grade, with its own weekly timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Display name, e.g. `"Grade 3 - Section B"`.
    pub name: String,
    /// 1-based grade level.
    pub grade: u32,
    /// Section letter derived from the 1-based section index.
    pub section: String,
    pub days: Vec<Day>,
}

impl Section {
    /// Creates an empty section for `grade` / 1-based `section_index`.
    pub fn new(grade: u32, section_index: u32) -> Self {
        let letter = section_letter(section_index);
        Self {
            name: format!("Grade {grade} - Section {letter}"),
            grade,
            section: letter,
            days: Vec::with_capacity(DAYS_PER_WEEK),
        }
    }

    /// Slot at `(day, period_index)`, if the timetable has one there.
    pub fn slot(&self, day: Weekday, period_index: usize) -> Option<&Slot> {
        self.days
            .iter()
            .find(|d| d.day == day)
            .and_then(|d| d.slots.get(period_index))
    }

    /// Iterates every slot as `(day, period_index, slot)`.
    pub fn slots(&self) -> impl Iterator<Item = (Weekday, usize, &Slot)> + '_ {
        self.days
            .iter()
            .flat_map(|d| d.slots.iter().enumerate().map(move |(p, s)| (d.day, p, s)))
    }
}

/// Generator output: sections in grade-major, section-minor order.
pub type Timetable = Vec<Section>;

/// Converts a 1-based section index into its letter label.
///
/// `1 → A`, `26 → Z`, then continues spreadsheet-style: `27 → AA`, `28 → AB`.
/// Index `0` has no label and yields an empty string.
pub fn section_letter(index: u32) -> String {
    let mut n = index;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
