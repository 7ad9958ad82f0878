//! Timetable configuration loading and validation.
//!
//! The expected YAML structure is:
//! ```yaml
//! gradeCount: 5
//! sectionsPerGrade: 2
//! subjects: [Math, Physics, Chemistry, Biology, English, History, CS, Art]
//! teachers: ["Ms. Johnson", "Mr. Smith", "Mrs. Davis"]
//! periodsPerDay: 7
//! lunchPeriod: 4
//! ```
//!
//! The stored-form field names `grades`, `classesPerDay` and `lunchSlot` are
//! accepted as aliases, so a saved `config` record can be fed straight back
//! in.  Serialisation always writes the stored-form names, matching the
//! `config` record the persistence layer keeps.  JSON input works too since
//! JSON is a subset of YAML.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::generator::GeneratorError;

// ── TimetableConfig ───────────────────────────────────────────────────────────

/// Input to one generation run.
///
/// Every field is optional in the file; missing values fall back to
/// [`TimetableConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimetableConfig {
    /// Number of grade levels, numbered from 1.
    #[serde(rename(serialize = "grades"), alias = "grades")]
    pub grade_count: u32,

    pub sections_per_grade: u32,

    /// Subject names, in the order given.  Not deduplicated.
    pub subjects: Vec<String>,

    /// Teacher names, in the order given.  May be empty.
    pub teachers: Vec<String>,

    #[serde(rename(serialize = "classesPerDay"), alias = "classesPerDay")]
    pub periods_per_day: u32,

    /// 1-based lunch period.  Any value outside `1..=periods_per_day`
    /// (including `0` or negatives) disables the lunch break.
    #[serde(rename(serialize = "lunchSlot"), alias = "lunchSlot")]
    pub lunch_period: i32,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            grade_count: 5,
            sections_per_grade: 2,
            subjects: [
                "Math",
                "Physics",
                "Chemistry",
                "Biology",
                "English",
                "History",
                "CS",
                "Art",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            teachers: [
                "Ms. Johnson",
                "Mr. Smith",
                "Mrs. Davis",
                "Mr. Wilson",
                "Dr. Brown",
                "Ms. Miller",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            periods_per_day: 7,
            lunch_period: 4,
        }
    }
}

impl TimetableConfig {
    /// Parses `path` as YAML (or JSON) into a configuration.
    ///
    /// The result is **not** validated; call [`validate`](Self::validate) or
    /// let the generator do it.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the document is
    /// structurally invalid (wrong types, negative counts).
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading timetable configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        let config: TimetableConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        debug!(
            grades = config.grade_count,
            sections_per_grade = config.sections_per_grade,
            subjects = ?config.subjects,
            teachers = ?config.teachers,
            periods_per_day = config.periods_per_day,
            lunch_period = config.lunch_period,
            "configuration parsed"
        );

        Ok(config)
    }

    /// Checks the generation preconditions.
    ///
    /// # Errors
    /// Returns the first [`GeneratorError`] found, checked in field order.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.grade_count == 0 {
            return Err(GeneratorError::NoGrades);
        }
        if self.sections_per_grade == 0 {
            return Err(GeneratorError::NoSectionsPerGrade);
        }
        if self.subjects.is_empty() {
            return Err(GeneratorError::NoSubjects);
        }
        if self.periods_per_day == 0 {
            return Err(GeneratorError::NoPeriodsPerDay);
        }
        if self.teachers.is_empty() {
            warn!("No teachers configured, every non-lunch period will be free");
        }
        Ok(())
    }

    /// Total number of sections the generator will emit.
    pub fn section_count(&self) -> usize {
        self.grade_count as usize * self.sections_per_grade as usize
    }

    /// 0-based period index of the lunch break, or `None` when
    /// [`lunch_period`](Self::lunch_period) falls outside the day.
    pub fn lunch_index(&self) -> Option<usize> {
        if self.lunch_period >= 1 && self.lunch_period as u32 <= self.periods_per_day {
            Some(self.lunch_period as usize - 1)
        } else {
            None
        }
    }
}

/// Splits a comma-separated list into trimmed names, dropping empty entries.
///
/// `"Math, Physics ,,Art"` → `["Math", "Physics", "Art"]`.
pub fn parse_name_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
