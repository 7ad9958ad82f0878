//! Timetable generator for CurricuForge.
//!
//! [`TimetableGenerator`] fills a weekly timetable for every section of every
//! grade, assigning a `(subject, teacher)` pair to each period so that no
//! teacher is ever booked twice in the same `(day, period)` across the whole
//! school.  The result is a [`Timetable`]: one [`Section`] per
//! `(grade, section)` pair, in grade-major order.
//!
//! # Algorithm
//! For each section, day (Monday..Friday) and period:
//! 1. **Lunch**: if the period is the configured lunch period, emit
//!    [`Slot::Lunch`].  Purely positional; the tracker is not consulted.
//! 2. **Class**: shuffle the subjects; for each subject, shuffle the teachers
//!    afresh and take the first one free at `(day, period)`.  First hit wins:
//!    emit [`Slot::Class`] and mark the teacher busy.
//! 3. **Free**: no teacher free for any subject → [`Slot::Free`].
//!
//! There is no backtracking and no lookahead.  A small teacher pool across
//! many sections therefore yields many free periods; that is the accepted
//! trade-off for a single linear pass.
//!
//! # State
//! | Topic | Handling |
//! |---|---|
//! | Occupancy | [`AvailabilityTracker`] built inside `generate()`, dropped on return |
//! | Randomness | Caller-supplied `Rng`: seed it for reproducible output |
//! | Thread safety | `Send + Sync` (only holds the immutable configuration) |
//! | Failure | Only configuration preconditions, checked before the first slot |
//!
//! # Example
//! ```rust,ignore
//! let generator = TimetableGenerator::new(Arc::new(TimetableConfig::default()));
//! let mut rng = StdRng::seed_from_u64(7);
//! let timetable: Timetable = generator.generate(&mut rng)?;
//! ```

pub mod error;
pub mod report;

pub use error::GeneratorError;
pub use report::{find_double_bookings, DoubleBooking, TimetableReport};

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::availability::AvailabilityTracker;
use crate::config::TimetableConfig;
use crate::timetable::{Day, Section, Slot, Timetable, Weekday};

// ── TimetableGenerator ────────────────────────────────────────────────────────

/// The CurricuForge timetable generator.
///
/// Holds a shared reference to the configuration.  All per-run state (the
/// availability tracker) is allocated inside `generate()` and dropped at the
/// end of the call, so one generator can serve any number of runs.
pub struct TimetableGenerator {
    config: Arc<TimetableConfig>,
}

impl TimetableGenerator {
    /// Create a new `TimetableGenerator` for the given configuration.
    pub fn new(config: Arc<TimetableConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TimetableConfig {
        &self.config
    }

    // ── Public entry points ───────────────────────────────────────────────────

    /// Generate a full timetable, drawing every shuffle from `rng`.
    ///
    /// Two calls with the same configuration always produce the same shape;
    /// the class assignments only repeat when `rng` starts from the same seed.
    ///
    /// # Errors
    /// Returns a [`GeneratorError`] if the configuration violates a
    /// precondition.  Nothing is generated in that case.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Timetable, GeneratorError> {
        // ── Preconditions ─────────────────────────────────────────────────────
        self.config.validate()?;

        let cfg = &*self.config;
        let periods_per_day = cfg.periods_per_day as usize;
        let lunch_index = cfg.lunch_index();

        if lunch_index.is_none() {
            warn!(
                lunch_period = cfg.lunch_period,
                periods_per_day = cfg.periods_per_day,
                "lunch period is outside the school day, no lunch break inserted"
            );
        }

        // ── Per-call state ────────────────────────────────────────────────────
        let mut tracker = AvailabilityTracker::new(cfg.teachers.as_slice(), periods_per_day);

        info!(
            grades = cfg.grade_count,
            sections_per_grade = cfg.sections_per_grade,
            subjects = cfg.subjects.len(),
            teachers = tracker.teacher_count(),
            periods_per_day = periods_per_day,
            "=== TimetableGenerator::generate() ==="
        );

        // ── Sections, grade-major ─────────────────────────────────────────────
        let mut timetable = Timetable::with_capacity(cfg.section_count());
        for grade in 1..=cfg.grade_count {
            for section_index in 1..=cfg.sections_per_grade {
                let section =
                    self.build_section(grade, section_index, lunch_index, &mut tracker, rng);
                timetable.push(section);
            }
        }

        for teacher in tracker.teachers() {
            debug!(
                teacher = %teacher,
                classes = tracker.occupied_count(teacher),
                "teacher load"
            );
        }

        info!(
            section_count = timetable.len(),
            "=== Generation complete ==="
        );

        Ok(timetable)
    }

    /// [`generate`](Self::generate) with the thread-local entropy source.
    pub fn generate_random(&self) -> Result<Timetable, GeneratorError> {
        self.generate(&mut rand::thread_rng())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Per-section construction
    // ─────────────────────────────────────────────────────────────────────────

    fn build_section<R: Rng + ?Sized>(
        &self,
        grade: u32,
        section_index: u32,
        lunch_index: Option<usize>,
        tracker: &mut AvailabilityTracker,
        rng: &mut R,
    ) -> Section {
        let periods_per_day = self.config.periods_per_day as usize;
        let mut section = Section::new(grade, section_index);

        for day in Weekday::ALL {
            let mut daily = Day::new(day, periods_per_day);
            for period in 0..periods_per_day {
                let slot = if Some(period) == lunch_index {
                    Slot::Lunch
                } else {
                    self.assign_slot(&section.name, day, period, tracker, rng)
                };
                daily.slots.push(slot);
            }
            section.days.push(daily);
        }

        debug!(
            section = %section.name,
            classes = section.slots().filter(|(_, _, s)| s.is_class()).count(),
            "section built"
        );

        section
    }

    /// First-fit assignment for one non-lunch period.
    ///
    /// Falls back to [`Slot::Free`] when every teacher is already booked at
    /// `(day, period)`.  Since availability does not depend on the subject,
    /// that is exactly the "all teachers busy" case.
    fn assign_slot<R: Rng + ?Sized>(
        &self,
        section_name: &str,
        day: Weekday,
        period: usize,
        tracker: &mut AvailabilityTracker,
        rng: &mut R,
    ) -> Slot {
        let mut subjects: Vec<&str> = self.config.subjects.iter().map(String::as_str).collect();
        let mut teachers: Vec<&str> = self.config.teachers.iter().map(String::as_str).collect();

        subjects.shuffle(rng);

        for subject in subjects {
            // Fresh teacher order for every subject tried
            teachers.shuffle(rng);

            let free_teacher = teachers
                .iter()
                .copied()
                .find(|t| tracker.is_available(t, day.index(), period));

            if let Some(teacher) = free_teacher {
                tracker.mark_occupied(teacher, day.index(), period);
                debug!(
                    section = %section_name,
                    day     = %day,
                    period  = period + 1,
                    subject = %subject,
                    teacher = %teacher,
                    "✓ class assigned"
                );
                return Slot::class(subject, teacher);
            }
        }

        debug!(
            section = %section_name,
            day     = %day,
            period  = period + 1,
            "✗ no teacher free, free period"
        );
        Slot::Free
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::{SlotKind, DAYS_PER_WEEK};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // ── Test helpers ──────────────────────────────────────────────────────────

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn make_config(
        grades: u32,
        sections: u32,
        subjects: &[&str],
        teachers: &[&str],
        periods: u32,
        lunch: i32,
    ) -> TimetableConfig {
        TimetableConfig {
            grade_count: grades,
            sections_per_grade: sections,
            subjects: names(subjects),
            teachers: names(teachers),
            periods_per_day: periods,
            lunch_period: lunch,
        }
    }

    fn generate_seeded(config: TimetableConfig, seed: u64) -> Timetable {
        let generator = TimetableGenerator::new(Arc::new(config));
        let mut rng = StdRng::seed_from_u64(seed);
        generator.generate(&mut rng).unwrap()
    }

    fn slot_kinds(timetable: &Timetable) -> Vec<SlotKind> {
        timetable
            .iter()
            .flat_map(|s| s.slots().map(|(_, _, slot)| slot.kind()))
            .collect()
    }

    // ── Scenarios ─────────────────────────────────────────────────────────────

    #[test]
    fn single_section_lunch_then_class() {
        let cfg = make_config(1, 1, &["Math"], &["A"], 2, 1);
        let timetable = generate_seeded(cfg, 1);

        assert_eq!(timetable.len(), 1);
        let section = &timetable[0];
        assert_eq!(section.name, "Grade 1 - Section A");
        assert_eq!(section.days.len(), DAYS_PER_WEEK);
        for (day, expected) in section.days.iter().zip(Weekday::ALL) {
            assert_eq!(day.day, expected);
            assert_eq!(day.slots, vec![Slot::Lunch, Slot::class("Math", "A")]);
        }
    }

    #[test]
    fn two_sections_contend_for_one_teacher() {
        let cfg = make_config(1, 2, &["Math"], &["A"], 1, 0);

        for seed in 0..20 {
            let timetable = generate_seeded(cfg.clone(), seed);
            assert_eq!(timetable.len(), 2);

            for day in Weekday::ALL {
                let a = timetable[0].slot(day, 0).unwrap();
                let b = timetable[1].slot(day, 0).unwrap();
                let classes = [a, b].iter().filter(|s| s.is_class()).count();
                assert_eq!(classes, 1, "seed {seed}, {day}: exactly one class");
                for slot in [a, b] {
                    assert!(
                        *slot == Slot::class("Math", "A") || *slot == Slot::Free,
                        "unexpected slot {slot:?}"
                    );
                }
            }
        }
    }

    // ── Invariants ────────────────────────────────────────────────────────────

    #[test]
    fn no_teacher_is_double_booked() {
        let cfg = make_config(
            4,
            3,
            &["Math", "Physics", "Art", "CS"],
            &["A", "B", "C", "D", "E"],
            6,
            3,
        );
        for seed in 0..25 {
            let timetable = generate_seeded(cfg.clone(), seed);
            assert!(
                find_double_bookings(&timetable).is_empty(),
                "seed {seed} produced a double booking"
            );
        }
    }

    #[test]
    fn lunch_only_at_lunch_period() {
        let cfg = make_config(2, 2, &["Math", "Art"], &["A", "B", "C"], 5, 3);
        let timetable = generate_seeded(cfg, 42);

        for section in &timetable {
            for (_, period, slot) in section.slots() {
                assert_eq!(
                    slot.kind() == SlotKind::Lunch,
                    period == 2,
                    "{} period {}",
                    section.name,
                    period + 1
                );
            }
        }
    }

    #[test]
    fn lunch_in_last_period() {
        let cfg = make_config(2, 2, &["Math", "Art"], &["A", "B"], 4, 4);
        let timetable = generate_seeded(cfg, 17);

        for section in &timetable {
            for (day, period, slot) in section.slots() {
                assert_eq!(
                    slot.kind() == SlotKind::Lunch,
                    period == 3,
                    "{} {day} period {}",
                    section.name,
                    period + 1
                );
            }
        }
    }

    #[test]
    fn lunch_outside_day_inserts_no_lunch() {
        for lunch in [0, -2, 6, 99] {
            let cfg = make_config(1, 2, &["Math"], &["A", "B"], 5, lunch);
            let timetable = generate_seeded(cfg, 3);
            assert!(
                !slot_kinds(&timetable).contains(&SlotKind::Lunch),
                "lunch_period {lunch} must not insert a lunch break"
            );
        }
    }

    #[test]
    fn output_shape_is_complete() {
        let cfg = make_config(3, 4, &["Math", "Art"], &["A", "B"], 6, 2);
        let timetable = generate_seeded(cfg, 9);

        assert_eq!(timetable.len(), 12);
        for section in &timetable {
            assert_eq!(section.days.len(), DAYS_PER_WEEK);
            for day in &section.days {
                assert_eq!(day.slots.len(), 6);
            }
        }
    }

    #[test]
    fn sections_are_grade_major() {
        let cfg = make_config(2, 3, &["Math"], &["A"], 1, 1);
        let timetable = generate_seeded(cfg, 0);
        let labels: Vec<(u32, &str)> = timetable
            .iter()
            .map(|s| (s.grade, s.section.as_str()))
            .collect();
        assert_eq!(
            labels,
            vec![(1, "A"), (1, "B"), (1, "C"), (2, "A"), (2, "B"), (2, "C")]
        );
    }

    #[test]
    fn empty_teacher_pool_yields_only_free_periods() {
        let cfg = make_config(2, 2, &["Math", "Art"], &[], 4, 2);
        let timetable = generate_seeded(cfg, 5);

        for section in &timetable {
            for (_, period, slot) in section.slots() {
                if period == 1 {
                    assert_eq!(*slot, Slot::Lunch);
                } else {
                    assert_eq!(*slot, Slot::Free);
                }
            }
        }
    }

    #[test]
    fn single_teacher_gets_exactly_one_class_per_cell() {
        let cfg = make_config(3, 3, &["Math", "Art", "CS"], &["A"], 4, 0);
        let timetable = generate_seeded(cfg, 11);

        for day in Weekday::ALL {
            for period in 0..4 {
                let classes = timetable
                    .iter()
                    .filter(|s| s.slot(day, period).is_some_and(Slot::is_class))
                    .count();
                assert_eq!(classes, 1, "{day} period {}", period + 1);
            }
        }
    }

    #[test]
    fn enough_teachers_fill_every_period() {
        // 6 sections competing per cell, 6 teachers: first-fit never runs dry
        let cfg = make_config(3, 2, &["Math", "Art"], &["A", "B", "C", "D", "E", "F"], 5, 3);
        let timetable = generate_seeded(cfg, 21);

        let kinds = slot_kinds(&timetable);
        assert!(!kinds.contains(&SlotKind::Free));
        assert_eq!(
            kinds.iter().filter(|k| **k == SlotKind::Class).count(),
            6 * DAYS_PER_WEEK * 4
        );
    }

    #[test]
    fn duplicate_names_are_drawn_as_is() {
        let cfg = make_config(1, 2, &["Math", "Math"], &["A", "A"], 2, 0);
        let timetable = generate_seeded(cfg, 8);

        // "A" is one person: still only one class per cell
        assert!(find_double_bookings(&timetable).is_empty());
        for section in &timetable {
            for (_, _, slot) in section.slots() {
                assert!(*slot == Slot::class("Math", "A") || *slot == Slot::Free);
            }
        }
    }

    #[test]
    fn classes_only_use_configured_names() {
        let subjects = ["Math", "Physics", "Art"];
        let teachers = ["A", "B"];
        let cfg = make_config(2, 2, &subjects, &teachers, 4, 2);
        let timetable = generate_seeded(cfg, 13);

        for section in &timetable {
            for (_, _, slot) in section.slots() {
                if let Slot::Class { subject, teacher } = slot {
                    assert!(subjects.contains(&subject.as_str()));
                    assert!(teachers.contains(&teacher.as_str()));
                }
            }
        }
    }

    // ── Reproducibility ───────────────────────────────────────────────────────

    #[test]
    fn same_seed_same_timetable() {
        let cfg = TimetableConfig::default();
        let first = generate_seeded(cfg.clone(), 2024);
        for _ in 0..5 {
            assert_eq!(generate_seeded(cfg.clone(), 2024), first);
        }
    }

    #[test]
    fn shape_is_stable_across_runs() {
        let cfg = TimetableConfig::default();
        let generator = TimetableGenerator::new(Arc::new(cfg));
        let a = generator.generate_random().unwrap();
        let b = generator.generate_random().unwrap();

        assert_eq!(a.len(), b.len());
        for (sa, sb) in a.iter().zip(&b) {
            assert_eq!(sa.name, sb.name);
            assert_eq!(sa.days.len(), sb.days.len());
            for (da, db) in sa.days.iter().zip(&sb.days) {
                assert_eq!(da.day, db.day);
                assert_eq!(da.slots.len(), db.slots.len());
            }
        }
    }

    #[test]
    fn runs_do_not_share_bookings() {
        // A tracker leaking between runs would leave the second run all free
        let cfg = make_config(1, 1, &["Math"], &["A"], 3, 0);
        let generator = TimetableGenerator::new(Arc::new(cfg));
        let mut rng = StdRng::seed_from_u64(0);

        for _ in 0..3 {
            let timetable = generator.generate(&mut rng).unwrap();
            assert!(slot_kinds(&timetable).iter().all(|k| *k == SlotKind::Class));
        }
    }

    // ── Preconditions ─────────────────────────────────────────────────────────

    #[test]
    fn invalid_config_returns_error() {
        let cfg = make_config(1, 1, &[], &["A"], 2, 1);
        let generator = TimetableGenerator::new(Arc::new(cfg));
        let err = generator.generate_random().unwrap_err();
        assert_eq!(err, GeneratorError::NoSubjects);
    }

    #[test]
    fn zero_grades_returns_error() {
        let cfg = make_config(0, 1, &["Math"], &["A"], 2, 1);
        let generator = TimetableGenerator::new(Arc::new(cfg));
        assert!(matches!(
            generator.generate_random(),
            Err(GeneratorError::NoGrades)
        ));
    }
}
