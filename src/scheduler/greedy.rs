//! Greedy randomized placement engine.
//!
//! # Algorithm
//!
//! 1. Split timeslots into a primary band (periods 1–4, 6–10) and an
//!    overflow band (periods 11–12); the break period belongs to neither.
//! 2. Walk registrations in input order; earlier rows get first pick.
//! 3. Per registration: resolve the subject's weekly hours and its
//!    teacher; shuffle the primary band, append the overflow band.
//! 4. Walk the candidate slots, skipping slots where the teacher or the
//!    group is already busy; take the first free room in room order.
//! 5. Stop when the demand is filled or the candidates run out. A
//!    demand that runs short is recorded as a shortfall, never an error.
//!
//! The shuffle is fresh per registration, which spreads a subject's
//! sessions across the week. Outcomes vary between runs unless a seed
//! is fixed.
//!
//! # Complexity
//! O(|register| × |slots| × |rooms|); linear scans throughout, sized
//! for tens of rooms and dozens of slots.

use std::collections::HashSet;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::{
    Assignment, Registration, Room, Shortfall, SlotBand, StudentGroup, Subject, Teacher,
    TeachingDuty, TimeSlot, Timetable,
};

/// Input container: the seven relations of one timetabling problem.
///
/// Relations are read-only snapshots for the duration of a run. Row
/// order matters for `rooms` (room tie-break) and `registrations`
/// (demand priority); it is irrelevant elsewhere.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimetableRequest {
    /// Teacher inventory.
    pub teachers: Vec<Teacher>,
    /// Room inventory, in tie-break order.
    pub rooms: Vec<Room>,
    /// Student groups.
    pub groups: Vec<StudentGroup>,
    /// Subjects with weekly hour requirements.
    pub subjects: Vec<Subject>,
    /// The weekly slot grid.
    pub timeslots: Vec<TimeSlot>,
    /// Subject → teacher mapping (first row per subject wins).
    pub duties: Vec<TeachingDuty>,
    /// Demands, in priority order.
    pub registrations: Vec<Registration>,
}

impl TimetableRequest {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the teacher inventory.
    pub fn with_teachers(mut self, teachers: Vec<Teacher>) -> Self {
        self.teachers = teachers;
        self
    }

    /// Sets the room inventory.
    pub fn with_rooms(mut self, rooms: Vec<Room>) -> Self {
        self.rooms = rooms;
        self
    }

    /// Sets the student groups.
    pub fn with_groups(mut self, groups: Vec<StudentGroup>) -> Self {
        self.groups = groups;
        self
    }

    /// Sets the subjects.
    pub fn with_subjects(mut self, subjects: Vec<Subject>) -> Self {
        self.subjects = subjects;
        self
    }

    /// Sets the slot grid.
    pub fn with_timeslots(mut self, timeslots: Vec<TimeSlot>) -> Self {
        self.timeslots = timeslots;
        self
    }

    /// Sets the teaching duties.
    pub fn with_duties(mut self, duties: Vec<TeachingDuty>) -> Self {
        self.duties = duties;
        self
    }

    /// Sets the registrations.
    pub fn with_registrations(mut self, registrations: Vec<Registration>) -> Self {
        self.registrations = registrations;
        self
    }

    /// Finds a subject by ID.
    pub fn subject(&self, subject_id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.subject_id == subject_id)
    }

    /// Resolves the teacher for a subject (first duty row wins).
    pub fn teacher_for(&self, subject_id: &str) -> Option<&str> {
        self.duties
            .iter()
            .find(|d| d.subject_id == subject_id)
            .map(|d| d.teacher_id.as_str())
    }
}

/// Per-run occupancy state: which (resource, timeslot) pairs are taken.
///
/// Owned by a single engine run; independent runs never share a ledger.
#[derive(Debug, Default)]
struct ConflictLedger {
    teacher_busy: HashSet<(String, String)>,
    room_busy: HashSet<(String, String)>,
    group_busy: HashSet<(String, String)>,
}

impl ConflictLedger {
    fn new() -> Self {
        Self::default()
    }

    fn teacher_free(&self, teacher_id: &str, timeslot_id: &str) -> bool {
        !self
            .teacher_busy
            .contains(&(teacher_id.to_string(), timeslot_id.to_string()))
    }

    fn room_free(&self, room_id: &str, timeslot_id: &str) -> bool {
        !self
            .room_busy
            .contains(&(room_id.to_string(), timeslot_id.to_string()))
    }

    fn group_free(&self, group_id: &str, timeslot_id: &str) -> bool {
        !self
            .group_busy
            .contains(&(group_id.to_string(), timeslot_id.to_string()))
    }

    fn claim(&mut self, teacher_id: &str, room_id: &str, group_id: &str, timeslot_id: &str) {
        self.teacher_busy
            .insert((teacher_id.to_string(), timeslot_id.to_string()));
        self.room_busy
            .insert((room_id.to_string(), timeslot_id.to_string()));
        self.group_busy
            .insert((group_id.to_string(), timeslot_id.to_string()));
    }
}

/// Greedy randomized timetable scheduler.
///
/// Produces a conflict-free timetable in one pass over the
/// registrations. Not a solver: there is no backtracking and no
/// optimality claim. A demand that finds no free slot/room is left
/// short and reported in [`Timetable::shortfalls`].
///
/// # Example
///
/// ```
/// use u_timetable::models::{Day, Registration, Room, Subject, TeachingDuty, TimeSlot};
/// use u_timetable::scheduler::{GreedyScheduler, TimetableRequest};
///
/// let request = TimetableRequest::new()
///     .with_rooms(vec![Room::new("R1")])
///     .with_subjects(vec![Subject::new("MATH101").with_hours(2, 0)])
///     .with_timeslots(vec![
///         TimeSlot::new("S1", Day::Mon, 1),
///         TimeSlot::new("S2", Day::Mon, 2),
///         TimeSlot::new("S3", Day::Mon, 3),
///     ])
///     .with_duties(vec![TeachingDuty::new("MATH101", "T1")])
///     .with_registrations(vec![Registration::new("MATH101", "G1")]);
///
/// let timetable = GreedyScheduler::new().with_seed(7).schedule(&request);
/// assert_eq!(timetable.assignment_count(), 2);
/// assert!(timetable.is_conflict_free());
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyScheduler {
    seed: Option<u64>,
}

impl GreedyScheduler {
    /// Creates a scheduler with OS-entropy randomness.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the random seed for reproducible runs.
    ///
    /// The seed is scoped to this scheduler value, never process-global,
    /// so concurrent runs stay independent.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Runs the engine and returns the timetable.
    ///
    /// Never fails: data gaps (unknown subject, unmapped teacher) skip
    /// the affected registration, and exhausted capacity leaves the
    /// demand short. See [`Timetable::shortfalls`] for what went unmet.
    pub fn schedule(&self, request: &TimetableRequest) -> Timetable {
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        self.schedule_with_rng(request, &mut rng)
    }

    /// Runs the engine with a caller-supplied random source.
    pub fn schedule_with_rng<R: Rng>(&self, request: &TimetableRequest, rng: &mut R) -> Timetable {
        let mut timetable = Timetable::new();
        let mut ledger = ConflictLedger::new();

        let primary: Vec<&TimeSlot> = request
            .timeslots
            .iter()
            .filter(|s| s.band() == Some(SlotBand::Primary))
            .collect();
        let overflow: Vec<&TimeSlot> = request
            .timeslots
            .iter()
            .filter(|s| s.band() == Some(SlotBand::Overflow))
            .collect();

        let mut demanded_total: u32 = 0;

        for registration in &request.registrations {
            let Some(subject) = request.subject(&registration.subject_id) else {
                debug!(
                    "skipping registration {}/{}: unknown subject",
                    registration.subject_id, registration.group_id
                );
                continue;
            };
            let required = subject.weekly_hours();

            let Some(teacher_id) = request.teacher_for(&registration.subject_id) else {
                debug!(
                    "skipping registration {}/{}: no teacher assigned",
                    registration.subject_id, registration.group_id
                );
                continue;
            };
            demanded_total += required;

            // Fresh shuffle per demand spreads the subject across the week;
            // overflow slots keep input order and come last.
            let mut candidates = primary.clone();
            candidates.shuffle(rng);
            candidates.extend(overflow.iter().copied());

            let mut placed: u32 = 0;
            for slot in candidates {
                if placed == required {
                    break;
                }
                if !ledger.teacher_free(teacher_id, &slot.timeslot_id)
                    || !ledger.group_free(&registration.group_id, &slot.timeslot_id)
                {
                    continue;
                }
                let Some(room) = request
                    .rooms
                    .iter()
                    .find(|r| ledger.room_free(&r.room_id, &slot.timeslot_id))
                else {
                    continue;
                };

                ledger.claim(
                    teacher_id,
                    &room.room_id,
                    &registration.group_id,
                    &slot.timeslot_id,
                );
                timetable.add_assignment(Assignment::new(
                    &registration.group_id,
                    slot,
                    &registration.subject_id,
                    teacher_id,
                    &room.room_id,
                ));
                placed += 1;
            }

            if placed < required {
                debug!(
                    "demand {}/{} short: placed {placed} of {required}",
                    registration.subject_id, registration.group_id
                );
                timetable.add_shortfall(Shortfall {
                    subject_id: registration.subject_id.clone(),
                    group_id: registration.group_id.clone(),
                    required,
                    placed,
                });
            }
        }

        info!(
            "placed {} of {} demanded sessions ({} demands short)",
            timetable.assignment_count(),
            demanded_total,
            timetable.shortfalls.len()
        );
        timetable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Day;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    /// One day of primary slots (periods 1–4 and 6–10).
    fn primary_day(day: Day) -> Vec<TimeSlot> {
        (1..=10u8)
            .filter(|&p| p != 5)
            .map(|p| TimeSlot::new(format!("{day}-{p}"), day, p))
            .collect()
    }

    /// Overflow slots (periods 11–12) for a day.
    fn overflow_day(day: Day) -> Vec<TimeSlot> {
        (11..=12u8)
            .map(|p| TimeSlot::new(format!("{day}-{p}"), day, p))
            .collect()
    }

    fn basic_request() -> TimetableRequest {
        let mut slots = primary_day(Day::Mon);
        slots.extend(overflow_day(Day::Mon));
        TimetableRequest::new()
            .with_rooms(vec![Room::new("R1")])
            .with_subjects(vec![Subject::new("MATH101").with_hours(2, 0)])
            .with_timeslots(slots)
            .with_duties(vec![TeachingDuty::new("MATH101", "T1")])
            .with_registrations(vec![Registration::new("MATH101", "G1")])
    }

    #[test]
    fn test_single_demand_fills_from_primary() {
        let request = basic_request();
        let timetable = GreedyScheduler::new().with_seed(42).schedule(&request);

        assert_eq!(timetable.assignment_count(), 2);
        assert!(timetable.is_fully_placed());
        for a in &timetable.assignments {
            assert_eq!(a.teacher_id, "T1");
            assert_eq!(a.room_id, "R1");
            assert_eq!(a.group_id, "G1");
            // Capacity exceeds demand, so overflow periods stay untouched
            assert!(a.period <= 10);
        }
        // Two distinct timeslots
        assert_ne!(
            timetable.assignments[0].timeslot_id,
            timetable.assignments[1].timeslot_id
        );
    }

    #[test]
    fn test_empty_register_yields_empty_timetable() {
        let request = basic_request().with_registrations(vec![]);
        let timetable = GreedyScheduler::new().schedule(&request);
        assert_eq!(timetable.assignment_count(), 0);
        assert!(timetable.is_fully_placed());
    }

    #[test]
    fn test_unknown_subject_is_skipped() {
        let request =
            basic_request().with_registrations(vec![Registration::new("NOPE999", "G1")]);
        let timetable = GreedyScheduler::new().with_seed(1).schedule(&request);
        assert_eq!(timetable.assignment_count(), 0);
        // A data gap is a skip, not a shortfall
        assert!(timetable.shortfalls.is_empty());
    }

    #[test]
    fn test_missing_teacher_skips_row_without_affecting_others() {
        let mut slots = primary_day(Day::Mon);
        slots.extend(primary_day(Day::Tue));
        let request = TimetableRequest::new()
            .with_rooms(vec![Room::new("R1")])
            .with_subjects(vec![
                Subject::new("ORPHAN").with_hours(3, 0),
                Subject::new("MATH101").with_hours(2, 0),
            ])
            .with_timeslots(slots)
            .with_duties(vec![TeachingDuty::new("MATH101", "T1")])
            .with_registrations(vec![
                Registration::new("ORPHAN", "G1"),
                Registration::new("MATH101", "G1"),
            ]);

        let timetable = GreedyScheduler::new().with_seed(3).schedule(&request);
        assert_eq!(timetable.placed_hours("ORPHAN", "G1"), 0);
        assert_eq!(timetable.placed_hours("MATH101", "G1"), 2);
        assert!(timetable.shortfalls.is_empty());
    }

    #[test]
    fn test_shared_teacher_never_collides() {
        // Two groups, same teacher, one room: every session must land on
        // a distinct timeslot.
        let mut slots = primary_day(Day::Mon);
        slots.extend(overflow_day(Day::Mon));
        let request = TimetableRequest::new()
            .with_rooms(vec![Room::new("R1")])
            .with_subjects(vec![
                Subject::new("MATH101").with_hours(1, 0),
                Subject::new("MATH201").with_hours(1, 0),
            ])
            .with_timeslots(slots)
            .with_duties(vec![
                TeachingDuty::new("MATH101", "T1"),
                TeachingDuty::new("MATH201", "T1"),
            ])
            .with_registrations(vec![
                Registration::new("MATH101", "G1"),
                Registration::new("MATH201", "G2"),
            ]);

        for seed in 0..20 {
            let timetable = GreedyScheduler::new().with_seed(seed).schedule(&request);
            assert_eq!(timetable.assignment_count(), 2);
            assert!(timetable.is_conflict_free(), "collision at seed {seed}");
            assert_ne!(
                timetable.assignments[0].timeslot_id,
                timetable.assignments[1].timeslot_id
            );
        }
    }

    #[test]
    fn test_capacity_exhaustion_places_what_fits() {
        // theory=3 but only two slot/room combinations exist
        let request = TimetableRequest::new()
            .with_rooms(vec![Room::new("R1")])
            .with_subjects(vec![Subject::new("MATH101").with_hours(3, 0)])
            .with_timeslots(vec![
                TimeSlot::new("S1", Day::Mon, 1),
                TimeSlot::new("S2", Day::Mon, 2),
            ])
            .with_duties(vec![TeachingDuty::new("MATH101", "T1")])
            .with_registrations(vec![Registration::new("MATH101", "G1")]);

        let timetable = GreedyScheduler::new().with_seed(9).schedule(&request);
        assert_eq!(timetable.assignment_count(), 2);
        assert_eq!(timetable.shortfalls.len(), 1);
        let short = &timetable.shortfalls[0];
        assert_eq!(short.required, 3);
        assert_eq!(short.placed, 2);
        assert_eq!(short.missing(), 1);
    }

    #[test]
    fn test_break_period_never_assigned() {
        // Only the break slot and one real slot; demand exceeds capacity
        let request = TimetableRequest::new()
            .with_rooms(vec![Room::new("R1")])
            .with_subjects(vec![Subject::new("MATH101").with_hours(2, 0)])
            .with_timeslots(vec![
                TimeSlot::new("S5", Day::Mon, 5),
                TimeSlot::new("S6", Day::Mon, 6),
            ])
            .with_duties(vec![TeachingDuty::new("MATH101", "T1")])
            .with_registrations(vec![Registration::new("MATH101", "G1")]);

        let timetable = GreedyScheduler::new().with_seed(5).schedule(&request);
        assert_eq!(timetable.assignment_count(), 1);
        assert_eq!(timetable.assignments[0].period, 6);
    }

    #[test]
    fn test_overflow_used_only_after_primary() {
        // 9 primary + 2 overflow slots, demand of 11 → all slots used
        let mut slots = primary_day(Day::Mon);
        slots.extend(overflow_day(Day::Mon));
        let request = TimetableRequest::new()
            .with_rooms(vec![Room::new("R1")])
            .with_subjects(vec![Subject::new("MATH101").with_hours(6, 5)])
            .with_timeslots(slots)
            .with_duties(vec![TeachingDuty::new("MATH101", "T1")])
            .with_registrations(vec![Registration::new("MATH101", "G1")]);

        let timetable = GreedyScheduler::new().with_seed(11).schedule(&request);
        assert_eq!(timetable.assignment_count(), 11);
        let overflow_used = timetable
            .assignments
            .iter()
            .filter(|a| a.period > 10)
            .count();
        assert_eq!(overflow_used, 2);
    }

    #[test]
    fn test_room_tie_break_follows_input_order() {
        // Two free rooms: the first in the relation always wins
        let request = TimetableRequest::new()
            .with_rooms(vec![Room::new("R_FIRST"), Room::new("R_SECOND")])
            .with_subjects(vec![Subject::new("MATH101").with_hours(1, 0)])
            .with_timeslots(vec![TimeSlot::new("S1", Day::Mon, 1)])
            .with_duties(vec![TeachingDuty::new("MATH101", "T1")])
            .with_registrations(vec![Registration::new("MATH101", "G1")]);

        let timetable = GreedyScheduler::new().with_seed(2).schedule(&request);
        assert_eq!(timetable.assignments[0].room_id, "R_FIRST");
    }

    #[test]
    fn test_zero_hour_subject_places_nothing() {
        let request = basic_request()
            .with_subjects(vec![Subject::new("MATH101").with_hours(0, 0)]);
        let timetable = GreedyScheduler::new().with_seed(4).schedule(&request);
        assert_eq!(timetable.assignment_count(), 0);
        assert!(timetable.shortfalls.is_empty());
    }

    #[test]
    fn test_same_seed_reproduces_run() {
        let request = dense_request();
        let scheduler = GreedyScheduler::new().with_seed(1234);
        let first = scheduler.schedule(&request);
        let second = scheduler.schedule(&request);
        assert_eq!(first.assignments, second.assignments);
        assert_eq!(first.shortfalls, second.shortfalls);
    }

    #[test]
    fn test_caller_supplied_rng() {
        let request = basic_request();
        let scheduler = GreedyScheduler::new();
        let mut rng_a = SmallRng::seed_from_u64(77);
        let mut rng_b = SmallRng::seed_from_u64(77);
        let a = scheduler.schedule_with_rng(&request, &mut rng_a);
        let b = scheduler.schedule_with_rng(&request, &mut rng_b);
        assert_eq!(a.assignments, b.assignments);
    }

    /// Many groups and subjects over a full week; enough pressure to
    /// exercise every skip branch.
    fn dense_request() -> TimetableRequest {
        let mut slots = Vec::new();
        for day in Day::ALL {
            slots.extend(primary_day(day));
            slots.extend(overflow_day(day));
        }
        let subjects: Vec<Subject> = (0..8)
            .map(|i| Subject::new(format!("SUB{i}")).with_hours(2 + (i % 3) as u32, 1))
            .collect();
        let duties: Vec<TeachingDuty> = (0..8)
            .map(|i| TeachingDuty::new(format!("SUB{i}"), format!("T{}", i % 3)))
            .collect();
        let mut registrations = Vec::new();
        for g in 0..4 {
            for s in 0..8 {
                registrations.push(Registration::new(format!("SUB{s}"), format!("G{g}")));
            }
        }
        TimetableRequest::new()
            .with_rooms(vec![Room::new("R1"), Room::new("R2"), Room::new("R3")])
            .with_subjects(subjects)
            .with_timeslots(slots)
            .with_duties(duties)
            .with_registrations(registrations)
    }

    #[test]
    fn test_dense_week_stays_conflict_free() {
        for seed in [0u64, 7, 99, 2024] {
            let timetable = GreedyScheduler::new()
                .with_seed(seed)
                .schedule(&dense_request());
            assert!(timetable.is_conflict_free(), "conflict at seed {seed}");
            for a in &timetable.assignments {
                assert!(a.period >= 1 && a.period <= 12);
                assert_ne!(a.period, 5);
            }
        }
    }

    #[test]
    fn test_upper_bound_per_demand() {
        let request = dense_request();
        let timetable = GreedyScheduler::new().with_seed(8).schedule(&request);
        for registration in &request.registrations {
            let required = request
                .subject(&registration.subject_id)
                .map(|s| s.weekly_hours())
                .unwrap_or(0);
            let placed =
                timetable.placed_hours(&registration.subject_id, &registration.group_id);
            assert!(placed <= required);
        }
    }
}
