//! Timetable (solution) model.
//!
//! A timetable is the output of one engine run: a list of placed
//! sessions plus a shortfall record for every demand that could not be
//! filled completely. A short timetable is still a valid timetable:
//! capacity exhaustion is reported, never raised as an error.

use serde::{Deserialize, Serialize};

use super::timeslot::{Day, TimeSlot, BREAK_PERIOD};
use std::collections::HashSet;

/// One placed session: a group meets a teacher in a room at a timeslot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Group receiving the session.
    pub group_id: String,
    /// Occupied timeslot.
    pub timeslot_id: String,
    /// Day of the slot (denormalized for rendering).
    pub day: Day,
    /// Period of the slot (denormalized for rendering).
    pub period: u8,
    /// Subject taught.
    pub subject_id: String,
    /// Teacher giving the session.
    pub teacher_id: String,
    /// Room hosting the session.
    pub room_id: String,
}

impl Assignment {
    /// Creates an assignment at the given slot.
    pub fn new(
        group_id: impl Into<String>,
        slot: &TimeSlot,
        subject_id: impl Into<String>,
        teacher_id: impl Into<String>,
        room_id: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            timeslot_id: slot.timeslot_id.clone(),
            day: slot.day,
            period: slot.period,
            subject_id: subject_id.into(),
            teacher_id: teacher_id.into(),
            room_id: room_id.into(),
        }
    }
}

/// A demand that ran out of free slot/room combinations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    /// Demanded subject.
    pub subject_id: String,
    /// Group that demanded it.
    pub group_id: String,
    /// Sessions the demand required (`theory + practice`).
    pub required: u32,
    /// Sessions actually placed.
    pub placed: u32,
}

impl Shortfall {
    /// Sessions left unplaced.
    #[inline]
    pub fn missing(&self) -> u32 {
        self.required - self.placed
    }
}

/// A complete weekly timetable.
///
/// Assignment order is placement order and carries no meaning beyond
/// debugging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timetable {
    /// Placed sessions.
    pub assignments: Vec<Assignment>,
    /// Demands that could not be filled completely.
    pub shortfalls: Vec<Shortfall>,
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Adds a shortfall record.
    pub fn add_shortfall(&mut self, shortfall: Shortfall) {
        self.shortfalls.push(shortfall);
    }

    /// Whether every demand was filled completely.
    pub fn is_fully_placed(&self) -> bool {
        self.shortfalls.is_empty()
    }

    /// Number of placed sessions.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// All sessions of a group.
    pub fn assignments_for_group(&self, group_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.group_id == group_id)
            .collect()
    }

    /// All sessions of a teacher.
    pub fn assignments_for_teacher(&self, teacher_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.teacher_id == teacher_id)
            .collect()
    }

    /// All sessions in a room.
    pub fn assignments_for_room(&self, room_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.room_id == room_id)
            .collect()
    }

    /// Number of sessions placed for one (subject, group) demand.
    pub fn placed_hours(&self, subject_id: &str, group_id: &str) -> u32 {
        self.assignments
            .iter()
            .filter(|a| a.subject_id == subject_id && a.group_id == group_id)
            .count() as u32
    }

    /// Checks the hard placement invariants.
    ///
    /// Returns `true` iff no teacher, room, or group occupies the same
    /// timeslot twice and no session sits on the break period.
    pub fn is_conflict_free(&self) -> bool {
        let mut teachers = HashSet::new();
        let mut rooms = HashSet::new();
        let mut groups = HashSet::new();

        for a in &self.assignments {
            if a.period == BREAK_PERIOD {
                return false;
            }
            if !teachers.insert((a.teacher_id.as_str(), a.timeslot_id.as_str())) {
                return false;
            }
            if !rooms.insert((a.room_id.as_str(), a.timeslot_id.as_str())) {
                return false;
            }
            if !groups.insert((a.group_id.as_str(), a.timeslot_id.as_str())) {
                return false;
            }
        }
        true
    }
}
