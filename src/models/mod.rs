//! Timetabling domain models.
//!
//! Provides the core data types for representing a weekly timetabling
//! problem and its solution: the fixed inventory (teachers, rooms,
//! groups, subjects), the week grid (days and periods), the demand
//! relations, and the resulting `Timetable`.

mod demand;
mod entity;
mod timeslot;
mod timetable;

pub use demand::{Registration, TeachingDuty};
pub use entity::{Room, StudentGroup, Subject, Teacher};
pub use timeslot::{
    period_label, Day, SlotBand, TimeSlot, BREAK_PERIOD, PERIOD_COUNT, PERIOD_LABELS, PRIMARY_END,
};
pub use timetable::{Assignment, Shortfall, Timetable};
