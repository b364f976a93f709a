//! Demand relations: who teaches what, and who takes what.
//!
//! These are the two many-row input relations. `TeachingDuty` maps a
//! subject to its teacher (the first row per subject wins). Each
//! `Registration` is one demand: the group must receive the subject's
//! full weekly hours. Registration order is the de-facto placement
//! priority; earlier rows get first pick of slots.

use serde::{Deserialize, Serialize};

/// One row of the teach relation: a subject taught by a teacher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeachingDuty {
    /// Subject being taught.
    pub subject_id: String,
    /// Teacher responsible for every session of the subject.
    pub teacher_id: String,
}

impl TeachingDuty {
    /// Creates a new teaching duty.
    pub fn new(subject_id: impl Into<String>, teacher_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            teacher_id: teacher_id.into(),
        }
    }
}

/// One row of the register relation: a group demanding a subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    /// Demanded subject.
    pub subject_id: String,
    /// Group receiving the sessions.
    pub group_id: String,
}

impl Registration {
    /// Creates a new registration.
    pub fn new(subject_id: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            group_id: group_id.into(),
        }
    }
}
