//! Core timetabling entities.
//!
//! Teachers, rooms, student groups, and subjects are the fixed inventory
//! a timetable is built from. Each carries a unique string ID that the
//! input relations reference; display names are optional and only used
//! by renderers.

use serde::{Deserialize, Serialize};

/// A teacher who can be assigned to class sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub teacher_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

impl Teacher {
    /// Creates a new teacher with the given ID.
    pub fn new(teacher_id: impl Into<String>) -> Self {
        Self {
            teacher_id: teacher_id.into(),
            first_name: String::new(),
            last_name: String::new(),
        }
    }

    /// Sets the name parts.
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    /// Display name: "First Last", falling back to the ID when both
    /// name parts are empty.
    pub fn display_name(&self) -> String {
        if self.first_name.is_empty() && self.last_name.is_empty() {
            return self.teacher_id.clone();
        }
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A room where class sessions take place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub room_id: String,
    /// Human-readable name.
    pub room_name: String,
}

impl Room {
    /// Creates a new room with the given ID.
    pub fn new(room_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            room_name: String::new(),
        }
    }

    /// Sets the room name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.room_name = name.into();
        self
    }

    /// Display name, falling back to the ID when unset.
    pub fn display_name(&self) -> &str {
        if self.room_name.is_empty() {
            &self.room_id
        } else {
            &self.room_name
        }
    }
}

/// A student group (class section) that receives sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentGroup {
    /// Unique group identifier.
    pub group_id: String,
    /// Human-readable name.
    pub group_name: String,
}

impl StudentGroup {
    /// Creates a new student group with the given ID.
    pub fn new(group_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            group_name: String::new(),
        }
    }

    /// Sets the group name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.group_name = name.into();
        self
    }

    /// Display name, falling back to the ID when unset.
    pub fn display_name(&self) -> &str {
        if self.group_name.is_empty() {
            &self.group_id
        } else {
            &self.group_name
        }
    }
}

/// A subject with its required weekly hour counts.
///
/// A subject demands `theory + practice` one-period sessions per week
/// for every group registered to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject identifier.
    pub subject_id: String,
    /// Human-readable name.
    pub subject_name: String,
    /// Weekly theory hours.
    pub theory: u32,
    /// Weekly practice hours.
    pub practice: u32,
}

impl Subject {
    /// Creates a new subject with no hour requirements.
    pub fn new(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            subject_name: String::new(),
            theory: 0,
            practice: 0,
        }
    }

    /// Sets the subject name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.subject_name = name.into();
        self
    }

    /// Sets the weekly hour requirements.
    pub fn with_hours(mut self, theory: u32, practice: u32) -> Self {
        self.theory = theory;
        self.practice = practice;
        self
    }

    /// Total sessions demanded per week: `theory + practice`.
    #[inline]
    pub fn weekly_hours(&self) -> u32 {
        self.theory + self.practice
    }
}
