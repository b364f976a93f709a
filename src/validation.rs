//! Input validation for timetabling requests.
//!
//! Advisory pre-flight checks on the seven input relations. Detects:
//! - Duplicate IDs in the keyed relations
//! - Duty and registration rows referencing unknown entities
//! - Timeslot periods outside the 1–12 grid
//!
//! The engine itself runs on unvalidated input and skips over data gaps;
//! these checks exist so a loader or UI can surface problems up front.

use std::collections::HashSet;

use crate::models::PERIOD_COUNT;
use crate::scheduler::TimetableRequest;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two rows of a keyed relation share the same ID.
    DuplicateId,
    /// A duty or registration names a subject that doesn't exist.
    UnknownSubject,
    /// A duty names a teacher that doesn't exist.
    UnknownTeacher,
    /// A registration names a group that doesn't exist.
    UnknownGroup,
    /// A timeslot period lies outside the weekly grid.
    PeriodOutOfRange,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a timetabling request.
///
/// Checks:
/// 1. No duplicate teacher, room, group, subject, or timeslot IDs
/// 2. Every duty names an existing subject and teacher
/// 3. Every registration names an existing subject and group
/// 4. Every timeslot period is within 1–12
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(request: &TimetableRequest) -> ValidationResult {
    let mut errors = Vec::new();

    let teacher_ids = collect_unique(
        request.teachers.iter().map(|t| t.teacher_id.as_str()),
        "teacher",
        &mut errors,
    );
    collect_unique(
        request.rooms.iter().map(|r| r.room_id.as_str()),
        "room",
        &mut errors,
    );
    let group_ids = collect_unique(
        request.groups.iter().map(|g| g.group_id.as_str()),
        "group",
        &mut errors,
    );
    let subject_ids = collect_unique(
        request.subjects.iter().map(|s| s.subject_id.as_str()),
        "subject",
        &mut errors,
    );
    collect_unique(
        request.timeslots.iter().map(|s| s.timeslot_id.as_str()),
        "timeslot",
        &mut errors,
    );

    for duty in &request.duties {
        if !subject_ids.contains(duty.subject_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownSubject,
                format!("Duty references unknown subject '{}'", duty.subject_id),
            ));
        }
        if !teacher_ids.contains(duty.teacher_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTeacher,
                format!("Duty references unknown teacher '{}'", duty.teacher_id),
            ));
        }
    }

    for registration in &request.registrations {
        if !subject_ids.contains(registration.subject_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownSubject,
                format!(
                    "Registration references unknown subject '{}'",
                    registration.subject_id
                ),
            ));
        }
        if !group_ids.contains(registration.group_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownGroup,
                format!(
                    "Registration references unknown group '{}'",
                    registration.group_id
                ),
            ));
        }
    }

    for slot in &request.timeslots {
        if slot.period < 1 || slot.period > PERIOD_COUNT {
            errors.push(ValidationError::new(
                ValidationErrorKind::PeriodOutOfRange,
                format!(
                    "Timeslot '{}' has period {} outside 1-{PERIOD_COUNT}",
                    slot.timeslot_id, slot.period
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn collect_unique<'a>(
    ids: impl Iterator<Item = &'a str>,
    relation: &str,
    errors: &mut Vec<ValidationError>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {relation} ID: {id}"),
            ));
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Day, Registration, Room, StudentGroup, Subject, Teacher, TeachingDuty, TimeSlot,
    };

    fn sample_request() -> TimetableRequest {
        TimetableRequest::new()
            .with_teachers(vec![Teacher::new("T1"), Teacher::new("T2")])
            .with_rooms(vec![Room::new("R1")])
            .with_groups(vec![StudentGroup::new("G1")])
            .with_subjects(vec![Subject::new("MATH101").with_hours(2, 0)])
            .with_timeslots(vec![
                TimeSlot::new("S1", Day::Mon, 1),
                TimeSlot::new("S2", Day::Mon, 2),
            ])
            .with_duties(vec![TeachingDuty::new("MATH101", "T1")])
            .with_registrations(vec![Registration::new("MATH101", "G1")])
    }

    #[test]
    fn test_valid_request() {
        assert!(validate_request(&sample_request()).is_ok());
    }

    #[test]
    fn test_duplicate_subject_id() {
        let request = sample_request().with_subjects(vec![
            Subject::new("MATH101"),
            Subject::new("MATH101"),
        ]);
        let errors = validate_request(&request).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("subject")));
    }

    #[test]
    fn test_duplicate_timeslot_id() {
        let request = sample_request().with_timeslots(vec![
            TimeSlot::new("S1", Day::Mon, 1),
            TimeSlot::new("S1", Day::Tue, 2),
        ]);
        let errors = validate_request(&request).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_duty_unknown_subject_and_teacher() {
        let request = sample_request()
            .with_duties(vec![TeachingDuty::new("GHOST", "NOBODY")]);
        let errors = validate_request(&request).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownSubject));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownTeacher));
    }

    #[test]
    fn test_registration_unknown_group() {
        let request = sample_request()
            .with_registrations(vec![Registration::new("MATH101", "G99")]);
        let errors = validate_request(&request).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownGroup));
    }

    #[test]
    fn test_period_out_of_range() {
        let request = sample_request().with_timeslots(vec![
            TimeSlot::new("S0", Day::Mon, 0),
            TimeSlot::new("S13", Day::Mon, 13),
        ]);
        let errors = validate_request(&request).unwrap_err();
        let out_of_range = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::PeriodOutOfRange)
            .count();
        assert_eq!(out_of_range, 2);
    }

    #[test]
    fn test_multiple_errors_collected() {
        let request = sample_request()
            .with_subjects(vec![])
            .with_timeslots(vec![TimeSlot::new("S0", Day::Mon, 0)]);
        let errors = validate_request(&request).unwrap_err();
        // Unknown subject in duty + in registration + bad period
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_empty_request_is_valid() {
        assert!(validate_request(&TimetableRequest::new()).is_ok());
    }
}
