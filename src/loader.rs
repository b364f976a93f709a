//! CSV ingestion of the seven input relations.
//!
//! Normalizes data on the way in so the engine never sees raw cells:
//! string fields are trimmed, `NaN`-like cells become empty strings, and
//! malformed hour/period counts coerce to 0. Structural problems (an
//! unreadable file, a missing key column, an unrecognized day code)
//! are fatal here; the engine downstream never raises them.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{Day, Registration, Room, StudentGroup, Subject, Teacher, TeachingDuty, TimeSlot};
use crate::scheduler::TimetableRequest;

/// Errors raised while loading input relations.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("failed to open {}", path.display())]
    Io {
        /// Path of the offending file.
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The CSV content could not be parsed into the expected rows.
    #[error("malformed CSV input")]
    Csv(#[from] csv::Error),
    /// A timeslot row carries a day code outside Mon–Fri.
    #[error("timeslot '{timeslot_id}': unrecognized day code '{day}'")]
    UnknownDay {
        /// Timeslot whose day failed to parse.
        timeslot_id: String,
        /// The rejected day cell.
        day: String,
    },
}

#[derive(Debug, Deserialize)]
struct TeacherRow {
    teacher_id: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
}

#[derive(Debug, Deserialize)]
struct RoomRow {
    room_id: String,
    #[serde(default)]
    room_name: String,
}

#[derive(Debug, Deserialize)]
struct GroupRow {
    group_id: String,
    #[serde(default)]
    group_name: String,
}

#[derive(Debug, Deserialize)]
struct SubjectRow {
    subject_id: String,
    #[serde(default)]
    subject_name: String,
    #[serde(default)]
    theory: String,
    #[serde(default)]
    practice: String,
}

#[derive(Debug, Deserialize)]
struct TimeslotRow {
    timeslot_id: String,
    day: String,
    #[serde(default)]
    period: String,
}

#[derive(Debug, Deserialize)]
struct TeachRow {
    subject_id: String,
    teacher_id: String,
}

#[derive(Debug, Deserialize)]
struct RegisterRow {
    subject_id: String,
    group_id: String,
}

/// Trims a cell and maps `NaN`-like content to the empty string.
fn clean(cell: &str) -> String {
    let trimmed = cell.trim();
    if trimmed.eq_ignore_ascii_case("nan") {
        String::new()
    } else {
        trimmed.to_string()
    }
}

/// Parses a non-negative count, coercing anything malformed to 0.
fn parse_count(cell: &str) -> u32 {
    clean(cell).parse().unwrap_or(0)
}

fn parse_period(cell: &str) -> u8 {
    clean(cell).parse().unwrap_or(0)
}

fn read_rows<T: DeserializeOwned, R: io::Read>(reader: R) -> Result<Vec<T>, csv::Error> {
    let mut rdr = csv::Reader::from_reader(reader);
    rdr.deserialize().collect()
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_teachers<R: io::Read>(reader: R) -> Result<Vec<Teacher>, LoadError> {
    Ok(read_rows::<TeacherRow, _>(reader)?
        .into_iter()
        .map(|row| Teacher {
            teacher_id: clean(&row.teacher_id),
            first_name: clean(&row.first_name),
            last_name: clean(&row.last_name),
        })
        .collect())
}

fn parse_rooms<R: io::Read>(reader: R) -> Result<Vec<Room>, LoadError> {
    Ok(read_rows::<RoomRow, _>(reader)?
        .into_iter()
        .map(|row| Room {
            room_id: clean(&row.room_id),
            room_name: clean(&row.room_name),
        })
        .collect())
}

fn parse_groups<R: io::Read>(reader: R) -> Result<Vec<StudentGroup>, LoadError> {
    Ok(read_rows::<GroupRow, _>(reader)?
        .into_iter()
        .map(|row| StudentGroup {
            group_id: clean(&row.group_id),
            group_name: clean(&row.group_name),
        })
        .collect())
}

fn parse_subjects<R: io::Read>(reader: R) -> Result<Vec<Subject>, LoadError> {
    Ok(read_rows::<SubjectRow, _>(reader)?
        .into_iter()
        .map(|row| Subject {
            subject_id: clean(&row.subject_id),
            subject_name: clean(&row.subject_name),
            theory: parse_count(&row.theory),
            practice: parse_count(&row.practice),
        })
        .collect())
}

fn parse_timeslots<R: io::Read>(reader: R) -> Result<Vec<TimeSlot>, LoadError> {
    let mut slots = Vec::new();
    for row in read_rows::<TimeslotRow, _>(reader)? {
        let timeslot_id = clean(&row.timeslot_id);
        let day_code = clean(&row.day);
        let day = Day::from_code(&day_code).ok_or_else(|| LoadError::UnknownDay {
            timeslot_id: timeslot_id.clone(),
            day: day_code,
        })?;
        slots.push(TimeSlot {
            timeslot_id,
            day,
            period: parse_period(&row.period),
        });
    }
    Ok(slots)
}

fn parse_duties<R: io::Read>(reader: R) -> Result<Vec<TeachingDuty>, LoadError> {
    Ok(read_rows::<TeachRow, _>(reader)?
        .into_iter()
        .map(|row| TeachingDuty {
            subject_id: clean(&row.subject_id),
            teacher_id: clean(&row.teacher_id),
        })
        .collect())
}

fn parse_registrations<R: io::Read>(reader: R) -> Result<Vec<Registration>, LoadError> {
    Ok(read_rows::<RegisterRow, _>(reader)?
        .into_iter()
        .map(|row| Registration {
            subject_id: clean(&row.subject_id),
            group_id: clean(&row.group_id),
        })
        .collect())
}

/// Loads the teacher relation from a CSV file.
pub fn load_teachers(path: impl AsRef<Path>) -> Result<Vec<Teacher>, LoadError> {
    parse_teachers(open(path.as_ref())?)
}

/// Loads the room relation from a CSV file.
pub fn load_rooms(path: impl AsRef<Path>) -> Result<Vec<Room>, LoadError> {
    parse_rooms(open(path.as_ref())?)
}

/// Loads the student group relation from a CSV file.
pub fn load_groups(path: impl AsRef<Path>) -> Result<Vec<StudentGroup>, LoadError> {
    parse_groups(open(path.as_ref())?)
}

/// Loads the subject relation from a CSV file.
pub fn load_subjects(path: impl AsRef<Path>) -> Result<Vec<Subject>, LoadError> {
    parse_subjects(open(path.as_ref())?)
}

/// Loads the timeslot relation from a CSV file.
pub fn load_timeslots(path: impl AsRef<Path>) -> Result<Vec<TimeSlot>, LoadError> {
    parse_timeslots(open(path.as_ref())?)
}

/// Loads the teach relation from a CSV file.
pub fn load_duties(path: impl AsRef<Path>) -> Result<Vec<TeachingDuty>, LoadError> {
    parse_duties(open(path.as_ref())?)
}

/// Loads the register relation from a CSV file.
pub fn load_registrations(path: impl AsRef<Path>) -> Result<Vec<Registration>, LoadError> {
    parse_registrations(open(path.as_ref())?)
}

/// Loads a complete request from a directory of CSV files.
///
/// Expects `teacher.csv`, `room.csv`, `student_group.csv`,
/// `subject.csv`, `timeslot.csv`, `teach.csv`, and `register.csv`.
pub fn load_request(dir: impl AsRef<Path>) -> Result<TimetableRequest, LoadError> {
    let dir = dir.as_ref();
    Ok(TimetableRequest::new()
        .with_teachers(load_teachers(dir.join("teacher.csv"))?)
        .with_rooms(load_rooms(dir.join("room.csv"))?)
        .with_groups(load_groups(dir.join("student_group.csv"))?)
        .with_subjects(load_subjects(dir.join("subject.csv"))?)
        .with_timeslots(load_timeslots(dir.join("timeslot.csv"))?)
        .with_duties(load_duties(dir.join("teach.csv"))?)
        .with_registrations(load_registrations(dir.join("register.csv"))?))
}
