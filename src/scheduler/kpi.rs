//! Timetable quality metrics (KPIs).
//!
//! Computes placement indicators from a completed timetable and the
//! request that produced it.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Demanded Hours | Sum of `theory + practice` over all registrations |
//! | Placed Hours | Sessions actually assigned |
//! | Fill Rate | placed / demanded |
//! | Hours by Group | Placed sessions per student group |
//! | Hours by Teacher | Placed sessions per teacher |
//! | Room Utilization | Used slots / schedulable slots, per room |

use std::collections::HashMap;

use crate::models::Timetable;

use super::TimetableRequest;

/// Timetable placement indicators.
#[derive(Debug, Clone)]
pub struct TimetableKpi {
    /// Total sessions demanded by the register relation.
    ///
    /// Registrations naming an unknown subject contribute zero.
    pub demanded_hours: u32,
    /// Sessions actually placed.
    pub placed_hours: u32,
    /// placed / demanded (1.0 when nothing was demanded).
    pub fill_rate: f64,
    /// Number of demands that ran short.
    pub shortfall_count: usize,
    /// Placed sessions per group.
    pub hours_by_group: HashMap<String, u32>,
    /// Placed sessions per teacher.
    pub hours_by_teacher: HashMap<String, u32>,
    /// Per-room fraction of schedulable slots in use (0.0..1.0).
    pub room_utilization: HashMap<String, f64>,
}

impl TimetableKpi {
    /// Computes KPIs from a timetable and its request.
    pub fn calculate(timetable: &Timetable, request: &TimetableRequest) -> Self {
        let demanded_hours: u32 = request
            .registrations
            .iter()
            .filter_map(|r| request.subject(&r.subject_id))
            .map(|s| s.weekly_hours())
            .sum();

        let placed_hours = timetable.assignment_count() as u32;

        let fill_rate = if demanded_hours == 0 {
            1.0
        } else {
            placed_hours as f64 / demanded_hours as f64
        };

        let mut hours_by_group: HashMap<String, u32> = HashMap::new();
        let mut hours_by_teacher: HashMap<String, u32> = HashMap::new();
        let mut used_by_room: HashMap<String, u32> = HashMap::new();
        for a in &timetable.assignments {
            *hours_by_group.entry(a.group_id.clone()).or_insert(0) += 1;
            *hours_by_teacher.entry(a.teacher_id.clone()).or_insert(0) += 1;
            *used_by_room.entry(a.room_id.clone()).or_insert(0) += 1;
        }

        // A room can host one session per schedulable (non-break) slot
        let schedulable = request
            .timeslots
            .iter()
            .filter(|s| s.band().is_some())
            .count() as u32;
        let room_utilization = if schedulable == 0 {
            HashMap::new()
        } else {
            request
                .rooms
                .iter()
                .map(|r| {
                    let used = used_by_room.get(&r.room_id).copied().unwrap_or(0);
                    (r.room_id.clone(), used as f64 / schedulable as f64)
                })
                .collect()
        };

        Self {
            demanded_hours,
            placed_hours,
            fill_rate,
            shortfall_count: timetable.shortfalls.len(),
            hours_by_group,
            hours_by_teacher,
            room_utilization,
        }
    }
}
