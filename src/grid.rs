//! Day × period view model and HTML rendering.
//!
//! Turns a timetable into the fixed weekly grid the renderer contract
//! expects: five days by twelve periods, with period 5 as a permanent
//! break column. A grid is always built for one view (a single group,
//! teacher, or room), matching the three selector tabs of the UI shell.

use std::collections::HashMap;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::models::{period_label, Assignment, Day, Timetable, BREAK_PERIOD, PERIOD_COUNT};
use crate::scheduler::TimetableRequest;

/// Which slice of the timetable a grid shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridView {
    /// All sessions of one student group.
    Group(String),
    /// All sessions of one teacher.
    Teacher(String),
    /// All sessions in one room.
    Room(String),
}

impl GridView {
    fn matches(&self, assignment: &Assignment) -> bool {
        match self {
            GridView::Group(id) => assignment.group_id == *id,
            GridView::Teacher(id) => assignment.teacher_id == *id,
            GridView::Room(id) => assignment.room_id == *id,
        }
    }

    /// The ID the view filters on.
    pub fn key(&self) -> &str {
        match self {
            GridView::Group(id) | GridView::Teacher(id) | GridView::Room(id) => id,
        }
    }
}

/// One occupied cell of the weekly grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    /// Subject taught in this cell.
    pub subject_id: String,
    /// Teacher giving the session.
    pub teacher_id: String,
    /// Room hosting the session.
    pub room_id: String,
    /// Group receiving the session.
    pub group_id: String,
}

/// Display-name lookups for rendering.
///
/// Falls back to the raw ID wherever no name is known.
#[derive(Debug, Clone, Default)]
pub struct DisplayLabels {
    teachers: HashMap<String, String>,
    rooms: HashMap<String, String>,
    groups: HashMap<String, String>,
}

impl DisplayLabels {
    /// Builds lookups from the request's inventory relations.
    pub fn from_request(request: &TimetableRequest) -> Self {
        Self {
            teachers: request
                .teachers
                .iter()
                .map(|t| (t.teacher_id.clone(), t.display_name()))
                .collect(),
            rooms: request
                .rooms
                .iter()
                .map(|r| (r.room_id.clone(), r.display_name().to_string()))
                .collect(),
            groups: request
                .groups
                .iter()
                .map(|g| (g.group_id.clone(), g.display_name().to_string()))
                .collect(),
        }
    }

    /// Display name for a teacher ID.
    pub fn teacher<'a>(&'a self, id: &'a str) -> &'a str {
        self.teachers.get(id).map(String::as_str).unwrap_or(id)
    }

    /// Display name for a room ID.
    pub fn room<'a>(&'a self, id: &'a str) -> &'a str {
        self.rooms.get(id).map(String::as_str).unwrap_or(id)
    }

    /// Display name for a group ID.
    pub fn group<'a>(&'a self, id: &'a str) -> &'a str {
        self.groups.get(id).map(String::as_str).unwrap_or(id)
    }
}

/// A five-day, twelve-period grid for one view of a timetable.
#[derive(Debug, Clone)]
pub struct WeekGrid {
    /// The view this grid was built for.
    pub view: GridView,
    cells: HashMap<(Day, u8), GridCell>,
}

impl WeekGrid {
    /// Builds the grid for one view.
    ///
    /// On a conflict-free timetable each (day, period) cell is hit at
    /// most once per view; if the input violates that, the first
    /// assignment wins.
    pub fn build(timetable: &Timetable, view: GridView) -> Self {
        let mut cells = HashMap::new();
        for a in timetable.assignments.iter().filter(|a| view.matches(a)) {
            cells.entry((a.day, a.period)).or_insert_with(|| GridCell {
                subject_id: a.subject_id.clone(),
                teacher_id: a.teacher_id.clone(),
                room_id: a.room_id.clone(),
                group_id: a.group_id.clone(),
            });
        }
        Self { view, cells }
    }

    /// The cell at (day, period), if occupied.
    pub fn cell(&self, day: Day, period: u8) -> Option<&GridCell> {
        self.cells.get(&(day, period))
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.len()
    }

    /// Renders the grid as an HTML table.
    ///
    /// Header row carries period numbers with wall-clock labels; the
    /// break period renders as a fixed "Break" column; occupied cells
    /// show subject, teacher, and room.
    pub fn to_html(&self, labels: &DisplayLabels) -> String {
        let mut html = String::new();
        html.push_str("<table class=\"timetable\">\n<thead>\n<tr><th>Day / Time</th>");
        for period in 1..=PERIOD_COUNT {
            let _ = write!(
                html,
                "<th><div>{}</div>Period {}</th>",
                period_label(period).unwrap_or(""),
                period
            );
        }
        html.push_str("</tr>\n</thead>\n<tbody>\n");

        for day in Day::ALL {
            let _ = write!(html, "<tr><td>{day}</td>");
            for period in 1..=PERIOD_COUNT {
                if period == BREAK_PERIOD {
                    html.push_str("<td class=\"break\">Break</td>");
                    continue;
                }
                match self.cell(day, period) {
                    Some(cell) => {
                        let _ = write!(
                            html,
                            "<td><b>{}</b><br>{}<br>{}</td>",
                            cell.subject_id,
                            labels.teacher(&cell.teacher_id),
                            labels.room(&cell.room_id)
                        );
                    }
                    None => html.push_str("<td></td>"),
                }
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</tbody>\n</table>\n");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Room, StudentGroup, Teacher, TimeSlot};

    fn sample_timetable() -> Timetable {
        let mut t = Timetable::new();
        t.add_assignment(Assignment::new(
            "G1",
            &TimeSlot::new("S1", Day::Mon, 1),
            "MATH101",
            "T1",
            "R1",
        ));
        t.add_assignment(Assignment::new(
            "G1",
            &TimeSlot::new("S2", Day::Tue, 6),
            "ENG102",
            "T2",
            "R2",
        ));
        t.add_assignment(Assignment::new(
            "G2",
            &TimeSlot::new("S3", Day::Mon, 1),
            "MATH101",
            "T3",
            "R3",
        ));
        t
    }

    fn sample_labels() -> DisplayLabels {
        DisplayLabels::from_request(
            &TimetableRequest::new()
                .with_teachers(vec![Teacher::new("T1").with_name("Ada", "Lovelace")])
                .with_rooms(vec![Room::new("R1").with_name("Lab 101")])
                .with_groups(vec![StudentGroup::new("G1").with_name("CS Year 1")]),
        )
    }

    #[test]
    fn test_group_view_filters() {
        let grid = WeekGrid::build(&sample_timetable(), GridView::Group("G1".into()));
        assert_eq!(grid.occupied_count(), 2);
        assert_eq!(grid.cell(Day::Mon, 1).unwrap().subject_id, "MATH101");
        assert_eq!(grid.cell(Day::Tue, 6).unwrap().subject_id, "ENG102");
        assert!(grid.cell(Day::Wed, 1).is_none());
    }

    #[test]
    fn test_teacher_and_room_views() {
        let t = sample_timetable();
        let by_teacher = WeekGrid::build(&t, GridView::Teacher("T3".into()));
        assert_eq!(by_teacher.occupied_count(), 1);
        assert_eq!(by_teacher.cell(Day::Mon, 1).unwrap().group_id, "G2");

        let by_room = WeekGrid::build(&t, GridView::Room("R2".into()));
        assert_eq!(by_room.occupied_count(), 1);
        assert_eq!(by_room.cell(Day::Tue, 6).unwrap().teacher_id, "T2");
    }

    #[test]
    fn test_view_key() {
        assert_eq!(GridView::Group("G1".into()).key(), "G1");
        assert_eq!(GridView::Teacher("T1".into()).key(), "T1");
        assert_eq!(GridView::Room("R1".into()).key(), "R1");
    }

    #[test]
    fn test_html_contains_break_and_labels() {
        let grid = WeekGrid::build(&sample_timetable(), GridView::Group("G1".into()));
        let html = grid.to_html(&sample_labels());

        // One break cell per day
        assert_eq!(html.matches(">Break<").count(), 5);
        assert!(html.contains("08.00-09.00"));
        assert!(html.contains("Period 12"));
        assert!(html.contains("<b>MATH101</b><br>Ada Lovelace<br>Lab 101"));
        // Unknown IDs fall back to themselves
        assert!(html.contains("<b>ENG102</b><br>T2<br>R2"));
    }

    #[test]
    fn test_html_empty_grid() {
        let grid = WeekGrid::build(&Timetable::new(), GridView::Group("G1".into()));
        let html = grid.to_html(&DisplayLabels::default());
        assert_eq!(html.matches("<tr>").count(), 6); // header + 5 days
    }

    #[test]
    fn test_label_fallbacks() {
        let labels = sample_labels();
        assert_eq!(labels.teacher("T1"), "Ada Lovelace");
        assert_eq!(labels.teacher("T9"), "T9");
        assert_eq!(labels.room("R1"), "Lab 101");
        assert_eq!(labels.group("G1"), "CS Year 1");
        assert_eq!(labels.group("G9"), "G9");
    }
}
