//! Week grid time model.
//!
//! The teaching week is a fixed grid of five days (Mon–Fri) by twelve
//! one-hour periods. Period 5 is a permanent break and is never
//! assigned. Periods 1–4 and 6–10 form the primary teaching band;
//! periods 11–12 are an overflow band used only when the primary band
//! is exhausted.

use serde::{Deserialize, Serialize};

/// The fixed lunch-break period. Excluded from placement.
pub const BREAK_PERIOD: u8 = 5;

/// Last period of the primary teaching band.
pub const PRIMARY_END: u8 = 10;

/// Number of periods in the weekly grid.
pub const PERIOD_COUNT: u8 = 12;

/// Wall-clock labels for periods 1–12, in grid order.
pub const PERIOD_LABELS: [&str; PERIOD_COUNT as usize] = [
    "08.00-09.00",
    "09.00-10.00",
    "10.00-11.00",
    "11.00-12.00",
    "12.00-13.00",
    "13.00-14.00",
    "14.00-15.00",
    "15.00-16.00",
    "16.00-17.00",
    "17.00-18.00",
    "18.00-19.00",
    "19.00-20.00",
];

/// Wall-clock label for a period, or `None` outside the grid.
pub fn period_label(period: u8) -> Option<&'static str> {
    if (1..=PERIOD_COUNT).contains(&period) {
        Some(PERIOD_LABELS[period as usize - 1])
    } else {
        None
    }
}

/// A teaching day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl Day {
    /// All teaching days in week order.
    pub const ALL: [Day; 5] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri];

    /// Parses a three-letter day code.
    pub fn from_code(code: &str) -> Option<Day> {
        match code {
            "Mon" => Some(Day::Mon),
            "Tue" => Some(Day::Tue),
            "Wed" => Some(Day::Wed),
            "Thu" => Some(Day::Thu),
            "Fri" => Some(Day::Fri),
            _ => None,
        }
    }

    /// The three-letter day code.
    pub fn code(&self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
        }
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Which placement band a period belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotBand {
    /// Periods 1–4 and 6–10: tried first, in shuffled order.
    Primary,
    /// Periods 11–12: tried only after every primary slot, in input order.
    Overflow,
}

/// One cell of the weekly grid: a day and a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Unique timeslot identifier.
    pub timeslot_id: String,
    /// Teaching day.
    pub day: Day,
    /// Period within the day (1–12).
    pub period: u8,
}

impl TimeSlot {
    /// Creates a new timeslot.
    pub fn new(timeslot_id: impl Into<String>, day: Day, period: u8) -> Self {
        Self {
            timeslot_id: timeslot_id.into(),
            day,
            period,
        }
    }

    /// Whether this slot is the fixed break.
    #[inline]
    pub fn is_break(&self) -> bool {
        self.period == BREAK_PERIOD
    }

    /// The placement band of this slot, or `None` for the break period
    /// and periods outside the grid.
    pub fn band(&self) -> Option<SlotBand> {
        match self.period {
            BREAK_PERIOD => None,
            p if (1..=PRIMARY_END).contains(&p) => Some(SlotBand::Primary),
            p if p > PRIMARY_END => Some(SlotBand::Overflow),
            _ => None,
        }
    }
}
