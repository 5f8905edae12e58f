//! Calendar and simulation clock.
//!
//! The clock counts raw simulation steps and groups them into days. Day, month
//! and year boundaries are reported back to the caller as [`ClockEvent`]s so the
//! simulation can run its end-of-day pass in one place.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::config::ClockCfg;
use crate::entity::TravelPace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Self; 12] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];

    /// Month from its 1-based number.
    #[must_use]
    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    /// Zero-based position in the year.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn days(self, year: u32) -> u8 {
        match self {
            Self::February if is_leap_year(year) => 29,
            Self::February => 28,
            Self::April | Self::June | Self::September | Self::November => 30,
            _ => 31,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        }
    }
}

const fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub year: u32,
    pub month: Month,
    pub day: u8,
}

/// Which boundaries a single day advance crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rollover {
    pub month: bool,
    pub year: bool,
}

impl Calendar {
    #[must_use]
    pub const fn new(year: u32, month: Month, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Move forward one day, wrapping months and years.
    pub fn advance_day(&mut self) -> Rollover {
        let mut rollover = Rollover::default();
        if self.day < self.month.days(self.year) {
            self.day += 1;
            return rollover;
        }
        self.day = 1;
        rollover.month = true;
        if self.month == Month::December {
            self.month = Month::January;
            self.year += 1;
            rollover.year = true;
        } else {
            self.month = Month::ALL[self.month.index() + 1];
        }
        rollover
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}, {}", self.month.name(), self.day, self.year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    DayEnd { days: u32 },
    MonthEnd { months: u32 },
    YearEnd { years: u32 },
    PaceChanged { from: TravelPace, to: TravelPace },
}

pub type ClockEvents = SmallVec<[ClockEvent; 4]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationClock {
    calendar: Calendar,
    steps_per_day: u32,
    steps: u64,
    step_in_day: u32,
    days: u32,
    months: u32,
    years: u32,
    pace: TravelPace,
    pending_pace: Option<TravelPace>,
}

impl SimulationClock {
    #[must_use]
    pub fn new(cfg: &ClockCfg) -> Self {
        let month = Month::from_number(cfg.start_month).unwrap_or(Month::March);
        Self {
            calendar: Calendar::new(cfg.start_year, month, cfg.start_day.max(1)),
            steps_per_day: cfg.steps_per_day.max(1),
            steps: 0,
            step_in_day: 0,
            days: 0,
            months: 0,
            years: 0,
            pace: TravelPace::Paused,
            pending_pace: None,
        }
    }

    #[must_use]
    pub const fn calendar(&self) -> Calendar {
        self.calendar
    }

    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Whole days elapsed since the start.
    #[must_use]
    pub const fn days_elapsed(&self) -> u32 {
        self.days
    }

    #[must_use]
    pub const fn pace(&self) -> TravelPace {
        self.pace
    }

    /// Record a pace change; it is reported on the next tick.
    pub fn set_pace(&mut self, pace: TravelPace) {
        if pace == self.pace {
            return;
        }
        self.pending_pace.get_or_insert(self.pace);
        self.pace = pace;
    }

    /// Advance one step. Days only accumulate while `passing` is true.
    pub fn tick(&mut self, passing: bool) -> ClockEvents {
        let mut events = ClockEvents::new();
        self.steps = self.steps.saturating_add(1);

        if let Some(from) = self.pending_pace.take()
            && from != self.pace
        {
            events.push(ClockEvent::PaceChanged {
                from,
                to: self.pace,
            });
        }

        if !passing {
            return events;
        }
        self.step_in_day += 1;
        if self.step_in_day < self.steps_per_day {
            return events;
        }
        self.step_in_day = 0;

        let rollover = self.calendar.advance_day();
        self.days = self.days.saturating_add(1);
        events.push(ClockEvent::DayEnd { days: self.days });
        if rollover.month {
            self.months = self.months.saturating_add(1);
            events.push(ClockEvent::MonthEnd {
                months: self.months,
            });
        }
        if rollover.year {
            self.years = self.years.saturating_add(1);
            events.push(ClockEvent::YearEnd { years: self.years });
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(steps_per_day: u32) -> SimulationClock {
        SimulationClock::new(&ClockCfg {
            start_year: 1848,
            start_month: 12,
            start_day: 31,
            steps_per_day,
        })
    }

    #[test]
    fn idle_steps_do_not_pass_days() {
        let mut clock = clock(1);
        for _ in 0..10 {
            assert!(clock.tick(false).is_empty());
        }
        assert_eq!(clock.steps(), 10);
        assert_eq!(clock.days_elapsed(), 0);
    }

    #[test]
    fn new_year_reports_every_boundary() {
        let mut clock = clock(2);
        assert!(clock.tick(true).is_empty());
        let events = clock.tick(true);
        assert_eq!(
            events.as_slice(),
            &[
                ClockEvent::DayEnd { days: 1 },
                ClockEvent::MonthEnd { months: 1 },
                ClockEvent::YearEnd { years: 1 },
            ]
        );
        assert_eq!(clock.calendar(), Calendar::new(1849, Month::January, 1));
    }

    #[test]
    fn pace_change_is_reported_once() {
        let mut clock = clock(4);
        clock.set_pace(TravelPace::Steady);
        clock.set_pace(TravelPace::Grueling);
        assert_eq!(
            clock.tick(false).as_slice(),
            &[ClockEvent::PaceChanged {
                from: TravelPace::Paused,
                to: TravelPace::Grueling
            }]
        );
        assert!(clock.tick(false).is_empty());
    }

    #[test]
    fn leap_february_has_29_days() {
        let mut calendar = Calendar::new(1848, Month::February, 28);
        assert!(!calendar.advance_day().month);
        assert_eq!(calendar.day, 29);
        assert!(calendar.advance_day().month);
        assert_eq!(calendar.to_string(), "March 1, 1848");
    }
}
