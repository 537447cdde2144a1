// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Time windows and the interval arithmetic behind conflict detection.
//!
//! All interval math is done in minutes-since-midnight on a single
//! operating day. Intervals are half-open (`[start, end)`), so two
//! back-to-back windows do not overlap. Buffer expansion is symmetric
//! and clamps at the day boundaries rather than spilling into adjacent
//! days.

use crate::error::DomainError;
use time::{Date, Time};

/// Number of minutes in a day; the exclusive upper bound for interval math.
pub const MINUTES_PER_DAY: u16 = 1440;

/// A half-open interval in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    /// Inclusive start minute.
    pub start: u16,
    /// Exclusive end minute.
    pub end: u16,
}

impl Interval {
    /// Creates an interval, returning `None` if it would be empty or inverted.
    #[must_use]
    pub const fn new(start: u16, end: u16) -> Option<Self> {
        if start < end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Returns the length of this interval in minutes.
    #[must_use]
    pub const fn len(&self) -> u16 {
        self.end - self.start
    }

    /// Returns whether this interval is empty. Always false by construction.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns whether this interval overlaps another.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns whether this interval fully contains `[start, start + len)`.
    #[must_use]
    pub const fn contains_span(&self, start: u16, len: u16) -> bool {
        self.start <= start && start + len <= self.end
    }
}

/// Removes an occupied interval from a list of free intervals.
///
/// The input list must consist of non-overlapping intervals; the output
/// preserves that property and the ascending order of the input.
#[must_use]
pub fn subtract_interval(free: &[Interval], occupied: Interval) -> Vec<Interval> {
    let mut result: Vec<Interval> = Vec::with_capacity(free.len() + 1);
    for interval in free {
        if !interval.overlaps(&occupied) {
            result.push(*interval);
            continue;
        }
        if let Some(left) = Interval::new(interval.start, occupied.start) {
            result.push(left);
        }
        if let Some(right) = Interval::new(occupied.end, interval.end) {
            result.push(right);
        }
    }
    result
}

/// Intersects two lists of non-overlapping, ascending intervals.
#[must_use]
pub fn intersect_intervals(a: &[Interval], b: &[Interval]) -> Vec<Interval> {
    let mut result: Vec<Interval> = Vec::new();
    for left in a {
        for right in b {
            let start = left.start.max(right.start);
            let end = left.end.min(right.end);
            if let Some(overlap) = Interval::new(start, end) {
                result.push(overlap);
            }
        }
    }
    result
}

/// A concrete booking window: one date, a start time, and an end time.
///
/// Immutable value type. The end is strictly after the start; duration is
/// derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// The operating date.
    pub date: Date,
    /// Start of the window.
    pub start: Time,
    /// End of the window (strictly after `start`).
    pub end: Time,
}

impl TimeWindow {
    /// Creates a new `TimeWindow`.
    ///
    /// # Arguments
    ///
    /// * `date` - The operating date
    /// * `start` - Window start time
    /// * `end` - Window end time, strictly after `start`
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimeWindow` if `end` is not strictly
    /// after `start`.
    pub fn new(date: Date, start: Time, end: Time) -> Result<Self, DomainError> {
        if end <= start {
            return Err(DomainError::InvalidTimeWindow {
                reason: format!("End {end} must be strictly after start {start}"),
            });
        }
        Ok(Self { date, start, end })
    }

    /// Creates a window from a start time and a duration in minutes.
    ///
    /// # Errors
    ///
    /// Returns an error if the window would cross midnight or the duration
    /// is zero.
    pub fn from_start_and_duration(
        date: Date,
        start: Time,
        duration_minutes: u32,
    ) -> Result<Self, DomainError> {
        if duration_minutes == 0 {
            return Err(DomainError::InvalidTimeWindow {
                reason: String::from("Duration must be at least one minute"),
            });
        }
        let start_minute = u32::from(minute_of(start));
        let end_minute = start_minute + duration_minutes;
        if end_minute > u32::from(MINUTES_PER_DAY) {
            return Err(DomainError::InvalidTimeWindow {
                reason: format!(
                    "A {duration_minutes}-minute window starting at {start} would cross midnight"
                ),
            });
        }
        // end_minute == 1440 is represented as 23:59:59 to stay within one day
        let end = if end_minute == u32::from(MINUTES_PER_DAY) {
            Time::from_hms(23, 59, 59).map_err(|_| DomainError::TimeArithmeticOverflow {
                operation: String::from("constructing end-of-day time"),
            })?
        } else {
            time_from_minute(u16::try_from(end_minute).map_err(|_| {
                DomainError::TimeArithmeticOverflow {
                    operation: String::from("converting end minute"),
                }
            })?)?
        };
        Self::new(date, start, end)
    }

    /// Returns the duration of this window in minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        let span = self.end - self.start;
        let whole = span.whole_minutes().max(0);
        // A 23:59:59 end stands in for end-of-day
        let minutes = u32::try_from(whole).unwrap_or(0);
        if self.end.second() == 59 && self.end.minute() == 59 && self.end.hour() == 23 {
            minutes + 1
        } else {
            minutes
        }
    }

    /// Returns whether this window overlaps another on the same date.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.date == other.date && self.interval().overlaps(&other.interval())
    }

    /// Converts this window to a minutes-since-midnight interval.
    #[must_use]
    pub fn interval(&self) -> Interval {
        let start = minute_of(self.start);
        let end_raw = minute_of(self.end);
        // 23:59:59 stands in for end-of-day
        let end = if self.end.second() == 59 && end_raw == MINUTES_PER_DAY - 1 {
            MINUTES_PER_DAY
        } else {
            end_raw
        };
        Interval { start, end }
    }

    /// Expands this window symmetrically by a buffer, clamped to the day.
    ///
    /// The result is the "occupied interval" the window projects onto its
    /// resource: no other booking may start inside it.
    #[must_use]
    pub fn buffered_interval(&self, buffer_minutes: u32) -> Interval {
        let base = self.interval();
        let buffer = u16::try_from(buffer_minutes.min(u32::from(MINUTES_PER_DAY))).unwrap_or(0);
        Interval {
            start: base.start.saturating_sub(buffer),
            end: base.end.saturating_add(buffer).min(MINUTES_PER_DAY),
        }
    }
}

/// Converts a time of day to minutes since midnight.
#[must_use]
pub fn minute_of(value: Time) -> u16 {
    u16::from(value.hour()) * 60 + u16::from(value.minute())
}

/// Converts minutes since midnight back to a time of day.
///
/// # Errors
///
/// Returns an error if `minute` is not strictly less than `MINUTES_PER_DAY`.
pub fn time_from_minute(minute: u16) -> Result<Time, DomainError> {
    if minute >= MINUTES_PER_DAY {
        return Err(DomainError::TimeArithmeticOverflow {
            operation: format!("converting minute {minute} to a time of day"),
        });
    }
    let hour = u8::try_from(minute / 60).map_err(|_| DomainError::TimeArithmeticOverflow {
        operation: format!("converting minute {minute} to an hour"),
    })?;
    let min = u8::try_from(minute % 60).map_err(|_| DomainError::TimeArithmeticOverflow {
        operation: format!("converting minute {minute} to a minute of hour"),
    })?;
    Time::from_hms(hour, min, 0).map_err(|_| DomainError::TimeArithmeticOverflow {
        operation: format!("constructing time from minute {minute}"),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::Month;

    fn date() -> Date {
        Date::from_calendar_date(2026, Month::June, 15).unwrap()
    }

    fn window(start_h: u8, end_h: u8) -> TimeWindow {
        TimeWindow::new(
            date(),
            Time::from_hms(start_h, 0, 0).unwrap(),
            Time::from_hms(end_h, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_window_rejects_inverted_times() {
        let result = TimeWindow::new(
            date(),
            Time::from_hms(16, 0, 0).unwrap(),
            Time::from_hms(10, 0, 0).unwrap(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_window_rejects_zero_length() {
        let at = Time::from_hms(10, 0, 0).unwrap();
        assert!(TimeWindow::new(date(), at, at).is_err());
    }

    #[test]
    fn test_duration_is_derived() {
        assert_eq!(window(10, 16).duration_minutes(), 360);
    }

    #[test]
    fn test_back_to_back_windows_do_not_overlap() {
        let first = window(10, 12);
        let second = window(12, 14);
        assert!(!first.overlaps(&second));
    }

    #[test]
    fn test_overlap_requires_same_date() {
        let first = window(10, 16);
        let mut second = window(12, 14);
        second.date = Date::from_calendar_date(2026, Month::June, 16).unwrap();
        assert!(!first.overlaps(&second));
    }

    #[test]
    fn test_buffered_interval_expands_symmetrically() {
        // 10:00-16:00 with a 60-minute buffer occupies 09:00-17:00
        let occupied = window(10, 16).buffered_interval(60);
        assert_eq!(occupied, Interval { start: 540, end: 1020 });
    }

    #[test]
    fn test_buffered_interval_clamps_at_day_bounds() {
        let occupied = window(0, 23).buffered_interval(120);
        assert_eq!(occupied.start, 0);
        let late = window(20, 23).buffered_interval(120);
        assert_eq!(late.end, 1440);
    }

    #[test]
    fn test_subtract_splits_free_interval() {
        let free = vec![Interval { start: 480, end: 1200 }];
        let result = subtract_interval(&free, Interval { start: 600, end: 720 });
        assert_eq!(
            result,
            vec![
                Interval { start: 480, end: 600 },
                Interval { start: 720, end: 1200 }
            ]
        );
    }

    #[test]
    fn test_subtract_swallows_fully_occupied() {
        let free = vec![Interval { start: 600, end: 720 }];
        let result = subtract_interval(&free, Interval { start: 480, end: 1200 });
        assert!(result.is_empty());
    }

    #[test]
    fn test_subtract_ignores_disjoint() {
        let free = vec![Interval { start: 480, end: 600 }];
        let result = subtract_interval(&free, Interval { start: 700, end: 800 });
        assert_eq!(result, free);
    }

    #[test]
    fn test_intersect_keeps_common_time_only() {
        let a = vec![Interval { start: 480, end: 720 }];
        let b = vec![Interval { start: 600, end: 900 }];
        assert_eq!(
            intersect_intervals(&a, &b),
            vec![Interval { start: 600, end: 720 }]
        );
    }

    #[test]
    fn test_intersect_with_empty_is_empty() {
        let a = vec![Interval { start: 480, end: 720 }];
        assert!(intersect_intervals(&a, &[]).is_empty());
    }

    #[test]
    fn test_from_start_and_duration_rejects_midnight_crossing() {
        let result = TimeWindow::from_start_and_duration(
            date(),
            Time::from_hms(22, 0, 0).unwrap(),
            180,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_minute_round_trip() {
        let time = Time::from_hms(9, 30, 0).unwrap();
        assert_eq!(minute_of(time), 570);
        assert_eq!(time_from_minute(570).unwrap(), time);
    }
}
