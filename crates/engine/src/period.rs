//! Billing periods and their allocation.
//!
//! A [`Period`] is a half-open date interval `[start, end)`. Time sheets of
//! one call-off order must never overlap, so new ones are carved out of the
//! parts of the order's bounds that no existing time sheet claims.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    /// Build a non-empty period.
    pub fn new(start: NaiveDate, end: NaiveDate) -> ResultEngine<Self> {
        if end <= start {
            return Err(EngineError::Validation(format!(
                "period end {end} must be after start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Bounds of a call-off order. `finish` is inclusive.
    pub fn from_inclusive(start: NaiveDate, finish: NaiveDate) -> ResultEngine<Self> {
        let end = finish
            .checked_add_days(Days::new(1))
            .ok_or_else(|| EngineError::Validation(format!("invalid finish date {finish}")))?;
        Self::new(start, end)
    }

    pub fn month(&self) -> u32 {
        self.start.month()
    }

    pub fn year(&self) -> i32 {
        self.start.year()
    }

    pub fn overlaps(&self, other: &Period) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, other: &Period) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Intersection with `bounds`, if any.
    fn clip(&self, bounds: &Period) -> Option<Period> {
        let start = self.start.max(bounds.start);
        let end = self.end.min(bounds.end);
        (start < end).then_some(Period { start, end })
    }
}

/// Return the maximal sub-intervals of `bounds` not covered by `existing`,
/// sorted by start date.
///
/// `existing` may be unsorted, may overlap and may reach outside `bounds`.
pub fn available_ranges(existing: &[Period], bounds: Period) -> Vec<Period> {
    let mut claimed: Vec<Period> = existing.iter().filter_map(|p| p.clip(&bounds)).collect();
    claimed.sort_by_key(|p| p.start);

    let mut ranges = Vec::new();
    let mut cursor = bounds.start;
    for period in claimed {
        if period.start > cursor {
            ranges.push(Period {
                start: cursor,
                end: period.start,
            });
        }
        cursor = cursor.max(period.end);
    }
    if cursor < bounds.end {
        ranges.push(Period {
            start: cursor,
            end: bounds.end,
        });
    }
    ranges
}

/// Propose the next period to bill: the start of the first free range,
/// at most one calendar month long.
pub fn propose_range(ranges: &[Period]) -> Option<Period> {
    let first = ranges.first()?;
    let month_later = first
        .start
        .checked_add_months(Months::new(1))
        .unwrap_or(first.end);
    Some(Period {
        start: first.start,
        end: month_later.min(first.end),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn period(from: (i32, u32, u32), to: (i32, u32, u32)) -> Period {
        Period::new(date(from.0, from.1, from.2), date(to.0, to.1, to.2)).unwrap()
    }

    #[test]
    fn rejects_empty_periods() {
        assert!(Period::new(date(2024, 1, 1), date(2024, 1, 1)).is_err());
        assert!(Period::new(date(2024, 2, 1), date(2024, 1, 1)).is_err());
    }

    #[test]
    fn inclusive_finish_adds_a_day() {
        let bounds = Period::from_inclusive(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert_eq!(bounds.end, date(2024, 2, 1));
    }

    #[test]
    fn no_existing_periods_returns_bounds() {
        let bounds = period((2024, 1, 1), (2024, 6, 1));
        assert_eq!(available_ranges(&[], bounds), vec![bounds]);
    }

    #[test]
    fn fully_covered_returns_nothing() {
        let bounds = period((2024, 1, 1), (2024, 3, 1));
        let existing = [
            period((2024, 2, 1), (2024, 3, 1)),
            period((2023, 12, 1), (2024, 2, 1)),
        ];
        assert!(available_ranges(&existing, bounds).is_empty());
    }

    #[test]
    fn gaps_are_sorted() {
        let bounds = period((2024, 1, 1), (2024, 7, 1));
        let existing = [
            period((2024, 4, 1), (2024, 5, 1)),
            period((2024, 2, 1), (2024, 3, 1)),
        ];
        assert_eq!(
            available_ranges(&existing, bounds),
            vec![
                period((2024, 1, 1), (2024, 2, 1)),
                period((2024, 3, 1), (2024, 4, 1)),
                period((2024, 5, 1), (2024, 7, 1)),
            ]
        );
    }

    #[test]
    fn overlapping_existing_periods_merge() {
        let bounds = period((2024, 1, 1), (2024, 12, 1));
        let existing = [
            period((2024, 2, 1), (2024, 5, 1)),
            period((2024, 3, 1), (2024, 4, 1)),
        ];
        assert_eq!(
            available_ranges(&existing, bounds),
            vec![
                period((2024, 1, 1), (2024, 2, 1)),
                period((2024, 5, 1), (2024, 12, 1)),
            ]
        );
    }

    #[test]
    fn ranges_and_existing_cover_bounds_exactly() {
        let bounds = period((2024, 1, 3), (2024, 1, 11));
        let points: Vec<NaiveDate> = (1..=13).map(|d| date(2024, 1, d)).collect();
        let claims: Vec<Period> = points
            .iter()
            .enumerate()
            .flat_map(|(i, start)| {
                points[i + 1..]
                    .iter()
                    .map(move |end| Period::new(*start, *end).unwrap())
            })
            .collect();

        // Every ordered pair of claims: disjoint, adjacent, overlapping,
        // nested, unsorted and reaching outside the bounds.
        for a in &claims {
            for b in &claims {
                let existing = [*a, *b];
                let ranges = available_ranges(&existing, bounds);

                for pair in ranges.windows(2) {
                    assert!(pair[0].end < pair[1].start, "{existing:?} -> {ranges:?}");
                }
                for range in &ranges {
                    assert!(bounds.contains(range));
                    assert!(existing.iter().all(|e| !e.overlaps(range)));
                }
                let mut day = bounds.start;
                while day < bounds.end {
                    let one_day = Period::new(day, day + Days::new(1)).unwrap();
                    let free = ranges.iter().any(|r| r.contains(&one_day));
                    let claimed = existing.iter().any(|e| e.contains(&one_day));
                    assert!(free != claimed, "{day} in {existing:?} -> {ranges:?}");
                    day = one_day.end;
                }
            }
        }
    }

    #[test]
    fn proposal_is_at_most_one_month() {
        let ranges = [period((2024, 1, 15), (2024, 6, 1))];
        assert_eq!(
            propose_range(&ranges),
            Some(period((2024, 1, 15), (2024, 2, 15)))
        );

        let short = [period((2024, 3, 1), (2024, 3, 10))];
        assert_eq!(propose_range(&short), Some(short[0]));
    }

    #[test]
    fn proposal_clamps_month_end() {
        let ranges = [period((2024, 1, 31), (2024, 6, 1))];
        assert_eq!(
            propose_range(&ranges),
            Some(period((2024, 1, 31), (2024, 2, 29)))
        );
    }

    #[test]
    fn nothing_to_propose() {
        assert_eq!(propose_range(&[]), None);
    }
}
