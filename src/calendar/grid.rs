use serde::Deserialize;
use std::cmp::Ordering;
use std::iter::successors;
use thiserror::Error;
use time::{error::ComponentRange, Date, Month, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// Which weekday occupies the leftmost column of the grid
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    fn first(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sunday,
            WeekStart::Monday => Weekday::Monday,
        }
    }

    /// Returns the column (0 through 6) of the given weekday
    pub(crate) fn column_of(self, wd: Weekday) -> u8 {
        match self {
            WeekStart::Sunday => wd.number_days_from_sunday(),
            WeekStart::Monday => wd.number_days_from_monday(),
        }
    }

    /// The weekdays in column order
    pub(crate) fn weekdays(self) -> [Weekday; DAYS_IN_WEEK] {
        let first = self.first();
        std::array::from_fn(|i| (0..i).fold(first, |wd, _| wd.next()))
    }
}

/// A calendar month, stored as the date of its first day
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct YearMonth(Date);

impl YearMonth {
    pub(crate) fn new(year: i32, month: Month) -> Result<YearMonth, ComponentRange> {
        Date::from_calendar_date(year, month, 1).map(YearMonth)
    }

    pub(crate) fn containing(date: Date) -> YearMonth {
        // Day 1 exists in every month, so this cannot fail.
        YearMonth(date.replace_day(1).unwrap_or(date))
    }

    pub(crate) fn year(self) -> i32 {
        self.0.year()
    }

    pub(crate) fn month(self) -> Month {
        self.0.month()
    }

    pub(crate) fn first_day(self) -> Date {
        self.0
    }

    pub(crate) fn days(self) -> impl Iterator<Item = Date> {
        let month = self.0.month();
        successors(Some(self.0), |d| d.next_day()).take_while(move |d| d.month() == month)
    }

    pub(crate) fn last_day(self) -> Date {
        self.days().last().unwrap_or(self.0)
    }

    pub(crate) fn day_count(self) -> u8 {
        self.last_day().day()
    }

    pub(crate) fn previous(self) -> Result<YearMonth, OutOfTimeError> {
        self.0
            .previous_day()
            .map(YearMonth::containing)
            .ok_or(OutOfTimeError)
    }

    pub(crate) fn next(self) -> Result<YearMonth, OutOfTimeError> {
        self.last_day()
            .next_day()
            .map(YearMonth)
            .ok_or(OutOfTimeError)
    }
}

impl PartialOrd for YearMonth {
    fn partial_cmp(&self, other: &YearMonth) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for YearMonth {
    fn cmp(&self, other: &YearMonth) -> Ordering {
        self.0.cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;

/// The arrangement of one month's days into rows of seven cells.  Blank cells
/// only ever precede day 1; the last row simply ends after the last day.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    leading_blanks: u8,
    day_count: u8,
}

impl MonthGrid {
    pub(crate) fn new(month: YearMonth, week_start: WeekStart) -> MonthGrid {
        MonthGrid {
            leading_blanks: week_start.column_of(month.first_day().weekday()),
            day_count: month.day_count(),
        }
    }

    pub(crate) fn leading_blanks(&self) -> u8 {
        self.leading_blanks
    }

    pub(crate) fn day_count(&self) -> u8 {
        self.day_count
    }

    pub(crate) fn cell_count(&self) -> u16 {
        u16::from(self.leading_blanks()) + u16::from(self.day_count())
    }

    pub(crate) fn row_count(&self) -> u16 {
        self.cell_count().div_ceil(7)
    }

    /// Iterate over all cells in order, yielding `None` for the leading blanks
    pub(crate) fn cells(&self) -> impl Iterator<Item = Option<u8>> {
        std::iter::repeat_n(None, usize::from(self.leading_blanks()))
            .chain((1..=self.day_count()).map(Some))
    }

    pub(crate) fn day_at(&self, row: u16, column: u16) -> Option<u8> {
        if column >= 7 {
            return None;
        }
        let index = row.checked_mul(7)?.checked_add(column)?;
        let day = index.checked_sub(u16::from(self.leading_blanks()))? + 1;
        u8::try_from(day)
            .ok()
            .filter(|&d| d <= self.day_count())
    }

    /// Returns the (row, column) of the given day, if it is in the month
    pub(crate) fn position_of(&self, day: u8) -> Option<(u16, u16)> {
        if !(1..=self.day_count()).contains(&day) {
            return None;
        }
        let index = u16::from(self.leading_blanks()) + u16::from(day) - 1;
        Some((index / 7, index % 7))
    }
}

/// Computes the selection that results from activating `day`: activating the
/// selected day clears the selection, and activating any other day selects
/// it.
pub(crate) fn toggle_selection(selected: Option<u8>, day: u8) -> Option<u8> {
    if selected == Some(day) {
        None
    } else {
        Some(day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn grid(year: i32, month: Month, week_start: WeekStart) -> MonthGrid {
        MonthGrid::new(YearMonth::new(year, month).unwrap(), week_start)
    }

    #[test]
    fn test_march_2024() {
        let g = grid(2024, Month::March, WeekStart::Sunday);
        assert_eq!(g.leading_blanks(), 5);
        assert_eq!(g.day_count(), 31);
        assert_eq!(g.cell_count(), 36);
        assert_eq!(g.row_count(), 6);
        let cells = g.cells().collect::<Vec<_>>();
        assert_eq!(cells.len(), 36);
        assert_eq!(&cells[..6], &[None, None, None, None, None, Some(1)]);
        assert_eq!(cells.last(), Some(&Some(31)));
    }

    #[test]
    fn test_march_2024_monday_start() {
        let g = grid(2024, Month::March, WeekStart::Monday);
        assert_eq!(g.leading_blanks(), 4);
        assert_eq!(g.cell_count(), 35);
        assert_eq!(g.row_count(), 5);
    }

    #[test]
    fn test_no_leading_blanks() {
        // 2024-09-01 is a Sunday
        let g = grid(2024, Month::September, WeekStart::Sunday);
        assert_eq!(g.leading_blanks(), 0);
        assert_eq!(g.cells().next(), Some(Some(1)));
        assert_eq!(g.day_at(0, 0), Some(1));
    }

    #[test]
    fn test_february_day_counts() {
        assert_eq!(grid(2023, Month::February, WeekStart::Sunday).day_count(), 28);
        assert_eq!(grid(2024, Month::February, WeekStart::Sunday).day_count(), 29);
        assert_eq!(grid(1900, Month::February, WeekStart::Sunday).day_count(), 28);
        assert_eq!(grid(2000, Month::February, WeekStart::Sunday).day_count(), 29);
    }

    #[test]
    fn test_every_month_of_several_years() {
        for year in 1999..=2031 {
            for month in (1..=12).map(|m| Month::try_from(m).unwrap()) {
                for week_start in [WeekStart::Sunday, WeekStart::Monday] {
                    let g = grid(year, month, week_start);
                    let first = Date::from_calendar_date(year, month, 1).unwrap();
                    assert_eq!(
                        g.leading_blanks(),
                        week_start.column_of(first.weekday()),
                        "{year}-{month} {week_start:?}"
                    );
                    assert!(
                        (28..=31).contains(&g.day_count()),
                        "{year}-{month} has {} days",
                        g.day_count()
                    );
                    let day_cells = g.cells().flatten().count();
                    assert_eq!(day_cells, usize::from(g.day_count()));
                    let slots = g.row_count() * 7;
                    assert!(slots >= g.cell_count() && slots < g.cell_count() + 7);
                    assert!((4..=6).contains(&g.row_count()));
                }
            }
        }
    }

    #[test]
    fn test_day_at() {
        let g = grid(2024, Month::March, WeekStart::Sunday);
        assert_eq!(g.day_at(0, 4), None);
        assert_eq!(g.day_at(0, 5), Some(1));
        assert_eq!(g.day_at(0, 6), Some(2));
        assert_eq!(g.day_at(1, 0), Some(3));
        assert_eq!(g.day_at(5, 0), Some(31));
        assert_eq!(g.day_at(5, 1), None);
        assert_eq!(g.day_at(0, 7), None);
        assert_eq!(g.day_at(40, 3), None);
    }

    #[test]
    fn test_day_at_agrees_with_cells() {
        let g = grid(2023, Month::February, WeekStart::Monday);
        for (index, cell) in std::iter::zip(0u16.., g.cells()) {
            assert_eq!(g.day_at(index / 7, index % 7), cell);
            if let Some(day) = cell {
                assert_eq!(g.position_of(day), Some((index / 7, index % 7)));
            }
        }
        assert_eq!(g.position_of(0), None);
        assert_eq!(g.position_of(29), None);
    }

    #[test]
    fn test_weekdays() {
        assert_eq!(
            WeekStart::Sunday.weekdays(),
            [
                Weekday::Sunday,
                Weekday::Monday,
                Weekday::Tuesday,
                Weekday::Wednesday,
                Weekday::Thursday,
                Weekday::Friday,
                Weekday::Saturday,
            ]
        );
        assert_eq!(WeekStart::Monday.weekdays()[0], Weekday::Monday);
        assert_eq!(WeekStart::Monday.weekdays()[6], Weekday::Sunday);
    }

    #[test]
    fn test_month_navigation() {
        let dec = YearMonth::new(2024, Month::December).unwrap();
        let jan = dec.next().unwrap();
        assert_eq!((jan.year(), jan.month()), (2025, Month::January));
        assert_eq!(jan.previous(), Ok(dec));
        let mar = YearMonth::new(2024, Month::March).unwrap();
        assert_eq!(mar.previous().unwrap().month(), Month::February);
        assert!(jan > dec);
    }

    #[test]
    fn test_month_navigation_at_end_of_time() {
        let last = YearMonth::containing(Date::MAX);
        assert_eq!(last.next(), Err(OutOfTimeError));
        let first = YearMonth::containing(Date::MIN);
        assert_eq!(first.previous(), Err(OutOfTimeError));
    }

    #[test]
    fn test_containing() {
        let ym = YearMonth::containing(date!(2024 - 03 - 17));
        assert_eq!(ym.first_day(), date!(2024 - 03 - 01));
        assert_eq!(ym.last_day(), date!(2024 - 03 - 31));
    }

    #[test]
    fn test_toggle_selection() {
        assert_eq!(toggle_selection(None, 5), Some(5));
        assert_eq!(toggle_selection(Some(5), 5), None);
        assert_eq!(toggle_selection(Some(5), 7), Some(7));
        let once = toggle_selection(None, 5);
        assert_eq!(toggle_selection(once, 5), None);
    }
}
