use crate::calendar::{ScheduleLabeler, ShiftCode, WeekStart, YearMonth};
use serde::Deserialize;
use std::collections::btree_map::{BTreeMap, Entry};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::Month;

/// One month of precomputed schedule data, indexed by day of month
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct MonthSchedule {
    pub(crate) codes: BTreeMap<u8, String>,
    pub(crate) colleagues: BTreeMap<u8, Vec<String>>,
    pub(crate) wake_times: BTreeMap<u8, String>,
}

static EMPTY_MONTH: MonthSchedule = MonthSchedule {
    codes: BTreeMap::new(),
    colleagues: BTreeMap::new(),
    wake_times: BTreeMap::new(),
};

/// Schedule data for any number of months, as read from a schedule file
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct ScheduleBook {
    week_start: Option<WeekStart>,
    labels: LabelTable,
    months: BTreeMap<YearMonth, MonthSchedule>,
}

impl ScheduleBook {
    pub(crate) fn load(path: &Path) -> Result<ScheduleBook, ScheduleError> {
        let src = fs::read_to_string(path).map_err(|source| ScheduleError::Read {
            path: path.to_owned(),
            source,
        })?;
        let book = ScheduleBook::from_toml_str(&src)?;
        log::info!(
            "Loaded {} month(s) of schedule data from {}",
            book.months.len(),
            path.display()
        );
        Ok(book)
    }

    pub(crate) fn from_toml_str(src: &str) -> Result<ScheduleBook, ScheduleError> {
        let raw = toml::from_str::<RawBook>(src)?;
        let mut months = BTreeMap::new();
        for rm in raw.month {
            let (ym, schedule) = rm.into_month()?;
            match months.entry(ym) {
                Entry::Vacant(e) => {
                    e.insert(schedule);
                }
                Entry::Occupied(_) => {
                    return Err(ScheduleError::DuplicateMonth {
                        year: ym.year(),
                        month: u8::from(ym.month()),
                    })
                }
            }
        }
        Ok(ScheduleBook {
            week_start: raw.week_start,
            labels: LabelTable(raw.labels),
            months,
        })
    }

    /// The week start requested by the file, if any
    pub(crate) fn week_start(&self) -> Option<WeekStart> {
        self.week_start
    }

    pub(crate) fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Returns the data for the given month; months absent from the file have
    /// no data
    pub(crate) fn month(&self, ym: YearMonth) -> &MonthSchedule {
        self.months.get(&ym).unwrap_or(&EMPTY_MONTH)
    }
}

/// Detail-panel labels for schedule codes.  Codes listed in the schedule
/// file's `[labels]` table use the label given there; the standard codes
/// otherwise use their usual names, and anything else is shown as-is.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct LabelTable(BTreeMap<String, String>);

impl ScheduleLabeler for LabelTable {
    fn schedule_type(&self, code: &str) -> String {
        if let Some(label) = self.0.get(code) {
            label.clone()
        } else if let Some(sc) = ShiftCode::parse(code) {
            sc.description().to_owned()
        } else {
            code.to_owned()
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ScheduleError {
    #[error("failed to read schedule file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse schedule file")]
    Parse(#[from] toml::de::Error),
    #[error("invalid month {month} in year {year}")]
    InvalidMonth { year: i32, month: u8 },
    #[error("month {year}-{month:02} is listed more than once")]
    DuplicateMonth { year: i32, month: u8 },
    #[error("day {day} of {year}-{month:02} is listed more than once")]
    DuplicateDay { year: i32, month: u8, day: u8 },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBook {
    #[serde(default)]
    week_start: Option<WeekStart>,
    #[serde(default)]
    labels: BTreeMap<String, String>,
    #[serde(default)]
    month: Vec<RawMonth>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMonth {
    year: i32,
    month: u8,
    #[serde(default)]
    day: Vec<RawDay>,
}

impl RawMonth {
    fn into_month(self) -> Result<(YearMonth, MonthSchedule), ScheduleError> {
        let invalid = || ScheduleError::InvalidMonth {
            year: self.year,
            month: self.month,
        };
        let month = Month::try_from(self.month).map_err(|_| invalid())?;
        let ym = YearMonth::new(self.year, month).map_err(|_| invalid())?;
        let day_count = ym.day_count();
        let mut schedule = MonthSchedule::default();
        let mut seen = Vec::with_capacity(self.day.len());
        for rd in self.day {
            if seen.contains(&rd.day) {
                return Err(ScheduleError::DuplicateDay {
                    year: self.year,
                    month: self.month,
                    day: rd.day,
                });
            }
            seen.push(rd.day);
            if !(1..=day_count).contains(&rd.day) {
                log::warn!(
                    "Day {} of {}-{:02} is outside the month and will not be shown",
                    rd.day,
                    self.year,
                    self.month
                );
            }
            if let Some(code) = rd.code {
                schedule.codes.insert(rd.day, code);
            }
            if let Some(wake_up) = rd.wake_up {
                schedule.wake_times.insert(rd.day, wake_up);
            }
            if !rd.colleagues.is_empty() {
                schedule.colleagues.insert(rd.day, rd.colleagues);
            }
        }
        Ok((ym, schedule))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDay {
    day: u8,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    wake_up: Option<String>,
    #[serde(default)]
    colleagues: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    static SAMPLE: &str = r#"
week_start = "monday"

[labels]
"야" = "Night shift"

[[month]]
year = 2024
month = 3

[[month.day]]
day = 5
code = "주"
wake_up = "06:30"
colleagues = ["Kim", "Lee"]

[[month.day]]
day = 6
code = "야"

[[month.day]]
day = 7
colleagues = []

[[month]]
year = 2024
month = 4

[[month.day]]
day = 1
code = "휴"
"#;

    fn ym(year: i32, month: Month) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_load_sample() {
        let book = ScheduleBook::from_toml_str(SAMPLE).unwrap();
        assert_eq!(book.week_start(), Some(WeekStart::Monday));
        let march = book.month(ym(2024, Month::March));
        assert_eq!(
            march.codes,
            BTreeMap::from([(5, String::from("주")), (6, String::from("야"))])
        );
        assert_eq!(
            march.wake_times,
            BTreeMap::from([(5, String::from("06:30"))])
        );
        assert_eq!(
            march.colleagues,
            BTreeMap::from([(5, vec![String::from("Kim"), String::from("Lee")])])
        );
        let april = book.month(ym(2024, Month::April));
        assert_eq!(april.codes.get(&1).map(String::as_str), Some("휴"));
        assert!(april.wake_times.is_empty());
        assert_eq!(book.month(ym(2024, Month::May)), &MonthSchedule::default());
    }

    #[test]
    fn test_empty_file() {
        let book = ScheduleBook::from_toml_str("").unwrap();
        assert_eq!(book, ScheduleBook::default());
        assert_eq!(book.week_start(), None);
    }

    #[test]
    fn test_labels() {
        let book = ScheduleBook::from_toml_str(SAMPLE).unwrap();
        let labels = book.labels();
        assert_eq!(labels.schedule_type("야"), "Night shift");
        assert_eq!(labels.schedule_type("주"), "주간 근무");
        assert_eq!(labels.schedule_type("비"), "비번");
        assert_eq!(labels.schedule_type("휴"), "휴무");
        assert_eq!(labels.schedule_type("X"), "X");
    }

    #[test]
    fn test_duplicate_month() {
        let src = "[[month]]\nyear = 2024\nmonth = 3\n[[month]]\nyear = 2024\nmonth = 3\n";
        let e = ScheduleBook::from_toml_str(src).unwrap_err();
        assert!(matches!(
            e,
            ScheduleError::DuplicateMonth {
                year: 2024,
                month: 3
            }
        ));
        assert_eq!(e.to_string(), "month 2024-03 is listed more than once");
    }

    #[test]
    fn test_duplicate_day() {
        let src = "[[month]]\nyear = 2024\nmonth = 3\n[[month.day]]\nday = 2\n[[month.day]]\nday = 2\ncode = \"주\"\n";
        let e = ScheduleBook::from_toml_str(src).unwrap_err();
        assert!(matches!(
            e,
            ScheduleError::DuplicateDay {
                year: 2024,
                month: 3,
                day: 2
            }
        ));
    }

    #[test]
    fn test_invalid_month() {
        for month in [0, 13] {
            let src = format!("[[month]]\nyear = 2024\nmonth = {month}\n");
            let e = ScheduleBook::from_toml_str(&src).unwrap_err();
            assert!(matches!(
                e,
                ScheduleError::InvalidMonth { year: 2024, month: m } if m == month
            ));
        }
    }

    #[test]
    fn test_out_of_range_day_is_kept() {
        let src = "[[month]]\nyear = 2023\nmonth = 2\n[[month.day]]\nday = 30\ncode = \"주\"\n";
        let book = ScheduleBook::from_toml_str(src).unwrap();
        let feb = book.month(ym(2023, Month::February));
        assert_eq!(feb.codes.get(&30).map(String::as_str), Some("주"));
    }

    #[test]
    fn test_unknown_field() {
        let src = "[[month]]\nyear = 2024\nmonth = 3\n[[month.day]]\nday = 2\nshift = \"주\"\n";
        let e = ScheduleBook::from_toml_str(src).unwrap_err();
        assert!(matches!(e, ScheduleError::Parse(_)));
    }

    #[test]
    fn test_bad_week_start() {
        let e = ScheduleBook::from_toml_str("week_start = \"friday\"\n").unwrap_err();
        assert!(matches!(e, ScheduleError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let e = ScheduleBook::load(Path::new("/nonexistent/schedule.toml")).unwrap_err();
        assert!(matches!(e, ScheduleError::Read { .. }));
        assert_eq!(
            e.to_string(),
            "failed to read schedule file /nonexistent/schedule.toml"
        );
    }
}
