mod app;
mod calendar;
mod help;
mod schedule;
mod theme;
use crate::app::App;
use crate::calendar::{WeekStart, YearMonth};
use crate::schedule::ScheduleBook;
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::io;
use std::path::{Path, PathBuf};
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "info"
};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        schedule: PathBuf,
        month: Option<YearMonth>,
        monday: bool,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut schedule = None;
        let mut month = None;
        let mut monday = false;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('m') | Arg::Long("monday") => monday = true,
                Arg::Short('l') | Arg::Long("log-file") => {
                    log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Value(value) if schedule.is_none() => {
                    schedule = Some(PathBuf::from(value));
                }
                Arg::Value(value) if month.is_none() => {
                    month = Some(parse_year_month(value.string()?)?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        let schedule =
            schedule.ok_or_else(|| lexopt::Error::from("missing <SCHEDULE.toml> argument"))?;
        Ok(Command::Run {
            schedule,
            month,
            monday,
            log_file,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                schedule,
                month,
                monday,
                log_file,
            } => {
                let _logger = init_logging(log_file.as_deref())?;
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let book = ScheduleBook::load(&schedule).with_context(|| {
                    format!("failed to load schedule from {}", schedule.display())
                })?;
                let week_start = if monday {
                    WeekStart::Monday
                } else {
                    book.week_start().unwrap_or_default()
                };
                log::info!(
                    "Starting up with schedule {}; weeks start on {week_start:?}",
                    schedule.display()
                );
                let mut app = App::new(book, today).week_start(week_start);
                if let Some(month) = month {
                    app = app.start_month(month);
                }
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    app.run(&mut terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: shiftcal [options] <SCHEDULE.toml> [YYYY-MM]");
                println!();
                println!("Terminal viewer for monthly work-shift schedules");
                println!();
                println!("Options:");
                println!("  -m, --monday          Start weeks on Monday");
                println!("  -l, --log-file FILE   Write log messages to FILE");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn parse_year_month(value: String) -> Result<YearMonth, lexopt::Error> {
    match Date::parse(&format!("{value}-01"), &YMD_FMT) {
        Ok(d) => Ok(YearMonth::containing(d)),
        Err(e) => Err(lexopt::Error::ParsingFailed {
            value,
            error: Box::new(e),
        }),
    }
}

// The terminal belongs to the calendar, so log messages go to a file or
// nowhere.
fn init_logging(log_file: Option<&Path>) -> anyhow::Result<LoggerHandle> {
    let mut logger =
        Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL).context("invalid log level")?;
    logger = match log_file {
        Some(path) => logger
            .log_to_file(FileSpec::try_from(path).context("invalid log file path")?)
            .append(),
        None => logger.do_not_log(),
    };
    logger.start().context("failed to start logger")
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    if let Err(e) = execute!(io::stdout(), EnableMouseCapture) {
        log::warn!("Could not enable mouse capture: {e}");
    }
    let r = func(terminal);
    if let Err(e) = execute!(io::stdout(), DisableMouseCapture) {
        log::warn!("Could not disable mouse capture: {e}");
    }
    ratatui::restore();
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use time::Month;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        let args = args.iter().map(OsString::from).collect::<Vec<_>>();
        Command::from_parser(Parser::from_args(args))
    }

    #[test]
    fn test_schedule_only() {
        assert_eq!(
            parse(&["shifts.toml"]).unwrap(),
            Command::Run {
                schedule: PathBuf::from("shifts.toml"),
                month: None,
                monday: false,
                log_file: None,
            }
        );
    }

    #[test]
    fn test_all_options() {
        assert_eq!(
            parse(&["-m", "--log-file", "out.log", "shifts.toml", "2024-03"]).unwrap(),
            Command::Run {
                schedule: PathBuf::from("shifts.toml"),
                month: Some(YearMonth::new(2024, Month::March).unwrap()),
                monday: true,
                log_file: Some(PathBuf::from("out.log")),
            }
        );
    }

    #[test]
    fn test_missing_schedule() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--monday"]).is_err());
    }

    #[test]
    fn test_bad_month() {
        for bad in ["2024-13", "2024", "March", "2024-03-01"] {
            let r = parse(&["shifts.toml", bad]);
            assert!(
                matches!(r, Err(lexopt::Error::ParsingFailed { .. })),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn test_extra_argument() {
        assert!(parse(&["shifts.toml", "2024-03", "extra"]).is_err());
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["-h"]).unwrap(), Command::Help);
        assert_eq!(parse(&["shifts.toml", "--version"]).unwrap(), Command::Version);
    }
}
