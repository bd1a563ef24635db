use crate::calendar::{
    CalendarEvent, CalendarHandler, OutOfTimeError, ScheduleCalendar, WeekStart, YearMonth,
};
use crate::help::Help;
use crate::schedule::ScheduleBook;
use crate::theme::BASE_STYLE;
use crossterm::event::{
    read, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Position, Rect},
    widgets::Widget,
    Terminal,
};
use std::io::{self, Write};
use time::Date;

/// The host for a [`ScheduleCalendar`]: owns the displayed month and the
/// selected day, and carries out the calendar's intents
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    book: ScheduleBook,
    today: Date,
    month: YearMonth,
    selected: Option<u8>,
    // The day that keyboard movement starts from
    cursor: u8,
    week_start: WeekStart,
    state: AppState,
    // Where the calendar was last drawn, for mapping mouse clicks to days
    area: Rect,
    bell: bool,
}

impl App {
    pub(crate) fn new(book: ScheduleBook, today: Date) -> App {
        App {
            book,
            today,
            month: YearMonth::containing(today),
            selected: None,
            cursor: today.day(),
            week_start: WeekStart::default(),
            state: AppState::Calendar,
            area: Rect::default(),
            bell: false,
        }
    }

    pub(crate) fn start_month(mut self, month: YearMonth) -> App {
        self.show_month(month);
        self
    }

    pub(crate) fn week_start(mut self, week_start: WeekStart) -> App {
        self.week_start = week_start;
        self
    }

    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        let event = read()?;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = event.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        } else if let Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) = event
        {
            if !self.handle_click(Position::new(column, row)) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1),
                KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1),
                KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-7),
                KeyCode::Char('j') | KeyCode::Down => self.move_cursor(7),
                KeyCode::Char(' ') | KeyCode::Enter => {
                    let event = self.calendar().activate(self.cursor);
                    self.dispatch(event)
                }
                KeyCode::Char('[') | KeyCode::PageUp => self.dispatch(CalendarEvent::PrevMonth),
                KeyCode::Char(']') | KeyCode::PageDown => self.dispatch(CalendarEvent::NextMonth),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.show_month(YearMonth::containing(self.today));
                    true
                }
                KeyCode::Esc if self.selected.is_some() => {
                    self.dispatch(CalendarEvent::SelectDay(None))
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Quitting => false,
        }
    }

    // Returns `false` if the click asked for something impossible
    fn handle_click(&mut self, pos: Position) -> bool {
        match self.state {
            AppState::Calendar => {
                let event = self.calendar().event_at(self.area, pos);
                event.is_none_or(|ev| self.dispatch(ev))
            }
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn dispatch(&mut self, event: CalendarEvent) -> bool {
        event.dispatch(self);
        !std::mem::take(&mut self.bell)
    }

    fn calendar(&self) -> ScheduleCalendar<'_> {
        let data = self.book.month(self.month);
        ScheduleCalendar::new(self.month, self.book.labels())
            .schedule(&data.codes)
            .colleagues(&data.colleagues)
            .wake_times(&data.wake_times)
            .selected_day(self.selected)
            .week_start(self.week_start)
    }

    // With nothing selected, the first movement just selects the cursor day.
    fn move_cursor(&mut self, delta: i16) -> bool {
        if self.selected.is_none() {
            return self.dispatch(CalendarEvent::SelectDay(Some(self.cursor)));
        }
        let Ok(day) = u8::try_from(i16::from(self.cursor) + delta) else {
            return false;
        };
        if !(1..=self.month.day_count()).contains(&day) {
            return false;
        }
        self.dispatch(CalendarEvent::SelectDay(Some(day)))
    }

    fn show_month(&mut self, month: YearMonth) {
        log::info!("Showing {}-{:02}", month.year(), u8::from(month.month()));
        self.month = month;
        self.selected = None;
        self.cursor = if YearMonth::containing(self.today) == month {
            self.today.day()
        } else {
            1
        };
    }

    fn change_month(&mut self, r: Result<YearMonth, OutOfTimeError>) {
        match r {
            Ok(month) => self.show_month(month),
            Err(e) => {
                log::warn!("Cannot change month: {e}");
                self.bell = true;
            }
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl CalendarHandler for App {
    fn select_day(&mut self, day: Option<u8>) {
        log::debug!("Selected day: {day:?}");
        if let Some(d) = day {
            self.cursor = d;
        }
        self.selected = day;
    }

    fn prev_month(&mut self) {
        let r = self.month.previous();
        self.change_month(r);
    }

    fn next_month(&mut self) {
        let r = self.month.next();
        self.change_month(r);
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        self.area = area;
        self.calendar().render(area, buf);
        if self.state == AppState::Helping {
            Help.render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Quitting,
}
