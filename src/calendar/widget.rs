use super::detail::DetailPanel;
use super::grid::{toggle_selection, MonthGrid, WeekStart, YearMonth};
use super::shift::CodeStyle;
use super::{CalendarEvent, ScheduleLabeler};
use crate::theme::{
    cell::{
        COLLEAGUES_STYLE, DAY_NUMBER_STYLE, PLAIN_CELL_STYLE, SELECTED_CELL_STYLE,
        SELECTED_MARKER_STYLE, WAKE_TIME_STYLE,
    },
    NAV_BUTTON_STYLE, TITLE_STYLE, WEEKDAY_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::Widget,
};
use std::collections::BTreeMap;
use std::fmt;
use std::iter::zip;
use time::Weekday;

/// Number of columns in a day cell
const CELL_WIDTH: u16 = 10;

/// Columns between adjacent day cells
const CELL_GAP: u16 = 1;

/// Number of columns per day of week
const DAY_WIDTH: u16 = CELL_WIDTH + CELL_GAP;

/// Number of lines taken up by each week of the calendar when there is room
const CELL_LINES: u16 = 4;

/// Weeks are squeezed down to no fewer than this many lines (the day number
/// and the shift label) on short terminals
const MIN_CELL_LINES: u16 = 2;

/// Width of the calendar proper, not counting the detail panel
const MAIN_WIDTH: u16 = DAY_WIDTH * 7 - CELL_GAP;

/// Lines taken up by the navigation row and the blank line under it
const NAV_LINES: u16 = 2;

/// Lines taken up by the weekday names
const HEADER_LINES: u16 = 1;

const BUTTON_WIDTH: u16 = 3;
const PREV_BUTTON: &str = " ◀ ";
const NEXT_BUTTON: &str = " ▶ ";

/// Columns between the calendar and a detail panel drawn beside it
const DETAIL_GAP: u16 = 2;

/// The detail panel is drawn beside the calendar only if it can be at least
/// this wide; otherwise, it goes underneath.
const DETAIL_MIN_WIDTH: u16 = 30;

const DETAIL_MAX_WIDTH: u16 = 36;

const SUNRISE: &str = "🌅";
const ELLIPSIS: char = '…';

static NO_CODES: BTreeMap<u8, String> = BTreeMap::new();
static NO_COLLEAGUES: BTreeMap<u8, Vec<String>> = BTreeMap::new();
static NO_WAKE_TIMES: BTreeMap<u8, String> = BTreeMap::new();

/// A month of schedule data drawn as a grid of day cells, with navigation
/// buttons above and a detail panel for the selected day.
///
/// The calendar is a controlled widget: it holds no state of its own, and it
/// is rebuilt from borrowed data for every frame.  User input is translated
/// into [`CalendarEvent`]s by [`ScheduleCalendar::event_at`] and
/// [`ScheduleCalendar::activate`] for the host to act on.
#[derive(Clone, Copy)]
pub(crate) struct ScheduleCalendar<'a> {
    month: YearMonth,
    schedule: &'a BTreeMap<u8, String>,
    colleagues: &'a BTreeMap<u8, Vec<String>>,
    wake_times: &'a BTreeMap<u8, String>,
    selected_day: Option<u8>,
    labeler: &'a dyn ScheduleLabeler,
    week_start: WeekStart,
}

impl<'a> ScheduleCalendar<'a> {
    pub(crate) fn new(month: YearMonth, labeler: &'a dyn ScheduleLabeler) -> Self {
        ScheduleCalendar {
            month,
            schedule: &NO_CODES,
            colleagues: &NO_COLLEAGUES,
            wake_times: &NO_WAKE_TIMES,
            selected_day: None,
            labeler,
            week_start: WeekStart::default(),
        }
    }

    pub(crate) fn schedule(mut self, schedule: &'a BTreeMap<u8, String>) -> Self {
        self.schedule = schedule;
        self
    }

    pub(crate) fn colleagues(mut self, colleagues: &'a BTreeMap<u8, Vec<String>>) -> Self {
        self.colleagues = colleagues;
        self
    }

    pub(crate) fn wake_times(mut self, wake_times: &'a BTreeMap<u8, String>) -> Self {
        self.wake_times = wake_times;
        self
    }

    pub(crate) fn selected_day(mut self, day: Option<u8>) -> Self {
        self.selected_day = day;
        self
    }

    pub(crate) fn week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }

    pub(crate) fn grid(&self) -> MonthGrid {
        MonthGrid::new(self.month, self.week_start)
    }

    /// Returns the intent produced by activating (clicking or pressing ENTER
    /// on) the given day
    pub(crate) fn activate(&self, day: u8) -> CalendarEvent {
        CalendarEvent::SelectDay(toggle_selection(self.selected_day, day))
    }

    /// Returns the intent produced by a click at `position` when the calendar
    /// was rendered in `area`
    pub(crate) fn event_at(&self, area: Rect, position: Position) -> Option<CalendarEvent> {
        let grid = self.grid();
        let layout = CalendarLayout::new(area, grid.row_count());
        if layout.prev.contains(position) {
            return Some(CalendarEvent::PrevMonth);
        }
        if layout.next.contains(position) {
            return Some(CalendarEvent::NextMonth);
        }
        if self
            .detail_panel()
            .is_some_and(|panel| self.detail_area(&layout, &grid, &panel).contains(position))
        {
            return None;
        }
        if !layout.grid.contains(position) {
            return None;
        }
        let dx = position.x - layout.grid.x;
        let dy = position.y - layout.grid.y;
        if dx % DAY_WIDTH >= CELL_WIDTH {
            // In the gap between two cells
            return None;
        }
        grid.day_at(dy / layout.cell_lines, dx / DAY_WIDTH)
            .map(|day| self.activate(day))
    }

    pub(super) fn detail_panel(&self) -> Option<DetailPanel<'a>> {
        let day = self.selected_day?;
        let code = self.code(day)?;
        Some(
            DetailPanel::new(self.month, day, code, self.labeler.schedule_type(code))
                .wake_time(self.wake_time(day))
                .colleagues(self.colleagues_of(day)),
        )
    }

    /// Where the detail panel is drawn: in the space reserved for it if it
    /// fits there, otherwise over the bottom of the grid, or over the top of
    /// the grid if the bottom would hide the selected day
    fn detail_area(
        &self,
        layout: &CalendarLayout,
        grid: &MonthGrid,
        panel: &DetailPanel<'_>,
    ) -> Rect {
        let height = panel.height(layout.detail.width);
        if height <= layout.detail.height {
            return Rect {
                height,
                ..layout.detail
            };
        }
        let width = layout.grid.width.min(DETAIL_MAX_WIDTH);
        let height = panel.height(width).min(layout.area.height);
        let x = layout.grid.x + (layout.grid.width - width) / 2;
        let bottom = Rect::new(x, layout.area.bottom().saturating_sub(height), width, height);
        let hides_selection = self
            .selected_day
            .and_then(|day| grid.position_of(day))
            .is_some_and(|(row, col)| layout.cell_area(row, col).intersects(bottom));
        let area = if hides_selection {
            Rect {
                y: layout.grid.y,
                ..bottom
            }
        } else {
            bottom
        };
        area.intersection(layout.area)
    }

    // Empty strings count as absent.
    fn code(&self, day: u8) -> Option<&'a str> {
        let schedule = self.schedule;
        schedule
            .get(&day)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    fn wake_time(&self, day: u8) -> Option<&'a str> {
        let wake_times = self.wake_times;
        wake_times
            .get(&day)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    fn colleagues_of(&self, day: u8) -> &'a [String] {
        let colleagues = self.colleagues;
        colleagues.get(&day).map_or(&[], Vec::as_slice)
    }

    fn draw_nav(&self, layout: &CalendarLayout, buf: &mut Buffer) {
        Line::styled(PREV_BUTTON, NAV_BUTTON_STYLE).render(layout.prev, buf);
        Line::styled(
            format!(
                "{}년 {:02}월",
                self.month.year(),
                u8::from(self.month.month())
            ),
            TITLE_STYLE,
        )
        .centered()
        .render(layout.title, buf);
        Line::styled(NEXT_BUTTON, NAV_BUTTON_STYLE).render(layout.next, buf);
    }

    fn draw_weekdays(&self, layout: &CalendarLayout, buf: &mut Buffer) {
        for (col, wd) in zip(0u16.., self.week_start.weekdays()) {
            let area = Rect {
                y: layout.weekdays.y,
                height: 1,
                ..layout.column_area(col)
            }
            .intersection(layout.weekdays);
            Line::styled(weekday_name(wd), WEEKDAY_STYLE)
                .centered()
                .render(area, buf);
        }
    }

    fn draw_cell(&self, area: Rect, day: u8, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let code_style = self.code(day).map(CodeStyle::for_code);
        let selected = self.selected_day == Some(day);
        let cell_style = if selected {
            SELECTED_CELL_STYLE
        } else if let Some(cs) = code_style {
            cs.cell_style()
        } else {
            PLAIN_CELL_STYLE
        };
        buf.set_style(area, cell_style);
        let mut lines = Vec::with_capacity(usize::from(CELL_LINES));
        lines.push(if selected {
            Line::from(vec![
                Span::styled("[", SELECTED_MARKER_STYLE),
                Span::styled(day.to_string(), DAY_NUMBER_STYLE),
                Span::styled("]", SELECTED_MARKER_STYLE),
            ])
        } else {
            Line::styled(day.to_string(), DAY_NUMBER_STYLE)
        });
        if let Some(cs) = code_style {
            lines.push(Line::styled(cs.label, cs.label_style()));
        }
        if let Some(wake_time) = self.wake_time(day) {
            lines.push(Line::styled(
                clip(&format!("{SUNRISE} {wake_time}"), area.width),
                WAKE_TIME_STYLE,
            ));
        }
        let colleagues = self.colleagues_of(day);
        if !colleagues.is_empty() {
            lines.push(Line::styled(
                clip(&colleagues.join(", "), area.width),
                COLLEAGUES_STYLE,
            ));
        }
        for (y, line) in zip(area.top().., lines) {
            if y >= area.bottom() {
                break;
            }
            line.centered()
                .render(Rect::new(area.x, y, area.width, 1), buf);
        }
    }
}

impl Widget for &ScheduleCalendar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(*buf.area());
        if area.is_empty() {
            return;
        }
        let grid = self.grid();
        let layout = CalendarLayout::new(area, grid.row_count());
        self.draw_nav(&layout, buf);
        self.draw_weekdays(&layout, buf);
        for (index, cell) in zip(0u16.., grid.cells()) {
            if let Some(day) = cell {
                self.draw_cell(layout.cell_area(index / 7, index % 7), day, buf);
            }
        }
        if let Some(panel) = self.detail_panel() {
            let detail = self.detail_area(&layout, &grid, &panel);
            panel.render(detail, buf);
        }
    }
}

impl Widget for ScheduleCalendar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        (&self).render(area, buf);
    }
}

impl fmt::Debug for ScheduleCalendar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduleCalendar")
            .field("month", &self.month)
            .field("schedule", &self.schedule)
            .field("colleagues", &self.colleagues)
            .field("wake_times", &self.wake_times)
            .field("selected_day", &self.selected_day)
            .field("week_start", &self.week_start)
            .finish_non_exhaustive()
    }
}

/// Screen regions of the calendar's parts.  Rendering and hit-testing both
/// derive their coordinates from here.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct CalendarLayout {
    area: Rect,
    cell_lines: u16,
    prev: Rect,
    title: Rect,
    next: Rect,
    weekdays: Rect,
    grid: Rect,
    detail: Rect,
}

impl CalendarLayout {
    fn new(area: Rect, rows: u16) -> CalendarLayout {
        let beside = area.width >= MAIN_WIDTH + DETAIL_GAP + DETAIL_MIN_WIDTH;
        let total_width = if beside {
            area.width.min(MAIN_WIDTH + DETAIL_GAP + DETAIL_MAX_WIDTH)
        } else {
            area.width.min(MAIN_WIDTH)
        };
        let left = area.x + (area.width - total_width) / 2;
        let main_width = total_width.min(MAIN_WIDTH);
        let top = area.y;
        let right = left.saturating_add(main_width);
        let prev = Rect::new(left, top, BUTTON_WIDTH.min(main_width), 1);
        let next_x = right.saturating_sub(BUTTON_WIDTH).max(left);
        let next = Rect::new(next_x, top, right - next_x, 1);
        let title = Rect::new(
            prev.right(),
            top,
            next.left().saturating_sub(prev.right()),
            1,
        );
        let weekdays_y = top.saturating_add(NAV_LINES);
        let weekdays = Rect::new(left, weekdays_y, main_width, HEADER_LINES);
        let grid_y = weekdays_y.saturating_add(HEADER_LINES);
        let cell_lines = (area.bottom().saturating_sub(grid_y) / rows.max(1))
            .clamp(MIN_CELL_LINES, CELL_LINES);
        let grid = Rect::new(left, grid_y, main_width, rows.saturating_mul(cell_lines));
        let detail = if beside {
            let x = right.saturating_add(DETAIL_GAP);
            Rect::new(
                x,
                grid_y,
                (left + total_width).saturating_sub(x),
                area.bottom().saturating_sub(grid_y),
            )
        } else {
            let y = grid.bottom().saturating_add(1);
            Rect::new(left, y, main_width, area.bottom().saturating_sub(y))
        };
        CalendarLayout {
            area,
            cell_lines,
            prev: prev.intersection(area),
            title: title.intersection(area),
            next: next.intersection(area),
            weekdays: weekdays.intersection(area),
            grid: grid.intersection(area),
            detail: detail.intersection(area),
        }
    }

    /// The full-height strip of the grid occupied by the given weekday column
    fn column_area(&self, col: u16) -> Rect {
        Rect::new(
            self.grid.x.saturating_add(col.saturating_mul(DAY_WIDTH)),
            self.grid.y,
            CELL_WIDTH,
            self.grid.height,
        )
    }

    fn cell_area(&self, row: u16, col: u16) -> Rect {
        Rect {
            y: self.grid.y.saturating_add(row.saturating_mul(self.cell_lines)),
            height: self.cell_lines,
            ..self.column_area(col)
        }
        .intersection(self.grid)
    }
}

fn weekday_name(wd: Weekday) -> &'static str {
    match wd {
        Weekday::Sunday => "일",
        Weekday::Monday => "월",
        Weekday::Tuesday => "화",
        Weekday::Wednesday => "수",
        Weekday::Thursday => "목",
        Weekday::Friday => "금",
        Weekday::Saturday => "토",
    }
}

fn display_width(s: &str) -> usize {
    Span::raw(s).width()
}

/// Shortens `s` to fit in `width` columns, marking the cut with an ellipsis
fn clip(s: &str, width: u16) -> String {
    let width = usize::from(width);
    if display_width(s) <= width {
        return s.to_owned();
    }
    let mut out = String::new();
    let mut used = 0;
    let mut chbuf = [0u8; 4];
    for ch in s.chars() {
        let w = display_width(ch.encode_utf8(&mut chbuf));
        if used + w + 1 > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push(ELLIPSIS);
    out
}
