use super::grid::YearMonth;
use super::shift::CodeStyle;
use crate::theme::detail::{CAPTION_STYLE, PANEL_STYLE, TAG_STYLE, VALUE_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, Widget},
};

/// Expanded view of a single scheduled day
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct DetailPanel<'a> {
    month: YearMonth,
    day: u8,
    label: String,
    label_style: Style,
    wake_time: Option<&'a str>,
    colleagues: &'a [String],
}

impl<'a> DetailPanel<'a> {
    pub(super) fn new(month: YearMonth, day: u8, code: &str, label: String) -> Self {
        DetailPanel {
            month,
            day,
            label,
            label_style: CodeStyle::for_code(code).label_style(),
            wake_time: None,
            colleagues: &[],
        }
    }

    pub(super) fn wake_time(mut self, wake_time: Option<&'a str>) -> Self {
        self.wake_time = wake_time;
        self
    }

    pub(super) fn colleagues(mut self, colleagues: &'a [String]) -> Self {
        self.colleagues = colleagues;
        self
    }

    pub(super) fn header(&self) -> String {
        format!(
            " {}년 {:02}월 {}일 ",
            self.month.year(),
            u8::from(self.month.month()),
            self.day
        )
    }

    /// Returns the lines of the panel's body, with the colleague tags packed
    /// into lines no wider than `width`
    pub(super) fn lines(&self, width: u16) -> Vec<Line<'a>> {
        let mut lines = vec![
            Line::styled("근무 상태", CAPTION_STYLE),
            Line::styled(self.label.clone(), self.label_style),
        ];
        if let Some(wake_time) = self.wake_time {
            lines.push(Line::styled("기상 시간", CAPTION_STYLE));
            lines.push(Line::styled(wake_time, VALUE_STYLE));
        }
        if !self.colleagues.is_empty() {
            lines.push(Line::styled("함께 일하는 사람", CAPTION_STYLE));
            lines.extend(tag_lines(self.colleagues, usize::from(width)));
        }
        lines
    }

    /// Height needed to show the whole panel, borders included, at the given
    /// outer width
    pub(super) fn height(&self, width: u16) -> u16 {
        let body = u16::try_from(self.lines(width.saturating_sub(2)).len()).unwrap_or(u16::MAX);
        body.saturating_add(2)
    }
}

impl Widget for DetailPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(*buf.area());
        if area.is_empty() {
            return;
        }
        Clear.render(area, buf);
        let block = Block::bordered().title(self.header()).style(PANEL_STYLE);
        let inner = block.inner(area);
        block.render(area, buf);
        for (y, line) in std::iter::zip(inner.top().., self.lines(inner.width)) {
            if y >= inner.bottom() {
                break;
            }
            line.render(Rect::new(inner.x, y, inner.width, 1), buf);
        }
    }
}

fn tag_lines(colleagues: &[String], width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current = Vec::new();
    let mut used = 0;
    for name in colleagues {
        let tag = Span::styled(format!(" {name} "), TAG_STYLE);
        let tag_width = tag.width();
        if !current.is_empty() && used + 1 + tag_width > width {
            lines.push(Line::from(std::mem::take(&mut current)));
            used = 0;
        }
        if !current.is_empty() {
            current.push(Span::raw(" "));
            used += 1;
        }
        used += tag_width;
        current.push(tag);
    }
    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}
