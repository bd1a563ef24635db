use crate::theme::help::{HELP_STYLE, KEY_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Padding, Paragraph, Widget},
};

static COMMANDS: &[(&str, &str)] = &[
    ("h, LEFT", "Select previous day"),
    ("l, RIGHT", "Select next day"),
    ("k, UP", "Select same day last week"),
    ("j, DOWN", "Select same day next week"),
    ("SPACE, ENTER", "Select/unselect day"),
    ("[, PAGE UP", "Previous month"),
    ("], PAGE DOWN", "Next month"),
    ("0, HOME", "Jump to this month"),
    ("ESC", "Unselect day, or quit"),
    ("?", "Show this help"),
    ("q", "Quit"),
];

static FOOTER: &[&str] = &[
    "Click a day to select it, or an arrow",
    "to change months.",
    "",
    "Press the Any Key to dismiss.",
];

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Help;

impl Help {
    fn text() -> Text<'static> {
        let mut lines = COMMANDS
            .iter()
            .map(|&(keys, what)| {
                Line::from(vec![
                    Span::styled(format!("{keys:<16}"), KEY_STYLE),
                    Span::raw(what),
                ])
            })
            .collect::<Vec<_>>();
        lines.push(Line::default());
        lines.extend(FOOTER.iter().map(|&s| Line::raw(s)));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Help::text();
        // Borders on all sides plus one column of padding left and right
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(4);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let [popup] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(popup);
        Clear.render(popup, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center)
                    .padding(Padding::horizontal(1)),
            )
            .style(HELP_STYLE)
            .render(popup, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_centered() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        Help.render(area, &mut buf);
        let text = Help::text();
        let width = u16::try_from(text.width()).unwrap() + 4;
        let height = u16::try_from(text.height()).unwrap() + 2;
        let corner = buf
            .content()
            .iter()
            .position(|cell| cell.symbol() == "┌")
            .unwrap();
        let (left, top) = buf.pos_of(corner);
        assert!(left.abs_diff(80 - (left + width)) <= 1);
        assert!(top.abs_diff(24 - (top + height)) <= 1);
        assert_eq!(buf[(left + width - 1, top + height - 1)].symbol(), "┘");
        assert_eq!(buf[(left + 2, top + 1)].symbol(), "h");
        assert_eq!(buf[(left + 2, top + 1)].style().add_modifier, KEY_STYLE.add_modifier);
        assert_eq!(buf[(left + 18, top + 1)].symbol(), "S");
    }
}
