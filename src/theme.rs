use ratatui::style::{Color, Modifier, Style};

const WHITE: Color = Color::Rgb(255, 255, 255);
const SLATE_50: Color = Color::Rgb(248, 250, 252);
const SLATE_500: Color = Color::Rgb(100, 116, 139);
const SLATE_600: Color = Color::Rgb(71, 85, 105);
const SLATE_900: Color = Color::Rgb(15, 23, 42);
const BLUE_50: Color = Color::Rgb(239, 246, 255);
const BLUE_100: Color = Color::Rgb(219, 234, 254);
const BLUE_500: Color = Color::Rgb(59, 130, 246);
const BLUE_700: Color = Color::Rgb(29, 78, 216);

pub(crate) const BASE_STYLE: Style = Style::new().fg(SLATE_900).bg(WHITE);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const NAV_BUTTON_STYLE: Style = BASE_STYLE.fg(SLATE_600).add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.fg(SLATE_600).add_modifier(Modifier::BOLD);

pub(crate) mod cell {
    use super::*;

    /// Background of a day with no schedule entry
    pub(crate) const PLAIN_CELL_STYLE: Style = Style::new().fg(SLATE_900).bg(SLATE_50);

    pub(crate) const SELECTED_CELL_STYLE: Style = Style::new().fg(SLATE_900).bg(BLUE_50);

    pub(crate) const DAY_NUMBER_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

    pub(crate) const SELECTED_MARKER_STYLE: Style = Style::new()
        .fg(BLUE_500)
        .add_modifier(Modifier::BOLD);

    pub(crate) const WAKE_TIME_STYLE: Style = Style::new().fg(SLATE_500);

    pub(crate) const COLLEAGUES_STYLE: Style = Style::new().fg(SLATE_600);
}

pub(crate) mod shift {
    use super::*;

    pub(crate) const DAY_BG: Color = BLUE_100;
    pub(crate) const DAY_FG: Color = BLUE_700;
    pub(crate) const NIGHT_BG: Color = Color::Rgb(243, 232, 255);
    pub(crate) const NIGHT_FG: Color = Color::Rgb(126, 34, 206);
    pub(crate) const OFF_DUTY_BG: Color = Color::Rgb(254, 243, 199);
    pub(crate) const OFF_DUTY_FG: Color = Color::Rgb(180, 83, 9);
    pub(crate) const REST_BG: Color = Color::Rgb(220, 252, 231);
    pub(crate) const REST_FG: Color = Color::Rgb(21, 128, 61);
    pub(crate) const NEUTRAL_BG: Color = Color::Rgb(243, 244, 246);
    pub(crate) const NEUTRAL_FG: Color = Color::Rgb(55, 65, 81);
}

pub(crate) mod detail {
    use super::*;

    pub(crate) const PANEL_STYLE: Style = Style::new().fg(SLATE_900).bg(SLATE_50);

    pub(crate) const CAPTION_STYLE: Style = Style::new().fg(SLATE_600);

    pub(crate) const VALUE_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

    pub(crate) const TAG_STYLE: Style = Style::new().fg(BLUE_700).bg(BLUE_100);
}

pub(crate) mod help {
    use super::*;

    pub(crate) const HELP_STYLE: Style = BASE_STYLE;

    pub(crate) const KEY_STYLE: Style = Style::new().fg(BLUE_700).add_modifier(Modifier::BOLD);
}
