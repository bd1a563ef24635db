use crate::theme::shift::*;
use ratatui::style::{Color, Modifier, Style};

/// The fixed vocabulary of shift codes found in schedule data
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum ShiftCode {
    /// `주`
    Day,
    /// `야`
    Night,
    /// `비`: off duty after a night shift
    OffDuty,
    /// `휴`
    Rest,
}

impl ShiftCode {
    pub(crate) const ALL: [ShiftCode; 4] = [
        ShiftCode::Day,
        ShiftCode::Night,
        ShiftCode::OffDuty,
        ShiftCode::Rest,
    ];

    pub(crate) fn parse(code: &str) -> Option<ShiftCode> {
        ShiftCode::ALL.into_iter().find(|sc| sc.code() == code)
    }

    pub(crate) fn code(self) -> &'static str {
        match self {
            ShiftCode::Day => "주",
            ShiftCode::Night => "야",
            ShiftCode::OffDuty => "비",
            ShiftCode::Rest => "휴",
        }
    }

    /// Short name shown inside a day cell
    pub(crate) fn label(self) -> &'static str {
        match self {
            ShiftCode::Day => "주간",
            ShiftCode::Night => "야간",
            ShiftCode::OffDuty => "비번",
            ShiftCode::Rest => "휴무",
        }
    }

    /// Longer human-readable name, used as the default detail-panel label.
    /// Days off are already fully named by their short label.
    pub(crate) fn description(self) -> &'static str {
        match self {
            ShiftCode::Day => "주간 근무",
            ShiftCode::Night => "야간 근무",
            ShiftCode::OffDuty | ShiftCode::Rest => self.label(),
        }
    }

    pub(crate) fn style(self) -> CodeStyle {
        let (background, foreground) = match self {
            ShiftCode::Day => (DAY_BG, DAY_FG),
            ShiftCode::Night => (NIGHT_BG, NIGHT_FG),
            ShiftCode::OffDuty => (OFF_DUTY_BG, OFF_DUTY_FG),
            ShiftCode::Rest => (REST_BG, REST_FG),
        };
        CodeStyle {
            background,
            foreground,
            label: self.label(),
        }
    }
}

/// Colours and short cell label for a schedule code
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CodeStyle {
    pub(crate) background: Color,
    pub(crate) foreground: Color,
    pub(crate) label: &'static str,
}

impl CodeStyle {
    /// Used for any code outside the fixed vocabulary
    pub(crate) const NEUTRAL: CodeStyle = CodeStyle {
        background: NEUTRAL_BG,
        foreground: NEUTRAL_FG,
        label: "",
    };

    pub(crate) fn for_code(code: &str) -> CodeStyle {
        ShiftCode::parse(code).map_or(CodeStyle::NEUTRAL, ShiftCode::style)
    }

    pub(crate) fn cell_style(&self) -> Style {
        Style::new().fg(NEUTRAL_FG).bg(self.background)
    }

    pub(crate) fn label_style(&self) -> Style {
        Style::new()
            .fg(self.foreground)
            .add_modifier(Modifier::BOLD)
    }
}
