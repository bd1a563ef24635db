mod detail;
mod grid;
mod shift;
mod widget;
pub(crate) use self::grid::{OutOfTimeError, WeekStart, YearMonth};
pub(crate) use self::shift::ShiftCode;
pub(crate) use self::widget::ScheduleCalendar;

/// Translates a schedule code into the human-readable label shown in the
/// detail panel
pub(crate) trait ScheduleLabeler {
    fn schedule_type(&self, code: &str) -> String;
}

impl<F: Fn(&str) -> String> ScheduleLabeler for F {
    fn schedule_type(&self, code: &str) -> String {
        self(code)
    }
}

/// An intent reported by the calendar in response to user input.  The
/// calendar itself never acts on these; the host decides what they mean.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum CalendarEvent {
    /// The selection should become the given day (or nothing)
    SelectDay(Option<u8>),
    PrevMonth,
    NextMonth,
}

impl CalendarEvent {
    pub(crate) fn dispatch<H: CalendarHandler + ?Sized>(self, handler: &mut H) {
        match self {
            CalendarEvent::SelectDay(day) => handler.select_day(day),
            CalendarEvent::PrevMonth => handler.prev_month(),
            CalendarEvent::NextMonth => handler.next_month(),
        }
    }
}

pub(crate) trait CalendarHandler {
    fn select_day(&mut self, day: Option<u8>);
    fn prev_month(&mut self);
    fn next_month(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Recorder(Vec<String>);

    impl CalendarHandler for Recorder {
        fn select_day(&mut self, day: Option<u8>) {
            self.0.push(format!("select {day:?}"));
        }

        fn prev_month(&mut self) {
            self.0.push(String::from("prev"));
        }

        fn next_month(&mut self) {
            self.0.push(String::from("next"));
        }
    }

    #[test]
    fn test_dispatch() {
        let mut rec = Recorder::default();
        CalendarEvent::SelectDay(Some(3)).dispatch(&mut rec);
        CalendarEvent::NextMonth.dispatch(&mut rec);
        CalendarEvent::SelectDay(None).dispatch(&mut rec);
        CalendarEvent::PrevMonth.dispatch(&mut rec);
        assert_eq!(rec.0, ["select Some(3)", "next", "select None", "prev"]);
    }

    #[test]
    fn test_closure_labeler() {
        let labeler = |code: &str| format!("<{code}>");
        assert_eq!(labeler.schedule_type("주"), "<주>");
    }
}
