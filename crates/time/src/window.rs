use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use model::period::Period;

use crate::jalali::{jalali_label, JalaliDate};

/// Half-open `[start, end)` interval of local civil time a report covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub period: Period,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub label: String,
}

impl Window {
    pub fn resolve(period: Period, today: NaiveDate) -> Window {
        match period {
            Period::Daily => Window::daily(today),
            Period::Weekly => Window::weekly(today),
            Period::Monthly => Window::monthly(today),
        }
    }

    /// Yesterday, labelled with its Jalali date.
    pub fn daily(today: NaiveDate) -> Window {
        let yesterday = today - Days::new(1);
        Window {
            period: Period::Daily,
            start: midnight(yesterday),
            end: midnight(today),
            label: jalali_label(yesterday),
        }
    }

    /// The seven days before `today`.
    ///
    /// The weekly job runs on Saturday, so this is the Saturday..Friday week
    /// just finished. On any other day it is still the trailing seven days.
    pub fn weekly(today: NaiveDate) -> Window {
        let last_day = today - Days::new(1);
        let first_day = last_day - Days::new(6);
        Window {
            period: Period::Weekly,
            start: midnight(first_day),
            end: midnight(last_day + Days::new(1)),
            label: format!("{} -> {}", jalali_label(first_day), jalali_label(last_day)),
        }
    }

    /// The Jalali month before the one `today` falls in.
    pub fn monthly(today: NaiveDate) -> Window {
        let current = JalaliDate::from_gregorian(today).first_of_month();
        let prev = current.prev_month();
        Window {
            period: Period::Monthly,
            start: midnight(prev.to_gregorian()),
            end: midnight(current.to_gregorian()),
            label: prev.month_label(),
        }
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}
