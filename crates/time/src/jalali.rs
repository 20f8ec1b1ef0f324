//! Solar Hijri (Jalali) calendar, used for report labels only.
//!
//! Arithmetic 33-year cycle anchored at 1 Farvardin 979, which falls on
//! 20 March 1600 in the proleptic Gregorian calendar.

use std::fmt;

use chrono::{Days, NaiveDate};

const EPOCH_YEAR: i32 = 979;
const MONTH_DAYS: [u32; 12] = [31, 31, 31, 31, 31, 31, 30, 30, 30, 30, 30, 29];
const CYCLE_DAYS: i64 = 12053;
const FOUR_YEARS_DAYS: i64 = 1461;

const EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1600, 3, 20) {
    Some(date) => date,
    None => panic!("invalid jalali epoch"),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct JalaliDate {
    year: i32,
    month: u32,
    day: u32,
}

impl JalaliDate {
    pub fn from_gregorian(date: NaiveDate) -> JalaliDate {
        let days = (date - EPOCH).num_days();
        let mut rem = days.rem_euclid(CYCLE_DAYS);
        let mut year =
            EPOCH_YEAR as i64 + 33 * days.div_euclid(CYCLE_DAYS) + 4 * (rem / FOUR_YEARS_DAYS);
        rem %= FOUR_YEARS_DAYS;
        if rem >= 366 {
            year += (rem - 1) / 365;
            rem = (rem - 1) % 365;
        }

        let mut month = 1;
        for len in &MONTH_DAYS[..11] {
            if rem < *len as i64 {
                break;
            }
            rem -= *len as i64;
            month += 1;
        }

        JalaliDate {
            year: year as i32,
            month,
            day: rem as u32 + 1,
        }
    }

    pub fn to_gregorian(&self) -> NaiveDate {
        let years = (self.year - EPOCH_YEAR) as i64;
        let mut days = 365 * years + years.div_euclid(33) * 8 + (years.rem_euclid(33) + 3) / 4;
        days += MONTH_DAYS[..self.month as usize - 1]
            .iter()
            .map(|len| *len as i64)
            .sum::<i64>();
        days += self.day as i64 - 1;

        if days >= 0 {
            EPOCH + Days::new(days as u64)
        } else {
            EPOCH - Days::new(days.unsigned_abs())
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// First day of the month this date belongs to.
    pub fn first_of_month(&self) -> JalaliDate {
        JalaliDate { day: 1, ..*self }
    }

    /// First day of the previous month.
    pub fn prev_month(&self) -> JalaliDate {
        if self.month == 1 {
            JalaliDate {
                year: self.year - 1,
                month: 12,
                day: 1,
            }
        } else {
            JalaliDate {
                year: self.year,
                month: self.month - 1,
                day: 1,
            }
        }
    }

    /// `YYYY-MM`
    pub fn month_label(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

impl fmt::Display for JalaliDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Gregorian date rendered as a Jalali `YYYY-MM-DD` string.
pub fn jalali_label(date: NaiveDate) -> String {
    JalaliDate::from_gregorian(date).to_string()
}
