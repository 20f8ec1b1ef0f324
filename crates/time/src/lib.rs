pub use chrono;
pub mod jalali;
pub mod window;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

pub use jalali::{jalali_label, JalaliDate};
pub use window::Window;

/// Fixed offset from UTC given in (possibly fractional) hours, e.g. `3.5`.
pub fn offset_from_hours(hours: f64) -> Option<FixedOffset> {
    if !hours.is_finite() {
        return None;
    }
    FixedOffset::east_opt((hours * 3600.0).round() as i32)
}

/// Civil date at `offset` for the given instant.
pub fn local_date(now: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    now.with_timezone(&offset).date_naive()
}

pub fn local_today(offset: FixedOffset) -> NaiveDate {
    local_date(Utc::now(), offset)
}
