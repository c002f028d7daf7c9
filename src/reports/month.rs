//! Calendar month boundaries
//!
//! "This month" spans from the first day at 00:00:00.000 to the last day at
//! 23:59:59.999, both in the caller's time zone. Month length (28 to 31
//! days, leap years included) comes from the calendar.

use chrono::{
    DateTime, Datelike, Days, Duration, Local, Months, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Utc,
};

/// Upper bound on how far a start bound is pushed past a skipped wall-clock span
const MAX_GAP_MINUTES: i64 = 48 * 60;

fn first_day(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// First instant at or after the wall-clock time `naive` in `tz`.
///
/// Ambiguous times take the earlier instant. Times skipped by a DST jump
/// move forward to the first minute that exists.
fn first_instant<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    let mut candidate = naive;
    for _ in 0..=MAX_GAP_MINUTES {
        if let Some(instant) = tz.from_local_datetime(&candidate).earliest() {
            return instant;
        }
        candidate += Duration::minutes(1);
    }
    tz.from_utc_datetime(&naive)
}

/// Last millisecond before the day `next` begins in `tz`
fn last_instant_before<Tz: TimeZone>(tz: &Tz, next: NaiveDate) -> DateTime<Tz> {
    first_instant(tz, next.and_time(NaiveTime::MIN)) - Duration::milliseconds(1)
}

/// First instant of the month containing `now`
pub fn start_of_month<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    first_instant(&now.timezone(), first_day(now.date_naive()).and_time(NaiveTime::MIN))
}

/// Last millisecond of the month containing `now`
pub fn end_of_month<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let next_month = first_day(now.date_naive()) + Months::new(1);
    last_instant_before(&now.timezone(), next_month)
}

/// First and last millisecond of `date` in `tz`
pub fn day_bounds<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> (DateTime<Tz>, DateTime<Tz>) {
    (
        first_instant(tz, date.and_time(NaiveTime::MIN)),
        last_instant_before(tz, date + Days::new(1)),
    )
}

/// Start of the current month in local time
pub fn start_of_current_month() -> DateTime<Utc> {
    start_of_month(&Local::now()).with_timezone(&Utc)
}

/// End of the current month in local time
pub fn end_of_current_month() -> DateTime<Utc> {
    end_of_month(&Local::now()).with_timezone(&Utc)
}

/// Human label for the month containing `now`, e.g. `March 2025`
pub fn month_label<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%B %Y").to_string()
}
