use chrono::{Datelike, Days, NaiveDate, Weekday};

/// First and last day of the month containing `day`.
pub fn month_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = day.with_day(1).unwrap_or(day);
    let last = first
        .checked_add_months(chrono::Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(day);
    (first, last)
}

/// First and last day of the year containing `day`.
pub fn year_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = day.with_ordinal(1).unwrap_or(day);
    let last = NaiveDate::from_ymd_opt(day.year(), 12, 31).unwrap_or(day);
    (first, last)
}

pub fn is_working_day(day: NaiveDate) -> bool {
    !matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Monday..Friday days in `from..=to`, in order.
pub fn working_days(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    from.iter_days()
        .take_while(move |d| *d <= to)
        .filter(|d| is_working_day(*d))
}

/// Zero when the range is empty.
pub fn working_days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    working_days(from, to).count() as i64
}

pub fn days_before(day: NaiveDate, n: i64) -> NaiveDate {
    day.checked_sub_days(Days::new(n.max(0) as u64))
        .unwrap_or(NaiveDate::MIN)
}
