use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current UTC calendar date
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Milliseconds at 00:00:00 UTC of `date`
pub fn start_of_day_millis(date: NaiveDate) -> i64 {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
        .timestamp_millis()
}

/// Milliseconds at the last instant (23:59:59.999 UTC) of `date`
pub fn end_of_day_millis(date: NaiveDate) -> i64 {
    match date.succ_opt() {
        Some(next) => start_of_day_millis(next) - 1,
        None => i64::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_bounds_cover_whole_day() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let start = start_of_day_millis(d);
        let end = end_of_day_millis(d);
        assert_eq!(end - start, 24 * 60 * 60 * 1000 - 1);
        assert_eq!(start_of_day_millis(d.succ_opt().unwrap()), end + 1);
    }
}
