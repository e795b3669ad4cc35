//! Dashboard helpers: duration labels and low-stock checks.
//!
//! User-facing text is Vietnamese; it is part of the output contract.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use pf_core::rounding::round_half_up;

/// A finish date this many days out (or fewer, but not past) counts as low.
pub const LOW_STOCK_THRESHOLD_DAYS: i64 = 5;

const NO_ESTIMATE: &str = "Chưa đủ dữ liệu để ước tính";
const MS_PER_DAY: i64 = 86_400_000;

/// Human label for a day count, e.g. "Đủ cho Mochi ăn khoảng 2 tuần".
///
/// Buckets: `< 7` days, `< 30` weeks, `< 90` months, otherwise "hơn 3 tháng".
/// Zero, negative or non-finite input reads as "not enough data".
pub fn format_duration_message(days: f64, pet_name: Option<&str>) -> String {
    if !days.is_finite() || days <= 0.0 {
        return NO_ESTIMATE.to_string();
    }

    let bucket = if days < 7.0 {
        format!("{} ngày", (round_half_up(days) as i64).max(1))
    } else if days < 30.0 {
        format!("khoảng {} tuần", round_half_up(days / 7.0) as i64)
    } else if days < 90.0 {
        format!("khoảng {} tháng", round_half_up(days / 30.0) as i64)
    } else {
        "hơn 3 tháng".to_string()
    };

    match pet_name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => format!("Đủ cho {name} ăn {bucket}"),
        None => format!("Đủ dùng {bucket}"),
    }
}

/// Whole days from `now` until midnight starting `finish`, rounded up.
/// Negative once the date has passed.
pub fn days_remaining(finish: NaiveDate, now: NaiveDateTime) -> i64 {
    let ms = (finish.and_time(NaiveTime::default()) - now).num_milliseconds();
    -((-ms).div_euclid(MS_PER_DAY))
}

/// `0 < days_remaining <= LOW_STOCK_THRESHOLD_DAYS`.
pub fn is_running_low(finish: NaiveDate, now: NaiveDateTime) -> bool {
    let d = days_remaining(finish, now);
    d > 0 && d <= LOW_STOCK_THRESHOLD_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(d: NaiveDate, h: u32) -> NaiveDateTime {
        d.and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn buckets() {
        assert_eq!(format_duration_message(4.9, None), "Đủ dùng 5 ngày");
        assert_eq!(format_duration_message(0.2, Some("Mướp")), "Đủ cho Mướp ăn 1 ngày");
        assert_eq!(format_duration_message(7.0, None), "Đủ dùng khoảng 1 tuần");
        assert_eq!(format_duration_message(20.0, Some("Lu")), "Đủ cho Lu ăn khoảng 3 tuần");
        assert_eq!(format_duration_message(30.0, None), "Đủ dùng khoảng 1 tháng");
        assert_eq!(format_duration_message(89.9, None), "Đủ dùng khoảng 3 tháng");
        assert_eq!(format_duration_message(90.0, Some("Lu")), "Đủ cho Lu ăn hơn 3 tháng");
    }

    #[test]
    fn no_data_message() {
        assert_eq!(format_duration_message(0.0, Some("Lu")), NO_ESTIMATE);
        assert_eq!(format_duration_message(-2.0, None), NO_ESTIMATE);
        assert_eq!(format_duration_message(f64::NAN, None), NO_ESTIMATE);
    }

    #[test]
    fn blank_name_uses_generic_prefix() {
        assert_eq!(format_duration_message(3.0, Some("  ")), "Đủ dùng 3 ngày");
    }

    #[test]
    fn remaining_rounds_up_partial_days() {
        let finish = date(2024, 3, 10);
        assert_eq!(days_remaining(finish, at(date(2024, 3, 10), 0)), 0);
        assert_eq!(days_remaining(finish, at(date(2024, 3, 9), 0)), 1);
        assert_eq!(days_remaining(finish, at(date(2024, 3, 8), 15)), 2);
        assert_eq!(days_remaining(finish, at(date(2024, 3, 10), 9)), 0);
        assert_eq!(days_remaining(finish, at(date(2024, 3, 12), 9)), -2);
    }

    #[test]
    fn running_low_window() {
        let finish = date(2024, 3, 10);
        assert!(is_running_low(finish, at(date(2024, 3, 5), 0)));
        assert!(is_running_low(finish, at(date(2024, 3, 9), 23)));
        assert!(!is_running_low(finish, at(date(2024, 3, 4), 0)));
        assert!(!is_running_low(finish, at(date(2024, 3, 10), 0)));
        assert!(!is_running_low(finish, at(date(2024, 3, 11), 0)));
    }
}
