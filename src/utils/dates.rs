//! 日期解析与按天归一
//!
//! 所有日界均按 UTC 计算。

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// 一天的秒数
pub const SECONDS_PER_DAY: i64 = 86_400;

/// 解析 RFC 3339、`YYYY-MM-DDTHH:MM:SS` 或 `YYYY-MM-DD`，无时区时按 UTC
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// 当天 UTC 零点
pub fn start_of_day(dt: DateTime<Utc>) -> DateTime<Utc> {
    Utc.from_utc_datetime(&dt.date_naive().and_time(NaiveTime::MIN))
}

/// 当天的闭区间 [00:00:00, 23:59:59]，以 Unix 秒表示
pub fn day_bounds(dt: DateTime<Utc>) -> (i64, i64) {
    let start = start_of_day(dt).timestamp();
    (start, start + SECONDS_PER_DAY - 1)
}

/// 以 today 结尾的连续 n 天，按日期升序
pub fn trailing_days(today: NaiveDate, n: u64) -> Vec<NaiveDate> {
    let first = today
        .checked_sub_days(Days::new(n.saturating_sub(1)))
        .unwrap_or(today);
    first.iter_days().take(n as usize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date_is_utc_midnight() {
        let dt = parse_date("2025-01-10").unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-01-10T00:00:00+00:00");
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_date("2025-01-10T23:30:00-02:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-01-11T01:30:00+00:00");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_date("yesterday").is_none());
        assert!(parse_date("").is_none());
        assert!(parse_date("2025-13-01").is_none());
    }

    #[test]
    fn test_day_bounds() {
        let dt = parse_date("2025-01-10T15:45:12Z").unwrap();
        let (start, end) = day_bounds(dt);
        assert_eq!(start, parse_date("2025-01-10").unwrap().timestamp());
        assert_eq!(end - start, 86_399);
    }

    #[test]
    fn test_trailing_days() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let days = trailing_days(today, 7);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2025, 2, 24).unwrap());
        assert_eq!(days[6], today);
    }
}
