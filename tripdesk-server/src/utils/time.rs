//! 时间工具函数 — 表单日期/时刻解析
//!
//! 表单里的日期是 `YYYY-MM-DD`，时刻是 `HH:MM`，都是纯文本，
//! 没有时区。解析失败的错误信息带上列名，方便前端定位字段。

use chrono::{NaiveDate, NaiveTime, Timelike};
use shared::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(value: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("{field}: invalid date '{value}'")))
}

/// 解析时刻字符串 (HH:MM)
pub fn parse_clock(value: &str, field: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::validation(format!("{field}: invalid time '{value}'")))
}

/// 宽松解析日期：解析不了就返回 None，派生字段留空
pub fn try_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// 宽松解析时刻
pub fn try_clock(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

/// 时刻 → 当日分钟数 (0..1440)
pub fn clock_minutes(t: NaiveTime) -> i64 {
    (t.hour() * 60 + t.minute()) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dates_and_clocks() {
        assert!(parse_date("2025-07-14", "Date_Out").is_ok());
        assert!(parse_date("14/07/2025", "Date_Out").is_err());
        assert_eq!(
            clock_minutes(parse_clock("22:00", "Driver_Time_Out").unwrap()),
            22 * 60
        );
        assert!(parse_clock("9am", "Time_In").is_err());
    }

    #[test]
    fn errors_name_the_field() {
        let err = parse_clock("later", "Driver_Time_In").unwrap_err();
        assert!(err.to_string().contains("Driver_Time_In"));
    }
}
