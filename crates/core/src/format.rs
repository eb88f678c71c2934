//! en-US display formatting for amounts and timestamps

use crate::error::{ClientError, ClientResult};
use chrono::{
    DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount as US dollars, e.g. `1234.5` -> `$1,234.50`.
///
/// Rounds half away from zero on the exact binary value, so `1.005`
/// (really `1.00499…`) becomes `$1.00`.
pub fn format_currency(amount: f64) -> String {
    if amount.is_nan() {
        return "$NaN".to_string();
    }
    let sign = if amount.is_sign_negative() { "-" } else { "" };
    if amount.is_infinite() {
        return format!("{sign}$∞");
    }

    let fixed = Decimal::from_f64_retain(amount.abs()).map_or_else(
        || format!("{:.2}", amount.abs()),
        |d| {
            d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
                .to_string()
        },
    );
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    format!("{sign}${}.{cents:0<2}", group_thousands(whole))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Long-form date and time in the local zone,
/// e.g. `January 15, 2024 at 10:30 AM`.
///
/// # Errors
///
/// [`ClientError::Parse`] when `input` is not a recognizable date.
pub fn format_date(input: &str) -> ClientResult<String> {
    format_date_in(input, &Local)
}

/// [`format_date`] in an explicit time zone
pub fn format_date_in<Tz: TimeZone>(input: &str, tz: &Tz) -> ClientResult<String>
where
    Tz::Offset: std::fmt::Display,
{
    let instant = parse_date(input, tz)?;
    Ok(instant
        .with_timezone(tz)
        .format("%B %-d, %Y at %I:%M %p")
        .to_string())
}

/// Minute-precision date-times carrying an offset; `Z` is rewritten first
const OFFSET_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"];

const LOCAL_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Interpret `input` the way a browser `Date` would.
///
/// Offset-less date-times are wall-clock time in `tz`. A bare date, a
/// year-month or a year alone is UTC midnight on its first day.
fn parse_date<Tz: TimeZone>(input: &str, tz: &Tz) -> ClientResult<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ClientError::parse("empty date string"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    let zulu = input
        .strip_suffix(['Z', 'z'])
        .map(|rest| format!("{rest}+00:00"));
    let with_offset = zulu.as_deref().unwrap_or(input);
    for format in OFFSET_DATE_TIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(with_offset, format) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    for format in LOCAL_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return local_to_utc(&naive, tz);
        }
    }

    let date = match NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        Ok(date) => date,
        Err(e) => parse_partial_date(input)
            .ok_or_else(|| ClientError::parse(format!("invalid date {input:?}: {e}")))?,
    };
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

/// `YYYY-MM` or `YYYY`, anchored on the first day
fn parse_partial_date(input: &str) -> Option<NaiveDate> {
    let (year, month) = input.split_once('-').unwrap_or((input, "01"));
    let all_digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(year, 4) || !all_digits(month, 2) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

fn local_to_utc<Tz: TimeZone>(naive: &NaiveDateTime, tz: &Tz) -> ClientResult<DateTime<Utc>> {
    // Gaps from DST transitions fall back to the standard offset.
    tz.from_local_datetime(naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            let offset = tz.offset_from_utc_datetime(naive).fix();
            naive
                .checked_sub_offset(offset)
                .map(|utc| utc.and_utc())
        })
        .ok_or_else(|| ClientError::parse(format!("nonexistent local time {naive}")))
}
