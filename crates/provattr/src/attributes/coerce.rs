//! String <-> typed value conversions for stored attribute values.
//!
//! Every decoder returns `Option`: `None` means "not representable as this
//! kind" and the caller decides what default to fall back to. Nothing in here
//! logs or panics.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Canonical stored token for `true`.
pub const TRUE: &str = "TRUE";
/// Canonical stored token for `false`.
pub const FALSE: &str = "FALSE";

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

const GENERALIZED_TIME: &str = "%Y%m%d%H%M%SZ";
const GENERALIZED_TIME_FRACTIONAL: &str = "%Y%m%d%H%M%S%.fZ";

pub fn encode_bool(value: bool) -> &'static str {
    if value {
        TRUE
    } else {
        FALSE
    }
}

/// Anything other than the canonical true token reads as `false`.
pub fn decode_bool(raw: &str) -> bool {
    raw == TRUE
}

/// Strict form used when validating input: accepts either token in any case.
pub fn parse_bool_token(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case(TRUE) {
        Some(true)
    } else if raw.eq_ignore_ascii_case(FALSE) {
        Some(false)
    } else {
        None
    }
}

pub fn decode_int(raw: &str) -> Option<i32> {
    raw.parse().ok()
}

/// Decimal, or a memory size with a `KB`/`MB`/`GB` suffix (base 1024).
pub fn decode_long(raw: &str) -> Option<i64> {
    if let Some(bytes) = decode_memory_unit(raw) {
        return Some(bytes);
    }
    raw.parse().ok()
}

fn decode_memory_unit(raw: &str) -> Option<i64> {
    if raw.len() < 3 || !raw.is_char_boundary(raw.len() - 2) {
        return None;
    }
    let (number, unit) = raw.split_at(raw.len() - 2);
    let shift = match unit.to_ascii_uppercase().as_str() {
        "KB" => 10,
        "MB" => 20,
        "GB" => 30,
        _ => return None,
    };
    let n: i64 = number.parse().ok()?;
    n.checked_mul(1i64 << shift)
}

/// Parse `<n>[d|h|m|s|ms]` into milliseconds. A bare number is seconds.
pub fn decode_duration(raw: &str) -> Option<i64> {
    if raw.is_empty() {
        return None;
    }
    if let Some(n) = raw.strip_suffix("ms") {
        return n.parse().ok();
    }
    let unit = raw.chars().last()?;
    if unit.is_ascii_digit() {
        return raw.parse::<i64>().ok()?.checked_mul(MILLIS_PER_SECOND);
    }
    let factor = match unit {
        'd' => MILLIS_PER_DAY,
        'h' => MILLIS_PER_HOUR,
        'm' => MILLIS_PER_MINUTE,
        's' => MILLIS_PER_SECOND,
        _ => return None,
    };
    let n: i64 = raw[..raw.len() - unit.len_utf8()].parse().ok()?;
    n.checked_mul(factor)
}

/// LDAP generalized time, e.g. `20240131235959Z`.
pub fn decode_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, GENERALIZED_TIME)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, GENERALIZED_TIME_FRACTIONAL))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Whole seconds encode as `YYYYMMDDHHMMSSZ`; a sub-second part is kept as
/// a fraction (`.250`, `.000001`, ...).
pub fn encode_timestamp(value: &DateTime<Utc>) -> String {
    let format = if value.timestamp_subsec_nanos() == 0 {
        GENERALIZED_TIME
    } else {
        GENERALIZED_TIME_FRACTIONAL
    };
    value.format(format).to_string()
}

/// Values a caller can hand to a setter, rendered in stored form.
pub trait ToAttrValue {
    fn to_attr_value(&self) -> String;
}

impl ToAttrValue for bool {
    fn to_attr_value(&self) -> String {
        encode_bool(*self).to_string()
    }
}

impl ToAttrValue for i32 {
    fn to_attr_value(&self) -> String {
        self.to_string()
    }
}

impl ToAttrValue for i64 {
    fn to_attr_value(&self) -> String {
        self.to_string()
    }
}

impl ToAttrValue for str {
    fn to_attr_value(&self) -> String {
        self.to_string()
    }
}

impl ToAttrValue for String {
    fn to_attr_value(&self) -> String {
        self.clone()
    }
}

impl ToAttrValue for DateTime<Utc> {
    fn to_attr_value(&self) -> String {
        encode_timestamp(self)
    }
}

impl<T: ToAttrValue + ?Sized> ToAttrValue for &T {
    fn to_attr_value(&self) -> String {
        (**self).to_attr_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn bool_tokens_are_canonical() {
        assert_eq!(encode_bool(true), "TRUE");
        assert_eq!(encode_bool(false), "FALSE");
        assert!(decode_bool("TRUE"));
        assert!(!decode_bool("FALSE"));
    }

    #[test]
    fn non_canonical_bool_reads_false() {
        assert!(!decode_bool("true"));
        assert!(!decode_bool("yes"));
        assert!(!decode_bool(""));
    }

    #[test]
    fn bool_token_validation_ignores_case() {
        assert_eq!(parse_bool_token("true"), Some(true));
        assert_eq!(parse_bool_token("False"), Some(false));
        assert_eq!(parse_bool_token("1"), None);
    }

    #[test]
    fn int_parses_or_rejects() {
        assert_eq!(decode_int("8080"), Some(8080));
        assert_eq!(decode_int("-1"), Some(-1));
        assert_eq!(decode_int("80a"), None);
        assert_eq!(decode_int("99999999999"), None);
    }

    #[test]
    fn long_accepts_memory_units() {
        assert_eq!(decode_long("10485760"), Some(10_485_760));
        assert_eq!(decode_long("10MB"), Some(10_485_760));
        assert_eq!(decode_long("2kb"), Some(2048));
        assert_eq!(decode_long("1GB"), Some(1 << 30));
        assert_eq!(decode_long("MB"), None);
        assert_eq!(decode_long("ten"), None);
    }

    #[test]
    fn duration_units() {
        assert_eq!(decode_duration("90s"), Some(90_000));
        assert_eq!(decode_duration("2h"), Some(7_200_000));
        assert_eq!(decode_duration("1m"), Some(60_000));
        assert_eq!(decode_duration("30d"), Some(30 * 86_400_000));
        assert_eq!(decode_duration("250ms"), Some(250));
    }

    #[test]
    fn duration_without_unit_is_seconds() {
        assert_eq!(decode_duration("10"), Some(10_000));
    }

    #[test]
    fn malformed_duration_is_none() {
        assert_eq!(decode_duration(""), None);
        assert_eq!(decode_duration("h"), None);
        assert_eq!(decode_duration("10w"), None);
        assert_eq!(decode_duration("ten s"), None);
    }

    #[test]
    fn generalized_time_round_trip() {
        let when = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 58).unwrap();
        let raw = encode_timestamp(&when);
        assert_eq!(raw, "20240131235958Z");
        assert_eq!(decode_timestamp(&raw), Some(when));
    }

    #[test]
    fn generalized_time_with_fraction() {
        let parsed = decode_timestamp("20240131235958.250Z").unwrap();
        assert_eq!(parsed.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn generalized_time_keeps_sub_second_part() {
        let when = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 58).unwrap()
            + chrono::Duration::milliseconds(250);
        let raw = encode_timestamp(&when);
        assert_eq!(raw, "20240131235958.250Z");
        assert_eq!(decode_timestamp(&raw), Some(when));

        let micros = when + chrono::Duration::microseconds(1);
        assert_eq!(decode_timestamp(&encode_timestamp(&micros)), Some(micros));
    }

    #[test]
    fn malformed_generalized_time_is_none() {
        assert_eq!(decode_timestamp("2024-01-31"), None);
        assert_eq!(decode_timestamp("20240131235958"), None);
    }

    #[test]
    fn setter_values_render_in_stored_form() {
        assert_eq!(true.to_attr_value(), "TRUE");
        assert_eq!(8080i32.to_attr_value(), "8080");
        assert_eq!(10_485_760i64.to_attr_value(), "10485760");
        assert_eq!("90s".to_attr_value(), "90s");
    }
}
