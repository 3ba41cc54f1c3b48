//! RFC 3339 date/time attribute values.
//!
//! Responsibilities:
//! - Parse wire date/times and remember how they were written: the number of
//!   fractional-second digits, the UTC offset and whether `Z` was used.
//! - Write received values back in that same form, so decode then encode
//!   reproduces the input text.
//! - Write values built in code with the configured [`TimestampPrecision`].
//!
//! Invariants / assumptions:
//! - At most nine fractional digits are kept; further digits are below chrono's
//!   resolution and are dropped on parse.
//! - Two timestamps are equal only when both the instant and the written form agree.

use std::fmt;

use chrono::{DateTime, FixedOffset, Offset, SecondsFormat, Timelike, Utc};
use loganalytics_config::{CodecConfig, TimestampPrecision};
use serde_json::Value;

use crate::codec::{DecodeContext, FromWire, ToWire};
use crate::error::Result;

const MAX_FRACTION_DIGITS: u8 = 9;

/// A point in time plus the textual form it arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timestamp {
    instant: DateTime<Utc>,
    offset: FixedOffset,
    /// `None` for values built in code; they follow the configured precision.
    fraction_digits: Option<u8>,
    zulu: bool,
}

impl Timestamp {
    /// A UTC timestamp rendered with the configured precision.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant,
            offset: Utc.fix(),
            fraction_digits: None,
            zulu: true,
        }
    }

    /// Parse RFC 3339 text, keeping its fraction width and offset.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let parsed = DateTime::parse_from_rfc3339(text).ok()?;
        Some(Self {
            instant: parsed.with_timezone(&Utc),
            offset: *parsed.offset(),
            fraction_digits: Some(fraction_width(text)),
            zulu: text.ends_with(['Z', 'z']),
        })
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// Fractional digits of the received text, if this value was parsed.
    pub fn fraction_digits(&self) -> Option<u8> {
        self.fraction_digits
    }

    /// Render as RFC 3339. `precision` only applies to values built in code.
    pub fn to_rfc3339(&self, precision: TimestampPrecision) -> String {
        let Some(digits) = self.fraction_digits else {
            return self
                .instant
                .to_rfc3339_opts(seconds_format(precision), true);
        };

        let local = self.instant.with_timezone(&self.offset);
        let mut text = local.format("%Y-%m-%dT%H:%M:%S").to_string();
        if digits > 0 {
            let nanos = format!("{:09}", local.nanosecond() % 1_000_000_000);
            text.push('.');
            text.push_str(&nanos[..usize::from(digits)]);
        }
        if self.zulu {
            text.push('Z');
        } else {
            text.push_str(&local.format("%:z").to_string());
        }
        text
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::new(instant)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339(TimestampPrecision::default()))
    }
}

/// Digits between the seconds' `.` and the offset.
fn fraction_width(text: &str) -> u8 {
    let Some((_, rest)) = text.split_once('.') else {
        return 0;
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    u8::try_from(digits).map_or(MAX_FRACTION_DIGITS, |d| d.min(MAX_FRACTION_DIGITS))
}

fn seconds_format(precision: TimestampPrecision) -> SecondsFormat {
    match precision {
        TimestampPrecision::Seconds => SecondsFormat::Secs,
        TimestampPrecision::Millis => SecondsFormat::Millis,
        TimestampPrecision::Micros => SecondsFormat::Micros,
        TimestampPrecision::Nanos => SecondsFormat::Nanos,
        TimestampPrecision::Auto => SecondsFormat::AutoSi,
    }
}

impl FromWire for Timestamp {
    fn from_wire(value: &Value, ctx: &mut DecodeContext<'_>) -> Result<Self> {
        match value {
            Value::String(s) => {
                Self::parse(s).ok_or_else(|| ctx.mismatch("RFC 3339 date-time", value))
            }
            other => Err(ctx.mismatch("RFC 3339 date-time", other)),
        }
    }
}

impl ToWire for Timestamp {
    fn to_wire(&self, config: &CodecConfig) -> Value {
        Value::String(self.to_rfc3339(config.timestamp_precision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn decode(value: Value) -> Result<Timestamp> {
        let mut ctx = DecodeContext::new(&CodecConfig::default(), None);
        Timestamp::from_wire(&value, &mut ctx)
    }

    fn round_trip(text: &str) -> Value {
        decode(json!(text)).unwrap().to_wire(&CodecConfig::default())
    }

    #[test]
    fn test_received_text_is_reproduced() {
        for text in [
            "2024-05-01T00:00:00Z",
            "2024-05-01T00:00:00.5Z",
            "2024-03-01T08:00:00.000Z",
            "2024-03-01T08:00:00.250Z",
            "2024-03-01T08:00:00.123456Z",
            "2024-03-01T08:00:00.000001Z",
            "2024-03-01T08:00:00.123456789Z",
            "2024-03-01T10:00:00.250+02:00",
            "2024-03-01T03:30:00-04:30",
            "2024-03-01T08:00:00+00:00",
        ] {
            assert_eq!(round_trip(text), json!(text), "{text}");
        }
    }

    #[test]
    fn test_width_and_offset_are_kept_but_instant_is_utc() {
        let ts = decode(json!("2024-03-01T10:00:00.123456+02:00")).unwrap();
        assert_eq!(ts.fraction_digits(), Some(6));
        assert_eq!(
            ts.instant(),
            Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap() + chrono::Duration::microseconds(123_456)
        );
    }

    #[test]
    fn test_same_instant_different_form_is_not_equal() {
        let a = decode(json!("2024-03-01T08:00:00Z")).unwrap();
        let b = decode(json!("2024-03-01T08:00:00.000Z")).unwrap();
        let c = decode(json!("2024-03-01T10:00:00+02:00")).unwrap();
        assert_eq!(a.instant(), b.instant());
        assert_eq!(a.instant(), c.instant());
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_invalid_text_is_a_mismatch() {
        assert!(decode(json!("yesterday")).is_err());
        assert!(decode(json!(1700000000)).is_err());
    }

    #[test]
    fn test_built_values_follow_config_precision() {
        let ts = Timestamp::from(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap());
        assert_eq!(ts.to_wire(&CodecConfig::default()), json!("2024-03-01T08:00:00.000Z"));

        let config = CodecConfig {
            timestamp_precision: TimestampPrecision::Seconds,
            ..CodecConfig::default()
        };
        assert_eq!(ts.to_wire(&config), json!("2024-03-01T08:00:00Z"));

        let config = CodecConfig {
            timestamp_precision: TimestampPrecision::Micros,
            ..CodecConfig::default()
        };
        assert_eq!(ts.to_wire(&config), json!("2024-03-01T08:00:00.000000Z"));
    }

    #[test]
    fn test_received_width_ignores_config_precision() {
        let ts = decode(json!("2024-03-01T08:00:00.5Z")).unwrap();
        let config = CodecConfig {
            timestamp_precision: TimestampPrecision::Nanos,
            ..CodecConfig::default()
        };
        assert_eq!(ts.to_wire(&config), json!("2024-03-01T08:00:00.5Z"));
    }
}
