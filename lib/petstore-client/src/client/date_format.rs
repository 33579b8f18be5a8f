//! Date formatting shared by the client configuration.
//!
//! A [`DateFormat`] is a handle: clones observe the same pattern and time
//! zone, so changing the zone of the formatter held by a built `ApiClient`
//! is visible to every other holder of that formatter.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use chrono::format::{Item, StrftimeItems};
use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, SecondsFormat, TimeZone,
    Utc,
};

use super::error::ApiClientError;

/// How dates are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatePattern {
    /// RFC 3339 with the given fractional second precision, `Z` for a zero offset.
    Rfc3339 {
        /// Fractional second precision.
        precision: SecondsFormat,
    },
    /// A `chrono` strftime pattern, e.g. `%Y-%m-%dT%H:%M:%S%:z`.
    Custom(String),
}

#[derive(Debug)]
struct DateFormatState {
    pattern: DatePattern,
    time_zone: FixedOffset,
}

/// Shared date formatter with a configurable time zone.
///
/// # Example
///
/// ```rust
/// use chrono::FixedOffset;
/// use petstore_client::DateFormat;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let format = DateFormat::rfc3339();
/// let date = format.parse("2015-11-07T05:49:09.356+02:00")?;
/// assert_eq!(format.format(&date), "2015-11-07T03:49:09.356Z");
///
/// let format = DateFormat::with_pattern("%Y-%m-%dT%H:%M:%S%:z")?
///     .with_time_zone(FixedOffset::east_opt(10 * 3600).ok_or("offset")?);
/// assert_eq!(format.format(&date), "2015-11-07T13:49:09+10:00");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DateFormat {
    state: Arc<RwLock<DateFormatState>>,
}

impl DateFormat {
    fn new(pattern: DatePattern, time_zone: FixedOffset) -> Self {
        let state = DateFormatState { pattern, time_zone };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// RFC 3339 with millisecond precision, in UTC.
    pub fn rfc3339() -> Self {
        Self::new(
            DatePattern::Rfc3339 {
                precision: SecondsFormat::Millis,
            },
            Utc.fix(),
        )
    }

    /// A custom strftime pattern, in UTC.
    ///
    /// Parsing tries the pattern first and falls back to RFC 3339, so an input
    /// using the `Z` designator is accepted where the pattern expects an offset.
    /// A pattern without an offset reads its input in the configured time zone.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::InvalidDatePattern`] if the pattern contains
    /// unknown specifiers.
    pub fn with_pattern(pattern: impl Into<String>) -> Result<Self, ApiClientError> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(ApiClientError::InvalidDatePattern { pattern });
        }
        Ok(Self::new(DatePattern::Custom(pattern), Utc.fix()))
    }

    /// Sets the time zone and returns the formatter.
    #[must_use]
    pub fn with_time_zone(self, time_zone: FixedOffset) -> Self {
        self.set_time_zone(time_zone);
        self
    }

    /// Changes the time zone, for every holder of this formatter.
    pub fn set_time_zone(&self, time_zone: FixedOffset) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.time_zone = time_zone;
    }

    /// The time zone dates are rendered in.
    pub fn time_zone(&self) -> FixedOffset {
        self.read().time_zone
    }

    /// The rendering pattern.
    pub fn pattern(&self) -> DatePattern {
        self.read().pattern.clone()
    }

    /// Renders `date` in the configured time zone.
    pub fn format(&self, date: &DateTime<Utc>) -> String {
        let state = self.read();
        let local = date.with_timezone(&state.time_zone);
        match &state.pattern {
            DatePattern::Rfc3339 { precision } => local.to_rfc3339_opts(*precision, true),
            DatePattern::Custom(pattern) => local.format(pattern).to_string(),
        }
    }

    /// Parses a date.
    ///
    /// Inputs without an offset, as produced by a custom pattern lacking `%z`,
    /// are read in the configured time zone; a date-only input is midnight.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::InvalidDate`] if the input matches neither the
    /// pattern nor RFC 3339.
    pub fn parse(&self, input: &str) -> Result<DateTime<Utc>, ApiClientError> {
        let state = self.read();
        let parsed = match &state.pattern {
            DatePattern::Rfc3339 { .. } => DateTime::parse_from_rfc3339(input),
            DatePattern::Custom(pattern) => DateTime::parse_from_str(input, pattern)
                .or_else(|error| parse_local(input, pattern, &state.time_zone).ok_or(error))
                .or_else(|_| DateTime::parse_from_rfc3339(input)),
        };

        parsed
            .map(|date| date.with_timezone(&Utc))
            .map_err(|error| ApiClientError::InvalidDate {
                input: input.to_string(),
                error,
            })
    }

    /// Checks if both handles share the same formatter.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    fn read(&self) -> RwLockReadGuard<'_, DateFormatState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::rfc3339()
    }
}

impl fmt::Debug for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        f.debug_struct("DateFormat")
            .field("pattern", &state.pattern)
            .field("time_zone", &state.time_zone)
            .finish()
    }
}

fn parse_local(
    input: &str,
    pattern: &str,
    time_zone: &FixedOffset,
) -> Option<DateTime<FixedOffset>> {
    let local = NaiveDateTime::parse_from_str(input, pattern)
        .or_else(|_| {
            NaiveDate::parse_from_str(input, pattern).map(|date| date.and_time(NaiveTime::MIN))
        })
        .ok()?;
    time_zone.from_local_datetime(&local).single()
}

/// Parses a fixed-offset time zone identifier.
///
/// Accepts `UTC`, `GMT`, `Z`, `GMT+10`, `UTC-03:30`, `+02:00` and `+0530`.
///
/// # Errors
///
/// Returns [`ApiClientError::InvalidTimeZone`] for anything else, including
/// offsets beyond ±18 hours.
pub fn parse_time_zone(input: &str) -> Result<FixedOffset, ApiClientError> {
    let trimmed = input.trim();
    let offset = match trimmed {
        "Z" | "UTC" | "GMT" => Some(Utc.fix()),
        _ => {
            let rest = trimmed
                .strip_prefix("GMT")
                .or_else(|| trimmed.strip_prefix("UTC"))
                .unwrap_or(trimmed);
            parse_offset(rest)
        }
    };

    offset.ok_or_else(|| ApiClientError::InvalidTimeZone {
        input: input.to_string(),
    })
}

fn parse_offset(text: &str) -> Option<FixedOffset> {
    let (sign, rest) = if let Some(rest) = text.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = text.strip_prefix('-') {
        (-1, rest)
    } else {
        return None;
    };

    let (hours, minutes) = match rest.split_once(':') {
        Some(parts) => parts,
        None if rest.len() == 4 => rest.split_at_checked(2)?,
        None => (rest, "0"),
    };
    let is_number = |part: &str| {
        !part.is_empty() && part.len() <= 2 && part.bytes().all(|byte| byte.is_ascii_digit())
    };
    if !is_number(hours) || !is_number(minutes) {
        return None;
    }

    let hours = hours.parse::<i32>().ok()?;
    let minutes = minutes.parse::<i32>().ok()?;
    if hours > 18 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hours(value: i32) -> FixedOffset {
        FixedOffset::east_opt(value * 3600).expect("valid offset")
    }

    #[test]
    fn test_default_is_rfc3339_utc_millis() {
        let format = DateFormat::default();

        assert_eq!(
            format.pattern(),
            DatePattern::Rfc3339 {
                precision: SecondsFormat::Millis
            }
        );
        assert_eq!(format.time_zone(), hours(0));
    }

    #[test]
    fn test_rfc3339_renders_in_configured_zone() {
        let format = DateFormat::rfc3339().with_time_zone(hours(2));
        let date = format
            .parse("2015-11-07T03:49:09.356Z")
            .expect("valid date");

        insta::assert_snapshot!(format.format(&date), @"2015-11-07T05:49:09.356+02:00");
    }

    #[test]
    fn test_rfc3339_rejects_garbage() {
        let result = DateFormat::rfc3339().parse("yesterday");

        let Err(error) = result else {
            panic!("expected an invalid date");
        };
        assert!(matches!(error, ApiClientError::InvalidDate { ref input, .. } if input == "yesterday"));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let result = DateFormat::with_pattern("%Y-%Q");

        assert!(matches!(
            result,
            Err(ApiClientError::InvalidDatePattern { .. })
        ));
    }

    #[test]
    fn test_custom_pattern_parses_its_own_output() {
        let format = DateFormat::with_pattern("%Y-%m-%d %H:%M:%S %z")
            .expect("valid pattern")
            .with_time_zone(hours(-3));

        let date = format
            .parse("2015-11-07 00:49:09 -0300")
            .expect("valid date");
        assert_eq!(format.format(&date), "2015-11-07 00:49:09 -0300");
    }

    #[test]
    fn test_pattern_without_offset_uses_time_zone() {
        let format = DateFormat::with_pattern("%d/%m/%Y %H:%M")
            .expect("valid pattern")
            .with_time_zone(hours(2));

        let date = format.parse("07/11/2015 05:49").expect("valid date");

        insta::assert_snapshot!(date.to_rfc3339(), @"2015-11-07T03:49:00+00:00");
        assert_eq!(format.format(&date), "07/11/2015 05:49");
    }

    #[test]
    fn test_clones_share_time_zone() {
        let format = DateFormat::rfc3339();
        let alias = format.clone();

        alias.set_time_zone(hours(11));

        assert!(format.ptr_eq(&alias));
        assert_eq!(format.time_zone(), hours(11));
    }

    #[test]
    fn test_parse_time_zone() {
        assert_eq!(parse_time_zone("UTC").ok(), Some(hours(0)));
        assert_eq!(parse_time_zone("GMT").ok(), Some(hours(0)));
        assert_eq!(parse_time_zone("GMT+10").ok(), Some(hours(10)));
        assert_eq!(parse_time_zone("GMT+11").ok(), Some(hours(11)));
        assert_eq!(parse_time_zone("+02:00").ok(), Some(hours(2)));
        assert_eq!(
            parse_time_zone("UTC-03:30").ok(),
            FixedOffset::west_opt(3 * 3600 + 30 * 60)
        );
        assert_eq!(
            parse_time_zone("+0530").ok(),
            FixedOffset::east_opt(5 * 3600 + 30 * 60)
        );
    }

    #[test]
    fn test_parse_time_zone_rejects_invalid_input() {
        for input in ["", "Europe/Paris", "GMT+", "GMT++5", "+25", "+10:75", "10"] {
            let result = parse_time_zone(input);
            assert!(
                matches!(result, Err(ApiClientError::InvalidTimeZone { .. })),
                "{input:?} should be rejected"
            );
        }
    }
}
