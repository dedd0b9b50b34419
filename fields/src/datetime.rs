use chrono::DateTime;
use chrono::FixedOffset;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;

/// The service's own offset timestamp shape, e.g. `2025-10-30T15:04:05.000+0000`.
/// Not RFC 3339: the offset carries no colon.
const VENDOR_OFFSET: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Bare time-of-day shapes parse against this anchor date, matching the
/// zero-value date the upstream SDKs produce for time-only layouts.
const ANCHOR_YEAR: i32 = 0;

/// Best-effort parse of a date/time string.
///
/// Layouts are tried in a fixed order: date-only (`YYYY-MM-DD`, midnight
/// UTC), the vendor offset shape, RFC 3339 (with or without fractional
/// seconds, `Z` or numeric offset), then bare `HH:MM:SS` and `HH:MM`.
/// Returns `None` for empty input or when nothing matches; an unparseable
/// string is an expected outcome, not an error.
pub fn coerce(input: &str) -> Option<DateTime<FixedOffset>> {
    if input.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return at_utc(date.and_time(NaiveTime::MIN));
    }
    if let Ok(parsed) = DateTime::parse_from_str(input, VENDOR_OFFSET) {
        return Some(parsed);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed);
    }
    for layout in ["%H:%M:%S", "%H:%M"] {
        if let Ok(time) = NaiveTime::parse_from_str(input, layout) {
            let anchor = NaiveDate::from_ymd_opt(ANCHOR_YEAR, 1, 1)?;
            return at_utc(anchor.and_time(time));
        }
    }
    None
}

/// RFC 3339 re-rendering of any string [`coerce`] accepts; `None` when the
/// input is not a recognized date/time shape.
pub fn canonical(input: &str) -> Option<String> {
    coerce(input).map(|parsed| parsed.to_rfc3339())
}

fn at_utc(naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    let utc = FixedOffset::east_opt(0)?;
    Some(DateTime::from_naive_utc_and_offset(naive, utc))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::Timelike;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn date_only_is_midnight_utc() {
        let parsed = coerce("2025-10-30").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-10-30T00:00:00+00:00");
    }

    #[test]
    fn vendor_offset_shape() {
        let parsed = coerce("2025-10-30T15:04:05.123+0200").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-10-30T15:04:05.123+02:00");
    }

    #[test]
    fn rfc3339_variants() {
        assert_eq!(
            coerce("2025-10-30T15:04:05Z").unwrap().to_rfc3339(),
            "2025-10-30T15:04:05+00:00"
        );
        assert_eq!(
            coerce("2025-10-30T15:04:05.987654321-05:00")
                .unwrap()
                .nanosecond(),
            987_654_321
        );
        assert!(coerce("2025-10-30T15:04:05+01:00").is_some());
    }

    #[test]
    fn time_only_uses_anchor_date() {
        let parsed = coerce("15:04:05").unwrap();
        assert_eq!(parsed.hour(), 15);
        assert_eq!(parsed.to_rfc3339(), "0000-01-01T15:04:05+00:00");
        assert_eq!(coerce("15:04").unwrap().minute(), 4);
    }

    #[test]
    fn rejects_non_dates() {
        assert_eq!(coerce(""), None);
        assert_eq!(coerce("not a date"), None);
        assert_eq!(coerce("2025-13-45"), None);
        assert_eq!(coerce("Sprint 1"), None);
    }

    #[test]
    fn canonical_rewrites_recognized_shapes() {
        assert_eq!(
            canonical("2025-10-30").as_deref(),
            Some("2025-10-30T00:00:00+00:00")
        );
        assert_eq!(canonical("release summary"), None);
    }
}
