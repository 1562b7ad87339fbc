//! Pure formatting helpers shared by every panel

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Shown for a missing or unparseable start timestamp
pub const UNKNOWN: &str = "unknown";

/// Shown before the first successful update
pub const NEVER: &str = "—";

/// Relative age of the last update: `just now`, `Ns ago`, `Nm ago`.
pub fn time_ago(last: Option<OffsetDateTime>, now: OffsetDateTime) -> String {
    let Some(last) = last else {
        return NEVER.to_string();
    };
    let secs = (now - last).whole_seconds();
    if secs < 5 {
        "just now".to_string()
    } else if secs < 60 {
        format!("{}s ago", secs)
    } else {
        format!("{}m ago", secs / 60)
    }
}

/// Time since `timestamp` as `Hh Mm`, or `Dd Hh` past 24 hours.
pub fn format_uptime(timestamp: Option<&str>, now: OffsetDateTime) -> String {
    let Some(start) = timestamp.and_then(parse_timestamp) else {
        return UNKNOWN.to_string();
    };
    let elapsed = (now - start).whole_minutes().max(0);
    let hours = elapsed / 60;
    let minutes = elapsed % 60;
    if hours > 24 {
        format!("{}d {}h", hours / 24, hours % 24)
    } else {
        format!("{}h {}m", hours, minutes)
    }
}

/// Parse a service start timestamp.
///
/// Accepts RFC 3339, `@<unix seconds>`, and the service manager's
/// `[Weekday] YYYY-MM-DD HH:MM:SS [Zone]` where the zone is `UTC`, `GMT`, `Z` or a
/// numeric offset. A missing zone means UTC; a named zone other than those is
/// rejected rather than guessed.
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(parsed);
    }
    if let Some(epoch) = raw.strip_prefix('@') {
        let secs: i64 = epoch.parse().ok()?;
        return OffsetDateTime::from_unix_timestamp(secs).ok();
    }

    let mut parts = raw.split_whitespace().peekable();
    if parts
        .peek()
        .is_some_and(|first| first.chars().all(|c| c.is_ascii_alphabetic()))
    {
        parts.next();
    }
    let date = parts.next()?;
    let clock = parts.next()?;
    let offset = match parts.next() {
        None => UtcOffset::UTC,
        Some(zone) => parse_zone(zone)?,
    };
    if parts.next().is_some() {
        return None;
    }

    let local = PrimitiveDateTime::parse(
        &format!("{} {}", date, clock),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    )
    .ok()?;
    Some(local.assume_offset(offset))
}

fn parse_zone(zone: &str) -> Option<UtcOffset> {
    match zone {
        "UTC" | "GMT" | "Z" => Some(UtcOffset::UTC),
        _ => UtcOffset::parse(zone, format_description!("[offset_hour sign:mandatory][offset_minute]"))
            .or_else(|_| {
                UtcOffset::parse(
                    zone,
                    format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
                )
            })
            .ok(),
    }
}
