//! Message transform: uppercase the body and stamp it with the local time.

use chrono::{DateTime, Local};

/// Timestamp format appended to every forwarded message (ISO-8601 local
/// date-time with microseconds). The timestamp is part of the outbound
/// payload, so the format is fixed here rather than left to the locale.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Separator between the uppercased body and the timestamp.
pub const SENT_AT_SEPARATOR: &str = " - Sent at ";

/// Transform a message for forwarding: uppercase it and append the current
/// local time. Two calls with the same input produce different payloads.
pub fn transform_message(message: &str) -> String {
    transform_message_at(message, Local::now())
}

fn transform_message_at(message: &str, at: DateTime<Local>) -> String {
    format!(
        "{}{}{}",
        message.to_uppercase(),
        SENT_AT_SEPARATOR,
        at.format(TIMESTAMP_FORMAT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn timestamp_of(payload: &str) -> NaiveDateTime {
        let (_, ts) = payload
            .rsplit_once(SENT_AT_SEPARATOR)
            .expect("payload contains separator");
        NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f").expect("parse timestamp")
    }

    #[test]
    fn uppercases_and_appends_timestamp() {
        let payload = transform_message("hello");
        assert!(payload.starts_with("HELLO - Sent at "), "payload: {}", payload);
        timestamp_of(&payload);
    }

    #[test]
    fn empty_message_is_valid() {
        let payload = transform_message("");
        assert!(payload.starts_with(" - Sent at "), "payload: {}", payload);
    }

    #[test]
    fn mixed_case_and_punctuation() {
        let payload = transform_message("Hello, World!");
        assert!(payload.starts_with("HELLO, WORLD! - Sent at "));
    }

    #[test]
    fn timestamps_are_non_decreasing() {
        let first = transform_message("a");
        let second = transform_message("a");
        assert!(timestamp_of(&second) >= timestamp_of(&first));
    }

    #[test]
    fn transform_is_not_idempotent() {
        // Same input, different payloads: the timestamp moves between calls.
        let first = transform_message("same input");
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = transform_message("same input");
        assert_ne!(first, second);
    }

    #[test]
    fn fixed_instant_renders_iso8601() {
        let at = NaiveDateTime::parse_from_str("2024-03-01T10:15:30.000123", "%Y-%m-%dT%H:%M:%S%.f")
            .expect("parse")
            .and_local_timezone(Local)
            .single()
            .expect("unambiguous local time");
        assert_eq!(
            transform_message_at("hi", at),
            "HI - Sent at 2024-03-01T10:15:30.000123"
        );
    }
}
