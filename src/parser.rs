use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tracing::trace;

use crate::event::{unset_instant, Event};

/// Line that opens every event record in the feed.
pub const EVENT_DELIMITER: &str = "BEGIN:VEVENT";

const DATE_VALUE_MARKER: &str = ";VALUE=DATE:";
const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const DATE_FORMAT: &str = "%Y%m%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    DateTime,
    Date,
}

/// Splits a document into raw event records, dropping everything before the
/// first record.
///
/// Records run from one delimiter to the next, so the last one also carries
/// the calendar's closing lines.
pub fn split_records(document: &str) -> impl Iterator<Item = &str> {
    document.split(EVENT_DELIMITER).skip(1)
}

/// Parses every record of a raw document, in document order.
pub fn parse_document(document: &[u8]) -> Vec<Event> {
    let document = String::from_utf8_lossy(document);
    split_records(&document).map(parse_event).collect()
}

/// Parses one event record.
///
/// This never fails: lines without a colon and unknown fields are skipped,
/// and dates that cannot be read leave the field at [`unset_instant`].
pub fn parse_event(record: &str) -> Event {
    let mut start = None;
    let mut end = None;
    let mut event = Event::default();

    for line in record.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);

        let (field, body, kind) = if line.contains(DATE_VALUE_MARKER) {
            let (Some((field, _)), Some((_, body))) = (line.split_once(';'), line.rsplit_once(':'))
            else {
                continue;
            };
            (field, body, ValueKind::Date)
        } else {
            let Some((field, body)) = line.split_once(':') else {
                continue;
            };
            (field, body, ValueKind::DateTime)
        };

        match field {
            "DTSTART" => start = parse_instant(body, kind),
            "DTEND" => end = parse_instant(body, kind),
            "DESCRIPTION" => event.description = unescape_commas(body),
            "SUMMARY" => event.summary = unescape_commas(body),
            "LOCATION" => event.location = unescape_commas(body),
            _ => {}
        }
    }

    event.start = start.unwrap_or_else(unset_instant);
    event.end = end.unwrap_or_else(unset_instant);
    event
}

fn parse_instant(body: &str, kind: ValueKind) -> Option<DateTime<Utc>> {
    if !is_well_formed(body, kind) {
        trace!(value = body, ?kind, "ignoring malformed date");
        return None;
    }

    let parsed = match kind {
        ValueKind::DateTime => NaiveDateTime::parse_from_str(body, DATE_TIME_FORMAT),
        ValueKind::Date => NaiveDate::parse_from_str(body, DATE_FORMAT)
            .map(|date| date.and_time(NaiveTime::MIN)),
    };

    match parsed {
        Ok(naive) => Some(naive.and_utc()),
        Err(err) => {
            trace!(value = body, ?kind, %err, "ignoring unparsable date");
            None
        }
    }
}

/// Checks the exact layout chrono is lenient about: fixed width, digits only
/// (no padding or signs) and no leap second.
fn is_well_formed(body: &str, kind: ValueKind) -> bool {
    let bytes = body.as_bytes();
    let digits = |range: &[u8]| range.iter().all(u8::is_ascii_digit);

    match kind {
        ValueKind::Date => bytes.len() == 8 && digits(bytes),
        ValueKind::DateTime => {
            bytes.len() == 16
                && digits(&bytes[..8])
                && bytes[8] == b'T'
                && digits(&bytes[9..15])
                && bytes[15] == b'Z'
                && &bytes[13..15] < b"60".as_slice()
        }
    }
}

/// Replaces every `\,` with `,`. Other escape sequences are kept as they are.
pub fn unescape_commas(text: &str) -> String {
    text.replace("\\,", ",")
}
