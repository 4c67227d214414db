pub mod config;
pub mod error;
pub mod event;
pub mod parser;
pub mod schedule;
pub mod source;

pub use error::{Error, Result};
pub use event::{unset_instant, Event};
pub use schedule::{reference_instant, select_window, sort_chronologically, Window};
pub use source::Source;

/// Parses a raw calendar document into events sorted by start time.
pub fn events_from_document(document: &[u8]) -> Vec<Event> {
    let mut events = parser::parse_document(document);
    sort_chronologically(&mut events);
    events
}

/// Fetches the schedule from `source` and returns its events in
/// chronological order.
pub fn events_from_source(source: &Source) -> Result<Vec<Event>> {
    let document = source.fetch()?;
    let events = events_from_document(&document);
    tracing::info!(count = events.len(), "parsed schedule");
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn events_from_document_works() {
        let document = b"BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nDTSTART:20240602T230500Z\r\nSUMMARY:Guardians at Twins\r\nLOCATION:Target Field\\, Minneapolis\r\nEND:VEVENT\r\nBEGIN:VEVENT\r\nDTSTART:20240601T171000Z\r\nSUMMARY:Twins at Guardians\r\nLOCATION:Progressive Field\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";

        assert_eq!(
            events_from_document(document),
            vec![
                Event {
                    start: Utc.with_ymd_and_hms(2024, 6, 1, 17, 10, 0).unwrap(),
                    summary: String::from("Twins at Guardians"),
                    location: String::from("Progressive Field"),
                    ..Event::default()
                },
                Event {
                    start: Utc.with_ymd_and_hms(2024, 6, 2, 23, 5, 0).unwrap(),
                    summary: String::from("Guardians at Twins"),
                    location: String::from("Target Field, Minneapolis"),
                    ..Event::default()
                },
            ]
        );
    }

    #[test]
    fn events_from_empty_document() {
        assert!(events_from_document(b"").is_empty());
        assert!(events_from_document(b"BEGIN:VCALENDAR\nEND:VCALENDAR\n").is_empty());
    }
}
