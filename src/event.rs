use std::fmt;

use chrono::prelude::*;

/// Format used when rendering an event's start time.
pub const RENDER_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The value of a date field that was missing or could not be parsed.
///
/// It is `0001-01-01T00:00:00Z`, earlier than any date a schedule holds,
/// so events without a usable start sort first.
pub fn unset_instant() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
        .and_utc()
}

/// One game (or any other occurrence) read from the calendar feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub summary: String,
    pub location: String,
    pub description: String,
}

impl Default for Event {
    fn default() -> Self {
        Event {
            start: unset_instant(),
            end: unset_instant(),
            summary: String::new(),
            location: String::new(),
            description: String::new(),
        }
    }
}

impl Event {
    pub fn has_start(&self) -> bool {
        self.start != unset_instant()
    }

    pub fn has_end(&self) -> bool {
        self.end != unset_instant()
    }

    /// Renders the event with its start time shown in `zone`.
    pub fn render_in<Z: TimeZone>(&self, zone: &Z) -> String
    where
        Z::Offset: fmt::Display,
    {
        format!(
            "{}: {} @ {}",
            self.start.with_timezone(zone).format(RENDER_FORMAT),
            self.summary,
            self.location
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_in(&Local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone, Utc};

    fn game() -> Event {
        Event {
            start: Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap(),
            summary: String::from("Game A"),
            location: String::from("Park"),
            ..Event::default()
        }
    }

    #[test]
    fn renders_in_utc() {
        assert_eq!(game().render_in(&Utc), "2024-06-01 18:00:00: Game A @ Park");
    }

    #[test]
    fn renders_in_shifted_zone() {
        let helsinki_summer = FixedOffset::east_opt(3 * 3600).unwrap();
        assert_eq!(
            game().render_in(&helsinki_summer),
            "2024-06-01 21:00:00: Game A @ Park"
        );

        let new_york = chrono_tz::America::New_York;
        assert_eq!(
            game().render_in(&new_york),
            "2024-06-01 14:00:00: Game A @ Park"
        );
    }

    #[test]
    fn display_uses_local_time() {
        let event = game();
        let rendered = event.to_string();
        let expected_prefix = event
            .start
            .with_timezone(&Local)
            .format(RENDER_FORMAT)
            .to_string();

        assert!(rendered.starts_with(&expected_prefix));
        assert!(rendered.ends_with(": Game A @ Park"));
    }

    #[test]
    fn default_event_has_unset_instants() {
        let event = Event::default();
        assert!(!event.has_start());
        assert!(!event.has_end());
        assert_eq!(event.start, Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap());
        assert!(game().has_start());
    }
}
