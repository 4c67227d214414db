use std::ops::Range;

use chrono::{DateTime, NaiveTime, Utc};

use crate::event::Event;

/// Events whose index distance from the anchor is below this are shown.
pub const WINDOW_RADIUS: usize = 8;

/// Sorts events by start time. Events starting at the same instant keep
/// their relative order.
pub fn sort_chronologically(events: &mut [Event]) {
    events.sort_by_key(|event| event.start);
}

/// Truncates `now` to midnight UTC of the same day.
pub fn reference_instant(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// The events around the next game.
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    events: &'a [Event],
    anchor: usize,
    anchor_found: bool,
}

/// Selects the window around the first event starting after `reference`.
///
/// `events` must already be in chronological order. When every event starts
/// at or before `reference` the anchor falls back to the first event; check
/// [`Window::anchor_found`] to tell the two cases apart.
pub fn select_window(events: &[Event], reference: DateTime<Utc>) -> Window<'_> {
    let found = events.iter().position(|event| event.start > reference);

    Window {
        events,
        anchor: found.unwrap_or(0),
        anchor_found: found.is_some(),
    }
}

impl<'a> Window<'a> {
    pub fn anchor(&self) -> usize {
        self.anchor
    }

    pub fn anchor_found(&self) -> bool {
        self.anchor_found
    }

    /// Indices of the selected events, at most `WINDOW_RADIUS - 1` on either
    /// side of the anchor.
    pub fn indices(&self) -> Range<usize> {
        if self.events.is_empty() {
            return 0..0;
        }

        let first = self.anchor.saturating_sub(WINDOW_RADIUS - 1);
        let last = (self.anchor + WINDOW_RADIUS).min(self.events.len());
        first..last
    }

    pub fn events(&self) -> &'a [Event] {
        let events = self.events;
        &events[self.indices()]
    }
}
