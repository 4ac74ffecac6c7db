//! Rendered chat entries and relative-time labelling.

use chrono::{DateTime, Utc};

/// Author shown for responses that carry no record data.
pub const AUTHOR_PLACEHOLDER: &str = "...";

/// Which side of the conversation an entry belongs to, decided by
/// comparing the response's session id with the local one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorSide {
    Incoming,
    Outgoing,
}

/// Whether the server reported the underlying operation as successful.
/// Failed entries stay in the feed, only styled differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Delivered,
    Failed,
}

/// A single reconciled entry in the visible message feed.
///
/// Created once per delivered response and never mutated afterwards;
/// the age label is fixed at reconciliation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntry {
    pub author: String,
    pub text: String,
    pub age_label: String,
    pub side: AuthorSide,
    pub status: DeliveryStatus,
}

impl RenderedEntry {
    pub fn is_outgoing(&self) -> bool {
        self.side == AuthorSide::Outgoing
    }

    pub fn is_failed(&self) -> bool {
        self.status == DeliveryStatus::Failed
    }
}

/// Renders a human-relative offset between two instants, in the style
/// chat feeds use ("a few seconds ago", "4 minutes ago").
pub fn relative_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    const MINUTE: i64 = 60;
    const HOUR: i64 = 3_600;
    const DAY: i64 = 86_400;
    const MONTH: i64 = 30 * DAY;
    const YEAR: i64 = 365 * DAY;

    let seconds = (now - then).num_seconds().max(0);

    match seconds {
        0..=44 => "a few seconds ago".to_owned(),
        45..=89 => "a minute ago".to_owned(),
        s if s < 45 * MINUTE => format!("{} minutes ago", div_round(s, MINUTE)),
        s if s < 90 * MINUTE => "an hour ago".to_owned(),
        s if s < 22 * HOUR => format!("{} hours ago", div_round(s, HOUR)),
        s if s < 36 * HOUR => "a day ago".to_owned(),
        s if s < 26 * DAY => format!("{} days ago", div_round(s, DAY)),
        s if s < 46 * DAY => "a month ago".to_owned(),
        s if s < 11 * MONTH => format!("{} months ago", div_round(s, MONTH)),
        s if s < 18 * MONTH => "a year ago".to_owned(),
        s => format!("{} years ago", div_round(s, YEAR)),
    }
}

fn div_round(value: i64, unit: i64) -> i64 {
    (value + unit / 2) / unit
}
