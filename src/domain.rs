//! Domain types flowing through the sync pipeline.

use serde::{Serialize, Serializer};

/// Placeholder written for counters the provider did not report.
pub const NOT_AVAILABLE: &str = "N/A";

/// Timestamp used to order sends that were never scheduled.
pub const UNSCHEDULED_SEND_AT: &str = "0000-00-00T00:00:00Z";

/// A single send as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSummary {
    pub id: String,
    pub send_at: Option<String>,
}

impl SendSummary {
    /// Key used to order sends, most recent last.
    pub fn sort_key(&self) -> &str {
        self.send_at
            .as_deref()
            .filter(|send_at| !send_at.is_empty())
            .unwrap_or(UNSCHEDULED_SEND_AT)
    }
}

/// Content and schedule of a single send.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendDetail {
    pub subject: String,
    pub html_content: String,
    pub send_at: Option<String>,
}

/// Engagement counters of a single send. `None` means not reported yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SendStats {
    pub requests: Option<u64>,
    pub delivered: Option<u64>,
    pub unique_opens: Option<u64>,
    pub unique_clicks: Option<u64>,
    pub bounces: Option<u64>,
    pub spam_reports: Option<u64>,
    pub unsubscribes: Option<u64>,
}

/// A counter as stored in the table: a number or [`NOT_AVAILABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatValue {
    Count(u64),
    NotAvailable,
}

impl From<Option<u64>> for StatValue {
    fn from(value: Option<u64>) -> Self {
        value.map_or(StatValue::NotAvailable, StatValue::Count)
    }
}

impl Serialize for StatValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StatValue::Count(count) => serializer.serialize_u64(*count),
            StatValue::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

/// One table row describing a send. Field names match the table columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    #[serde(rename = "Date of Send")]
    pub date_of_send: String,
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "Body")]
    pub body: String,
    #[serde(rename = "Deliverable ID")]
    pub deliverable_id: String,
    #[serde(rename = "Emails Triggered")]
    pub emails_triggered: StatValue,
    #[serde(rename = "Delivered")]
    pub delivered: StatValue,
    #[serde(rename = "Unique Opens")]
    pub unique_opens: StatValue,
    #[serde(rename = "Unique Clicks")]
    pub unique_clicks: StatValue,
    #[serde(rename = "Bounces")]
    pub bounces: StatValue,
    #[serde(rename = "Spam Reports")]
    pub spam_reports: StatValue,
    #[serde(rename = "Unsubscribes")]
    pub unsubscribes: StatValue,
}
