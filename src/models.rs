//! Wire formats of the SendGrid and Airtable APIs.

use serde::{Deserialize, Serialize};

use crate::domain::{Record, SendDetail, SendStats, SendSummary};

#[derive(Debug, Deserialize)]
pub struct SingleSendList {
    #[serde(default)]
    pub result: Vec<SingleSendSummary>,
}

#[derive(Debug, Deserialize)]
pub struct SingleSendSummary {
    pub id: String,
    #[serde(default)]
    pub send_at: Option<String>,
}

impl From<SingleSendSummary> for SendSummary {
    fn from(summary: SingleSendSummary) -> Self {
        SendSummary {
            id: summary.id,
            send_at: summary.send_at,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EmailConfig {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub html_content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SingleSendDetail {
    #[serde(default)]
    pub send_at: Option<String>,
    #[serde(default)]
    pub email_config: EmailConfig,
}

impl From<SingleSendDetail> for SendDetail {
    fn from(detail: SingleSendDetail) -> Self {
        SendDetail {
            subject: detail.email_config.subject.unwrap_or_default(),
            html_content: detail.email_config.html_content.unwrap_or_default(),
            send_at: detail.send_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SingleSendStatsResponse {
    #[serde(default)]
    pub results: Vec<SingleSendStatsEntry>,
}

impl SingleSendStatsResponse {
    /// Counters of the first result, or empty stats when none were reported.
    pub fn into_stats(self) -> SendStats {
        self.results
            .into_iter()
            .next()
            .map(|entry| entry.stats.into())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct SingleSendStatsEntry {
    #[serde(default)]
    pub stats: StatsCounters,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatsCounters {
    pub requests: Option<u64>,
    pub delivered: Option<u64>,
    pub unique_opens: Option<u64>,
    pub unique_clicks: Option<u64>,
    pub bounces: Option<u64>,
    pub spam_reports: Option<u64>,
    pub unsubscribes: Option<u64>,
}

impl From<StatsCounters> for SendStats {
    fn from(counters: StatsCounters) -> Self {
        SendStats {
            requests: counters.requests,
            delivered: counters.delivered,
            unique_opens: counters.unique_opens,
            unique_clicks: counters.unique_clicks,
            bounces: counters.bounces,
            spam_reports: counters.spam_reports,
            unsubscribes: counters.unsubscribes,
        }
    }
}

/// Body of an Airtable record insert.
#[derive(Debug, Serialize)]
pub struct NewTableRecord<'a> {
    pub fields: &'a Record,
}

/// Body Airtable returns for a created record.
#[derive(Debug, Deserialize)]
pub struct CreatedTableRecord {
    #[serde(default)]
    pub id: Option<String>,
}
