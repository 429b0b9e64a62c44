use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{Record, SendDetail, SendStats};
use crate::errors::Error;

/// Captures the quoted value of every `href="..."` attribute.
static HREF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"href="(.*?)""#).unwrap());

/// Captures a non-empty `utm_content` value up to the next `&`.
static UTM_CONTENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"utm_content=([^&]+)").unwrap());

const SEND_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const SEND_DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns every `href` value in order of appearance, verbatim.
pub fn extract_links(html: &str) -> Vec<String> {
    HREF_RE
        .captures_iter(html)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Returns the `utm_content` value of the first link carrying one.
pub fn extract_deliverable_id(links: &[String]) -> String {
    links
        .iter()
        .find_map(|link| UTM_CONTENT_RE.captures(link))
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

/// Reformats `YYYY-MM-DDTHH:MM:SSZ` as `YYYY-MM-DD`; empty when unscheduled.
pub fn normalize_send_date(send_at: Option<&str>) -> Result<String, Error> {
    match send_at {
        None | Some("") => Ok(String::new()),
        Some(value) => NaiveDateTime::parse_from_str(value, SEND_AT_FORMAT)
            .map(|parsed| parsed.format(SEND_DATE_FORMAT).to_string())
            .map_err(|source| Error::Format {
                value: value.to_string(),
                source,
            }),
    }
}

/// Builds the table row for a send from its content and counters.
pub fn transform(detail: &SendDetail, stats: &SendStats) -> Result<Record, Error> {
    let date_of_send = normalize_send_date(detail.send_at.as_deref())?;
    let links = extract_links(&detail.html_content);
    let deliverable_id = extract_deliverable_id(&links);

    Ok(Record {
        date_of_send,
        subject: detail.subject.clone(),
        body: links.join(" "),
        deliverable_id,
        emails_triggered: stats.requests.into(),
        delivered: stats.delivered.into(),
        unique_opens: stats.unique_opens.into(),
        unique_clicks: stats.unique_clicks.into(),
        bounces: stats.bounces.into(),
        spam_reports: stats.spam_reports.into(),
        unsubscribes: stats.unsubscribes.into(),
    })
}
