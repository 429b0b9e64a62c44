//! Helpers for integration tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use pushkind_campaign_sync::domain::{Record, SendDetail, SendStats, SendSummary};
use pushkind_campaign_sync::errors::Error;
use pushkind_campaign_sync::settings::Settings;
use pushkind_campaign_sync::sync::service::{RecordWriter, SendReader};
use reqwest::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// In-memory send provider.
#[derive(Default)]
pub struct FakeReader {
    pub sends: Vec<SendSummary>,
    pub details: HashMap<String, SendDetail>,
    pub stats: HashMap<String, SendStats>,
    pub fail_listing: bool,
    pub requested: Mutex<Vec<String>>,
}

impl FakeReader {
    #[allow(dead_code)]
    pub fn with_send(mut self, id: &str, detail: SendDetail, stats: Option<SendStats>) -> Self {
        self.sends.push(SendSummary {
            id: id.to_string(),
            send_at: detail.send_at.clone(),
        });
        self.details.insert(id.to_string(), detail);
        if let Some(stats) = stats {
            self.stats.insert(id.to_string(), stats);
        }
        self
    }
}

#[async_trait]
impl SendReader for FakeReader {
    async fn list_sends(&self) -> Result<Vec<SendSummary>, Error> {
        if self.fail_listing {
            return Err(Error::fetch(StatusCode::INTERNAL_SERVER_ERROR, "boom"));
        }
        Ok(self.sends.clone())
    }

    async fn get_send_detail(&self, id: &str) -> Result<SendDetail, Error> {
        self.requested.lock().unwrap().push(id.to_string());
        self.details
            .get(id)
            .cloned()
            .ok_or_else(|| Error::fetch(StatusCode::NOT_FOUND, "missing detail"))
    }

    async fn get_send_stats(&self, id: &str) -> Result<SendStats, Error> {
        if id.starts_with("nostats") {
            return Err(Error::fetch(StatusCode::BAD_GATEWAY, "stats unavailable"));
        }
        Ok(self.stats.get(id).copied().unwrap_or_default())
    }
}

/// In-memory table that records inserted rows.
#[derive(Default)]
pub struct FakeWriter {
    pub rejected_subjects: HashSet<String>,
    pub records: Mutex<Vec<Record>>,
}

#[async_trait]
impl RecordWriter for FakeWriter {
    async fn insert_record(&self, record: &Record) -> Result<Option<String>, Error> {
        if self.rejected_subjects.contains(&record.subject) {
            return Err(Error::upload(StatusCode::UNPROCESSABLE_ENTITY, "rejected"));
        }
        let mut records = self.records.lock().unwrap();
        records.push(record.clone());
        Ok(Some(format!("rec{}", records.len())))
    }
}

#[allow(dead_code)]
pub fn detail(subject: &str, html: &str, send_at: Option<&str>) -> SendDetail {
    SendDetail {
        subject: subject.to_string(),
        html_content: html.to_string(),
        send_at: send_at.map(Into::into),
    }
}

/// Settings pointing both clients at `base_url`.
#[allow(dead_code)]
pub fn local_settings(base_url: &str) -> Settings {
    Settings {
        sendgrid_api_key: "sg-key".into(),
        airtable_api_key: "at-key".into(),
        airtable_base_id: "app1".into(),
        airtable_table_name: "Email Campaigns".into(),
        send_limit: 4,
        request_timeout_secs: 5,
        sendgrid_base_url: base_url.to_string(),
        airtable_base_url: base_url.to_string(),
        fail_on_error: false,
    }
}

/// Serves one canned `(status, body)` response per connection, in order.
///
/// The handle resolves to the raw requests that were received.
#[allow(dead_code)]
pub async fn spawn_server(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let handle = tokio::spawn(async move {
        let mut requests = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().await.unwrap();
            requests.push(read_request(&mut stream).await);
            let response = format!(
                "HTTP/1.1 {status} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
        }
        requests
    });
    (base_url, handle)
}

#[allow(dead_code)]
async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let length = text[..end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Splits a raw request into its head (lowercased) and body.
#[allow(dead_code)]
pub fn split_request(raw: &str) -> (String, &str) {
    let (head, body) = raw.split_once("\r\n\r\n").unwrap_or((raw, ""));
    (head.to_lowercase(), body)
}
