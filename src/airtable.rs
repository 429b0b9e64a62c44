//! Airtable client inserting one record per synced send.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use std::time::Duration;

use crate::domain::Record;
use crate::errors::Error;
use crate::models::{CreatedTableRecord, NewTableRecord};
use crate::settings::Settings;
use crate::sync::service::RecordWriter;

#[derive(Clone)]
pub struct AirtableClient {
    http: reqwest::Client,
    table_url: Url,
    api_key: String,
}

impl AirtableClient {
    pub fn new(settings: &Settings) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            table_url: table_url(
                &settings.airtable_base_url,
                &settings.airtable_base_id,
                &settings.airtable_table_name,
            )?,
            api_key: settings.airtable_api_key.clone(),
        })
    }
}

/// `{base}/v0/{base_id}/{table}` with each segment percent-encoded.
fn table_url(base_url: &str, base_id: &str, table_name: &str) -> Result<Url, Error> {
    let mut url = Url::parse(base_url)
        .map_err(|e| Error::Config(format!("Invalid Airtable URL {base_url}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| Error::Config(format!("Airtable URL cannot be a base: {base_url}")))?
        .pop_if_empty()
        .extend(["v0", base_id, table_name]);
    Ok(url)
}

fn is_accepted(status: StatusCode) -> bool {
    matches!(status, StatusCode::OK | StatusCode::CREATED)
}

fn decode_created(status: StatusCode, body: String) -> Result<Option<String>, Error> {
    if !is_accepted(status) {
        return Err(Error::upload(status, body));
    }
    match serde_json::from_str::<CreatedTableRecord>(&body) {
        Ok(created) => Ok(created.id),
        Err(_) => Err(Error::upload(status, body)),
    }
}

#[async_trait]
impl RecordWriter for AirtableClient {
    async fn insert_record(&self, record: &Record) -> Result<Option<String>, Error> {
        let response = self
            .http
            .post(self.table_url.clone())
            .bearer_auth(&self.api_key)
            .json(&NewTableRecord { fields: record })
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        decode_created(status, body)
    }
}
