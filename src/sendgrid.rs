//! SendGrid Marketing Campaigns client.
//!
//! Implements [`SendReader`] over the single sends API using a bearer token.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::domain::{SendDetail, SendStats, SendSummary};
use crate::errors::Error;
use crate::models::{SingleSendDetail, SingleSendList, SingleSendStatsResponse};
use crate::settings::Settings;
use crate::sync::service::SendReader;

#[derive(Clone)]
pub struct SendgridClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SendgridClient {
    pub fn new(settings: &Settings) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            base_url: settings.sendgrid_base_url.trim_end_matches('/').to_string(),
            api_key: settings.sendgrid_api_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v3/marketing/{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, Error> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        decode_response(status, body)
    }
}

/// Decodes a successful JSON body, or reports status and raw body.
fn decode_response<T: DeserializeOwned>(status: StatusCode, body: String) -> Result<T, Error> {
    if !status.is_success() {
        return Err(Error::fetch(status, body));
    }
    serde_json::from_str(&body).map_err(|e| {
        log::warn!("Cannot decode SendGrid response: {e}");
        Error::fetch(status, body)
    })
}

#[async_trait]
impl SendReader for SendgridClient {
    async fn list_sends(&self) -> Result<Vec<SendSummary>, Error> {
        let list: SingleSendList = self.get_json(self.url("singlesends")).await?;
        Ok(list.result.into_iter().map(Into::into).collect())
    }

    async fn get_send_detail(&self, id: &str) -> Result<SendDetail, Error> {
        let detail: SingleSendDetail = self
            .get_json(self.url(&format!("singlesends/{id}")))
            .await?;
        Ok(detail.into())
    }

    async fn get_send_stats(&self, id: &str) -> Result<SendStats, Error> {
        let stats: SingleSendStatsResponse = self
            .get_json(self.url(&format!("stats/singlesends/{id}")))
            .await?;
        Ok(stats.into_stats())
    }
}
