pub mod service;
pub mod transform;

use crate::airtable::AirtableClient;
use crate::errors::Error;
use crate::sendgrid::SendgridClient;
use crate::settings::Settings;

use service::{SyncReport, sync_recent};

/// Entry point for the campaign sync worker.
pub async fn run(settings: &Settings) -> Result<SyncReport, Error> {
    let sendgrid = SendgridClient::new(settings)?;
    let airtable = AirtableClient::new(settings)?;

    log::info!(
        "Starting campaign sync of the {} most recent single sends",
        settings.send_limit
    );

    Ok(sync_recent(&sendgrid, &airtable, settings.send_limit).await)
}
