use async_trait::async_trait;

use crate::domain::{Record, SendDetail, SendStats, SendSummary};
use crate::errors::Error;

use super::transform::transform;

/// Read access to campaign sends and their statistics.
#[async_trait]
pub trait SendReader: Send + Sync {
    /// Lists every send known to the provider, in upstream order.
    async fn list_sends(&self) -> Result<Vec<SendSummary>, Error>;

    /// Fetches subject, content and schedule of a send.
    async fn get_send_detail(&self, id: &str) -> Result<SendDetail, Error>;

    /// Fetches engagement counters of a send. Empty when none exist yet.
    async fn get_send_stats(&self, id: &str) -> Result<SendStats, Error>;
}

/// Write access to the destination table.
#[async_trait]
pub trait RecordWriter: Send + Sync {
    /// Inserts `record` as a new row and returns the created row id, if any.
    async fn insert_record(&self, record: &Record) -> Result<Option<String>, Error>;
}

/// Outcome of a sync run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub selected: usize,
    pub uploaded: usize,
    pub failed: usize,
}

impl SyncReport {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Orders sends most recent first and keeps the first `limit`.
///
/// Unscheduled sends sort as the earliest; ties keep their upstream order.
pub fn select_recent(mut sends: Vec<SendSummary>, limit: usize) -> Vec<SendSummary> {
    sends.sort_by(|a, b| b.sort_key().cmp(a.sort_key()));
    sends.truncate(limit);
    sends
}

/// Fetches all sends and returns the `limit` most recent.
pub async fn list_recent<R>(reader: &R, limit: usize) -> Result<Vec<SendSummary>, Error>
where
    R: SendReader + ?Sized,
{
    let sends = reader.list_sends().await?;
    Ok(select_recent(sends, limit))
}

/// Fetches, transforms and uploads a single send.
pub async fn sync_send<R, W>(id: &str, reader: &R, writer: &W) -> Result<Option<String>, Error>
where
    R: SendReader + ?Sized,
    W: RecordWriter + ?Sized,
{
    let detail = reader.get_send_detail(id).await?;
    let stats = reader.get_send_stats(id).await?;
    let record = transform(&detail, &stats)?;
    writer.insert_record(&record).await
}

/// Syncs the `limit` most recent sends, one at a time.
///
/// A failure for one send is logged and does not stop the others.
pub async fn sync_recent<R, W>(reader: &R, writer: &W, limit: usize) -> SyncReport
where
    R: SendReader + ?Sized,
    W: RecordWriter + ?Sized,
{
    let sends = match list_recent(reader, limit).await {
        Ok(sends) => sends,
        Err(e) => {
            log::error!("Failed to fetch single sends: {e}");
            Vec::new()
        }
    };

    let mut report = SyncReport {
        selected: sends.len(),
        ..SyncReport::default()
    };

    log::info!("Syncing {} single sends", sends.len());

    for send in sends {
        match sync_send(&send.id, reader, writer).await {
            Ok(row_id) => {
                report.uploaded += 1;
                log::info!(
                    "Successfully uploaded data for single send {} (row {})",
                    send.id,
                    row_id.as_deref().unwrap_or("unknown")
                );
            }
            Err(e) => {
                report.failed += 1;
                log::error!("Failed to sync single send {}: {e}", send.id);
            }
        }
    }

    log::info!(
        "Finished sync: {} uploaded, {} failed",
        report.uploaded,
        report.failed
    );

    report
}
