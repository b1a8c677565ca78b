use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::{fs::OpenOptions, io::AsyncWriteExt, sync::Mutex};

use super::EventLogger;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

pub fn format_event_line(timestamp: NaiveDateTime, message: &str) -> String {
    format!(
        "{} - Sent reminder: {}\n",
        timestamp.format(TIMESTAMP_FORMAT),
        message
    )
}

/// Appends one line per dispatched reminder.
pub struct FileEventLogger {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileEventLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl EventLogger for FileEventLogger {
    async fn record(&self, timestamp: NaiveDateTime, message: &str) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("Could not open event log {}", self.path.display()))?;

        file.write_all(format_event_line(timestamp, message).as_bytes())
            .await
            .with_context(|| format!("Could not write event log {}", self.path.display()))?;
        file.flush().await?;

        Ok(())
    }
}
