mod desktop;
mod event_log;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::{appsettings::AppSettings, scheduling::Clock};

pub use desktop::{CommandToneSink, DesktopNotificationSink};
pub use event_log::{FileEventLogger, format_event_line};

#[async_trait]
pub trait NotificationSink: Send + Sync + 'static {
    async fn show(&self, title: &str, message: &str, timeout_seconds: u32) -> anyhow::Result<()>;
}

#[async_trait]
pub trait ToneSink: Send + Sync + 'static {
    async fn beep(&self, frequency_hz: u32, duration_ms: u32) -> anyhow::Result<()>;
}

#[async_trait]
pub trait EventLogger: Send + Sync + 'static {
    async fn record(&self, timestamp: NaiveDateTime, message: &str) -> anyhow::Result<()>;
}

/// Receives every fired reminder. Never fails: delivery is best effort.
#[async_trait]
pub trait AlertDispatcher: Send + Sync + 'static {
    async fn dispatch(&self, message: &str);
}

#[derive(Debug, Clone)]
pub struct AlertSettings {
    pub title: String,
    pub timeout_seconds: u32,
    pub frequency_hz: u32,
    pub duration_ms: u32,
}

impl From<&AppSettings> for AlertSettings {
    fn from(settings: &AppSettings) -> Self {
        Self {
            title: settings.notification.title.clone(),
            timeout_seconds: settings.notification.timeout_seconds,
            frequency_hz: settings.tone.frequency_hz,
            duration_ms: settings.tone.duration_ms,
        }
    }
}

/// Notification, then tone, then log entry.
pub struct SystemAlertDispatcher {
    notification: Arc<dyn NotificationSink>,
    tone: Arc<dyn ToneSink>,
    event_log: Arc<dyn EventLogger>,
    clock: Arc<dyn Clock>,
    settings: AlertSettings,
}

impl SystemAlertDispatcher {
    pub fn new(
        notification: Arc<dyn NotificationSink>,
        tone: Arc<dyn ToneSink>,
        event_log: Arc<dyn EventLogger>,
        clock: Arc<dyn Clock>,
        settings: AlertSettings,
    ) -> Self {
        Self {
            notification,
            tone,
            event_log,
            clock,
            settings,
        }
    }
}

#[async_trait]
impl AlertDispatcher for SystemAlertDispatcher {
    async fn dispatch(&self, message: &str) {
        let settings = &self.settings;

        if let Err(error) = self
            .notification
            .show(&settings.title, message, settings.timeout_seconds)
            .await
        {
            log::warn!("Could not show notification. [error = {error:#}, message = {message}]");
        }

        if let Err(error) = self
            .tone
            .beep(settings.frequency_hz, settings.duration_ms)
            .await
        {
            log::warn!("Could not play alert tone. [error = {error:#}]");
        }

        let recorded = match self.clock.now() {
            Ok(timestamp) => self.event_log.record(timestamp, message).await,
            Err(error) => Err(error.context("Could not read clock for event timestamp")),
        };

        if let Err(error) = recorded {
            log::warn!("Could not record reminder event. [error = {error:#}, message = {message}]");
        }

        log::info!("Sent reminder: {message}");
    }
}
