use std::{io::Write, process::Stdio, time::Duration};

use anyhow::Context;
use async_trait::async_trait;
use tokio::{process::Command, time::timeout};

use super::{NotificationSink, ToneSink};

/// Shows desktop notifications through the platform's command line tool.
pub struct DesktopNotificationSink {
    command_timeout: Duration,
}

impl DesktopNotificationSink {
    pub fn new(command_timeout: Duration) -> Self {
        Self { command_timeout }
    }
}

#[async_trait]
impl NotificationSink for DesktopNotificationSink {
    async fn show(&self, title: &str, message: &str, timeout_seconds: u32) -> anyhow::Result<()> {
        let cmd = notification_command(title, message, timeout_seconds);
        run_with_timeout(cmd, self.command_timeout).await
    }
}

/// Plays the alert tone through the platform's command line tool, falling
/// back to the terminal bell when the tool is not installed.
pub struct CommandToneSink {
    command_timeout: Duration,
}

impl CommandToneSink {
    pub fn new(command_timeout: Duration) -> Self {
        Self { command_timeout }
    }
}

#[async_trait]
impl ToneSink for CommandToneSink {
    async fn beep(&self, frequency_hz: u32, duration_ms: u32) -> anyhow::Result<()> {
        let cmd = tone_command(frequency_hz, duration_ms);
        match run_with_timeout(cmd, self.command_timeout).await {
            Err(error) if is_not_found(&error) => {
                log::debug!("Tone command unavailable, ringing terminal bell instead.");
                ring_terminal_bell()
            }
            result => result,
        }
    }
}

async fn run_with_timeout(mut cmd: Command, limit: Duration) -> anyhow::Result<()> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let program = cmd.as_std().get_program().to_string_lossy().into_owned();
    let output = timeout(limit, cmd.output())
        .await
        .with_context(|| format!("{program} did not finish within {limit:?}"))?
        .with_context(|| format!("Could not run {program}"))?;

    anyhow::ensure!(
        output.status.success(),
        "{program} exited with {}: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr).trim()
    );

    Ok(())
}

fn is_not_found(error: &anyhow::Error) -> bool {
    error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<std::io::Error>())
        .any(|io_error| io_error.kind() == std::io::ErrorKind::NotFound)
}

fn ring_terminal_bell() -> anyhow::Result<()> {
    let mut stderr = std::io::stderr().lock();
    stderr.write_all(b"\x07")?;
    stderr.flush()?;
    Ok(())
}

#[cfg(target_os = "macos")]
fn notification_command(title: &str, message: &str, _timeout_seconds: u32) -> Command {
    let script = format!(
        "display notification {} with title {}",
        applescript_string(message),
        applescript_string(title)
    );
    let mut cmd = Command::new("osascript");
    cmd.args(["-e", script.as_str()]);
    cmd
}

#[cfg(target_os = "windows")]
fn notification_command(title: &str, message: &str, timeout_seconds: u32) -> Command {
    let mut cmd = Command::new("msg");
    cmd.args([
        "*".to_owned(),
        format!("/TIME:{timeout_seconds}"),
        format!("{title}: {message}"),
    ]);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn notification_command(title: &str, message: &str, timeout_seconds: u32) -> Command {
    let mut cmd = Command::new("notify-send");
    cmd.arg("--expire-time")
        .arg((u64::from(timeout_seconds) * 1000).to_string())
        .arg("--")
        .arg(title)
        .arg(message);
    cmd
}

#[cfg(target_os = "macos")]
fn tone_command(_frequency_hz: u32, _duration_ms: u32) -> Command {
    let mut cmd = Command::new("osascript");
    cmd.args(["-e", "beep"]);
    cmd
}

#[cfg(target_os = "windows")]
fn tone_command(frequency_hz: u32, duration_ms: u32) -> Command {
    let mut cmd = Command::new("powershell");
    cmd.args([
        "-NoProfile".to_owned(),
        "-Command".to_owned(),
        format!("[console]::beep({frequency_hz},{duration_ms})"),
    ]);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn tone_command(frequency_hz: u32, duration_ms: u32) -> Command {
    let mut cmd = Command::new("beep");
    cmd.arg("-f")
        .arg(frequency_hz.to_string())
        .arg("-l")
        .arg(duration_ms.to_string());
    cmd
}

#[cfg(any(target_os = "macos", test))]
fn applescript_string(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
