use anyhow::Context;
use routine_radar::{appsettings::AppSettings, build_scheduler};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let settings = AppSettings::new().context("Could not load appsettings")?;
    let scheduler = build_scheduler(&settings)?;

    let cancellation_token = CancellationToken::new();
    let ctrl_c_token = cancellation_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Received Ctrl-C");
            ctrl_c_token.cancel();
        }
    });

    scheduler.run(cancellation_token).await;

    Ok(())
}
