use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use pushkind_campaign_sync::settings::Settings;
use pushkind_campaign_sync::sync;

/// Entry point for the campaign sync worker.
#[tokio::main]
async fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok();

    let settings_path = env::var("CAMPAIGN_SYNC_SETTINGS")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("settings.yaml"));

    let settings = match Settings::load(&settings_path) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    match sync::run(&settings).await {
        Ok(report) if report.has_failures() && settings.fail_on_error => std::process::exit(1),
        Ok(_) => {}
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}
