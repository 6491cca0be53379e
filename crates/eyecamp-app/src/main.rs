use eyre::Result;

use eyecamp_app::config::{self, AppConfig};
use eyecamp_app::logging;
use eyecamp_app::session::Session;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = if config::has_config() {
        config::load_config()?
    } else {
        let config = AppConfig::default();
        config::save_config(&config)?;
        config
    };
    logging::init(config.log_format)?;

    let session = Session::open(config)?;

    match std::env::args().nth(1).as_deref() {
        None | Some("status") => {
            let sync = session.sync();
            println!("authenticated: {}", sync.is_authenticated());
            for pending in sync.pending() {
                println!(
                    "pending: {} (queued {}, {} attempt(s))",
                    pending.camp_id, pending.queued_at, pending.attempts
                );
            }
        }
        Some("sync") => {
            let report = session.sync_pending().await;
            if report.skipped {
                println!("sync skipped: not authenticated or already running");
            }
            for camp_id in &report.delivered {
                println!("delivered: {camp_id}");
            }
            for (camp_id, error) in &report.failed {
                println!("failed: {camp_id}: {error}");
            }
        }
        Some(other) => {
            return Err(eyre::eyre!("unknown command '{other}' (expected status or sync)"));
        }
    }

    Ok(())
}
