mod generator;
mod icon;
mod mask;

use frame_filter_common::config::Config;
use tracing::{error, info};

fn main() {
    let config = match Config::from_args() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.parse().unwrap_or_default()),
        )
        .init();

    info!(
        source = config.favicon.source,
        output_dir = config.favicon.output_dir,
        sizes = ?config.favicon.sizes,
        "creating rounded favicons"
    );

    match generator::generate(&config.favicon) {
        Ok(report) => {
            info!(
                files = report.variants.len() + 1,
                icon = %report.icon.display(),
                "favicon creation completed"
            );
            info!("next: point index.html at the new favicon files");
            info!(
                "next: replace favicon.ico with {} if needed",
                config.favicon.ico_name
            );
        }
        Err(e) => {
            error!(error = %e, "favicon creation failed");
            std::process::exit(1);
        }
    }
}
