use std::sync::Arc;
use tracing::{info, warn};

use mclogs_uploader::app::App;
use mclogs_uploader::classify::{is_gzip_log, is_likely_log_url};
use mclogs_uploader::config::Config;
use mclogs_uploader::report::ConsoleSink;

use crate::cli::{CheckArgs, UploadArgs};

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Returns whether a share URL was produced
pub async fn upload(config: &Config, args: UploadArgs) -> Result<bool, AnyError> {
    let mut config = config.clone();
    if args.no_copy {
        config.clipboard.enabled = false;
    }

    let sink = Arc::new(ConsoleSink {
        show_progress: !args.quiet,
    });
    let app = App::from_config(&config, sink)?;

    if let Some(link) = args.link {
        if args.force {
            app.links.set(link);
        } else if !app.capture.observe(&link) {
            warn!(link = %link, "Link does not look like a log, pass --force to upload it anyway");
        }
    }

    let selection = match (args.text, args.file) {
        (Some(text), _) => Some(text),
        (None, Some(path)) => Some(tokio::fs::read_to_string(&path).await.map_err(|e| {
            format!("failed to read {}: {}", path.display(), e)
        })?),
        (None, None) => None,
    };

    let outcome = app.orchestrator.trigger(selection.as_deref()).await;
    info!(metrics = ?app.metrics.snapshot(), "Upload finished");

    Ok(outcome.is_some_and(|outcome| outcome.is_success()))
}

pub fn check(args: CheckArgs) {
    println!("url:         {}", args.url);
    println!("likely log:  {}", is_likely_log_url(&args.url));
    println!("gzip log:    {}", is_gzip_log(&args.url));
}
