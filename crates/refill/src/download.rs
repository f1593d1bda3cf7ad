use anyhow::{Context, Result};
use refill_fetch::{FetchError, Fetcher, ReqwestClient, VerificationOutcome};
use tracing::debug;

use crate::app::App;
use crate::output::{self, Summary};

/// Run one download as described by the command line.
pub async fn run(app: &App) -> Result<()> {
    // Rejected before any network traffic.
    let reference = app.reference()?;

    let client = ReqwestClient::with_timeouts(app.timeouts())
        .context("failed to build the HTTP client")?;

    let mut options = app.fetch_options();
    if !app.json {
        options = options.on_progress(output::progress_printer());
    }
    debug!(?options, url = %app.url, "starting download");

    let fetcher = Fetcher::new(client, app.url.as_str()).with_options(options);
    let verified = match fetcher.download_verified(reference.as_ref()).await {
        Ok(verified) => verified,
        Err(FetchError::HashMismatch { expected, actual }) => {
            if !app.json {
                println!("{}", output::digest_line(&actual));
                println!("{}", output::outcome_line(VerificationOutcome::Mismatch));
            }
            return Err(FetchError::HashMismatch { expected, actual })
                .with_context(|| format!("payload from {} failed verification", app.url));
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to download {}", app.url));
        }
    };

    if app.json {
        let summary = Summary::new(&app.url, &verified);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let verification = &verified.verification;
        println!("{}", output::digest_line(&verification.digest.to_hex()));
        println!("{}", output::outcome_line(verification.outcome));
    }
    Ok(())
}
