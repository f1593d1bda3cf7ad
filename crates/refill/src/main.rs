//! Download a resource from a server that truncates its responses, backfill
//! the missing bytes with range requests and check the SHA-256 of the result.

use std::process::ExitCode;

use clap::Parser;

mod app;
mod download;
mod exit;
mod output;

use crate::app::App;
use crate::exit::Exit;

#[tokio::main]
async fn main() -> ExitCode {
    let app = App::parse();
    output::init_tracing(app.verbose);

    match download::run(&app).await {
        Ok(()) => Exit::Success.into(),
        Err(err) => {
            eprintln!("error: {err:#}");
            exit::classify(&err).into()
        }
    }
}
