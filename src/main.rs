//! API Showcase - browse public APIs from the terminal
//!
//! Every page fetch goes through one request cache, so repeated visits in the
//! interactive shell reuse earlier responses.

use std::error::Error;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tokio::io::BufReader;
use tracing::debug;

use apishowcase::api::ApiClient;
use apishowcase::cli::{Cli, Command};
use apishowcase::config::Config;
use apishowcase::logging;
use apishowcase::render::render_page_list;
use apishowcase::session::{PageCache, Session};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let request = cli.command.page_request();

    let config = Config::load(cli.config.as_deref())?;
    debug!(
        max_entries = ?config.cache_max_entries,
        timeout_secs = ?config.request_timeout_secs,
        "configuration loaded"
    );

    let cache = PageCache::new(config.cache_config());
    let client = ApiClient::new(config)?;
    let session = Session::new(client, cache);

    let mut stdout = io::stdout().lock();

    match (&cli.command, request) {
        (_, Some(request)) => {
            let entries = session.visit(&request, &mut stdout).await?;
            if entries.iter().any(|entry| entry.is_error()) {
                return Ok(ExitCode::FAILURE);
            }
        }
        (Command::Shell, None) => {
            let stdin = BufReader::new(tokio::io::stdin());
            session.run_shell(stdin, &mut stdout).await?;
        }
        (_, None) => {
            stdout.write_all(render_page_list().as_bytes())?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
