#![warn(clippy::perf)]
#![warn(clippy::unwrap_used)]

use std::{io::Write, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use guessword::{cli::Cli, cli::Command, error::report_unexpected, logging, AppData, Config};

use tracing::{debug, info, warn};

#[allow(dead_code)]
mod built_info {
    // The file has been placed there by the build script.
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

fn build() -> String {
    if built_info::DEBUG {
        let commit = built_info::GIT_COMMIT_HASH_SHORT.unwrap_or("no git");

        format!(
            "development build {} (`{}`)",
            built_info::PKG_VERSION,
            commit
        )
    } else {
        format!("release {}", built_info::PKG_VERSION)
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            logging::init_tracing(None);
            eprintln!("{}", report_unexpected(&err));
            return ExitCode::FAILURE;
        }
    };

    logging::init_tracing(config.logs.filter());
    info!("{}", build());

    let data = AppData::open(&config);

    match execute(cli.command, &data) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<guessword::Error>() {
            Some(err) => {
                warn!(kind = ?err.kind(), status = err.kind().status_code(), %err, "request rejected");
                eprintln!("{}", err.public_message());
                ExitCode::FAILURE
            }
            None => {
                eprintln!("{}", report_unexpected(err.as_ref()));
                ExitCode::from(2)
            }
        },
    }
}

fn execute(command: Command, data: &AppData) -> anyhow::Result<()> {
    debug!(?command, "running command");

    let output = command.run(data)?;

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &output).context("output could not be written")?;
    writeln!(stdout).context("output could not be written")?;

    Ok(())
}
