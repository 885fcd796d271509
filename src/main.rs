// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, load settings, build the API
//   client and hand everything to `automove::run`.
// - Every failure ends in exit status 1.

use anyhow::Result;
use automove::api::ApiClient;
use automove::cli::Cli;
use automove::config::Settings;
use automove::logging::init_logger;
use automove::{run, Invocation, Outcome};
use clap::error::ErrorKind;
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    init_logger(cli.verbose);

    match try_main(cli) {
        Ok(outcome) => {
            tracing::debug!("Finished: {:?}", outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: Cli) -> Result<Outcome> {
    let settings = Settings::load(cli.config.as_deref())?;
    let invocation = Invocation::resolve(cli.file, cli.target_folder, &settings)?;
    let api = ApiClient::from_settings(&settings)?;
    tracing::debug!("Using model {}", api.model());

    let outcome = run(&invocation, &settings, &api)?;
    if let Outcome::Moved(path) = &outcome {
        tracing::info!("Moved to {}", path.display());
    }
    Ok(outcome)
}
