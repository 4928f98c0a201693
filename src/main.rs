use std::process::ExitCode;

use dokku_arangodb::cli::{self, Invocation, PluginCommand};
use dokku_arangodb::commands::{self, Dispatcher};
use dokku_arangodb::config::{self, Settings};
use dokku_arangodb::engine::DockerCli;
use dokku_arangodb::orchestrator::DokkuCli;

fn main() -> ExitCode {
    init_tracing();

    match cli::classify(std::env::args()) {
        Invocation::Command(command) => run_command(&command),
        Invocation::NotImplemented => ExitCode::from(config::not_implemented_exit()),
        Invocation::UsageError(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run_command(command: &PluginCommand) -> ExitCode {
    // `help` and `test` read no configuration, so a corrupt plugin config
    // file cannot take them down.
    if let Some(output) = commands::standalone_output(command) {
        println!("{output}");
        return ExitCode::SUCCESS;
    }

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("configuration error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    let engine = DockerCli::new();
    let store = DokkuCli::new();
    let dispatcher = Dispatcher::new(&settings, &engine, &store);

    match dispatcher.run(command) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics go to stderr so the protocol output on stdout stays clean.
/// `RUST_LOG` widens the filter when troubleshooting a host.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
