mod args;
mod commands;

use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::args::Cli;
use crate::commands::execute_command;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    if let Err(e) = execute_command(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    tracing::debug!(?filter, "logging initialized");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Commands;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render() {
        let cli = Cli::parse_from([
            "valuto",
            "-dd",
            "render",
            "lesson.json",
            "-p",
            "/content",
            "--pretty",
        ]);
        assert_eq!(cli.debug, 2);
        match cli.command {
            Commands::Render { pointer, pretty, output, .. } => {
                assert_eq!(pointer.as_deref(), Some("/content"));
                assert!(pretty);
                assert!(output.is_none());
            }
            other => panic!("Expected render, got {:?}", other),
        }
    }

    #[test]
    fn test_check_requires_files() {
        assert!(Cli::try_parse_from(["valuto", "check"]).is_err());
    }
}
