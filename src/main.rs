use std::process::ExitCode;
use std::sync::Arc;

use error_stack::ResultExt;
use patrol_map_feed::{
    adapters::{
        clock::JstClock,
        config::{
            app_config::{AppConfig, DEFAULT_CONFIG_PATH},
            output_config::OutputConfig,
        },
        file_store::FileDocumentStore,
        schema::load_validator,
        sheets::spreadsheet_manager::SpreadsheetManager,
    },
    application::{
        feed_builder::{record_failure, BuildError, BuildOutcome, FeedBuilder, SheetTarget},
        output_writer::OutputWriter,
    },
    cli::{self, Command, Invocation, USAGE},
    ports::{clock::Clock, schema_validator::NoopSchemaValidator},
};
use tracing::{error, info, instrument, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let invocation = match cli::parse_args(&args) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    if invocation.command == Command::Help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    setup_tracing(invocation.verbose);
    setup_panic_hook();

    info!("Starting patrol-map-feed");
    let outcome = run(invocation).await;

    match &outcome {
        BuildOutcome::Written { report } => {
            info!("✅ wrote data document ({} items)", report.items)
        }
        BuildOutcome::Unchanged { report } => {
            info!("✅ data document unchanged ({} items)", report.items)
        }
        BuildOutcome::Checked { report } => {
            info!("✅ check passed ({} items, nothing written)", report.items)
        }
        BuildOutcome::Rejected { message } => warn!("⚠️ data document not updated: {message}"),
        BuildOutcome::Failed { message } => error!("❌ build failed: {message}"),
    }

    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[instrument]
async fn run(invocation: Invocation) -> BuildOutcome {
    let clock: Arc<dyn Clock> = Arc::new(JstClock::new());
    let persist_errors = invocation.command == Command::Build;

    let config_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = match AppConfig::load(&config_path) {
        Ok(config) => config,
        Err(report) => {
            // Without a config the default output locations are the best guess
            let writer = OutputWriter::new(
                Arc::new(FileDocumentStore::from_config(&OutputConfig::default())),
                Arc::new(NoopSchemaValidator),
            );
            let error = report.change_context(BuildError::FatalInput);
            return record_failure(&writer, clock.as_ref(), error, persist_errors);
        }
    };
    info!(?config, "configuration loaded");

    let store = Arc::new(FileDocumentStore::from_config(&config.output));

    let validator = match load_validator(&config.output.schema_path) {
        Ok(validator) => validator,
        Err(report) => {
            let writer = OutputWriter::new(store, Arc::new(NoopSchemaValidator));
            let error = report.change_context(BuildError::Validation);
            return record_failure(&writer, clock.as_ref(), error, persist_errors);
        }
    };
    let writer = OutputWriter::new(store, validator);

    let source = match SpreadsheetManager::new(&config.sheets)
        .await
        .change_context(BuildError::FatalInput)
    {
        Ok(source) => source,
        Err(error) => return record_failure(&writer, clock.as_ref(), error, persist_errors),
    };

    let builder = FeedBuilder::new(
        Arc::new(source),
        clock,
        writer,
        SheetTarget {
            sheet_id: config.sheets.spreadsheet_id.to_string(),
            range: config.sheets.range.to_string(),
        },
    );

    match invocation.command {
        Command::Check => builder.check().await,
        _ => builder.run().await,
    }
}

fn setup_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    Registry::default()
        .with(
            tracing_subscriber::filter::Targets::new()
                .with_target("patrol_map_feed", level)
                .with_default(tracing::Level::WARN),
        )
        .with(stderr_layer)
        .init();
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}
