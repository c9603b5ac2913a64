use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use intake_core::config::{clinician_from_env_value, initial_section_from_env_value};
use intake_core::{CoreConfig, FormStore};

mod shell;

/// Main entry point for the interactive intake shell
///
/// Resolves configuration from the environment (optionally via a `.env` file), starts one
/// form session and hands it to the line shell on stdin/stdout. Logs go to stderr so they
/// do not interleave with the form output.
///
/// # Environment variables
///
/// * `INTAKE_INITIAL_SECTION` - Section shown first (default: `demographics`)
/// * `INTAKE_CLINICIAN` - Name recorded against the session (optional)
/// * `RUST_LOG` - Log filter (default directive: `clinivora=info`)
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinivora=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let initial_section =
        initial_section_from_env_value(std::env::var("INTAKE_INITIAL_SECTION").ok())?;
    let clinician = clinician_from_env_value(std::env::var("INTAKE_CLINICIAN").ok());
    let cfg = Arc::new(CoreConfig::new(initial_section, clinician));

    let mut store = FormStore::with_static_suggestions(cfg);
    let session = store.start()?;
    tracing::info!(
        session = %session.id,
        started_at = %session.started_at,
        "intake shell ready"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    shell::run(&mut store, stdin.lock(), stdout.lock())?;

    let record = store.end()?;
    tracing::info!(
        complaints = record.complaints.selected_complaints.len(),
        "intake shell closed"
    );
    Ok(())
}
