//! Assembles the example service graph and reports what was loaded.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=keystone_component=trace assemble [service-name]
//! ```

use example::{App, Settings};
use keystone_component::Loader;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_span_events(FmtSpan::CLOSE),
        )
        .try_init()
        .ok();

    let mut loader = Loader::new();
    if let Some(service) = std::env::args().nth(1) {
        loader = loader.provide(Settings {
            service,
            ..Settings::default()
        });
    }

    let mut app = App::default();
    match loader.load(&mut app) {
        Ok(report) => {
            let hooks: Vec<&str> = report.hooks.iter().map(|id| id.short_name()).collect();
            tracing::info!(
                hooks = ?hooks,
                nodes = report.nodes,
                singletons = report.singletons,
                elapsed = ?report.duration,
                "application assembled"
            );
            if let Some(journal) = app.journal.read() {
                for entry in &journal.entries {
                    tracing::info!(entry = %entry, "journal");
                }
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to assemble application");
            std::process::exit(1);
        }
    }
}
