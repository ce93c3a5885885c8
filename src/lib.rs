//! Snip: interactive screen snipper.
//!
//! This is the app shell that wires together:
//! - Display capture (capture/)
//! - Selection state machine (selection.rs) and UI controller (ui/)
//! - Software overlay renderer (render/)
//! - PNG export to `$HOME/Pictures` (export/)
//! - The `minifb` window host (host.rs)

pub mod canvas;
pub mod capture;
pub mod export;
pub mod geometry;
pub mod host;
pub mod render;
pub mod selection;
pub mod ui;

use capture::XcapSource;
use ui::App;

const GIT_COMMIT: &str = env!("SNIP_GIT_COMMIT");
const BUILD_DATE: &str = env!("SNIP_BUILD_DATE");

/// Title suffix identifying the build, e.g. `" | v0.1.0 (3f2a9c1, 2024-03-05)"`.
pub fn build_suffix() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match (GIT_COMMIT.is_empty(), BUILD_DATE.is_empty()) {
        (false, false) => format!(" | v{} ({}, {})", version, GIT_COMMIT, BUILD_DATE),
        (false, true) => format!(" | v{} ({})", version, GIT_COMMIT),
        _ => format!(" | v{}", version),
    }
}

/// Entry point, called by the binary.
///
/// Returns `Ok` on every normal exit, including a machine with no
/// displays (after printing a diagnostic).
pub fn run() -> Result<(), host::HostError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Snip starting up{}", build_suffix());

    let output_dir = export::pictures_dir();
    let app = match App::new(Box::new(XcapSource), output_dir) {
        Ok(app) => app,
        Err(e) => {
            println!("{}.", e);
            return Ok(());
        }
    };

    log::info!("Saving snips to {}", app.output_dir().display());
    host::run(app)
}
