//! Application entry point for the branching-tree viewer.
//!
//! This binary sets up logging and eframe/egui, delegating all
//! interactive logic and rendering to [`Viewer`] from the `viewer`
//! module.

mod viewer;

use tracing_subscriber::EnvFilter;
use viewer::Viewer;

/// Starts the native eframe application.
///
/// Log verbosity follows the `RUST_LOG` environment variable. The main
/// window is titled `"Branching Tree"`; all UI state and rendering are
/// handled by [`Viewer`].
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Branching Tree",
        options,
        Box::new(|_cc| {
            // Construct the root app state for the viewer.
            Ok(Box::new(Viewer::new()))
        }),
    )
}
