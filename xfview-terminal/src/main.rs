/// XFView Terminal - interactive transform and camera visualizer
///
/// Usage: xfview-terminal [GEOMETRY] [PROJECTION]
/// Controls:
///   - Up/Down (Tab/Shift-Tab): Select a field
///   - Left/Right: Nudge the selected field
///   - Digits, '-', '+', '.': Type a value, Enter to apply, Esc to cancel
///   - P: Toggle perspective/orthographic
///   - G: Next geometry
///   - U: Refresh the snapshot matrix
///   - Q/ESC: Quit
///
/// Logging goes to stderr and is off unless RUST_LOG is set.

use std::env;
use xfview_terminal::{params_from_args, TerminalApp, USAGE};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|arg| arg == "-h" || arg == "--help") {
        println!("{USAGE}");
        return Ok(());
    }

    let params = params_from_args(args)?;
    log::info!(
        "starting with geometry {} and {} camera",
        params.geometry,
        params.camera.mode()
    );

    let mut app = TerminalApp::new(params)?;
    app.run()?;

    let snapshot = app.scene().snapshot_text();
    log::info!("last snapshot: {snapshot}");
    println!("Snapshot: {snapshot}");
    Ok(())
}
