mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use app::ResultsViewerApp;
use eframe::egui;
use env_logger::Env;
use state::AppState;

/// Read when no path is given on the command line.
const DEFAULT_RESULTS_PATH: &str = "results.csv";

/// Logs at `info` by default so the load summary is visible; `RUST_LOG`
/// in `env` overrides it.
fn logger(env: Env<'_>) -> env_logger::Builder {
    env_logger::Builder::from_env(env.default_filter_or("info"))
}

fn main() -> anyhow::Result<()> {
    logger(Env::default()).init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_PATH));

    // A missing or malformed input is fatal before any window opens.
    let mut state = AppState::default();
    state
        .load_path(&path)
        .with_context(|| format!("loading {}", path.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Merge Sort Benchmarks",
        options,
        Box::new(|_cc| Ok(Box::new(ResultsViewerApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_defaults_to_info() {
        let env = Env::new().filter("MERGE_BENCH_VIEWER_UNSET_LOG");
        assert_eq!(logger(env).build().filter(), log::LevelFilter::Info);
    }

    #[test]
    fn test_logger_respects_filter_variable() {
        std::env::set_var("MERGE_BENCH_VIEWER_WARN_LOG", "warn");
        let env = Env::new().filter("MERGE_BENCH_VIEWER_WARN_LOG");
        assert_eq!(logger(env).build().filter(), log::LevelFilter::Warn);
    }
}
