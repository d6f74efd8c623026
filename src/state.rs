use std::fmt;
use std::path::{Path, PathBuf};

use crate::color::ColorMap;
use crate::data::loader::{self, LoadError};
use crate::data::model::ResultsTable;
use crate::data::select::{self, Chart};

// ---------------------------------------------------------------------------
// Chart plan
// ---------------------------------------------------------------------------

/// One chart the viewer can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartKind {
    /// MergeSort, one line per array type.
    AllTypes,
    /// MergeSort for one array type.
    SingleType(String),
    /// MergeHybrid for one array type, one line per threshold.
    HybridThresholds(String),
}

impl ChartKind {
    pub fn build(&self, table: &ResultsTable) -> Chart {
        match self {
            ChartKind::AllTypes => select::all_types_chart(table),
            ChartKind::SingleType(t) => select::single_type_chart(table, t),
            ChartKind::HybridThresholds(t) => select::hybrid_thresholds_chart(table, t),
        }
    }

    /// The array type this chart is restricted to, if any.
    pub fn array_type(&self) -> Option<&str> {
        match self {
            ChartKind::AllTypes => None,
            ChartKind::SingleType(t) | ChartKind::HybridThresholds(t) => Some(t.as_str()),
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::AllTypes => write!(f, "MergeSort – all types"),
            ChartKind::SingleType(t) => write!(f, "MergeSort – {t}"),
            ChartKind::HybridThresholds(t) => write!(f, "Hybrid thresholds – {t}"),
        }
    }
}

/// The charts shown after loading, in order.
pub fn default_plan() -> Vec<ChartKind> {
    vec![
        ChartKind::AllTypes,
        ChartKind::SingleType("Random".to_string()),
        ChartKind::HybridThresholds("Random".to_string()),
        ChartKind::HybridThresholds("Reverse".to_string()),
        ChartKind::HybridThresholds("AlmostSorted".to_string()),
    ]
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded results (None until a file is loaded).
    pub table: Option<ResultsTable>,

    /// Where `table` came from.
    pub source: Option<PathBuf>,

    /// Charts available in the side panel.
    pub plan: Vec<ChartKind>,

    /// Index into `plan` of the chart in the central panel.
    pub selected: usize,

    /// Chart and colours for `selected`, rebuilt when either changes.
    pub current: Option<(Chart, ColorMap)>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            source: None,
            plan: default_plan(),
            selected: 0,
            current: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded table and rebuild the selected chart.
    pub fn set_table(&mut self, table: ResultsTable, source: PathBuf) {
        log::info!(
            "Loaded {} rows from {}; types {:?}; algorithms {:?}",
            table.len(),
            source.display(),
            table.array_types(),
            table.algorithms()
        );
        if table.is_empty() {
            log::warn!("{} contains no measurements", source.display());
        }
        self.table = Some(table);
        self.source = Some(source);
        self.status_message = None;
        self.rebuild_chart();
    }

    /// Load a results file. On failure the current table is kept.
    pub fn load_path(&mut self, path: &Path) -> Result<(), LoadError> {
        match loader::load(path) {
            Ok(table) => {
                self.set_table(table, path.to_path_buf());
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
                Err(e)
            }
        }
    }

    /// Show the chart at `index` in the plan.
    pub fn select(&mut self, index: usize) {
        if index < self.plan.len() && index != self.selected {
            self.selected = index;
            self.rebuild_chart();
        }
    }

    /// Restrict the chart at `index` to another array type.
    /// No-op for the all-types chart.
    pub fn set_chart_type(&mut self, index: usize, array_type: &str) {
        let Some(kind) = self.plan.get_mut(index) else {
            return;
        };
        match kind {
            ChartKind::AllTypes => return,
            ChartKind::SingleType(t) | ChartKind::HybridThresholds(t) => {
                if *t == array_type {
                    return;
                }
                *t = array_type.to_string();
            }
        }
        if index == self.selected {
            self.rebuild_chart();
        }
    }

    fn rebuild_chart(&mut self) {
        self.current = match (&self.table, self.plan.get(self.selected)) {
            (Some(table), Some(kind)) => {
                let chart = kind.build(table);
                let colors = ColorMap::for_chart(&chart);
                Some((chart, colors))
            }
            _ => None,
        };
    }
}
