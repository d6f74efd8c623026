/// Algorithm label of the baseline merge sort.
pub const MERGE_SORT: &str = "MergeSort";
/// Algorithm label of the merge + insertion sort hybrid.
pub const MERGE_HYBRID: &str = "MergeHybrid";

// ---------------------------------------------------------------------------
// MeasurementRow – one line of the results table
// ---------------------------------------------------------------------------

/// A single benchmark measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRow {
    /// Input distribution, e.g. `Random`, `Reverse`, `AlmostSorted`.
    pub array_type: String,
    /// Algorithm label, e.g. [`MERGE_SORT`] or [`MERGE_HYBRID`].
    pub algorithm: String,
    /// Input array length.
    pub size: u64,
    /// Measured duration in milliseconds.
    pub time_ms: f64,
    /// Insertion-sort cutover; only meaningful for [`MERGE_HYBRID`].
    pub threshold: i64,
}

impl MeasurementRow {
    pub fn is(&self, array_type: &str, algorithm: &str) -> bool {
        self.array_type == array_type && self.algorithm == algorithm
    }
}

// ---------------------------------------------------------------------------
// ResultsTable – the complete loaded file
// ---------------------------------------------------------------------------

/// All loaded rows plus the distinct categorical values, in order of first
/// appearance.
#[derive(Debug, Clone, Default)]
pub struct ResultsTable {
    rows: Vec<MeasurementRow>,
    array_types: Vec<String>,
    algorithms: Vec<String>,
}

impl ResultsTable {
    /// Build the categorical indices from the loaded rows.
    pub fn from_rows(rows: Vec<MeasurementRow>) -> Self {
        let mut array_types: Vec<String> = Vec::new();
        let mut algorithms: Vec<String> = Vec::new();

        for row in &rows {
            if !array_types.contains(&row.array_type) {
                array_types.push(row.array_type.clone());
            }
            if !algorithms.contains(&row.algorithm) {
                algorithms.push(row.algorithm.clone());
            }
        }

        ResultsTable {
            rows,
            array_types,
            algorithms,
        }
    }

    pub fn rows(&self) -> &[MeasurementRow] {
        &self.rows
    }

    /// Distinct `Type` values.
    pub fn array_types(&self) -> &[String] {
        &self.array_types
    }

    /// Distinct `Algorithm` values.
    pub fn algorithms(&self) -> &[String] {
        &self.algorithms
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
