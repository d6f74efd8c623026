use std::collections::BTreeMap;

use super::model::{MERGE_HYBRID, MERGE_SORT, MeasurementRow, ResultsTable};

pub const X_AXIS_LABEL: &str = "Array size";
pub const Y_AXIS_LABEL: &str = "Execution time (ms)";

// ---------------------------------------------------------------------------
// Chart description, independent of any renderer
// ---------------------------------------------------------------------------

/// One line on a chart: `(size, time_ms)` points ordered by size.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series: Vec<Series>,
}

impl Chart {
    fn new(title: String, series: Vec<Series>) -> Self {
        log::debug!("built chart '{title}' with {} series", series.len());
        Chart {
            title,
            x_label: X_AXIS_LABEL,
            y_label: Y_AXIS_LABEL,
            series,
        }
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Filtering and projection
// ---------------------------------------------------------------------------

/// Rows with the given type and algorithm, in file order.
/// An absent combination yields an empty list.
pub fn rows_matching<'a>(
    table: &'a ResultsTable,
    array_type: &str,
    algorithm: &str,
) -> Vec<&'a MeasurementRow> {
    table
        .rows()
        .iter()
        .filter(|row| row.is(array_type, algorithm))
        .collect()
}

/// Project rows to `(size, time_ms)` points, stably sorted by size.
pub fn project<'a, I>(rows: I) -> Vec<[f64; 2]>
where
    I: IntoIterator<Item = &'a MeasurementRow>,
{
    let mut rows: Vec<&MeasurementRow> = rows.into_iter().collect();
    rows.sort_by_key(|row| row.size);
    rows.iter()
        .map(|row| [row.size as f64, row.time_ms])
        .collect()
}

// ---------------------------------------------------------------------------
// The three charts
// ---------------------------------------------------------------------------

/// Baseline merge sort, one series per array type.
pub fn all_types_chart(table: &ResultsTable) -> Chart {
    let series = table
        .array_types()
        .iter()
        .map(|t| Series {
            label: t.clone(),
            points: project(rows_matching(table, t, MERGE_SORT)),
        })
        .collect();

    Chart::new("Merge Sort: execution time by array type".to_string(), series)
}

/// Baseline merge sort for a single array type.
pub fn single_type_chart(table: &ResultsTable, array_type: &str) -> Chart {
    let rows = rows_matching(table, array_type, MERGE_SORT);
    if rows.is_empty() {
        log::warn!("no {MERGE_SORT} rows for type '{array_type}'");
    }
    let series = vec![Series {
        label: format!("{array_type} array"),
        points: project(rows),
    }];

    Chart::new(format!("{MERGE_SORT}: {array_type}"), series)
}

/// Hybrid merge + insertion sort for one array type, one series per
/// threshold in ascending order.
pub fn hybrid_thresholds_chart(table: &ResultsTable, array_type: &str) -> Chart {
    let mut by_threshold: BTreeMap<i64, Vec<&MeasurementRow>> = BTreeMap::new();
    for row in rows_matching(table, array_type, MERGE_HYBRID) {
        by_threshold.entry(row.threshold).or_default().push(row);
    }
    if by_threshold.is_empty() {
        log::warn!("no {MERGE_HYBRID} rows for type '{array_type}'");
    }

    let series = by_threshold
        .into_iter()
        .map(|(threshold, rows)| Series {
            label: format!("threshold = {threshold}"),
            points: project(rows),
        })
        .collect();

    Chart::new(format!("Merge + Insertion Sort ({array_type} array)"), series)
}
