// ============================================================
// Layer 4 — CSV Matrix Loader
// ============================================================
// Parses headerless numeric CSV into ndarray values.
//
//   0.91,0.05,0.33
//   0.12,0.87,0.40      →   Array2<f32> with shape [2, 3]
//
// Every row must have the same number of fields; the csv
// crate rejects ragged files on its own. Surrounding
// whitespace in a field is trimmed.

use anyhow::{bail, Context, Result};
use ndarray::{Array1, Array2};
use std::path::Path;

/// Load a `[rows, cols]` float matrix.
pub fn load_matrix(path: impl AsRef<Path>) -> Result<Array2<f32>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Cannot open '{}'", path.display()))?;

    let mut values = Vec::new();
    let mut cols   = 0usize;
    let mut rows   = 0usize;

    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Malformed CSV in '{}'", path.display()))?;
        cols = record.len();

        for (col, field) in record.iter().enumerate() {
            let value: f32 = field.parse().with_context(|| {
                format!(
                    "'{}' row {}, column {}: '{}' is not a number",
                    path.display(),
                    row + 1,
                    col + 1,
                    field
                )
            })?;
            values.push(value);
        }
        rows += 1;
    }

    tracing::debug!("Loaded {}x{} matrix from '{}'", rows, cols, path.display());
    Ok(Array2::from_shape_vec((rows, cols), values)?)
}

/// Load one class index per row from the first column.
pub fn load_labels(path: impl AsRef<Path>) -> Result<Array1<usize>> {
    let path   = path.as_ref();
    let matrix = load_matrix(path)?;
    if matrix.ncols() == 0 {
        bail!("'{}' has no label column", path.display());
    }

    let mut labels = Vec::with_capacity(matrix.nrows());
    for (row, &value) in matrix.column(0).iter().enumerate() {
        if value < 0.0 || value.fract() != 0.0 {
            bail!(
                "'{}' row {}: label {} is not a non-negative integer",
                path.display(),
                row + 1,
                value
            );
        }
        labels.push(value as usize);
    }
    Ok(Array1::from(labels))
}
