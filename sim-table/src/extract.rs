use std::collections::HashMap;

use common::{FeatureError, FeatureMatrix, Result, TargetVector};
use nalgebra::{Dim, Matrix};

use crate::Table;

/// The output of [`extract`]: row-aligned feature matrix and target vector,
/// plus a map from feature name to column index.
#[derive(Debug, Clone)]
pub struct Extracted {
    /// n x d feature matrix with the NaN-target rows removed
    pub features: FeatureMatrix,

    /// Length-n target vector, row-aligned with `features`
    pub targets: TargetVector,

    /// Feature name to column index, in the order the features were requested
    pub names: HashMap<String, usize>,
}

/// Pull a feature matrix and target vector out of a labeled table.
///
/// Columns are selected in the order of `feature_names`. Rows whose target is
/// NaN (halted integrations surface as NaN outputs) are removed from features
/// and targets together. Only the target column is screened; feature columns
/// pass through untouched, NaNs included.
///
/// # Arguments:
/// table: The simulation output, one row per run
/// feature_names: Non-empty, ordered column names forming the feature matrix
/// target_name: The column to learn, forming the target vector
pub fn extract(table: &Table, feature_names: &[&str], target_name: &str) -> Result<Extracted> {
    if feature_names.is_empty() {
        return Err(FeatureError::EmptyFeatureList);
    }

    let target = table.column(target_name)?;
    let keep: Vec<usize> = target
        .iter()
        .enumerate()
        .filter(|(_, y)| !y.is_nan())
        .map(|(i, _)| i)
        .collect();
    let dropped = target.len() - keep.len();
    if dropped > 0 {
        debug!("dropping {} of {} rows with NaN target", dropped, target.len());
    }

    let mut features: FeatureMatrix = Matrix::from_element_generic(
        Dim::from_usize(keep.len()),
        Dim::from_usize(feature_names.len()),
        0.0,
    );
    let mut names = HashMap::with_capacity(feature_names.len());
    for (j, name) in feature_names.iter().enumerate() {
        let column = table.column(name)?;
        for (i, &row) in keep.iter().enumerate() {
            features[(i, j)] = column[row];
        }
        names.insert((*name).to_owned(), j);
    }

    let targets: TargetVector = Matrix::from_iterator_generic(
        Dim::from_usize(keep.len()),
        Dim::from_usize(1),
        keep.iter().map(|&row| target[row]),
    );

    Ok(Extracted {
        features,
        targets,
        names,
    })
}
