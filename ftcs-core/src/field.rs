use crate::error::{FtcsError, Result};

/// Spatial profile at one instant. Index 0 and the last index hold the
/// Dirichlet boundary values.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    values: Vec<f64>,
}

impl Field {
    /// Uniform interior with the two boundary cells overwritten.
    pub fn initialize(
        cell_count: usize,
        interior_value: f64,
        left_boundary: f64,
        right_boundary: f64,
    ) -> Result<Field> {
        if cell_count < 3 {
            return Err(FtcsError::TooFewCells { cell_count });
        }
        let mut values = vec![interior_value; cell_count];
        values[0] = left_boundary;
        values[cell_count - 1] = right_boundary;
        Ok(Field { values })
    }

    /// Arbitrary profile. The first and last entries become the boundaries.
    pub fn from_values(values: Vec<f64>) -> Result<Field> {
        if values.len() < 3 {
            return Err(FtcsError::TooFewCells {
                cell_count: values.len(),
            });
        }
        Ok(Field { values })
    }

    pub(crate) fn from_raw(values: Vec<f64>) -> Field {
        debug_assert!(values.len() >= 3);
        Field { values }
    }

    // ---- Accessors ----

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn left(&self) -> f64 {
        self.values[0]
    }

    pub fn right(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    pub fn interior(&self) -> &[f64] {
        &self.values[1..self.values.len() - 1]
    }

    /// First non-finite value, if any.
    pub fn first_non_finite(&self) -> Option<(usize, f64)> {
        first_non_finite(&self.values)
    }
}

pub(crate) fn first_non_finite(values: &[f64]) -> Option<(usize, f64)> {
    values.iter().copied().enumerate().find(|(_, v)| !v.is_finite())
}
