use serde::{Deserialize, Serialize};

use crate::error::{FtcsError, Result};

/// Immutable description of one run.
///
/// Missing fields fall back to the reference configuration when a config is
/// deserialized, so a JSON file only needs the values it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of spatial sample points (Nx).
    pub cell_count: usize,
    /// Spatial step (dx).
    pub cell_size: f64,
    /// Number of time iterations (Nt).
    pub step_count: usize,
    /// Temporal step (dt).
    pub time_step: f64,
    /// Diffusion coefficient (D).
    pub diffusion: f64,
    pub interior_value: f64,
    pub left_boundary: f64,
    pub right_boundary: f64,
    /// A snapshot is emitted after step `t` when `t % snapshot_every == 0`.
    pub snapshot_every: usize,
    /// Abort with `FtcsError::NonFinite` instead of letting NaN/Inf propagate.
    pub check_finite: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            cell_count: 1000,
            cell_size: 1.0,
            step_count: 10_000,
            time_step: 1.0,
            diffusion: 0.25,
            interior_value: 0.5,
            left_boundary: 1.0,
            right_boundary: 0.0,
            snapshot_every: 1000,
            check_finite: false,
        }
    }
}

impl GridConfig {
    /// Simulated time after `steps` iterations.
    pub fn time_at(&self, steps: usize) -> f64 {
        steps as f64 * self.time_step
    }

    /// Structural checks. The signs of `time_step` and `diffusion` are left to
    /// `check_stability`, which rejects any k <= 0.
    pub fn validate(&self) -> Result<()> {
        if self.cell_count < 3 {
            return Err(FtcsError::TooFewCells {
                cell_count: self.cell_count,
            });
        }
        positive("cell_size", self.cell_size)?;
        if self.snapshot_every == 0 {
            return Err(FtcsError::InvalidParameter {
                name: "snapshot_every",
                value: 0.0,
            });
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FtcsError::InvalidParameter { name, value })
    }
}
