//! Explicit Forward-Time Centered-Space integration of the 1-D diffusion
//! equation with fixed Dirichlet boundaries.

mod config;
mod driver;
mod error;
mod field;
mod sink;
mod stability;
mod stencil;

pub use config::GridConfig;
pub use driver::{RunSummary, Simulation};
pub use error::{FtcsError, Result};
pub use field::Field;
pub use sink::{NullSink, RecordingSink, Snapshot, SnapshotSink};
pub use stability::{Stability, check_stability};
pub use stencil::{apply_stencil, step};

/// Double-buffered field that advances in place.
///
/// `field` is the read buffer and is always fully populated. `next` is only
/// written by the stencil and becomes readable through the swap at the end of
/// a step.
pub struct FieldState {
    k: f64,
    steps: usize,
    field: Vec<f64>,
    next: Vec<f64>,
}

impl FieldState {
    /// Initial field of an already checked simulation.
    pub fn new(sim: &Simulation) -> Result<FieldState> {
        let field = sim.initial_field()?;
        Ok(FieldState::from_field(field, sim.stability().k))
    }

    /// Starts from an existing profile. `k` is trusted as already checked.
    pub fn from_field(field: Field, k: f64) -> FieldState {
        let field = field.into_values();
        let next = vec![0.0; field.len()];
        FieldState {
            k,
            steps: 0,
            field,
            next,
        }
    }

    // ---- Accessors ----

    pub fn k(&self) -> f64 {
        self.k
    }

    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    pub fn len(&self) -> usize {
        self.field.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field.is_empty()
    }

    pub fn field(&self) -> &[f64] {
        &self.field
    }

    pub fn clone_field(&self) -> Field {
        Field::from_raw(self.field.clone())
    }

    // ---- Core ----

    pub fn step(&mut self) {
        apply_stencil(&self.field, &mut self.next, self.k);
        self.swap_buffers();
        self.steps += 1;
    }

    pub fn step_many(&mut self, count: usize) {
        for _ in 0..count {
            self.step();
        }
    }

    fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.field, &mut self.next);
    }
}
