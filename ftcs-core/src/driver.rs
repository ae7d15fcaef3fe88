use crate::config::GridConfig;
use crate::error::{FtcsError, Result};
use crate::field::{Field, first_non_finite};
use crate::sink::SnapshotSink;
use crate::stability::{Stability, check_stability};
use crate::FieldState;

/// A configuration that has passed validation and the stability check.
///
/// There is no other way to obtain a `Simulation`, so every run starts from a
/// checked configuration.
#[derive(Clone, Debug)]
pub struct Simulation {
    config: GridConfig,
    stability: Stability,
}

/// What a completed run leaves behind.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub snapshots: usize,
    pub final_field: Field,
}

impl Simulation {
    pub fn new(config: GridConfig) -> Result<Simulation> {
        config.validate()?;
        let stability = check_stability(config.cell_size, config.time_step, config.diffusion);
        if !stability.stable {
            return Err(FtcsError::Unstable { k: stability.k });
        }
        Ok(Simulation { config, stability })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn stability(&self) -> Stability {
        self.stability
    }

    /// The configured initial field: uniform interior, fixed boundaries.
    pub fn initial_field(&self) -> Result<Field> {
        Field::initialize(
            self.config.cell_count,
            self.config.interior_value,
            self.config.left_boundary,
            self.config.right_boundary,
        )
    }

    pub fn run<S: SnapshotSink + ?Sized>(&self, sink: &mut S) -> Result<RunSummary> {
        let field = self.initial_field()?;
        self.run_from(field, sink)
    }

    /// Runs from a caller-supplied initial profile of `cell_count` cells.
    pub fn run_from<S: SnapshotSink + ?Sized>(&self, field: Field, sink: &mut S) -> Result<RunSummary> {
        let c = &self.config;
        if field.len() != c.cell_count {
            return Err(FtcsError::LengthMismatch {
                expected: c.cell_count,
                actual: field.len(),
            });
        }

        log::info!(
            "running {} steps over {} cells (k = {}, snapshot every {})",
            c.step_count,
            c.cell_count,
            self.stability.k,
            c.snapshot_every
        );

        let mut state = FieldState::from_field(field, self.stability.k);
        let mut snapshots = 0;

        for t in 0..c.step_count {
            state.step();

            if c.check_finite {
                if let Some((cell, value)) = first_non_finite(state.field()) {
                    log::warn!("non-finite value {value} at cell {cell} after step {t}");
                    return Err(FtcsError::NonFinite { step: t, cell, value });
                }
            }

            if t % c.snapshot_every == 0 {
                log::debug!("snapshot at step {t} (time {})", c.time_at(t + 1));
                sink.accept(t, state.field())?;
                snapshots += 1;
            }
        }

        log::info!("finished {} steps, {snapshots} snapshots", state.steps_taken());

        Ok(RunSummary {
            steps: state.steps_taken(),
            snapshots,
            final_field: state.clone_field(),
        })
    }
}
