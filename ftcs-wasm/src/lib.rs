use wasm_bindgen::prelude::*;
use ftcs_core::{FieldState, GridConfig, Simulation};

#[wasm_bindgen]
pub struct Solver {
    sim: Simulation,
    inner: FieldState,
}

#[wasm_bindgen]
impl Solver {
    /// Fails when the grid is degenerate or k = D*dt/dx^2 is outside (0, 0.5).
    #[wasm_bindgen(constructor)]
    pub fn new(cell_count: usize, cell_size: f64, time_step: f64, diffusion: f64) -> Result<Solver, JsValue> {
        let config = GridConfig {
            cell_count,
            cell_size,
            time_step,
            diffusion,
            ..GridConfig::default()
        };
        Solver::from_config(config)
    }

    /// Same as the constructor but with explicit initial and boundary values.
    pub fn with_values(
        cell_count: usize,
        cell_size: f64,
        time_step: f64,
        diffusion: f64,
        interior: f64,
        left: f64,
        right: f64,
    ) -> Result<Solver, JsValue> {
        Solver::from_config(GridConfig {
            cell_count,
            cell_size,
            time_step,
            diffusion,
            interior_value: interior,
            left_boundary: left,
            right_boundary: right,
            ..GridConfig::default()
        })
    }

    pub fn k(&self) -> f64 { self.inner.k() }
    pub fn n(&self) -> usize { self.inner.len() }
    pub fn steps_taken(&self) -> usize { self.inner.steps_taken() }
    pub fn time(&self) -> f64 { self.sim.config().time_at(self.inner.steps_taken()) }

    /// Back to the initial profile.
    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.inner = FieldState::new(&self.sim).map_err(to_js)?;
        Ok(())
    }

    // Copy-based JS access (reliable)
    pub fn get_field(&self) -> Vec<f64> {
        self.inner.field().to_vec()
    }

    pub fn step(&mut self) -> StepInfo {
        self.step_many(1)
    }

    pub fn step_many(&mut self, count: usize) -> StepInfo {
        let t0 = now_ms();
        self.inner.step_many(count);
        let t1 = now_ms();
        StepInfo { steps: count, compute_ms: t1 - t0, time: self.time() }
    }
}

impl Solver {
    fn from_config(config: GridConfig) -> Result<Solver, JsValue> {
        let sim = Simulation::new(config).map_err(to_js)?;
        let inner = FieldState::new(&sim).map_err(to_js)?;
        Ok(Solver { sim, inner })
    }
}

#[wasm_bindgen]
pub struct StepInfo {
    steps: usize,
    compute_ms: f64,
    time: f64,
}

#[wasm_bindgen]
impl StepInfo {
    pub fn steps(&self) -> usize { self.steps }
    pub fn compute_ms(&self) -> f64 { self.compute_ms }
    pub fn time(&self) -> f64 { self.time }
}

fn to_js(e: ftcs_core::FtcsError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

// No window outside the browser.
#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    // JsValue is only constructed on the error path, so native tests stay on
    // the success path.
    #[test]
    fn steps_and_reports_time() {
        let mut s = Solver::new(5, 1.0, 2.0, 0.1).unwrap_or_else(|_| panic!("stable config"));
        assert!((s.k() - 0.2).abs() < 1e-12);
        let info = s.step_many(3);
        assert_eq!(info.steps(), 3);
        assert_eq!(info.time(), 6.0);
        assert_eq!(s.steps_taken(), 3);
        assert_eq!(s.get_field()[0], 1.0);
        assert_eq!(s.get_field()[4], 0.0);

        s.reset().unwrap_or_else(|_| panic!("reset"));
        assert_eq!(s.steps_taken(), 0);
        assert_eq!(s.get_field(), vec![1.0, 0.5, 0.5, 0.5, 0.0]);
    }
}
