/// Outcome of the FTCS stability check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stability {
    pub k: f64,
    pub stable: bool,
}

impl Stability {
    pub fn verdict(&self) -> &'static str {
        if self.stable {
            "Constant k is within bounds."
        } else {
            "Constant k is not within bounds."
        }
    }
}

/// Computes k = D * dt / dx^2 and accepts it iff `0 < k < 0.5`.
pub fn check_stability(cell_size: f64, time_step: f64, diffusion: f64) -> Stability {
    let k = diffusion * time_step / (cell_size * cell_size);
    // NaN fails both comparisons
    let stable = k > 0.0 && k < 0.5;
    let report = Stability { k, stable };
    log::info!("k = {k}: {}", report.verdict());
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_strict() {
        assert!(!check_stability(1.0, 1.0, 0.5).stable);
        assert!(!check_stability(1.0, 1.0, 0.0).stable);
        assert!(check_stability(1.0, 1.0, 0.25).stable);
        assert!(check_stability(1.0, 1.0, 0.49999).stable);
    }

    #[test]
    fn scales_with_cell_size() {
        let s = check_stability(0.5, 1.0, 0.1);
        assert!((s.k - 0.4).abs() < 1e-12);
        assert!(s.stable);

        let s = check_stability(0.1, 1.0, 0.1);
        assert!(!s.stable);
    }

    #[test]
    fn nan_is_rejected() {
        let s = check_stability(0.0, 0.0, 0.0);
        assert!(s.k.is_nan());
        assert!(!s.stable);
        assert_eq!(s.verdict(), "Constant k is not within bounds.");
    }
}
