use clap::ValueEnum;
use ftcs_core::{Field, GridConfig, Result};
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum IcType {
    Uniform,
    Linear,
    Noise,
    Step,
}

impl IcType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IcType::Uniform => "uniform",
            IcType::Linear => "linear",
            IcType::Noise => "noise",
            IcType::Step => "step",
        }
    }
}

/// Build the initial field for `config`. Boundary cells always carry the
/// configured Dirichlet values.
pub fn generate_ic<R: Rng>(rng: &mut R, config: &GridConfig, ic: IcType, amplitude: f64) -> Result<Field> {
    let n = config.cell_count;
    let (left, right) = (config.left_boundary, config.right_boundary);

    let mut field = Field::initialize(n, config.interior_value, left, right)?;

    match ic {
        IcType::Uniform => return Ok(field),

        IcType::Linear => {
            let last = (n - 1) as f64;
            let mut f: Vec<f64> = (0..n).map(|i| left + (right - left) * i as f64 / last).collect();
            f[0] = left;
            f[n - 1] = right;
            field = Field::from_values(f)?;
        }

        IcType::Noise => {
            let mut f = field.into_values();
            for v in f[1..n - 1].iter_mut() {
                *v += rng.gen_range(-1.0..=1.0) * amplitude;
            }
            field = Field::from_values(f)?;
        }

        IcType::Step => {
            let mut f = field.into_values();
            let mid = n / 2;
            for (i, v) in f.iter_mut().enumerate().take(n - 1).skip(1) {
                *v = if i < mid { left } else { right };
            }
            field = Field::from_values(f)?;
        }
    }

    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn config(n: usize) -> GridConfig {
        GridConfig {
            cell_count: n,
            ..GridConfig::default()
        }
    }

    #[test]
    fn uniform_matches_reference_initialization() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let f = generate_ic(&mut rng, &config(5), IcType::Uniform, 0.1).unwrap();
        assert_eq!(f.values(), &[1.0, 0.5, 0.5, 0.5, 0.0]);
    }

    #[test]
    fn linear_ramps_between_boundaries() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let f = generate_ic(&mut rng, &config(5), IcType::Linear, 0.0).unwrap();
        assert_eq!(f.values(), &[1.0, 0.75, 0.5, 0.25, 0.0]);
    }

    #[test]
    fn step_splits_at_midpoint() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let f = generate_ic(&mut rng, &config(6), IcType::Step, 0.0).unwrap();
        assert_eq!(f.values(), &[1.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn noise_is_seeded_and_bounded() {
        let c = config(100);
        let a = generate_ic(&mut ChaCha8Rng::seed_from_u64(7), &c, IcType::Noise, 0.1).unwrap();
        let b = generate_ic(&mut ChaCha8Rng::seed_from_u64(7), &c, IcType::Noise, 0.1).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.left(), 1.0);
        assert_eq!(a.right(), 0.0);
        assert!(a.interior().iter().all(|v| (0.4..=0.6).contains(v)));
        assert!(a.interior().iter().any(|v| *v != 0.5));
    }
}
