mod dataset;
mod ic;
mod plot;

use clap::Parser;
use dataset::DatasetWriter;
use ftcs_core::{FtcsError, GridConfig, Simulation, SnapshotSink, Stability};
use ic::{IcType, generate_ic};
use plot::TerminalPlot;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON file with a grid configuration; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of spatial cells Nx [default: 1000]
    #[arg(long)]
    cells: Option<usize>,

    /// Cell size dx [default: 1]
    #[arg(long)]
    dx: Option<f64>,

    /// Number of time steps Nt [default: 10000]
    #[arg(long)]
    steps: Option<usize>,

    /// Time step dt [default: 1]
    #[arg(long)]
    dt: Option<f64>,

    /// Diffusion coefficient D [default: 0.25]
    #[arg(long)]
    diffusion: Option<f64>,

    /// Initial interior value [default: 0.5]
    #[arg(long)]
    interior: Option<f64>,

    /// Fixed value at the left edge [default: 1]
    #[arg(long, allow_hyphen_values = true)]
    left: Option<f64>,

    /// Fixed value at the right edge [default: 0]
    #[arg(long, allow_hyphen_values = true)]
    right: Option<f64>,

    /// Emit a snapshot every this many steps [default: 1000]
    #[arg(long)]
    snapshot_every: Option<usize>,

    /// Abort when a non-finite value appears instead of letting it propagate
    #[arg(long)]
    check_finite: bool,

    /// Initial interior profile
    #[arg(long, value_enum, default_value_t = IcType::Uniform)]
    ic: IcType,

    /// Noise amplitude for --ic noise
    #[arg(long, default_value_t = 0.05)]
    noise_amplitude: f64,

    /// RNG seed for --ic noise (reproducibility)
    #[arg(long, default_value_t = 123)]
    seed: u64,

    /// Draw each snapshot in the terminal
    #[arg(long)]
    plot: bool,

    /// Do not wait for Enter after each plot
    #[arg(long)]
    no_wait: bool,

    /// Plot width in columns
    #[arg(long, default_value_t = 72)]
    plot_width: usize,

    /// Plot height in rows
    #[arg(long, default_value_t = 20)]
    plot_height: usize,

    /// Output directory for profiles.bin, meta.jsonl and config.json
    #[arg(long)]
    out: Option<PathBuf>,
}

/// Fans each snapshot out to the sinks selected on the command line.
struct Sinks {
    plot: Option<TerminalPlot<io::StdinLock<'static>, io::Stdout>>,
    dataset: Option<DatasetWriter>,
}

impl SnapshotSink for Sinks {
    fn accept(&mut self, step: usize, values: &[f64]) -> io::Result<()> {
        if let Some(d) = self.dataset.as_mut() {
            d.accept(step, values)?;
        }
        if let Some(p) = self.plot.as_mut() {
            p.accept(step, values)?;
        }
        Ok(())
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<FtcsError>() {
            Some(FtcsError::Unstable { .. }) => ExitCode::from(1),
            _ => {
                eprintln!("error: {e}");
                ExitCode::from(2)
            }
        },
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(args)?;

    let sim = match Simulation::new(config) {
        Ok(sim) => {
            report_stability(sim.stability());
            sim
        }
        Err(FtcsError::Unstable { k }) => {
            report_stability(Stability { k, stable: false });
            return Err(FtcsError::Unstable { k }.into());
        }
        Err(e) => return Err(e.into()),
    };
    let config = sim.config();

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let initial = generate_ic(&mut rng, config, args.ic, args.noise_amplitude)?;
    log::info!("initial profile: {}", args.ic.as_str());

    let mut sinks = Sinks {
        plot: args.plot.then(|| {
            TerminalPlot::new(
                io::stdin().lock(),
                io::stdout(),
                args.plot_width,
                args.plot_height,
                !args.no_wait,
            )
        }),
        dataset: match &args.out {
            Some(dir) => Some(DatasetWriter::create(dir, config)?),
            None => None,
        },
    };

    let summary = sim.run_from(initial, &mut sinks)?;

    let mut stdout = io::stdout().lock();
    writeln!(
        stdout,
        "Finished {} steps (t = {}), {} snapshots",
        summary.steps,
        config.time_at(summary.steps),
        summary.snapshots
    )?;

    if let (Some(dir), Some(dataset)) = (&args.out, sinks.dataset.take()) {
        let written = dataset.finish()?;
        writeln!(stdout, "Wrote {written} snapshots to: {}", dir.display())?;
    }

    Ok(())
}

fn build_config(args: &Args) -> Result<GridConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => GridConfig::default(),
    };

    if let Some(v) = args.cells {
        config.cell_count = v;
    }
    if let Some(v) = args.dx {
        config.cell_size = v;
    }
    if let Some(v) = args.steps {
        config.step_count = v;
    }
    if let Some(v) = args.dt {
        config.time_step = v;
    }
    if let Some(v) = args.diffusion {
        config.diffusion = v;
    }
    if let Some(v) = args.interior {
        config.interior_value = v;
    }
    if let Some(v) = args.left {
        config.left_boundary = v;
    }
    if let Some(v) = args.right {
        config.right_boundary = v;
    }
    if let Some(v) = args.snapshot_every {
        config.snapshot_every = v;
    }
    config.check_finite |= args.check_finite;

    Ok(config)
}

fn report_stability(stability: Stability) {
    println!("k = {}", stability.k);
    println!("{}", stability.verdict());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        fs::write(&path, r#"{"cell_count": 50, "diffusion": 0.1, "left_boundary": 2.0}"#).unwrap();

        let args = Args::parse_from([
            "ftcs",
            "--config",
            path.to_str().unwrap(),
            "--diffusion",
            "0.3",
            "--right",
            "-1",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.cell_count, 50);
        assert_eq!(config.diffusion, 0.3);
        assert_eq!(config.left_boundary, 2.0);
        assert_eq!(config.right_boundary, -1.0);
        assert_eq!(config.step_count, 10_000);
    }

    #[test]
    fn unstable_run_maps_to_unstable_error() {
        let args = Args::parse_from(["ftcs", "--cells", "10", "--diffusion", "0.5"]);
        let err = run(&args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FtcsError>(),
            Some(FtcsError::Unstable { .. })
        ));
    }

    #[test]
    fn zero_diffusion_goes_through_stability_abort() {
        let args = Args::parse_from(["ftcs", "--cells", "10", "--steps", "1", "--diffusion", "0"]);
        let err = run(&args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FtcsError>(),
            Some(FtcsError::Unstable { k }) if *k == 0.0
        ));
    }

    #[test]
    fn headless_run_writes_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("run");
        let args = Args::parse_from([
            "ftcs",
            "--cells",
            "20",
            "--steps",
            "2500",
            "--out",
            out.to_str().unwrap(),
        ]);
        run(&args).unwrap();
        let meta = fs::read_to_string(out.join("meta.jsonl")).unwrap();
        assert_eq!(meta.lines().count(), 3);
        let bytes = fs::read(out.join("profiles.bin")).unwrap();
        assert_eq!(bytes.len(), 3 * 20 * 8);
    }
}
