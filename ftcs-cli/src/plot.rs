use ftcs_core::SnapshotSink;
use std::io::{self, BufRead, Write};

/// Text line plot of a profile: one column per bucket of cells, value on the
/// vertical axis between the profile's min and max.
pub fn render_profile(values: &[f64], width: usize, height: usize) -> String {
    let width = width.clamp(1, values.len().max(1));
    let height = height.max(2);

    let finite = values.iter().copied().filter(|v| v.is_finite());
    let lo = finite.clone().fold(f64::INFINITY, f64::min);
    let hi = finite.fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if lo.is_finite() { (lo, hi) } else { (0.0, 0.0) };
    let span = if hi > lo { hi - lo } else { 1.0 };

    let mut grid = vec![vec![' '; width]; height];
    for (col, row_cells) in grid_columns(values.len(), width).enumerate() {
        let bucket = &values[row_cells];
        let mean = bucket.iter().sum::<f64>() / bucket.len() as f64;
        if !mean.is_finite() {
            grid[0][col] = '?';
            continue;
        }
        let level = ((mean - lo) / span * (height - 1) as f64).round() as usize;
        let row = height - 1 - level.min(height - 1);
        grid[row][col] = '*';
    }

    let mut out = String::new();
    for (r, row) in grid.iter().enumerate() {
        let label = if r == 0 {
            format!("{hi:>9.4} |")
        } else if r == height - 1 {
            format!("{lo:>9.4} |")
        } else {
            format!("{:>9} |", "")
        };
        out.push_str(&label);
        out.extend(row.iter());
        out.push('\n');
    }
    out.push_str(&format!("{:>9} +{}\n", "", "-".repeat(width)));
    out.push_str(&format!("{:>9}  0{:>w$}\n", "", values.len().saturating_sub(1), w = width - 1));
    out
}

fn grid_columns(len: usize, width: usize) -> impl Iterator<Item = std::ops::Range<usize>> {
    (0..width).map(move |c| {
        let start = c * len / width;
        let end = ((c + 1) * len / width).max(start + 1);
        start..end
    })
}

/// Draws each snapshot and, when `wait` is set, blocks until a line is read
/// from `input`.
pub struct TerminalPlot<R, W> {
    input: R,
    output: W,
    width: usize,
    height: usize,
    wait: bool,
}

impl<R: BufRead, W: Write> TerminalPlot<R, W> {
    pub fn new(input: R, output: W, width: usize, height: usize, wait: bool) -> Self {
        TerminalPlot {
            input,
            output,
            width,
            height,
            wait,
        }
    }
}

impl<R: BufRead, W: Write> SnapshotSink for TerminalPlot<R, W> {
    fn accept(&mut self, step: usize, values: &[f64]) -> io::Result<()> {
        writeln!(self.output, "step {step}")?;
        self.output
            .write_all(render_profile(values, self.width, self.height).as_bytes())?;
        if self.wait {
            write!(self.output, "press Enter to continue")?;
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                // stdin closed, stop blocking for the rest of the run
                self.wait = false;
            }
        }
        self.output.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decreasing_profile_runs_top_left_to_bottom_right() {
        let plot = render_profile(&[1.0, 0.5, 0.0], 3, 3);
        let rows: Vec<&str> = plot.lines().collect();
        assert_eq!(rows[0], "   1.0000 |*  ");
        assert_eq!(rows[1], "          | * ");
        assert_eq!(rows[2], "   0.0000 |  *");
    }

    #[test]
    fn buckets_wide_profiles() {
        let values: Vec<f64> = (0..1000).map(|i| i as f64).collect();
        let plot = render_profile(&values, 40, 10);
        let rows: Vec<&str> = plot.lines().collect();
        assert!(rows[0].ends_with('*'));
        assert_eq!(rows[9].chars().nth(11), Some('*'));
        assert!(rows[..10].iter().all(|l| l.len() == 11 + 40));
    }

    #[test]
    fn nan_buckets_are_marked() {
        let plot = render_profile(&[1.0, f64::NAN, 0.0], 3, 3);
        assert!(plot.lines().next().unwrap().contains('?'));
    }

    #[test]
    fn waits_for_each_snapshot_until_input_ends() {
        let input = io::Cursor::new(b"\n".to_vec());
        let mut out = Vec::new();
        {
            let mut sink = TerminalPlot::new(input, &mut out, 5, 3, true);
            sink.accept(0, &[1.0, 0.5, 0.0]).unwrap();
            sink.accept(1000, &[1.0, 0.5, 0.0]).unwrap();
            assert!(!sink.wait);
        }
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("press Enter").count(), 2);
        assert!(text.contains("step 1000"));
    }
}
