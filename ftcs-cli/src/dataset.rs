use ftcs_core::{GridConfig, SnapshotSink};
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Serialize)]
struct MetaRow {
    snapshot_idx: usize,
    step: usize,
    time: f64,

    min: f64,
    max: f64,
    mean: f64,
}

/// Writes snapshots under an output directory:
/// `profiles.bin` (little-endian f64 rows), `meta.jsonl` (one row per
/// snapshot) and `config.json`.
pub struct DatasetWriter {
    time_step: f64,
    count: usize,
    profiles: BufWriter<File>,
    meta: BufWriter<File>,
}

impl DatasetWriter {
    pub fn create(out: &Path, config: &GridConfig) -> io::Result<DatasetWriter> {
        fs::create_dir_all(out)?;

        let config_file = File::create(out.join("config.json"))?;
        serde_json::to_writer_pretty(config_file, config)?;

        let profiles = BufWriter::new(File::create(out.join("profiles.bin"))?);
        let meta = BufWriter::new(
            OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .open(out.join("meta.jsonl"))?,
        );

        Ok(DatasetWriter {
            time_step: config.time_step,
            count: 0,
            profiles,
            meta,
        })
    }

    pub fn finish(mut self) -> io::Result<usize> {
        self.profiles.flush()?;
        self.meta.flush()?;
        Ok(self.count)
    }
}

impl SnapshotSink for DatasetWriter {
    fn accept(&mut self, step: usize, values: &[f64]) -> io::Result<()> {
        write_f64_vec(&mut self.profiles, values)?;

        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let row = MetaRow {
            snapshot_idx: self.count,
            step,
            // snapshot `step` is taken after step + 1 iterations
            time: (step + 1) as f64 * self.time_step,
            min,
            max,
            mean: values.iter().sum::<f64>() / values.len() as f64,
        };
        serde_json::to_writer(&mut self.meta, &row)?;
        self.meta.write_all(b"\n")?;

        self.count += 1;
        Ok(())
    }
}

fn write_f64_vec<W: Write>(w: &mut W, v: &[f64]) -> io::Result<()> {
    for &x in v {
        w.write_all(&x.to_le_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_rows_and_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let config = GridConfig {
            cell_count: 3,
            ..GridConfig::default()
        };
        let mut w = DatasetWriter::create(dir.path(), &config).unwrap();
        w.accept(0, &[1.0, 0.5, 0.0]).unwrap();
        w.accept(1000, &[1.0, 0.25, 0.0]).unwrap();
        assert_eq!(w.finish().unwrap(), 2);

        let bytes = fs::read(dir.path().join("profiles.bin")).unwrap();
        assert_eq!(bytes.len(), 2 * 3 * 8);
        assert_eq!(f64::from_le_bytes(bytes[32..40].try_into().unwrap()), 0.25);

        let meta = fs::read_to_string(dir.path().join("meta.jsonl")).unwrap();
        let rows: Vec<serde_json::Value> = meta.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["step"], 1000);
        assert_eq!(rows[1]["time"], 1001.0);
        assert_eq!(rows[0]["mean"], 0.5);

        let saved: GridConfig =
            serde_json::from_str(&fs::read_to_string(dir.path().join("config.json")).unwrap()).unwrap();
        assert_eq!(saved, config);
    }
}
