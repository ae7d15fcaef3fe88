use std::io;

/// Receives field snapshots from the driver.
///
/// `accept` is called synchronously; the run does not continue until it
/// returns. An `Err` aborts the run.
pub trait SnapshotSink {
    fn accept(&mut self, step: usize, values: &[f64]) -> io::Result<()>;
}

impl<F> SnapshotSink for F
where
    F: FnMut(usize, &[f64]) -> io::Result<()>,
{
    fn accept(&mut self, step: usize, values: &[f64]) -> io::Result<()> {
        self(step, values)
    }
}

/// Discards every snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn accept(&mut self, _step: usize, _values: &[f64]) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub step: usize,
    pub values: Vec<f64>,
}

/// Keeps a copy of every snapshot, in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub snapshots: Vec<Snapshot>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> Vec<usize> {
        self.snapshots.iter().map(|s| s.step).collect()
    }
}

impl SnapshotSink for RecordingSink {
    fn accept(&mut self, step: usize, values: &[f64]) -> io::Result<()> {
        self.snapshots.push(Snapshot {
            step,
            values: values.to_vec(),
        });
        Ok(())
    }
}
