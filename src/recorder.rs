use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use log::info;
use crate::drivers::AcquisitionError;
use crate::sink::WaveformSink;
use crate::types::Waveform;
/// Writes each waveform as `<label>.csv` with a `time_s,amplitude` header.
pub struct CsvSink {
    dir: PathBuf,
}
impl CsvSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}
impl WaveformSink for CsvSink {
    fn persist(&mut self, waveform: &Waveform, label: &str) -> Result<PathBuf, AcquisitionError> {
        let path = self.dir.join(format!("{label}.csv"));
        let mut w = BufWriter::new(File::create(&path)?);
        // 写入 CSV 表头
        writeln!(w, "time_s,amplitude")?;
        for (t, v) in waveform.points() {
            writeln!(w, "{t:e},{v:e}")?;
        }
        w.flush()?;
        info!("{} samples saved to {}", waveform.channel, path.display());
        Ok(path)
    }
}
