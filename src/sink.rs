// src/sink.rs
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use log::info;
use crate::drivers::plot::{render_waveform_png, PlotStyle};
use crate::drivers::AcquisitionError;
use crate::types::Waveform;
/// Destination for acquired waveforms.
pub trait WaveformSink {
    /// Stores `waveform` under a name derived from `label`, returning the path written.
    fn persist(&mut self, waveform: &Waveform, label: &str) -> Result<PathBuf, AcquisitionError>;
}
/// Creates `<root>/signal_data_<unix seconds>` for this run's artifacts.
pub fn create_run_dir(root: &Path) -> Result<PathBuf, AcquisitionError> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let dir = root.join(format!("signal_data_{timestamp}"));
    fs::create_dir_all(&dir)?;
    info!("saving artifacts to {}", dir.display());
    Ok(dir)
}
/// Writes each waveform as `<label>.png` into a directory.
pub struct PngSink {
    dir: PathBuf,
    style: PlotStyle,
}
impl PngSink {
    pub fn new(dir: impl Into<PathBuf>, style: PlotStyle) -> Self {
        Self {
            dir: dir.into(),
            style,
        }
    }
}
impl WaveformSink for PngSink {
    fn persist(&mut self, waveform: &Waveform, label: &str) -> Result<PathBuf, AcquisitionError> {
        let png = render_waveform_png(waveform, &self.style)?;
        let path = self.dir.join(format!("{label}.png"));
        fs::write(&path, png)?;
        info!("{} plot saved to {}", waveform.channel, path.display());
        Ok(path)
    }
}
/// Keeps waveforms in memory; used for dry runs and tests.
#[derive(Default)]
pub struct MemorySink {
    pub stored: Vec<(String, Waveform)>,
}
impl WaveformSink for MemorySink {
    fn persist(&mut self, waveform: &Waveform, label: &str) -> Result<PathBuf, AcquisitionError> {
        self.stored.push((label.to_string(), waveform.clone()));
        Ok(PathBuf::from(format!("memory://{label}")))
    }
}
#[cfg(test)]
pub(crate) fn scratch_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let dir = std::env::temp_dir().join(format!("scopebench_{name}_{}_{nanos}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Channel;
    #[test]
    fn run_dir_is_created_under_root() {
        let root = scratch_dir("rundir");
        let dir = create_run_dir(&root).unwrap();
        assert!(dir.is_dir());
        assert!(dir
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("signal_data_")));
        fs::remove_dir_all(root).ok();
    }
    #[test]
    fn png_sink_writes_file() {
        let dir = scratch_dir("png");
        let mut sink = PngSink::new(
            &dir,
            PlotStyle {
                width: 200,
                height: 120,
                annotate: false,
                ..PlotStyle::default()
            },
        );
        let wave = Waveform {
            channel: Channel::FIRST,
            time_s: vec![0.0, 1.0, 2.0],
            samples: vec![0.0, 1.0, 0.0],
        };
        let path = sink.persist(&wave, "sine_plot").unwrap();
        assert_eq!(path, dir.join("sine_plot.png"));
        assert!(fs::read(&path).unwrap().starts_with(b"\x89PNG"));
        fs::remove_dir_all(dir).ok();
    }
}
