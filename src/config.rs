// src/config.rs
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use crate::drivers::frequency::FrequencyBand;
use crate::drivers::plot::PlotStyle;
use crate::drivers::simulator::SimulationConfig;
use crate::types::Channel;
/// How to reach the oscilloscope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Connection {
    Simulation(SimulationConfig),
    Serial {
        port: String,
        #[serde(default = "default_baud_rate")]
        baud_rate: u32,
    },
    /// Raw SCPI socket, `host:port`.
    Tcp { address: String },
}
// 位图缓冲区上限
pub const MAX_PLOT_SIDE: u32 = 8192;
fn default_baud_rate() -> u32 {
    115_200
}
impl Default for Connection {
    fn default() -> Self {
        Connection::Simulation(SimulationConfig::default())
    }
}
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
    pub annotate: bool,
}
impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            annotate: true,
        }
    }
}
impl PlotConfig {
    pub fn style(&self) -> PlotStyle {
        PlotStyle {
            width: self.width,
            height: self.height,
            annotate: self.annotate,
            ..PlotStyle::default()
        }
    }
}
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub connection: Connection,
    pub timeout_ms: u64,
    pub measure_channel: Channel,
    pub measure_count: usize,
    pub measure_pause_ms: u64,
    pub frequency_band: FrequencyBand,
    pub channels: Vec<Channel>,
    pub output_root: PathBuf,
    pub write_png: bool,
    pub write_csv: bool,
    pub plot: PlotConfig,
}
impl Default for BenchConfig {
    fn default() -> Self {
        // Bench defaults: 5 s timeout, three readings a second apart,
        // sine on channel 1 and the PWM stimulus on channel 2.
        Self {
            connection: Connection::default(),
            timeout_ms: 5000,
            measure_channel: Channel::FIRST,
            measure_count: 3,
            measure_pause_ms: 1000,
            frequency_band: FrequencyBand::default(),
            channels: [1, 2].into_iter().filter_map(Channel::new).collect(),
            output_root: PathBuf::from("images"),
            write_png: true,
            write_csv: false,
            plot: PlotConfig::default(),
        }
    }
}
impl BenchConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: BenchConfig = serde_json::from_str(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }
    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms == 0 {
            anyhow::bail!("timeout_ms must be greater than zero");
        }
        if self.frequency_band.min_hz > self.frequency_band.max_hz {
            anyhow::bail!(
                "frequency_band min_hz {} exceeds max_hz {}",
                self.frequency_band.min_hz,
                self.frequency_band.max_hz
            );
        }
        if self.plot.width == 0 || self.plot.height == 0 {
            anyhow::bail!("plot dimensions must be non-zero");
        }
        if self.plot.width > MAX_PLOT_SIDE || self.plot.height > MAX_PLOT_SIDE {
            anyhow::bail!(
                "plot dimensions {}x{} exceed {MAX_PLOT_SIDE} pixels per side",
                self.plot.width,
                self.plot.height
            );
        }
        Ok(())
    }
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
    pub fn measure_pause(&self) -> Duration {
        Duration::from_millis(self.measure_pause_ms)
    }
}
