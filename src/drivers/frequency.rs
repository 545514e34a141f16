use std::thread;
use std::time::Duration;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use crate::drivers::scope::Oscilloscope;
use crate::drivers::session::InstrumentSession;
use crate::types::Channel;
/// Expected frequency range, inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrequencyBand {
    pub min_hz: f64,
    pub max_hz: f64,
}
impl Default for FrequencyBand {
    fn default() -> Self {
        // Mains band checked on the bench.
        Self {
            min_hz: 50.0,
            max_hz: 60.0,
        }
    }
}
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BandVerdict {
    Below,
    Within,
    Above,
}
impl FrequencyBand {
    pub fn classify(&self, frequency_hz: f64) -> BandVerdict {
        if frequency_hz < self.min_hz {
            BandVerdict::Below
        } else if frequency_hz > self.max_hz {
            BandVerdict::Above
        } else {
            BandVerdict::Within
        }
    }
}
/// Summary of a measurement series.
#[derive(Clone, Debug, PartialEq)]
pub struct FrequencyReport {
    pub count: usize,
    pub min_hz: f64,
    pub max_hz: f64,
    pub mean_hz: f64,
    pub latest_hz: f64,
    pub verdict: BandVerdict,
}
impl FrequencyReport {
    /// `None` for an empty series. The verdict is taken on the latest reading.
    pub fn from_readings(readings: &[f64], band: &FrequencyBand) -> Option<Self> {
        let latest_hz = *readings.last()?;
        let (min_hz, max_hz) = readings
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let mean_hz = readings.iter().sum::<f64>() / readings.len() as f64;
        Some(Self {
            count: readings.len(),
            min_hz,
            max_hz,
            mean_hz,
            latest_hz,
            verdict: band.classify(latest_hz),
        })
    }
    pub fn log(&self, band: &FrequencyBand) {
        info!(
            "measured {} readings: latest {:.3} Hz, mean {:.3} Hz, range {:.3}..{:.3} Hz",
            self.count, self.latest_hz, self.mean_hz, self.min_hz, self.max_hz
        );
        match self.verdict {
            BandVerdict::Within => info!(
                "frequency within expected range ({}-{} Hz)",
                band.min_hz, band.max_hz
            ),
            _ => warn!(
                "frequency {:.3} Hz outside expected range ({}-{} Hz)",
                self.latest_hz, band.min_hz, band.max_hz
            ),
        }
    }
}
/// Takes `count` readings on `channel`, `pause` apart, appending each successful
/// one to `readings`. Failed readings are logged and left out. Returns how many
/// readings were appended.
pub fn measure_series<S: InstrumentSession>(
    scope: &mut Oscilloscope<S>,
    channel: Channel,
    count: usize,
    pause: Duration,
    readings: &mut Vec<f64>,
) -> usize {
    let before = readings.len();
    for attempt in 0..count {
        match scope.measure_frequency(channel) {
            Ok(hz) => readings.push(hz),
            Err(e) => warn!("failed to measure frequency on {channel}: {e}"),
        }
        if attempt + 1 < count && !pause.is_zero() {
            thread::sleep(pause);
        }
    }
    readings.len() - before
}
