// src/types.rs
use std::fmt;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::drivers::frequency::FrequencyReport;
// Analog input of the oscilloscope, 1-based as printed on the front panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Channel(u8);
impl Channel {
    pub const FIRST: Channel = Channel(1);
    pub const MAX: u8 = 4;
    pub fn new(number: u8) -> Option<Self> {
        (1..=Self::MAX).contains(&number).then_some(Self(number))
    }
    pub fn number(&self) -> u8 {
        self.0
    }
}
impl TryFrom<u8> for Channel {
    type Error = String;
    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::new(number).ok_or_else(|| format!("channel must be 1..={}, got {number}", Self::MAX))
    }
}
impl From<Channel> for u8 {
    fn from(channel: Channel) -> Self {
        channel.0
    }
}
// SCPI mnemonic, e.g. `CHANnel1`.
impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CHANnel{}", self.0)
    }
}
/// One normalized acquisition: equal-length time axis and samples.
#[derive(Clone, Debug, PartialEq)]
pub struct Waveform {
    pub channel: Channel,
    pub time_s: Vec<f64>,
    pub samples: Vec<f64>,
}
impl Waveform {
    pub fn len(&self) -> usize {
        self.samples.len()
    }
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
    pub fn duration_seconds(&self) -> f64 {
        match (self.time_s.first(), self.time_s.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }
    pub fn amplitude_bounds(&self) -> Option<(f64, f64)> {
        let mut values = self.samples.iter().copied();
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time_s.iter().copied().zip(self.samples.iter().copied())
    }
}
// 单个通道的采集结果
#[derive(Debug)]
pub enum ChannelOutcome {
    Saved { channel: Channel, artifacts: Vec<PathBuf> },
    Skipped { channel: Channel, reason: String },
}
impl ChannelOutcome {
    pub fn channel(&self) -> Channel {
        match self {
            ChannelOutcome::Saved { channel, .. } | ChannelOutcome::Skipped { channel, .. } => {
                *channel
            }
        }
    }
    pub fn is_saved(&self) -> bool {
        matches!(self, ChannelOutcome::Saved { .. })
    }
}
/// Everything a run produced, owned by the caller.
#[derive(Debug, Default)]
pub struct RunReport {
    pub identity: String,
    pub output_dir: PathBuf,
    pub frequencies_hz: Vec<f64>,
    pub frequency: Option<FrequencyReport>,
    pub channels: Vec<ChannelOutcome>,
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn channel_range_and_mnemonic() {
        assert!(Channel::new(0).is_none());
        assert!(Channel::new(5).is_none());
        let ch = Channel::new(2).unwrap();
        assert_eq!(ch.to_string(), "CHANnel2");
        let parsed: Vec<Channel> = serde_json::from_str("[1, 4]").unwrap();
        assert_eq!(parsed.iter().map(Channel::number).collect::<Vec<_>>(), vec![1, 4]);
        assert!(serde_json::from_str::<Channel>("7").is_err());
    }
    #[test]
    fn waveform_bounds_and_duration() {
        let wave = Waveform {
            channel: Channel::new(1).unwrap(),
            time_s: vec![1.0, 1.5, 2.0],
            samples: vec![0.2, -0.4, 0.9],
        };
        assert_eq!(wave.amplitude_bounds(), Some((-0.4, 0.9)));
        assert_eq!(wave.duration_seconds(), 1.0);
        assert_eq!(wave.points().nth(1), Some((1.5, -0.4)));
    }
    #[test]
    fn outcome_reports_its_channel() {
        let ch = Channel::new(3).unwrap();
        let skipped = ChannelOutcome::Skipped {
            channel: ch,
            reason: "timed out".into(),
        };
        assert_eq!(skipped.channel(), ch);
        assert!(!skipped.is_saved());
    }
}
