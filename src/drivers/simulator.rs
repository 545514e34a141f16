use std::collections::VecDeque;
use std::f64::consts::TAU;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use crate::drivers::session::InstrumentSession;
use crate::drivers::AcquisitionError;
use crate::types::Channel;
pub const SIMULATED_IDN: &str = "SIMULATED,SCOPEBENCH-SIM,0,1.0";
/// Signal the simulated scope pretends to see on its inputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub frequency_hz: f64,
    pub amplitude: f64,
    pub points: usize,
    pub sample_interval: f64,
    pub time_origin: f64,
    /// Peak noise added to every sample, in the amplitude unit.
    pub noise: f64,
    /// Fixed seed for reproducible output; random when absent.
    pub seed: Option<u64>,
}
impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 55.0,
            amplitude: 1.0,
            points: 1000,
            sample_interval: 1e-4,
            time_origin: -0.05,
            noise: 0.01,
            seed: None,
        }
    }
}
/// In-process stand-in for a bench oscilloscope.
///
/// Channel 1 carries a sine, other channels a square wave of the same
/// frequency. Queries it does not understand go unanswered, so the next read
/// fails like a timeout would.
pub struct SimulatedScope {
    config: SimulationConfig,
    rng: StdRng,
    source: Channel,
    replies: VecDeque<Option<String>>,
}
impl SimulatedScope {
    pub fn new(config: SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            rng,
            source: Channel::FIRST,
            replies: VecDeque::new(),
        }
    }
    fn jitter(&mut self, scale: f64) -> f64 {
        if scale > 0.0 {
            self.rng.gen_range(-scale..=scale)
        } else {
            0.0
        }
    }
    fn waveform_block(&mut self) -> String {
        let cfg = self.config.clone();
        let body = (0..cfg.points)
            .map(|i| {
                let t = cfg.time_origin + i as f64 * cfg.sample_interval;
                let phase = (TAU * cfg.frequency_hz * t).sin();
                let clean = if self.source.number() == 1 {
                    cfg.amplitude * phase
                } else if phase >= 0.0 {
                    cfg.amplitude
                } else {
                    0.0
                };
                format!("{:.6e}", clean + self.jitter(cfg.noise))
            })
            .collect::<Vec<_>>()
            .join(",");
        format!("#8{:08} {body}", body.len())
    }
    fn respond(&mut self, command: &str) -> Option<Option<String>> {
        let upper = command.trim().to_ascii_uppercase();
        let (head, arg) = match upper.split_once(' ') {
            Some((head, arg)) => (head, arg.trim()),
            None => (upper.as_str(), ""),
        };
        match head {
            "*IDN?" => Some(Some(SIMULATED_IDN.to_string())),
            ":MEASURE:FREQUENCY?" => {
                let jitter = self.jitter(self.config.frequency_hz * 1e-3);
                Some(Some(format!("{:E}", self.config.frequency_hz + jitter)))
            }
            ":WAVEFORM:DATA?" => Some(Some(self.waveform_block())),
            ":WAVEFORM:XINCREMENT?" => Some(Some(format!("{:E}", self.config.sample_interval))),
            ":WAVEFORM:XORIGIN?" => Some(Some(format!("{:E}", self.config.time_origin))),
            ":WAVEFORM:SOURCE" => {
                let number = arg
                    .strip_prefix("CHANNEL")
                    .and_then(|n| n.parse::<u8>().ok())
                    .and_then(Channel::new);
                if let Some(channel) = number {
                    self.source = channel;
                }
                None
            }
            _ if head.ends_with('?') => Some(None),
            _ => None,
        }
    }
}
impl InstrumentSession for SimulatedScope {
    fn write(&mut self, command: &str) -> Result<(), AcquisitionError> {
        debug!("sim <- {command}");
        if let Some(reply) = self.respond(command) {
            self.replies.push_back(reply);
        }
        Ok(())
    }
    fn read(&mut self) -> Result<String, AcquisitionError> {
        match self.replies.pop_front() {
            Some(Some(reply)) => Ok(reply),
            _ => Err(AcquisitionError::CommunicationFailure(
                "simulated read timed out".into(),
            )),
        }
    }
}
