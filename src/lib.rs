//! Bench oscilloscope acquisition: frequency checks and waveform capture over
//! SCPI, normalized into time-indexed samples and saved as plots or CSV.
pub mod config;
pub mod drivers;
pub mod engine;
pub mod recorder;
pub mod sink;
pub mod types;
