// src/engine.rs
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use log::{info, warn};
use crate::config::{BenchConfig, Connection};
use crate::drivers::frequency::{measure_series, FrequencyReport};
use crate::drivers::scope::Oscilloscope;
use crate::drivers::session::InstrumentSession;
use crate::drivers::simulator::SimulatedScope;
use crate::drivers::transport::{SerialSession, TcpSession};
use crate::drivers::AcquisitionError;
use crate::recorder::CsvSink;
use crate::sink::{create_run_dir, PngSink, WaveformSink};
use crate::types::{Channel, ChannelOutcome, RunReport};
/// Opens the session described by the configuration.
pub fn open_session(config: &BenchConfig) -> Result<Box<dyn InstrumentSession>> {
    let session: Box<dyn InstrumentSession> = match &config.connection {
        // 模拟模式，不需要硬件
        Connection::Simulation(sim) => {
            info!("using simulated oscilloscope");
            Box::new(SimulatedScope::new(sim.clone()))
        }
        // 硬件模式：串口或 SCPI 网口
        Connection::Serial { port, baud_rate } => {
            let session = SerialSession::open_serial(port, *baud_rate, config.timeout())?;
            info!("instrument link ready on {}", session.label());
            Box::new(session)
        }
        Connection::Tcp { address } => {
            let session = TcpSession::connect_tcp(address, config.timeout())?;
            info!("instrument link ready on {}", session.label());
            Box::new(session)
        }
    };
    Ok(session)
}
/// Sinks enabled by the configuration, all writing into `dir`.
pub fn build_sinks(config: &BenchConfig, dir: &Path) -> Vec<Box<dyn WaveformSink>> {
    let mut sinks: Vec<Box<dyn WaveformSink>> = Vec::new();
    if config.write_png {
        sinks.push(Box::new(PngSink::new(dir, config.plot.style())));
    }
    if config.write_csv {
        sinks.push(Box::new(CsvSink::new(dir)));
    }
    sinks
}
/// Artifact name for a channel: the sine reference on channel 1, the
/// stimulus on the others.
fn artifact_label(channel: Channel, run_id: &str) -> String {
    match channel.number() {
        1 => format!("sine_plot_{run_id}"),
        2 => format!("pwm_plot_{run_id}"),
        n => format!("ch{n}_plot_{run_id}"),
    }
}
/// One full bench pass: identify, measure, then acquire and persist every
/// configured channel in order. A failing channel is logged and skipped.
pub fn run<S: InstrumentSession>(
    config: &BenchConfig,
    session: S,
    output_dir: &Path,
    sinks: &mut [Box<dyn WaveformSink>],
) -> Result<RunReport> {
    let mut scope = Oscilloscope::connect(session).context("initialization failed")?;
    let mut report = RunReport {
        identity: scope.identity().to_string(),
        output_dir: output_dir.to_path_buf(),
        ..RunReport::default()
    };
    // 1. 频率测量，结果由调用方持有
    measure_series(
        &mut scope,
        config.measure_channel,
        config.measure_count,
        config.measure_pause(),
        &mut report.frequencies_hz,
    );
    info!("frequencies: {:?}", report.frequencies_hz);
    report.frequency = FrequencyReport::from_readings(&report.frequencies_hz, &config.frequency_band);
    match &report.frequency {
        Some(summary) => summary.log(&config.frequency_band),
        None => warn!("no frequency readings on {}", config.measure_channel),
    }
    let run_id = output_dir
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_prefix("signal_data_"))
        .unwrap_or("run")
        .to_string();
    // 2. 逐通道采集；单个通道失败只跳过该通道
    for &channel in &config.channels {
        let outcome = match acquire_channel(&mut scope, channel, &run_id, sinks) {
            Ok(artifacts) => ChannelOutcome::Saved { channel, artifacts },
            Err(e) => {
                warn!("skipping {channel}: {e}");
                ChannelOutcome::Skipped {
                    channel,
                    reason: e.to_string(),
                }
            }
        };
        report.channels.push(outcome);
    }
    Ok(report)
}
fn acquire_channel<S: InstrumentSession>(
    scope: &mut Oscilloscope<S>,
    channel: Channel,
    run_id: &str,
    sinks: &mut [Box<dyn WaveformSink>],
) -> Result<Vec<PathBuf>, AcquisitionError> {
    let waveform = scope.fetch_waveform(channel)?;
    info!(
        "{channel}: {} samples over {:.6} s",
        waveform.len(),
        waveform.duration_seconds()
    );
    let label = artifact_label(channel, run_id);
    sinks
        .iter_mut()
        .map(|sink| sink.persist(&waveform, &label))
        .collect()
}
/// Creates the run directory, opens the instrument and runs one pass.
pub fn run_from_config(config: &BenchConfig) -> Result<RunReport> {
    let dir = create_run_dir(&config.output_root)
        .with_context(|| format!("cannot create output under {}", config.output_root.display()))?;
    let session = open_session(config)?;
    let mut sinks = build_sinks(config, &dir);
    run(config, session, &dir, &mut sinks)
}
