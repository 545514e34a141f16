use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use anyhow::{Context, Result};
use log::{debug, info};
use serialport::SerialPort;
use crate::drivers::session::InstrumentSession;
use crate::drivers::AcquisitionError;
const TERMINATOR: &str = "\n";
/// Session over any byte stream: newline-terminated writes, line reads.
pub struct StreamSession<T: Read + Write> {
    link: BufReader<T>,
    label: String,
}
pub type SerialSession = StreamSession<Box<dyn SerialPort>>;
pub type TcpSession = StreamSession<TcpStream>;
impl<T: Read + Write> StreamSession<T> {
    pub fn new(link: T, label: impl Into<String>) -> Self {
        Self {
            link: BufReader::new(link),
            label: label.into(),
        }
    }
    pub fn label(&self) -> &str {
        &self.label
    }
    fn failure(&self, op: &str, err: io::Error) -> AcquisitionError {
        let reason = match err.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => "timed out".to_string(),
            _ => err.to_string(),
        };
        AcquisitionError::CommunicationFailure(format!("{op} on {} {reason}", self.label))
    }
}
impl SerialSession {
    /// Opens a USB/serial instrument port, e.g. `/dev/ttyUSB0` or `COM3`.
    pub fn open_serial(port: &str, baud_rate: u32, timeout: Duration) -> Result<Self> {
        let link = serialport::new(port, baud_rate)
            .timeout(timeout)
            .open()
            .with_context(|| format!("failed to open serial port {port}"))?;
        info!("opened serial session on {port} at {baud_rate} baud");
        Ok(Self::new(link, port))
    }
}
impl TcpSession {
    /// Connects to a raw SCPI socket, e.g. `192.168.1.91:5025`.
    pub fn connect_tcp(address: &str, timeout: Duration) -> Result<Self> {
        let addr = address
            .to_socket_addrs()
            .with_context(|| format!("failed to resolve {address}"))?
            .next()
            .with_context(|| format!("{address} resolved to no addresses"))?;
        let stream = TcpStream::connect_timeout(&addr, timeout)
            .with_context(|| format!("failed to connect to {address}"))?;
        stream.set_read_timeout(Some(timeout))?;
        stream.set_write_timeout(Some(timeout))?;
        stream.set_nodelay(true)?;
        info!("opened tcp session to {address}");
        Ok(Self::new(stream, address))
    }
}
impl<T: Read + Write> InstrumentSession for StreamSession<T> {
    fn write(&mut self, command: &str) -> Result<(), AcquisitionError> {
        debug!("{} <- {command}", self.label);
        let stream = self.link.get_mut();
        let sent = stream
            .write_all(command.as_bytes())
            .and_then(|_| stream.write_all(TERMINATOR.as_bytes()))
            .and_then(|_| stream.flush());
        sent.map_err(|e| self.failure("write", e))
    }
    fn read(&mut self) -> Result<String, AcquisitionError> {
        let mut line = String::new();
        let count = match self.link.read_line(&mut line) {
            Ok(count) => count,
            Err(e) => return Err(self.failure("read", e)),
        };
        if count == 0 {
            return Err(AcquisitionError::CommunicationFailure(format!(
                "{} closed the connection",
                self.label
            )));
        }
        let line = line.trim_end_matches(['\r', '\n']).to_string();
        debug!("{} -> {} bytes", self.label, line.len());
        Ok(line)
    }
}
impl<T: Read + Write> Drop for StreamSession<T> {
    fn drop(&mut self) {
        let _ = self.link.get_mut().flush();
        debug!("closed session {}", self.label);
    }
}
