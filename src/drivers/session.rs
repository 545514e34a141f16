use std::collections::VecDeque;
use crate::drivers::AcquisitionError;
/// Line-oriented request/response link to a bench instrument.
///
/// Writes are newline-terminated; `read` returns one response line with the
/// terminator stripped. Timeouts surface as `CommunicationFailure`.
pub trait InstrumentSession {
    fn write(&mut self, command: &str) -> Result<(), AcquisitionError>;
    fn read(&mut self) -> Result<String, AcquisitionError>;
    fn query(&mut self, command: &str) -> Result<String, AcquisitionError> {
        self.write(command)?;
        self.read()
    }
}
impl<S: InstrumentSession + ?Sized> InstrumentSession for Box<S> {
    fn write(&mut self, command: &str) -> Result<(), AcquisitionError> {
        (**self).write(command)
    }
    fn read(&mut self) -> Result<String, AcquisitionError> {
        (**self).read()
    }
}
/// In-memory session replaying canned responses, for tests and dry runs.
///
/// Every written command is recorded; every read pops the next response.
pub struct ScriptedSession {
    responses: VecDeque<Result<String, String>>,
    sent: Vec<String>,
}
impl ScriptedSession {
    pub fn new<I, T>(responses: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(|r| Ok(r.into())).collect(),
            sent: Vec::new(),
        }
    }
    pub fn push_response(&mut self, response: impl Into<String>) {
        self.responses.push_back(Ok(response.into()));
    }
    /// Queue a read that fails as if the instrument timed out.
    pub fn push_failure(&mut self, reason: impl Into<String>) {
        self.responses.push_back(Err(reason.into()));
    }
    pub fn sent(&self) -> &[String] {
        &self.sent
    }
    pub fn pending(&self) -> usize {
        self.responses.len()
    }
}
impl InstrumentSession for ScriptedSession {
    fn write(&mut self, command: &str) -> Result<(), AcquisitionError> {
        self.sent.push(command.to_string());
        Ok(())
    }
    fn read(&mut self) -> Result<String, AcquisitionError> {
        match self.responses.pop_front() {
            Some(Ok(line)) => Ok(line),
            Some(Err(reason)) => Err(AcquisitionError::CommunicationFailure(reason)),
            None => Err(AcquisitionError::CommunicationFailure(
                "read timed out: no response scripted".into(),
            )),
        }
    }
}
