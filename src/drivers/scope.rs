use log::{debug, info, warn};
use crate::drivers::normalize::{normalize, AcquisitionParams};
use crate::drivers::session::InstrumentSession;
use crate::drivers::AcquisitionError;
use crate::types::{Channel, Waveform};
/// SCPI-speaking oscilloscope on top of an instrument session.
///
/// Dropping the scope drops the session, which releases the port or socket.
pub struct Oscilloscope<S: InstrumentSession> {
    session: S,
    identity: String,
}
impl<S: InstrumentSession> Oscilloscope<S> {
    /// Verifies the link with `*IDN?` before handing out the driver.
    pub fn connect(mut session: S) -> Result<Self, AcquisitionError> {
        let identity = session.query("*IDN?")?.trim().to_string();
        if identity.is_empty() {
            return Err(AcquisitionError::CommunicationFailure(
                "instrument sent an empty identification".into(),
            ));
        }
        info!("connected to: {identity}");
        Ok(Self { session, identity })
    }
    pub fn identity(&self) -> &str {
        &self.identity
    }
    pub fn session(&self) -> &S {
        &self.session
    }
    pub fn into_session(self) -> S {
        self.session
    }
    /// Frequency in Hz from the scope's built-in measurement.
    pub fn measure_frequency(&mut self, channel: Channel) -> Result<f64, AcquisitionError> {
        self.session
            .write(&format!(":MEASure:FREQuency {channel}"))?;
        let response = self
            .session
            .query(&format!(":MEASure:FREQuency? {channel}"))?;
        parse_scalar(&response)
    }
    /// Current timebase. Queried fresh every time; the timebase may change
    /// between acquisitions.
    pub fn acquisition_params(&mut self) -> Result<AcquisitionParams, AcquisitionError> {
        let increment = parse_scalar(&self.session.query(":WAVeform:XINCrement?")?)?;
        let origin = parse_scalar(&self.session.query(":WAVeform:XORigin?")?)?;
        AcquisitionParams::new(increment, origin)
    }
    /// Pulls the ASCII waveform of `channel` and normalizes it.
    pub fn fetch_waveform(&mut self, channel: Channel) -> Result<Waveform, AcquisitionError> {
        self.session.write(":WAVeform:FORMat ASCii")?;
        self.session.write(&format!(":WAVeform:SOURCE {channel}"))?;
        let raw = self.session.query(":WAVeform:DATA?")?;
        if raw.trim().is_empty() {
            warn!("no data received from {channel}");
            return Err(AcquisitionError::EmptyResponse);
        }
        debug!(
            "data received from {channel}: {}...",
            raw.chars().take(100).collect::<String>()
        );
        let params = self.acquisition_params()?;
        let (time_s, samples) = normalize(&raw, params.sample_interval, params.time_origin)?;
        Ok(Waveform {
            channel,
            time_s,
            samples,
        })
    }
}
fn parse_scalar(response: &str) -> Result<f64, AcquisitionError> {
    let token = response.trim();
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AcquisitionError::MalformedSample {
            index: 0,
            token: token.to_string(),
        }),
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::session::ScriptedSession;
    fn ch(n: u8) -> Channel {
        Channel::new(n).unwrap()
    }
    #[test]
    fn connect_requires_identification() {
        let scope = Oscilloscope::connect(ScriptedSession::new(["KEYSIGHT,DSOX1102G,CN1,2.0\n"]))
            .unwrap();
        assert_eq!(scope.identity(), "KEYSIGHT,DSOX1102G,CN1,2.0");
        assert!(matches!(
            Oscilloscope::connect(ScriptedSession::new(["  "])),
            Err(AcquisitionError::CommunicationFailure(_))
        ));
    }
    #[test]
    fn measure_frequency_sends_set_then_query() {
        let mut scope =
            Oscilloscope::connect(ScriptedSession::new(["ID", "+5.5E+01"])).unwrap();
        assert_eq!(scope.measure_frequency(ch(1)).unwrap(), 55.0);
        assert_eq!(
            scope.session().sent(),
            [
                "*IDN?",
                ":MEASure:FREQuency CHANnel1",
                ":MEASure:FREQuency? CHANnel1"
            ]
        );
    }
    #[test]
    fn measurement_overflow_is_malformed() {
        let mut scope = Oscilloscope::connect(ScriptedSession::new(["ID", "9.9E+37x"])).unwrap();
        assert!(matches!(
            scope.measure_frequency(ch(2)),
            Err(AcquisitionError::MalformedSample { .. })
        ));
    }
    #[test]
    fn fetch_issues_commands_in_order_and_requeries_timebase() {
        let mut session = ScriptedSession::new(["ID"]);
        for (data, dt) in [("#3 1,2,3", "1e-3"), ("4 5", "2e-3")] {
            session.push_response(data);
            session.push_response(dt);
            session.push_response("-1e-3");
        }
        let mut scope = Oscilloscope::connect(session).unwrap();
        let first = scope.fetch_waveform(ch(1)).unwrap();
        let second = scope.fetch_waveform(ch(2)).unwrap();
        assert_eq!(first.samples, vec![1.0, 2.0, 3.0]);
        assert_eq!(first.time_s, vec![-1e-3, 0.0, 1e-3]);
        assert_eq!(second.channel, ch(2));
        assert_eq!(second.time_s, vec![-1e-3, 1e-3]);
        let sent = scope.into_session().sent().to_vec();
        assert_eq!(
            &sent[1..6],
            [
                ":WAVeform:FORMat ASCii",
                ":WAVeform:SOURCE CHANnel1",
                ":WAVeform:DATA?",
                ":WAVeform:XINCrement?",
                ":WAVeform:XORigin?",
            ]
        );
        assert_eq!(sent.iter().filter(|c| *c == ":WAVeform:XINCrement?").count(), 2);
    }
    #[test]
    fn empty_data_skips_timebase_queries() {
        let mut scope = Oscilloscope::connect(ScriptedSession::new(["ID", ""])).unwrap();
        assert!(matches!(
            scope.fetch_waveform(ch(1)),
            Err(AcquisitionError::EmptyResponse)
        ));
        assert!(!scope
            .session()
            .sent()
            .iter()
            .any(|c| c == ":WAVeform:XINCrement?"));
    }
    #[test]
    fn zero_increment_is_invalid() {
        let mut scope =
            Oscilloscope::connect(ScriptedSession::new(["ID", "1 2", "0", "0"])).unwrap();
        assert!(matches!(
            scope.fetch_waveform(ch(1)),
            Err(AcquisitionError::InvalidParameter(_))
        ));
    }
    #[test]
    fn timeout_surfaces_as_communication_failure() {
        let mut session = ScriptedSession::new(["ID"]);
        session.push_failure("timed out");
        let mut scope = Oscilloscope::connect(session).unwrap();
        assert!(matches!(
            scope.fetch_waveform(ch(1)),
            Err(AcquisitionError::CommunicationFailure(_))
        ));
    }
}
