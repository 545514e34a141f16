use log::debug;
use crate::drivers::error::AcquisitionError;
/// Timebase reported by the instrument for one acquisition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AcquisitionParams {
    pub sample_interval: f64,
    pub time_origin: f64,
}
impl AcquisitionParams {
    /// Only checks each value on its own. An origin so large that adding the
    /// interval no longer changes it is caught by `normalize`, which needs
    /// the sample count.
    pub fn new(sample_interval: f64, time_origin: f64) -> Result<Self, AcquisitionError> {
        if !sample_interval.is_finite() || sample_interval <= 0.0 {
            return Err(AcquisitionError::InvalidParameter(format!(
                "sample interval must be finite and positive, got {sample_interval}"
            )));
        }
        if !time_origin.is_finite() {
            return Err(AcquisitionError::InvalidParameter(format!(
                "time origin must be finite, got {time_origin}"
            )));
        }
        Ok(Self {
            sample_interval,
            time_origin,
        })
    }
    /// Timestamps for `len` points starting at the origin.
    pub fn time_axis(&self, len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| self.time_origin + i as f64 * self.sample_interval)
            .collect()
    }
}
/// Turns an ASCII waveform response into `(time_axis, samples)`.
///
/// Tokens are separated by whitespace and/or commas. A leading token starting
/// with `#` is a block header and is skipped. Any token that is not a finite
/// number rejects the whole response.
pub fn normalize(
    raw: &str,
    sample_interval: f64,
    time_origin: f64,
) -> Result<(Vec<f64>, Vec<f64>), AcquisitionError> {
    if raw.trim().is_empty() {
        return Err(AcquisitionError::EmptyResponse);
    }
    let params = AcquisitionParams::new(sample_interval, time_origin)?;
    let mut tokens = raw
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .peekable();
    if tokens.peek().is_some_and(|t| t.starts_with('#')) {
        let header = tokens.next();
        debug!("dropping waveform header token {header:?}");
    }
    let samples = tokens
        .enumerate()
        .map(|(index, token)| parse_sample(index, token))
        .collect::<Result<Vec<f64>, _>>()?;
    if samples.is_empty() {
        return Err(AcquisitionError::EmptyResponse);
    }
    debug!(
        "normalized {} samples, dt={} origin={}",
        samples.len(),
        params.sample_interval,
        params.time_origin
    );
    let time_axis = params.time_axis(samples.len());
    // f64 rounding can swallow a tiny interval next to a large origin
    if let Some(i) = time_axis.windows(2).position(|w| w[1] <= w[0]) {
        return Err(AcquisitionError::InvalidParameter(format!(
            "interval {} is below the resolution of origin {} at sample {}",
            params.sample_interval,
            params.time_origin,
            i + 1
        )));
    }
    Ok((time_axis, samples))
}
fn parse_sample(index: usize, token: &str) -> Result<f64, AcquisitionError> {
    let cleaned = token.trim_end_matches(',');
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AcquisitionError::MalformedSample {
            index,
            token: token.to_string(),
        }),
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn empty_and_blank_responses_are_rejected() {
        assert!(matches!(
            normalize("", 1.0, 0.0),
            Err(AcquisitionError::EmptyResponse)
        ));
        assert!(matches!(
            normalize("   ", 1.0, 0.0),
            Err(AcquisitionError::EmptyResponse)
        ));
        assert!(matches!(
            normalize(" ,, \n", 1.0, 0.0),
            Err(AcquisitionError::EmptyResponse)
        ));
    }
    #[test]
    fn header_token_is_dropped() {
        let (time, samples) = normalize("#3 1.0 2.0 3.0", 0.5, 0.0).unwrap();
        assert_eq!(samples, vec![1.0, 2.0, 3.0]);
        assert_eq!(time, vec![0.0, 0.5, 1.0]);
    }
    #[test]
    fn header_only_is_empty() {
        assert!(matches!(
            normalize("#9000000000", 1.0, 0.0),
            Err(AcquisitionError::EmptyResponse)
        ));
    }
    #[test]
    fn comma_separated_with_origin() {
        let (time, samples) = normalize("1.0, 2.0, 3.0", 1.0, 10.0).unwrap();
        assert_eq!(samples, vec![1.0, 2.0, 3.0]);
        assert_eq!(time, vec![10.0, 11.0, 12.0]);
    }
    #[test]
    fn header_token_ends_at_first_separator() {
        let (time, samples) = normalize("#800000004 -1.5e-2,4.0E-1,\n", 1e-6, 0.0).unwrap();
        assert_eq!(samples, vec![-1.5e-2, 4.0e-1]);
        assert_eq!(time.len(), 2);
    }
    #[test]
    fn malformed_token_rejects_everything() {
        match normalize("1.0 abc 3.0", 1.0, 0.0) {
            Err(AcquisitionError::MalformedSample { index, token }) => {
                assert_eq!(index, 1);
                assert_eq!(token, "abc");
            }
            other => panic!("expected MalformedSample, got {other:?}"),
        }
    }
    #[test]
    fn non_finite_tokens_are_malformed() {
        assert!(matches!(
            normalize("1.0 NaN", 1.0, 0.0),
            Err(AcquisitionError::MalformedSample { index: 1, .. })
        ));
        assert!(matches!(
            normalize("inf 1.0", 1.0, 0.0),
            Err(AcquisitionError::MalformedSample { index: 0, .. })
        ));
    }
    #[test]
    fn hash_after_first_token_is_malformed() {
        assert!(matches!(
            normalize("1.0 #2 3.0", 1.0, 0.0),
            Err(AcquisitionError::MalformedSample { index: 1, .. })
        ));
    }
    #[test]
    fn signed_and_exponent_notation() {
        let (_, samples) = normalize("-1.25e-3 +2 .5 -0", 1.0, 0.0).unwrap();
        assert_eq!(samples, vec![-1.25e-3, 2.0, 0.5, -0.0]);
    }
    #[test]
    fn invalid_interval_is_rejected() {
        for dt in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                normalize("1 2 3", dt, 0.0),
                Err(AcquisitionError::InvalidParameter(_))
            ));
        }
        assert!(matches!(
            normalize("1 2 3", 1.0, f64::NAN),
            Err(AcquisitionError::InvalidParameter(_))
        ));
    }
    #[test]
    fn interval_lost_to_origin_rounding_is_rejected() {
        assert!(matches!(
            normalize("1 2 3", 1e-9, 1e10),
            Err(AcquisitionError::InvalidParameter(_))
        ));
        assert!(normalize("1 2 3", 1e-3, 1e10).is_ok());
    }
    #[test]
    fn lengths_match_and_time_is_strictly_increasing() {
        let raw = (0..500)
            .map(|i| format!("{:.4}", (i as f64 * 0.1).sin()))
            .collect::<Vec<_>>()
            .join(",");
        let (time, samples) = normalize(&raw, 2e-9, -5e-7).unwrap();
        assert_eq!(time.len(), samples.len());
        assert!(time.windows(2).all(|w| w[1] > w[0]));
    }
    #[test]
    fn repeated_calls_are_bit_identical() {
        let raw = "#8 0.1, -0.2, 0.30000000000000004,\t7e10";
        let a = normalize(raw, 1e-3, -2.5).unwrap();
        let b = normalize(raw, 1e-3, -2.5).unwrap();
        let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a.0), bits(&b.0));
        assert_eq!(bits(&a.1), bits(&b.1));
    }
}
