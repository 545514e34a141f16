use thiserror::Error;
#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("instrument returned no waveform data")]
    EmptyResponse,
    #[error("malformed sample {token:?} at position {index}")]
    MalformedSample { index: usize, token: String },
    #[error("communication with instrument failed: {0}")]
    CommunicationFailure(String),
    #[error("invalid acquisition parameter: {0}")]
    InvalidParameter(String),
    #[error("failed to persist waveform: {0}")]
    Persist(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for AcquisitionError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        AcquisitionError::Persist(format!("{value:?}"))
    }
}
impl From<image::ImageError> for AcquisitionError {
    fn from(value: image::ImageError) -> Self {
        AcquisitionError::Persist(value.to_string())
    }
}
impl From<std::io::Error> for AcquisitionError {
    fn from(value: std::io::Error) -> Self {
        AcquisitionError::Persist(value.to_string())
    }
}
