// src/drivers/mod.rs
// 声明同级目录下的子模块文件
pub mod error;
pub mod frequency;
pub mod normalize;
pub mod plot;
pub mod scope;
pub mod session;
pub mod simulator;
pub mod transport;
// 公开导出常用类型，方便外部调用
pub use error::AcquisitionError;
pub use frequency::{measure_series, BandVerdict, FrequencyBand, FrequencyReport};
pub use normalize::{normalize, AcquisitionParams};
pub use plot::{render_waveform_png, PlotStyle};
pub use scope::Oscilloscope;
pub use session::{InstrumentSession, ScriptedSession};
pub use simulator::{SimulatedScope, SimulationConfig};
pub use transport::{SerialSession, StreamSession, TcpSession};
