pub mod interpolator;
pub mod polyphase;
pub mod prototype;
pub mod response;
pub mod window;

pub use interpolator::{EngineState, Interpolate, InterpolateExt, interpolate};
pub use polyphase::{PolyphaseFilterBank, build_filter_bank};
pub use prototype::{build_prototype, design_lowpass};
pub use response::{frequency_response, magnitude_db, peak_magnitude_db};
pub use window::blackman;
