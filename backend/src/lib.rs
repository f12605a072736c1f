pub mod api;
pub mod error;
pub mod geometry;
pub mod glutils;
pub mod logging;
pub mod native;
pub mod quad;
pub mod shaders;
pub mod system;

pub use api::GlApi;
pub use error::GlError;
pub use logging::{init_logging, LoggingConfig};
pub use quad::{render_once, Quad};
pub use system::{GlProfile, System, SystemConfig};
