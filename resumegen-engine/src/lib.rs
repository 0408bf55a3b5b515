pub mod engine;
pub mod session;
pub mod traits;

pub use engine::{EngineError, ResumeEngine};
