pub mod decode;
pub mod error;
pub mod generate_resume;
pub mod parse_resume;
pub mod request;
pub mod runtime;

pub use error::ClientError;
