pub mod config;
pub mod document;
pub mod fields;
pub mod form;
pub mod preview;
pub mod theme;
pub mod types;

// Keep the public surface small and intentional.
pub use config::*;
pub use fields::*;
pub use form::*;
pub use theme::*;
pub use types::*;
