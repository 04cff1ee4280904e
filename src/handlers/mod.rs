//! Handler implementations

pub mod file;
pub mod stream;

pub use file::{FileHandler, FileMode};
pub use stream::{ConsoleHandler, ConsoleStream, ConsoleWriter, SharedBuffer, StreamHandler};

// Re-export the trait alongside its implementations
pub use crate::core::Handler;
