pub mod config;
pub mod core;
pub mod error;
pub mod fallback;
pub mod partition;
pub mod permute;


pub use self::config::*;
pub use self::core::*;
pub use self::error::*;
pub use self::fallback::*;
pub use self::partition::*;
pub use self::permute::*;
