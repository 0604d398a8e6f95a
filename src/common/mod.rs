pub mod config;
pub mod design;
pub mod error;
pub mod matrix;

pub use config::*;
pub use design::*;
pub use error::*;
pub use matrix::*;
