pub mod badge;
pub mod check;
pub mod config;
pub mod console;
pub mod error;
pub mod io;
pub mod network;
pub mod paths;
pub mod registry;
pub mod resolver;
pub mod slot;
pub mod value;

pub use error::{DotutilsError, Result};
