pub mod clipboard;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod foreground;
pub mod hotkey;
pub mod layout;
pub mod model;
pub mod paste;
pub mod platform;
pub mod settings;
pub mod status;
pub mod store;

#[cfg(test)]
pub(crate) mod fakes;

pub use error::{Error, Result};
