//! Win32 platform abstractions.

pub mod clipboard;
pub mod foreground;
pub mod handlers;
pub mod hotkey;
pub mod single_instance;
pub mod text;
pub mod window;
pub mod wm;
