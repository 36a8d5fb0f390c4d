//! SnippetPad for Windows.
//!
//! A small always-on-top window of snippet buttons. Clicking a button copies
//! the snippet and pastes it into the window that was active before.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(windows)]
mod app;
#[cfg(windows)]
mod platform;
#[cfg(windows)]
mod storage;
#[cfg(windows)]
mod ui;

use tracing_subscriber::EnvFilter;

/// Log filter directives, e.g. `SNIPPETPAD_LOG=snippetpad_core=debug`.
const LOG_ENV: &str = "SNIPPETPAD_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(windows)]
fn main() -> windows::core::Result<()> {
    use platform::single_instance::{self, Claim, InstanceKey, InstanceLock};
    use windows::Win32::UI::Controls::{
        ICC_STANDARD_CLASSES, ICC_WIN95_CLASSES, INITCOMMONCONTROLSEX, InitCommonControlsEx,
    };
    use windows::Win32::UI::HiDpi::{
        DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, SetProcessDpiAwarenessContext,
    };

    init_logging();

    // The manifest normally sets this already.
    if let Err(err) =
        unsafe { SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) }
    {
        tracing::debug!(error = %err, "dpi awareness not changed");
    }

    let controls = INITCOMMONCONTROLSEX {
        dwSize: size_of::<INITCOMMONCONTROLSEX>() as u32,
        dwICC: ICC_STANDARD_CLASSES | ICC_WIN95_CLASSES,
    };
    let _ = unsafe { InitCommonControlsEx(&controls) };

    let paths = storage::DataPaths::resolve();
    let key = InstanceKey::for_dir(&paths.dir);
    let _lock = match InstanceLock::claim(key) {
        Claim::Acquired(lock) => Some(lock),
        Claim::Unguarded => None,
        Claim::Held => {
            if !single_instance::activate_running(platform::window::MAIN_CLASS, key) {
                tracing::warn!(
                    dir = %paths.dir.display(),
                    "data directory locked, no launcher window answered"
                );
            }
            return Ok(());
        }
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");
    platform::window::run(paths)
}

#[cfg(not(windows))]
fn main() {
    init_logging();
    tracing::error!("snippetpad only runs on Windows");
    std::process::exit(1);
}
