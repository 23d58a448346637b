//! Console logging.
//!
//! The `log` macros (`debug!`, `info!`, `warn!`, `error!`) are the four
//! leveled entry points. They reach the browser console only when the
//! threshold in [`LOG_LEVEL`] is met. The threshold is installed once, at
//! start, and cannot be changed afterwards.

use crate::config::LOG_LEVEL;

/// Install the panic hook and the console logger.
///
/// Safe to call more than once: only the first call installs anything.
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(LOG_LEVEL).is_ok() {
        log::info!("🖼️ Gallery frontend starting (log level {})", LOG_LEVEL);
    }
}

/// Whether a message at `level` would reach the console.
pub fn enabled(level: log::Level) -> bool {
    level <= LOG_LEVEL
}
