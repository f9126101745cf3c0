//! Blocking user-visible alerts and console diagnostics.

/// Show a blocking `window.alert`
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Log a diagnostic to the browser console
pub fn console_error(message: &str) {
    web_sys::console::error_1(&message.into());
}
