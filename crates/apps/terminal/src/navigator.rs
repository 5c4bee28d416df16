//! Browser adapter for the engine's external navigation capability.

use leptos::logging;
use terminal_engine::Navigator;

#[derive(Debug, Clone, Copy, Default)]
/// Opens external URLs in a new browser tab.
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn open_external(&self, url: &str) {
        if let Err(err) = open_in_new_tab(url) {
            logging::warn!("open external url failed for `{url}`: {err}");
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn open_in_new_tab(url: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "browser window unavailable".to_string())?;
    window
        .open_with_url_and_target(url, "_blank")
        .map(|_| ())
        .map_err(|err| format!("{err:?}"))
}

#[cfg(not(target_arch = "wasm32"))]
fn open_in_new_tab(_url: &str) -> Result<(), String> {
    Err("browser navigation is only available when compiled for wasm32".to_string())
}
