use gloo::net::http::Request;
use serde::Serialize;
use std::cell::RefCell;
use wasm_bindgen_futures::spawn_local;

thread_local! {
    static REMOTE_ENDPOINT: RefCell<Option<String>> = const { RefCell::new(None) };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Serialize)]
struct LogRequest<'a> {
    level: Level,
    message: &'a str,
    component: &'a str,
}

/// Diagnostic logger. Records always go to the browser console and are
/// mirrored to the backend when a log endpoint is configured.
pub struct Logger;

impl Logger {
    /// Set (or clear) the endpoint that receives a copy of every record
    pub fn init(remote_endpoint: Option<String>) {
        REMOTE_ENDPOINT.with(|endpoint| *endpoint.borrow_mut() = remote_endpoint);
    }

    pub fn debug_with_component(component: &str, message: &str) {
        Self::log(Level::Debug, message, component);
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::log(Level::Info, message, component);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log(Level::Warn, message, component);
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::log(Level::Error, message, component);
    }

    fn log(level: Level, message: &str, component: &str) {
        let line = format!("[{}] {}", component, message);
        match level {
            Level::Debug => gloo::console::debug!(line),
            Level::Info => gloo::console::info!(line),
            Level::Warn => gloo::console::warn!(line),
            Level::Error => gloo::console::error!(line),
        }

        let Some(endpoint) = REMOTE_ENDPOINT.with(|endpoint| endpoint.borrow().clone()) else {
            return;
        };

        let request = match Request::post(&endpoint).json(&LogRequest {
            level,
            message,
            component,
        }) {
            Ok(request) => request,
            Err(e) => {
                gloo::console::warn!(format!("[logging] failed to encode log record: {}", e));
                return;
            }
        };

        // Fire and forget; a failing log sink must not produce more logs
        spawn_local(async move {
            let _ = request.send().await;
        });
    }
}
