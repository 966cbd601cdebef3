use super::logging::Logger;

/// Browser side effects a flow may trigger
pub trait Page {
    fn alert(&self, message: &str);
    /// Blocking yes/no prompt
    fn confirm(&self, message: &str) -> bool;
    /// Full reload of the current document
    fn reload(&self);
    /// Full navigation to `url`
    fn navigate(&self, url: &str);
}

/// [`Page`] backed by the real window
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserPage;

impl Page for BrowserPage {
    fn alert(&self, message: &str) {
        gloo::dialogs::alert(message);
    }

    fn confirm(&self, message: &str) -> bool {
        gloo::dialogs::confirm(message)
    }

    fn reload(&self) {
        if let Err(e) = gloo::utils::window().location().reload() {
            Logger::error_with_component("page", &format!("Reload failed: {:?}", e));
        }
    }

    fn navigate(&self, url: &str) {
        if let Err(e) = gloo::utils::window().location().set_href(url) {
            Logger::error_with_component("page", &format!("Navigation to {} failed: {:?}", url, e));
        }
    }
}
