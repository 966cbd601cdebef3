pub mod api;
pub mod date_utils;
pub mod logging;
pub mod page;

pub use api::ApiClient;
pub use logging::Logger;
pub use page::{BrowserPage, Page};
