//! Expense dashboard client.
//!
//! Compiled to WebAssembly and loaded by the server-rendered pages of the
//! expense tracker. It binds the quick-add form, month navigation, filter
//! form and delete actions to the backend API and patches the dashboard with
//! the responses.

use gloo::events::EventListener;
use std::cell::RefCell;
use std::rc::Rc;

mod chart;
mod config;
mod controller;
mod dom;
mod services;

use config::ClientConfig;
use controller::DashboardController;
use services::{BrowserPage, Logger};

thread_local! {
    static CONTROLLER: RefCell<Option<DashboardController>> = const { RefCell::new(None) };
}

fn start() {
    let document = gloo::utils::document();
    let config = ClientConfig::from_document(&document);
    Logger::init(config.log_endpoint.clone());

    let controller = DashboardController::start(&document, config, Rc::new(BrowserPage));
    CONTROLLER.with(|slot| *slot.borrow_mut() = Some(controller));
}

fn main() {
    console_error_panic_hook::set_once();

    let document = gloo::utils::document();
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| start()).forget();
    } else {
        start();
    }
}
