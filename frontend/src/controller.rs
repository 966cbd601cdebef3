//! Dashboard controller: binds the page's forms and buttons to the backend.
//!
//! Four independent flows run from here:
//! - quick add: POST the quick-add form, reload on success
//! - month navigation: move the displayed month and refresh the dashboard
//! - delete: confirm, DELETE the expense, reload on success
//! - filter: turn the filter form into a `/expenses?...` navigation
//!
//! Every flow handles its own failures; nothing escapes a spawned future.

use gloo::events::{EventListener, EventListenerOptions};
use shared::{
    ClientError, CurrentMonth, DashboardSnapshot, DashboardView, FormFields, MutationKind,
    MutationOutcome, MutationResponse, DASHBOARD_REFRESH_FAILURE, DELETE_CONFIRMATION,
};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, FormData, HtmlFormElement};

use crate::chart::DailyChart;
use crate::config::ClientConfig;
use crate::dom::DashboardDom;
use crate::services::date_utils;
use crate::services::{ApiClient, Logger, Page};

const COMPONENT: &str = "dashboard";

/// Attribute carrying the expense id on row delete buttons
const DELETE_ATTRIBUTE: &str = "data-delete-expense";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStep {
    Previous,
    Next,
    Today,
}

/// How a failed refresh is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshFailure {
    /// Log and alert; used for refreshes the user asked for
    Alert,
    /// Log only; used for the refresh issued at page load
    LogOnly,
}

/// State shared by all handlers of one page
pub struct DashboardState {
    api: ApiClient,
    page: Rc<dyn Page>,
    config: ClientConfig,
    month: Cell<CurrentMonth>,
    latest_refresh: Cell<u64>,
    dom: DashboardDom,
    chart: Option<DailyChart>,
}

impl DashboardState {
    pub fn new(document: &Document, config: ClientConfig, page: Rc<dyn Page>) -> Self {
        Self {
            api: ApiClient::with_base_url(config.api_base.clone()),
            page,
            month: Cell::new(CurrentMonth::today(date_utils::today())),
            latest_refresh: Cell::new(0),
            dom: DashboardDom::resolve(document),
            chart: DailyChart::attach(document, config.currency),
            config,
        }
    }

    pub fn current_month(&self) -> CurrentMonth {
        self.month.get()
    }

    pub fn set_current_month(&self, month: CurrentMonth) {
        self.month.set(month);
    }

    /// Move the displayed month and return the new value
    pub fn step_month(&self, step: MonthStep) -> CurrentMonth {
        let current = self.current_month();
        let next = match step {
            MonthStep::Previous => current.previous(),
            MonthStep::Next => current.next(),
            MonthStep::Today => CurrentMonth::today(date_utils::today()),
        };
        self.set_current_month(next);
        next
    }

    /// Fetch the dashboard for `month` and patch the page with it
    pub async fn refresh(&self, month: CurrentMonth, on_failure: RefreshFailure) {
        let sequence = self.begin_refresh();
        Logger::debug_with_component(
            COMPONENT,
            &format!("Refreshing dashboard for {} (#{})", month.label(), sequence),
        );
        let result = self.api.dashboard(&month).await;
        self.finish_refresh(sequence, month, result, on_failure);
    }

    fn begin_refresh(&self) -> u64 {
        let sequence = self.latest_refresh.get() + 1;
        self.latest_refresh.set(sequence);
        sequence
    }

    /// Apply a refresh result unless a newer refresh was started meanwhile
    fn finish_refresh(
        &self,
        sequence: u64,
        month: CurrentMonth,
        result: Result<DashboardSnapshot, ClientError>,
        on_failure: RefreshFailure,
    ) {
        if sequence != self.latest_refresh.get() {
            Logger::debug_with_component(
                COMPONENT,
                &format!("Discarding response of superseded refresh #{}", sequence),
            );
            return;
        }

        match result {
            Ok(snapshot) => self.show(&month, snapshot),
            Err(e) => {
                Logger::error_with_component(COMPONENT, &format!("Dashboard refresh failed: {}", e));
                if on_failure == RefreshFailure::Alert {
                    self.page.alert(&e.user_message(DASHBOARD_REFRESH_FAILURE));
                }
            }
        }
    }

    fn show(&self, month: &CurrentMonth, snapshot: DashboardSnapshot) {
        let view = DashboardView::build(month, snapshot, self.config.currency, self.config.date_format);

        if view.budget.is_out_of_range() {
            Logger::warn_with_component(
                COMPONENT,
                &format!("Budget percentage outside 0-100: {}", view.budget.percentage),
            );
        }

        if let Err(e) = self.dom.apply(&view) {
            Logger::error_with_component(COMPONENT, &format!("Failed to update dashboard: {:?}", e));
        }

        if let Some(chart) = &self.chart {
            if let Err(e) = chart.update(view.chart) {
                Logger::error_with_component(COMPONENT, &format!("Failed to draw chart: {}", e));
            }
        }
    }

    /// Quick-add flow: POST the form and reload the page on success
    pub async fn quick_add(&self, form: &HtmlFormElement) {
        let fields = match collect_fields(form) {
            Ok(fields) => fields,
            Err(e) => {
                Logger::error_with_component(
                    MutationKind::QuickAdd.component(),
                    &format!("Failed to read form: {:?}", e),
                );
                self.page.alert(MutationKind::QuickAdd.generic_failure());
                return;
            }
        };

        let result = self.api.quick_add(&form.action(), &fields).await;
        apply_mutation(self.page.as_ref(), MutationKind::QuickAdd, result);
    }

    /// Delete flow: confirm, DELETE, reload on success
    pub async fn delete_expense(&self, id: &str) {
        if !self.page.confirm(DELETE_CONFIRMATION) {
            Logger::debug_with_component(
                MutationKind::Delete.component(),
                &format!("Deletion of expense {} cancelled", id),
            );
            return;
        }

        let result = self.api.delete_expense(id).await;
        apply_mutation(self.page.as_ref(), MutationKind::Delete, result);
    }

    /// Filter flow: navigate to the listing page with the form as query
    pub fn submit_filter(&self, fields: &FormFields) {
        submit_filter(self.page.as_ref(), &self.config, fields);
    }
}

/// Reload on success, alert otherwise. Returns what was done.
pub fn apply_mutation(
    page: &dyn Page,
    kind: MutationKind,
    result: Result<MutationResponse, ClientError>,
) -> MutationOutcome {
    if let Err(e) = &result {
        Logger::error_with_component(kind.component(), &e.to_string());
    }

    let outcome = MutationOutcome::decide(kind, result);
    match &outcome {
        MutationOutcome::Reload => page.reload(),
        MutationOutcome::Alert(message) => {
            Logger::warn_with_component(kind.component(), &format!("Request rejected: {}", message));
            page.alert(message);
        }
    }
    outcome
}

pub fn submit_filter(page: &dyn Page, config: &ClientConfig, fields: &FormFields) {
    let url = fields.append_to(&config.expenses_page());
    Logger::debug_with_component("filter", &format!("Navigating to {}", url));
    page.navigate(&url);
}

/// Form entries in document order. File inputs are skipped.
pub fn collect_fields(form: &HtmlFormElement) -> Result<FormFields, JsValue> {
    let data = FormData::new_with_form(form)?;
    let mut fields = FormFields::new();

    if let Some(entries) = js_sys::try_iter(data.as_ref())? {
        for entry in entries {
            let entry = js_sys::Array::from(&entry?);
            if let (Some(name), Some(value)) = (entry.get(0).as_string(), entry.get(1).as_string()) {
                fields.push(name, value);
            }
        }
    }
    Ok(fields)
}

/// Owns the event listeners and global functions of one page
pub struct DashboardController {
    _state: Rc<DashboardState>,
    _listeners: Vec<EventListener>,
    _delete_expense: Closure<dyn Fn(JsValue)>,
    _format_currency: Closure<dyn Fn(f64) -> String>,
}

impl DashboardController {
    pub fn start(document: &Document, config: ClientConfig, page: Rc<dyn Page>) -> Self {
        let state = Rc::new(DashboardState::new(document, config, page));
        let mut listeners = Vec::new();

        if let Some(form) = find_form(document, "quickAddForm") {
            let state = state.clone();
            let target = form.clone();
            listeners.push(on_submit(&target, move |_| {
                let state = state.clone();
                let form = form.clone();
                spawn_local(async move { state.quick_add(&form).await });
            }));
        }

        for (id, step) in [
            ("prevMonth", MonthStep::Previous),
            ("nextMonth", MonthStep::Next),
            ("currentMonth", MonthStep::Today),
        ] {
            if let Some(button) = document.get_element_by_id(id) {
                let state = state.clone();
                listeners.push(EventListener::new_with_options(
                    &button,
                    "click",
                    EventListenerOptions::enable_prevent_default(),
                    move |event| {
                        event.prevent_default();
                        let month = state.step_month(step);
                        let state = state.clone();
                        spawn_local(async move { state.refresh(month, RefreshFailure::Alert).await });
                    },
                ));
            }
        }

        if let Some(form) = find_form(document, "filterForm") {
            let state = state.clone();
            let target = form.clone();
            listeners.push(on_submit(&target, move |_| match collect_fields(&form) {
                Ok(fields) => state.submit_filter(&fields),
                Err(e) => Logger::error_with_component("filter", &format!("Failed to read form: {:?}", e)),
            }));
        }

        {
            let state = state.clone();
            listeners.push(EventListener::new_with_options(
                document,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    if let Some(id) = delete_target(event) {
                        let state = state.clone();
                        spawn_local(async move { state.delete_expense(&id).await });
                    }
                },
            ));
        }

        let delete_expense = {
            let state = state.clone();
            Closure::<dyn Fn(JsValue)>::new(move |id: JsValue| {
                let Some(id) = expense_id(&id) else {
                    Logger::warn_with_component("delete_expense", "deleteExpense called without an id");
                    return;
                };
                let state = state.clone();
                spawn_local(async move { state.delete_expense(&id).await });
            })
        };

        let currency = state.config.currency;
        let format_currency = Closure::<dyn Fn(f64) -> String>::new(move |amount: f64| currency.format(amount));

        install_global("deleteExpense", delete_expense.as_ref());
        install_global("formatCurrency", format_currency.as_ref());

        if state.chart.is_some() {
            let state = state.clone();
            let month = state.current_month();
            spawn_local(async move { state.refresh(month, RefreshFailure::LogOnly).await });
        }

        Logger::info_with_component(
            COMPONENT,
            &format!("Controller started with {} listeners", listeners.len()),
        );

        Self {
            _state: state,
            _listeners: listeners,
            _delete_expense: delete_expense,
            _format_currency: format_currency,
        }
    }
}

fn find_form(document: &Document, id: &str) -> Option<HtmlFormElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
}

fn on_submit<F>(form: &HtmlFormElement, handler: F) -> EventListener
where
    F: Fn(&Event) + 'static,
{
    EventListener::new_with_options(
        form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            handler(event);
        },
    )
}

/// Expense id of a clicked `[data-delete-expense]` element, if any
fn delete_target(event: &Event) -> Option<String> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let button = target.closest(&format!("[{}]", DELETE_ATTRIBUTE)).ok()??;
    event.prevent_default();
    button.get_attribute(DELETE_ATTRIBUTE).filter(|id| !id.is_empty())
}

/// Ids arrive from inline handlers as strings or numbers
fn expense_id(value: &JsValue) -> Option<String> {
    value
        .as_string()
        .or_else(|| value.as_f64().map(|n| n.to_string()))
        .filter(|id| !id.is_empty())
}

fn install_global(name: &str, function: &JsValue) {
    let window = gloo::utils::window();
    if let Err(e) = js_sys::Reflect::set(&window, &JsValue::from_str(name), function) {
        Logger::error_with_component(COMPONENT, &format!("Failed to install window.{}: {:?}", name, e));
    }
}
