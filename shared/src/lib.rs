use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod currency;
pub mod form;
pub mod month;
pub mod view;

pub use currency::{format_currency, Currency};
pub use form::FormFields;
pub use month::{CurrentMonth, DateFormat};
pub use view::{ChartSeries, DashboardView, ExpenseRow};

/// Dashboard data for one month, as returned by `GET /api/dashboard`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Day labels for the chart, one per day with data
    pub dates: Vec<String>,
    /// Spending per day, parallel to `dates`
    pub daily_expenses: Vec<f64>,
    pub monthly_total: f64,
    pub daily_average: f64,
    /// Share of the monthly budget used; not guaranteed to be within 0-100
    pub budget_percentage: f64,
    #[serde(default)]
    pub recent_expenses: Vec<RecentExpense>,
}

/// A single row of the recent expenses table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentExpense {
    /// ISO date (`YYYY-MM-DD`) or RFC 3339 timestamp
    pub date: String,
    pub category: String,
    /// Style-class suffix for the category badge (e.g. `success` -> `bg-success`)
    pub category_color: String,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
}

/// Response body of the mutating endpoints (quick add, delete)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// The two ways a flow can fail
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// Transport failure, non-2xx status, or an undecodable body
    #[error("network error: {detail}")]
    Network { detail: String },
    /// The backend answered but reported `success: false`
    #[error("application error: {}", .message.as_deref().unwrap_or("no message"))]
    Application { message: Option<String> },
}

impl ClientError {
    pub fn network(detail: impl Into<String>) -> Self {
        Self::Network {
            detail: detail.into(),
        }
    }

    /// Text shown to the user. Network failures never leak their detail.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Network { .. } => fallback.to_string(),
            ClientError::Application { message } => message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or(fallback)
                .to_string(),
        }
    }
}

/// Which mutating flow produced a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    QuickAdd,
    Delete,
}

impl MutationKind {
    pub fn generic_failure(&self) -> &'static str {
        match self {
            MutationKind::QuickAdd => "Failed to add expense. Please try again.",
            MutationKind::Delete => "Failed to delete expense. Please try again.",
        }
    }

    pub fn component(&self) -> &'static str {
        match self {
            MutationKind::QuickAdd => "quick_add",
            MutationKind::Delete => "delete_expense",
        }
    }
}

/// What the page should do after a mutating request finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Reload the whole page so the server renders fresh state
    Reload,
    /// Leave the page as is and tell the user
    Alert(String),
}

impl MutationOutcome {
    /// Decide the outcome of a quick-add or delete request.
    ///
    /// A decoded `success: false` body becomes an [`ClientError::Application`]
    /// before the message is picked, so both error kinds share one path.
    pub fn decide(kind: MutationKind, result: Result<MutationResponse, ClientError>) -> Self {
        match result.and_then(MutationResponse::into_result) {
            Ok(()) => MutationOutcome::Reload,
            Err(e) => MutationOutcome::Alert(e.user_message(kind.generic_failure())),
        }
    }
}

impl MutationResponse {
    pub fn into_result(self) -> Result<(), ClientError> {
        if self.success {
            Ok(())
        } else {
            Err(ClientError::Application {
                message: self.message,
            })
        }
    }
}

/// Generic alert for a failed dashboard refresh
pub const DASHBOARD_REFRESH_FAILURE: &str = "Failed to update dashboard. Please try again.";

/// Confirmation prompt shown before deleting an expense
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this expense?";
