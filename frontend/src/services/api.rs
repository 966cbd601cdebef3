use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{ClientError, CurrentMonth, DashboardSnapshot, FormFields, MutationResponse};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// API client for communicating with the expense backend
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Submit a quick-add form to its declared action URL
    pub async fn quick_add(&self, action: &str, fields: &FormFields) -> Result<MutationResponse, ClientError> {
        let request = Request::post(action)
            .header("Content-Type", FORM_CONTENT_TYPE)
            .header("X-Requested-With", "XMLHttpRequest")
            .body(fields.to_query_string())
            .map_err(|e| ClientError::network(format!("Failed to build request: {}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::network(format!("Failed to reach {}: {}", action, e)))?;

        decode(response).await
    }

    /// Dashboard data for the month containing `month`
    pub async fn dashboard(&self, month: &CurrentMonth) -> Result<DashboardSnapshot, ClientError> {
        let url = self.url("/api/dashboard");
        let timestamp = month.query_timestamp();

        let response = Request::get(&url)
            .query([("date", timestamp.as_str())])
            .send()
            .await
            .map_err(|e| ClientError::network(format!("Failed to fetch dashboard data: {}", e)))?;

        decode(response).await
    }

    /// Delete a single expense by id
    pub async fn delete_expense(&self, id: &str) -> Result<MutationResponse, ClientError> {
        let encoded_id = String::from(js_sys::encode_uri_component(id));
        let url = self.url(&format!("/api/expenses/{}", encoded_id));

        let response = Request::delete(&url)
            .header("X-Requested-With", "XMLHttpRequest")
            .send()
            .await
            .map_err(|e| ClientError::network(format!("Failed to delete expense {}: {}", id, e)))?;

        decode(response).await
    }
}

/// Non-2xx statuses and bodies that do not decode are both network errors
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::network(format!(
            "Server error {} {}: {}",
            response.status(),
            response.status_text(),
            body.trim()
        )));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::network(format!("Failed to parse response: {}", e)))
}
