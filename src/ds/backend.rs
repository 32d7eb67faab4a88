use async_trait::async_trait;
use log::debug;
use serde_json::Value;

use crate::{
    CONFIG,
    ds::DirectoryApi,
    error::IiResult,
    model::{CompaniesPage, CompanyRecord, FinanceSnapshot},
    utils::{
        net::{http_get, join_url},
        text::is_blank,
    },
};

/// The REST backend serving `/api/*`.
#[derive(Clone, Debug)]
pub struct Backend {
    api_base: String,
    timeout_secs: u64,
}

impl Backend {
    pub fn new(api_base: &str, timeout_secs: u64) -> Self {
        Self {
            api_base: api_base.to_string(),
            timeout_secs,
        }
    }

    pub async fn from_config() -> Self {
        let config = CONFIG.read().await;
        Self::new(&config.api_base, config.timeout_secs)
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    async fn get_json(&self, segments: &[&str], query: &[(&str, String)]) -> IiResult<Value> {
        let url = join_url(&self.api_base, segments)?;
        let bytes = http_get(&url, query, self.timeout_secs).await?;
        let json: Value = serde_json::from_slice(&bytes)?;

        Ok(json)
    }
}

#[async_trait]
impl DirectoryApi for Backend {
    async fn companies(&self, query: &str, page: u32, per_page: u32) -> IiResult<CompaniesPage> {
        let json = self
            .get_json(
                &["api", "companies"],
                &[
                    ("query", query.to_string()),
                    ("page", page.to_string()),
                    ("per_page", per_page.to_string()),
                ],
            )
            .await?;

        Ok(serde_json::from_value(json)?)
    }

    async fn suggestions(&self, text: &str) -> IiResult<Vec<String>> {
        let query = if is_blank(text) {
            vec![]
        } else {
            vec![("q", text.to_string())]
        };
        let json = self.get_json(&["api", "suggestions"], &query).await?;

        Ok(suggestions_from_json(&json))
    }

    async fn company(&self, name: &str) -> IiResult<CompanyRecord> {
        let json = self.get_json(&["api", "company", name], &[]).await?;

        Ok(serde_json::from_value(json)?)
    }

    async fn finance(&self, name: &str) -> IiResult<FinanceSnapshot> {
        let json = self
            .get_json(&["api", "company", name, "finance"], &[])
            .await?;

        Ok(serde_json::from_value(json)?)
    }
}

fn suggestions_from_json(json: &Value) -> Vec<String> {
    match json.as_array() {
        Some(array) => array
            .iter()
            .filter_map(|v| v.as_str())
            .map(|s| s.to_string())
            .collect(),
        None => {
            debug!("[Suggestions] Not an array: {json}");
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::{error::IiError, model::Trend};

    #[test]
    fn test_suggestions_from_json() {
        assert_eq!(
            suggestions_from_json(&json!(["PepsiCo", 42, "Puma"])),
            vec!["PepsiCo".to_string(), "Puma".to_string()]
        );
        assert!(suggestions_from_json(&json!({ "error": "server error" })).is_empty());
    }

    #[tokio::test]
    async fn test_companies() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/companies")
                    .query_param("query", "Pepsi")
                    .query_param("page", "1")
                    .query_param("per_page", "5");
                then.status(200).json_body(json!({
                    "results": [
                        { "name": "PepsiCo", "description": "Beverages", "month": 3, "year": 2023, "ticker": "PEP" }
                    ],
                    "pagination": { "total": 1, "page": 1, "per_page": 5, "pages": 1 }
                }));
            })
            .await;

        let backend = Backend::new(&server.base_url(), 5);
        let page = backend.companies("Pepsi", 1, 5).await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.results[0].name, "PepsiCo");
        assert_eq!(page.results[0].ticker.as_deref(), Some("PEP"));
        assert_eq!(page.page_bounds(), (1, 1));
    }

    #[tokio::test]
    async fn test_companies_status_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/companies");
                then.status(500).json_body(json!({ "error": "server error" }));
            })
            .await;

        let backend = Backend::new(&server.base_url(), 5);
        match backend.companies("", 1, 5).await {
            Err(IiError::HttpStatusError {
                status, message, ..
            }) => {
                assert_eq!(status, 500);
                assert_eq!(message.as_deref(), Some("server error"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_companies_malformed_json() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/companies");
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        let backend = Backend::new(&server.base_url(), 5);
        assert!(matches!(
            backend.companies("", 1, 5).await,
            Err(IiError::SerdeJsonError(_))
        ));
    }

    #[tokio::test]
    async fn test_suggestions_blank_text_omits_q() {
        let server = MockServer::start_async().await;
        let with_q = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/suggestions")
                    .query_param_exists("q");
                then.status(200).json_body(json!(["unexpected"]));
            })
            .await;
        let without_q = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/suggestions");
                then.status(200).json_body(json!(["Acme", "PepsiCo"]));
            })
            .await;

        let backend = Backend::new(&server.base_url(), 5);
        let names = backend.suggestions("  ").await.unwrap();

        assert_eq!(names, vec!["Acme".to_string(), "PepsiCo".to_string()]);
        assert_eq!(with_q.hits_async().await, 0);
        assert_eq!(without_q.hits_async().await, 1);
    }

    #[tokio::test]
    async fn test_suggestions_with_text() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/suggestions")
                    .query_param("q", "pep");
                then.status(200).json_body(json!(["PepsiCo"]));
            })
            .await;

        let backend = Backend::new(&server.base_url(), 5);
        assert_eq!(
            backend.suggestions("pep").await.unwrap(),
            vec!["PepsiCo".to_string()]
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_company_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/company/Nobody");
                then.status(404)
                    .json_body(json!({ "error": "Company 'Nobody' not found" }));
            })
            .await;

        let backend = Backend::new(&server.base_url(), 5);
        let err = backend.company("Nobody").await.unwrap_err();
        assert_eq!(err.server_message(), Some("Company 'Nobody' not found"));
    }

    #[tokio::test]
    async fn test_finance() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/company/Acme/finance");
                then.status(200).json_body(json!({
                    "before_stock_data": [{ "Date": "2023-09-01T00:00:00", "Close": 10.0 }],
                    "after_stock_data": [{ "Date": "2023-10-02T00:00:00", "Close": 8.0 }],
                    "revenue_data": [],
                    "before_trend": "increase",
                    "after_trend": "decrease"
                }));
            })
            .await;

        let backend = Backend::new(&server.base_url(), 5);
        let snapshot = backend.finance("Acme").await.unwrap();

        mock.assert_async().await;
        assert_eq!(snapshot.before_stock_data.len(), 1);
        assert_eq!(snapshot.after_trend, Trend::Decrease);
    }
}
