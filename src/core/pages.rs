use crate::config::registry::RegistryConfig;
use crate::core::flatten::flatten_object;
use crate::domain::model::{CompanyPage, Record};
use crate::domain::ports::PageSource;
use crate::utils::error::{Result, ScoutError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct RawSearchPage {
    #[serde(default)]
    items: Vec<Value>,
    #[serde(default)]
    total_results: usize,
}

/// 抓一頁公司搜尋結果：basic auth（API key 當帳號、密碼留空）、
/// 攤平巢狀欄位、只留 company_status == "active" 的公司
pub struct PageFetcher {
    client: Client,
    config: RegistryConfig,
}

impl PageFetcher {
    pub fn new(client: Client, config: RegistryConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl PageSource for PageFetcher {
    async fn fetch_page(&self, term: &str, start_index: usize) -> Result<CompanyPage> {
        let url = format!("{}/search/companies", self.config.base_url);

        tracing::debug!(
            "📡 Requesting search page: q={}, start_index={}",
            term,
            start_index
        );

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.config.api_key, Some(""))
            .query(&[
                ("q", term.to_string()),
                ("items_per_page", self.config.per_page.to_string()),
                ("start_index", start_index.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("📡 Search page response status: {}", status);

        if !status.is_success() {
            return Err(ScoutError::RegistryStatusError {
                status: status.as_u16(),
                context: format!("search page at index {}", start_index),
            });
        }

        let raw: RawSearchPage = response.json().await?;
        let total_results = raw.total_results;

        if raw.items.is_empty() {
            tracing::debug!("No items at index {} (total {})", start_index, total_results);
            return Ok(CompanyPage {
                companies: Vec::new(),
                total_results,
            });
        }

        let mut companies = Vec::new();
        let item_count = raw.items.len();
        for item in raw.items {
            if let Value::Object(obj) = item {
                let record = Record {
                    data: flatten_object(&obj),
                };
                if record.str_field("company_status") == "active" {
                    companies.push(record);
                }
            }
        }

        tracing::debug!(
            "Page at {}: {} items, {} active, total {}",
            start_index,
            item_count,
            companies.len(),
            total_results
        );

        Ok(CompanyPage {
            companies,
            total_results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn test_config(base_url: String) -> RegistryConfig {
        RegistryConfig {
            api_key: "test-key".to_string(),
            base_url,
            per_page: 100,
            max_results: 100,
            page_delay_ms: 200,
            timeout_seconds: 5,
        }
    }

    fn fetcher_for(server: &MockServer) -> PageFetcher {
        let config = test_config(server.base_url());
        let client = config.client().unwrap();
        PageFetcher::new(client, config)
    }

    #[tokio::test]
    async fn test_fetch_page_flattens_and_keeps_active_only() {
        let server = MockServer::start();

        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/search/companies")
                .query_param("q", "Wealth")
                .query_param("items_per_page", "100")
                .query_param("start_index", "0")
                // basic auth: "test-key" + 空密碼
                .header("authorization", "Basic dGVzdC1rZXk6");
            then.status(200).json_body(serde_json::json!({
                "total_results": 2,
                "items": [
                    {
                        "title": "ACTIVE WEALTH LTD",
                        "company_number": "11111111",
                        "company_status": "active",
                        "address": {"address_line_1": "1 High St", "postal_code": "AB1 2CD"}
                    },
                    {
                        "title": "GONE WEALTH LTD",
                        "company_number": "22222222",
                        "company_status": "dissolved",
                        "address": {"address_line_1": "2 Low St", "postal_code": "EF3 4GH"}
                    }
                ]
            }));
        });

        let fetcher = fetcher_for(&server);
        let page = fetcher.fetch_page("Wealth", 0).await.unwrap();

        api_mock.assert();
        assert_eq!(page.total_results, 2);
        assert_eq!(page.companies.len(), 1);

        let company = &page.companies[0];
        assert_eq!(company.str_field("title"), "ACTIVE WEALTH LTD");
        assert_eq!(company.str_field("address.address_line_1"), "1 High St");
        assert_eq!(company.str_field("address.postal_code"), "AB1 2CD");
    }

    #[tokio::test]
    async fn test_fetch_page_empty_items_keeps_total() {
        let server = MockServer::start();

        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/search/companies")
                .query_param("start_index", "200");
            then.status(200).json_body(serde_json::json!({
                "total_results": 150,
                "items": []
            }));
        });

        let fetcher = fetcher_for(&server);
        let page = fetcher.fetch_page("Wealth", 200).await.unwrap();

        api_mock.assert();
        assert!(page.companies.is_empty());
        assert_eq!(page.total_results, 150);
    }

    #[tokio::test]
    async fn test_fetch_page_non_2xx_is_an_error() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/search/companies");
            then.status(429);
        });

        let fetcher = fetcher_for(&server);
        let result = fetcher.fetch_page("Wealth", 0).await;

        assert!(matches!(
            result,
            Err(ScoutError::RegistryStatusError { status: 429, .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_page_skips_non_object_items() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/search/companies");
            then.status(200).json_body(serde_json::json!({
                "total_results": 2,
                "items": [
                    "not-an-object",
                    {"title": "OK LTD", "company_number": "3", "company_status": "active"}
                ]
            }));
        });

        let fetcher = fetcher_for(&server);
        let page = fetcher.fetch_page("Wealth", 0).await.unwrap();

        assert_eq!(page.companies.len(), 1);
        assert_eq!(page.companies[0].str_field("title"), "OK LTD");
    }
}
