use crate::config::registry::RegistryConfig;
use crate::core::directors::DirectorResolver;
use crate::core::pages::PageFetcher;
use crate::domain::model::{CompanyResult, SearchResponse};
use crate::domain::ports::{DirectorSource, PageSource};
use crate::utils::error::{Result, ScoutError};
use std::time::Duration;
use tokio::time::sleep;

/// 公司資訊公開頁的網址前綴，回傳結果的 link 欄位用
pub const COMPANY_PROFILE_BASE: &str =
    "https://find-and-update.company-information.service.gov.uk/company";

#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    pub per_page: usize,
    pub max_results: usize,
    pub page_delay: Duration,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            per_page: 100,
            max_results: 100,
            page_delay: Duration::from_millis(200),
        }
    }
}

impl SearchLimits {
    pub fn from_registry(config: &RegistryConfig) -> Self {
        Self {
            per_page: config.per_page,
            max_results: config.max_results,
            page_delay: Duration::from_millis(config.page_delay_ms),
        }
    }
}

/// 搜尋管線：分頁抓公司 → 逐筆補最年輕董事 → 留下 60 歲以上的。
/// 每次搜尋自帶累積狀態，同時跑多個互不干擾。
pub struct SearchPipeline<P: PageSource, D: DirectorSource> {
    pages: P,
    directors: D,
    limits: SearchLimits,
}

impl SearchPipeline<PageFetcher, DirectorResolver> {
    /// 接上真正的註冊局 API
    pub fn over_registry(config: RegistryConfig) -> Result<Self> {
        let client = config.client()?;
        let limits = SearchLimits::from_registry(&config);
        Ok(Self::new(
            PageFetcher::new(client.clone(), config.clone()),
            DirectorResolver::new(client, config),
            limits,
        ))
    }
}

impl<P: PageSource, D: DirectorSource> SearchPipeline<P, D> {
    pub fn new(pages: P, directors: D, limits: SearchLimits) -> Self {
        Self {
            pages,
            directors,
            limits,
        }
    }

    pub async fn search(&self, term: &str) -> Result<SearchResponse> {
        if term.is_empty() {
            return Err(ScoutError::MissingSearchTerm);
        }

        // 第一頁決定總筆數；抓不到就當查無結果
        let first = match self.pages.fetch_page(term, 0).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("First page fetch failed for '{}': {}", term, e);
                return Err(ScoutError::NoCompaniesFound);
            }
        };

        if first.total_results == 0 {
            return Err(ScoutError::NoCompaniesFound);
        }

        let total_results = first.total_results;
        let target = total_results.min(self.limits.max_results);
        let mut companies = first.companies;
        let mut start_index = 0;

        tracing::info!(
            "Search '{}': {} total matches, collecting up to {}",
            term,
            total_results,
            target
        );

        while companies.len() < target {
            start_index += self.limits.per_page;
            if start_index >= total_results {
                break;
            }

            // 單頁失敗只記 log，當作貢獻零筆繼續跑
            match self.pages.fetch_page(term, start_index).await {
                Ok(page) => {
                    if !page.companies.is_empty() {
                        tracing::debug!(
                            "Adding {} companies from index {}",
                            page.companies.len(),
                            start_index
                        );
                        companies.extend(page.companies);
                    }
                }
                Err(e) => {
                    tracing::warn!("Page fetch at index {} failed: {}", start_index, e);
                }
            }

            // 對上游的禮貌性限速，固定等滿再抓下一頁
            sleep(self.limits.page_delay).await;
        }

        if companies.is_empty() {
            return Err(ScoutError::NoCompaniesFound);
        }

        tracing::info!("Resolving directors for {} companies", companies.len());

        // 逐筆序列查董事，這一段不加延遲
        let mut results = Vec::new();
        for company in &companies {
            let number = company.str_field("company_number");
            let info = self.directors.youngest_director(&number).await;

            // 沒有董事資料的公司直接剔除，不會以「非高齡」身分出現
            let Some(age) = info.age else { continue };

            results.push(CompanyResult {
                name: company.str_field("title"),
                number: number.clone(),
                status: company.str_field("company_status"),
                address: company.str_field("address.address_line_1"),
                postcode: company.str_field("address.postal_code"),
                link: format!("{}/{}", COMPANY_PROFILE_BASE, number),
                director_name: info.name,
                age,
                is_elderly: age >= 60,
            });
        }

        let elderly: Vec<CompanyResult> = results.into_iter().filter(|r| r.is_elderly).collect();

        tracing::info!(
            "Search '{}' done: {} elderly-director companies of {} matches",
            term,
            elderly.len(),
            total_results
        );

        Ok(SearchResponse {
            total_returned: elderly.len(),
            total_found: total_results,
            results: elderly,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CompanyPage, DirectorInfo, Record};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn company(number: &str, title: &str) -> Record {
        let mut data = HashMap::new();
        data.insert("title".to_string(), serde_json::json!(title));
        data.insert("company_number".to_string(), serde_json::json!(number));
        data.insert("company_status".to_string(), serde_json::json!("active"));
        data.insert(
            "address.address_line_1".to_string(),
            serde_json::json!("1 High St"),
        );
        data.insert(
            "address.postal_code".to_string(),
            serde_json::json!("AB1 2CD"),
        );
        Record { data }
    }

    /// 照腳本回頁面，並記錄抓了哪些 offset
    struct ScriptedPages {
        total_results: usize,
        pages: HashMap<usize, Result<Vec<Record>>>,
        fetched: Mutex<Vec<usize>>,
    }

    impl ScriptedPages {
        fn new(total_results: usize) -> Self {
            Self {
                total_results,
                pages: HashMap::new(),
                fetched: Mutex::new(Vec::new()),
            }
        }

        fn page(mut self, start_index: usize, companies: Vec<Record>) -> Self {
            self.pages.insert(start_index, Ok(companies));
            self
        }

        fn failing_page(mut self, start_index: usize) -> Self {
            self.pages.insert(
                start_index,
                Err(ScoutError::RegistryStatusError {
                    status: 500,
                    context: format!("search page at index {}", start_index),
                }),
            );
            self
        }

        fn fetched_offsets(&self) -> Vec<usize> {
            self.fetched.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageSource for ScriptedPages {
        async fn fetch_page(&self, _term: &str, start_index: usize) -> Result<CompanyPage> {
            self.fetched.lock().unwrap().push(start_index);
            match self.pages.get(&start_index) {
                Some(Ok(companies)) => Ok(CompanyPage {
                    companies: companies.clone(),
                    total_results: self.total_results,
                }),
                Some(Err(_)) => Err(ScoutError::RegistryStatusError {
                    status: 500,
                    context: format!("search page at index {}", start_index),
                }),
                None => Ok(CompanyPage {
                    companies: Vec::new(),
                    total_results: self.total_results,
                }),
            }
        }
    }

    /// 依公司編號回固定年齡；沒列到的回 unknown
    struct FixedAges {
        ages: HashMap<String, (Option<String>, Option<i32>)>,
        calls: Mutex<Vec<String>>,
    }

    impl FixedAges {
        fn new() -> Self {
            Self {
                ages: HashMap::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn with(mut self, number: &str, name: &str, age: i32) -> Self {
            self.ages
                .insert(number.to_string(), (Some(name.to_string()), Some(age)));
            self
        }

        fn with_unknown(mut self, number: &str) -> Self {
            self.ages.insert(number.to_string(), (None, None));
            self
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl DirectorSource for FixedAges {
        async fn youngest_director(&self, company_number: &str) -> DirectorInfo {
            self.calls.lock().unwrap().push(company_number.to_string());
            match self.ages.get(company_number) {
                Some((name, age)) => DirectorInfo {
                    name: name.clone(),
                    age: *age,
                },
                None => DirectorInfo::unknown(),
            }
        }
    }

    fn quick_limits() -> SearchLimits {
        SearchLimits {
            per_page: 100,
            max_results: 100,
            page_delay: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn test_empty_term_makes_no_calls() {
        let pages = ScriptedPages::new(10);
        let directors = FixedAges::new();
        let pipeline = SearchPipeline::new(pages, directors, quick_limits());

        let result = pipeline.search("").await;

        assert!(matches!(result, Err(ScoutError::MissingSearchTerm)));
        assert!(pipeline.pages.fetched_offsets().is_empty());
        assert_eq!(pipeline.directors.call_count(), 0);
    }

    #[tokio::test]
    async fn test_zero_total_results_is_not_found() {
        let pages = ScriptedPages::new(0).page(0, vec![]);
        let directors = FixedAges::new();
        let pipeline = SearchPipeline::new(pages, directors, quick_limits());

        let result = pipeline.search("Financial Advi").await;

        assert!(matches!(result, Err(ScoutError::NoCompaniesFound)));
        // 一毛錢的 officer 查詢都不該發生
        assert_eq!(pipeline.directors.call_count(), 0);
    }

    #[tokio::test]
    async fn test_first_page_failure_is_not_found() {
        let pages = ScriptedPages::new(50).failing_page(0);
        let directors = FixedAges::new();
        let pipeline = SearchPipeline::new(pages, directors, quick_limits());

        let result = pipeline.search("Financial Advi").await;

        assert!(matches!(result, Err(ScoutError::NoCompaniesFound)));
        assert_eq!(pipeline.directors.call_count(), 0);
    }

    #[tokio::test]
    async fn test_single_page_elderly_filter() {
        // 三間公司：45 歲、61 歲、查無董事 → 只回 61 歲那間
        let pages = ScriptedPages::new(3).page(
            0,
            vec![
                company("1", "YOUNG LTD"),
                company("2", "ELDER LTD"),
                company("3", "MYSTERY LTD"),
            ],
        );
        let directors = FixedAges::new()
            .with("1", "YOUNG, Amy", 45)
            .with("2", "ELDER, Bob", 61)
            .with_unknown("3");
        let pipeline = SearchPipeline::new(pages, directors, quick_limits());

        let response = pipeline.search("Financial Advi").await.unwrap();

        assert_eq!(response.results.len(), 1);
        assert_eq!(response.total_found, 3);
        assert_eq!(response.total_returned, 1);

        let hit = &response.results[0];
        assert_eq!(hit.name, "ELDER LTD");
        assert_eq!(hit.number, "2");
        assert_eq!(hit.age, 61);
        assert!(hit.is_elderly);
        assert_eq!(hit.director_name.as_deref(), Some("ELDER, Bob"));
        assert_eq!(hit.link, format!("{}/2", COMPANY_PROFILE_BASE));
        assert_eq!(hit.address, "1 High St");
        assert_eq!(hit.postcode, "AB1 2CD");
    }

    #[tokio::test]
    async fn test_age_sixty_is_the_cutoff() {
        let pages = ScriptedPages::new(2).page(0, vec![company("1", "AT 60"), company("2", "AT 59")]);
        let directors = FixedAges::new()
            .with("1", "SIXTY, Carl", 60)
            .with("2", "FIFTYNINE, Dee", 59);
        let pipeline = SearchPipeline::new(pages, directors, quick_limits());

        let response = pipeline.search("Financial Advi").await.unwrap();

        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].age, 60);
        assert!(response.results.iter().all(|r| r.age >= 60));
    }

    #[tokio::test]
    async fn test_cap_stops_paging_at_hundred() {
        // 250 筆符合、第一頁就湊不滿 → 抓 offset 0 和 100，到 100 筆封頂，不碰 offset 200
        let page0: Vec<Record> = (0..98).map(|i| company(&format!("a{}", i), "A LTD")).collect();
        let page100: Vec<Record> = (0..100).map(|i| company(&format!("b{}", i), "B LTD")).collect();
        let pages = ScriptedPages::new(250).page(0, page0).page(100, page100);
        let directors = FixedAges::new();
        let pipeline = SearchPipeline::new(pages, directors, quick_limits());

        // 所有公司都查不到董事 → 結果為空，但分頁行為已可驗證
        let response = pipeline.search("Financial Advi").await.unwrap();

        assert_eq!(pipeline.pages.fetched_offsets(), vec![0, 100]);
        assert_eq!(response.total_found, 250);
        assert_eq!(response.total_returned, 0);
        assert!(response.results.is_empty());
        // 198 間都有查過董事
        assert_eq!(pipeline.directors.call_count(), 198);
    }

    #[tokio::test]
    async fn test_offset_beyond_total_stops_loop() {
        // 總共 150 筆，第二頁後 offset 200 >= 150 → 不再抓
        let page0: Vec<Record> = (0..60).map(|i| company(&format!("a{}", i), "A LTD")).collect();
        let page100: Vec<Record> = (0..30).map(|i| company(&format!("b{}", i), "B LTD")).collect();
        let pages = ScriptedPages::new(150).page(0, page0).page(100, page100);
        let directors = FixedAges::new();
        let pipeline = SearchPipeline::new(pages, directors, quick_limits());

        pipeline.search("Financial Advi").await.unwrap();

        assert_eq!(pipeline.pages.fetched_offsets(), vec![0, 100]);
    }

    #[tokio::test]
    async fn test_failed_page_contributes_nothing_but_run_continues() {
        let page0: Vec<Record> = (0..40).map(|i| company(&format!("a{}", i), "A LTD")).collect();
        let pages = ScriptedPages::new(300)
            .page(0, page0)
            .failing_page(100)
            .page(200, vec![company("ok", "OK LTD")]);
        let directors = FixedAges::new().with("ok", "ELDER, Eva", 70);
        let pipeline = SearchPipeline::new(pages, directors, quick_limits());

        let response = pipeline.search("Financial Advi").await.unwrap();

        // 壞掉的那頁跳過，後面照抓
        assert_eq!(pipeline.pages.fetched_offsets(), vec![0, 100, 200]);
        assert_eq!(response.total_returned, 1);
        assert_eq!(response.results[0].number, "ok");
    }

    #[tokio::test]
    async fn test_all_pages_empty_after_first_is_not_found() {
        // 總筆數說有 120，但每頁都過濾到剩零 → 查無結果
        let pages = ScriptedPages::new(120).page(0, vec![]).page(100, vec![]);
        let directors = FixedAges::new();
        let pipeline = SearchPipeline::new(pages, directors, quick_limits());

        let result = pipeline.search("Financial Advi").await;

        assert!(matches!(result, Err(ScoutError::NoCompaniesFound)));
        assert_eq!(pipeline.directors.call_count(), 0);
    }

    #[tokio::test]
    async fn test_no_survivors_is_an_empty_success() {
        // 有公司但全數查不到董事 → 空結果的成功回應，不是 not-found
        let pages = ScriptedPages::new(1).page(0, vec![company("1", "GHOST LTD")]);
        let directors = FixedAges::new().with_unknown("1");
        let pipeline = SearchPipeline::new(pages, directors, quick_limits());

        let response = pipeline.search("Financial Advi").await.unwrap();

        assert!(response.results.is_empty());
        assert_eq!(response.total_found, 1);
        assert_eq!(response.total_returned, 0);
    }

    #[tokio::test]
    async fn test_delay_between_page_fetches() {
        let page0: Vec<Record> = (0..10).map(|i| company(&format!("a{}", i), "A LTD")).collect();
        let page100: Vec<Record> = (0..10).map(|i| company(&format!("b{}", i), "B LTD")).collect();
        let pages = ScriptedPages::new(250).page(0, page0).page(100, page100);
        let directors = FixedAges::new();
        let limits = SearchLimits {
            per_page: 100,
            max_results: 100,
            page_delay: Duration::from_millis(200),
        };
        let pipeline = SearchPipeline::new(pages, directors, limits);

        let started = std::time::Instant::now();
        pipeline.search("Financial Advi").await.unwrap();
        let elapsed = started.elapsed();

        // offset 100 與 200 兩次補抓，各吃一次 200ms 延遲
        assert_eq!(pipeline.pages.fetched_offsets(), vec![0, 100, 200]);
        assert!(
            elapsed >= Duration::from_millis(400),
            "expected at least 400ms of pacing, got {:?}",
            elapsed
        );
    }
}
