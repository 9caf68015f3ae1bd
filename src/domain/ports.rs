use crate::domain::model::{CompanyPage, DirectorInfo, EmailDraft, EmailRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 一頁公司搜尋結果的來源；失敗用 Err 表示，由呼叫端決定怎麼處置
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, term: &str, start_index: usize) -> Result<CompanyPage>;
}

/// 查一間公司最年輕的董事；查詢失敗一律折疊成 DirectorInfo::unknown()
#[async_trait]
pub trait DirectorSource: Send + Sync {
    async fn youngest_director(&self, company_number: &str) -> DirectorInfo;
}

#[async_trait]
pub trait EmailDrafter: Send + Sync {
    async fn draft(&self, request: &EmailRequest) -> Result<EmailDraft>;
}
