use crate::config::registry::RegistryConfig;
use crate::domain::model::{DirectorInfo, Officer, OfficerList};
use crate::domain::ports::DirectorSource;
use crate::utils::error::{Result, ScoutError};
use async_trait::async_trait;
use chrono::{Datelike, Utc};
use reqwest::Client;

/// 從 officer 名單挑出最年輕的董事。
/// 年齡只用出生年份算（current_year - birth_year），同齡取先出現者。
pub fn youngest_director_as_of(officers: &[Officer], current_year: i32) -> DirectorInfo {
    let mut youngest_age: Option<i32> = None;
    let mut youngest_name: Option<String> = None;

    for officer in officers {
        if officer.officer_role.as_deref() != Some("director") {
            continue;
        }
        if let Some(year) = officer.date_of_birth.as_ref().and_then(|dob| dob.year) {
            let age = current_year - year;
            if youngest_age.map_or(true, |min| age < min) {
                youngest_age = Some(age);
                youngest_name = officer.name.clone();
            }
        }
    }

    DirectorInfo {
        name: youngest_name,
        age: youngest_age,
    }
}

/// 查一間公司的 officer 名單並解析最年輕董事。
/// 查詢失敗不往上拋：這一步是 best-effort 補充，失敗折疊成 unknown。
pub struct DirectorResolver {
    client: Client,
    config: RegistryConfig,
}

impl DirectorResolver {
    pub fn new(client: Client, config: RegistryConfig) -> Self {
        Self { client, config }
    }

    async fn fetch_officers(&self, company_number: &str) -> Result<Vec<Officer>> {
        let url = format!("{}/company/{}/officers", self.config.base_url, company_number);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.config.api_key, Some(""))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoutError::RegistryStatusError {
                status: status.as_u16(),
                context: format!("officers of company {}", company_number),
            });
        }

        let list: OfficerList = response.json().await?;
        Ok(list.items)
    }
}

#[async_trait]
impl DirectorSource for DirectorResolver {
    async fn youngest_director(&self, company_number: &str) -> DirectorInfo {
        match self.fetch_officers(company_number).await {
            Ok(officers) => youngest_director_as_of(&officers, Utc::now().year()),
            Err(e) => {
                tracing::warn!("Officer lookup failed for {}: {}", company_number, e);
                DirectorInfo::unknown()
            }
        }
    }
}
