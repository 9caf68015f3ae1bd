use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 扁平化後的公司記錄：dot-joined key → 原始 JSON 值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

impl Record {
    /// 以字串形式取出欄位，缺漏或非純量時回空字串
    pub fn str_field(&self, key: &str) -> String {
        match self.data.get(key) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }
}

/// 一頁搜尋結果（已過濾為 active 公司）加上註冊局回報的總筆數
#[derive(Debug, Clone)]
pub struct CompanyPage {
    pub companies: Vec<Record>,
    pub total_results: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OfficerList {
    #[serde(default)]
    pub items: Vec<Officer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Officer {
    pub name: Option<String>,
    pub officer_role: Option<String>,
    pub date_of_birth: Option<DateOfBirth>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateOfBirth {
    pub year: Option<i32>,
}

/// 一間公司最年輕的董事；沒有可用出生年份時兩欄皆為 None
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorInfo {
    pub name: Option<String>,
    pub age: Option<i32>,
}

impl DirectorInfo {
    pub fn unknown() -> Self {
        Self {
            name: None,
            age: None,
        }
    }
}

/// 對外輸出的單筆結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyResult {
    pub name: String,
    pub number: String,
    pub status: String,
    pub address: String,
    pub postcode: String,
    pub link: String,
    pub director_name: Option<String>,
    pub age: i32,
    pub is_elderly: bool,
}

/// total_found 是註冊局回報的符合總數，不是實際回傳筆數
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<CompanyResult>,
    pub total_found: usize,
    pub total_returned: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
    pub tokens_used: u64,
}

/// 草擬招募信所需的公司／董事欄位
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailRequest {
    pub company_name: String,
    pub company_number: Option<String>,
    pub director_name: Option<String>,
    pub director_age: Option<i32>,
    pub address: Option<String>,
    pub custom_instructions: Option<String>,
}
