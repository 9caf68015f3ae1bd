use crate::domain::model::SearchResponse;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, ScoutError};

pub const CSV_FILENAME: &str = "leads.csv";
pub const JSON_FILENAME: &str = "leads.json";

/// 把搜尋結果依指定格式寫進 Storage，回傳實際寫出的檔名
pub async fn write_exports<S: Storage>(
    storage: &S,
    response: &SearchResponse,
    formats: &[String],
) -> Result<Vec<String>> {
    let mut written = Vec::new();

    for format in formats {
        match format.as_str() {
            "csv" => {
                let data = results_to_csv(response)?;
                storage.write_file(CSV_FILENAME, &data).await?;
                written.push(CSV_FILENAME.to_string());
            }
            "json" => {
                let data = serde_json::to_vec_pretty(response)?;
                storage.write_file(JSON_FILENAME, &data).await?;
                written.push(JSON_FILENAME.to_string());
            }
            other => {
                tracing::warn!("🔶 Unsupported output format: {}", other);
            }
        }
    }

    Ok(written)
}

fn results_to_csv(response: &SearchResponse) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for result in &response.results {
        writer.serialize(result)?;
    }

    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| ScoutError::ProcessingError {
            message: format!("CSV buffer error: {}", e),
        })
}
