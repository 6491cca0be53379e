use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::error::SyncError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A full overwrite of one range in one spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetUpdate {
    pub spreadsheet_id: String,
    pub range: String,
    pub rows: Vec<Vec<String>>,
    pub access_token: String,
}

/// Writes rows to a remote spreadsheet.
pub trait SheetWriter: Send + Sync {
    fn update_values(&self, update: SheetUpdate) -> BoxFuture<'_, Result<(), SyncError>>;
}

/// Google Sheets v4 `values.update` over HTTP.
#[derive(Debug, Clone)]
pub struct SheetsApiWriter {
    agent: ureq::Agent,
    base_url: String,
}

impl SheetsApiWriter {
    pub const DEFAULT_BASE_URL: &'static str = "https://sheets.googleapis.com/v4";

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        Self {
            agent: config.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn update_url(&self, spreadsheet_id: &str, range: &str) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}?valueInputOption=RAW",
            self.base_url,
            spreadsheet_id,
            range.replace(' ', "%20")
        )
    }

    fn put_blocking(&self, update: &SheetUpdate) -> Result<(), SyncError> {
        let url = self.update_url(&update.spreadsheet_id, &update.range);
        let body = serde_json::json!({
            "range": update.range,
            "majorDimension": "ROWS",
            "values": update.rows,
        });

        let response = self
            .agent
            .put(&url)
            .header("Authorization", format!("Bearer {}", update.access_token))
            .header("Content-Type", "application/json")
            .send(serde_json::to_string(&body)?)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.into_body().read_to_string().unwrap_or_default();
        Err(SyncError::Remote {
            status: status.as_u16(),
            body,
        })
    }
}

impl SheetWriter for SheetsApiWriter {
    fn update_values(&self, update: SheetUpdate) -> BoxFuture<'_, Result<(), SyncError>> {
        Box::pin(async move {
            let writer = self.clone();
            let rows = update.rows.len();
            let spreadsheet_id = update.spreadsheet_id.clone();
            tokio::task::spawn_blocking(move || writer.put_blocking(&update)).await??;
            tracing::debug!(spreadsheet_id = %spreadsheet_id, rows, "spreadsheet range updated");
            Ok(())
        })
    }
}
