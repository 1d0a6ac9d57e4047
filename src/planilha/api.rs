use std::time::Duration;

use crate::core::Result;
use crate::modules::lancamentos::models::{
    CreateLancamentoRequest, LancamentoResponse, LancamentoStatus, ListEnvelope,
    UpdateLancamentoRequest,
};

const PAGE_SIZE: u64 = 200;
const CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin reqwest client for the /api/clientes surface, used by the bulk
/// scripts. One timeout per call, no retries.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(CALL_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// POST one student registration; the server generates the plan.
    pub async fn create_plan(
        &self,
        payload: &CreateLancamentoRequest,
    ) -> Result<Vec<LancamentoResponse>> {
        let response = self
            .http
            .post(&self.base_url)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    /// Fetch every stored installment, walking the paginated listing.
    pub async fn list_all(&self) -> Result<Vec<LancamentoResponse>> {
        let mut all = Vec::new();
        let mut page = 1u64;

        loop {
            let url = format!("{}?page={}&limit={}", self.base_url, page, PAGE_SIZE);
            let envelope: ListEnvelope = self
                .http
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            let fetched = envelope.data.len();
            all.extend(envelope.data);

            if fetched == 0 || all.len() as u64 >= envelope.total_count {
                return Ok(all);
            }
            page += 1;
        }
    }

    /// PUT a status-only partial update.
    pub async fn update_status(&self, id: &str, status: LancamentoStatus) -> Result<()> {
        let payload = UpdateLancamentoRequest {
            status: Some(status),
            ..Default::default()
        };
        self.http
            .put(format!("{}/{}", self.base_url, id))
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.http
            .delete(format!("{}/{}", self.base_url, id))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
