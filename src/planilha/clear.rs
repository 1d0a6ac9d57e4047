use futures_util::future::join_all;
use tracing::{info, warn};

use crate::core::{AppError, Result};

use super::api::ApiClient;

/// Outcome of a delete-all run
#[derive(Debug, Default)]
pub struct ClearSummary {
    pub deleted: usize,
    pub failed: usize,
}

impl ClearSummary {
    pub fn ensure_ok(&self) -> Result<()> {
        if self.failed > 0 {
            return Err(AppError::internal(format!(
                "Falha na exclusão de {} de {} lançamentos",
                self.failed,
                self.deleted + self.failed
            )));
        }
        Ok(())
    }
}

/// Delete every stored installment, one independent DELETE per document,
/// all in flight at once. Individual failures are counted, not retried,
/// and do not stop sibling deletes.
pub async fn run(api: &ApiClient) -> Result<ClearSummary> {
    let lancamentos = api.list_all().await?;
    if lancamentos.is_empty() {
        info!("Nenhum lançamento encontrado, coleção já está limpa");
        return Ok(ClearSummary::default());
    }

    info!(total = lancamentos.len(), "Iniciando exclusão em massa");

    let results = join_all(lancamentos.iter().map(|lancamento| async move {
        api.delete(&lancamento.id)
            .await
            .map_err(|e| (lancamento.id.clone(), e))
    }))
    .await;

    let mut summary = ClearSummary::default();
    for result in results {
        match result {
            Ok(()) => summary.deleted += 1,
            Err((id, e)) => {
                warn!(id = %id, error = %e, "Falha ao excluir lançamento");
                summary.failed += 1;
            }
        }
    }

    info!(
        deleted = summary.deleted,
        failed = summary.failed,
        "Exclusão em massa concluída"
    );
    Ok(summary)
}
