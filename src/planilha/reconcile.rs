use std::path::Path;

use chrono::{NaiveDate, Utc};
use futures_util::future::join_all;
use tracing::{info, warn};

use crate::core::{AppError, Result};
use crate::modules::lancamentos::models::{LancamentoResponse, LancamentoStatus};

use super::api::ApiClient;
use super::reader::{CellValue, Planilha, SheetRow};
use super::status::{derive_status, CellStatus};

/// One status change the reconciler decided to apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedUpdate {
    pub id: String,
    pub nome: String,
    pub numero_parcela: i32,
    pub from: LancamentoStatus,
    pub to: LancamentoStatus,
}

/// Outcome of a reconciliation run
#[derive(Debug, Default)]
pub struct ReconcileSummary {
    pub planned: usize,
    pub updated: usize,
    pub failed: usize,
}

impl ReconcileSummary {
    pub fn ensure_ok(&self) -> Result<()> {
        if self.failed > 0 {
            return Err(AppError::internal(format!(
                "{} de {} atualizações falharam",
                self.failed, self.planned
            )));
        }
        Ok(())
    }
}

/// Decide which stored installments need a status change.
///
/// For each status cell: derive the candidate status, match the stored
/// installment by exact trimmed name plus the column's 1-based position,
/// and queue an update when the statuses differ. A pending candidate whose
/// stored due date is strictly before `today` is overridden to overdue
/// first. Blank cells are skipped silently; unknown cells, unmatched pairs
/// and ambiguous (duplicate) matches are warned and skipped. Running the
/// plan twice over unchanged data therefore yields nothing the second time.
pub fn plan_updates(
    lancamentos: &[LancamentoResponse],
    rows: &[SheetRow],
    today: NaiveDate,
) -> Vec<PlannedUpdate> {
    let mut updates = Vec::new();

    for row in rows {
        for (index, cell) in row.status.iter().enumerate() {
            let numero_parcela = (index + 1) as i32;

            if matches!(cell, CellValue::Blank) {
                continue;
            }

            let candidate = match derive_status(cell) {
                CellStatus::Paid => LancamentoStatus::Paid,
                CellStatus::Pending => LancamentoStatus::Pending,
                CellStatus::Unknown => {
                    warn!(
                        nome = %row.nome,
                        parcela = numero_parcela,
                        celula = ?cell,
                        "Status desconhecido na planilha, célula ignorada"
                    );
                    continue;
                }
            };

            let matched: Vec<&LancamentoResponse> = lancamentos
                .iter()
                .filter(|l| l.nome.trim() == row.nome && l.numero_parcela == numero_parcela)
                .collect();

            let lancamento = match matched.as_slice() {
                [] => {
                    warn!(
                        nome = %row.nome,
                        parcela = numero_parcela,
                        "Lançamento não encontrado no banco para a linha da planilha"
                    );
                    continue;
                }
                [one] => *one,
                _ => {
                    // Plans carry no identifier beyond the student name, so
                    // duplicate names make the match ambiguous.
                    warn!(
                        nome = %row.nome,
                        parcela = numero_parcela,
                        encontrados = matched.len(),
                        "Mais de um lançamento para o mesmo nome e parcela, célula ignorada"
                    );
                    continue;
                }
            };

            let mut target = candidate;
            if target == LancamentoStatus::Pending && lancamento.vencimento.date_naive() < today {
                target = LancamentoStatus::Overdue;
            }

            if lancamento.status != target {
                updates.push(PlannedUpdate {
                    id: lancamento.id.clone(),
                    nome: row.nome.clone(),
                    numero_parcela,
                    from: lancamento.status,
                    to: target,
                });
            }
        }
    }

    updates
}

/// Reconcile stored statuses against the spreadsheet: fetch everything,
/// plan the changes, then fire one independent PUT per change, all
/// concurrent, failures collected.
pub async fn run(api: &ApiClient, sheet_path: &Path) -> Result<ReconcileSummary> {
    let planilha = Planilha::load(sheet_path)?;
    if planilha.status_columns.is_empty() {
        return Err(AppError::spreadsheet(
            "Nenhuma coluna de status (S_MES_ANO) detectada na planilha",
        ));
    }

    let lancamentos = api.list_all().await?;
    info!(
        lancamentos = lancamentos.len(),
        linhas = planilha.rows.len(),
        "Iniciando reconciliação de status"
    );

    let updates = plan_updates(&lancamentos, &planilha.rows, Utc::now().date_naive());
    let mut summary = ReconcileSummary {
        planned: updates.len(),
        ..Default::default()
    };

    let results = join_all(updates.iter().map(|update| async move {
        api.update_status(&update.id, update.to)
            .await
            .map_err(|e| (update, e))
    }))
    .await;

    for result in results {
        match result {
            Ok(()) => summary.updated += 1,
            Err((update, e)) => {
                warn!(
                    nome = %update.nome,
                    parcela = update.numero_parcela,
                    error = %e,
                    "Falha ao atualizar status"
                );
                summary.failed += 1;
            }
        }
    }

    info!(
        planned = summary.planned,
        updated = summary.updated,
        failed = summary.failed,
        "Reconciliação concluída"
    );
    Ok(summary)
}
