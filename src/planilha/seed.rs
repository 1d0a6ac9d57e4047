use std::path::Path;

use chrono::{NaiveDate, Utc};
use futures_util::future::join_all;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::core::{AppError, Result};
use crate::modules::lancamentos::models::{CreateLancamentoRequest, LancamentoStatus};

use super::api::ApiClient;
use super::reader::Planilha;
use super::status::parse_cell_date;

/// Outcome of a bulk seed run
#[derive(Debug, Default)]
pub struct SeedSummary {
    pub created: usize,
    pub failed: usize,
    pub skipped_rows: usize,
}

impl SeedSummary {
    /// Partial failures are reported, never retried; any failure makes the
    /// run as a whole fail.
    pub fn ensure_ok(&self) -> Result<()> {
        if self.failed > 0 {
            return Err(AppError::internal(format!(
                "{} de {} cadastros falharam",
                self.failed,
                self.created + self.failed
            )));
        }
        Ok(())
    }
}

/// Map spreadsheet rows to registration payloads.
///
/// The installment count is the number of `V_…` columns (none at all is
/// fatal). Each student's first due date is the first parseable `V_…`
/// cell; rows without one fall back to `today` with a warning.
pub fn build_payloads(
    planilha: &Planilha,
    valor_mensalidade: Decimal,
    today: NaiveDate,
) -> Result<Vec<CreateLancamentoRequest>> {
    if planilha.vencimento_columns.is_empty() {
        return Err(AppError::spreadsheet(
            "Nenhuma coluna de vencimento (V_MES_ANO) detectada na planilha",
        ));
    }
    let quantidade_parcelas = planilha.vencimento_columns.len() as i32;

    let payloads = planilha
        .rows
        .iter()
        .map(|row| {
            let vencimento = row
                .vencimentos
                .iter()
                .find_map(parse_cell_date)
                .unwrap_or_else(|| {
                    warn!(
                        nome = %row.nome,
                        "Vencimento inicial não encontrado, usando a data de hoje"
                    );
                    today
                });

            CreateLancamentoRequest {
                nome: row.nome.clone(),
                vencimento: vencimento.format("%Y-%m-%d").to_string(),
                valor_mensalidade,
                status: Some(LancamentoStatus::Pending),
                quantidade_parcelas,
            }
        })
        .collect();

    Ok(payloads)
}

/// Bulk-import the spreadsheet: one concurrent POST per student, all
/// in flight at once, per-call failures collected rather than aborting
/// the batch.
pub async fn run(
    api: &ApiClient,
    sheet_path: &Path,
    valor_mensalidade: Decimal,
) -> Result<SeedSummary> {
    let planilha = Planilha::load(sheet_path)?;
    let payloads = build_payloads(&planilha, valor_mensalidade, Utc::now().date_naive())?;

    info!(
        alunos = payloads.len(),
        parcelas_por_aluno = planilha.vencimento_columns.len(),
        "Iniciando cadastro em massa a partir da planilha"
    );

    let results = join_all(payloads.iter().map(|payload| async move {
        api.create_plan(payload)
            .await
            .map_err(|e| (payload.nome.clone(), e))
    }))
    .await;

    let mut summary = SeedSummary {
        skipped_rows: planilha.skipped,
        ..Default::default()
    };
    for result in results {
        match result {
            Ok(_) => summary.created += 1,
            Err((nome, e)) => {
                warn!(nome = %nome, error = %e, "Falha ao cadastrar aluno");
                summary.failed += 1;
            }
        }
    }

    info!(
        created = summary.created,
        failed = summary.failed,
        skipped = summary.skipped_rows,
        "Cadastro em massa concluído"
    );
    Ok(summary)
}
