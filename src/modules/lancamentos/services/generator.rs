use chrono::{DateTime, Months, TimeZone, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::lancamentos::models::{Lancamento, LancamentoStatus};

/// Validated input for generating one student's installment plan
#[derive(Debug, Clone)]
pub struct PlanInput {
    pub nome: String,
    pub primeiro_vencimento: DateTime<Utc>,
    pub valor_mensalidade: Decimal,
    pub quantidade_parcelas: i32,
    pub status_inicial: LancamentoStatus,
}

/// Generate the installment records for one plan.
///
/// Record `i` (0-indexed) is due `i` calendar months after the first due
/// date, with the day of month preserved and clamped at month end
/// (Jan 31 + 1 month = Feb 28/29), and carries `numeroParcela = i + 1`.
/// Only the first record takes the requested initial status; the rest
/// start out pending.
pub fn generate_plan(input: &PlanInput, now: DateTime<Utc>) -> Result<Vec<Lancamento>> {
    let nome = input.nome.trim();
    if nome.is_empty() {
        return Err(AppError::validation("O nome do aluno é obrigatório."));
    }

    if input.valor_mensalidade < Decimal::ZERO {
        return Err(AppError::validation("Valor da mensalidade inválido."));
    }

    if input.quantidade_parcelas < 1 {
        return Err(AppError::validation("Quantidade de parcelas inválida."));
    }

    let base_date = input.primeiro_vencimento.date_naive();
    let time_of_day = input.primeiro_vencimento.time();

    let mut lancamentos = Vec::with_capacity(input.quantidade_parcelas as usize);
    for i in 0..input.quantidade_parcelas {
        let due_date = base_date
            .checked_add_months(Months::new(i as u32))
            .ok_or_else(|| AppError::validation("A data de vencimento é inválida."))?;
        let vencimento = Utc.from_utc_datetime(&due_date.and_time(time_of_day));

        let status = if i == 0 {
            input.status_inicial
        } else {
            LancamentoStatus::Pending
        };

        lancamentos.push(Lancamento {
            id: None,
            nome: nome.to_string(),
            vencimento,
            valor_mensalidade: input.valor_mensalidade,
            status,
            numero_parcela: i + 1,
            created_at: now,
            updated_at: now,
        });
    }

    info!(
        nome = %nome,
        parcelas = lancamentos.len(),
        "Generated installment plan"
    );

    Ok(lancamentos)
}

/// Parse a due date from a request body.
///
/// Accepts an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC).
pub fn parse_vencimento(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN)));
    }

    Err(AppError::validation(
        "A data de vencimento é inválida ou obrigatória.",
    ))
}
