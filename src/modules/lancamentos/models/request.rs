use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lancamento::LancamentoStatus;

/// Body of `POST /api/clientes`: registers a student and generates the
/// whole installment plan in one batch.
///
/// Serialized by the bulk seed CLI as well, hence both derives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLancamentoRequest {
    pub nome: String,
    /// First due date, RFC 3339 or `YYYY-MM-DD`
    pub vencimento: String,
    #[serde(rename = "valorMensalidade", with = "rust_decimal::serde::float")]
    pub valor_mensalidade: Decimal,
    /// Initial status of the first installment only; defaults to pending
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<LancamentoStatus>,
    #[serde(rename = "quantidadeParcelas")]
    pub quantidade_parcelas: i32,
}

/// Body of `PUT /api/clientes/{id}`: partial update, absent fields are
/// left untouched.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateLancamentoRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vencimento: Option<String>,
    #[serde(
        rename = "valorMensalidade",
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub valor_mensalidade: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<LancamentoStatus>,
    #[serde(rename = "numeroParcela", default, skip_serializing_if = "Option::is_none")]
    pub numero_parcela: Option<i32>,
}
