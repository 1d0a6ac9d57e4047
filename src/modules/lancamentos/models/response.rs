use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lancamento::{Lancamento, LancamentoStatus};

/// JSON representation of an installment as served by the API.
///
/// Also deserialized by the bulk CLI when it reads the API back, so it
/// derives both directions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LancamentoResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub nome: String,
    pub vencimento: DateTime<Utc>,
    #[serde(rename = "valorMensalidade", with = "rust_decimal::serde::float")]
    pub valor_mensalidade: Decimal,
    pub status: LancamentoStatus,
    #[serde(rename = "numeroParcela")]
    pub numero_parcela: i32,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<Lancamento> for LancamentoResponse {
    fn from(lancamento: Lancamento) -> Self {
        Self {
            id: lancamento
                .id
                .map(|oid| oid.to_hex())
                .unwrap_or_default(),
            nome: lancamento.nome,
            vencimento: lancamento.vencimento,
            valor_mensalidade: lancamento.valor_mensalidade,
            status: lancamento.status,
            numero_parcela: lancamento.numero_parcela,
            created_at: lancamento.created_at,
            updated_at: lancamento.updated_at,
        }
    }
}

/// Envelope for the paginated listing endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ListEnvelope {
    pub data: Vec<LancamentoResponse>,
    #[serde(rename = "totalCount")]
    pub total_count: u64,
}
