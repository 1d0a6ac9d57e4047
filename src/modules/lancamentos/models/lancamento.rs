use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Collection holding one document per monthly installment
pub const COLLECTION: &str = "lancamentos";

/// One billing record ("lançamento") for one month of a student's plan.
///
/// Serde renames follow the wire/document contract: Portuguese camelCase
/// field names, dates stored as BSON datetimes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lancamento {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Student name, trimmed
    pub nome: String,
    /// Due date
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub vencimento: DateTime<Utc>,
    /// Monthly amount, non-negative
    #[serde(rename = "valorMensalidade", with = "rust_decimal::serde::float")]
    pub valor_mensalidade: Decimal,
    pub status: LancamentoStatus,
    /// 1-based position within the student's installment plan.
    /// Unique per plan by construction only; the store does not enforce it.
    #[serde(rename = "numeroParcela")]
    pub numero_parcela: i32,
    #[serde(rename = "createdAt", with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Payment status of a single installment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LancamentoStatus {
    /// Not yet paid ("pendente")
    #[serde(rename = "pendente")]
    Pending,
    /// Payment received ("pago")
    #[serde(rename = "pago")]
    Paid,
    /// Due date passed without payment ("vencido")
    #[serde(rename = "vencido")]
    Overdue,
}

impl LancamentoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pendente",
            Self::Paid => "pago",
            Self::Overdue => "vencido",
        }
    }
}

impl Default for LancamentoStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl std::fmt::Display for LancamentoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LancamentoStatus {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "pendente" => Ok(Self::Pending),
            "pago" => Ok(Self::Paid),
            "vencido" => Ok(Self::Overdue),
            _ => Err(format!("Status de lançamento inválido: {}", value)),
        }
    }
}
