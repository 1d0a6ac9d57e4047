use chrono::Utc;
use mongodb::bson::{doc, oid::ObjectId, Bson, DateTime as BsonDateTime, Document};
use mongodb::Database;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::lancamentos::models::{
    build_query, CreateLancamentoRequest, Lancamento, ListQuery, UpdateLancamentoRequest,
};
use crate::modules::lancamentos::repositories::LancamentoRepository;
use crate::modules::lancamentos::services::generator::{self, PlanInput};

const DEFAULT_PAGE_SIZE: i64 = 10;

/// Orchestrates installment operations on top of the repository
pub struct LancamentoService {
    repo: LancamentoRepository,
}

impl LancamentoService {
    pub fn new(db: &Database) -> Self {
        Self {
            repo: LancamentoRepository::new(db),
        }
    }

    /// Validate the registration request, generate the plan, and insert it
    /// as one batch.
    pub async fn create_plan(&self, request: CreateLancamentoRequest) -> Result<Vec<Lancamento>> {
        let vencimento = generator::parse_vencimento(&request.vencimento)?;
        let input = PlanInput {
            nome: request.nome,
            primeiro_vencimento: vencimento,
            valor_mensalidade: request.valor_mensalidade,
            quantidade_parcelas: request.quantidade_parcelas,
            status_inicial: request.status.unwrap_or_default(),
        };

        let plan = generator::generate_plan(&input, Utc::now())?;
        let inserted = self.repo.insert_batch(plan).await?;

        info!(
            nome = %input.nome,
            parcelas = inserted.len(),
            "Installment plan inserted"
        );
        Ok(inserted)
    }

    /// One page of matching installments plus the total match count.
    ///
    /// The page fetch and the count run concurrently, mirroring the
    /// listing contract.
    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<Lancamento>, u64)> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
        let skip = (page - 1) * limit as u64;

        let filter = build_query(query, Utc::now().date_naive())?;
        let (data, total_count) = tokio::try_join!(
            self.repo.find_page(filter.clone(), skip, limit),
            self.repo.count(filter),
        )?;

        Ok((data, total_count))
    }

    /// Every matching installment, unpaginated, for the PDF report
    pub async fn list_for_report(&self, query: &ListQuery) -> Result<Vec<Lancamento>> {
        let filter = build_query(query, Utc::now().date_naive())?;
        self.repo.find_all(filter).await
    }

    pub async fn get(&self, id: &str) -> Result<Lancamento> {
        let id = parse_id(id)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Lançamento não encontrado."))
    }

    /// Partial update; only provided fields change, `updatedAt` always does.
    pub async fn update(&self, id: &str, request: UpdateLancamentoRequest) -> Result<Lancamento> {
        let id = parse_id(id)?;
        let set = build_update_document(&request)?;

        self.repo
            .update(id, set)
            .await?
            .ok_or_else(|| AppError::not_found("Lançamento não encontrado para atualização."))
    }

    pub async fn delete(&self, id: &str) -> Result<Lancamento> {
        let id = parse_id(id)?;
        self.repo
            .delete(id)
            .await?
            .ok_or_else(|| AppError::not_found("Lançamento não encontrado para exclusão."))
    }
}

fn parse_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::validation("ID de lançamento inválido."))
}

fn build_update_document(request: &UpdateLancamentoRequest) -> Result<Document> {
    let mut set = Document::new();

    if let Some(nome) = &request.nome {
        let nome = nome.trim();
        if nome.is_empty() {
            return Err(AppError::validation("O nome do aluno é obrigatório."));
        }
        set.insert("nome", nome);
    }

    if let Some(vencimento) = &request.vencimento {
        let parsed = generator::parse_vencimento(vencimento)?;
        set.insert("vencimento", Bson::DateTime(BsonDateTime::from_chrono(parsed)));
    }

    if let Some(valor) = request.valor_mensalidade {
        if valor < Decimal::ZERO {
            return Err(AppError::validation("Valor da mensalidade inválido."));
        }
        let valor = valor
            .to_f64()
            .ok_or_else(|| AppError::validation("Valor da mensalidade inválido."))?;
        set.insert("valorMensalidade", valor);
    }

    if let Some(status) = request.status {
        set.insert("status", status.as_str());
    }

    if let Some(numero) = request.numero_parcela {
        if numero < 1 {
            return Err(AppError::validation("Número de parcela inválido."));
        }
        set.insert("numeroParcela", numero);
    }

    set.insert(
        "updatedAt",
        Bson::DateTime(BsonDateTime::from_chrono(Utc::now())),
    );

    Ok(set)
}
