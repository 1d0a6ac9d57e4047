// HTTP handlers for installment endpoints
//
// Endpoints:
// - POST   /api/clientes                 - register a student, create the plan
// - GET    /api/clientes                 - paginated, filtered listing
// - GET    /api/clientes/{id}            - fetch a single installment
// - PUT    /api/clientes/{id}            - partial update
// - DELETE /api/clientes/{id}            - delete a single installment
// - GET    /api/clientes/relatorio/pdf   - PDF report (relatorios module)

use actix_web::{web, HttpResponse};
use mongodb::Database;

use crate::core::Result;
use crate::modules::lancamentos::models::{
    CreateLancamentoRequest, LancamentoResponse, ListEnvelope, ListQuery, UpdateLancamentoRequest,
};
use crate::modules::lancamentos::services::LancamentoService;
use crate::modules::relatorios::controllers::gerar_relatorio_pdf;

/// POST /api/clientes
///
/// Generates and inserts the whole installment plan for one student.
///
/// # Returns
/// - 201: array of created installments
/// - 400: validation failure (blank name, bad date, negative amount, count < 1)
pub async fn create_lancamentos(
    db: web::Data<Database>,
    body: web::Json<CreateLancamentoRequest>,
) -> Result<HttpResponse> {
    let service = LancamentoService::new(db.get_ref());
    let created = service.create_plan(body.into_inner()).await?;

    let response: Vec<LancamentoResponse> = created.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Created().json(response))
}

/// GET /api/clientes
///
/// Paginated listing with optional filters; sorted by name, due date,
/// installment number.
///
/// # Query Parameters
/// `page` (default 1), `limit` (default 10), `nome`, `status`,
/// `mesVencimento`, `anoVencimento`, `dataInicio`, `dataFim`
pub async fn list_lancamentos(
    db: web::Data<Database>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let service = LancamentoService::new(db.get_ref());
    let (data, total_count) = service.list(&query).await?;

    let response = ListEnvelope {
        data: data.into_iter().map(Into::into).collect(),
        total_count,
    };
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/clientes/{id}
///
/// # Returns
/// - 200: the installment
/// - 400: malformed id
/// - 404: no such installment
pub async fn get_lancamento(
    db: web::Data<Database>,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    let service = LancamentoService::new(db.get_ref());
    let lancamento = service.get(&id).await?;
    Ok(HttpResponse::Ok().json(LancamentoResponse::from(lancamento)))
}

/// PUT /api/clientes/{id}
///
/// Partial update; absent fields are left untouched.
pub async fn update_lancamento(
    db: web::Data<Database>,
    id: web::Path<String>,
    body: web::Json<UpdateLancamentoRequest>,
) -> Result<HttpResponse> {
    let service = LancamentoService::new(db.get_ref());
    let updated = service.update(&id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LancamentoResponse::from(updated)))
}

/// DELETE /api/clientes/{id}
///
/// Deletes one installment. No cascade: the rest of the plan is untouched.
pub async fn delete_lancamento(
    db: web::Data<Database>,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    let service = LancamentoService::new(db.get_ref());
    service.delete(&id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Lançamento deletado com sucesso!",
    })))
}

/// Register the /api/clientes routes.
///
/// `/relatorio/pdf` must come before `/{id}` so it is not captured as an id.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/clientes")
            .route("", web::post().to(create_lancamentos))
            .route("", web::get().to(list_lancamentos))
            .route("/relatorio/pdf", web::get().to(gerar_relatorio_pdf))
            .route("/{id}", web::get().to(get_lancamento))
            .route("/{id}", web::put().to(update_lancamento))
            .route("/{id}", web::delete().to(delete_lancamento)),
    );
}
