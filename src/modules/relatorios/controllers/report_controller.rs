use actix_web::{web, HttpResponse};
use chrono::Utc;
use mongodb::Database;
use tracing::info;

use crate::config::ReportConfig;
use crate::core::Result;
use crate::modules::lancamentos::models::ListQuery;
use crate::modules::lancamentos::services::LancamentoService;
use crate::modules::relatorios::services::ReportRenderer;

/// GET /api/clientes/relatorio/pdf
///
/// Renders every installment matching the listing filters as a PDF.
/// Pagination parameters are ignored; the report is always complete.
pub async fn gerar_relatorio_pdf(
    db: web::Data<Database>,
    report_config: web::Data<ReportConfig>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let service = LancamentoService::new(db.get_ref());
    let lancamentos = service.list_for_report(&query).await?;

    info!(rows = lancamentos.len(), "Rendering installment report");

    let renderer = ReportRenderer::new(report_config.logo_path.clone());
    let bytes = renderer.render(&lancamentos, Utc::now())?;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"relatorio_lancamentos.pdf\"",
        ))
        .body(bytes))
}
