use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use mongodb::bson::{doc, Bson, DateTime as BsonDateTime, Document};
use serde::Deserialize;

use crate::core::{AppError, Result};
use crate::modules::lancamentos::models::LancamentoStatus;

/// Query string accepted by the listing and report endpoints.
///
/// `page`/`limit` are ignored by the report endpoint, which always renders
/// every matching row.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub limit: Option<i64>,
    pub nome: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "mesVencimento")]
    pub mes_vencimento: Option<u32>,
    #[serde(rename = "anoVencimento")]
    pub ano_vencimento: Option<i32>,
    #[serde(rename = "dataInicio")]
    pub data_inicio: Option<String>,
    #[serde(rename = "dataFim")]
    pub data_fim: Option<String>,
}

/// Build the MongoDB filter document for a listing/report query.
///
/// An explicit dataInicio+dataFim range takes precedence over the
/// year/month filters; only one of the two branches is ever active.
/// `today` anchors the month-only filter to the current year.
pub fn build_query(query: &ListQuery, today: NaiveDate) -> Result<Document> {
    let mut filter = Document::new();

    if let Some(nome) = query.nome.as_deref().filter(|n| !n.trim().is_empty()) {
        // Case-insensitive substring match, as the listing contract requires
        filter.insert("nome", doc! { "$regex": nome, "$options": "i" });
    }

    if let Some(status) = query.status.as_deref().filter(|s| !s.is_empty()) {
        let status: LancamentoStatus = status
            .parse()
            .map_err(AppError::Validation)?;
        filter.insert("status", status.as_str());
    }

    let range = date_range(query, today)?;
    if let Some((start, end)) = range {
        filter.insert(
            "vencimento",
            doc! {
                "$gte": Bson::DateTime(to_bson_datetime(start)),
                "$lte": Bson::DateTime(to_bson_datetime(end)),
            },
        );
    }

    Ok(filter)
}

/// Resolve the due-date interval selected by the query, if any.
pub fn date_range(
    query: &ListQuery,
    today: NaiveDate,
) -> Result<Option<(DateTime<Utc>, DateTime<Utc>)>> {
    if let (Some(inicio), Some(fim)) = (query.data_inicio.as_deref(), query.data_fim.as_deref()) {
        let start = parse_date(inicio)?;
        let end = parse_date(fim)?;
        return Ok(Some((start_of_day(start), end_of_day(end))));
    }

    match (query.ano_vencimento, query.mes_vencimento) {
        (Some(ano), Some(mes)) => {
            let (start, end) = month_bounds(ano, mes)?;
            Ok(Some((start_of_day(start), end_of_day(end))))
        }
        (Some(ano), None) => {
            let (start, end) = year_bounds(ano)?;
            Ok(Some((start_of_day(start), end_of_day(end))))
        }
        (None, Some(mes)) => {
            let (start, end) = month_bounds(today.year(), mes)?;
            Ok(Some((start_of_day(start), end_of_day(end))))
        }
        (None, None) => Ok(None),
    }
}

/// First and last day of a month
pub fn month_bounds(ano: i32, mes: u32) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(ano, mes, 1)
        .ok_or_else(|| AppError::validation(format!("Mês de vencimento inválido: {}", mes)))?;
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|d| d.checked_sub_days(Days::new(1)))
        .ok_or_else(|| AppError::validation("Intervalo de vencimento inválido"))?;
    Ok((start, end))
}

/// First and last day of a year
pub fn year_bounds(ano: i32) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(ano, 1, 1)
        .ok_or_else(|| AppError::validation(format!("Ano de vencimento inválido: {}", ano)))?;
    let end = NaiveDate::from_ymd_opt(ano, 12, 31)
        .ok_or_else(|| AppError::validation(format!("Ano de vencimento inválido: {}", ano)))?;
    Ok((start, end))
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Data inválida: {}", value)))
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let end = date
        .and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN));
    Utc.from_utc_datetime(&end)
}

fn to_bson_datetime(dt: DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_chrono(dt)
}
