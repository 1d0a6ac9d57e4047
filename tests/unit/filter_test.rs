use chrono::{DateTime, NaiveDate, Utc};
use mensalidades::modules::lancamentos::models::filter::{build_query, ListQuery};
use mongodb::bson::Document;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn range_of(filter: &Document) -> (DateTime<Utc>, DateTime<Utc>) {
    let vencimento = filter.get_document("vencimento").unwrap();
    (
        vencimento.get_datetime("$gte").unwrap().to_chrono(),
        vencimento.get_datetime("$lte").unwrap().to_chrono(),
    )
}

#[test]
fn test_empty_query_builds_empty_filter() {
    let filter = build_query(&ListQuery::default(), today()).unwrap();
    assert!(filter.is_empty());
}

#[test]
fn test_name_is_case_insensitive_regex() {
    let query = ListQuery {
        nome: Some("maria".to_string()),
        ..Default::default()
    };
    let filter = build_query(&query, today()).unwrap();
    let nome = filter.get_document("nome").unwrap();
    assert_eq!(nome.get_str("$regex").unwrap(), "maria");
    assert_eq!(nome.get_str("$options").unwrap(), "i");
}

#[test]
fn test_status_exact_match() {
    let query = ListQuery {
        status: Some("pago".to_string()),
        ..Default::default()
    };
    let filter = build_query(&query, today()).unwrap();
    assert_eq!(filter.get_str("status").unwrap(), "pago");
}

#[test]
fn test_invalid_status_is_rejected() {
    let query = ListQuery {
        status: Some("quitado".to_string()),
        ..Default::default()
    };
    assert!(build_query(&query, today()).is_err());
}

#[test]
fn test_year_alone_spans_the_full_year() {
    let query = ListQuery {
        ano_vencimento: Some(2024),
        ..Default::default()
    };
    let filter = build_query(&query, today()).unwrap();
    let (start, end) = range_of(&filter);
    assert_eq!(
        start.date_naive(),
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    );
    assert_eq!(
        end.date_naive(),
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    );
}

#[test]
fn test_year_and_month_narrow_to_one_month() {
    let query = ListQuery {
        ano_vencimento: Some(2024),
        mes_vencimento: Some(3),
        ..Default::default()
    };
    let filter = build_query(&query, today()).unwrap();
    let (start, end) = range_of(&filter);
    assert_eq!(
        start.date_naive(),
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    );
    assert_eq!(
        end.date_naive(),
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
    );
}

#[test]
fn test_month_alone_uses_the_current_year() {
    let query = ListQuery {
        mes_vencimento: Some(2),
        ..Default::default()
    };
    let filter = build_query(&query, today()).unwrap();
    let (start, end) = range_of(&filter);
    // 2024 is a leap year, per the fixed `today`
    assert_eq!(
        start.date_naive(),
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    );
    assert_eq!(
        end.date_naive(),
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    );
}

#[test]
fn test_explicit_range_wins_over_year_month() {
    let query = ListQuery {
        data_inicio: Some("2024-05-10".to_string()),
        data_fim: Some("2024-05-20".to_string()),
        ano_vencimento: Some(2023),
        mes_vencimento: Some(1),
        ..Default::default()
    };
    let filter = build_query(&query, today()).unwrap();
    let (start, end) = range_of(&filter);
    assert_eq!(
        start.date_naive(),
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    );
    assert_eq!(
        end.date_naive(),
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    );
}

#[test]
fn test_range_end_extends_to_end_of_day() {
    let query = ListQuery {
        data_inicio: Some("2024-05-10".to_string()),
        data_fim: Some("2024-05-20".to_string()),
        ..Default::default()
    };
    let filter = build_query(&query, today()).unwrap();
    let (start, end) = range_of(&filter);
    assert_eq!(start.format("%H:%M:%S").to_string(), "00:00:00");
    assert_eq!(end.format("%H:%M:%S").to_string(), "23:59:59");
}

#[test]
fn test_invalid_month_is_rejected() {
    let query = ListQuery {
        ano_vencimento: Some(2024),
        mes_vencimento: Some(13),
        ..Default::default()
    };
    assert!(build_query(&query, today()).is_err());
}

#[test]
fn test_invalid_range_date_is_rejected() {
    let query = ListQuery {
        data_inicio: Some("10/05/2024".to_string()),
        data_fim: Some("2024-05-20".to_string()),
        ..Default::default()
    };
    assert!(build_query(&query, today()).is_err());
}
