use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use mensalidades::modules::lancamentos::models::{Lancamento, LancamentoStatus};
use mensalidades::modules::relatorios::services::pdf_renderer::{
    format_data, format_valor, row_fits, ReportRenderer, FIRST_ROW_Y, ROW_HEIGHT,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn lancamento(nome: &str, numero_parcela: i32, valor: Decimal) -> Lancamento {
    let vencimento = Utc.from_utc_datetime(
        &NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_time(NaiveTime::MIN),
    );
    Lancamento {
        id: None,
        nome: nome.to_string(),
        vencimento,
        valor_mensalidade: valor,
        status: LancamentoStatus::Pending,
        numero_parcela,
        created_at: vencimento,
        updated_at: vencimento,
    }
}

#[test]
fn test_valor_has_two_decimal_places() {
    assert_eq!(format_valor(dec!(100)), "R$ 100.00");
    assert_eq!(format_valor(dec!(99.9)), "R$ 99.90");
    assert_eq!(format_valor(dec!(0.125)), "R$ 0.13");
}

#[test]
fn test_data_is_day_month_year() {
    let vencimento = Utc.from_utc_datetime(
        &NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_time(NaiveTime::MIN),
    );
    assert_eq!(format_data(&vencimento), "05/01/2024");
}

#[test]
fn test_rows_per_page_capacity() {
    let mut y = FIRST_ROW_Y;
    let mut rows = 0;
    while row_fits(y) {
        rows += 1;
        y -= ROW_HEIGHT;
    }
    // (297 - 45 - 15) / 6 rows fit between the first baseline and the margin
    assert_eq!(rows, 39);
}

#[test]
fn test_render_produces_a_pdf() {
    let renderer = ReportRenderer::new("does/not/exist.jpg");
    let lancamentos = vec![
        lancamento("Maria Souza", 1, dec!(100)),
        lancamento("João Pedro", 2, dec!(150.50)),
    ];

    let bytes = renderer.render(&lancamentos, Utc::now()).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_render_empty_list() {
    let renderer = ReportRenderer::new("does/not/exist.jpg");
    let bytes = renderer.render(&[], Utc::now()).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_render_many_rows_spills_onto_extra_pages() {
    let renderer = ReportRenderer::new("does/not/exist.jpg");
    let lancamentos: Vec<Lancamento> = (1..=120)
        .map(|i| lancamento("Aluno", i, dec!(100)))
        .collect();

    let few = renderer.render(&lancamentos[..1], Utc::now()).unwrap();
    let many = renderer.render(&lancamentos, Utc::now()).unwrap();
    // Multi-page output carries extra page objects
    assert!(many.len() > few.len());
}
