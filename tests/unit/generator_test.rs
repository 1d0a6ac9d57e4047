use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use mensalidades::modules::lancamentos::models::LancamentoStatus;
use mensalidades::modules::lancamentos::services::{generate_plan, parse_vencimento, PlanInput};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn input(
    nome: &str,
    ano: i32,
    mes: u32,
    dia: u32,
    valor: Decimal,
    quantidade: i32,
    status: LancamentoStatus,
) -> PlanInput {
    PlanInput {
        nome: nome.to_string(),
        primeiro_vencimento: Utc
            .from_utc_datetime(
                &NaiveDate::from_ymd_opt(ano, mes, dia)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
            ),
        valor_mensalidade: valor,
        quantidade_parcelas: quantidade,
        status_inicial: status,
    }
}

#[test]
fn test_three_installments_from_january() {
    let plan = generate_plan(
        &input("Maria Souza", 2024, 1, 15, dec!(100), 3, LancamentoStatus::Paid),
        Utc::now(),
    )
    .unwrap();

    assert_eq!(plan.len(), 3);

    let dates: Vec<NaiveDate> = plan.iter().map(|l| l.vencimento.date_naive()).collect();
    assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    assert_eq!(dates[1], NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
    assert_eq!(dates[2], NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());

    let numeros: Vec<i32> = plan.iter().map(|l| l.numero_parcela).collect();
    assert_eq!(numeros, vec![1, 2, 3]);

    // Only the first record takes the requested initial status
    assert_eq!(plan[0].status, LancamentoStatus::Paid);
    assert_eq!(plan[1].status, LancamentoStatus::Pending);
    assert_eq!(plan[2].status, LancamentoStatus::Pending);

    assert!(plan.iter().all(|l| l.valor_mensalidade == dec!(100)));
    assert!(plan.iter().all(|l| l.nome == "Maria Souza"));
}

#[test]
fn test_day_clamps_at_month_end() {
    let plan = generate_plan(
        &input("Ana", 2024, 1, 31, dec!(50), 3, LancamentoStatus::Pending),
        Utc::now(),
    )
    .unwrap();

    let dates: Vec<NaiveDate> = plan.iter().map(|l| l.vencimento.date_naive()).collect();
    // 2024 is a leap year
    assert_eq!(dates[1], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    assert_eq!(dates[2], NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
}

#[test]
fn test_year_rollover() {
    let plan = generate_plan(
        &input("Ana", 2023, 11, 10, dec!(50), 4, LancamentoStatus::Pending),
        Utc::now(),
    )
    .unwrap();

    let last = plan.last().unwrap().vencimento.date_naive();
    assert_eq!(last, NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
}

#[test]
fn test_name_is_trimmed() {
    let plan = generate_plan(
        &input("  João Pedro  ", 2024, 1, 1, dec!(10), 1, LancamentoStatus::Pending),
        Utc::now(),
    )
    .unwrap();
    assert_eq!(plan[0].nome, "João Pedro");
}

#[test]
fn test_rejects_blank_name() {
    let result = generate_plan(
        &input("   ", 2024, 1, 1, dec!(10), 1, LancamentoStatus::Pending),
        Utc::now(),
    );
    assert!(result.is_err());
}

#[test]
fn test_rejects_negative_amount() {
    let result = generate_plan(
        &input("Ana", 2024, 1, 1, dec!(-1), 1, LancamentoStatus::Pending),
        Utc::now(),
    );
    assert!(result.is_err());
}

#[test]
fn test_rejects_zero_installments() {
    let result = generate_plan(
        &input("Ana", 2024, 1, 1, dec!(10), 0, LancamentoStatus::Pending),
        Utc::now(),
    );
    assert!(result.is_err());
}

#[test]
fn test_zero_amount_is_allowed() {
    let plan = generate_plan(
        &input("Ana", 2024, 1, 1, dec!(0), 2, LancamentoStatus::Pending),
        Utc::now(),
    );
    assert!(plan.is_ok());
}

#[test]
fn test_parse_vencimento_formats() {
    assert!(parse_vencimento("2024-01-15").is_ok());
    assert!(parse_vencimento("2024-01-15T12:30:00Z").is_ok());
    assert!(parse_vencimento("15/01/2024").is_err());
    assert!(parse_vencimento("not a date").is_err());
}

proptest! {
    /// Numbers always form the sequence 1..=N with no gaps.
    #[test]
    fn prop_installment_numbers_are_sequential(
        quantidade in 1i32..=48,
        dia in 1u32..=28,
    ) {
        let plan = generate_plan(
            &input("Aluno", 2024, 3, dia, dec!(100), quantidade, LancamentoStatus::Pending),
            Utc::now(),
        ).unwrap();

        prop_assert_eq!(plan.len(), quantidade as usize);
        for (i, lancamento) in plan.iter().enumerate() {
            prop_assert_eq!(lancamento.numero_parcela, i as i32 + 1);
        }
    }

    /// Month advances by one per installment (mod 12 with year rollover)
    /// and days 1..=28 are never clamped.
    #[test]
    fn prop_monthly_due_dates(
        mes in 1u32..=12,
        dia in 1u32..=28,
        quantidade in 1i32..=24,
    ) {
        let plan = generate_plan(
            &input("Aluno", 2024, mes, dia, dec!(100), quantidade, LancamentoStatus::Pending),
            Utc::now(),
        ).unwrap();

        for (i, lancamento) in plan.iter().enumerate() {
            let date = lancamento.vencimento.date_naive();
            let expected_month = (mes as usize - 1 + i) % 12 + 1;
            let expected_year = 2024 + ((mes as usize - 1 + i) / 12) as i32;
            prop_assert_eq!(date.month() as usize, expected_month);
            prop_assert_eq!(date.year(), expected_year);
            prop_assert_eq!(date.day(), dia);
        }
    }
}
