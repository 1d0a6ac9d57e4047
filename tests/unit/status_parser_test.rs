use mensalidades::planilha::{derive_status, CellStatus, CellValue};

fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

#[test]
fn test_dash_means_paid() {
    assert_eq!(derive_status(&text("-")), CellStatus::Paid);
}

#[test]
fn test_ok_means_paid_case_insensitive() {
    assert_eq!(derive_status(&text("OK")), CellStatus::Paid);
    assert_eq!(derive_status(&text("ok")), CellStatus::Paid);
    assert_eq!(derive_status(&text("  pago ok  ")), CellStatus::Paid);
}

#[test]
fn test_negotiation_means_pending() {
    assert_eq!(derive_status(&text("EM NEGOCIAÇÃO")), CellStatus::Pending);
    assert_eq!(derive_status(&text("negociação")), CellStatus::Pending);
}

#[test]
fn test_pendente_exact_means_pending() {
    assert_eq!(derive_status(&text("PENDENTE")), CellStatus::Pending);
    assert_eq!(derive_status(&text("pendente")), CellStatus::Pending);
    // Only the exact word counts for this rule
    assert_eq!(derive_status(&text("pendente?")), CellStatus::Unknown);
}

#[test]
fn test_payment_date_text_means_paid() {
    assert_eq!(derive_status(&text("15/03/24")), CellStatus::Paid);
    assert_eq!(derive_status(&text("01/12/2023")), CellStatus::Paid);
}

#[test]
fn test_excel_serial_means_paid() {
    // 45371 = 2024-03-20
    assert_eq!(derive_status(&CellValue::Number(45371.0)), CellStatus::Paid);
}

#[test]
fn test_small_number_is_unknown() {
    assert_eq!(derive_status(&CellValue::Number(42.0)), CellStatus::Unknown);
}

#[test]
fn test_garbage_is_unknown() {
    assert_eq!(derive_status(&text("xyz")), CellStatus::Unknown);
    assert_eq!(derive_status(&text("32/13/24")), CellStatus::Unknown);
}

#[test]
fn test_rule_precedence_ok_before_date() {
    // "OK 15/03/24" matches the OK rule first; both yield paid, but the
    // precedence is observable for negotiation notes carrying dates.
    assert_eq!(derive_status(&text("OK 15/03/24")), CellStatus::Paid);
    assert_eq!(
        derive_status(&text("NEGOCIAÇÃO 15/03/24")),
        CellStatus::Pending
    );
}
