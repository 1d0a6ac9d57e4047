use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::warn;

use crate::core::{AppError, Result};

/// Header of the column holding the student name
pub const NOME_COLUMN: &str = "NOME DO ALUNO";

/// Normalized spreadsheet cell. Only text and numbers matter to the
/// import; everything else collapses to blank.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Blank,
    Text(String),
    Number(f64),
}

/// One student row: the name plus the `V_…` (due date) and `S_…` (status)
/// cells in header order.
#[derive(Debug, Clone)]
pub struct SheetRow {
    pub nome: String,
    pub vencimentos: Vec<CellValue>,
    pub status: Vec<CellValue>,
}

/// Parsed first worksheet of the tuition spreadsheet
#[derive(Debug, Clone)]
pub struct Planilha {
    /// Headers matching `V_<MONTH>_<YEAR>`, in order; the count determines
    /// how many installments a seeded plan gets
    pub vencimento_columns: Vec<String>,
    /// Headers matching `S_<MONTH>_<YEAR>`, in order; the 1-based position
    /// is the installment number the column reports on
    pub status_columns: Vec<String>,
    pub rows: Vec<SheetRow>,
    /// Rows dropped at load time (blank names, legend/total lines)
    pub skipped: usize,
}

impl Planilha {
    /// Read the first worksheet of the file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| AppError::spreadsheet(format!("{}: {}", path.display(), e)))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| {
                AppError::spreadsheet(format!("Nenhuma aba encontrada em {}", path.display()))
            })?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| AppError::spreadsheet(format!("{}: {}", path.display(), e)))?;

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .unwrap_or_default()
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let cells: Vec<Vec<CellValue>> = rows
            .map(|row| row.iter().map(to_cell_value).collect())
            .collect();

        Self::from_rows(headers, cells)
    }

    /// Assemble the table from raw headers and cell rows. Split out of
    /// `load` so the header-driven mapping is testable without a file.
    pub fn from_rows(headers: Vec<String>, cells: Vec<Vec<CellValue>>) -> Result<Self> {
        let nome_index = headers
            .iter()
            .position(|h| h == NOME_COLUMN)
            .ok_or_else(|| {
                AppError::spreadsheet(format!("Coluna \"{}\" não encontrada", NOME_COLUMN))
            })?;

        let vencimento_indices: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| is_vencimento_column(h))
            .map(|(i, _)| i)
            .collect();
        let status_indices: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| is_status_column(h))
            .map(|(i, _)| i)
            .collect();

        let mut rows = Vec::with_capacity(cells.len());
        let mut skipped = 0usize;

        for row in &cells {
            let nome = match row.get(nome_index) {
                Some(CellValue::Text(text)) => text.trim().to_string(),
                _ => String::new(),
            };

            if is_ignorable_name(&nome) {
                warn!(nome = %nome, "Linha ignorada (nome vazio ou linha de legenda/total)");
                skipped += 1;
                continue;
            }

            let pick = |indices: &[usize]| -> Vec<CellValue> {
                indices
                    .iter()
                    .map(|&i| row.get(i).cloned().unwrap_or(CellValue::Blank))
                    .collect()
            };

            rows.push(SheetRow {
                nome,
                vencimentos: pick(&vencimento_indices),
                status: pick(&status_indices),
            });
        }

        Ok(Self {
            vencimento_columns: vencimento_indices
                .iter()
                .map(|&i| headers[i].clone())
                .collect(),
            status_columns: status_indices.iter().map(|&i| headers[i].clone()).collect(),
            rows,
            skipped,
        })
    }
}

/// Headers like `V_MAR_23` mark due-date reference columns
fn is_vencimento_column(header: &str) -> bool {
    header.starts_with("V_") && header.len() >= 8
}

/// Headers like `S_MAR_23` mark status columns
fn is_status_column(header: &str) -> bool {
    header.starts_with("S_") && header.len() >= 8
}

/// Blank names and legend/total footer lines carry no student data
pub fn is_ignorable_name(nome: &str) -> bool {
    let cleaned = nome.trim().to_uppercase();
    cleaned.is_empty() || cleaned.contains("LEGENDA") || cleaned.contains("TOTAL")
}

fn to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Blank,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                CellValue::Blank
            } else {
                CellValue::Text(trimmed.to_string())
            }
        }
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::Error(_) => CellValue::Blank,
    }
}
