//! Tuition installment tracking backend.
//!
//! Records student billing entries ("lançamentos"), one document per
//! monthly installment, and exposes CRUD plus filtered listing and a PDF
//! report over HTTP. The `planilha` module holds the offline bulk-import
//! and reconciliation scripts.

pub mod config;
pub mod core;
pub mod modules;
pub mod planilha;

// Re-export commonly used types
pub use modules::lancamentos;
pub use modules::relatorios;
