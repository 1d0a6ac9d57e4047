//! Offline bulk scripts driven by the tuition spreadsheet: seed the store
//! from the rows, reconcile stored statuses against the status columns,
//! and clear the collection. All of them talk to the running HTTP API
//! rather than to the database directly.

pub mod api;
pub mod clear;
pub mod reconcile;
pub mod reader;
pub mod seed;
pub mod status;

pub use api::ApiClient;
pub use reader::{CellValue, Planilha, SheetRow};
pub use status::{derive_status, CellStatus};
