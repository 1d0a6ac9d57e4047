pub mod report_controller;

pub use report_controller::gerar_relatorio_pdf;
