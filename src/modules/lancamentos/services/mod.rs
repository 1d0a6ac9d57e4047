pub mod generator;
pub mod lancamento_service;

pub use generator::{generate_plan, parse_vencimento, PlanInput};
pub use lancamento_service::LancamentoService;
