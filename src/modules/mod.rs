pub mod lancamentos;
pub mod relatorios;
