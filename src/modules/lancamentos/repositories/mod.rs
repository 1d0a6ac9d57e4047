pub mod lancamento_repository;

pub use lancamento_repository::LancamentoRepository;
