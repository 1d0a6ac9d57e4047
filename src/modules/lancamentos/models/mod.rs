pub mod filter;
pub mod lancamento;
pub mod request;
pub mod response;

pub use filter::{build_query, ListQuery};
pub use lancamento::{Lancamento, LancamentoStatus, COLLECTION};
pub use request::{CreateLancamentoRequest, UpdateLancamentoRequest};
pub use response::{LancamentoResponse, ListEnvelope};
