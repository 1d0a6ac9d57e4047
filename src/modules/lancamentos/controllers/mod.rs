pub mod lancamento_controller;

pub use lancamento_controller::configure;
