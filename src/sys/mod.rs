//! Definições de sistema.
//!
//! Tipos compartilhados entre o escalonador e quem consome suas tasks.

pub mod types;

pub use types::Pid;
