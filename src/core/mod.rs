//! Core Module
//!
//! Lógica central do kernel, independente de arquitetura: sequência de
//! boot, logging e relatório de pânico.

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
pub mod entry;
pub mod logging;
pub mod panic;
