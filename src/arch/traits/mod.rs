//! Traits do Hardware Abstraction Layer (HAL).
//! Interfaces que o escalonador e o subsistema de interrupções usam para
//! falar com o hardware (ou com a CPU simulada dos testes).

pub mod context;
pub mod cpu;

pub use context::{Arch, ContextOps, ThreadFn};
pub use cpu::CpuOps;
