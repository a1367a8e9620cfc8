//! # Hardware Abstraction Layer (HAL)
//!
//! Única ponte entre o núcleo de multitarefa e o hardware real.
//!
//! - `traits/`: o que o escalonador e as interrupções exigem da CPU.
//! - `x86_64/`: implementação real (IDT, trampolins, troca de pilha).
//! - `mock`: CPU simulada usada pelos testes de host.
//!
//! O resto do kernel importa `crate::arch::Cpu` e nunca a implementação
//! concreta.

pub mod traits;

// Seleção de Arquitetura: x86_64
#[cfg(target_arch = "x86_64")]
pub mod x86_64;

#[cfg(target_arch = "x86_64")]
pub use self::x86_64::Cpu;

#[cfg(test)]
pub mod mock;

pub use traits::*;
