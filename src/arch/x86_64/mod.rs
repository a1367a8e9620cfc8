//! Implementação x86_64
//!
//! - `cpu`: CLI/STI/HLT, RFLAGS, CR2/CR3.
//! - `ports`: I/O por porta.
//! - `idt`: descritores de gate e a IDT de 0x81 entradas.
//! - `interrupts`: trampolins por vetor e o caminho comum (bare-metal).
//! - `switch`: troca de pilha e frame inicial de threads (bare-metal).

pub mod cpu;
pub mod idt;
pub mod ports;

#[cfg(target_os = "none")]
pub mod interrupts;
#[cfg(target_os = "none")]
pub mod switch;

pub use cpu::{Cpu, X64Cpu};
