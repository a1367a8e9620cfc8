//! # Synchronization Primitives
//!
//! O núcleo de multitarefa é single-core. Duas primitivas bastam:
//!
//! ```text
//! IrqCell      → estado do escalonador (interrupções desabilitadas)
//! spin::Mutex  → dados de drivers (PIC, fila do teclado, alocador de PID),
//!                sempre tomados com interrupções desabilitadas
//! ```
//!
//! ## Regras
//!
//! - Nunca segurar um `spin::Mutex` com interrupções habilitadas se um
//!   handler puder tomar o mesmo lock.
//! - Nunca trocar de contexto segurando um `spin::Mutex`.

pub mod irqcell;

pub use irqcell::IrqCell;
