//! Máscara de interrupções.
//!
//! Única primitiva de sincronização das estruturas do escalonador: num
//! núcleo só, interrupções desabilitadas dão exclusão mútua completa.
//!
//! Toda seção crítica segue o mesmo padrão:
//!
//! ```text
//! let old = C::intr_disable();
//! ...
//! C::intr_set_status(old);
//! ```
//!
//! Em seções aninhadas a interna restaura o estado que encontrou, nunca
//! reabilita incondicionalmente.

use crate::arch::CpuOps;

/// Estado do flag de interrupções (IF).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntrStatus {
    Off,
    On,
}

impl IntrStatus {
    pub const fn is_on(self) -> bool {
        matches!(self, IntrStatus::On)
    }
}

/// Operações de máscara sobre qualquer CPU.
pub trait InterruptMask: CpuOps {
    /// Estado atual.
    fn intr_get_status() -> IntrStatus {
        if Self::are_interrupts_enabled() {
            IntrStatus::On
        } else {
            IntrStatus::Off
        }
    }

    /// Liga interrupções e devolve o estado anterior.
    fn intr_enable() -> IntrStatus {
        let old = Self::intr_get_status();
        if !old.is_on() {
            Self::enable_interrupts();
        }
        old
    }

    /// Desliga interrupções e devolve o estado anterior.
    fn intr_disable() -> IntrStatus {
        let old = Self::intr_get_status();
        if old.is_on() {
            Self::disable_interrupts();
        }
        old
    }

    /// Restaura um estado capturado antes. Devolve o estado anterior.
    fn intr_set_status(status: IntrStatus) -> IntrStatus {
        match status {
            IntrStatus::On => Self::intr_enable(),
            IntrStatus::Off => Self::intr_disable(),
        }
    }
}

impl<C: CpuOps> InterruptMask for C {}
