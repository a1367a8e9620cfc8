//! Panic Handler.
//!
//! O "Airbag" do sistema. O `#[panic_handler]` do binário chama `report`
//! e depois trava a CPU.
//!
//! # Comportamento
//! 1. Desabilita interrupções (evita loop de panics).
//! 2. Loga local e mensagem na Serial, sem `core::fmt`.

use crate::arch::CpuOps;
use core::panic::PanicInfo;

/// Loga o pânico. Quem chama decide como parar.
pub fn report<C: CpuOps>(info: &PanicInfo) {
    // 1. Segurança imediata: parar interrupções
    C::disable_interrupts();

    // 2. Log estruturado (Serial é o mais confiável aqui)
    crate::kerror!("================ KERNEL PANIC ================");

    match info.location() {
        Some(location) => {
            crate::kerror!("Location: ");
            crate::kerror!(location.file());
            crate::kerror!("Line: ", location.line());
        }
        None => crate::kerror!("Location: Unknown"),
    }

    // Só mensagens literais; as formatadas ficam sem texto
    match info.message().as_str() {
        Some(reason) => crate::kerror!(reason),
        None => crate::kerror!("Reason: (mensagem formatada)"),
    }
    crate::kerror!("==============================================");
}
