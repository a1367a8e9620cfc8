//! # Subsistema de Interrupções
//!
//! - `mask`: enable/disable/get/set do flag de interrupções.
//! - `vectors`: números de vetor e nomes das exceções.
//! - `frame`: layout do trap frame empilhado pelos trampolins.
//! - `dispatch`: tabela vetor -> handler e o handler padrão fatal.
//! - `irq`: linhas do PIC e máscaras.
//!
//! No kernel bare-metal este módulo também guarda a tabela de despacho
//! global e expõe `register_handler` para timer, teclado e afins.

pub mod dispatch;
pub mod frame;
pub mod irq;
pub mod mask;
pub mod vectors;


pub use dispatch::{general_intr_handler, DispatchTable, IntrError, IntrHandler};
pub use frame::TrapFrame;
pub use irq::IrqLines;
pub use mask::{InterruptMask, IntrStatus};

#[cfg(target_os = "none")]
pub use self::kernel::*;

#[cfg(target_os = "none")]
mod kernel {
    use super::dispatch::{DispatchTable, IntrError, IntrHandler};
    use super::frame::TrapFrame;
    use super::irq::IrqLines;
    use super::mask::{InterruptMask, IntrStatus};
    use super::vectors::is_pic_vector;
    use crate::arch::x86_64::idt;
    use crate::arch::Cpu;
    use crate::drivers::pic::PICS;
    use spin::RwLock;

    static DISPATCH: RwLock<DispatchTable<Cpu>> = RwLock::new(DispatchTable::new());

    /// Monta a IDT, remapeia o PIC e deixa só timer e teclado abertos.
    ///
    /// Interrupções continuam desabilitadas na saída.
    pub fn init() {
        let old = disable();
        // SAFETY: boot single-core, interrupções desabilitadas
        unsafe {
            idt::init();
            PICS.lock().init(IrqLines::BOOT);
        }
        set_status(old);
        crate::kinfo!("(IDT) Interrupções configuradas");
    }

    /// Instala o handler de um vetor. O último registro vence.
    pub fn register_handler(vector: usize, handler: IntrHandler) -> Result<(), IntrError> {
        let old = disable();
        let result = DISPATCH.write().register(vector, handler);
        set_status(old);
        result
    }

    /// Abre linhas adicionais do PIC.
    pub fn unmask(lines: IrqLines) {
        let old = disable();
        // SAFETY: o chamador registrou o handler antes de abrir a linha
        unsafe { PICS.lock().unmask(lines) };
        set_status(old);
    }

    /// Chamado pelo caminho comum dos trampolins.
    pub fn dispatch(frame: &mut TrapFrame) {
        let vector = frame.vector();
        if is_pic_vector(vector) {
            // EOI antes do handler: o timer pode trocar de task e só
            // voltar muito depois.
            // SAFETY: vetor veio do PIC
            unsafe { PICS.lock().notify_eoi(vector as u8) };
        }
        let handler = DISPATCH.read().handler(vector);
        match handler {
            Some(handler) => handler(frame),
            None => super::general_intr_handler::<Cpu>(frame),
        }
    }

    pub fn handler(vector: usize) -> Option<IntrHandler> {
        DISPATCH.read().handler(vector)
    }

    pub fn enable() -> IntrStatus {
        Cpu::intr_enable()
    }

    pub fn disable() -> IntrStatus {
        Cpu::intr_disable()
    }

    pub fn get_status() -> IntrStatus {
        Cpu::intr_get_status()
    }

    pub fn set_status(status: IntrStatus) -> IntrStatus {
        Cpu::intr_set_status(status)
    }
}
