//! Tabela de despacho: vetor -> handler.
//!
//! Qualquer subsistema registra seu handler com `register`; o último
//! registro para um vetor vence. Não há remoção. Vetores sem handler caem
//! em `general_intr_handler`, que imprime o diagnóstico e para a máquina.

use super::frame::TrapFrame;
use super::vectors::{exception_name, is_spurious, IDT_DESC_CNT, PAGE_FAULT_VECTOR};
use crate::arch::CpuOps;
use core::marker::PhantomData;

/// Handler de interrupção. Roda com interrupções desabilitadas.
pub type IntrHandler = fn(&mut TrapFrame);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntrError {
    /// Vetor fora da IDT (>= 0x81).
    VectorOutOfRange,
}

impl IntrError {
    pub const fn as_str(&self) -> &'static str {
        match self {
            IntrError::VectorOutOfRange => "vetor fora da IDT",
        }
    }
}

pub struct DispatchTable<C: CpuOps> {
    handlers: [IntrHandler; IDT_DESC_CNT],
    _cpu: PhantomData<C>,
}

impl<C: CpuOps> DispatchTable<C> {
    /// Tabela com todos os vetores apontando para o handler padrão.
    pub const fn new() -> Self {
        Self {
            handlers: [general_intr_handler::<C> as IntrHandler; IDT_DESC_CNT],
            _cpu: PhantomData,
        }
    }

    /// Instala `handler` no vetor. Substitui o anterior.
    pub fn register(&mut self, vector: usize, handler: IntrHandler) -> Result<(), IntrError> {
        let slot = self
            .handlers
            .get_mut(vector)
            .ok_or(IntrError::VectorOutOfRange)?;
        *slot = handler;
        crate::ktrace!("(IDT) Handler registrado no vetor ", vector);
        Ok(())
    }

    /// Handler atual do vetor.
    pub fn handler(&self, vector: usize) -> Option<IntrHandler> {
        self.handlers.get(vector).copied()
    }

    /// O vetor ainda usa o handler padrão.
    pub fn is_default(&self, vector: usize) -> bool {
        self.handler(vector)
            .map(|h| h as usize == general_intr_handler::<C> as IntrHandler as usize)
            .unwrap_or(false)
    }

    /// Chama o handler do vetor do frame.
    pub fn dispatch(&self, frame: &mut TrapFrame) {
        let handler = self
            .handler(frame.vector())
            .unwrap_or(general_intr_handler::<C> as IntrHandler);
        handler(frame);
    }
}

impl<C: CpuOps> Default for DispatchTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handler padrão: diagnóstico e parada definitiva.
///
/// IRQ7/IRQ15 espúrias são ignoradas. Qualquer outro vetor sem dono é
/// tratado como falha fatal.
pub fn general_intr_handler<C: CpuOps>(frame: &mut TrapFrame) {
    let vector = frame.vector();
    if is_spurious(vector) {
        return;
    }

    crate::kerror!("!!!!!!!      exception message begin  !!!!!!!!");
    crate::kerror!(exception_name(vector));
    crate::kerror!("(IDT) vetor=", vector);
    crate::kerror!("(IDT) rip=", frame.rip);
    crate::kerror!("(IDT) error_code=", frame.error_code);
    if vector == PAGE_FAULT_VECTOR {
        crate::kerror!("page fault addr is ", C::fault_address());
    }
    crate::kerror!("!!!!!!!      exception message end    !!!!!!!!");

    C::hang()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch::mock::MockCpu;
    use crate::interrupt::vectors::{KEYBOARD_VECTOR, SYSCALL_VECTOR, TIMER_VECTOR};

    fn mark_rax_1(frame: &mut TrapFrame) {
        frame.rax = 1;
    }

    fn mark_rax_2(frame: &mut TrapFrame) {
        frame.rax = 2;
    }

    #[test]
    fn test_registered_handler_receives_frame() {
        MockCpu::reset();
        let mut table: DispatchTable<MockCpu> = DispatchTable::new();
        table.register(TIMER_VECTOR, mark_rax_1).unwrap();

        let mut frame = TrapFrame::for_vector(TIMER_VECTOR);
        table.dispatch(&mut frame);
        assert_eq!(frame.rax, 1);
        assert!(!table.is_default(TIMER_VECTOR));
        assert!(table.is_default(KEYBOARD_VECTOR));
    }

    #[test]
    fn test_last_writer_wins() {
        MockCpu::reset();
        let mut table: DispatchTable<MockCpu> = DispatchTable::new();
        table.register(KEYBOARD_VECTOR, mark_rax_1).unwrap();
        table.register(KEYBOARD_VECTOR, mark_rax_2).unwrap();

        let mut frame = TrapFrame::for_vector(KEYBOARD_VECTOR);
        table.dispatch(&mut frame);
        assert_eq!(frame.rax, 2);
    }

    #[test]
    fn test_register_out_of_range() {
        let mut table: DispatchTable<MockCpu> = DispatchTable::new();
        assert_eq!(
            table.register(SYSCALL_VECTOR + 1, mark_rax_1),
            Err(IntrError::VectorOutOfRange)
        );
        assert!(table.register(SYSCALL_VECTOR, mark_rax_1).is_ok());
    }

    #[test]
    fn test_spurious_irq_is_ignored() {
        MockCpu::reset();
        let table: DispatchTable<MockCpu> = DispatchTable::new();
        let mut frame = TrapFrame::for_vector(0x27);
        table.dispatch(&mut frame);
        let mut frame = TrapFrame::for_vector(0x2F);
        table.dispatch(&mut frame);
    }

    #[test]
    #[should_panic(expected = "cpu parada")]
    fn test_unregistered_vector_halts() {
        MockCpu::reset();
        let table: DispatchTable<MockCpu> = DispatchTable::new();
        let mut frame = TrapFrame::for_vector(13);
        table.dispatch(&mut frame);
    }

    #[test]
    #[should_panic(expected = "cpu parada")]
    fn test_page_fault_reads_fault_address_then_halts() {
        MockCpu::reset();
        MockCpu::set_fault_address(0xDEAD_0000);
        let table: DispatchTable<MockCpu> = DispatchTable::new();
        let mut frame = TrapFrame::for_vector(PAGE_FAULT_VECTOR);
        table.dispatch(&mut frame);
    }
}
