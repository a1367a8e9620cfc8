//! Interface Abstrata de CPU (HAL).
//! Define as operações que qualquer arquitetura deve implementar.

pub trait CpuOps {
    /// Para a execução da CPU até a próxima interrupção (instrução HLT).
    fn halt();

    /// Desabilita interrupções globalmente (CLI).
    fn disable_interrupts();

    /// Habilita interrupções globalmente (STI).
    fn enable_interrupts();

    /// Verifica se as interrupções estão habilitadas.
    fn are_interrupts_enabled() -> bool;

    /// Habilita interrupções e para a CPU sem janela entre as duas.
    ///
    /// No x86 `sti; hlt` juntos: a interrupção que chega logo depois do
    /// STI só é aceita após o HLT, e então o acorda.
    fn enable_and_halt() {
        Self::enable_interrupts();
        Self::halt();
    }

    /// Endereço linear que provocou o último page fault (CR2 no x86).
    fn fault_address() -> usize;

    /// Entra em loop infinito de halt com interrupções desabilitadas.
    /// Usado em pânicos e exceções irrecuperáveis.
    fn hang() -> ! {
        Self::disable_interrupts();
        loop {
            Self::halt();
        }
    }
}
