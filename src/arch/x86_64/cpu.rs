//! Implementação x86_64 das operações de CPU (HAL).
//!
//! Assembly inline para controle de interrupções e registradores de
//! controle. Assume modo longo em Ring 0.

use crate::arch::traits::cpu::CpuOps;
use core::arch::asm;

/// Bit 9 do RFLAGS: Interrupt Flag
const RFLAGS_IF: u64 = 1 << 9;

pub struct X64Cpu;

/// CPU da plataforma, usada pelo resto do kernel.
pub type Cpu = X64Cpu;

impl X64Cpu {
    /// Seletor de código atual (CS), usado nos gates da IDT.
    pub fn code_selector() -> u16 {
        let cs: u16;
        unsafe {
            asm!("mov {0:x}, cs", out(reg) cs, options(nomem, nostack, preserves_flags));
        }
        cs
    }

    /// Raiz das tabelas de página carregada (CR3).
    pub fn read_cr3() -> u64 {
        let value: u64;
        unsafe {
            asm!("mov {}, cr3", out(reg) value, options(nomem, nostack, preserves_flags));
        }
        value
    }

    /// Troca a raiz das tabelas de página.
    ///
    /// # Safety
    ///
    /// As novas tabelas devem mapear o código e a pilha em execução.
    pub unsafe fn write_cr3(value: u64) {
        asm!("mov cr3, {}", in(reg) value, options(nostack, preserves_flags));
    }

    /// Stack pointer atual.
    #[inline(always)]
    pub fn stack_pointer() -> usize {
        let rsp: usize;
        unsafe {
            asm!("mov {}, rsp", out(reg) rsp, options(nomem, nostack, preserves_flags));
        }
        rsp
    }
}

impl CpuOps for X64Cpu {
    /// HLT até a próxima interrupção.
    #[inline]
    fn halt() {
        unsafe {
            asm!("hlt", options(nomem, nostack, preserves_flags));
        }
    }

    /// `sti; hlt` na mesma sequência (sombra de interrupção do STI).
    #[inline]
    fn enable_and_halt() {
        unsafe {
            asm!("sti", "hlt", options(nomem, nostack));
        }
    }

    /// CLI. Também é barreira de compilador: acessos à memória não cruzam
    /// a fronteira da seção crítica.
    #[inline]
    fn disable_interrupts() {
        unsafe {
            asm!("cli", options(nostack, preserves_flags));
        }
    }

    /// STI. Pode causar preempção imediata.
    #[inline]
    fn enable_interrupts() {
        unsafe {
            asm!("sti", options(nostack, preserves_flags));
        }
    }

    /// Lê RFLAGS.IF.
    #[inline]
    fn are_interrupts_enabled() -> bool {
        let rflags: u64;
        unsafe {
            asm!("pushfq", "pop {}", out(reg) rflags, options(nomem, preserves_flags));
        }
        rflags & RFLAGS_IF != 0
    }

    /// CR2: endereço do último page fault.
    fn fault_address() -> usize {
        let cr2: usize;
        unsafe {
            asm!("mov {}, cr2", out(reg) cr2, options(nomem, nostack, preserves_flags));
        }
        cr2
    }
}
