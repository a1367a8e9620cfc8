//! Troca de contexto entre threads de kernel.
//!
//! O contexto salvo de uma thread é só o seu stack pointer: os
//! registradores callee-saved (SysV ABI) ficam empilhados na própria pilha
//! da thread, logo acima do endereço de retorno.
//!
//! Layout a partir do stack pointer salvo:
//! `r15, r14, r13, r12, rbx, rbp, rip`

use super::cpu::X64Cpu;
use crate::arch::traits::{ContextOps, CpuOps, ThreadFn};
use crate::interrupt::TrapFrame;
use crate::klib::align_down;
use crate::mm::AddressSpace;
use core::mem::size_of;
use core::sync::atomic::{AtomicU64, Ordering};

extern "C" {
    fn context_switch_asm(save: *mut usize, load: usize);
    fn thread_entry_trampoline();
}

// RDI = onde salvar o rsp atual, RSI = rsp a carregar
core::arch::global_asm!(
    r#"
.global context_switch_asm
context_switch_asm:
    push rbp
    push rbx
    push r12
    push r13
    push r14
    push r15

    mov [rdi], rsp

    // --- Switch Point ---
    mov rsp, rsi

    pop r15
    pop r14
    pop r13
    pop r12
    pop rbx
    pop rbp
    ret

// Primeira execução de uma thread: r12 = entry, r13 = arg
.global thread_entry_trampoline
thread_entry_trampoline:
    mov rdi, r12
    mov rsi, r13
    call {kernel_thread}
    ud2
"#,
    kernel_thread = sym kernel_thread,
);

/// Frame que `context_switch_asm` desempilha na primeira troca para uma
/// thread nova.
#[repr(C)]
struct ThreadFrame {
    _align: u64,
    r15: u64,
    r14: u64,
    r13: u64,
    r12: u64,
    rbx: u64,
    rbp: u64,
    rip: u64,
}

/// Corpo comum de toda thread de kernel.
///
/// Interrupções chegam desabilitadas (herdadas do `schedule` de quem
/// trocou para cá) e são ligadas antes da função da thread.
extern "C" fn kernel_thread(entry_addr: usize, arg: usize) -> ! {
    // SAFETY: `build_initial_frame` guardou aqui um `ThreadFn`
    let entry: ThreadFn = unsafe { core::mem::transmute::<usize, ThreadFn>(entry_addr) };
    X64Cpu::enable_interrupts();
    entry(arg);
    crate::sched::park_returned_thread()
}

/// Raiz das tabelas de página do kernel, capturada no primeiro uso.
static KERNEL_ROOT: AtomicU64 = AtomicU64::new(0);

fn kernel_root() -> u64 {
    let root = KERNEL_ROOT.load(Ordering::Relaxed);
    if root != 0 {
        return root;
    }
    let root = X64Cpu::read_cr3();
    KERNEL_ROOT.store(root, Ordering::Relaxed);
    root
}

impl ContextOps for X64Cpu {
    unsafe fn switch_stacks(save: *mut usize, load: usize) {
        context_switch_asm(save, load);
    }

    unsafe fn build_initial_frame(stack_top: usize, entry: ThreadFn, arg: usize) -> usize {
        // Deixa espaço para um TrapFrame e folga acima do frame inicial
        let base = align_down(stack_top - size_of::<TrapFrame>() - 64, 16);
        let frame = base as *mut ThreadFrame;
        frame.write(ThreadFrame {
            _align: 0,
            r15: 0,
            r14: 0,
            r13: arg as u64,
            r12: entry as usize as u64,
            rbx: 0,
            rbp: 0,
            rip: thread_entry_trampoline as usize as u64,
        });
        base + size_of::<u64>()
    }

    unsafe fn activate_address_space(aspace: Option<AddressSpace>) {
        // Primeira chamada ainda roda nas tabelas do boot
        let kernel = kernel_root();
        let root = aspace.map_or(kernel, AddressSpace::root);
        if X64Cpu::read_cr3() != root {
            X64Cpu::write_cr3(root);
        }
    }
}
