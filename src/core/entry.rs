//! Entry Point Lógico do Kernel.
//!
//! `kernel_main` é o primeiro código Rust de alto nível, chamado pelo
//! trampolim `_start` do binário já na pilha de boot e com o heap pronto.
//!
//! # Responsabilidades
//! 1. **Orquestração**: Inicializa subsistemas na ordem estrita de
//!    dependência (Serial -> IDT/PIC -> Sched -> Timer/Teclado).
//! 2. **Transição**: Cria as threads de trabalho, habilita interrupções e
//!    vira a thread `main`, que só dorme entre interrupções.

use crate::arch::{Cpu, CpuOps};
use crate::sched::{KernelStack, TaskStatus};
use core::sync::atomic::{AtomicU64, Ordering};

/// F1 (make code, set 1): despeja o estado do escalonador no log
const DUMP_SCANCODE: u8 = 0x3B;

/// Voltas de cada thread de demonstração
static WORKER_ROUNDS: [AtomicU64; 2] = [AtomicU64::new(0), AtomicU64::new(0)];

/// Função principal do Kernel (High-Level). Não retorna.
pub fn kernel_main(boot_stack: KernelStack) -> ! {
    // 1. Logs
    crate::drivers::serial::init();
    crate::kinfo!("Anvil Kernel - Iniciando");

    // 2. IDT + PIC (só timer e teclado abertos)
    crate::interrupt::init();

    // 3. Escalonador: a thread de boot vira `main`
    if let Err(err) = crate::sched::init(boot_stack) {
        crate::kerror!("(Boot) Falha ao iniciar o escalonador:");
        crate::kerror!(err.as_str());
        Cpu::hang();
    }

    // 4. Drivers com handler de interrupção
    if let Err(err) = crate::drivers::timer::init() {
        crate::kerror!(err.as_str());
        Cpu::hang();
    }
    crate::drivers::keyboard::init();

    #[cfg(feature = "self_test")]
    run_self_tests();

    // 5. Threads de trabalho
    spawn_workers();

    // 6. Dar vida ao sistema
    crate::kok!("(Boot) Sistema pronto, habilitando interrupcoes");
    crate::interrupt::enable();
    loop {
        Cpu::halt();
    }
}

#[cfg(feature = "self_test")]
fn run_self_tests() {
    let intr = crate::interrupt::test::run_interrupt_tests();
    let sched = crate::sched::test::run_sched_tests();
    if !(intr.all_passed() && sched.all_passed()) {
        crate::kerror!("(Boot) Self-tests falharam");
        Cpu::hang();
    }
}

fn spawn_workers() {
    let workers: [(&str, u32, crate::arch::ThreadFn, usize); 3] = [
        ("worker_a", 8, counter_thread, 0),
        ("worker_b", 16, counter_thread, 1),
        ("kbd_echo", 4, keyboard_thread, 0),
    ];
    for (name, priority, entry, arg) in workers {
        match crate::sched::thread_start(name, priority, entry, arg) {
            Ok(_) => crate::kdebug!("(Boot) thread criada, prioridade=", priority),
            Err(err) => crate::kerror!(err.as_str()),
        }
    }
}

/// Conta voltas e cede a CPU de vez em quando.
fn counter_thread(slot: usize) {
    loop {
        let rounds = WORKER_ROUNDS[slot].fetch_add(1, Ordering::Relaxed) + 1;
        if rounds % 0x10_0000 == 0 {
            crate::kdebug!("(Demo) voltas=", rounds);
            if let Err(err) = crate::sched::yield_now() {
                crate::kerror!(err.as_str());
            }
        }
    }
}

/// Consome scancodes; sem nada na fila, cede a CPU. F1 despeja as tasks.
fn keyboard_thread(_arg: usize) {
    loop {
        match crate::drivers::keyboard::read_scancode() {
            Some(DUMP_SCANCODE) => {
                crate::kinfo!("(KBD) uptime (s)=", crate::drivers::timer::uptime_seconds());
                crate::sched::dump();
            }
            Some(code) => crate::kinfo!("(KBD) scancode=", code),
            None => {
                if let Err(err) = crate::sched::yield_now() {
                    crate::kerror!(err.as_str());
                    if let Err(err) = crate::sched::block_current(TaskStatus::Hanging) {
                        crate::kerror!(err.as_str());
                    }
                }
            }
        }
    }
}
