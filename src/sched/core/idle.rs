//! Idle Task
//!
//! A idle é uma task comum, criada por `thread_start` e sujeita à mesma
//! máquina de estados. O corpo se estaciona em HANGING; o escalonador só a
//! acorda quando a fila de prontos ficaria vazia. Ao ser despachada ela
//! liga as interrupções e para a CPU até a próxima interrupção, numa
//! única sequência (`enable_and_halt`), sem janela para perder o IRQ que
//! a acordaria.

use super::scheduler::Scheduler;
use crate::arch::Arch;
use crate::mm::PageAllocator;
use crate::sched::task::TaskStatus;
use crate::sync::IrqCell;

/// Uma volta do laço da idle.
pub fn idle_step<A: Arch, P: PageAllocator>(sched: &IrqCell<Scheduler<A, P>, A>) {
    if let Err(err) = sched.with(|s| s.block(TaskStatus::Hanging)) {
        crate::kerror!(err.as_str());
    }
    A::enable_and_halt();
}
