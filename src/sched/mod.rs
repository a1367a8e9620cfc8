//! # Multitasking & Scheduler Subsystem
//!
//! Transforma a CPU única em várias threads de kernel intercaladas.
//!
//! ## Propósito e Responsabilidade
//! - **Abstração de Tarefa:** o TCB (`task::Task`), sua pilha com canário e
//!   sua máquina de estados.
//! - **Filas:** fila de prontos FIFO e registro de todas as tasks, ambas
//!   listas indexadas sobre a arena de TCBs.
//! - **Política:** round-robin; a prioridade só define o tamanho da fatia.
//! - **Troca de Contexto:** atrás de `arch::ContextOps`, a única fronteira
//!   `unsafe` do subsistema.
//!
//! ## Arquitetura: Cooperative + Preemptive
//! 1. **Preemptivo:** o timer (IRQ 0) chama `on_timer_tick`, que despacha
//!    outra task quando a fatia acaba.
//! 2. **Cooperativo:** tasks cedem a CPU com `yield_now` ou se suspendem
//!    com `block_current`.
//!
//! ## Ciclo de vida
//! Não há término de threads. TCBs e pilhas vivem até o desligamento; uma
//! thread cuja função retorna fica estacionada em HANGING para sempre.

pub mod config;
pub mod core;
pub mod error;
pub mod pid;
pub mod task;

#[cfg(all(feature = "self_test", target_os = "none"))]
pub mod test;

#[cfg(test)]
mod tests;

pub use self::core::{idle_step, Scheduler};
pub use error::SchedError;
pub use pid::PidAllocator;
pub use task::{KernelStack, Task, TaskId, TaskStatus};

#[cfg(target_os = "none")]
pub use self::kernel::*;

#[cfg(target_os = "none")]
mod kernel {
    use super::core::{idle_step, Scheduler};
    use super::error::SchedError;
    use super::task::{KernelStack, TaskId, TaskStatus};
    use crate::arch::{Cpu, CpuOps, ThreadFn};
    use crate::mm::HeapPages;
    use crate::sync::IrqCell;
    use crate::sys::Pid;
    use spin::Once;

    type KernelScheduler = Scheduler<Cpu, HeapPages>;

    static SCHEDULER: Once<IrqCell<KernelScheduler, Cpu>> = Once::new();

    fn scheduler() -> Result<&'static IrqCell<KernelScheduler, Cpu>, SchedError> {
        SCHEDULER.get().ok_or(SchedError::NotInitialized)
    }

    /// Adota a thread de boot como `main` e cria a idle.
    pub fn init(boot_stack: KernelStack) -> Result<(), SchedError> {
        if SCHEDULER.is_completed() {
            return Err(SchedError::AlreadyInitialized);
        }
        let sched = Scheduler::init(HeapPages::new(), boot_stack, idle_thread)?;
        SCHEDULER.call_once(|| IrqCell::new(sched));
        Ok(())
    }

    pub fn thread_start(
        name: &str,
        priority: u32,
        entry: ThreadFn,
        arg: usize,
    ) -> Result<TaskId, SchedError> {
        scheduler()?.with(|s| s.thread_start(name, priority, entry, arg))
    }

    /// Suspende a thread corrente até alguém chamar `unblock` nela.
    pub fn block_current(status: TaskStatus) -> Result<(), SchedError> {
        scheduler()?.with(|s| s.block(status))
    }

    pub fn unblock(id: TaskId) -> Result<(), SchedError> {
        scheduler()?.with(|s| s.unblock(id))
    }

    pub fn yield_now() -> Result<(), SchedError> {
        scheduler()?.with(|s| s.yield_now());
        Ok(())
    }

    pub fn current() -> Result<TaskId, SchedError> {
        Ok(scheduler()?.with(|s| s.current()))
    }

    pub fn current_pid() -> Result<Pid, SchedError> {
        Ok(scheduler()?.with(|s| s.current_task().pid))
    }

    /// Task dona da pilha que contém `addr`.
    pub fn owner_of_stack(addr: usize) -> Result<Option<TaskId>, SchedError> {
        Ok(scheduler()?.with(|s| s.owner_of_stack(addr)))
    }

    /// Último PID entregue pelo alocador do escalonador.
    pub fn last_pid() -> Result<u32, SchedError> {
        Ok(scheduler()?.with(|s| s.pids().last()))
    }

    pub fn pid_of(id: TaskId) -> Result<Pid, SchedError> {
        scheduler()?.with(|s| s.task(id).map(|t| t.pid).ok_or(SchedError::UnknownTask))
    }

    pub fn find_by_name(name: &str) -> Result<Option<TaskId>, SchedError> {
        Ok(scheduler()?.with(|s| s.find_by_name(name)))
    }

    /// Verifica o canário da thread corrente.
    pub fn current_canary_intact() -> Result<bool, SchedError> {
        Ok(scheduler()?.with(|s| s.current_task().canary_intact()))
    }

    pub fn context_switches() -> Result<u64, SchedError> {
        Ok(scheduler()?.with(|s| s.context_switches()))
    }

    /// Chamado pelo handler do timer a cada tick.
    pub fn on_timer_tick() {
        if let Some(sched) = SCHEDULER.get() {
            sched.with(|s| s.tick());
        }
    }

    pub fn dump() {
        if let Some(sched) = SCHEDULER.get() {
            sched.with(|s| s.dump_tasks());
        }
    }

    /// Destino de uma thread cuja função de entrada retornou.
    pub fn park_returned_thread() -> ! {
        crate::kwarn!("(Sched) thread retornou da entrada; estacionando");
        loop {
            if block_current(TaskStatus::Hanging).is_err() {
                Cpu::hang();
            }
        }
    }

    fn idle_thread(_arg: usize) {
        crate::kinfo!("(Idle) Idle task iniciada");
        loop {
            match SCHEDULER.get() {
                Some(sched) => idle_step(sched),
                None => Cpu::hang(),
            }
        }
    }
}
