//! Ciclo de vida das threads: criação, bloqueio, desbloqueio e yield.
//!
//! `block` é o único ponto de suspensão: a task que o chama não executa
//! mais nada até alguém chamar `unblock` nela. Não há timeout nem
//! cancelamento.

use super::scheduler::Scheduler;
use crate::arch::{Arch, ThreadFn};
use crate::interrupt::mask::InterruptMask;
use crate::mm::PageAllocator;
use crate::sched::config::KERNEL_STACK_PAGES;
use crate::sched::error::SchedError;
use crate::sched::task::{KernelStack, Task, TaskId, TaskStatus};

impl<A: Arch, P: PageAllocator> Scheduler<A, P> {
    /// Cria uma thread de kernel e a põe no fim da fila de prontos.
    ///
    /// No primeiro despacho a thread liga as interrupções e chama
    /// `entry(arg)`. `priority` é o tamanho da fatia em ticks.
    pub fn thread_start(
        &mut self,
        name: &str,
        priority: u32,
        entry: ThreadFn,
        arg: usize,
    ) -> Result<TaskId, SchedError> {
        if priority == 0 {
            return Err(SchedError::InvalidPriority);
        }

        let stack = KernelStack::allocate(&mut self.pages, KERNEL_STACK_PAGES)?;
        if self.tasks.try_reserve(1).is_err() {
            // SAFETY: a pilha acabou de sair deste alocador e não foi usada
            unsafe { stack.release(&mut self.pages) };
            return Err(SchedError::OutOfMemory);
        }

        let pid = self.pids.allocate();
        let mut task = Task::new(pid, name, priority, stack);
        // SAFETY: pilha nova, exclusiva desta task
        task.kernel_stack_pointer =
            unsafe { A::build_initial_frame(task.stack.top(), entry, arg) };

        let old = A::intr_disable();
        let id = TaskId::new(self.tasks.len());
        self.tasks.push(task);
        assert!(
            !self.ready.contains(&self.tasks, id.index()),
            "(Sched) thread_start: task nova ja esta na fila de prontos"
        );
        assert!(
            !self.all.contains(&self.tasks, id.index()),
            "(Sched) thread_start: task nova ja esta no registro"
        );
        self.ready.append(&mut self.tasks, id.index());
        self.all.append(&mut self.tasks, id.index());
        A::intr_set_status(old);

        crate::ktrace!("(Sched) thread_start: pid=", pid.as_u32());
        Ok(id)
    }

    /// Suspende a task corrente em `status` e despacha outra.
    ///
    /// Retorna quando alguém desbloquear a task, com o estado de
    /// interrupções de antes restaurado.
    pub fn block(&mut self, status: TaskStatus) -> Result<(), SchedError> {
        if !status.is_blocked() {
            return Err(SchedError::InvalidBlockStatus(status));
        }

        let old = A::intr_disable();
        let cur = self.current.index();
        self.tasks[cur].status = status;
        self.schedule();
        A::intr_set_status(old);
        Ok(())
    }

    /// Acorda uma task bloqueada pondo-a na *cabeça* da fila.
    ///
    /// Pode ser chamado de handlers de interrupção.
    pub fn unblock(&mut self, id: TaskId) -> Result<(), SchedError> {
        let index = id.index();
        if index >= self.tasks.len() {
            return Err(SchedError::UnknownTask);
        }

        let old = A::intr_disable();
        let status = self.tasks[index].status;
        if !status.is_blocked() {
            A::intr_set_status(old);
            return Err(SchedError::NotBlocked(status));
        }

        assert!(
            !self.ready.contains(&self.tasks, index),
            "(Sched) unblock: task bloqueada esta na fila de prontos"
        );
        self.ready.push(&mut self.tasks, index);
        self.tasks[index].status = TaskStatus::Ready;
        A::intr_set_status(old);
        Ok(())
    }

    /// Cede a CPU: a task corrente vai para o fim da fila.
    pub fn yield_now(&mut self) {
        let old = A::intr_disable();
        let cur = self.current.index();
        assert!(
            !self.ready.contains(&self.tasks, cur),
            "(Sched) yield: task corrente ja esta na fila de prontos"
        );
        self.ready.append(&mut self.tasks, cur);
        self.tasks[cur].status = TaskStatus::Ready;
        self.schedule();
        A::intr_set_status(old);
    }
}
