//! # Orquestrador de Agendamento
//!
//! `Scheduler` é o dono de todo o estado de multitarefa: a arena de TCBs,
//! a fila de prontos, o registro de todas as tasks, a task corrente, a
//! idle e o alocador de PIDs. É construído uma vez no boot e nunca
//! destruído no kernel.
//!
//! ## Política
//! Round-robin estrito: a fila de prontos é FIFO e a prioridade só define
//! quantos ticks a task ganha ao ser despachada, nunca a posição na fila.
//!
//! ## Sincronização
//! Todo método que mexe nas filas roda com interrupções desabilitadas. No
//! kernel o objeto mora num `IrqCell`; aqui dentro cada operação ainda
//! salva e restaura o estado de interrupções por conta própria, então
//! chamadas aninhadas são seguras.
//!
//! ## Troca de contexto
//! `schedule` termina chamando `A::switch_stacks`. Depois dessa chamada a
//! thread que chamou só continua quando for despachada de novo, e nesse
//! meio tempo outras threads usam o mesmo `Scheduler`. Por isso nada em
//! `self` é lido depois da troca.

use crate::arch::{Arch, ThreadFn};
use crate::interrupt::mask::InterruptMask;
use crate::klib::IndexList;
use crate::mm::{AddressSpace, PageAllocator};
use crate::sched::config::{IDLE_PRIORITY, MAIN_PRIORITY};
use crate::sched::error::SchedError;
use crate::sched::pid::PidAllocator;
use crate::sched::task::{AllLink, GeneralLink, KernelStack, Task, TaskId, TaskStatus};
use crate::sys::Pid;
use alloc::vec::Vec;
use core::marker::PhantomData;
use core::sync::atomic::{compiler_fence, Ordering};

pub struct Scheduler<A: Arch, P: PageAllocator> {
    /// Arena de TCBs. Índices são estáveis: nada é removido.
    pub(crate) tasks: Vec<Task>,
    /// Fila de prontos (FIFO)
    pub(crate) ready: IndexList<Task, GeneralLink>,
    /// Registro de todas as tasks, em ordem de criação
    pub(crate) all: IndexList<Task, AllLink>,
    pub(crate) current: TaskId,
    pub(crate) idle: TaskId,
    pub(crate) pids: PidAllocator,
    pub(crate) pages: P,
    /// Espaço de endereçamento carregado (`None` = tabelas do kernel)
    active_aspace: Option<AddressSpace>,
    /// Trocas de pilha realizadas
    switches: u64,
    _arch: PhantomData<fn() -> A>,
}

impl<A: Arch, P: PageAllocator> Scheduler<A, P> {
    /// Monta o estado inicial.
    ///
    /// - A thread que está rodando vira `main` (PID 1), adotando
    ///   `boot_stack`. Fica só no registro, em RUNNING.
    /// - `idle` é criada pelo caminho normal e estacionada em HANGING, fora
    ///   da fila: só é acordada quando a fila esvazia.
    pub fn init(pages: P, boot_stack: KernelStack, idle_entry: ThreadFn) -> Result<Self, SchedError> {
        let pids = PidAllocator::new();
        let mut tasks = Vec::new();
        tasks
            .try_reserve(2)
            .map_err(|_| SchedError::OutOfMemory)?;

        let mut main = Task::new(pids.allocate(), "main", MAIN_PRIORITY, boot_stack);
        main.status = TaskStatus::Running;
        tasks.push(main);

        let mut sched = Self {
            tasks,
            ready: IndexList::new(),
            all: IndexList::new(),
            current: TaskId::new(0),
            idle: TaskId::new(0),
            pids,
            pages,
            active_aspace: None,
            switches: 0,
            _arch: PhantomData,
        };
        sched.all.append(&mut sched.tasks, 0);

        let idle = sched.thread_start("idle", IDLE_PRIORITY, idle_entry, 0)?;
        let old = A::intr_disable();
        sched.ready.remove(&mut sched.tasks, idle.index());
        sched.tasks[idle.index()].status = TaskStatus::Hanging;
        A::intr_set_status(old);
        sched.idle = idle;

        crate::kinfo!("(Sched) Escalonador pronto. idle pid=", sched.tasks[idle.index()].pid.as_u32());
        Ok(sched)
    }

    /// Escolhe a próxima task e troca para ela.
    ///
    /// Se a corrente ainda está RUNNING (fatia esgotada) ela volta para o
    /// fim da fila com a fatia recarregada. Qualquer outro estado significa
    /// que o chamador já a tirou de cena (`block`, `yield_now`).
    ///
    /// # Panics
    ///
    /// - Interrupções habilitadas na entrada.
    /// - Canário corrompido na task que sai ou na que entra.
    /// - Fila vazia mesmo depois de acordar a idle.
    pub fn schedule(&mut self) {
        assert!(
            !A::are_interrupts_enabled(),
            "(Sched) schedule chamado com interrupcoes habilitadas"
        );

        let cur = self.current;
        self.tasks[cur.index()].check_canary();

        if self.tasks[cur.index()].status == TaskStatus::Running {
            assert!(
                !self.ready.contains(&self.tasks, cur.index()),
                "(Sched) task corrente ja esta na fila de prontos"
            );
            self.ready.append(&mut self.tasks, cur.index());
            let task = &mut self.tasks[cur.index()];
            task.ticks = task.priority;
            task.status = TaskStatus::Ready;
        }

        if self.ready.is_empty() {
            self.wake_idle();
        }

        let next = match self.ready.pop(&mut self.tasks) {
            Some(index) => TaskId::new(index),
            None => panic!("(Sched) fila de prontos vazia apos acordar a idle"),
        };
        let next_task = &mut self.tasks[next.index()];
        next_task.status = TaskStatus::Running;
        next_task.check_canary();
        let next_aspace = next_task.aspace;
        let load = next_task.kernel_stack_pointer;
        self.current = next;

        if next_aspace != self.active_aspace {
            // SAFETY: handles de espaço de endereçamento sempre mapeiam o kernel
            unsafe { A::activate_address_space(next_aspace) };
            self.active_aspace = next_aspace;
        }

        if next == cur {
            return;
        }
        self.switches += 1;

        let save: *mut usize = &mut self.tasks[cur.index()].kernel_stack_pointer;
        // `current` e `switches` precisam estar na memória antes da troca:
        // quem retoma lê o mesmo `Scheduler` por outro empréstimo
        compiler_fence(Ordering::SeqCst);
        // SAFETY: interrupções desabilitadas; `load` foi salvo por uma troca
        // anterior ou montado por `build_initial_frame`. `save` só é escrito
        // antes de trocar de pilha.
        unsafe { A::switch_stacks(save, load) };
    }

    /// Põe a idle na cabeça da fila.
    fn wake_idle(&mut self) {
        let idle = self.idle.index();
        assert!(
            !self.ready.contains(&self.tasks, idle),
            "(Sched) idle ja esta na fila de prontos"
        );
        self.ready.push(&mut self.tasks, idle);
        self.tasks[idle].status = TaskStatus::Ready;
    }

    /// Contabiliza um tick do timer para a task corrente.
    ///
    /// Chamado pelo handler do timer, com interrupções desabilitadas.
    pub fn tick(&mut self) {
        let task = &mut self.tasks[self.current.index()];
        task.check_canary();
        task.elapsed_ticks += 1;
        if task.ticks == 0 {
            self.schedule();
        } else {
            task.ticks -= 1;
        }
    }

    // --- Consultas ---

    pub fn current(&self) -> TaskId {
        self.current
    }

    pub fn current_task(&self) -> &Task {
        &self.tasks[self.current.index()]
    }

    pub fn idle(&self) -> TaskId {
        self.idle
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id.index())
    }

    /// Fila de prontos, da cabeça para o fim.
    pub fn ready_iter(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.ready.iter(&self.tasks).map(TaskId::new)
    }

    /// Todas as tasks, em ordem de criação.
    pub fn all_iter(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.all.iter(&self.tasks).map(TaskId::new)
    }

    pub fn ready_snapshot(&self) -> Vec<TaskId> {
        self.ready_iter().collect()
    }

    pub fn all_snapshot(&self) -> Vec<TaskId> {
        self.all_iter().collect()
    }

    pub fn ready_len(&self) -> usize {
        self.ready.len()
    }

    pub fn task_count(&self) -> usize {
        self.all.len()
    }

    pub fn is_ready(&self, id: TaskId) -> bool {
        id.index() < self.tasks.len() && self.ready.contains(&self.tasks, id.index())
    }

    /// Primeira task (em ordem de criação) com esse nome.
    pub fn find_by_name(&self, name: &str) -> Option<TaskId> {
        self.all
            .traverse(&self.tasks, |_, task| task.name() == name)
            .map(TaskId::new)
    }

    pub fn find_by_pid(&self, pid: Pid) -> Option<TaskId> {
        self.all
            .traverse(&self.tasks, |_, task| task.pid == pid)
            .map(TaskId::new)
    }

    /// Task dona da pilha que contém `addr`.
    pub fn owner_of_stack(&self, addr: usize) -> Option<TaskId> {
        self.all
            .traverse(&self.tasks, |_, task| task.stack.contains(addr))
            .map(TaskId::new)
    }

    /// Trocas de pilha realizadas desde o boot.
    pub fn context_switches(&self) -> u64 {
        self.switches
    }

    pub fn active_address_space(&self) -> Option<AddressSpace> {
        self.active_aspace
    }

    /// Associa um espaço de endereçamento à task. Vale no próximo despacho.
    pub fn set_address_space(
        &mut self,
        id: TaskId,
        aspace: Option<AddressSpace>,
    ) -> Result<(), SchedError> {
        let task = self
            .tasks
            .get_mut(id.index())
            .ok_or(SchedError::UnknownTask)?;
        task.aspace = aspace;
        Ok(())
    }

    pub fn pids(&self) -> &PidAllocator {
        &self.pids
    }

    pub fn pages(&self) -> &P {
        &self.pages
    }
}

impl<A: Arch, P: PageAllocator> Drop for Scheduler<A, P> {
    fn drop(&mut self) {
        for task in self.tasks.drain(..) {
            // SAFETY: com o escalonador destruído nenhuma task volta a rodar
            unsafe { task.stack.release(&mut self.pages) };
        }
    }
}
