//! Ferramentas de Debug para o Scheduler

use super::scheduler::Scheduler;
use crate::arch::Arch;
use crate::mm::PageAllocator;

impl<A: Arch, P: PageAllocator> Scheduler<A, P> {
    /// Imprime o estado de todas as tarefas conhecidas no sistema
    pub fn dump_tasks(&self) {
        crate::ktrace!("--- [TRACE] GERENCIADOR DE TAREFAS: LISTA COMPLETA ---");
        crate::ktrace!("  - Running PID:", self.current_task().pid.as_u32());
        crate::ktrace!("  - Trocas de contexto:", self.context_switches());

        crate::ktrace!("  - Tasks registradas:", self.task_count());
        for id in self.all_iter() {
            let task = &self.tasks[id.index()];
            crate::ktrace!("    -> PID:", task.pid.as_u32());
            crate::ktrace!(task.name());
            crate::ktrace!(task.status.as_str());
            crate::ktrace!("       prioridade:", task.priority);
            crate::ktrace!("       ticks:", task.elapsed_ticks);
        }

        crate::ktrace!("  - READY Tasks count:", self.ready_len());
        for id in self.ready_iter() {
            crate::ktrace!("    -> PID:", self.tasks[id.index()].pid.as_u32());
        }

        crate::ktrace!("--- [TRACE] FIM DO DUMP ---");
    }
}
