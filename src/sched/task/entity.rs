//! Task Control Block

use super::fd::FdTable;
use super::stack::KernelStack;
use super::state::TaskStatus;
use crate::klib::{ListAdapter, ListLink};
use crate::mm::AddressSpace;
use crate::sched::config::TASK_NAME_LEN;
use crate::sys::Pid;

/// Handle estável de uma task na arena do escalonador.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(usize);

impl TaskId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

/// Nome curto, truncado em `TASK_NAME_LEN` bytes.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TaskName {
    bytes: [u8; TASK_NAME_LEN],
    len: u8,
}

impl TaskName {
    pub fn new(name: &str) -> Self {
        let mut bytes = [0u8; TASK_NAME_LEN];
        // Corta em fronteira de caractere
        let mut len = name.len().min(TASK_NAME_LEN);
        while !name.is_char_boundary(len) {
            len -= 1;
        }
        bytes[..len].copy_from_slice(&name.as_bytes()[..len]);
        Self {
            bytes,
            len: len as u8,
        }
    }

    pub fn as_str(&self) -> &str {
        // Sempre cortado em fronteira de caractere
        core::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or("")
    }
}

impl core::fmt::Debug for TaskName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task Control Block
pub struct Task {
    /// ID único
    pub pid: Pid,
    /// Nome (debug)
    pub name: TaskName,
    /// Estado atual
    pub status: TaskStatus,
    /// Tamanho da fatia de tempo, em ticks
    pub priority: u32,
    /// Ticks restantes da fatia atual
    pub ticks: u32,
    /// Ticks em que a task estava rodando, desde a criação
    pub elapsed_ticks: u64,
    /// Stack pointer salvo enquanto a task não roda
    pub kernel_stack_pointer: usize,
    /// Pilha de kernel (canário na base)
    pub stack: KernelStack,
    /// `None` para threads de kernel
    pub aspace: Option<AddressSpace>,
    /// Arquivos abertos
    pub files: FdTable,

    /// Enlace da fila de prontos
    pub(crate) general_link: ListLink,
    /// Enlace do registro de todas as tasks
    pub(crate) all_link: ListLink,
}

impl Task {
    /// TCB novo. Grava o canário na base da pilha.
    pub fn new(pid: Pid, name: &str, priority: u32, stack: KernelStack) -> Self {
        stack.write_canary();
        Self {
            pid,
            name: TaskName::new(name),
            status: TaskStatus::Ready,
            priority,
            ticks: priority,
            elapsed_ticks: 0,
            kernel_stack_pointer: 0,
            stack,
            aspace: None,
            files: FdTable::new(),
            general_link: ListLink::new(),
            all_link: ListLink::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn canary_intact(&self) -> bool {
        self.stack.canary_intact()
    }

    /// Aborta se a pilha estourou sobre o canário.
    pub fn check_canary(&self) {
        assert!(
            self.canary_intact(),
            "(Sched) canario corrompido: pilha estourada"
        );
    }
}

/// Seleciona `general_link` (fila de prontos).
pub struct GeneralLink;

/// Seleciona `all_link` (registro de todas as tasks).
pub struct AllLink;

impl ListAdapter<Task> for GeneralLink {
    fn link(node: &Task) -> &ListLink {
        &node.general_link
    }
    fn link_mut(node: &mut Task) -> &mut ListLink {
        &mut node.general_link
    }
}

impl ListAdapter<Task> for AllLink {
    fn link(node: &Task) -> &ListLink {
        &node.all_link
    }
    fn link_mut(node: &mut Task) -> &mut ListLink {
        &mut node.all_link
    }
}
