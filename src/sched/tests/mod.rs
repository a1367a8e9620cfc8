//! Testes de host do escalonador contra `MockCpu`.
//!
//! A CPU simulada não troca de pilha: depois de `schedule` o teste segue
//! rodando e passa a fazer o papel da task que acabou de ser despachada.

use super::config::KERNEL_STACK_PAGES;
use super::core::Scheduler;
use super::task::{KernelStack, TaskId, TaskStatus};
use crate::arch::mock::MockCpu;
use crate::arch::CpuOps;
use crate::mm::{HeapPages, PAGE_SIZE};
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::ptr::NonNull;

mod properties;

pub(super) type TestScheduler = Scheduler<MockCpu, HeapPages>;

const BOOT_STACK_SIZE: usize = KERNEL_STACK_PAGES * PAGE_SIZE;

#[repr(C, align(4096))]
struct BootStack([u8; BOOT_STACK_SIZE]);

pub(super) fn idle_entry(_arg: usize) {}

pub(super) fn worker(_arg: usize) {}

/// Pilha de boot que vive até o fim do processo de teste.
pub(super) fn boot_stack() -> KernelStack {
    let mem: &'static mut BootStack = Box::leak(Box::new(BootStack([0; BOOT_STACK_SIZE])));
    let base = NonNull::new(mem.0.as_mut_ptr()).unwrap();
    unsafe { KernelStack::adopt(base, KERNEL_STACK_PAGES) }
}

/// CPU zerada (interrupções desligadas) e escalonador recém-iniciado.
pub(super) fn boot() -> TestScheduler {
    MockCpu::reset();
    Scheduler::init(HeapPages::new(), boot_stack(), idle_entry).unwrap()
}

/// Cria tasks de prioridade `priority` com os nomes dados.
pub(super) fn spawn(sched: &mut TestScheduler, names: &[&str], priority: u32) -> Vec<TaskId> {
    names
        .iter()
        .enumerate()
        .map(|(arg, name)| sched.thread_start(name, priority, worker, arg).unwrap())
        .collect()
}

pub(super) fn status(sched: &TestScheduler, id: TaskId) -> TaskStatus {
    sched.task(id).unwrap().status
}

pub(super) fn main_task(sched: &TestScheduler) -> TaskId {
    sched.find_by_name("main").unwrap()
}
