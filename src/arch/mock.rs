//! CPU simulada para os testes de host.
//!
//! Guarda o flag de interrupções, os halts, as trocas de pilha pedidas e
//! os espaços de endereçamento carregados. Nenhuma troca acontece de fato:
//! `switch_stacks` só registra o par (salvar, carregar) e retorna, então o
//! teste continua rodando na mesma pilha e pode inspecionar o escalonador
//! depois de cada `schedule`.
//!
//! O estado é por thread; cada teste começa com `MockCpu::reset()`.

use super::traits::{ContextOps, CpuOps, ThreadFn};
use crate::interrupt::TrapFrame;
use crate::klib::align_down;
use crate::mm::AddressSpace;
use core::mem::size_of;
use std::cell::RefCell;
use std::vec::Vec;

#[derive(Default)]
struct MockState {
    interrupts: bool,
    halts: usize,
    /// Halts feitos por `enable_and_halt`
    sti_halts: usize,
    fault_address: usize,
    switches: Vec<(usize, usize)>,
    aspaces: Vec<Option<AddressSpace>>,
    frames: Vec<(usize, usize, usize)>,
}

std::thread_local! {
    static STATE: RefCell<MockState> = RefCell::new(MockState::default());
}

fn with_state<R>(f: impl FnOnce(&mut MockState) -> R) -> R {
    STATE.with(|state| f(&mut state.borrow_mut()))
}

pub struct MockCpu;

impl MockCpu {
    /// Estado inicial: interrupções desligadas, nada registrado.
    pub fn reset() {
        with_state(|s| *s = MockState::default());
    }

    pub fn set_interrupts(enabled: bool) {
        with_state(|s| s.interrupts = enabled);
    }

    pub fn set_fault_address(addr: usize) {
        with_state(|s| s.fault_address = addr);
    }

    pub fn halts() -> usize {
        with_state(|s| s.halts)
    }

    pub fn sti_halts() -> usize {
        with_state(|s| s.sti_halts)
    }

    /// Pares (onde salvar, stack pointer carregado), em ordem.
    pub fn switches() -> Vec<(usize, usize)> {
        with_state(|s| s.switches.clone())
    }

    pub fn last_switch() -> Option<(usize, usize)> {
        with_state(|s| s.switches.last().copied())
    }

    pub fn address_space_loads() -> Vec<Option<AddressSpace>> {
        with_state(|s| s.aspaces.clone())
    }

    /// Frames iniciais montados: (stack pointer, entry, arg).
    pub fn frames() -> Vec<(usize, usize, usize)> {
        with_state(|s| s.frames.clone())
    }
}

impl CpuOps for MockCpu {
    fn halt() {
        with_state(|s| s.halts += 1);
    }

    fn disable_interrupts() {
        with_state(|s| s.interrupts = false);
    }

    fn enable_interrupts() {
        with_state(|s| s.interrupts = true);
    }

    fn are_interrupts_enabled() -> bool {
        with_state(|s| s.interrupts)
    }

    fn enable_and_halt() {
        with_state(|s| {
            s.interrupts = true;
            s.halts += 1;
            s.sti_halts += 1;
        });
    }

    fn fault_address() -> usize {
        with_state(|s| s.fault_address)
    }

    fn hang() -> ! {
        Self::disable_interrupts();
        panic!("(MockCpu) cpu parada");
    }
}

impl ContextOps for MockCpu {
    unsafe fn switch_stacks(save: *mut usize, load: usize) {
        with_state(|s| s.switches.push((save as usize, load)));
    }

    unsafe fn build_initial_frame(stack_top: usize, entry: ThreadFn, arg: usize) -> usize {
        let sp = align_down(stack_top - size_of::<TrapFrame>() - 64, 16) + size_of::<u64>();
        // Marca o frame na pilha de verdade para os testes enxergarem
        let slot = sp as *mut usize;
        slot.write(entry as usize);
        slot.add(1).write(arg);
        with_state(|s| s.frames.push((sp, entry as usize, arg)));
        sp
    }

    unsafe fn activate_address_space(aspace: Option<AddressSpace>) {
        with_state(|s| s.aspaces.push(aspace));
    }
}
