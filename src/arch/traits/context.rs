//! Troca de contexto e espaço de endereçamento.
//!
//! Esta é a única fronteira `unsafe` do escalonador: tudo acima dela
//! (filas, TCBs, máquina de estados) é código seguro.

use super::cpu::CpuOps;
use crate::mm::AddressSpace;

/// Ponto de entrada de uma thread de kernel. Recebe um argumento opaco.
pub type ThreadFn = fn(usize);

pub trait ContextOps {
    /// Salva o stack pointer atual em `*save` e passa a executar na pilha
    /// `load`, retomando o frame salvo lá.
    ///
    /// Só "retorna" quando alguém trocar de volta para a pilha salva.
    ///
    /// # Safety
    ///
    /// - Interrupções desabilitadas.
    /// - `save` aponta para memória gravável.
    /// - `load` é um stack pointer salvo por esta função ou montado por
    ///   `build_initial_frame`.
    unsafe fn switch_stacks(save: *mut usize, load: usize);

    /// Monta na pilha que termina em `stack_top` o frame inicial de uma
    /// thread nova. Ao ser despachada pela primeira vez ela reabilita
    /// interrupções e chama `entry(arg)`.
    ///
    /// Retorna o stack pointer a ser guardado no TCB.
    ///
    /// # Safety
    ///
    /// `stack_top` é o topo de uma pilha válida, exclusiva da thread.
    unsafe fn build_initial_frame(stack_top: usize, entry: ThreadFn, arg: usize) -> usize;

    /// Carrega um espaço de endereçamento. `None` volta às tabelas do kernel.
    ///
    /// # Safety
    ///
    /// O handle deve descrever tabelas de página que mapeiam o kernel.
    unsafe fn activate_address_space(aspace: Option<AddressSpace>);
}

/// Tudo que o escalonador precisa da plataforma.
pub trait Arch: CpuOps + ContextOps {}

impl<T: CpuOps + ContextOps> Arch for T {}
