//! Anvil Kernel Library.
//!
//! Núcleo de multitarefa de um kernel monolítico pequeno: subsistema de
//! interrupções (IDT, PIC, tabela de despacho) e o escalonador preemptivo
//! de threads.
//!
//! Em `cfg(test)` a biblioteca compila com `std` e o escalonador roda contra
//! a CPU simulada de `arch::mock`.

#![cfg_attr(not(test), no_std)]

// Arena de TCBs e pilhas de kernel vêm do heap
extern crate alloc;

// --- Módulos de Baixo Nível (Hardware) ---
pub mod arch; // HAL (CPU, IDT, troca de contexto)
pub mod drivers; // Serial, PIC, PIT, teclado

// --- Módulos Centrais ---
pub mod core; // Boot, logging, panic
pub mod interrupt; // Máscara, vetores, tabela de despacho
pub mod klib; // Lista indexada, framework de testes
pub mod mm; // Páginas de pilha, heap, espaço de endereçamento
pub mod sched; // TCBs, filas, escalonador, idle, PIDs
pub mod sync; // IrqCell
pub mod sys; // Tipos de sistema (Pid)
