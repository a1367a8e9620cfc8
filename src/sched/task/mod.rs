//! Task management module
//!
//! - `entity`: o TCB, seu handle (`TaskId`) e os adaptadores de lista.
//! - `state`: máquina de estados.
//! - `stack`: pilha de kernel com canário.
//! - `fd`: tabela de arquivos abertos.

pub mod entity;
pub mod fd;
pub mod stack;
pub mod state;

pub use crate::sys::Pid;
pub use entity::{AllLink, GeneralLink, Task, TaskId, TaskName};
pub use fd::FdTable;
pub use stack::KernelStack;
pub use state::TaskStatus;
