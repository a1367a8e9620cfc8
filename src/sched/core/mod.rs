//! Scheduler principal
//!
//! - `scheduler`: o objeto `Scheduler`, `schedule`, `tick` e consultas.
//! - `lifecycle`: `thread_start`, `block`, `unblock`, `yield_now`.
//! - `idle`: corpo da task idle.
//! - `debug`: `dump_tasks`.

pub mod debug;
pub mod idle;
pub mod lifecycle;
pub mod scheduler;

pub use idle::idle_step;
pub use scheduler::Scheduler;
