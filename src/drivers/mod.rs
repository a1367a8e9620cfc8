//! # Kernel Driver Layer
//!
//! Só os drivers que o núcleo de multitarefa precisa para bootar.
//!
//! | Driver   | Arquivo       | Papel |
//! |----------|---------------|-------|
//! | Serial   | `serial.rs`   | Logs de kernel (COM1) |
//! | PIC      | `pic.rs`      | 8259 remapeado, máscaras, EOI |
//! | Timer    | `timer.rs`    | PIT 8254, tick do escalonador |
//! | Teclado  | `keyboard.rs` | IRQ 1, fila de scancodes crus |

#[cfg(target_arch = "x86_64")]
pub mod pic; // 8259 PIC - Interrupções legacy
pub mod keyboard; // PS/2 - fila de scancodes
pub mod serial; // UART 16550 - Logs
pub mod timer; // PIT 8254 - Timer do sistema
