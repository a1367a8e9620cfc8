//! PS/2 Keyboard Driver
//!
//! Só a metade de interrupção: o handler da IRQ 1 lê o scancode cru da
//! porta 0x60 e o guarda numa fila limitada. Decodificação fica com quem
//! consome a fila.

use spin::Mutex;

/// Capacidade da fila de scancodes
pub const SCANCODE_QUEUE_LEN: usize = 64;

/// Fila circular de scancodes. Cheia, descarta o que chega.
pub struct ScancodeQueue {
    buf: [u8; SCANCODE_QUEUE_LEN],
    head: usize,
    len: usize,
    dropped: u64,
}

impl ScancodeQueue {
    pub const fn new() -> Self {
        Self {
            buf: [0; SCANCODE_QUEUE_LEN],
            head: 0,
            len: 0,
            dropped: 0,
        }
    }

    /// `false` se a fila estava cheia e o scancode foi descartado.
    pub fn push(&mut self, code: u8) -> bool {
        if self.len == SCANCODE_QUEUE_LEN {
            self.dropped += 1;
            return false;
        }
        let tail = (self.head + self.len) % SCANCODE_QUEUE_LEN;
        self.buf[tail] = code;
        self.len += 1;
        true
    }

    pub fn pop(&mut self) -> Option<u8> {
        if self.len == 0 {
            return None;
        }
        let code = self.buf[self.head];
        self.head = (self.head + 1) % SCANCODE_QUEUE_LEN;
        self.len -= 1;
        Some(code)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl Default for ScancodeQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Fila global. O handler roda com interrupções desabilitadas; quem
/// consome também precisa desabilitar antes de travar.
pub static SCANCODES: Mutex<ScancodeQueue> = Mutex::new(ScancodeQueue::new());

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
pub use self::hw::*;

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
mod hw {
    use super::SCANCODES;
    use crate::arch::x86_64::ports::Port;
    use crate::interrupt::vectors::KEYBOARD_VECTOR;
    use crate::interrupt::TrapFrame;

    const PORT_DATA: u16 = 0x60;

    /// Instala o handler da IRQ 1.
    pub fn init() {
        if crate::interrupt::register_handler(KEYBOARD_VECTOR, keyboard_handler).is_err() {
            crate::kerror!("(KBD) Falha ao registrar handler do teclado");
            return;
        }
        crate::kinfo!("(KBD) Teclado PS/2 pronto");
    }

    /// Próximo scancode recebido, se houver.
    pub fn read_scancode() -> Option<u8> {
        let old = crate::interrupt::disable();
        let code = SCANCODES.lock().pop();
        crate::interrupt::set_status(old);
        code
    }

    fn keyboard_handler(_frame: &mut TrapFrame) {
        // SAFETY: só este handler lê a porta de dados
        let code = unsafe { Port::<u8>::new(PORT_DATA).read() };
        if !SCANCODES.lock().push(code) {
            crate::ktrace!("(KBD) Fila cheia, scancode descartado: ", code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = ScancodeQueue::new();
        assert!(queue.push(0x1E));
        assert!(queue.push(0x9E));
        assert_eq!(queue.pop(), Some(0x1E));
        assert_eq!(queue.pop(), Some(0x9E));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_full_queue_drops() {
        let mut queue = ScancodeQueue::new();
        for i in 0..SCANCODE_QUEUE_LEN {
            assert!(queue.push(i as u8));
        }
        assert!(!queue.push(0xFF));
        assert_eq!(queue.dropped(), 1);
        assert_eq!(queue.len(), SCANCODE_QUEUE_LEN);

        // Depois de esvaziar um, a volta do anel funciona
        assert_eq!(queue.pop(), Some(0));
        assert!(queue.push(0xAA));
        let drained: alloc::vec::Vec<u8> = core::iter::from_fn(|| queue.pop()).collect();
        assert_eq!(drained.len(), SCANCODE_QUEUE_LEN);
        assert_eq!(drained.last(), Some(&0xAA));
    }
}
