//! Alocador de PIDs.
//!
//! Contador monotônico atrás de um `spin::Mutex` próprio. O primeiro PID
//! entregue é 1 e nenhum valor volta a ser usado.

use crate::sys::Pid;
use spin::Mutex;

pub struct PidAllocator {
    next: Mutex<u32>,
}

impl PidAllocator {
    pub const fn new() -> Self {
        Self {
            next: Mutex::new(0),
        }
    }

    /// Próximo PID. Incrementa antes de devolver.
    ///
    /// # Panics
    ///
    /// Se o espaço de PIDs acabar.
    pub fn allocate(&self) -> Pid {
        let mut next = self.next.lock();
        *next = next
            .checked_add(1)
            .unwrap_or_else(|| panic!("(PID) espaco de PIDs esgotado"));
        Pid::new(*next)
    }

    /// Último PID entregue (0 se nenhum).
    pub fn last(&self) -> u32 {
        *self.next.lock()
    }
}

impl Default for PidAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use std::sync::Arc;

    #[test]
    fn test_first_pid_is_one_and_increasing() {
        let pids = PidAllocator::new();
        assert_eq!(pids.last(), 0);
        assert_eq!(pids.allocate(), Pid::BOOTSTRAP);
        assert_eq!(pids.allocate().as_u32(), 2);
        assert_eq!(pids.allocate().as_u32(), 3);
        assert_eq!(pids.last(), 3);
    }

    #[test]
    fn test_concurrent_allocation_is_unique() {
        let pids = Arc::new(PidAllocator::new());
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let pids = Arc::clone(&pids);
                std::thread::spawn(move || {
                    let got: Vec<u32> = (0..250).map(|_| pids.allocate().as_u32()).collect();
                    // Cada thread vê a sua sequência estritamente crescente
                    assert!(got.windows(2).all(|w| w[0] < w[1]));
                    got
                })
            })
            .collect();

        let mut all: Vec<u32> = workers
            .into_iter()
            .flat_map(|w| w.join().unwrap())
            .collect();
        all.sort_unstable();
        let expected: Vec<u32> = (1..=1000).collect();
        assert_eq!(all, expected);
    }
}
