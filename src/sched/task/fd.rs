//! Tabela de arquivos abertos da task.
//!
//! Slots guardam o índice global do arquivo. 0, 1 e 2 (stdin, stdout,
//! stderr) já vêm ocupados; o resto começa vazio.

use crate::sched::config::MAX_FILES_OPEN_PER_PROC;

/// Descritores reservados
pub const STDIN: usize = 0;
pub const STDOUT: usize = 1;
pub const STDERR: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FdTable {
    slots: [Option<u32>; MAX_FILES_OPEN_PER_PROC],
}

impl FdTable {
    pub const fn new() -> Self {
        let mut slots = [None; MAX_FILES_OPEN_PER_PROC];
        slots[STDIN] = Some(STDIN as u32);
        slots[STDOUT] = Some(STDOUT as u32);
        slots[STDERR] = Some(STDERR as u32);
        Self { slots }
    }

    /// Ocupa o menor slot livre. `None` se a tabela estiver cheia.
    pub fn install(&mut self, global_fd: u32) -> Option<usize> {
        let fd = self.slots.iter().position(Option::is_none)?;
        self.slots[fd] = Some(global_fd);
        Some(fd)
    }

    pub fn get(&self, fd: usize) -> Option<u32> {
        self.slots.get(fd).copied().flatten()
    }

    /// Libera um slot e devolve o que estava nele.
    pub fn release(&mut self, fd: usize) -> Option<u32> {
        self.slots.get_mut(fd)?.take()
    }

    pub fn open_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

impl Default for FdTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_slots() {
        let table = FdTable::new();
        assert_eq!(table.get(STDIN), Some(0));
        assert_eq!(table.get(STDOUT), Some(1));
        assert_eq!(table.get(STDERR), Some(2));
        assert_eq!(table.get(3), None);
        assert_eq!(table.open_count(), 3);
    }

    #[test]
    fn test_install_uses_lowest_free_slot() {
        let mut table = FdTable::new();
        assert_eq!(table.install(40), Some(3));
        assert_eq!(table.install(41), Some(4));
        assert_eq!(table.release(3), Some(40));
        assert_eq!(table.install(42), Some(3));
        assert_eq!(table.get(4), Some(41));
    }

    #[test]
    fn test_full_table() {
        let mut table = FdTable::new();
        for i in 0..(MAX_FILES_OPEN_PER_PROC - 3) {
            assert!(table.install(100 + i as u32).is_some());
        }
        assert_eq!(table.install(999), None);
        assert_eq!(table.release(MAX_FILES_OPEN_PER_PROC), None);
    }
}
