//! Tipos fundamentais do sistema

/// Process ID
///
/// Único no sistema inteiro, nunca reutilizado. O primeiro PID entregue
/// pelo alocador é 1 (a task de bootstrap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Pid(u32);

impl Pid {
    /// PID da task de bootstrap (`main`)
    pub const BOOTSTRAP: Pid = Pid(1);

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn as_u32(self) -> u32 {
        self.0
    }
}
