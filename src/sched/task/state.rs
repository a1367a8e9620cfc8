//! Estados de task

/// Estado de uma task
///
/// Exatamente uma task está `Running` por vez (núcleo único).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Executando na CPU
    Running,
    /// Na fila de prontos
    Ready,
    /// Bloqueada esperando algo
    Blocked,
    /// Esperando um evento (ex: filho, I/O)
    Waiting,
    /// Estacionada até alguém acordá-la explicitamente
    Hanging,
}

impl TaskStatus {
    /// Um dos três estados aceitos por `block`/`unblock`.
    pub const fn is_blocked(self) -> bool {
        matches!(self, Self::Blocked | Self::Waiting | Self::Hanging)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "RUNNING",
            Self::Ready => "READY",
            Self::Blocked => "BLOCKED",
            Self::Waiting => "WAITING",
            Self::Hanging => "HANGING",
        }
    }
}
