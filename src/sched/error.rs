//! Erros de uso do escalonador.
//!
//! Só pré-condições que o chamador pode tratar viram `SchedError`.
//! Corrupção de estado (enfileirar duas vezes, canário quebrado, fila vazia
//! depois de acordar a idle) continua sendo `panic!`.

use super::task::TaskStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedError {
    /// `block` pedido com um estado que não é de bloqueio
    InvalidBlockStatus(TaskStatus),
    /// `unblock` de uma task que não está bloqueada
    NotBlocked(TaskStatus),
    /// Prioridade 0 daria uma fatia de tempo vazia
    InvalidPriority,
    /// Sem páginas para a pilha ou sem espaço na arena
    OutOfMemory,
    /// Handle que não corresponde a nenhuma task
    UnknownTask,
    NotInitialized,
    AlreadyInitialized,
}

impl SchedError {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SchedError::InvalidBlockStatus(_) => "estado de bloqueio invalido",
            SchedError::NotBlocked(_) => "task nao esta bloqueada",
            SchedError::InvalidPriority => "prioridade invalida",
            SchedError::OutOfMemory => "sem memoria",
            SchedError::UnknownTask => "task desconhecida",
            SchedError::NotInitialized => "escalonador nao inicializado",
            SchedError::AlreadyInitialized => "escalonador ja inicializado",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SchedError::NotBlocked(TaskStatus::Ready).as_str(),
            "task nao esta bloqueada"
        );
        assert_eq!(SchedError::OutOfMemory.as_str(), "sem memoria");
    }
}
