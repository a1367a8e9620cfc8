//! Constantes de configuração do Scheduler

/// Prioridade da task de bootstrap (`main`)
pub const MAIN_PRIORITY: u32 = 31;

/// Prioridade da task idle
pub const IDLE_PRIORITY: u32 = 10;

/// Páginas de cada pilha de kernel (4 × 4 KiB)
pub const KERNEL_STACK_PAGES: usize = 4;

/// Sentinela gravado na base de cada pilha de kernel
pub const STACK_MAGIC: u64 = 0x1987_0916_DEAD_BEEF;

/// Bytes do nome de uma task (truncado, sem terminador)
pub const TASK_NAME_LEN: usize = 16;

/// Slots da tabela de arquivos abertos por task
pub const MAX_FILES_OPEN_PER_PROC: usize = 8;
