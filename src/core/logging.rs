// =============================================================================
// KERNEL LOGGING SYSTEM - ZERO OVERHEAD
// =============================================================================
//
// Logging do Anvil sem core::fmt e sem alocação: apenas strings e valores
// hexadecimais empurrados direto para a serial. Cada nível é removido em
// tempo de compilação pelas features do Cargo.
//
// NÍVEIS (do mais crítico ao menos) e a feature mínima que os liga:
// - ERROR / WARN / OK: tudo exceto no_logs
// - INFO:              log_info, log_debug ou log_trace
// - DEBUG:             log_debug ou log_trace
// - TRACE:             log_trace
//
// USO:
//   kinfo!("(Sched) Inicializando...");      // Apenas string
//   ktrace!("(Sched) pid=", pid.as_u32());   // String + hex
//
// Em `cfg(test)` a serial vira stdout, então os logs aparecem na saída
// capturada do cargo test.
//
// =============================================================================

// =============================================================================
// PREFIXOS COM CORES ANSI
// =============================================================================

pub const P_ERROR: &str = "\x1b[1;31m[ERRO]\x1b[0m ";
pub const P_WARN: &str = "\x1b[1;33m[WARN]\x1b[0m ";
pub const P_INFO: &str = "\x1b[32m[INFO]\x1b[0m ";
pub const P_DEBUG: &str = "\x1b[36m[DEBG]\x1b[0m ";
pub const P_TRACE: &str = "\x1b[35m[TRAC]\x1b[0m ";
pub const P_OK: &str = "\x1b[32m[ OK ]\x1b[0m ";

/// Emite uma linha de log já com prefixo. Uso interno dos macros.
#[doc(hidden)]
#[macro_export]
macro_rules! __klog_line {
    ($prefix:expr, $msg:expr) => {{
        $crate::drivers::serial::emit_str($prefix);
        $crate::drivers::serial::emit_str($msg);
        $crate::drivers::serial::emit_nl();
    }};
    ($prefix:expr, $msg:expr, $val:expr) => {{
        $crate::drivers::serial::emit_str($prefix);
        $crate::drivers::serial::emit_str($msg);
        $crate::drivers::serial::emit_hex($val as u64);
        $crate::drivers::serial::emit_nl();
    }};
}

// =============================================================================
// ERROR / WARN / OK
// =============================================================================

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kerror {
    ($msg:expr) => { $crate::__klog_line!($crate::core::logging::P_ERROR, $msg) };
    ($msg:expr, $val:expr) => { $crate::__klog_line!($crate::core::logging::P_ERROR, $msg, $val) };
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kerror {
    ($($t:tt)*) => {{}};
}

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kwarn {
    ($msg:expr) => { $crate::__klog_line!($crate::core::logging::P_WARN, $msg) };
    ($msg:expr, $val:expr) => { $crate::__klog_line!($crate::core::logging::P_WARN, $msg, $val) };
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kwarn {
    ($($t:tt)*) => {{}};
}

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kok {
    ($msg:expr) => { $crate::__klog_line!($crate::core::logging::P_OK, $msg) };
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kok {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// INFO
// =============================================================================

#[cfg(all(
    not(feature = "no_logs"),
    any(feature = "log_info", feature = "log_debug", feature = "log_trace")
))]
#[macro_export]
macro_rules! kinfo {
    ($msg:expr) => { $crate::__klog_line!($crate::core::logging::P_INFO, $msg) };
    ($msg:expr, $val:expr) => { $crate::__klog_line!($crate::core::logging::P_INFO, $msg, $val) };
}

#[cfg(not(all(
    not(feature = "no_logs"),
    any(feature = "log_info", feature = "log_debug", feature = "log_trace")
)))]
#[macro_export]
macro_rules! kinfo {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// DEBUG
// =============================================================================

#[cfg(all(
    not(feature = "no_logs"),
    any(feature = "log_debug", feature = "log_trace")
))]
#[macro_export]
macro_rules! kdebug {
    ($msg:expr) => { $crate::__klog_line!($crate::core::logging::P_DEBUG, $msg) };
    ($msg:expr, $val:expr) => { $crate::__klog_line!($crate::core::logging::P_DEBUG, $msg, $val) };
}

#[cfg(not(all(
    not(feature = "no_logs"),
    any(feature = "log_debug", feature = "log_trace")
)))]
#[macro_export]
macro_rules! kdebug {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// TRACE
// =============================================================================

#[cfg(all(not(feature = "no_logs"), feature = "log_trace"))]
#[macro_export]
macro_rules! ktrace {
    ($msg:expr) => { $crate::__klog_line!($crate::core::logging::P_TRACE, $msg) };
    ($msg:expr, $val:expr) => { $crate::__klog_line!($crate::core::logging::P_TRACE, $msg, $val) };
}

#[cfg(not(all(not(feature = "no_logs"), feature = "log_trace")))]
#[macro_export]
macro_rules! ktrace {
    ($($t:tt)*) => {{}};
}
