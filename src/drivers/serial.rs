// =============================================================================
// SERIAL DRIVER - ZERO OVERHEAD
// =============================================================================
//
// Porta serial COM1 (UART 16550) usada como saída de log do kernel.
//
// - SEM Mutex: escrita direta nas portas, logs de contextos diferentes
//   podem se intercalar (aceitável para diagnóstico)
// - SEM core::fmt: apenas bytes, strings e hexadecimal
// - SEM alocação
//
// Fora do kernel bare-metal a saída muda de destino:
// - cfg(test): stdout do processo de teste
// - build de host comum: descartada
//
// FUNÇÕES:
// - init()       : programa a UART (38400 8N1, FIFO)
// - emit(byte)   : um byte
// - emit_str(s)  : string
// - emit_hex(v)  : u64 como 0x0123456789ABCDEF
// - emit_nl()    : CRLF
//
// =============================================================================

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
use crate::arch::x86_64::ports::{inb, outb};

/// Porta de dados da COM1
#[cfg(all(target_arch = "x86_64", target_os = "none"))]
const COM1_DATA: u16 = 0x3F8;

/// Line Status Register da COM1
#[cfg(all(target_arch = "x86_64", target_os = "none"))]
const COM1_STATUS: u16 = 0x3FD;

/// Bit 5 do LSR: buffer de transmissão vazio
#[cfg(all(target_arch = "x86_64", target_os = "none"))]
const LSR_THR_EMPTY: u8 = 0x20;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

// =============================================================================
// INICIALIZAÇÃO
// =============================================================================

/// Inicializa a COM1.
///
/// Deve ser chamada uma vez no early-boot, antes do primeiro log.
#[cfg(all(target_arch = "x86_64", target_os = "none"))]
pub fn init() {
    outb(COM1_DATA + 1, 0x00); // Sem interrupções da UART
    outb(COM1_DATA + 3, 0x80); // DLAB on
    outb(COM1_DATA, 0x03); // Divisor 3 = 38400 baud (lo)
    outb(COM1_DATA + 1, 0x00); // (hi)
    outb(COM1_DATA + 3, 0x03); // 8N1
    outb(COM1_DATA + 2, 0xC7); // FIFO on, limpa, limiar 14 bytes
    outb(COM1_DATA + 4, 0x0B); // RTS/DSR
}

#[cfg(not(all(target_arch = "x86_64", target_os = "none")))]
pub fn init() {}

// =============================================================================
// ESCRITA - CORE
// =============================================================================

/// Envia um único byte.
#[cfg(all(target_arch = "x86_64", target_os = "none"))]
#[inline]
pub fn emit(byte: u8) {
    while inb(COM1_STATUS) & LSR_THR_EMPTY == 0 {
        core::hint::spin_loop();
    }
    outb(COM1_DATA, byte);
}

#[cfg(all(not(target_os = "none"), test))]
pub fn emit(byte: u8) {
    use std::io::Write;
    let _ = std::io::stdout().write_all(&[byte]);
}

#[cfg(all(not(target_os = "none"), not(test)))]
#[inline]
pub fn emit(_byte: u8) {}

/// Envia uma string.
#[inline(never)]
pub fn emit_str(s: &str) {
    for byte in s.bytes() {
        emit(byte);
    }
}

/// Envia CRLF.
#[inline(never)]
pub fn emit_nl() {
    emit(b'\r');
    emit(b'\n');
}

// =============================================================================
// ESCRITA - NUMÉRICA
// =============================================================================

/// Envia um u64 em hexadecimal, sempre 18 caracteres (`0x` + 16 dígitos).
#[inline(never)]
pub fn emit_hex(value: u64) {
    emit(b'0');
    emit(b'x');
    let mut shift = 60;
    loop {
        emit(HEX_DIGITS[((value >> shift) & 0xF) as usize]);
        if shift == 0 {
            break;
        }
        shift -= 4;
    }
}
