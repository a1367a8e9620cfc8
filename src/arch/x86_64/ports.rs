/// Arquivo: x86_64/ports.rs
///
/// Propósito: instruções de I/O por porta (`in`/`out`) do x86, usadas pelo
/// PIC, pelo PIT, pelo teclado PS/2 e pela serial.
///
/// Detalhes de Implementação:
/// - `inb`/`outb` livres para acessos pontuais.
/// - `Port<u8>` para dispositivos que guardam suas portas em campos.
/// - `io_wait` usa a porta 0x80 para dar tempo ao 8259 entre ICWs.
use core::marker::PhantomData;

/// Lê um byte de uma porta IO
#[inline]
pub fn inb(port: u16) -> u8 {
    let value: u8;
    // SAFETY: IO ports são operações privilegiadas mas seguras do ponto de vista de memória
    unsafe {
        core::arch::asm!(
            "in al, dx",
            in("dx") port,
            out("al") value,
            options(nomem, nostack, preserves_flags)
        );
    }
    value
}

/// Escreve um byte em uma porta IO
#[inline]
pub fn outb(port: u16, value: u8) {
    // SAFETY: IO ports são operações privilegiadas mas seguras do ponto de vista de memória
    unsafe {
        core::arch::asm!(
            "out dx, al",
            in("dx") port,
            in("al") value,
            options(nomem, nostack, preserves_flags)
        );
    }
}

/// Pequeno atraso de barramento (escrita na porta de POST 0x80).
#[inline]
pub fn io_wait() {
    outb(0x80, 0);
}

/// Porta de I/O tipada.
pub struct Port<T> {
    port: u16,
    _width: PhantomData<T>,
}

impl<T> Port<T> {
    /// # Safety
    ///
    /// O chamador deve ter acesso exclusivo ao dispositivo nesta porta.
    pub const unsafe fn new(port: u16) -> Self {
        Self {
            port,
            _width: PhantomData,
        }
    }

    pub const fn number(&self) -> u16 {
        self.port
    }
}

impl Port<u8> {
    /// # Safety
    ///
    /// Ler uma porta pode ter efeito colateral no dispositivo (ex: 0x60
    /// consome o scancode).
    #[inline]
    pub unsafe fn read(&self) -> u8 {
        inb(self.port)
    }

    /// # Safety
    ///
    /// Escrever em uma porta reprograma o dispositivo.
    #[inline]
    pub unsafe fn write(&mut self, value: u8) {
        outb(self.port, value)
    }
}
