/// Arquivo: x86_64/idt.rs
///
/// Propósito: Interrupt Descriptor Table (IDT).
/// Tabela que a CPU usa para achar o trampolim de cada vetor: exceções
/// (0x00-0x1F), IRQs do PIC (0x20-0x2F) e a porta de syscall (0x80).
///
/// Detalhes de Implementação:
/// - `IdtEntry` conforme o formato AMD64/Intel 64 (16 bytes).
/// - 0x81 entradas, todas interrupt gates; só o vetor 0x80 tem DPL 3.
/// - `build` é puro e recebe uma função vetor -> endereço, então também
///   roda nos testes de host.
/// - `init` (bare-metal) aponta cada gate para o trampolim do vetor e
///   carrega o IDTR.
use crate::interrupt::vectors::{IDT_DESC_CNT, SYSCALL_VECTOR};
use bitflags::bitflags;
use core::mem::size_of;

bitflags! {
    /// Byte de tipo/atributos do gate.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GateAttributes: u8 {
        const INTERRUPT_GATE = 0x0E;
        const DPL_USER = 0x60;
        const PRESENT = 0x80;
    }
}

impl GateAttributes {
    /// Gate de kernel: presente, DPL 0 (0x8E).
    pub const KERNEL: Self = Self::PRESENT.union(Self::INTERRUPT_GATE);
    /// Gate alcançável do Ring 3 (0xEE).
    pub const USER: Self = Self::KERNEL.union(Self::DPL_USER);
}

/// Entrada da IDT (16 bytes em 64-bit)
#[derive(Debug, Clone, Copy)]
#[repr(C, packed)]
pub struct IdtEntry {
    offset_low: u16,
    selector: u16,
    ist: u8, // Bits 0-2: IST, 3-7: Reservado
    type_attr: u8,
    offset_mid: u16,
    offset_high: u32,
    reserved: u32,
}

impl IdtEntry {
    /// Entrada não presente
    pub const fn missing() -> Self {
        Self {
            offset_low: 0,
            selector: 0,
            ist: 0,
            type_attr: 0,
            offset_mid: 0,
            offset_high: 0,
            reserved: 0,
        }
    }

    pub const fn new(handler: u64, selector: u16, attributes: GateAttributes) -> Self {
        Self {
            offset_low: (handler & 0xFFFF) as u16,
            selector,
            ist: 0,
            type_attr: attributes.bits(),
            offset_mid: ((handler >> 16) & 0xFFFF) as u16,
            offset_high: (handler >> 32) as u32,
            reserved: 0,
        }
    }

    /// Endereço do trampolim.
    pub fn handler(&self) -> u64 {
        let low = self.offset_low as u64;
        let mid = self.offset_mid as u64;
        let high = self.offset_high as u64;
        low | (mid << 16) | (high << 32)
    }

    pub fn selector(&self) -> u16 {
        self.selector
    }

    pub fn attributes(&self) -> u8 {
        self.type_attr
    }
}

#[repr(C, align(16))]
pub struct Idt {
    entries: [IdtEntry; IDT_DESC_CNT],
}

/// Tamanho fixo de cada trampolim de `interrupts`.
pub const STUB_SIZE: usize = 16;

/// Endereço que o gate do vetor deve apontar: o trampolim `v` da tabela,
/// ou a entrada própria de syscall no vetor 0x80.
pub fn gate_target(vector: usize, stubs_base: u64, syscall_entry: u64) -> u64 {
    if vector == SYSCALL_VECTOR {
        syscall_entry
    } else {
        stubs_base + (vector * STUB_SIZE) as u64
    }
}

impl Idt {
    pub const fn new() -> Self {
        Self {
            entries: [IdtEntry::missing(); IDT_DESC_CNT],
        }
    }

    /// Monta a tabela completa. `entry_of(v)` devolve o endereço do
    /// trampolim do vetor `v`.
    pub fn build(selector: u16, entry_of: impl Fn(usize) -> u64) -> Self {
        let mut idt = Self::new();
        for vector in 0..IDT_DESC_CNT {
            let attributes = if vector == SYSCALL_VECTOR {
                GateAttributes::USER
            } else {
                GateAttributes::KERNEL
            };
            idt.set_gate(vector, entry_of(vector), selector, attributes);
        }
        idt
    }

    pub fn set_gate(&mut self, vector: usize, handler: u64, selector: u16, attributes: GateAttributes) {
        self.entries[vector] = IdtEntry::new(handler, selector, attributes);
    }

    pub fn entry(&self, vector: usize) -> Option<&IdtEntry> {
        self.entries.get(vector)
    }

    /// Limite do IDTR (tamanho - 1).
    pub const fn limit() -> u16 {
        (size_of::<Self>() - 1) as u16
    }

    /// Carrega a IDT na CPU (lidt)
    ///
    /// # Safety
    ///
    /// Todos os gates devem apontar para trampolins válidos.
    #[cfg(target_os = "none")]
    pub unsafe fn load(&'static self) {
        let descriptor = IdtDescriptor {
            limit: Self::limit(),
            base: (self as *const Self) as u64,
        };
        core::arch::asm!("lidt [{}]", in(reg) &descriptor, options(readonly, nostack, preserves_flags));
    }
}

impl Default for Idt {
    fn default() -> Self {
        Self::new()
    }
}

/// Descritor para LIDT
#[cfg(target_os = "none")]
#[repr(C, packed)]
struct IdtDescriptor {
    limit: u16,
    base: u64,
}

#[cfg(target_os = "none")]
static IDT: spin::Once<Idt> = spin::Once::new();

/// Monta a IDT com os trampolins e carrega o IDTR.
///
/// # Safety
///
/// Interrupções desabilitadas; chamado uma vez no boot.
#[cfg(target_os = "none")]
pub unsafe fn init() {
    use super::cpu::X64Cpu;
    use super::interrupts::{stubs_base, syscall_entry_address};

    let selector = X64Cpu::code_selector();
    let base = stubs_base() as u64;
    let syscall = syscall_entry_address() as u64;
    let idt = IDT.call_once(|| Idt::build(selector, |v| gate_target(v, base, syscall)));
    idt.load();
    crate::ktrace!("(IDT) IDTR carregado, limite=", Idt::limit());
}
