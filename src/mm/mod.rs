//! # Memory Management (visão do núcleo de multitarefa)
//!
//! O escalonador só consome memória de três formas:
//! - páginas físicas para as pilhas de kernel (`pages::PageAllocator`);
//! - o heap do kernel para a arena de TCBs (`heap`);
//! - um handle opaco de espaço de endereçamento por task (`AddressSpace`).
//!
//! Política de paginação fica fora daqui.

pub mod heap;
pub mod pages;

pub use pages::{HeapPages, PageAllocator};

/// Tamanho de página (4 KiB).
pub const PAGE_SIZE: usize = 4096;

/// Handle opaco de um espaço de endereçamento.
///
/// Guarda o endereço físico da raiz das tabelas de página (PML4 no x86_64).
/// Tasks de kernel não têm handle (`None` no TCB) e rodam nas tabelas do
/// kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct AddressSpace(u64);

impl AddressSpace {
    pub const fn new(root_phys: u64) -> Self {
        Self(root_phys)
    }

    pub const fn root(self) -> u64 {
        self.0
    }
}
