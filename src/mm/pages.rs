//! Alocação de páginas para pilhas de kernel.
//!
//! O alocador físico é um colaborador externo: o escalonador só pede
//! "N páginas" e as devolve. `HeapPages` atende esse contrato com páginas
//! alinhadas tiradas do heap global, tanto no kernel quanto nos testes.

use super::PAGE_SIZE;
use alloc::alloc::{alloc_zeroed, dealloc, Layout};
use core::ptr::NonNull;

/// Fonte de páginas físicas contíguas, alinhadas a `PAGE_SIZE`.
pub trait PageAllocator {
    /// Aloca `count` páginas zeradas. `None` se não houver memória.
    fn alloc_pages(&mut self, count: usize) -> Option<NonNull<u8>>;

    /// Devolve páginas obtidas de `alloc_pages`.
    ///
    /// # Safety
    ///
    /// `base` e `count` devem vir da mesma chamada a `alloc_pages` deste
    /// alocador, e a região não pode mais estar em uso.
    unsafe fn free_pages(&mut self, base: NonNull<u8>, count: usize);
}

/// Páginas do heap do kernel (linked_list_allocator no bare-metal).
#[derive(Debug, Default)]
pub struct HeapPages {
    in_use: usize,
}

impl HeapPages {
    pub const fn new() -> Self {
        Self { in_use: 0 }
    }

    /// Páginas entregues e ainda não devolvidas.
    pub fn pages_in_use(&self) -> usize {
        self.in_use
    }

    fn layout(count: usize) -> Option<Layout> {
        let size = count.checked_mul(PAGE_SIZE)?;
        Layout::from_size_align(size, PAGE_SIZE).ok()
    }
}

impl PageAllocator for HeapPages {
    fn alloc_pages(&mut self, count: usize) -> Option<NonNull<u8>> {
        if count == 0 {
            return None;
        }
        let layout = Self::layout(count)?;
        // SAFETY: layout com tamanho não-nulo
        let ptr = NonNull::new(unsafe { alloc_zeroed(layout) })?;
        self.in_use += count;
        Some(ptr)
    }

    unsafe fn free_pages(&mut self, base: NonNull<u8>, count: usize) {
        if let Some(layout) = Self::layout(count) {
            dealloc(base.as_ptr(), layout);
            self.in_use -= count;
        }
    }
}
