//! Pilha de kernel de uma task.
//!
//! Cada task tem `KERNEL_STACK_PAGES` páginas contíguas. O canário
//! (`STACK_MAGIC`) mora no endereço mais baixo: uma pilha que estoura para
//! baixo o sobrescreve antes de sair da própria região.

use crate::mm::{PageAllocator, PAGE_SIZE};
use crate::sched::config::STACK_MAGIC;
use crate::sched::error::SchedError;
use core::ptr::NonNull;
use volatile::VolatilePtr;

pub struct KernelStack {
    base: NonNull<u8>,
    pages: usize,
    /// `false` para a pilha de boot, que não veio do alocador
    owned: bool,
}

// SAFETY: a região é exclusiva da task dona da pilha
unsafe impl Send for KernelStack {}

impl KernelStack {
    /// Aloca uma pilha nova.
    pub fn allocate<P: PageAllocator>(pages: &mut P, count: usize) -> Result<Self, SchedError> {
        let base = pages.alloc_pages(count).ok_or(SchedError::OutOfMemory)?;
        Ok(Self {
            base,
            pages: count,
            owned: true,
        })
    }

    /// Adota uma pilha que já existe (a pilha de boot).
    ///
    /// # Safety
    ///
    /// `base` aponta para `pages` páginas válidas pelo resto da vida do
    /// kernel, e o endereço mais baixo não está em uso.
    pub unsafe fn adopt(base: NonNull<u8>, pages: usize) -> Self {
        Self {
            base,
            pages,
            owned: false,
        }
    }

    pub fn base(&self) -> usize {
        self.base.as_ptr() as usize
    }

    /// Primeiro endereço acima da pilha.
    pub fn top(&self) -> usize {
        self.base() + self.size()
    }

    pub fn size(&self) -> usize {
        self.pages * PAGE_SIZE
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn is_owned(&self) -> bool {
        self.owned
    }

    /// O endereço cai dentro da pilha.
    pub fn contains(&self, addr: usize) -> bool {
        addr >= self.base() && addr < self.top()
    }

    fn canary_ptr(&self) -> VolatilePtr<'_, u64> {
        // SAFETY: base é alinhada a página e os primeiros 8 bytes são da
        // pilha
        unsafe { VolatilePtr::new(self.base.cast::<u64>()) }
    }

    pub fn write_canary(&self) {
        self.canary_ptr().write(STACK_MAGIC);
    }

    pub fn canary(&self) -> u64 {
        self.canary_ptr().read()
    }

    pub fn canary_intact(&self) -> bool {
        self.canary() == STACK_MAGIC
    }

    /// Devolve as páginas ao alocador.
    ///
    /// # Safety
    ///
    /// Ninguém mais executa nesta pilha e `pages` é o alocador de origem.
    pub unsafe fn release<P: PageAllocator>(self, pages: &mut P) {
        if self.owned {
            pages.free_pages(self.base, self.pages);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mm::HeapPages;

    #[test]
    fn test_allocate_and_canary() {
        let mut pages = HeapPages::new();
        let stack = KernelStack::allocate(&mut pages, 2).unwrap();
        assert_eq!(stack.size(), 2 * PAGE_SIZE);
        assert_eq!(stack.base() % PAGE_SIZE, 0);
        assert!(stack.contains(stack.base()));
        assert!(stack.contains(stack.top() - 1));
        assert!(!stack.contains(stack.top()));

        assert!(!stack.canary_intact());
        stack.write_canary();
        assert_eq!(stack.canary(), STACK_MAGIC);

        unsafe { stack.release(&mut pages) };
        assert_eq!(pages.pages_in_use(), 0);
    }

    #[test]
    fn test_overflow_breaks_canary() {
        let mut pages = HeapPages::new();
        let stack = KernelStack::allocate(&mut pages, 1).unwrap();
        stack.write_canary();
        unsafe { (stack.base() as *mut u8).write(0) };
        assert!(!stack.canary_intact());
        unsafe { stack.release(&mut pages) };
    }

    #[test]
    fn test_adopted_stack_is_not_freed() {
        let mut pages = HeapPages::new();
        let backing = KernelStack::allocate(&mut pages, 1).unwrap();
        let adopted = unsafe { KernelStack::adopt(NonNull::new(backing.base() as *mut u8).unwrap(), 1) };
        assert!(!adopted.is_owned());
        unsafe { adopted.release(&mut pages) };
        assert_eq!(pages.pages_in_use(), 1);
        unsafe { backing.release(&mut pages) };
    }
}
