//! Heap do kernel.
//!
//! `linked_list_allocator::LockedHeap` sobre uma arena estática. Só existe
//! no binário bare-metal; nos testes de host o alocador é o do `std`.

#[cfg(target_os = "none")]
use linked_list_allocator::LockedHeap;

/// Tamanho da arena do heap (2 MiB).
pub const HEAP_SIZE: usize = 2 * 1024 * 1024;

#[cfg(target_os = "none")]
#[global_allocator]
static ALLOCATOR: LockedHeap = LockedHeap::empty();

#[cfg(target_os = "none")]
#[repr(C, align(4096))]
struct HeapArena([u8; HEAP_SIZE]);

#[cfg(target_os = "none")]
static mut HEAP_ARENA: HeapArena = HeapArena([0; HEAP_SIZE]);

/// Entrega a arena ao alocador global.
///
/// # Safety
///
/// Chamar uma única vez, no early-boot, antes de qualquer alocação.
#[cfg(target_os = "none")]
pub unsafe fn init() {
    let start = core::ptr::addr_of_mut!(HEAP_ARENA) as *mut u8;
    ALLOCATOR.lock().init(start, HEAP_SIZE);
    crate::kinfo!("(Heap) Arena pronta, bytes=", HEAP_SIZE);
}

/// Bytes livres no heap.
#[cfg(target_os = "none")]
pub fn free_bytes() -> usize {
    ALLOCATOR.lock().free()
}
