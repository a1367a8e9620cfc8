//! Kernel Library (KLib).
//!
//! Utilitários agnósticos de hardware para uso interno do kernel.

pub mod list;
pub mod test_framework;

pub use list::{IndexList, ListAdapter, ListLink};

/// Alinha um endereço para baixo.
///
/// `align` deve ser potência de dois.
#[inline]
pub const fn align_down(addr: usize, align: usize) -> usize {
    addr & !(align - 1)
}

/// Verifica se um endereço está alinhado.
#[inline]
pub const fn is_aligned(addr: usize, align: usize) -> bool {
    (addr & (align - 1)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_down() {
        assert_eq!(align_down(10, 4), 8);
        assert_eq!(align_down(16, 16), 16);
        assert_eq!(align_down(0x1FFF, 0x1000), 0x1000);
        assert!(is_aligned(0x2000, 0x1000));
        assert!(!is_aligned(0x2008, 16));
    }
}
