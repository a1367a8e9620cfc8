//! IrqCell - exclusão mútua por máscara de interrupções.
//!
//! Num único núcleo, desabilitar interrupções basta para que ninguém mais
//! toque no dado: não há outra CPU e o timer não preempta. É a proteção
//! do estado do escalonador.
//!
//! Diferente de um `Spinlock`, não há flag de "ocupado". Uma troca de
//! contexto acontece *dentro* de `with` e a próxima thread retoma dentro
//! do seu próprio `with`; um flag ficaria preso com a thread que saiu.

use crate::arch::CpuOps;
use crate::interrupt::mask::InterruptMask;
use core::cell::UnsafeCell;
use core::marker::PhantomData;

pub struct IrqCell<T, C: CpuOps> {
    data: UnsafeCell<T>,
    _cpu: PhantomData<fn() -> C>,
}

// SAFETY: todo acesso passa por `with`, com interrupções desabilitadas,
// e o kernel roda em um único núcleo
unsafe impl<T: Send, C: CpuOps> Sync for IrqCell<T, C> {}

impl<T, C: CpuOps> IrqCell<T, C> {
    pub const fn new(data: T) -> Self {
        Self {
            data: UnsafeCell::new(data),
            _cpu: PhantomData,
        }
    }

    /// Executa `f` com interrupções desabilitadas e restaura o estado
    /// anterior na saída.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let old = C::intr_disable();
        // SAFETY: interrupções desabilitadas num único núcleo
        let result = f(unsafe { &mut *self.data.get() });
        C::intr_set_status(old);
        result
    }

    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch::mock::MockCpu;

    #[test]
    fn test_with_masks_and_restores() {
        MockCpu::reset();
        MockCpu::set_interrupts(true);
        let cell: IrqCell<u32, MockCpu> = IrqCell::new(1);

        let seen = cell.with(|v| {
            *v += 1;
            MockCpu::are_interrupts_enabled()
        });
        assert!(!seen);
        assert!(MockCpu::are_interrupts_enabled());
        assert_eq!(cell.into_inner(), 2);
    }

    #[test]
    fn test_with_keeps_interrupts_off_when_called_masked() {
        MockCpu::reset();
        let cell: IrqCell<u32, MockCpu> = IrqCell::new(0);
        cell.with(|v| *v = 7);
        assert!(!MockCpu::are_interrupts_enabled());
        assert_eq!(cell.with(|v| *v), 7);
    }
}
