//! Kernel Anvil - Binário Principal.
//!
//! Responsabilidade:
//! 1. Configurar a pilha de boot (Assembly).
//! 2. Entregar a arena ao heap.
//! 3. Adotar a pilha de boot como pilha da thread `main`.
//! 4. Saltar para `core::entry::kernel_main` (da biblioteca `anvil`).
//!
//! Fora do alvo bare-metal (`x86_64-unknown-none`) o binário só avisa que
//! não roda no host.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod boot {
    use anvil::arch::{Cpu, CpuOps};
    use anvil::mm::PAGE_SIZE;
    use anvil::sched::config::KERNEL_STACK_PAGES;
    use anvil::sched::KernelStack;
    use core::panic::PanicInfo;
    use core::ptr::NonNull;

    const BOOT_STACK_SIZE: usize = KERNEL_STACK_PAGES * PAGE_SIZE;

    // `_start` soma este valor à base da pilha
    const _: () = assert!(BOOT_STACK_SIZE == 16384);

    // Pilha de boot. Vira a pilha de kernel da thread `main`; o canário
    // fica nos primeiros bytes.
    #[repr(C, align(4096))]
    struct BootStack([u8; BOOT_STACK_SIZE]);

    static mut BOOT_STACK: BootStack = BootStack([0; BOOT_STACK_SIZE]);

    // Ponto de entrada: interrupções off, RSP no topo da pilha de boot,
    // alinhado para a chamada
    core::arch::global_asm!(
        ".section .text._start, \"ax\"",
        ".global _start",
        "_start:",
        "cli",
        "lea rsp, [rip + {stack} + 16384]",
        "xor rbp, rbp",
        "and rsp, -16",
        "call {boot_entry}",
        "2:",
        "cli",
        "hlt",
        "jmp 2b",
        stack = sym BOOT_STACK,
        boot_entry = sym boot_entry,
    );

    extern "C" fn boot_entry() -> ! {
        // SAFETY: primeira coisa do boot, nenhuma alocação ainda
        unsafe { anvil::mm::heap::init() };

        let base = core::ptr::addr_of_mut!(BOOT_STACK) as *mut u8;
        let boot_stack = match NonNull::new(base) {
            // SAFETY: estática, vive para sempre e estamos perto do topo
            Some(base) => unsafe { KernelStack::adopt(base, KERNEL_STACK_PAGES) },
            None => Cpu::hang(),
        };

        anvil::core::entry::kernel_main(boot_stack)
    }

    #[panic_handler]
    fn panic(info: &PanicInfo) -> ! {
        anvil::core::panic::report::<Cpu>(info);
        // Morrer com dignidade
        Cpu::hang()
    }
}

#[cfg(not(target_os = "none"))]
fn main() {
    eprintln!("anvil: binario bare-metal, compile com --target x86_64-unknown-none");
}
