//! Trampolins de Interrupção em Assembly.
//!
//! Um trampolim de 16 bytes por vetor (0x00-0x7F), todos dentro de
//! `global_asm!`. Cada um normaliza a pilha (código de erro falso quando a
//! CPU não empilha um), empilha o número do vetor e salta para
//! `intr_common`, que salva os registradores gerais no formato de
//! `TrapFrame` e chama o despacho em Rust.
//!
//! O endereço do trampolim do vetor `v` é `intr_stubs_start + v * 16`.
//! O vetor 0x80 (porta de syscall, DPL 3) tem entrada própria,
//! `syscall_entry`, fora da tabela de trampolins.

use crate::interrupt::TrapFrame;

extern "C" {
    fn intr_stubs_start();
    fn syscall_entry();
}

/// Início da tabela de trampolins.
pub fn stubs_base() -> usize {
    intr_stubs_start as usize
}

/// Endereço da entrada do vetor 0x80.
pub fn syscall_entry_address() -> usize {
    syscall_entry as usize
}

// `vetor => empilha_erro`: 1 quando a CPU já empilhou o código de erro.
macro_rules! intr_stubs {
    ($($n:literal => $err:literal),* $(,)?) => {
        core::arch::global_asm!(
            ".pushsection .text.intr_stubs, \"ax\", @progbits",
            ".balign 16",
            ".global intr_stubs_start",
            "intr_stubs_start:",
            $(
                ".balign 16",
                concat!("intr_stub_", stringify!($n), ":"),
                concat!(".if ", stringify!($err), " == 0"),
                "push 0",
                ".endif",
                concat!("push ", stringify!($n)),
                "jmp intr_common",
            )*
            // Porta de syscall (DPL 3): mesmo formato de frame
            ".balign 16",
            ".global syscall_entry",
            "syscall_entry:",
            "push 0",
            "push 0x80",
            "jmp intr_common",
            ".balign 16",
            ".global intr_common",
            "intr_common:",
            // Registradores gerais, na ordem inversa dos campos de TrapFrame
            "push rax",
            "push rbx",
            "push rcx",
            "push rdx",
            "push rsi",
            "push rdi",
            "push rbp",
            "push r8",
            "push r9",
            "push r10",
            "push r11",
            "push r12",
            "push r13",
            "push r14",
            "push r15",
            "cld",
            "mov rdi, rsp",
            "call {dispatch}",
            "pop r15",
            "pop r14",
            "pop r13",
            "pop r12",
            "pop r11",
            "pop r10",
            "pop r9",
            "pop r8",
            "pop rbp",
            "pop rdi",
            "pop rsi",
            "pop rdx",
            "pop rcx",
            "pop rbx",
            "pop rax",
            // vetor + código de erro
            "add rsp, 16",
            "iretq",
            ".popsection",
            dispatch = sym intr_dispatch,
        );
    };
}

intr_stubs! {
    0 => 0, 1 => 0, 2 => 0, 3 => 0, 4 => 0, 5 => 0, 6 => 0, 7 => 0,
    8 => 1, 9 => 0, 10 => 1, 11 => 1, 12 => 1, 13 => 1, 14 => 1, 15 => 0,
    16 => 0, 17 => 1, 18 => 0, 19 => 0, 20 => 0, 21 => 1, 22 => 0, 23 => 0,
    24 => 0, 25 => 0, 26 => 0, 27 => 0, 28 => 0, 29 => 1, 30 => 1, 31 => 0,
    32 => 0, 33 => 0, 34 => 0, 35 => 0, 36 => 0, 37 => 0, 38 => 0, 39 => 0,
    40 => 0, 41 => 0, 42 => 0, 43 => 0, 44 => 0, 45 => 0, 46 => 0, 47 => 0,
    48 => 0, 49 => 0, 50 => 0, 51 => 0, 52 => 0, 53 => 0, 54 => 0, 55 => 0,
    56 => 0, 57 => 0, 58 => 0, 59 => 0, 60 => 0, 61 => 0, 62 => 0, 63 => 0,
    64 => 0, 65 => 0, 66 => 0, 67 => 0, 68 => 0, 69 => 0, 70 => 0, 71 => 0,
    72 => 0, 73 => 0, 74 => 0, 75 => 0, 76 => 0, 77 => 0, 78 => 0, 79 => 0,
    80 => 0, 81 => 0, 82 => 0, 83 => 0, 84 => 0, 85 => 0, 86 => 0, 87 => 0,
    88 => 0, 89 => 0, 90 => 0, 91 => 0, 92 => 0, 93 => 0, 94 => 0, 95 => 0,
    96 => 0, 97 => 0, 98 => 0, 99 => 0, 100 => 0, 101 => 0, 102 => 0, 103 => 0,
    104 => 0, 105 => 0, 106 => 0, 107 => 0, 108 => 0, 109 => 0, 110 => 0, 111 => 0,
    112 => 0, 113 => 0, 114 => 0, 115 => 0, 116 => 0, 117 => 0, 118 => 0, 119 => 0,
    120 => 0, 121 => 0, 122 => 0, 123 => 0, 124 => 0, 125 => 0, 126 => 0, 127 => 0,
}

/// Ponte entre `intr_common` e o despacho.
///
/// A pilha está alinhada em 16 bytes: a CPU alinha antes de empilhar o
/// frame e os trampolins empilham 17 palavras.
extern "C" fn intr_dispatch(frame: *mut TrapFrame) {
    // SAFETY: `frame` aponta para o TrapFrame montado por `intr_common`
    // na pilha atual
    let frame = unsafe { &mut *frame };
    crate::interrupt::dispatch(frame);
}
