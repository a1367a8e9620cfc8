//! Layout do trap frame.
//!
//! Contrato binário com os trampolins em `arch::x86_64::interrupts`: o
//! stub empilha código de erro (ou 0) e o vetor, o caminho comum empilha
//! os registradores gerais de rax a r15 e passa `rsp` ao despacho. A CPU
//! já empilhou rip/cs/rflags/rsp/ss. Mudar a ordem aqui exige mudar o
//! assembly junto.

#[derive(Debug, Clone, Copy, Default)]
#[repr(C)]
pub struct TrapFrame {
    pub r15: u64,
    pub r14: u64,
    pub r13: u64,
    pub r12: u64,
    pub r11: u64,
    pub r10: u64,
    pub r9: u64,
    pub r8: u64,
    pub rbp: u64,
    pub rdi: u64,
    pub rsi: u64,
    pub rdx: u64,
    pub rcx: u64,
    pub rbx: u64,
    pub rax: u64,

    // Empilhados pelo stub do vetor
    pub vector: u64,
    pub error_code: u64,

    // Empilhados pela CPU
    pub rip: u64,
    pub cs: u64,
    pub rflags: u64,
    pub rsp: u64,
    pub ss: u64,
}

impl TrapFrame {
    /// Frame sintético para um vetor, usado por testes e self-tests.
    pub const fn for_vector(vector: usize) -> Self {
        let mut frame = Self::zeroed();
        frame.vector = vector as u64;
        frame
    }

    const fn zeroed() -> Self {
        Self {
            r15: 0,
            r14: 0,
            r13: 0,
            r12: 0,
            r11: 0,
            r10: 0,
            r9: 0,
            r8: 0,
            rbp: 0,
            rdi: 0,
            rsi: 0,
            rdx: 0,
            rcx: 0,
            rbx: 0,
            rax: 0,
            vector: 0,
            error_code: 0,
            rip: 0,
            cs: 0,
            rflags: 0,
            rsp: 0,
            ss: 0,
        }
    }

    pub const fn vector(&self) -> usize {
        self.vector as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::{offset_of, size_of};

    #[test]
    fn test_layout_matches_trampoline() {
        // 15 GPRs + vetor + erro + 5 da CPU
        assert_eq!(size_of::<TrapFrame>(), 22 * 8);
        assert_eq!(offset_of!(TrapFrame, rax), 14 * 8);
        assert_eq!(offset_of!(TrapFrame, vector), 15 * 8);
        assert_eq!(offset_of!(TrapFrame, rip), 17 * 8);
    }
}
