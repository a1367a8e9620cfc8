//! Números de vetor e nomes das exceções.

/// Quantidade de gates na IDT: 0x00..=0x7F mais o gate de syscall.
pub const IDT_DESC_CNT: usize = 0x81;

/// Último vetor, reservado para a entrada de syscall (DPL 3).
pub const SYSCALL_VECTOR: usize = 0x80;

/// Base das IRQs do PIC mestre depois do remapeamento.
pub const PIC_MASTER_OFFSET: u8 = 0x20;

/// Base das IRQs do PIC escravo depois do remapeamento.
pub const PIC_SLAVE_OFFSET: u8 = 0x28;

pub const TIMER_VECTOR: usize = PIC_MASTER_OFFSET as usize;
pub const KEYBOARD_VECTOR: usize = PIC_MASTER_OFFSET as usize + 1;

pub const PAGE_FAULT_VECTOR: usize = 14;

/// IRQ7 e IRQ15 espúrias: o PIC gera esses vetores sem causa real.
pub const SPURIOUS_VECTORS: [usize; 2] = [0x27, 0x2F];

const EXCEPTION_NAMES: [&str; 20] = [
    "#DE Divide Error",
    "#DB Debug Exception",
    "NMI Interrupt",
    "#BP Breakpoint Exception",
    "#OF Overflow Exception",
    "#BR BOUND Range Exceeded Exception",
    "#UD Invalid Opcode Exception",
    "#NM Device Not Available Exception",
    "#DF Double Fault Exception",
    "Coprocessor Segment Overrun",
    "#TS Invalid TSS Exception",
    "#NP Segment Not Present",
    "#SS Stack Fault Exception",
    "#GP General Protection Exception",
    "#PF Page-Fault Exception",
    "unknown", // 15 é reservado pela Intel
    "#MF x87 FPU Floating-Point Error",
    "#AC Alignment Check Exception",
    "#MC Machine-Check Exception",
    "#XF SIMD Floating-Point Exception",
];

/// Nome simbólico de um vetor.
pub fn exception_name(vector: usize) -> &'static str {
    EXCEPTION_NAMES.get(vector).copied().unwrap_or("unknown")
}

/// Vetores em que a CPU empilha um código de erro.
pub const fn has_error_code(vector: usize) -> bool {
    matches!(vector, 8 | 10..=14 | 17 | 21 | 29 | 30)
}

/// Vetor atendido pelo par de PICs (0x20..0x30).
pub const fn is_pic_vector(vector: usize) -> bool {
    vector >= PIC_MASTER_OFFSET as usize && vector < PIC_SLAVE_OFFSET as usize + 8
}

pub fn is_spurious(vector: usize) -> bool {
    SPURIOUS_VECTORS.contains(&vector)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exception_names() {
        assert_eq!(exception_name(0), "#DE Divide Error");
        assert_eq!(exception_name(PAGE_FAULT_VECTOR), "#PF Page-Fault Exception");
        assert_eq!(exception_name(15), "unknown");
        assert_eq!(exception_name(19), "#XF SIMD Floating-Point Exception");
        assert_eq!(exception_name(0x20), "unknown");
        assert_eq!(exception_name(SYSCALL_VECTOR), "unknown");
    }

    #[test]
    fn test_vector_classes() {
        assert!(has_error_code(14));
        assert!(has_error_code(8));
        assert!(!has_error_code(3));
        assert!(is_pic_vector(TIMER_VECTOR));
        assert!(is_pic_vector(0x2F));
        assert!(!is_pic_vector(0x30));
        assert!(is_spurious(0x27));
        assert!(!is_spurious(KEYBOARD_VECTOR));
    }
}
