//! Linhas de IRQ do par de 8259 e o cálculo das máscaras (OCW1).

use bitflags::bitflags;

bitflags! {
    /// Conjunto de linhas de IRQ (0-15). Bit presente = linha liberada.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct IrqLines: u16 {
        const TIMER = 1 << 0;
        const KEYBOARD = 1 << 1;
        const CASCADE = 1 << 2;
        const COM2 = 1 << 3;
        const COM1 = 1 << 4;
        const LPT2 = 1 << 5;
        const FLOPPY = 1 << 6;
        const LPT1 = 1 << 7;
        const RTC = 1 << 8;
        const ACPI = 1 << 9;
        const FREE_10 = 1 << 10;
        const FREE_11 = 1 << 11;
        const MOUSE = 1 << 12;
        const FPU = 1 << 13;
        const ATA_PRIMARY = 1 << 14;
        const ATA_SECONDARY = 1 << 15;
    }
}

impl IrqLines {
    /// Linhas abertas no boot: só timer e teclado.
    pub const BOOT: IrqLines = IrqLines::TIMER.union(IrqLines::KEYBOARD);

    /// Linha única a partir do número da IRQ.
    pub fn from_irq(irq: u8) -> Option<IrqLines> {
        if irq < 16 {
            Some(IrqLines::from_bits_retain(1 << irq))
        } else {
            None
        }
    }

    /// Completa o conjunto: qualquer linha do escravo exige a cascata.
    pub fn with_cascade(self) -> IrqLines {
        if self.bits() & 0xFF00 != 0 {
            self | IrqLines::CASCADE
        } else {
            self
        }
    }

    /// Máscaras (mestre, escravo) para OCW1. Bit 1 = linha mascarada.
    pub fn pic_masks(self) -> (u8, u8) {
        let open = self.bits();
        (!(open as u8), !((open >> 8) as u8))
    }

    /// Inverso de `pic_masks`.
    pub fn from_pic_masks(master: u8, slave: u8) -> IrqLines {
        let open = (!master as u16) | ((!slave as u16) << 8);
        IrqLines::from_bits_retain(open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_masks_open_only_timer_and_keyboard() {
        assert_eq!(IrqLines::BOOT.pic_masks(), (0xFC, 0xFF));
    }

    #[test]
    fn test_slave_line_pulls_cascade() {
        let lines = (IrqLines::BOOT | IrqLines::ATA_PRIMARY).with_cascade();
        assert!(lines.contains(IrqLines::CASCADE));
        assert_eq!(lines.pic_masks(), (0xF8, 0xBF));
        assert_eq!(IrqLines::BOOT.with_cascade(), IrqLines::BOOT);
    }

    #[test]
    fn test_masks_round_trip_through_hardware_encoding() {
        let lines = IrqLines::TIMER | IrqLines::MOUSE | IrqLines::CASCADE;
        let (m, s) = lines.pic_masks();
        assert_eq!(IrqLines::from_pic_masks(m, s), lines);
    }

    #[test]
    fn test_from_irq() {
        assert_eq!(IrqLines::from_irq(0), Some(IrqLines::TIMER));
        assert_eq!(IrqLines::from_irq(14), Some(IrqLines::ATA_PRIMARY));
        assert_eq!(IrqLines::from_irq(16), None);
    }
}
