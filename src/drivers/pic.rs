//! Driver do 8259 PIC (Programmable Interrupt Controller).
//!
//! # Remapeamento
//! Por padrão o PIC usa vetores 0-15, que conflitam com exceções da CPU.
//! Remapeamos mestre para 0x20 e escravo para 0x28.
//!
//! # Máscara
//! No boot só timer e teclado ficam abertos. Outros subsistemas chamam
//! `unmask` depois; linhas do escravo abrem a cascata junto.

use crate::arch::x86_64::ports::{io_wait, Port};
use crate::interrupt::irq::IrqLines;
use crate::interrupt::vectors::{PIC_MASTER_OFFSET, PIC_SLAVE_OFFSET};
use spin::Mutex;

const PIC1_CMD: u16 = 0x20;
const PIC1_DATA: u16 = 0x21;
const PIC2_CMD: u16 = 0xA0;
const PIC2_DATA: u16 = 0xA1;

/// ICW1: edge-triggered, cascata, ICW4 presente
const ICW1_INIT: u8 = 0x11;
/// ICW4: modo 8086, EOI manual
const ICW4_8086: u8 = 0x01;

const PIC_EOI: u8 = 0x20;

/// Cadeia de PICs (Master + Slave).
pub struct ChainedPics {
    pics: [Pic; 2],
    open: IrqLines,
}

struct Pic {
    offset: u8,
    command: Port<u8>,
    data: Port<u8>,
}

impl ChainedPics {
    /// # Safety
    ///
    /// Só pode existir uma instância falando com 0x20/0xA0.
    pub const unsafe fn new(offset1: u8, offset2: u8) -> Self {
        Self {
            pics: [
                Pic {
                    offset: offset1,
                    command: Port::new(PIC1_CMD),
                    data: Port::new(PIC1_DATA),
                },
                Pic {
                    offset: offset2,
                    command: Port::new(PIC2_CMD),
                    data: Port::new(PIC2_DATA),
                },
            ],
            open: IrqLines::empty(),
        }
    }

    /// Remapeia e aplica a máscara inicial.
    ///
    /// # Safety
    ///
    /// Reprograma o hardware; interrupções devem estar desabilitadas.
    pub unsafe fn init(&mut self, open: IrqLines) {
        crate::kdebug!("(PIC) init: Remapeando IRQs...");

        // ICW1
        self.pics[0].command.write(ICW1_INIT);
        io_wait();
        self.pics[1].command.write(ICW1_INIT);
        io_wait();

        // ICW2: offsets dos vetores
        self.pics[0].data.write(self.pics[0].offset);
        io_wait();
        self.pics[1].data.write(self.pics[1].offset);
        io_wait();
        crate::ktrace!("(PIC) init: ICW2 offset1=", self.pics[0].offset);
        crate::ktrace!("(PIC) init: ICW2 offset2=", self.pics[1].offset);

        // ICW3: escravo em IRQ2
        self.pics[0].data.write(4);
        io_wait();
        self.pics[1].data.write(2);
        io_wait();

        // ICW4
        self.pics[0].data.write(ICW4_8086);
        io_wait();
        self.pics[1].data.write(ICW4_8086);
        io_wait();

        self.apply(open);
        crate::kinfo!("(PIC) Inicializado e Remapeado");
    }

    /// Grava OCW1 para o conjunto de linhas abertas.
    unsafe fn apply(&mut self, open: IrqLines) {
        let (master, slave) = open.pic_masks();
        self.pics[0].data.write(master);
        self.pics[1].data.write(slave);
        self.open = open;
        crate::ktrace!("(PIC) OCW1 mestre=", master);
        crate::ktrace!("(PIC) OCW1 escravo=", slave);
    }

    /// Envia "End of Interrupt" (EOI) para o(s) chip(s) do vetor.
    ///
    /// # Safety
    ///
    /// Só para vetores que vieram de fato do PIC.
    pub unsafe fn notify_eoi(&mut self, vector: u8) {
        if vector >= self.pics[1].offset {
            self.pics[1].command.write(PIC_EOI);
        }
        self.pics[0].command.write(PIC_EOI);
    }

    /// Abre uma linha adicional (0-15).
    ///
    /// # Safety
    ///
    /// Deve existir handler registrado para o vetor da linha.
    pub unsafe fn unmask(&mut self, lines: IrqLines) {
        let open = (self.open | lines).with_cascade();
        self.apply(open);
    }

    /// Linhas atualmente abertas.
    pub fn open_lines(&self) -> IrqLines {
        self.open
    }

    /// Lê as máscaras diretamente do hardware.
    pub fn read_masks(&self) -> (u8, u8) {
        // SAFETY: ler OCW1 não tem efeito colateral
        unsafe { (self.pics[0].data.read(), self.pics[1].data.read()) }
    }
}

/// Instância global. Acesso sempre com interrupções desabilitadas, senão
/// um EOI vindo do despacho travaria contra o próprio lock.
pub static PICS: Mutex<ChainedPics> =
    Mutex::new(unsafe { ChainedPics::new(PIC_MASTER_OFFSET, PIC_SLAVE_OFFSET) });
