//! Driver do PIT (Programmable Interval Timer) - Intel 8253/8254.
//!
//! # Responsabilidades
//! 1. Gerar o "Heartbeat" do sistema (IRQ 0, vetor 0x20).
//! 2. Contabilizar o tempo global (Ticks/Uptime).
//! 3. Acionar o Scheduler para preempção.
//!
//! # Limitações
//! - Frequência base fixa de ~1.19 MHz.
//! - Divisor de 16 bits: nada abaixo de ~18.2 Hz.

use core::sync::atomic::{AtomicU64, Ordering};

/// Frequência base do oscilador do PIT (1.193182 MHz).
pub const BASE_FREQUENCY: u32 = 1_193_182;

/// Frequência do tick do escalonador.
pub const TIMER_HZ: u32 = 100;

/// Contador global de ticks do sistema (Monotonic Clock).
/// Incrementado a cada interrupção do timer.
pub static TICKS: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// 0, acima da base ou baixa demais para o divisor de 16 bits
    InvalidFrequency,
}

impl TimerError {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TimerError::InvalidFrequency => "frequencia invalida para o PIT",
        }
    }
}

/// Divisor do canal 0 para `freq` Hz.
pub fn divisor_for(freq: u32) -> Result<u16, TimerError> {
    if freq == 0 || freq > BASE_FREQUENCY {
        return Err(TimerError::InvalidFrequency);
    }
    let divisor = BASE_FREQUENCY / freq;
    u16::try_from(divisor).map_err(|_| TimerError::InvalidFrequency)
}

/// Frequência real obtida com um divisor.
pub fn actual_frequency(divisor: u16) -> u32 {
    BASE_FREQUENCY / divisor as u32
}

/// Ticks desde o boot.
pub fn ticks() -> u64 {
    TICKS.load(Ordering::Relaxed)
}

/// Tempo de atividade do sistema em segundos (aproximado).
pub fn uptime_seconds() -> u64 {
    ticks() / TIMER_HZ as u64
}

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
pub use self::hw::*;

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
mod hw {
    use super::{actual_frequency, divisor_for, TimerError, TICKS, TIMER_HZ};
    use crate::arch::x86_64::ports::Port;
    use crate::interrupt::vectors::TIMER_VECTOR;
    use crate::interrupt::TrapFrame;
    use core::sync::atomic::Ordering;
    use spin::Mutex;

    // Portas de I/O do PIT
    const PORT_CHANNEL0: u16 = 0x40; // Canal 0 (System Timer)
    const PORT_COMMAND: u16 = 0x43; // Registrador de Comando

    /// Canal 0, lobyte/hibyte, modo 3 (onda quadrada)
    const CMD_SQUARE_WAVE: u8 = 0x36;

    /// Driver do Programmable Interval Timer.
    pub struct Pit {
        channel0: Port<u8>,
        command: Port<u8>,
        frequency: u32,
    }

    impl Pit {
        /// # Safety
        /// Acesso exclusivo às portas 0x40 e 0x43.
        pub const unsafe fn new() -> Self {
            Self {
                channel0: Port::new(PORT_CHANNEL0),
                command: Port::new(PORT_COMMAND),
                frequency: 0,
            }
        }

        /// Configura a frequência do Timer (em Hz). Devolve a frequência
        /// real, limitada pela precisão do divisor.
        pub fn set_frequency(&mut self, freq: u32) -> Result<u32, TimerError> {
            let divisor = match divisor_for(freq) {
                Ok(d) => d,
                Err(err) => {
                    crate::kwarn!("(PIT) set_frequency: Frequencia invalida: ", freq);
                    return Err(err);
                }
            };

            unsafe {
                self.command.write(CMD_SQUARE_WAVE);
                // Low byte, depois High byte
                self.channel0.write((divisor & 0xFF) as u8);
                self.channel0.write((divisor >> 8) as u8);
            }
            crate::ktrace!("(PIT) set_frequency: divisor=", divisor);

            self.frequency = actual_frequency(divisor);
            Ok(self.frequency)
        }

        pub fn frequency(&self) -> u32 {
            self.frequency
        }
    }

    /// Instância global do PIT. Só usada na configuração; o handler não a
    /// toca.
    pub static PIT: Mutex<Pit> = Mutex::new(unsafe { Pit::new() });

    /// Programa o canal 0 e instala o handler no vetor 0x20.
    pub fn init() -> Result<(), TimerError> {
        let old = crate::interrupt::disable();
        let result = PIT.lock().set_frequency(TIMER_HZ);
        crate::interrupt::set_status(old);
        let hz = result?;

        if crate::interrupt::register_handler(TIMER_VECTOR, timer_handler).is_err() {
            crate::kerror!("(PIT) Falha ao registrar handler do timer");
        }
        crate::kinfo!("(PIT) Timer configurado, Hz=", hz);
        Ok(())
    }

    /// Handler de Interrupção do Timer (IRQ 0 / Vector 32).
    ///
    /// O EOI já foi enviado pelo despacho; o tick pode trocar de task e só
    /// voltar aqui bem depois.
    fn timer_handler(_frame: &mut TrapFrame) {
        TICKS.fetch_add(1, Ordering::Relaxed);
        crate::sched::on_timer_tick();
    }
}
