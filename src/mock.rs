//! In-memory EXTI register block
//!
//! [`MockBank`] behaves like the hardware block as far as the driver can
//! observe: control registers store what is written, status registers are
//! write-1-to-clear and only get set by [`MockBank::raise`], which stands in
//! for the edge detector.

use crate::exti::Interrupt;
use crate::pac::Register;
use crate::reg::RegisterBank;

/// Simulated EXTI register block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MockBank {
    regs: [u8; Register::COUNT],
    last_writes: [Option<u8>; Register::COUNT],
    writes: usize,
}

impl MockBank {
    /// A register block in its power-on reset state.
    pub const fn new() -> Self {
        MockBank {
            regs: [
                Register::Cr1.reset_value(),
                Register::Cr2.reset_value(),
                Register::Cr3.reset_value(),
                Register::Sr1.reset_value(),
                Register::Sr2.reset_value(),
                Register::Conf1.reset_value(),
            ],
            last_writes: [None; Register::COUNT],
            writes: 0,
        }
    }

    /// Current content of `reg`, without going through the driver.
    pub fn peek(&self, reg: Register) -> u8 {
        self.regs[reg.offset()]
    }

    /// Overwrite `reg` directly, bypassing write-1-to-clear semantics.
    ///
    /// The write is not recorded.
    pub fn poke(&mut self, reg: Register, value: u8) {
        self.regs[reg.offset()] = value;
    }

    /// Latch the pending flag of `interrupt`, as an edge on the line would.
    pub fn raise(&mut self, interrupt: Interrupt) {
        let (register, mask) = interrupt.status_bit();
        self.regs[register.offset()] |= mask;
    }

    /// Latch every pending flag.
    pub fn raise_all(&mut self) {
        for interrupt in Interrupt::ALL.iter() {
            self.raise(*interrupt);
        }
    }

    /// Raw value of the last write to `reg`, if any.
    pub fn last_write(&self, reg: Register) -> Option<u8> {
        self.last_writes[reg.offset()]
    }

    /// Number of register writes made so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl Default for MockBank {
    fn default() -> Self {
        MockBank::new()
    }
}

impl RegisterBank for MockBank {
    fn read(&self, reg: Register) -> u8 {
        self.peek(reg)
    }

    fn write(&mut self, reg: Register, value: u8) {
        let slot = &mut self.regs[reg.offset()];
        if reg.is_write_one_to_clear() {
            *slot &= !value;
        } else {
            *slot = value;
        }
        self.last_writes[reg.offset()] = Some(value);
        self.writes += 1;
    }
}
