//! # Register description of the EXTI peripheral
//!
//! Addresses, field masks and reset values of the external interrupt
//! controller found on STM8L15x low and medium density devices.
//! See RM0031, section 12.9 (EXTI registers).
//!
//! Every value here is a fixed property of the silicon. The driver in
//! [`crate::exti`] trusts them and never validates them at runtime.

/// Base address of the EXTI register block.
pub const EXTI_BASE: usize = 0x50A0;

/// The registers of the EXTI block, in address order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Control register 1: sensitivity of pins 0 to 3.
    Cr1,
    /// Control register 2: sensitivity of pins 4 to 7.
    Cr2,
    /// Control register 3: sensitivity of ports B, D, E and F.
    Cr3,
    /// Status register 1: pending flags of pins 0 to 7.
    Sr1,
    /// Status register 2: pending flags of ports B, D, E and F.
    Sr2,
    /// Configuration register 1: half port selection and port E/F select.
    Conf1,
}

impl Register {
    /// Number of registers in the block.
    pub const COUNT: usize = 6;

    /// All registers, in address order.
    pub const ALL: [Register; Register::COUNT] = [
        Register::Cr1,
        Register::Cr2,
        Register::Cr3,
        Register::Sr1,
        Register::Sr2,
        Register::Conf1,
    ];

    /// Byte offset of the register from [`EXTI_BASE`].
    #[inline]
    pub const fn offset(self) -> usize {
        match self {
            Register::Cr1 => 0x00,
            Register::Cr2 => 0x01,
            Register::Cr3 => 0x02,
            Register::Sr1 => 0x03,
            Register::Sr2 => 0x04,
            Register::Conf1 => 0x05,
        }
    }

    /// Absolute address of the register.
    #[inline]
    pub const fn address(self) -> usize {
        EXTI_BASE + self.offset()
    }

    /// Value loaded on power-on reset.
    #[inline]
    pub const fn reset_value(self) -> u8 {
        match self {
            Register::Cr1 => CR1_RESET_VALUE,
            Register::Cr2 => CR2_RESET_VALUE,
            Register::Cr3 => CR3_RESET_VALUE,
            Register::Sr1 => SR1_RESET_VALUE,
            Register::Sr2 => SR2_RESET_VALUE,
            Register::Conf1 => CONF1_RESET_VALUE,
        }
    }

    /// Status registers latch flags in hardware and clear them when a `1` is written.
    #[inline]
    pub const fn is_write_one_to_clear(self) -> bool {
        matches!(self, Register::Sr1 | Register::Sr2)
    }
}

pub const CR1_RESET_VALUE: u8 = 0x00;
pub const CR2_RESET_VALUE: u8 = 0x00;
pub const CR3_RESET_VALUE: u8 = 0x00;
pub const SR1_RESET_VALUE: u8 = 0x00;
pub const SR2_RESET_VALUE: u8 = 0x00;
pub const CONF1_RESET_VALUE: u8 = 0x00;

/// Value written to a status register to clear every latch in it.
pub const SR_CLEAR_ALL: u8 = 0xFF;

/// Width in bits of every sensitivity field in CR1, CR2 and CR3.
pub const SENSITIVITY_BITWIDTH: u8 = 2;

// CR1
pub const CR1_P0IS: u8 = 0x03;
pub const CR1_P1IS: u8 = 0x0C;
pub const CR1_P2IS: u8 = 0x30;
pub const CR1_P3IS: u8 = 0xC0;

// CR2
pub const CR2_P4IS: u8 = 0x03;
pub const CR2_P5IS: u8 = 0x0C;
pub const CR2_P6IS: u8 = 0x30;
pub const CR2_P7IS: u8 = 0xC0;

// CR3
pub const CR3_PBIS: u8 = 0x03;
pub const CR3_PDIS: u8 = 0x0C;
pub const CR3_PEIS: u8 = 0x30;
pub const CR3_PFIS: u8 = 0xC0;

// SR1
pub const SR1_P0F: u8 = 0x01;
pub const SR1_P1F: u8 = 0x02;
pub const SR1_P2F: u8 = 0x04;
pub const SR1_P3F: u8 = 0x08;
pub const SR1_P4F: u8 = 0x10;
pub const SR1_P5F: u8 = 0x20;
pub const SR1_P6F: u8 = 0x40;
pub const SR1_P7F: u8 = 0x80;

// SR2
pub const SR2_PBF: u8 = 0x01;
pub const SR2_PDF: u8 = 0x02;
pub const SR2_PEF: u8 = 0x04;
pub const SR2_PFF: u8 = 0x08;

// CONF1
pub const CONF1_PBLIS: u8 = 0x01;
pub const CONF1_PBHIS: u8 = 0x02;
pub const CONF1_PDLIS: u8 = 0x04;
pub const CONF1_PDHIS: u8 = 0x08;
pub const CONF1_PELIS: u8 = 0x10;
pub const CONF1_PEHIS: u8 = 0x20;
pub const CONF1_PFLIS: u8 = 0x40;
pub const CONF1_PFES: u8 = 0x80;

/// Marker in the high nibble of an interrupt code that selects SR2.
pub const IT_SR2_MARKER: u8 = 0xF0;
