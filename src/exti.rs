//! # External interrupt controller
//!
//! Configure the sensitivity of the external interrupt lines of the STM8L15x
//! and inspect their pending flags.
//! See RM0031, section 12.9.
//!
//! Every pin `Px0` to `Px7` has its own interrupt line, shared by all ports.
//! In addition the ports B, D, E and F each have one port wide line, fed by the
//! half ports enabled with [`Exti::set_half_port_selection`].
//!
//! Sensitivity fields are packed four per register:
//!
//! | Register | Bits 7:6 | Bits 5:4 | Bits 3:2 | Bits 1:0 |
//! |----------|----------|----------|----------|----------|
//! | CR1      | P3IS     | P2IS     | P1IS     | P0IS     |
//! | CR2      | P7IS     | P6IS     | P5IS     | P4IS     |
//! | CR3      | PFIS     | PEIS     | PDIS     | PBIS     |
//!
//! # Note
//!
//! The hardware only accepts sensitivity changes while interrupts are
//! disabled. The sensitivity setters therefore take a
//! [`CriticalSection`] token:
//!
//! ```no_run
//! # use stm8l15x_exti::{Exti, Pin, Port, Trigger};
//! # let mut exti = Exti::new(stm8l15x_exti::reg::Mmio::take().unwrap());
//! critical_section::with(|cs| {
//!     exti.set_port_sensitivity(Port::B, Trigger::Falling, cs);
//!     exti.set_pin_sensitivity(Pin::P2, Trigger::RisingFalling, cs);
//! });
//! ```

use core::fmt;

use critical_section::CriticalSection;
#[cfg(feature = "enumset")]
use enumset::{EnumSet, EnumSetType};

use crate::pac::{self, Register, SENSITIVITY_BITWIDTH};
use crate::reg::{self, RegisterBank};
use crate::Switch;

/// Errors raised when converting raw values into EXTI identifiers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// Pin number outside of `0..=7`.
    InvalidPin(u8),
    /// Port letter other than `B`, `D`, `E` or `F`.
    InvalidPort(char),
    /// Sensitivity value outside of `0..=3`.
    InvalidTrigger(u8),
    /// Value is not a single half port bit of CONF1.
    InvalidHalfPort(u8),
    /// Value is not a known interrupt code.
    InvalidInterrupt(u8),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPin(n) => write!(f, "invalid EXTI pin {}", n),
            Error::InvalidPort(p) => write!(f, "invalid EXTI port {:?}", p),
            Error::InvalidTrigger(t) => write!(f, "invalid EXTI sensitivity {:#04x}", t),
            Error::InvalidHalfPort(h) => write!(f, "invalid EXTI half port {:#04x}", h),
            Error::InvalidInterrupt(i) => write!(f, "invalid EXTI interrupt {:#04x}", i),
        }
    }
}

/// Edge or level that raises an external interrupt.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Trigger {
    /// Falling edge and low level.
    FallingLow = 0b00,
    /// Rising edge only.
    Rising = 0b01,
    /// Falling edge only.
    Falling = 0b10,
    /// Rising and falling edge.
    RisingFalling = 0b11,
}

impl Trigger {
    /// Decode a 2 bit sensitivity field. Bits above the field are ignored.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Trigger::FallingLow,
            0b01 => Trigger::Rising,
            0b10 => Trigger::Falling,
            _ => Trigger::RisingFalling,
        }
    }

    /// Raw 2 bit encoding of the sensitivity.
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

impl Default for Trigger {
    /// Sensitivity after reset.
    fn default() -> Self {
        Trigger::FallingLow
    }
}

impl TryFrom<u8> for Trigger {
    type Error = Error;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        if bits > 0b11 {
            return Err(Error::InvalidTrigger(bits));
        }
        Ok(Trigger::from_bits(bits))
    }
}

/// Location of a 2 bit sensitivity field.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    /// Register holding the field.
    pub register: Register,
    /// Index of the field when the register is viewed as an array of 2 bit fields.
    pub index: u8,
}

impl Field {
    const fn new(register: Register, index: u8) -> Self {
        Field { register, index }
    }

    /// Bit offset of the field inside its register.
    #[inline]
    pub const fn shift(&self) -> u8 {
        SENSITIVITY_BITWIDTH * self.index
    }

    /// Bits of the register covered by the field.
    #[inline]
    pub const fn mask(&self) -> u8 {
        reg::field_mask(SENSITIVITY_BITWIDTH, self.index)
    }
}

/// Pin sensitivity fields, indexed by pin number.
const PIN_FIELDS: [Field; 8] = [
    Field::new(Register::Cr1, 0),
    Field::new(Register::Cr1, 1),
    Field::new(Register::Cr1, 2),
    Field::new(Register::Cr1, 3),
    Field::new(Register::Cr2, 0),
    Field::new(Register::Cr2, 1),
    Field::new(Register::Cr2, 2),
    Field::new(Register::Cr2, 3),
];

/// Port sensitivity fields, in [`Port`] order.
const PORT_FIELDS: [Field; 4] = [
    Field::new(Register::Cr3, 0),
    Field::new(Register::Cr3, 1),
    Field::new(Register::Cr3, 2),
    Field::new(Register::Cr3, 3),
];

/// Pin index `Px0` to `Px7`, shared by all GPIO ports.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "enumset", derive(EnumSetType))]
#[cfg_attr(not(feature = "enumset"), derive(Copy, Clone, PartialEq, Eq))]
pub enum Pin {
    P0,
    P1,
    P2,
    P3,
    P4,
    P5,
    P6,
    P7,
}

impl Pin {
    /// All pins, in ascending order.
    pub const ALL: [Pin; 8] = [
        Pin::P0,
        Pin::P1,
        Pin::P2,
        Pin::P3,
        Pin::P4,
        Pin::P5,
        Pin::P6,
        Pin::P7,
    ];

    /// Pin number `0..=7`.
    #[inline]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Sensitivity field of the pin.
    ///
    /// Pins 0 to 3 live in CR1, pins 4 to 7 in CR2.
    #[inline]
    pub const fn field(self) -> Field {
        PIN_FIELDS[self as usize]
    }

    /// Pending flag of the pin's interrupt line.
    #[inline]
    pub const fn interrupt(self) -> Interrupt {
        match self {
            Pin::P0 => Interrupt::Pin0,
            Pin::P1 => Interrupt::Pin1,
            Pin::P2 => Interrupt::Pin2,
            Pin::P3 => Interrupt::Pin3,
            Pin::P4 => Interrupt::Pin4,
            Pin::P5 => Interrupt::Pin5,
            Pin::P6 => Interrupt::Pin6,
            Pin::P7 => Interrupt::Pin7,
        }
    }
}

impl TryFrom<u8> for Pin {
    type Error = Error;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Pin::ALL
            .get(usize::from(n))
            .copied()
            .ok_or(Error::InvalidPin(n))
    }
}

/// GPIO port with a port wide interrupt line.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "enumset", derive(EnumSetType))]
#[cfg_attr(not(feature = "enumset"), derive(Copy, Clone, PartialEq, Eq))]
pub enum Port {
    B,
    D,
    E,
    F,
}

impl Port {
    /// All ports with a port interrupt.
    pub const ALL: [Port; 4] = [Port::B, Port::D, Port::E, Port::F];

    /// Sensitivity field of the port in CR3.
    #[inline]
    pub const fn field(self) -> Field {
        PORT_FIELDS[self as usize]
    }

    /// Pending flag of the port's interrupt line.
    #[inline]
    pub const fn interrupt(self) -> Interrupt {
        match self {
            Port::B => Interrupt::PortB,
            Port::D => Interrupt::PortD,
            Port::E => Interrupt::PortE,
            Port::F => Interrupt::PortF,
        }
    }

    /// Port letter.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            Port::B => 'B',
            Port::D => 'D',
            Port::E => 'E',
            Port::F => 'F',
        }
    }
}

impl TryFrom<char> for Port {
    type Error = Error;

    fn try_from(letter: char) -> Result<Self, Self::Error> {
        match letter.to_ascii_uppercase() {
            'B' => Ok(Port::B),
            'D' => Ok(Port::D),
            'E' => Ok(Port::E),
            'F' => Ok(Port::F),
            _ => Err(Error::InvalidPort(letter)),
        }
    }
}

/// Half of a port (pins 0 to 3 or pins 4 to 7) that can feed the port interrupt.
///
/// Port F only has its low half selectable.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalfPort {
    /// `PB0` to `PB3`
    BLsb,
    /// `PB4` to `PB7`
    BMsb,
    /// `PD0` to `PD3`
    DLsb,
    /// `PD4` to `PD7`
    DMsb,
    /// `PE0` to `PE3`
    ELsb,
    /// `PE4` to `PE7`
    EMsb,
    /// `PF0` to `PF3`
    FLsb,
}

impl HalfPort {
    /// All selectable half ports.
    pub const ALL: [HalfPort; 7] = [
        HalfPort::BLsb,
        HalfPort::BMsb,
        HalfPort::DLsb,
        HalfPort::DMsb,
        HalfPort::ELsb,
        HalfPort::EMsb,
        HalfPort::FLsb,
    ];

    /// Selection bit in CONF1.
    #[inline]
    pub const fn mask(self) -> u8 {
        match self {
            HalfPort::BLsb => pac::CONF1_PBLIS,
            HalfPort::BMsb => pac::CONF1_PBHIS,
            HalfPort::DLsb => pac::CONF1_PDLIS,
            HalfPort::DMsb => pac::CONF1_PDHIS,
            HalfPort::ELsb => pac::CONF1_PELIS,
            HalfPort::EMsb => pac::CONF1_PEHIS,
            HalfPort::FLsb => pac::CONF1_PFLIS,
        }
    }

    /// Port the half belongs to.
    #[inline]
    pub const fn port(self) -> Port {
        match self {
            HalfPort::BLsb | HalfPort::BMsb => Port::B,
            HalfPort::DLsb | HalfPort::DMsb => Port::D,
            HalfPort::ELsb | HalfPort::EMsb => Port::E,
            HalfPort::FLsb => Port::F,
        }
    }
}

impl TryFrom<u8> for HalfPort {
    type Error = Error;

    fn try_from(mask: u8) -> Result<Self, Self::Error> {
        HalfPort::ALL
            .iter()
            .copied()
            .find(|half| half.mask() == mask)
            .ok_or(Error::InvalidHalfPort(mask))
    }
}

/// Port driving the shared port E/F interrupt line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EfSource {
    /// Port E drives the line. Reset state.
    PortE,
    /// Port F drives the line.
    PortF,
}

/// Pending flag of an external interrupt line.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "enumset", derive(EnumSetType))]
#[cfg_attr(not(feature = "enumset"), derive(Copy, Clone, PartialEq, Eq))]
pub enum Interrupt {
    Pin0,
    Pin1,
    Pin2,
    Pin3,
    Pin4,
    Pin5,
    Pin6,
    Pin7,
    PortB,
    PortD,
    PortE,
    PortF,
}

impl Interrupt {
    /// All pending flags, SR1 flags first.
    pub const ALL: [Interrupt; 12] = [
        Interrupt::Pin0,
        Interrupt::Pin1,
        Interrupt::Pin2,
        Interrupt::Pin3,
        Interrupt::Pin4,
        Interrupt::Pin5,
        Interrupt::Pin6,
        Interrupt::Pin7,
        Interrupt::PortB,
        Interrupt::PortD,
        Interrupt::PortE,
        Interrupt::PortF,
    ];

    /// Interrupt code as used by the ST peripheral library.
    ///
    /// Pin flags are their SR1 bit. Port flags carry `0xF` in the high
    /// nibble and their SR2 bit in the low nibble.
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            Interrupt::Pin0 => pac::SR1_P0F,
            Interrupt::Pin1 => pac::SR1_P1F,
            Interrupt::Pin2 => pac::SR1_P2F,
            Interrupt::Pin3 => pac::SR1_P3F,
            Interrupt::Pin4 => pac::SR1_P4F,
            Interrupt::Pin5 => pac::SR1_P5F,
            Interrupt::Pin6 => pac::SR1_P6F,
            Interrupt::Pin7 => pac::SR1_P7F,
            Interrupt::PortB => pac::IT_SR2_MARKER | pac::SR2_PBF,
            Interrupt::PortD => pac::IT_SR2_MARKER | pac::SR2_PDF,
            Interrupt::PortE => pac::IT_SR2_MARKER | pac::SR2_PEF,
            Interrupt::PortF => pac::IT_SR2_MARKER | pac::SR2_PFF,
        }
    }

    /// Status register and bit mask of the flag.
    #[inline]
    pub const fn status_bit(self) -> (Register, u8) {
        let code = self.code();
        if code & pac::IT_SR2_MARKER == pac::IT_SR2_MARKER {
            (Register::Sr2, code & !pac::IT_SR2_MARKER)
        } else {
            (Register::Sr1, code)
        }
    }
}

impl TryFrom<u8> for Interrupt {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Interrupt::ALL
            .iter()
            .copied()
            .find(|it| it.code() == code)
            .ok_or(Error::InvalidInterrupt(code))
    }
}

/// External interrupt controller
///
/// Owns the [`RegisterBank`] it drives. Acquire the hardware bank with
/// [`crate::reg::Mmio::take`].
pub struct Exti<B> {
    bank: B,
}

#[cfg(feature = "defmt")]
impl<B> defmt::Format for Exti<B> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Exti {{ .. }}");
    }
}

impl<B> fmt::Debug for Exti<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exti").finish()
    }
}

impl<B> Exti<B>
where
    B: RegisterBank,
{
    /// Wrap a register bank.
    ///
    /// The registers are left untouched, call [`Exti::deinit`] to start
    /// from the reset configuration.
    pub fn new(bank: B) -> Self {
        Exti { bank }
    }

    /// Release the register bank.
    pub fn free(self) -> B {
        self.bank
    }

    /// Put every EXTI register back into its reset state.
    ///
    /// All sensitivities become [`Trigger::FallingLow`], all half ports are
    /// deselected and every pending flag is cleared.
    pub fn deinit(&mut self) {
        debug!("EXTI: deinit");
        self.bank.write(Register::Cr1, pac::CR1_RESET_VALUE);
        self.bank.write(Register::Cr2, pac::CR2_RESET_VALUE);
        self.bank.write(Register::Cr3, pac::CR3_RESET_VALUE);
        self.bank.write(Register::Sr1, pac::SR_CLEAR_ALL);
        self.bank.write(Register::Sr2, pac::SR_CLEAR_ALL);
        self.bank.write(Register::Conf1, pac::CONF1_RESET_VALUE);
    }

    fn write_field(&mut self, field: Field, trigger: Trigger) {
        self.bank.modify(field.register, |r| {
            reg::modify_at(r, SENSITIVITY_BITWIDTH, field.index, trigger.bits())
        });
    }

    fn read_field(&self, field: Field) -> Trigger {
        let r = self.bank.read(field.register);
        Trigger::from_bits(reg::read_at(r, SENSITIVITY_BITWIDTH, field.index))
    }

    /// Set the sensitivity of a whole port.
    ///
    /// Only the field of `port` in CR3 changes. Requires interrupts to be
    /// disabled, hence the critical section token.
    pub fn set_port_sensitivity(&mut self, port: Port, trigger: Trigger, _cs: CriticalSection<'_>) {
        trace!("EXTI: port {} sensitivity {}", port, trigger);
        self.write_field(port.field(), trigger);
    }

    /// Get the sensitivity of a whole port.
    pub fn port_sensitivity(&self, port: Port) -> Trigger {
        self.read_field(port.field())
    }

    /// Set the sensitivity of a pin interrupt line.
    ///
    /// Only the field of `pin` in CR1 or CR2 changes. Requires interrupts to
    /// be disabled, hence the critical section token.
    pub fn set_pin_sensitivity(&mut self, pin: Pin, trigger: Trigger, _cs: CriticalSection<'_>) {
        trace!("EXTI: pin {} sensitivity {}", pin, trigger);
        self.write_field(pin.field(), trigger);
    }

    /// Get the sensitivity of a pin interrupt line.
    pub fn pin_sensitivity(&self, pin: Pin) -> Trigger {
        self.read_field(pin.field())
    }

    /// Set the same sensitivity for every pin in `pins`.
    ///
    /// Pins outside of the set keep their sensitivity.
    #[cfg(feature = "enumset")]
    #[cfg_attr(docsrs, doc(cfg(feature = "enumset")))]
    pub fn configure_pins(
        &mut self,
        pins: EnumSet<Pin>,
        trigger: Trigger,
        cs: CriticalSection<'_>,
    ) {
        for pin in pins.iter() {
            self.set_pin_sensitivity(pin, trigger, cs);
        }
    }

    /// Enable or disable a half port as source of its port interrupt.
    ///
    /// Only the selection bit of `half_port` in CONF1 changes. The other half
    /// ports and the port E/F source select keep their value.
    ///
    /// # Note
    ///
    /// Configure the port sensitivity with [`Exti::set_port_sensitivity`]
    /// first, otherwise the selection has no effect on the port interrupt.
    pub fn set_half_port_selection(&mut self, half_port: HalfPort, enable: impl Into<Switch>) {
        let enable: Switch = enable.into();
        let enable: bool = enable.into();
        trace!("EXTI: half port {} selected {}", half_port, enable);
        let bit = half_port.mask();
        self.bank.modify(Register::Conf1, |r| if enable { r | bit } else { r & !bit });
    }

    /// Whether a half port is selected as source of its port interrupt.
    pub fn half_port_selection(&self, half_port: HalfPort) -> bool {
        self.bank.read(Register::Conf1) & half_port.mask() != 0
    }

    /// Choose which port drives the shared port E/F interrupt line.
    pub fn select_port_ef_source(&mut self, source: EfSource) {
        trace!("EXTI: port E/F source {}", source);
        self.bank.modify(Register::Conf1, |r| match source {
            EfSource::PortE => r & !pac::CONF1_PFES,
            EfSource::PortF => r | pac::CONF1_PFES,
        });
    }

    /// Port currently driving the shared port E/F interrupt line.
    pub fn port_ef_source(&self) -> EfSource {
        if self.bank.read(Register::Conf1) & pac::CONF1_PFES != 0 {
            EfSource::PortF
        } else {
            EfSource::PortE
        }
    }

    /// Check if the interrupt flag is set.
    pub fn is_interrupt_pending(&self, interrupt: Interrupt) -> bool {
        let (register, mask) = interrupt.status_bit();
        self.bank.read(register) & mask != 0
    }

    /// Get an [`EnumSet`] of all pending interrupt flags.
    #[cfg(feature = "enumset")]
    #[cfg_attr(docsrs, doc(cfg(feature = "enumset")))]
    pub fn pending_interrupts(&self) -> EnumSet<Interrupt> {
        let mut pending = EnumSet::new();

        for interrupt in EnumSet::<Interrupt>::all().iter() {
            if self.is_interrupt_pending(interrupt) {
                pending |= interrupt;
            }
        }

        pending
    }

    /// Clear the given interrupt flag.
    ///
    /// The status registers are write-1-to-clear, so only the flag's own bit
    /// is written and the other flags are unaffected.
    pub fn clear_interrupt(&mut self, interrupt: Interrupt) {
        trace!("EXTI: clear {}", interrupt);
        let (register, mask) = interrupt.status_bit();
        self.bank.write(register, mask);
    }

    /// Clear **all** interrupt flags.
    pub fn clear_interrupts(&mut self) {
        trace!("EXTI: clear all");
        self.bank.write(Register::Sr1, pac::SR_CLEAR_ALL);
        self.bank.write(Register::Sr2, pac::SR_CLEAR_ALL);
    }
}
