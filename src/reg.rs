//! Register access support

use core::cell::Cell;

use critical_section::Mutex;

use crate::pac::Register;

/// Replace the field at `index` of an array-like register value.
///
/// The register is viewed as an array of `bitwidth` wide fields. Only the
/// bits of field `index` change, every other bit of `reg` is kept.
#[inline]
pub const fn modify_at(reg: u8, bitwidth: u8, index: u8, value: u8) -> u8 {
    let mask = field_mask(bitwidth, index);
    let value = (value << (bitwidth * index)) & mask;
    reg & !mask | value
}

/// Read the field at `index` of an array-like register value.
#[inline]
pub const fn read_at(reg: u8, bitwidth: u8, index: u8) -> u8 {
    (reg & field_mask(bitwidth, index)) >> (bitwidth * index)
}

/// Mask covering the field at `index` of an array-like register.
#[inline]
pub const fn field_mask(bitwidth: u8, index: u8) -> u8 {
    u8::MAX >> (8 - bitwidth) << (bitwidth * index)
}

/// Access to the EXTI register block.
///
/// The driver only ever talks to the hardware through this trait, so a
/// simulated block (the `mock` feature's `MockBank`) can stand in for the
/// real one.
///
/// `write` must have hardware semantics: writing a status register
/// ([`Register::is_write_one_to_clear`]) clears the latches whose bits are
/// set in `value` and leaves the others alone.
pub trait RegisterBank {
    /// Read the current value of `reg`.
    fn read(&self, reg: Register) -> u8;

    /// Write `value` to `reg`.
    fn write(&mut self, reg: Register, value: u8);

    /// Read `reg`, pass the value through `f` and write the result back.
    #[inline]
    fn modify<F>(&mut self, reg: Register, f: F)
    where
        F: FnOnce(u8) -> u8,
    {
        let value = self.read(reg);
        self.write(reg, f(value));
    }
}

impl<B: RegisterBank + ?Sized> RegisterBank for &mut B {
    #[inline]
    fn read(&self, reg: Register) -> u8 {
        (**self).read(reg)
    }

    #[inline]
    fn write(&mut self, reg: Register, value: u8) {
        (**self).write(reg, value)
    }
}

static MMIO_TAKEN: Mutex<Cell<bool>> = Mutex::new(Cell::new(false));

/// The memory mapped EXTI register block at [`crate::pac::EXTI_BASE`].
///
/// There is exactly one of these per device. Obtain it with [`Mmio::take`].
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Take the register block, returning `None` if it was already taken.
    pub fn take() -> Option<Self> {
        critical_section::with(|cs| {
            let taken = MMIO_TAKEN.borrow(cs);
            if taken.replace(true) {
                None
            } else {
                Some(Mmio { _private: () })
            }
        })
    }

    /// Create a handle to the register block without checking ownership.
    ///
    /// # Safety
    ///
    /// Only one handle may be used at a time, otherwise read-modify-write
    /// sequences of different handles can interleave and lose updates. The
    /// target must actually map the EXTI block at [`crate::pac::EXTI_BASE`].
    #[inline]
    pub unsafe fn steal() -> Self {
        Mmio { _private: () }
    }
}

impl RegisterBank for Mmio {
    #[inline]
    fn read(&self, reg: Register) -> u8 {
        // SAFETY: The address is a valid, aligned EXTI register on this device.
        unsafe { core::ptr::read_volatile(reg.address() as *const u8) }
    }

    #[inline]
    fn write(&mut self, reg: Register, value: u8) {
        // SAFETY: The address is a valid, aligned EXTI register on this device,
        // and `&mut self` guarantees exclusive access through this handle.
        unsafe { core::ptr::write_volatile(reg.address() as *mut u8, value) }
    }
}
