/*!
 # STM8L15x external interrupt controller

   Driver for the EXTI peripheral of STM8L15x low and medium density devices.
   It configures which edge or level on a pin or on a whole port raises an
   interrupt, selects the half ports that feed the port interrupts, and reads
   and clears the pending flags.

   The driver does not install interrupt handlers, and it expects GPIO modes
   and clocks to be configured already.

   ```no_run
   use stm8l15x_exti::exti::{Exti, Interrupt, Pin, Trigger};
   use stm8l15x_exti::reg::Mmio;

   let mut exti = Exti::new(Mmio::take().unwrap());
   exti.deinit();
   critical_section::with(|cs| exti.set_pin_sensitivity(Pin::P5, Trigger::Rising, cs));

   if exti.is_interrupt_pending(Interrupt::Pin5) {
       exti.clear_interrupt(Interrupt::Pin5);
   }
   ```

 # Features

   *   `defmt`: `defmt::Format` for all public types and trace logging of
       every register access made by the driver.
   *   `enumset`: set based operations on pins and pending flags.
   *   `mock`: `mock::MockBank`, an in-memory register block for host tests.
*/
#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod exti;
#[cfg(feature = "mock")]
#[cfg_attr(docsrs, doc(cfg(feature = "mock")))]
pub mod mock;
pub mod pac;
pub mod reg;

pub use crate::exti::{EfSource, Error, Exti, HalfPort, Interrupt, Pin, Port, Trigger};

/// Switch something on or off.
///
/// Convenience enum and alternative to pass a bool.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Switch {
    /// Switch something on / enable a thing.
    On,
    /// Switch something off / disable a thing.
    Off,
}

impl From<Switch> for bool {
    fn from(switch: Switch) -> Self {
        matches!(switch, Switch::On)
    }
}

impl From<bool> for Switch {
    fn from(b: bool) -> Self {
        if b {
            Switch::On
        } else {
            Switch::Off
        }
    }
}
