use stm8l15x_exti::reg::Mmio;
use stm8l15x_exti::{Error, HalfPort, Interrupt, Pin, Port, Trigger};

#[test]
fn pins_convert_from_numbers() {
    for n in 0..8u8 {
        let pin = Pin::try_from(n).unwrap();
        assert_eq!(pin.number(), n);
    }
    assert_eq!(Pin::try_from(8u8), Err(Error::InvalidPin(8)));
    assert_eq!(Pin::try_from(0x10u8), Err(Error::InvalidPin(0x10)));
}

#[test]
fn ports_convert_from_letters() {
    assert_eq!(Port::try_from('B'), Ok(Port::B));
    assert_eq!(Port::try_from('f'), Ok(Port::F));
    assert_eq!(Port::try_from('A'), Err(Error::InvalidPort('A')));
    assert_eq!(Port::try_from('C'), Err(Error::InvalidPort('C')));
    for &port in Port::ALL.iter() {
        assert_eq!(Port::try_from(port.letter()), Ok(port));
    }
}

#[test]
fn triggers_convert_from_two_bit_values() {
    assert_eq!(Trigger::try_from(0u8), Ok(Trigger::FallingLow));
    assert_eq!(Trigger::try_from(1u8), Ok(Trigger::Rising));
    assert_eq!(Trigger::try_from(2u8), Ok(Trigger::Falling));
    assert_eq!(Trigger::try_from(3u8), Ok(Trigger::RisingFalling));
    assert_eq!(Trigger::try_from(4u8), Err(Error::InvalidTrigger(4)));
    assert_eq!(Trigger::default(), Trigger::FallingLow);
}

#[test]
fn half_ports_convert_from_conf1_bits() {
    for &half_port in HalfPort::ALL.iter() {
        assert_eq!(HalfPort::try_from(half_port.mask()), Ok(half_port));
    }
    // PFES is not a half port.
    assert_eq!(HalfPort::try_from(0x80u8), Err(Error::InvalidHalfPort(0x80)));
    assert_eq!(HalfPort::try_from(0x03u8), Err(Error::InvalidHalfPort(0x03)));
}

#[test]
fn interrupts_convert_from_library_codes() {
    assert_eq!(Interrupt::try_from(0x01u8), Ok(Interrupt::Pin0));
    assert_eq!(Interrupt::try_from(0x80u8), Ok(Interrupt::Pin7));
    assert_eq!(Interrupt::try_from(0xF1u8), Ok(Interrupt::PortB));
    assert_eq!(Interrupt::try_from(0xF2u8), Ok(Interrupt::PortD));
    assert_eq!(Interrupt::try_from(0xF4u8), Ok(Interrupt::PortE));
    assert_eq!(Interrupt::try_from(0xF8u8), Ok(Interrupt::PortF));
    assert_eq!(Interrupt::try_from(0x03u8), Err(Error::InvalidInterrupt(0x03)));
    assert_eq!(Interrupt::try_from(0xF0u8), Err(Error::InvalidInterrupt(0xF0)));
}

#[test]
fn errors_display_the_rejected_value() {
    assert_eq!(Error::InvalidPin(9).to_string(), "invalid EXTI pin 9");
    assert_eq!(Error::InvalidTrigger(4).to_string(), "invalid EXTI sensitivity 0x04");
    assert_eq!(Error::InvalidPort('Z').to_string(), "invalid EXTI port 'Z'");
}

#[test]
fn register_block_can_only_be_taken_once() {
    let first = Mmio::take();
    assert!(first.is_some());
    assert!(Mmio::take().is_none());
}
