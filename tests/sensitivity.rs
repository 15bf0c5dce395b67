use stm8l15x_exti::mock::MockBank;
use stm8l15x_exti::pac::Register;
use stm8l15x_exti::{Exti, Pin, Port, Trigger};

const TRIGGERS: [Trigger; 4] = [
    Trigger::FallingLow,
    Trigger::Rising,
    Trigger::Falling,
    Trigger::RisingFalling,
];

/// A bank with every sensitivity field holding a distinct, non-reset value.
fn scrambled() -> MockBank {
    let mut bank = MockBank::new();
    bank.poke(Register::Cr1, 0b10_01_11_10);
    bank.poke(Register::Cr2, 0b01_11_10_01);
    bank.poke(Register::Cr3, 0b11_10_01_11);
    bank
}

#[test]
fn port_sensitivity_round_trip_keeps_other_ports() {
    for &port in Port::ALL.iter() {
        for &trigger in TRIGGERS.iter() {
            let mut exti = Exti::new(scrambled());
            let before: Vec<_> = Port::ALL.iter().map(|p| exti.port_sensitivity(*p)).collect();

            critical_section::with(|cs| exti.set_port_sensitivity(port, trigger, cs));

            assert_eq!(exti.port_sensitivity(port), trigger, "{:?}", port);
            for (i, &other) in Port::ALL.iter().enumerate() {
                if other != port {
                    assert_eq!(exti.port_sensitivity(other), before[i], "{:?} changed", other);
                }
            }
        }
    }
}

#[test]
fn port_sensitivity_only_touches_cr3() {
    let mut exti = Exti::new(scrambled());
    critical_section::with(|cs| exti.set_port_sensitivity(Port::E, Trigger::FallingLow, cs));
    let bank = exti.free();

    assert_eq!(bank.peek(Register::Cr1), 0b10_01_11_10);
    assert_eq!(bank.peek(Register::Cr2), 0b01_11_10_01);
    assert_eq!(bank.peek(Register::Cr3), 0b11_00_01_11);
}

#[test]
fn port_sensitivity_is_idempotent() {
    for &port in Port::ALL.iter() {
        for &trigger in TRIGGERS.iter() {
            let mut once = Exti::new(scrambled());
            critical_section::with(|cs| once.set_port_sensitivity(port, trigger, cs));

            let mut twice = Exti::new(scrambled());
            critical_section::with(|cs| {
                twice.set_port_sensitivity(port, trigger, cs);
                twice.set_port_sensitivity(port, trigger, cs);
            });

            let once = once.free();
            let twice = twice.free();
            for &reg in Register::ALL.iter() {
                assert_eq!(once.peek(reg), twice.peek(reg), "{:?}", reg);
            }
        }
    }
}

#[test]
fn pin_sensitivity_round_trip_keeps_other_pins() {
    for &pin in Pin::ALL.iter() {
        for &trigger in TRIGGERS.iter() {
            let mut exti = Exti::new(scrambled());
            let before: Vec<_> = Pin::ALL.iter().map(|p| exti.pin_sensitivity(*p)).collect();

            critical_section::with(|cs| exti.set_pin_sensitivity(pin, trigger, cs));

            assert_eq!(exti.pin_sensitivity(pin), trigger, "{:?}", pin);
            for (i, &other) in Pin::ALL.iter().enumerate() {
                if other != pin {
                    assert_eq!(exti.pin_sensitivity(other), before[i], "{:?} changed", other);
                }
            }
            // Port fields share no register with pins.
            assert_eq!(exti.port_sensitivity(Port::B), Trigger::RisingFalling);
        }
    }
}

#[test]
fn low_and_high_pins_live_in_different_registers() {
    let mut exti = Exti::new(MockBank::new());
    critical_section::with(|cs| {
        exti.set_pin_sensitivity(Pin::P1, Trigger::Falling, cs);
        exti.set_pin_sensitivity(Pin::P7, Trigger::Rising, cs);
    });
    let bank = exti.free();

    assert_eq!(bank.peek(Register::Cr1), 0b00_00_10_00);
    assert_eq!(bank.peek(Register::Cr2), 0b01_00_00_00);
    assert_eq!(bank.peek(Register::Cr3), 0x00);
}

#[test]
fn rising_edge_on_pin_5() {
    let mut exti = Exti::new(scrambled());
    let p4 = exti.pin_sensitivity(Pin::P4);
    let p6 = exti.pin_sensitivity(Pin::P6);

    critical_section::with(|cs| exti.set_pin_sensitivity(Pin::P5, Trigger::Rising, cs));

    assert_eq!(exti.pin_sensitivity(Pin::P5), Trigger::Rising);
    assert_eq!(exti.pin_sensitivity(Pin::P4), p4);
    assert_eq!(exti.pin_sensitivity(Pin::P6), p6);
}

#[test]
fn sensitivity_getters_do_not_write() {
    let exti = Exti::new(scrambled());
    for &pin in Pin::ALL.iter() {
        exti.pin_sensitivity(pin);
    }
    for &port in Port::ALL.iter() {
        exti.port_sensitivity(port);
    }
    assert_eq!(exti.free().write_count(), 0);
}

#[test]
fn borrowed_bank_sees_driver_writes() {
    let mut bank = MockBank::new();
    critical_section::with(|cs| {
        Exti::new(&mut bank).set_port_sensitivity(Port::F, Trigger::RisingFalling, cs)
    });
    assert_eq!(bank.peek(Register::Cr3), 0b11_00_00_00);
}

#[cfg(feature = "enumset")]
#[test]
fn configure_pins_leaves_unselected_pins_alone() {
    use enumset::EnumSet;

    let mut exti = Exti::new(MockBank::new());
    let pins = Pin::P0 | Pin::P3 | Pin::P4;
    critical_section::with(|cs| exti.configure_pins(pins, Trigger::Falling, cs));

    for pin in EnumSet::<Pin>::all().iter() {
        let expected = if pins.contains(pin) {
            Trigger::Falling
        } else {
            Trigger::FallingLow
        };
        assert_eq!(exti.pin_sensitivity(pin), expected, "{:?}", pin);
    }
}
