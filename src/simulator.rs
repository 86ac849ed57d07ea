//! Host model of the shift register, the enable gate and the LCD latch, used by the unit tests.
//!
//! Pins handed out by a `SimBus` share one state. A rising clock edge shifts the data line
//! into the register. The LCD enable input is the AND of the enable line (the data line in
//! two-wire mode) with register bit 7, and the LCD latches RS and D7-D4 on its falling edge,
//! just like the real controller.
extern crate std;

use core::cell::RefCell;
use core::convert::Infallible;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorType, OutputPin},
};

use crate::driver::shift_register::{three_wire::ThreeWireWiring, two_wire::TwoWireWiring};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// Eight clock pulses completed; the byte now held by the register.
    Shifted(u8),
    /// The LCD enable input fell while the register held these outputs.
    Latched { rs: bool, nibble: u8 },
    DelayUs(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line {
    Data,
    Clock,
    Enable,
}

#[derive(Default)]
struct BusState {
    two_wire: bool,
    data: bool,
    clock: bool,
    enable: bool,
    register: u8,
    clock_count: u8,
    lcd_enable: bool,
    events: Vec<SimEvent>,
}

impl BusState {
    fn drive(&mut self, line: Line, level: bool) {
        match line {
            Line::Data => self.data = level,
            Line::Clock => {
                if level && !self.clock {
                    self.register = (self.register << 1) | self.data as u8;
                    self.clock_count += 1;
                    if self.clock_count == 8 {
                        self.clock_count = 0;
                        self.events.push(SimEvent::Shifted(self.register));
                    }
                }
                self.clock = level;
            }
            Line::Enable => self.enable = level,
        }

        let gate = if self.two_wire { self.data } else { self.enable };
        let lcd_enable = gate && self.register & 0x80 != 0;
        if self.lcd_enable && !lcd_enable {
            self.events.push(SimEvent::Latched {
                rs: self.register & 0x04 != 0,
                nibble: (self.register >> 3) & 0x0F,
            });
        }
        self.lcd_enable = lcd_enable;
    }
}

#[derive(Clone)]
pub struct SimBus(Rc<RefCell<BusState>>);

impl SimBus {
    pub fn three_wire() -> Self {
        SimBus(Rc::new(RefCell::new(BusState::default())))
    }

    pub fn two_wire() -> Self {
        SimBus(Rc::new(RefCell::new(BusState {
            two_wire: true,
            ..Default::default()
        })))
    }

    fn pin(&self, line: Line) -> SimPin {
        SimPin {
            bus: self.clone(),
            line,
        }
    }

    pub fn data_pin(&self) -> SimPin {
        self.pin(Line::Data)
    }

    pub fn clock_pin(&self) -> SimPin {
        self.pin(Line::Clock)
    }

    pub fn enable_pin(&self) -> SimPin {
        self.pin(Line::Enable)
    }

    pub fn three_wire_wiring(&self) -> ThreeWireWiring<SimPin, SimPin, SimPin> {
        ThreeWireWiring::new(
            self.pin(Line::Data),
            self.pin(Line::Clock),
            self.pin(Line::Enable),
        )
    }

    pub fn two_wire_wiring(&self) -> TwoWireWiring<SimPin, SimPin> {
        TwoWireWiring::new(self.pin(Line::Data), self.pin(Line::Clock))
    }

    pub fn delay(&self) -> SimDelay {
        SimDelay { bus: self.clone() }
    }

    pub fn events(&self) -> Vec<SimEvent> {
        self.0.borrow().events.clone()
    }

    pub fn clear_events(&self) {
        self.0.borrow_mut().events.clear();
    }

    /// Every byte shifted into the register, clearing bytes included.
    pub fn shifted(&self) -> Vec<u8> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SimEvent::Shifted(byte) => Some(byte),
                _ => None,
            })
            .collect()
    }

    /// `(rs, nibble)` for every nibble the LCD latched.
    pub fn latches(&self) -> Vec<(bool, u8)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SimEvent::Latched { rs, nibble } => Some((rs, nibble)),
                _ => None,
            })
            .collect()
    }

    pub fn delays(&self) -> Vec<u32> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SimEvent::DelayUs(us) => Some(us),
                _ => None,
            })
            .collect()
    }

    /// Pairs latched nibbles into `(rs, byte)`. Only meaningful once the LCD is in 4-bit mode.
    pub fn received_bytes(&self) -> Vec<(bool, u8)> {
        self.latches()
            .chunks(2)
            .map(|pair| (pair[0].0, (pair[0].1 << 4) | pair.get(1).map_or(0, |low| low.1)))
            .collect()
    }
}

pub struct SimPin {
    bus: SimBus,
    line: Line,
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.bus.0.borrow_mut().drive(self.line, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.bus.0.borrow_mut().drive(self.line, true);
        Ok(())
    }
}

pub struct SimDelay {
    bus: SimBus,
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.bus
            .0
            .borrow_mut()
            .events
            .push(SimEvent::DelayUs(ns.div_ceil(1_000)));
    }

    fn delay_us(&mut self, us: u32) {
        self.bus.0.borrow_mut().events.push(SimEvent::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.bus
            .0
            .borrow_mut()
            .events
            .push(SimEvent::DelayUs(ms * 1_000));
    }
}
