use embedded_hal::digital::OutputPin;

use super::ShiftRegisterWiringTrait;

/// Shift register wiring with a dedicated pin for the LCD enable gate.
pub struct ThreeWireWiring<DATA, CLOCK, ENABLE>
where
    DATA: OutputPin,
    CLOCK: OutputPin<Error = DATA::Error>,
    ENABLE: OutputPin<Error = DATA::Error>,
{
    data: DATA,
    clock: CLOCK,
    enable: ENABLE,
}

impl<DATA, CLOCK, ENABLE> ThreeWireWiring<DATA, CLOCK, ENABLE>
where
    DATA: OutputPin,
    CLOCK: OutputPin<Error = DATA::Error>,
    ENABLE: OutputPin<Error = DATA::Error>,
{
    /// The pins must already be configured as push-pull outputs.
    pub fn new(data: DATA, clock: CLOCK, enable: ENABLE) -> Self {
        Self {
            data,
            clock,
            enable,
        }
    }

    /// Returns the `(data, clock, enable)` pins.
    pub fn release(self) -> (DATA, CLOCK, ENABLE) {
        (self.data, self.clock, self.enable)
    }
}

impl<DATA, CLOCK, ENABLE> ShiftRegisterWiringTrait for ThreeWireWiring<DATA, CLOCK, ENABLE>
where
    DATA: OutputPin,
    CLOCK: OutputPin<Error = DATA::Error>,
    ENABLE: OutputPin<Error = DATA::Error>,
{
    type Error = DATA::Error;

    fn is_two_wire() -> bool {
        false
    }

    fn set_serial_data(&mut self, high: bool) -> Result<(), Self::Error> {
        if high {
            self.data.set_high()
        } else {
            self.data.set_low()
        }
    }

    fn set_serial_clock(&mut self, high: bool) -> Result<(), Self::Error> {
        if high {
            self.clock.set_high()
        } else {
            self.clock.set_low()
        }
    }

    fn set_enable(&mut self, high: bool) -> Result<(), Self::Error> {
        if high {
            self.enable.set_high()
        } else {
            self.enable.set_low()
        }
    }
}
