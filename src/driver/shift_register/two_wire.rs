use embedded_hal::digital::OutputPin;

use super::ShiftRegisterWiringTrait;

/// Shift register wiring where the serial data pin also drives the LCD enable gate. The gate
/// only opens while bit 7 of the register is set, so the data line can pulse enable once a
/// frame is fully shifted in.
pub struct TwoWireWiring<DATA, CLOCK>
where
    DATA: OutputPin,
    CLOCK: OutputPin<Error = DATA::Error>,
{
    data: DATA,
    clock: CLOCK,
}

impl<DATA, CLOCK> TwoWireWiring<DATA, CLOCK>
where
    DATA: OutputPin,
    CLOCK: OutputPin<Error = DATA::Error>,
{
    /// The pins must already be configured as push-pull outputs.
    pub fn new(data: DATA, clock: CLOCK) -> Self {
        Self { data, clock }
    }

    /// Returns the `(data, clock)` pins.
    pub fn release(self) -> (DATA, CLOCK) {
        (self.data, self.clock)
    }
}

impl<DATA, CLOCK> ShiftRegisterWiringTrait for TwoWireWiring<DATA, CLOCK>
where
    DATA: OutputPin,
    CLOCK: OutputPin<Error = DATA::Error>,
{
    type Error = DATA::Error;

    fn is_two_wire() -> bool {
        true
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
        self.set_serial_data(high)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    #[test]
    fn test_two_wire_is_two_wire() {
        assert!(TwoWireWiring::<PinMock, PinMock>::is_two_wire());
    }

    #[test]
    fn test_two_wire_enable_uses_data_pin() {
        let data_expectations = [
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ];
        let mut wiring = TwoWireWiring::new(PinMock::new(&data_expectations), PinMock::new(&[]));
        assert!(wiring.set_enable(true).is_ok());
        assert!(wiring.set_enable(false).is_ok());

        let (mut data, mut clock) = wiring.release();
        data.done();
        clock.done();
    }
}
