// Shift register transport
// The HD44780 is driven in 4-bit mode through an 8-bit serial-in/parallel-out shift register.
// Each nibble is shifted into the register as one frame (see `ShiftRegisterFrame`) and then
// latched into the LCD by pulsing the enable line. The pins doing the shifting and pulsing are
// provided by an object implementing `ShiftRegisterWiringTrait`. There are two implementations:
//      * ThreeWireWiring - dedicated enable pin
//      * TwoWireWiring - the serial data pin doubles as the enable pin
//

pub mod three_wire;
pub mod two_wire;

use embedded_hal::delay::DelayNs;

use crate::{
    bit_configurations::ShiftRegisterFrame, driver::DisplayTransportTrait, CharacterDisplayError,
};

/// Minimum enable pulse width. The datasheet asks for 450ns.
const ENABLE_PULSE_US: u32 = 1;
/// Time most instructions need to execute (37us per datasheet).
const COMMAND_SETTLE_US: u32 = 40;

/// Trait for the pins wired to the shift register and the LCD enable gate.
pub trait ShiftRegisterWiringTrait {
    /// Error type of the pins
    type Error;

    /// Returns `true` if the enable signal is carried on the serial data pin. When it is, the
    /// shift register must be cleared before every frame, otherwise stale bits left in the
    /// register would pulse the LCD enable line while the next frame is shifted in.
    fn is_two_wire() -> bool;

    /// Drives the serial data line of the shift register.
    fn set_serial_data(&mut self, high: bool) -> Result<(), Self::Error>;

    /// Drives the serial clock line of the shift register.
    fn set_serial_clock(&mut self, high: bool) -> Result<(), Self::Error>;

    /// Drives the line gating the LCD enable input.
    fn set_enable(&mut self, high: bool) -> Result<(), Self::Error>;

    /// Clocks one byte into the shift register, most significant bit first.
    fn shift_out(&mut self, value: u8) -> Result<(), Self::Error> {
        for bit in (0..8).rev() {
            self.set_serial_data(value & (1 << bit) != 0)?;
            self.set_serial_clock(true)?;
            self.set_serial_clock(false)?;
        }
        Ok(())
    }
}

/// Transport writing to the HD44780 through a shift register.
pub struct ShiftRegisterTransport<WIRING, DELAY>
where
    WIRING: ShiftRegisterWiringTrait,
    DELAY: DelayNs,
{
    wiring: WIRING,
    delay: DELAY,
}

impl<WIRING, DELAY> ShiftRegisterTransport<WIRING, DELAY>
where
    WIRING: ShiftRegisterWiringTrait,
    DELAY: DelayNs,
{
    pub fn new(wiring: WIRING, delay: DELAY) -> Self {
        Self { wiring, delay }
    }

    /// Returns the wiring and delay objects.
    pub fn release(self) -> (WIRING, DELAY) {
        (self.wiring, self.delay)
    }

    /// Shifts one frame into the register and pulses enable so the LCD latches it.
    fn write_frame(
        &mut self,
        frame: ShiftRegisterFrame,
    ) -> Result<(), CharacterDisplayError<WIRING::Error>> {
        if WIRING::is_two_wire() {
            self.wiring
                .shift_out(0x00)
                .map_err(CharacterDisplayError::PinError)?;
        }
        self.wiring
            .set_enable(false)
            .map_err(CharacterDisplayError::PinError)?;
        self.wiring
            .shift_out(frame.bits())
            .map_err(CharacterDisplayError::PinError)?;
        self.wiring
            .set_enable(true)
            .map_err(CharacterDisplayError::PinError)?;
        self.delay.delay_us(ENABLE_PULSE_US);
        self.wiring
            .set_enable(false)
            .map_err(CharacterDisplayError::PinError)?;
        Ok(())
    }
}

impl<WIRING, DELAY> DisplayTransportTrait for ShiftRegisterTransport<WIRING, DELAY>
where
    WIRING: ShiftRegisterWiringTrait,
    DELAY: DelayNs,
{
    type PinError = WIRING::Error;

    fn is_two_wire(&self) -> bool {
        WIRING::is_two_wire()
    }

    fn transmit(
        &mut self,
        value: u8,
        is_data: bool,
    ) -> Result<(), CharacterDisplayError<WIRING::Error>> {
        for frame in ShiftRegisterFrame::for_byte(value, is_data) {
            self.write_frame(frame)?;
        }
        self.delay.delay_us(COMMAND_SETTLE_US);
        Ok(())
    }

    fn transmit_raw_nibble(&mut self, value: u8) -> Result<(), CharacterDisplayError<WIRING::Error>> {
        self.write_frame(ShiftRegisterFrame::for_raw_nibble(value))?;
        self.delay.delay_us(COMMAND_SETTLE_US);
        Ok(())
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }
}
