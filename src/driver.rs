pub mod hd44780;
pub mod shift_register;

use crate::CharacterDisplayError;

/// Trait for the transport carrying bytes from the controller logic to the HD44780. There is
/// no return path, so transmissions are open loop and each one blocks for the settle time the
/// controller needs before it will accept the next.
pub trait DisplayTransportTrait {
    /// Error type of the underlying pins
    type PinError;

    /// Returns `true` if the enable signal shares the serial data line.
    fn is_two_wire(&self) -> bool;

    /// Transmits a full byte as two nibbles, high nibble first. If `is_data` is `true`, the byte
    /// is written to the data register, either the CGRAM or DDRAM depending on the prior command
    /// sent. If `is_data` is `false`, the byte is written to the instruction register.
    fn transmit(
        &mut self,
        value: u8,
        is_data: bool,
    ) -> Result<(), CharacterDisplayError<Self::PinError>>;

    /// Transmits only the high nibble of `value` to the instruction register. Only used during
    /// initialization, while the controller's interface width is still unknown.
    fn transmit_raw_nibble(&mut self, value: u8)
        -> Result<(), CharacterDisplayError<Self::PinError>>;

    /// Blocks for at least `us` microseconds.
    fn delay_us(&mut self, us: u32);
}
