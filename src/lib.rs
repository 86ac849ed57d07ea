//! This Rust `embedded-hal`-based library is a simple way to control a [HD44780](https://en.wikipedia.org/wiki/Hitachi_HD44780_LCD_controller)
//! compatible character display wired through an 8-bit serial-in/parallel-out shift register (such as a 74HC595 or 74HC164)
//! in an embedded, `no_std` environment. Two wirings are supported:
//!
//! - **Three wire** - serial data, serial clock and a dedicated enable pin. The enable pin and shift register output 7 are
//!   combined through a diode-resistor AND gate to drive the LCD `E` input.
//! - **Two wire** - serial data and serial clock only. The serial data pin doubles as the enable pin, so the shift register is
//!   cleared before every nibble to keep stale bits from pulsing the LCD enable line.
//!
//! The shift register outputs are expected to be wired as follows: Q7 to the enable AND gate, Q6-Q3 to LCD D7-D4, Q2 to LCD RS.
//! Q1 and Q0 are not used. The LCD R/W line must be tied to ground; the display is write only.
//!
//! Key features include:
//! - Convenient high-level API for controlling the display
//! - Support for custom characters
//! - `core::fmt::Write` implementation for easy use with the `write!` macro
//! - Compatible with the `embedded-hal` traits v1.0 and later
//! - Optional support for the `defmt` and `ufmt` logging frameworks
//!
//! ## Usage
//! Add this to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! shift-register-lcd = { version = "0.1", features = ["defmt"] }
//! ```
//! The `features = ["defmt"]` line is optional and enables the `defmt` feature, which allows the library's errors to be used with the `defmt` logging
//! framework and logs the initialization sequence. Another optional feature is `features = ["ufmt"]`, which enables the `ufmt` feature, allowing the
//! `uwriteln!` and `uwrite!` macros to be used.
//!
//! Then create the display for your wiring. The pins must already be configured as push-pull outputs:
//! ```rust
//! use shift_register_lcd::{FontSize, LcdConfig, ShiftRegisterLcdThreeWire, ShiftRegisterLcdTwoWire};
//!
//! // board setup
//! let (data, clock, enable) = ...; // OutputPin implementations
//! let delay = ...; // DelayNs implementation
//!
//! // 3 wire, 2 line display
//! let mut lcd = ShiftRegisterLcdThreeWire::new_three_wire(data, clock, enable, delay, LcdConfig::new(2, FontSize::Dots5x8));
//! // 2 wire, 1 line display with the default 5x8 font
//! let mut lcd = ShiftRegisterLcdTwoWire::new_two_wire(data, clock, delay, LcdConfig::default());
//! ```
//! Displays with 4 rows are driven in 2 line mode; rows 2 and 3 are continuations of rows 0 and 1 in the controller's memory.
//!
//! Initialize the display:
//! ```rust
//! if let Err(e) = lcd.init() {
//!    panic!("Error initializing LCD: {}", e);
//! }
//! ```
//! Use the display:
//! ```rust
//! // print a message
//! lcd.print("Hello, world!")?;
//! // can also use the `core::fmt::write!` macro
//! use core::fmt::Write;
//!
//! write!(lcd, "Hello, world!")?;
//! ```
//! The optional `ufmt` feature enables the `ufmt` crate, which allows the `uwriteln!` and `uwrite!` macros to be used with the display:
//! ```rust
//! use ufmt::uwriteln;
//!
//! uwriteln!(lcd, "Hello, world!")?;
//! ```
//!
//! The various methods for controlling the LCD are also available. Each returns a `Result` that wraps the display object in `Ok()`, allowing for easy chaining
//! of commands. For example:
//! ```rust
//! lcd.clear()?.set_cursor(0, 1)?.print("Hello, world!")?;
//! ```
//! When the display is no longer needed, `release` hands back the pins and the delay.
//!
#![no_std]
#![allow(dead_code, non_upper_case_globals)]
use core::fmt::Display;

use embedded_hal::{delay::DelayNs, digital::OutputPin};

mod bit_configurations;
mod driver;
#[cfg(test)]
mod simulator;

use driver::hd44780::HD44780;
pub use driver::shift_register::{
    three_wire::ThreeWireWiring, two_wire::TwoWireWiring, ShiftRegisterTransport,
    ShiftRegisterWiringTrait,
};

/// HD44780 based character display driven through a shift register with a dedicated enable pin.
pub type ShiftRegisterLcdThreeWire<DATA, CLOCK, ENABLE, DELAY> =
    BaseCharacterDisplay<ThreeWireWiring<DATA, CLOCK, ENABLE>, DELAY>;

/// HD44780 based character display driven through a shift register whose serial data pin also
/// drives the enable gate.
pub type ShiftRegisterLcdTwoWire<DATA, CLOCK, DELAY> =
    BaseCharacterDisplay<TwoWireWiring<DATA, CLOCK>, DELAY>;

#[derive(Debug, PartialEq, Copy, Clone)]
/// Errors that can occur when using the display
pub enum CharacterDisplayError<E> {
    /// Error returned from one of the underlying output pins
    PinError(E),
    /// Formatting error
    FormattingError(core::fmt::Error),
}

impl<E> From<core::fmt::Error> for CharacterDisplayError<E> {
    fn from(err: core::fmt::Error) -> Self {
        CharacterDisplayError::FormattingError(err)
    }
}

impl<E> From<&CharacterDisplayError<E>> for &'static str {
    fn from(err: &CharacterDisplayError<E>) -> Self {
        match err {
            CharacterDisplayError::PinError(_) => "Pin error",
            CharacterDisplayError::FormattingError(_) => "Formatting error",
        }
    }
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for CharacterDisplayError<E> {
    fn format(&self, fmt: defmt::Formatter) {
        let msg: &'static str = From::from(self);
        defmt::write!(fmt, "{}", msg);
    }
}

#[cfg(feature = "ufmt")]
impl<E> ufmt::uDisplay for CharacterDisplayError<E> {
    fn fmt<W>(&self, w: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        let msg: &'static str = From::from(self);
        ufmt::uwrite!(w, "{}", msg)
    }
}

impl<E> Display for CharacterDisplayError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg: &'static str = From::from(self);
        write!(f, "{}", msg)
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Default)]
/// The character font of the display.
pub enum FontSize {
    /// 5x8 dot characters. Supported by every HD44780 display.
    #[default]
    Dots5x8,
    /// 5x10 dot characters. Only available on 1 line displays; the controller ignores it in 2 line mode.
    Dots5x10,
}

impl From<&FontSize> for &'static str {
    fn from(font: &FontSize) -> Self {
        match font {
            FontSize::Dots5x8 => "5x8",
            FontSize::Dots5x10 => "5x10",
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FontSize {
    fn format(&self, fmt: defmt::Formatter) {
        let msg: &'static str = From::from(self);
        defmt::write!(fmt, "{}", msg);
    }
}

#[cfg(feature = "ufmt")]
impl ufmt::uDisplay for FontSize {
    fn fmt<W>(&self, w: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        let msg: &'static str = From::from(self);
        ufmt::uwrite!(w, "{}", msg)
    }
}

impl Display for FontSize {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg: &'static str = From::from(self);
        write!(f, "{}", msg)
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Display geometry passed to the constructors. Defaults to 1 line with the 5x8 font.
pub struct LcdConfig {
    /// Number of display lines. Anything above 1 selects 2 line mode.
    pub lines: u8,
    pub font: FontSize,
}

impl LcdConfig {
    pub const fn new(lines: u8, font: FontSize) -> Self {
        Self { lines, font }
    }
}

impl Default for LcdConfig {
    fn default() -> Self {
        Self::new(1, FontSize::Dots5x8)
    }
}

pub struct BaseCharacterDisplay<WIRING, DELAY>
where
    WIRING: ShiftRegisterWiringTrait,
    DELAY: DelayNs,
{
    transport: ShiftRegisterTransport<WIRING, DELAY>,
    controller: HD44780<ShiftRegisterTransport<WIRING, DELAY>>,
}

impl<WIRING, DELAY> BaseCharacterDisplay<WIRING, DELAY>
where
    WIRING: ShiftRegisterWiringTrait,
    DELAY: DelayNs,
{
    /// Create a new character display object for the given shift register wiring. Nothing is sent
    /// to the display until `init` is called.
    pub fn new(wiring: WIRING, delay: DELAY, config: LcdConfig) -> Self {
        Self {
            transport: ShiftRegisterTransport::new(wiring, delay),
            controller: HD44780::new(config),
        }
    }

    /// Initialize the display. This must be called before using the display.
    pub fn init(&mut self) -> Result<(), CharacterDisplayError<WIRING::Error>> {
        self.controller.init(&mut self.transport)
    }

    /// Consumes the display and returns the wiring and the delay.
    pub fn release(self) -> (WIRING, DELAY) {
        self.transport.release()
    }

    /// Returns the number of lines the controller is configured for, either 1 or 2.
    pub fn line_count(&self) -> u8 {
        self.controller.line_count()
    }

    pub fn font(&self) -> FontSize {
        self.controller.font()
    }

    /// Returns `true` if the display is driven with the two wire scheme.
    pub fn is_two_wire(&self) -> bool {
        WIRING::is_two_wire()
    }

    /// Function set flags as last sent to the controller.
    pub fn display_function(&self) -> u8 {
        self.controller.display_function()
    }

    /// Display control flags (display, cursor, blink) as last sent to the controller.
    pub fn display_control(&self) -> u8 {
        self.controller.display_control()
    }

    /// Entry mode flags (text direction, autoscroll) as last sent to the controller.
    pub fn display_mode(&self) -> u8 {
        self.controller.display_mode()
    }

    //--------------------------------------------------------------------------------------------------
    // high level commands, for the user!
    //--------------------------------------------------------------------------------------------------

    /// Clear the display
    pub fn clear(&mut self) -> Result<&mut Self, CharacterDisplayError<WIRING::Error>> {
        self.controller.clear(&mut self.transport)?;
        Ok(self)
    }

    /// Set the cursor to the home position.
    pub fn home(&mut self) -> Result<&mut Self, CharacterDisplayError<WIRING::Error>> {
        self.controller.home(&mut self.transport)?;
        Ok(self)
    }

    /// Set the cursor position at specified column and row. Columns and rows are zero-indexed.
    /// Rows past the configured line count are moved to the last line.
    pub fn set_cursor(
        &mut self,
        col: u8,
        row: u8,
    ) -> Result<&mut Self, CharacterDisplayError<WIRING::Error>> {
        self.controller.set_cursor(&mut self.transport, col, row)?;
        Ok(self)
    }

    /// Set the cursor visibility.
    pub fn show_cursor(
        &mut self,
        show_cursor: bool,
    ) -> Result<&mut Self, CharacterDisplayError<WIRING::Error>> {
        self.controller.show_cursor(&mut self.transport, show_cursor)?;
        Ok(self)
    }

    /// Set the cursor blinking.
    pub fn blink_cursor(
        &mut self,
        blink_cursor: bool,
    ) -> Result<&mut Self, CharacterDisplayError<WIRING::Error>> {
        self.controller
            .blink_cursor(&mut self.transport, blink_cursor)?;
        Ok(self)
    }

    /// Set the display visibility.
    pub fn show_display(
        &mut self,
        show_display: bool,
    ) -> Result<&mut Self, CharacterDisplayError<WIRING::Error>> {
        self.controller
            .show_display(&mut self.transport, show_display)?;
        Ok(self)
    }

    /// Scroll the display to the left.
    pub fn scroll_display_left(&mut self) -> Result<&mut Self, CharacterDisplayError<WIRING::Error>> {
        self.controller.scroll_display_left(&mut self.transport)?;
        Ok(self)
    }

    /// Scroll the display to the right.
    pub fn scroll_display_right(
        &mut self,
    ) -> Result<&mut Self, CharacterDisplayError<WIRING::Error>> {
        self.controller.scroll_display_right(&mut self.transport)?;
        Ok(self)
    }

    /// Move the cursor one position to the left.
    pub fn move_cursor_left(&mut self) -> Result<&mut Self, CharacterDisplayError<WIRING::Error>> {
        self.controller.move_cursor_left(&mut self.transport)?;
        Ok(self)
    }

    /// Move the cursor one position to the right.
    pub fn move_cursor_right(&mut self) -> Result<&mut Self, CharacterDisplayError<WIRING::Error>> {
        self.controller.move_cursor_right(&mut self.transport)?;
        Ok(self)
    }

    /// Set the text flow direction to left to right.
    pub fn left_to_right(&mut self) -> Result<&mut Self, CharacterDisplayError<WIRING::Error>> {
        self.controller.left_to_right(&mut self.transport)?;
        Ok(self)
    }

    /// Set the text flow direction to right to left.
    pub fn right_to_left(&mut self) -> Result<&mut Self, CharacterDisplayError<WIRING::Error>> {
        self.controller.right_to_left(&mut self.transport)?;
        Ok(self)
    }

    /// Set the auto scroll mode.
    pub fn autoscroll(
        &mut self,
        autoscroll: bool,
    ) -> Result<&mut Self, CharacterDisplayError<WIRING::Error>> {
        self.controller.autoscroll(&mut self.transport, autoscroll)?;
        Ok(self)
    }

    /// Create a new custom character in one of the 8 slots. The character is shown by writing the
    /// slot number as a data byte.
    pub fn create_char(
        &mut self,
        location: u8,
        charmap: [u8; 8],
    ) -> Result<&mut Self, CharacterDisplayError<WIRING::Error>> {
        self.controller
            .create_char(&mut self.transport, location, charmap)?;
        Ok(self)
    }

    /// Writes a raw data byte at the current cursor position.
    pub fn write_byte(&mut self, value: u8) -> Result<&mut Self, CharacterDisplayError<WIRING::Error>> {
        self.controller.write_byte(&mut self.transport, value)?;
        Ok(self)
    }

    /// Prints a string to the LCD at the current cursor position. Each `char` is sent as a single
    /// byte, so only characters present in the display's character ROM render as expected.
    pub fn print(&mut self, text: &str) -> Result<&mut Self, CharacterDisplayError<WIRING::Error>> {
        self.controller.print(&mut self.transport, text)?;
        Ok(self)
    }
}

impl<DATA, CLOCK, ENABLE, DELAY> BaseCharacterDisplay<ThreeWireWiring<DATA, CLOCK, ENABLE>, DELAY>
where
    DATA: OutputPin,
    CLOCK: OutputPin<Error = DATA::Error>,
    ENABLE: OutputPin<Error = DATA::Error>,
    DELAY: DelayNs,
{
    /// Create a new character display object using a dedicated enable pin.
    pub fn new_three_wire(
        data: DATA,
        clock: CLOCK,
        enable: ENABLE,
        delay: DELAY,
        config: LcdConfig,
    ) -> Self {
        Self::new(ThreeWireWiring::new(data, clock, enable), delay, config)
    }
}

impl<DATA, CLOCK, DELAY> BaseCharacterDisplay<TwoWireWiring<DATA, CLOCK>, DELAY>
where
    DATA: OutputPin,
    CLOCK: OutputPin<Error = DATA::Error>,
    DELAY: DelayNs,
{
    /// Create a new character display object with the serial data pin doubling as the enable pin.
    pub fn new_two_wire(data: DATA, clock: CLOCK, delay: DELAY, config: LcdConfig) -> Self {
        Self::new(TwoWireWiring::new(data, clock), delay, config)
    }
}

/// Implement the `core::fmt::Write` trait for the display, allowing it to be used with the `write!` macro.
/// This is a convenience method for printing to the display.
impl<WIRING, DELAY> core::fmt::Write for BaseCharacterDisplay<WIRING, DELAY>
where
    WIRING: ShiftRegisterWiringTrait,
    DELAY: DelayNs,
{
    fn write_str(&mut self, s: &str) -> Result<(), core::fmt::Error> {
        if let Err(_e) = self.print(s) {
            return Err(core::fmt::Error);
        }
        Ok(())
    }
}

#[cfg(feature = "ufmt")]
/// Implement the `ufmt::uWrite` trait for the display, allowing it to be used with the `uwriteln!` and `uwrite!` macros.
/// This is a convenience method for printing to the display.
impl<WIRING, DELAY> ufmt::uWrite for BaseCharacterDisplay<WIRING, DELAY>
where
    WIRING: ShiftRegisterWiringTrait,
    DELAY: DelayNs,
{
    fn write_str(&mut self, s: &str) -> Result<(), CharacterDisplayError<WIRING::Error>> {
        self.print(s)?;
        Ok(())
    }

    type Error = CharacterDisplayError<WIRING::Error>;
}
