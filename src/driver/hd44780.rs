// HD44780 Support
// This module holds the logical state of an HD44780 controller and its instruction set. The
// controller cannot be read back over a shift register, so the flag bytes kept here are the
// only record of the controller's configuration. Every setter updates its flag byte and then
// immediately sends the composite command, keeping the two in step.
//
// All transmissions go through an object implementing `DisplayTransportTrait`.
//

use core::marker::PhantomData;

use crate::{driver::DisplayTransportTrait, CharacterDisplayError, FontSize, LcdConfig};

// commands
const LCD_CMD_CLEARDISPLAY: u8 = 0x01; //  Clear display, set cursor position to zero
const LCD_CMD_RETURNHOME: u8 = 0x02; //  Set cursor position to zero
const LCD_CMD_ENTRYMODESET: u8 = 0x04; //  Sets the entry mode
const LCD_CMD_DISPLAYCONTROL: u8 = 0x08; //  Controls the display; does stuff like turning it off and on
const LCD_CMD_CURSORSHIFT: u8 = 0x10; //  Lets you move the cursor
const LCD_CMD_FUNCTIONSET: u8 = 0x20; //  Used to send the function to set to the display
const LCD_CMD_SETCGRAMADDR: u8 = 0x40; //  Used to set the CGRAM (character generator RAM) with characters
const LCD_CMD_SETDDRAMADDR: u8 = 0x80; //  Used to set the DDRAM (Display Data RAM)

// flags for display entry mode
const LCD_FLAG_ENTRYRIGHT: u8 = 0x00; //  Used to set text to flow from right to left
const LCD_FLAG_ENTRYLEFT: u8 = 0x02; //  Uset to set text to flow from left to right
const LCD_FLAG_ENTRYSHIFTINCREMENT: u8 = 0x01; //  Used to 'right justify' text from the cursor
const LCD_FLAG_ENTRYSHIFTDECREMENT: u8 = 0x00; //  Used to 'left justify' text from the cursor

// flags for display on/off control
const LCD_FLAG_DISPLAYON: u8 = 0x04; //  Turns the display on
const LCD_FLAG_DISPLAYOFF: u8 = 0x00; //  Turns the display off
const LCD_FLAG_CURSORON: u8 = 0x02; //  Turns the cursor on
const LCD_FLAG_CURSOROFF: u8 = 0x00; //  Turns the cursor off
const LCD_FLAG_BLINKON: u8 = 0x01; //  Turns on the blinking cursor
const LCD_FLAG_BLINKOFF: u8 = 0x00; //  Turns off the blinking cursor

// flags for display/cursor shift
const LCD_FLAG_DISPLAYMOVE: u8 = 0x08; //  Flag for moving the display
const LCD_FLAG_CURSORMOVE: u8 = 0x00; //  Flag for moving the cursor
const LCD_FLAG_MOVERIGHT: u8 = 0x04; //  Flag for moving right
const LCD_FLAG_MOVELEFT: u8 = 0x00; //  Flag for moving left

// flags for function set
const LCD_FLAG_8BITMODE: u8 = 0x10; //  LCD 8 bit mode
const LCD_FLAG_4BITMODE: u8 = 0x00; //  LCD 4 bit mode
const LCD_FLAG_2LINE: u8 = 0x08; //  LCD 2 line mode
const LCD_FLAG_1LINE: u8 = 0x00; //  LCD 1 line mode
const LCD_FLAG_5x10_DOTS: u8 = 0x04; //  10 pixel high font mode
const LCD_FLAG_5x8_DOTS: u8 = 0x00; //  8 pixel high font mode

/// DDRAM address of the first column of each row
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

// Initialization timing. The controller needs more than 40ms after Vcc rises to 2.7V, and the
// MCU may start well before that.
const POWER_ON_DELAY_US: u32 = 50_000;
const FIRST_FUNCTIONSET_DELAY_US: u32 = 4_500; // more than 4.1ms
const SECOND_FUNCTIONSET_DELAY_US: u32 = 150; // more than 100us
/// Clear and home take much longer than the other instructions
const CLEAR_HOME_DELAY_US: u32 = 2_000;

pub struct HD44780<T>
where
    T: DisplayTransportTrait,
{
    line_count: u8,
    font: FontSize,
    display_function: u8,
    display_control: u8,
    display_mode: u8,
    _transport: PhantomData<T>,
}

impl<T> HD44780<T>
where
    T: DisplayTransportTrait,
{
    /// Creates the controller state for `config`. Nothing is sent until `init` is called.
    pub fn new(config: LcdConfig) -> Self {
        let (line_count, line_flag) = if config.lines > 1 {
            (2, LCD_FLAG_2LINE)
        } else {
            (1, LCD_FLAG_1LINE)
        };
        // the controller ignores the font flag in 2 line mode, so it is passed through as is
        let font_flag = match config.font {
            FontSize::Dots5x8 => LCD_FLAG_5x8_DOTS,
            FontSize::Dots5x10 => LCD_FLAG_5x10_DOTS,
        };
        Self {
            line_count,
            font: config.font,
            display_function: LCD_FLAG_4BITMODE | line_flag | font_flag,
            display_control: 0,
            display_mode: 0,
            _transport: PhantomData,
        }
    }

    pub fn line_count(&self) -> u8 {
        self.line_count
    }

    pub fn font(&self) -> FontSize {
        self.font
    }

    /// The flags last sent with the function set command
    pub fn display_function(&self) -> u8 {
        self.display_function
    }

    /// The flags last sent with the display control command
    pub fn display_control(&self) -> u8 {
        self.display_control
    }

    /// The flags last sent with the entry mode set command
    pub fn display_mode(&self) -> u8 {
        self.display_mode
    }

    /// Runs the power-on initialization sequence, leaving the display on and cleared with the
    /// cursor hidden at home and text flowing left to right.
    ///
    /// The controller may power up believing it is part way through an 8-bit or 4-bit transfer.
    /// Three function set nibbles in 8-bit framing resynchronize it regardless of that state,
    /// after which it is switched to 4-bit mode and configured.
    pub fn init(&mut self, transport: &mut T) -> Result<(), CharacterDisplayError<T::PinError>> {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "HD44780 init: {} line(s), {} font, two wire: {}",
            self.line_count,
            self.font,
            transport.is_two_wire()
        );

        transport.delay_us(POWER_ON_DELAY_US);
        transport.transmit_raw_nibble(LCD_CMD_FUNCTIONSET | LCD_FLAG_8BITMODE)?;
        transport.delay_us(FIRST_FUNCTIONSET_DELAY_US);
        transport.transmit_raw_nibble(LCD_CMD_FUNCTIONSET | LCD_FLAG_8BITMODE)?;
        transport.delay_us(SECOND_FUNCTIONSET_DELAY_US);
        transport.transmit_raw_nibble(LCD_CMD_FUNCTIONSET | LCD_FLAG_8BITMODE)?;
        // from here on every byte goes out as two nibbles
        transport.transmit_raw_nibble(LCD_CMD_FUNCTIONSET | LCD_FLAG_4BITMODE)?;

        self.send_command(transport, LCD_CMD_FUNCTIONSET | self.display_function)?;
        self.display_control = LCD_FLAG_CURSOROFF | LCD_FLAG_BLINKOFF;
        self.show_display(transport, true)?;
        self.clear(transport)?;
        self.display_mode = LCD_FLAG_ENTRYLEFT | LCD_FLAG_ENTRYSHIFTDECREMENT;
        self.send_command(transport, LCD_CMD_ENTRYMODESET | self.display_mode)?;
        self.home(transport)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("HD44780 init complete");
        Ok(())
    }

    fn send_command(
        &mut self,
        transport: &mut T,
        command: u8,
    ) -> Result<(), CharacterDisplayError<T::PinError>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("HD44780 command {=u8:#x}", command);
        transport.transmit(command, false)
    }

    /// Clear the display and return the cursor home
    pub fn clear(&mut self, transport: &mut T) -> Result<(), CharacterDisplayError<T::PinError>> {
        self.send_command(transport, LCD_CMD_CLEARDISPLAY)?;
        transport.delay_us(CLEAR_HOME_DELAY_US);
        Ok(())
    }

    /// Set the cursor to the home position and undo any display shift
    pub fn home(&mut self, transport: &mut T) -> Result<(), CharacterDisplayError<T::PinError>> {
        self.send_command(transport, LCD_CMD_RETURNHOME)?;
        transport.delay_us(CLEAR_HOME_DELAY_US);
        Ok(())
    }

    /// Set the cursor position at specified column and row. Columns and rows are zero-indexed.
    /// A row beyond the configured line count is moved to the last line instead of failing.
    pub fn set_cursor(
        &mut self,
        transport: &mut T,
        col: u8,
        row: u8,
    ) -> Result<(), CharacterDisplayError<T::PinError>> {
        // `row == line_count` is not clamped and still indexes within ROW_OFFSETS
        let row = if row > self.line_count {
            self.line_count - 1
        } else {
            row
        };
        self.send_command(
            transport,
            LCD_CMD_SETDDRAMADDR | col.wrapping_add(ROW_OFFSETS[row as usize]),
        )
    }

    fn send_display_control(
        &mut self,
        transport: &mut T,
    ) -> Result<(), CharacterDisplayError<T::PinError>> {
        self.send_command(transport, LCD_CMD_DISPLAYCONTROL | self.display_control)
    }

    /// Turn the display on or off. Display memory is kept while off.
    pub fn show_display(
        &mut self,
        transport: &mut T,
        show_display: bool,
    ) -> Result<(), CharacterDisplayError<T::PinError>> {
        if show_display {
            self.display_control |= LCD_FLAG_DISPLAYON;
        } else {
            self.display_control &= !LCD_FLAG_DISPLAYON;
        }
        self.send_display_control(transport)
    }

    /// Show or hide the underline cursor.
    pub fn show_cursor(
        &mut self,
        transport: &mut T,
        show_cursor: bool,
    ) -> Result<(), CharacterDisplayError<T::PinError>> {
        if show_cursor {
            self.display_control |= LCD_FLAG_CURSORON;
        } else {
            self.display_control &= !LCD_FLAG_CURSORON;
        }
        self.send_display_control(transport)
    }

    /// Turn the blinking block cursor on or off.
    pub fn blink_cursor(
        &mut self,
        transport: &mut T,
        blink_cursor: bool,
    ) -> Result<(), CharacterDisplayError<T::PinError>> {
        if blink_cursor {
            self.display_control |= LCD_FLAG_BLINKON;
        } else {
            self.display_control &= !LCD_FLAG_BLINKON;
        }
        self.send_display_control(transport)
    }

    /// Shift the whole display one position to the left without changing DDRAM.
    pub fn scroll_display_left(
        &mut self,
        transport: &mut T,
    ) -> Result<(), CharacterDisplayError<T::PinError>> {
        self.send_command(
            transport,
            LCD_CMD_CURSORSHIFT | LCD_FLAG_DISPLAYMOVE | LCD_FLAG_MOVELEFT,
        )
    }

    /// Shift the whole display one position to the right without changing DDRAM.
    pub fn scroll_display_right(
        &mut self,
        transport: &mut T,
    ) -> Result<(), CharacterDisplayError<T::PinError>> {
        self.send_command(
            transport,
            LCD_CMD_CURSORSHIFT | LCD_FLAG_DISPLAYMOVE | LCD_FLAG_MOVERIGHT,
        )
    }

    pub fn move_cursor_left(
        &mut self,
        transport: &mut T,
    ) -> Result<(), CharacterDisplayError<T::PinError>> {
        self.send_command(
            transport,
            LCD_CMD_CURSORSHIFT | LCD_FLAG_CURSORMOVE | LCD_FLAG_MOVELEFT,
        )
    }

    pub fn move_cursor_right(
        &mut self,
        transport: &mut T,
    ) -> Result<(), CharacterDisplayError<T::PinError>> {
        self.send_command(
            transport,
            LCD_CMD_CURSORSHIFT | LCD_FLAG_CURSORMOVE | LCD_FLAG_MOVERIGHT,
        )
    }

    fn send_entry_mode(
        &mut self,
        transport: &mut T,
    ) -> Result<(), CharacterDisplayError<T::PinError>> {
        self.send_command(transport, LCD_CMD_ENTRYMODESET | self.display_mode)
    }

    /// Text written after this flows from left to right.
    pub fn left_to_right(
        &mut self,
        transport: &mut T,
    ) -> Result<(), CharacterDisplayError<T::PinError>> {
        self.display_mode |= LCD_FLAG_ENTRYLEFT;
        self.send_entry_mode(transport)
    }

    /// Text written after this flows from right to left.
    pub fn right_to_left(
        &mut self,
        transport: &mut T,
    ) -> Result<(), CharacterDisplayError<T::PinError>> {
        self.display_mode &= !LCD_FLAG_ENTRYLEFT;
        self.send_entry_mode(transport)
    }

    /// With autoscroll on, the display shifts on every write instead of the cursor moving,
    /// which 'right justifies' text at the cursor.
    pub fn autoscroll(
        &mut self,
        transport: &mut T,
        autoscroll: bool,
    ) -> Result<(), CharacterDisplayError<T::PinError>> {
        if autoscroll {
            self.display_mode |= LCD_FLAG_ENTRYSHIFTINCREMENT;
        } else {
            self.display_mode &= !LCD_FLAG_ENTRYSHIFTINCREMENT;
        }
        self.send_entry_mode(transport)
    }

    /// Fill one of the 8 CGRAM glyph slots. Only the low 3 bits of `location` are used. The
    /// DDRAM address is reset to 0 afterwards so later writes go to the display again.
    pub fn create_char(
        &mut self,
        transport: &mut T,
        location: u8,
        charmap: [u8; 8],
    ) -> Result<(), CharacterDisplayError<T::PinError>> {
        self.send_command(transport, LCD_CMD_SETCGRAMADDR | ((location & 0x7) << 3))?;
        for &charmap_byte in charmap.iter() {
            transport.transmit(charmap_byte, true)?;
        }
        self.send_command(transport, LCD_CMD_SETDDRAMADDR)
    }

    /// Writes one data byte at the current address.
    pub fn write_byte(
        &mut self,
        transport: &mut T,
        value: u8,
    ) -> Result<(), CharacterDisplayError<T::PinError>> {
        transport.transmit(value, true)
    }

    pub fn print(
        &mut self,
        transport: &mut T,
        text: &str,
    ) -> Result<(), CharacterDisplayError<T::PinError>> {
        for c in text.chars() {
            transport.transmit(c as u8, true)?;
        }
        Ok(())
    }
}
