use bitfield::bitfield;

/// Value of the enable gate bit within a shift register frame.
pub const SR_EN_BIT: u8 = 0x80;
/// Value of the register select bit within a shift register frame.
pub const SR_RS_BIT: u8 = 0x04;

// Shift register outputs as wired to the LCD. Bit 7 gates the LCD enable line through a
// diode-resistor AND with the enable pin, bits 6-3 drive D7-D4, bit 2 drives RS. Bits 1 and 0
// are not connected and always hold zero.
bitfield! {
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct ShiftRegisterFrame(u8);
    impl Debug;
    pub rs, set_rs: 2, 2;
    pub data, set_data: 6, 3;
    pub enable, set_enable: 7, 7;
}

impl ShiftRegisterFrame {
    /// Builds the frame carrying the low nibble of `nibble` on D7-D4. The enable gate bit is
    /// always set.
    pub fn with_nibble(rs_setting: bool, nibble: u8) -> Self {
        let mut frame = ShiftRegisterFrame(0);
        frame.set_enable(1);
        frame.set_rs(rs_setting as u8);
        frame.set_data(nibble & 0x0F);
        frame
    }

    /// The two frames for a full byte, high nibble first.
    pub fn for_byte(value: u8, rs_setting: bool) -> [Self; 2] {
        [
            Self::with_nibble(rs_setting, value >> 4),
            Self::with_nibble(rs_setting, value & 0x0F),
        ]
    }

    /// The single frame used during initialization. Carries the high nibble of `value` with
    /// RS clear.
    pub fn for_raw_nibble(value: u8) -> Self {
        Self::with_nibble(false, value >> 4)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }
}
