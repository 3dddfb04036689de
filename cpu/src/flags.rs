//! The processor status register.
use serde::Serialize;
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

/// `Flag` names each bit of the status register. Nothing outside this
/// module deals with the raw bit positions.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash, EnumIter, EnumString)]
pub enum Flag {
    /// Carry out of bit 7 (or the bit shifted out).
    Carry,
    /// Last result was zero.
    Zero,
    /// IRQ's are masked while set.
    InterruptDisable,
    /// BCD mode for ADC/SBC. Stored but not honored by this core.
    Decimal,
    /// Only meaningful in the image pushed by PHP/BRK.
    Break,
    /// Unused bit 5. Pushed as set by PHP/BRK.
    Unused,
    /// Signed overflow from ADC/SBC (or bit 6 for BIT).
    Overflow,
    /// Bit 7 of the last result.
    Negative,
}

impl Flag {
    const fn mask(self) -> u8 {
        match self {
            Flag::Carry => 0x01,
            Flag::Zero => 0x02,
            Flag::InterruptDisable => 0x04,
            Flag::Decimal => 0x08,
            Flag::Break => 0x10,
            Flag::Unused => 0x20,
            Flag::Overflow => 0x40,
            Flag::Negative => 0x80,
        }
    }
}

/// Flags defines a type to represent the processor flags.
/// It will print out with all of the flag values but otherwise
/// converts to/from a u8 when it needs to go on the stack.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Flags(u8);

impl Flags {
    /// `get` returns whether the given flag is set.
    #[must_use]
    pub const fn get(self, flag: Flag) -> bool {
        self.0 & flag.mask() != 0x00
    }

    /// `set` sets or clears exactly the given flag leaving all others untouched.
    pub fn set(&mut self, flag: Flag, on: bool) {
        if on {
            self.0 |= flag.mask();
        } else {
            self.0 &= !flag.mask();
        }
    }

    /// `with` returns a copy with the given flag set.
    #[must_use]
    pub const fn with(self, flag: Flag) -> Self {
        Self(self.0 | flag.mask())
    }

    /// `bits` returns the raw register value.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl From<u8> for Flags {
    fn from(val: u8) -> Self {
        Self(val)
    }
}

impl From<Flags> for u8 {
    fn from(f: Flags) -> Self {
        f.0
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let out: String = [
            (Flag::Negative, 'N'),
            (Flag::Overflow, 'V'),
            (Flag::Unused, 'S'),
            (Flag::Break, 'B'),
            (Flag::Decimal, 'D'),
            (Flag::InterruptDisable, 'I'),
            (Flag::Zero, 'Z'),
            (Flag::Carry, 'C'),
        ]
        .iter()
        .map(|(flag, c)| {
            if self.get(*flag) {
                *c
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect();
        write!(f, "{out}")
    }
}
