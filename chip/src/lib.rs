//! `chip` defines the basic interfaces for chips in the 6502 family.
//! Each chip must implement this in order to be driven by a host loop.

use color_eyre::eyre::Result;

/// Chip defines the trait for an 8 bit chip in the 6502 chip era.
pub trait Chip {
    /// `tick` runs one atomic step of the chip and returns the number of
    /// clock cycles that step consumed. A chip which is currently held
    /// (i.e. RDY low) returns 0 without changing any state.
    ///
    /// # Errors
    /// If calling `tick` results in a lockup/illegal condition an error
    /// will be returned. Implementations document which typed errors can
    /// be downcast from the report.
    fn tick(&mut self) -> Result<usize>;
}
