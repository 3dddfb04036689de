//! `memory` defines the bus interface a 6502 core uses to reach memory
//! along with simple flat implementations for hosts and tests.
use log::trace;
use std::num::Wrapping;

#[cfg(test)]
mod tests;

/// `NMI_VECTOR` is the location in memory the 6502 uses for NMI interrupts.
/// It is a pointer to the location to start execution.
pub const NMI_VECTOR: u16 = 0xFFFA;

/// `RESET_VECTOR` is the location in memory the 6502 uses on startup to begin execution.
/// It is a pointer to the location to start execution.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// `IRQ_VECTOR` is the location in memory the 6502 uses when executing an IRQ (BRK).
/// It is a pointer to the location to start execution.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// `MAX_SIZE` is the full 16 bit address space.
pub const MAX_SIZE: usize = 65536;

/// Representation of 6502 memory. Doesn't include bank support.
/// The core only ever calls `read` and `write`, everything else is
/// for the host setting up an image.
pub trait Memory {
    /// `read` returns the value at the given address.
    fn read(&self, addr: u16) -> u8;

    /// `write` sets the value at the given address.
    fn write(&mut self, addr: u16, val: u8);

    /// `power_on` puts the memory into its power on state.
    fn power_on(&mut self);

    /// `load` copies data into memory starting at addr. Like the CPU it
    /// wraps past 0xFFFF back to 0x0000.
    fn load(&mut self, addr: u16, data: &[u8]) {
        let mut addr = Wrapping(addr);
        for b in data {
            self.write(addr.0, *b);
            addr += 1;
        }
    }
}

impl Memory for [u8; MAX_SIZE] {
    fn read(&self, addr: u16) -> u8 {
        self[usize::from(addr)]
    }

    fn write(&mut self, addr: u16, val: u8) {
        self[usize::from(addr)] = val;
    }

    fn power_on(&mut self) {
        self.fill(0x00);
    }
}

/// `FlatRAM` gives a flat 64k RAM block to use.
/// It will be initialized to all zeros and `power_on`
/// can use a different value if `fill_value` is set.
/// Additionally the irq/reset and nmi vectors can be set as well.
/// Generally used only for testing.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct FlatRAM {
    fill_value: u8,
    vectors: Vectors,
    memory: [u8; MAX_SIZE],
    debug: bool,
}

#[derive(Debug, Default, Clone, Copy)]
/// `Vectors` defines the 3 6502 vectors for interrupts and reset behavior.
pub struct Vectors {
    /// `nmi` is the NMI vector.
    pub nmi: u16,

    /// `reset` is the reset vector.
    pub reset: u16,

    /// `irq` is the IRQ vector.
    pub irq: u16,
}

impl Memory for FlatRAM {
    /// `read` returns the value at the given address.
    fn read(&self, addr: u16) -> u8 {
        let val = self.memory[usize::from(addr)];
        if self.debug {
            trace!("read: {addr:04X}: {val:02X}");
        }
        val
    }

    /// `write` sets the value at the given address.
    fn write(&mut self, addr: u16, val: u8) {
        if self.debug {
            trace!("write: {addr:04X}: {val:02X}");
        }
        self.memory[usize::from(addr)] = val;
    }

    /// `power_on` will perform power on behavior. For `FlatRAM` this entails
    /// setting all memory locations to the fill value and then setting the 3 vectors
    /// to their assigned values.
    fn power_on(&mut self) {
        self.memory.fill(self.fill_value);
        for (vec, val) in [
            (NMI_VECTOR, self.vectors.nmi),
            (RESET_VECTOR, self.vectors.reset),
            (IRQ_VECTOR, self.vectors.irq),
        ] {
            let [lo, hi] = val.to_le_bytes();
            self.memory[usize::from(vec)] = lo;
            self.memory[usize::from(vec) + 1] = hi;
        }
    }
}

impl Default for FlatRAM {
    fn default() -> Self {
        Self::new()
    }
}

impl FlatRAM {
    /// new will return a `FlatRAM` with 0x00 set for everything (vectors, fill value, etc).
    /// Use other builders to set additional items.
    pub const fn new() -> Self {
        Self {
            fill_value: 0,
            vectors: Vectors {
                nmi: 0x0000,
                reset: 0x0000,
                irq: 0x0000,
            },
            memory: [0; MAX_SIZE],
            debug: false,
        }
    }

    /// `debug` is a builder which traces every bus access through `log`.
    pub const fn debug(mut self) -> Self {
        self.debug = true;
        self
    }

    /// `fill_value` is a builder which sets the fill value to use when performing `power_on`.
    pub const fn fill_value(mut self, value: u8) -> Self {
        self.fill_value = value;
        self
    }

    /// `vectors` is a builder which sets the vectors to use when performing `power_on`.
    pub const fn vectors(mut self, vectors: Vectors) -> Self {
        self.vectors = vectors;
        self
    }
}
