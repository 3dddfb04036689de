//! Addressing mode resolution. Every mode turns the operand bytes at PC into
//! an effective address while moving PC past them.
use crate::CPU6502;
use serde::Serialize;
use std::num::Wrapping;
use strum_macros::{Display, EnumIter, EnumString};

/// `AddressMode` defines the 6502 addressing modes.
#[derive(
    Clone, Copy, Display, Debug, Default, PartialEq, Eq, Hash, EnumIter, EnumString, Serialize,
)]
pub enum AddressMode {
    /// `Implied` takes no arguments and instead operates directly based on the opcode only.
    /// Example: INX increments the X register.
    #[default]
    Implied,

    /// `Accumulator` operates on the A register instead of memory.
    /// Example: LSR A shifts A right by one.
    Accumulator,

    /// `Immediate` mode uses the constant following the opcode to perform the operation.
    /// Example: LDA #04 loads 0x04 into A.
    Immediate,

    /// `ZeroPage` references the first 256 bytes.
    /// Example: LDA 0F would load the value from 0x0F into A.
    ZeroPage,

    /// `ZeroPageX` references the first 256 bytes (zero page) with addition from the X register.
    /// Overflow simply wraps.
    /// Example: LDA 0F,X with X=4 would load the value from 0x13 into A.
    ZeroPageX,

    /// `ZeroPageY` references the first 256 bytes (zero page) with addition from the Y register.
    /// Overflow simply wraps.
    /// Example: LDX 0F,Y with Y=4 would load the value from 0x13 into X.
    ZeroPageY,

    /// `Relative` takes the argument and adds it as a signed value to the PC to determine the next PC location.
    /// This is used for branching.
    /// Example: D004 D0 FE is a BNE which computes to D004 if true and would infinite loop.
    Relative,

    /// `Absolute` references a direct 16 bit constant as an address.
    /// Example: LDA D000 loads A from 0xD000
    Absolute,

    /// `AbsoluteX` references a direct 16 bit constant as an address and adds X to get the final address.
    /// Example: LDA D000,X with X = 4 loads A from 0xD004
    AbsoluteX,

    /// `AbsoluteY` references a direct 16 bit constant as an address and adds Y to get the final address.
    /// Example: LDA D000,Y with Y = 5 loads A from 0xD005
    AbsoluteY,

    /// `Indirect` loads a pointer from the given address and de-references it to get the final address.
    /// Only JMP uses this.
    /// Example: JMP (D000) with 0xD000,0xD001 equal to 0x01,0xC0 will jump to 0xC001
    Indirect,

    /// `IndirectX` uses the given address from the first 256 bytes (zero page) with addition from the X register.
    /// It then uses this and the following location as a pointer to use as the final address.
    /// Example LDA (04,X) with X = 8 and location 0C,0D have 02 and 01. This would load the value at 0x0102 into A.
    IndirectX,

    /// `IndirectY` uses the given address from the first 256 bytes (zero page).
    /// It then uses this and the following address as a pointer. Then Y is added to that to get the final
    /// address to use.
    /// Example LDA (04),Y with Y = 4 and location 04,05 have 02 and 01. This would load the value at 0x0106 into A.
    IndirectY,
}

impl AddressMode {
    /// `operand_bytes` is how many bytes follow the opcode for this mode.
    #[must_use]
    pub const fn operand_bytes(self) -> u16 {
        match self {
            AddressMode::Implied | AddressMode::Accumulator => 0,
            AddressMode::Immediate
            | AddressMode::ZeroPage
            | AddressMode::ZeroPageX
            | AddressMode::ZeroPageY
            | AddressMode::Relative
            | AddressMode::IndirectX
            | AddressMode::IndirectY => 1,
            AddressMode::Absolute
            | AddressMode::AbsoluteX
            | AddressMode::AbsoluteY
            | AddressMode::Indirect => 2,
        }
    }
}

/// `Effective` is a resolved operand location.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Effective {
    /// The address the instruction operates on (or branches/jumps to).
    pub addr: u16,

    /// Set when indexing (or a branch) moved into a different page than its base.
    pub page_crossed: bool,
}

impl Effective {
    const fn new(addr: u16) -> Self {
        Self {
            addr,
            page_crossed: false,
        }
    }

    const fn indexed(base: u16, addr: u16) -> Self {
        Self {
            addr,
            page_crossed: (base & 0xFF00) != (addr & 0xFF00),
        }
    }
}

impl CPU6502 {
    // next_byte reads the byte at PC and moves PC past it.
    fn next_byte(&mut self) -> u8 {
        let val = self.read8(self.pc.0);
        self.pc += 1;
        val
    }

    // next_word reads the little endian word at PC and moves PC past it.
    fn next_word(&mut self) -> u16 {
        let lo = self.next_byte();
        let hi = self.next_byte();
        u16::from_le_bytes([lo, hi])
    }

    // read16_zp reads a pointer out of zero page. The high byte wraps
    // within zero page so a pointer at 0xFF takes its high byte from 0x00.
    fn read16_zp(&self, ptr: u8) -> u16 {
        let lo = self.read8(u16::from(ptr));
        let hi = self.read8(u16::from(ptr.wrapping_add(1)));
        u16::from_le_bytes([lo, hi])
    }

    /// `resolve` computes the effective address for the given mode using the
    /// operand bytes at PC and advances PC past them.
    ///
    /// Immediate resolves to the address of the operand byte itself. Relative
    /// resolves to the branch target with `page_crossed` comparing the target
    /// against the address following the instruction. Implied and Accumulator
    /// consume nothing and resolve to the current PC.
    pub fn resolve(&mut self, mode: AddressMode) -> Effective {
        match mode {
            AddressMode::Implied | AddressMode::Accumulator => Effective::new(self.pc.0),
            AddressMode::Immediate => {
                let addr = self.pc.0;
                self.pc += 1;
                Effective::new(addr)
            }
            AddressMode::ZeroPage => Effective::new(u16::from(self.next_byte())),
            AddressMode::ZeroPageX => {
                let zp = Wrapping(self.next_byte()) + self.x;
                Effective::new(u16::from(zp.0))
            }
            AddressMode::ZeroPageY => {
                let zp = Wrapping(self.next_byte()) + self.y;
                Effective::new(u16::from(zp.0))
            }
            AddressMode::Relative => {
                // Sign extend so it can be added to PC.
                #[allow(clippy::cast_possible_wrap)]
                let offset = i16::from(self.next_byte() as i8);
                let next = self.pc.0;
                Effective::indexed(next, next.wrapping_add_signed(offset))
            }
            AddressMode::Absolute => Effective::new(self.next_word()),
            AddressMode::AbsoluteX => {
                let base = self.next_word();
                Effective::indexed(base, base.wrapping_add(u16::from(self.x.0)))
            }
            AddressMode::AbsoluteY => {
                let base = self.next_word();
                Effective::indexed(base, base.wrapping_add(u16::from(self.y.0)))
            }
            AddressMode::Indirect => {
                // NMOS bug: the pointer high byte never carries into the next
                // page. JMP (02FF) reads 02FF and 0200.
                let ptr = self.next_word();
                let lo = self.read8(ptr);
                let hi = self.read8((ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF));
                Effective::new(u16::from_le_bytes([lo, hi]))
            }
            AddressMode::IndirectX => {
                let ptr = Wrapping(self.next_byte()) + self.x;
                Effective::new(self.read16_zp(ptr.0))
            }
            AddressMode::IndirectY => {
                let ptr = self.next_byte();
                let base = self.read16_zp(ptr);
                Effective::indexed(base, base.wrapping_add(u16::from(self.y.0)))
            }
        }
    }

    /// `fetch_operand` resolves the mode and reads the value it points at.
    /// Returns the value plus whether a page boundary was crossed.
    pub fn fetch_operand(&mut self, mode: AddressMode) -> (u8, bool) {
        if mode == AddressMode::Accumulator {
            return (self.a.0, false);
        }
        let e = self.resolve(mode);
        (self.read8(e.addr), e.page_crossed)
    }
}
