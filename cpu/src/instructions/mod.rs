//! # 6502 Instruction Implementations
//!
//! Every documented opcode grouped by family. Each family registers its own
//! opcode bytes into the `OpcodeTable` and supplies one handler per mnemonic
//! which serves all of that mnemonic's addressing modes.
//!
//! - **load_store**: LDA, LDX, LDY, STA, STX, STY
//! - **logical**: AND, ORA, EOR, BIT
//! - **arithmetic**: ADC, SBC, CMP, CPX, CPY
//! - **shifts**: ASL, LSR, ROL, ROR
//! - **inc_dec**: INC, DEC, INX, INY, DEX, DEY
//! - **branches**: BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS
//! - **control**: JMP, JSR, RTS, BRK, RTI, NOP
//! - **stack**: PHA, PHP, PLA, PLP
//! - **transfer**: TAX, TAY, TXA, TYA, TSX, TXS
//! - **flags**: CLC, SEC, CLI, SEI, CLD, SED, CLV
use crate::{AddressMode, CPUError, OpcodeTable, Operation, CPU6502};
use std::num::Wrapping;

mod arithmetic;
mod branches;
mod control;
mod flags;
mod inc_dec;
mod load_store;
mod logical;
mod shifts;
mod stack;
mod transfer;

/// `register_all` installs every documented opcode.
pub(crate) fn register_all(t: &mut OpcodeTable) -> Result<(), CPUError> {
    load_store::register(t)?;
    logical::register(t)?;
    arithmetic::register(t)?;
    shifts::register(t)?;
    inc_dec::register(t)?;
    branches::register(t)?;
    control::register(t)?;
    stack::register(t)?;
    transfer::register(t)?;
    flags::register(t)
}

// The registers an instruction can load into.
#[derive(Clone, Copy)]
enum Register {
    A,
    X,
    Y,
}

// read_modes returns the 8 addressing modes of the "group one" read
// instructions (ORA/AND/EOR/ADC/LDA/CMP/SBC) with their opcode bytes for the
// given base (the (d,x) opcode) and base cycle counts.
const fn read_modes(base: u8) -> [(u8, AddressMode, usize); 8] {
    [
        (base, AddressMode::IndirectX, 6),
        (base + 0x04, AddressMode::ZeroPage, 3),
        (base + 0x08, AddressMode::Immediate, 2),
        (base + 0x0C, AddressMode::Absolute, 4),
        (base + 0x10, AddressMode::IndirectY, 5),
        (base + 0x14, AddressMode::ZeroPageX, 4),
        (base + 0x18, AddressMode::AbsoluteY, 4),
        (base + 0x1C, AddressMode::AbsoluteX, 4),
    ]
}

// penalty adds the extra cycle a read instruction takes when indexing
// crossed a page.
fn penalty(op: Operation, page_crossed: bool) -> usize {
    op.cycles + usize::from(page_crossed)
}

impl CPU6502 {
    // load_register takes the val and inserts it into the given register.
    // It then does Z and N checks against the new value.
    fn load_register(&mut self, reg: Register, val: u8) {
        match reg {
            Register::A => self.a = Wrapping(val),
            Register::X => self.x = Wrapping(val),
            Register::Y => self.y = Wrapping(val),
        }
        self.nz_check(val);
    }

    // rmw reads the operand (A in accumulator mode), runs f against it and
    // writes the result back. N/Z are set from the result. Memory forms
    // take one read and one write on the bus.
    fn rmw(&mut self, mode: AddressMode, f: impl FnOnce(&mut Self, u8) -> u8) {
        if mode == AddressMode::Accumulator {
            let val = self.a.0;
            let res = f(self, val);
            self.load_register(Register::A, res);
            return;
        }
        let addr = self.resolve(mode).addr;
        let val = self.read8(addr);
        let res = f(self, val);
        self.write8(addr, res);
        self.nz_check(res);
    }
}
