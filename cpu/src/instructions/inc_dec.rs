//! Increment and decrement of memory and the index registers. All wrap at 8 bits.
use super::Register;
use crate::{AddressMode, CPUError, OpcodeTable, Opcode, Operation, CPU6502};

pub(super) fn register(t: &mut OpcodeTable) -> Result<(), CPUError> {
    for (code, mode, cycles) in [
        (0xE6, AddressMode::ZeroPage, 5),
        (0xF6, AddressMode::ZeroPageX, 6),
        (0xEE, AddressMode::Absolute, 6),
        (0xFE, AddressMode::AbsoluteX, 7),
    ] {
        t.register(code, Opcode::INC, mode, cycles, inc)?;
    }
    for (code, mode, cycles) in [
        (0xC6, AddressMode::ZeroPage, 5),
        (0xD6, AddressMode::ZeroPageX, 6),
        (0xCE, AddressMode::Absolute, 6),
        (0xDE, AddressMode::AbsoluteX, 7),
    ] {
        t.register(code, Opcode::DEC, mode, cycles, dec)?;
    }
    t.register(0xE8, Opcode::INX, AddressMode::Implied, 2, inx)?;
    t.register(0xC8, Opcode::INY, AddressMode::Implied, 2, iny)?;
    t.register(0xCA, Opcode::DEX, AddressMode::Implied, 2, dex)?;
    t.register(0x88, Opcode::DEY, AddressMode::Implied, 2, dey)
}

fn inc(cpu: &mut CPU6502, op: Operation) -> usize {
    cpu.rmw(op.mode, |_, val| val.wrapping_add(1));
    op.cycles
}

fn dec(cpu: &mut CPU6502, op: Operation) -> usize {
    cpu.rmw(op.mode, |_, val| val.wrapping_sub(1));
    op.cycles
}

fn inx(cpu: &mut CPU6502, op: Operation) -> usize {
    cpu.load_register(Register::X, cpu.x.0.wrapping_add(1));
    op.cycles
}

fn iny(cpu: &mut CPU6502, op: Operation) -> usize {
    cpu.load_register(Register::Y, cpu.y.0.wrapping_add(1));
    op.cycles
}

fn dex(cpu: &mut CPU6502, op: Operation) -> usize {
    cpu.load_register(Register::X, cpu.x.0.wrapping_sub(1));
    op.cycles
}

fn dey(cpu: &mut CPU6502, op: Operation) -> usize {
    cpu.load_register(Register::Y, cpu.y.0.wrapping_sub(1));
    op.cycles
}
