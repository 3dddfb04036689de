//! Load and store instructions.
//!
//! Loads set N/Z from the value loaded and take an extra cycle when an indexed
//! mode crosses a page. Stores never touch flags and always take their listed
//! cycle count (the indexed forms already include the fixup cycle).
use super::{penalty, read_modes, Register};
use crate::{AddressMode, CPUError, OpcodeTable, Opcode, Operation, CPU6502};

pub(super) fn register(t: &mut OpcodeTable) -> Result<(), CPUError> {
    for (code, mode, cycles) in read_modes(0xA1) {
        t.register(code, Opcode::LDA, mode, cycles, lda)?;
    }
    for (code, mode, cycles) in [
        (0xA2, AddressMode::Immediate, 2),
        (0xA6, AddressMode::ZeroPage, 3),
        (0xB6, AddressMode::ZeroPageY, 4),
        (0xAE, AddressMode::Absolute, 4),
        (0xBE, AddressMode::AbsoluteY, 4),
    ] {
        t.register(code, Opcode::LDX, mode, cycles, ldx)?;
    }
    for (code, mode, cycles) in [
        (0xA0, AddressMode::Immediate, 2),
        (0xA4, AddressMode::ZeroPage, 3),
        (0xB4, AddressMode::ZeroPageX, 4),
        (0xAC, AddressMode::Absolute, 4),
        (0xBC, AddressMode::AbsoluteX, 4),
    ] {
        t.register(code, Opcode::LDY, mode, cycles, ldy)?;
    }
    for (code, mode, cycles) in [
        (0x81, AddressMode::IndirectX, 6),
        (0x85, AddressMode::ZeroPage, 3),
        (0x8D, AddressMode::Absolute, 4),
        (0x91, AddressMode::IndirectY, 6),
        (0x95, AddressMode::ZeroPageX, 4),
        (0x99, AddressMode::AbsoluteY, 5),
        (0x9D, AddressMode::AbsoluteX, 5),
    ] {
        t.register(code, Opcode::STA, mode, cycles, sta)?;
    }
    for (code, mode, cycles) in [
        (0x86, AddressMode::ZeroPage, 3),
        (0x96, AddressMode::ZeroPageY, 4),
        (0x8E, AddressMode::Absolute, 4),
    ] {
        t.register(code, Opcode::STX, mode, cycles, stx)?;
    }
    for (code, mode, cycles) in [
        (0x84, AddressMode::ZeroPage, 3),
        (0x94, AddressMode::ZeroPageX, 4),
        (0x8C, AddressMode::Absolute, 4),
    ] {
        t.register(code, Opcode::STY, mode, cycles, sty)?;
    }
    Ok(())
}

fn load(cpu: &mut CPU6502, op: Operation, reg: Register) -> usize {
    let (val, crossed) = cpu.fetch_operand(op.mode);
    cpu.load_register(reg, val);
    penalty(op, crossed)
}

fn lda(cpu: &mut CPU6502, op: Operation) -> usize {
    load(cpu, op, Register::A)
}

fn ldx(cpu: &mut CPU6502, op: Operation) -> usize {
    load(cpu, op, Register::X)
}

fn ldy(cpu: &mut CPU6502, op: Operation) -> usize {
    load(cpu, op, Register::Y)
}

fn store(cpu: &mut CPU6502, op: Operation, val: u8) -> usize {
    let addr = cpu.resolve(op.mode).addr;
    cpu.write8(addr, val);
    op.cycles
}

fn sta(cpu: &mut CPU6502, op: Operation) -> usize {
    let val = cpu.a.0;
    store(cpu, op, val)
}

fn stx(cpu: &mut CPU6502, op: Operation) -> usize {
    let val = cpu.x.0;
    store(cpu, op, val)
}

fn sty(cpu: &mut CPU6502, op: Operation) -> usize {
    let val = cpu.y.0;
    store(cpu, op, val)
}
