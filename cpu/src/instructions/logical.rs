//! Bitwise logic against A plus BIT.
use super::{penalty, read_modes, Register};
use crate::{AddressMode, CPUError, Flag, OpcodeTable, Opcode, Operation, CPU6502};

pub(super) fn register(t: &mut OpcodeTable) -> Result<(), CPUError> {
    for (code, mode, cycles) in read_modes(0x01) {
        t.register(code, Opcode::ORA, mode, cycles, ora)?;
    }
    for (code, mode, cycles) in read_modes(0x21) {
        t.register(code, Opcode::AND, mode, cycles, and)?;
    }
    for (code, mode, cycles) in read_modes(0x41) {
        t.register(code, Opcode::EOR, mode, cycles, eor)?;
    }
    t.register(0x24, Opcode::BIT, AddressMode::ZeroPage, 3, bit)?;
    t.register(0x2C, Opcode::BIT, AddressMode::Absolute, 4, bit)
}

// logic applies f to A and the operand storing the result in A.
fn logic(cpu: &mut CPU6502, op: Operation, f: fn(u8, u8) -> u8) -> usize {
    let (val, crossed) = cpu.fetch_operand(op.mode);
    let res = f(cpu.a.0, val);
    cpu.load_register(Register::A, res);
    penalty(op, crossed)
}

fn and(cpu: &mut CPU6502, op: Operation) -> usize {
    logic(cpu, op, |a, v| a & v)
}

fn ora(cpu: &mut CPU6502, op: Operation) -> usize {
    logic(cpu, op, |a, v| a | v)
}

fn eor(cpu: &mut CPU6502, op: Operation) -> usize {
    logic(cpu, op, |a, v| a ^ v)
}

// bit sets Z from A & M but N and V straight from bits 7 and 6 of M.
// A is left alone.
fn bit(cpu: &mut CPU6502, op: Operation) -> usize {
    let (val, _) = cpu.fetch_operand(op.mode);
    cpu.zero_check(cpu.a.0 & val);
    cpu.negative_check(val);
    cpu.p.set(Flag::Overflow, val & 0x40 == 0x40);
    op.cycles
}
