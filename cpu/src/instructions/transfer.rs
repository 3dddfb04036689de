//! Register to register transfers.
use super::Register;
use crate::{AddressMode, CPUError, OpcodeTable, Opcode, Operation, CPU6502};

pub(super) fn register(t: &mut OpcodeTable) -> Result<(), CPUError> {
    for (code, op, handler) in [
        (0xAA, Opcode::TAX, tax as fn(&mut CPU6502, Operation) -> usize),
        (0xA8, Opcode::TAY, tay),
        (0xBA, Opcode::TSX, tsx),
        (0x8A, Opcode::TXA, txa),
        (0x9A, Opcode::TXS, txs),
        (0x98, Opcode::TYA, tya),
    ] {
        t.register(code, op, AddressMode::Implied, 2, handler)?;
    }
    Ok(())
}

fn tax(cpu: &mut CPU6502, op: Operation) -> usize {
    cpu.load_register(Register::X, cpu.a.0);
    op.cycles
}

fn tay(cpu: &mut CPU6502, op: Operation) -> usize {
    cpu.load_register(Register::Y, cpu.a.0);
    op.cycles
}

fn tsx(cpu: &mut CPU6502, op: Operation) -> usize {
    cpu.load_register(Register::X, cpu.s.0);
    op.cycles
}

fn txa(cpu: &mut CPU6502, op: Operation) -> usize {
    cpu.load_register(Register::A, cpu.x.0);
    op.cycles
}

// txs is the only transfer which leaves the flags alone.
fn txs(cpu: &mut CPU6502, op: Operation) -> usize {
    cpu.s = cpu.x;
    op.cycles
}

fn tya(cpu: &mut CPU6502, op: Operation) -> usize {
    cpu.load_register(Register::A, cpu.y.0);
    op.cycles
}
