//! Set and clear of individual status flags.
use crate::{AddressMode, CPUError, Flag, OpcodeTable, Opcode, Operation, CPU6502};

pub(super) fn register(t: &mut OpcodeTable) -> Result<(), CPUError> {
    for (code, op, handler) in [
        (0x18, Opcode::CLC, clc as fn(&mut CPU6502, Operation) -> usize),
        (0x38, Opcode::SEC, sec),
        (0x58, Opcode::CLI, cli),
        (0x78, Opcode::SEI, sei),
        (0xB8, Opcode::CLV, clv),
        (0xD8, Opcode::CLD, cld),
        (0xF8, Opcode::SED, sed),
    ] {
        t.register(code, op, AddressMode::Implied, 2, handler)?;
    }
    Ok(())
}

fn clc(cpu: &mut CPU6502, op: Operation) -> usize {
    cpu.p.set(Flag::Carry, false);
    op.cycles
}

fn sec(cpu: &mut CPU6502, op: Operation) -> usize {
    cpu.p.set(Flag::Carry, true);
    op.cycles
}

fn cli(cpu: &mut CPU6502, op: Operation) -> usize {
    cpu.p.set(Flag::InterruptDisable, false);
    op.cycles
}

fn sei(cpu: &mut CPU6502, op: Operation) -> usize {
    cpu.p.set(Flag::InterruptDisable, true);
    op.cycles
}

fn clv(cpu: &mut CPU6502, op: Operation) -> usize {
    cpu.p.set(Flag::Overflow, false);
    op.cycles
}

fn cld(cpu: &mut CPU6502, op: Operation) -> usize {
    cpu.p.set(Flag::Decimal, false);
    op.cycles
}

fn sed(cpu: &mut CPU6502, op: Operation) -> usize {
    cpu.p.set(Flag::Decimal, true);
    op.cycles
}
