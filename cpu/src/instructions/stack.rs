//! Stack push/pull of A and P.
use super::Register;
use crate::{AddressMode, CPUError, Flag, Flags, OpcodeTable, Opcode, Operation, CPU6502};

pub(super) fn register(t: &mut OpcodeTable) -> Result<(), CPUError> {
    t.register(0x48, Opcode::PHA, AddressMode::Implied, 3, pha)?;
    t.register(0x08, Opcode::PHP, AddressMode::Implied, 3, php)?;
    t.register(0x68, Opcode::PLA, AddressMode::Implied, 4, pla)?;
    t.register(0x28, Opcode::PLP, AddressMode::Implied, 4, plp)
}

fn pha(cpu: &mut CPU6502, op: Operation) -> usize {
    let val = cpu.a.0;
    cpu.push_stack(val);
    op.cycles
}

// php pushes P with B and bit 5 set. The live register is unchanged.
fn php(cpu: &mut CPU6502, op: Operation) -> usize {
    let p = cpu.p.with(Flag::Break).with(Flag::Unused);
    cpu.push_stack(p.bits());
    op.cycles
}

fn pla(cpu: &mut CPU6502, op: Operation) -> usize {
    let val = cpu.pop_stack();
    cpu.load_register(Register::A, val);
    op.cycles
}

fn plp(cpu: &mut CPU6502, op: Operation) -> usize {
    cpu.p = Flags::from(cpu.pop_stack());
    op.cycles
}
