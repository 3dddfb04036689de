//! Conditional branches. All take 2 cycles untaken, 3 taken and 4 when the
//! target lands in a different page than the following instruction.
use crate::{AddressMode, CPUError, Flag, OpcodeTable, Opcode, Operation, CPU6502};
use std::num::Wrapping;

pub(super) fn register(t: &mut OpcodeTable) -> Result<(), CPUError> {
    for (code, op, handler) in [
        (0x10, Opcode::BPL, bpl as fn(&mut CPU6502, Operation) -> usize),
        (0x30, Opcode::BMI, bmi),
        (0x50, Opcode::BVC, bvc),
        (0x70, Opcode::BVS, bvs),
        (0x90, Opcode::BCC, bcc),
        (0xB0, Opcode::BCS, bcs),
        (0xD0, Opcode::BNE, bne),
        (0xF0, Opcode::BEQ, beq),
    ] {
        t.register(code, op, AddressMode::Relative, 2, handler)?;
    }
    Ok(())
}

// branch_if always consumes the offset byte and moves PC to the target
// only when taken.
fn branch_if(cpu: &mut CPU6502, op: Operation, taken: bool) -> usize {
    let target = cpu.resolve(op.mode);
    if !taken {
        return op.cycles;
    }
    cpu.pc = Wrapping(target.addr);
    op.cycles + 1 + usize::from(target.page_crossed)
}

fn bpl(cpu: &mut CPU6502, op: Operation) -> usize {
    let taken = !cpu.p.get(Flag::Negative);
    branch_if(cpu, op, taken)
}

fn bmi(cpu: &mut CPU6502, op: Operation) -> usize {
    let taken = cpu.p.get(Flag::Negative);
    branch_if(cpu, op, taken)
}

fn bvc(cpu: &mut CPU6502, op: Operation) -> usize {
    let taken = !cpu.p.get(Flag::Overflow);
    branch_if(cpu, op, taken)
}

fn bvs(cpu: &mut CPU6502, op: Operation) -> usize {
    let taken = cpu.p.get(Flag::Overflow);
    branch_if(cpu, op, taken)
}

fn bcc(cpu: &mut CPU6502, op: Operation) -> usize {
    let taken = !cpu.p.get(Flag::Carry);
    branch_if(cpu, op, taken)
}

fn bcs(cpu: &mut CPU6502, op: Operation) -> usize {
    let taken = cpu.p.get(Flag::Carry);
    branch_if(cpu, op, taken)
}

fn bne(cpu: &mut CPU6502, op: Operation) -> usize {
    let taken = !cpu.p.get(Flag::Zero);
    branch_if(cpu, op, taken)
}

fn beq(cpu: &mut CPU6502, op: Operation) -> usize {
    let taken = cpu.p.get(Flag::Zero);
    branch_if(cpu, op, taken)
}
