//! Jumps, subroutine calls, BRK/RTI and NOP.
use crate::{AddressMode, CPUError, Flag, Flags, OpcodeTable, Opcode, Operation, CPU6502, IRQ_VECTOR};
use std::num::Wrapping;

pub(super) fn register(t: &mut OpcodeTable) -> Result<(), CPUError> {
    t.register(0x4C, Opcode::JMP, AddressMode::Absolute, 3, jmp)?;
    t.register(0x6C, Opcode::JMP, AddressMode::Indirect, 5, jmp)?;
    t.register(0x20, Opcode::JSR, AddressMode::Absolute, 6, jsr)?;
    t.register(0x60, Opcode::RTS, AddressMode::Implied, 6, rts)?;
    t.register(0x00, Opcode::BRK, AddressMode::Implied, 7, brk)?;
    t.register(0x40, Opcode::RTI, AddressMode::Implied, 6, rti)?;
    t.register(0xEA, Opcode::NOP, AddressMode::Implied, 2, nop)
}

impl CPU6502 {
    fn push_pc(&mut self, pc: u16) {
        let [lo, hi] = pc.to_le_bytes();
        self.push_stack(hi);
        self.push_stack(lo);
    }

    fn pop_pc(&mut self) -> u16 {
        let lo = self.pop_stack();
        let hi = self.pop_stack();
        u16::from_le_bytes([lo, hi])
    }
}

fn jmp(cpu: &mut CPU6502, op: Operation) -> usize {
    cpu.pc = Wrapping(cpu.resolve(op.mode).addr);
    op.cycles
}

// jsr pushes the address of its own last byte. RTS adds the 1 back.
fn jsr(cpu: &mut CPU6502, op: Operation) -> usize {
    let target = cpu.resolve(op.mode).addr;
    let ret = cpu.pc.0.wrapping_sub(1);
    cpu.push_pc(ret);
    cpu.pc = Wrapping(target);
    op.cycles
}

fn rts(cpu: &mut CPU6502, op: Operation) -> usize {
    cpu.pc = Wrapping(cpu.pop_pc().wrapping_add(1));
    op.cycles
}

// brk skips its padding byte so the pushed PC is opcode + 2. The P image
// on the stack always has B and bit 5 set.
fn brk(cpu: &mut CPU6502, op: Operation) -> usize {
    let ret = cpu.pc.0.wrapping_add(1);
    cpu.push_pc(ret);
    let p = cpu.p.with(Flag::Break).with(Flag::Unused);
    cpu.push_stack(p.bits());
    cpu.p.set(Flag::InterruptDisable, true);
    cpu.pc = Wrapping(cpu.read16(IRQ_VECTOR));
    op.cycles
}

fn rti(cpu: &mut CPU6502, op: Operation) -> usize {
    cpu.p = Flags::from(cpu.pop_stack());
    cpu.pc = Wrapping(cpu.pop_pc());
    op.cycles
}

fn nop(_cpu: &mut CPU6502, op: Operation) -> usize {
    op.cycles
}
