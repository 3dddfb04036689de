//! Shifts and rotates on A or memory. C always gets the bit shifted out.
use crate::{AddressMode, CPUError, Flag, OpcodeTable, Opcode, Operation, CPU6502};

// The 5 forms every shift has, as offsets from the instruction's base opcode.
const MODES: [(u8, AddressMode, usize); 5] = [
    (0x0A, AddressMode::Accumulator, 2),
    (0x06, AddressMode::ZeroPage, 5),
    (0x16, AddressMode::ZeroPageX, 6),
    (0x0E, AddressMode::Absolute, 6),
    (0x1E, AddressMode::AbsoluteX, 7),
];

pub(super) fn register(t: &mut OpcodeTable) -> Result<(), CPUError> {
    for (base, op, handler) in [
        (0x00, Opcode::ASL, asl as fn(&mut CPU6502, Operation) -> usize),
        (0x20, Opcode::ROL, rol),
        (0x40, Opcode::LSR, lsr),
        (0x60, Opcode::ROR, ror),
    ] {
        for (offset, mode, cycles) in MODES {
            t.register(base + offset, op, mode, cycles, handler)?;
        }
    }
    Ok(())
}

// shift runs f (given the value and incoming carry, returning the result and
// outgoing carry) as a read-modify-write.
fn shift(cpu: &mut CPU6502, op: Operation, f: fn(u8, bool) -> (u8, bool)) -> usize {
    cpu.rmw(op.mode, |cpu, val| {
        let (res, carry) = f(val, cpu.p.get(Flag::Carry));
        cpu.p.set(Flag::Carry, carry);
        res
    });
    op.cycles
}

fn asl(cpu: &mut CPU6502, op: Operation) -> usize {
    shift(cpu, op, |val, _| (val << 1, val & 0x80 == 0x80))
}

fn lsr(cpu: &mut CPU6502, op: Operation) -> usize {
    shift(cpu, op, |val, _| (val >> 1, val & 0x01 == 0x01))
}

fn rol(cpu: &mut CPU6502, op: Operation) -> usize {
    shift(cpu, op, |val, carry| {
        ((val << 1) | u8::from(carry), val & 0x80 == 0x80)
    })
}

fn ror(cpu: &mut CPU6502, op: Operation) -> usize {
    shift(cpu, op, |val, carry| {
        ((val >> 1) | (u8::from(carry) << 7), val & 0x01 == 0x01)
    })
}
