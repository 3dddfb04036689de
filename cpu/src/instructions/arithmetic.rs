//! ADC/SBC and the compare instructions.
use super::{penalty, read_modes, Register};
use crate::{AddressMode, CPUError, Flag, OpcodeTable, Opcode, Operation, CPU6502};

pub(super) fn register(t: &mut OpcodeTable) -> Result<(), CPUError> {
    for (code, mode, cycles) in read_modes(0x61) {
        t.register(code, Opcode::ADC, mode, cycles, adc)?;
    }
    for (code, mode, cycles) in read_modes(0xE1) {
        t.register(code, Opcode::SBC, mode, cycles, sbc)?;
    }
    for (code, mode, cycles) in read_modes(0xC1) {
        t.register(code, Opcode::CMP, mode, cycles, cmp)?;
    }
    for (code, mode, cycles) in [
        (0xE0, AddressMode::Immediate, 2),
        (0xE4, AddressMode::ZeroPage, 3),
        (0xEC, AddressMode::Absolute, 4),
    ] {
        t.register(code, Opcode::CPX, mode, cycles, cpx)?;
    }
    for (code, mode, cycles) in [
        (0xC0, AddressMode::Immediate, 2),
        (0xC4, AddressMode::ZeroPage, 3),
        (0xCC, AddressMode::Absolute, 4),
    ] {
        t.register(code, Opcode::CPY, mode, cycles, cpy)?;
    }
    Ok(())
}

impl CPU6502 {
    // add_with_carry implements binary ADC. SBC is the same operation on the
    // ones complement of the operand. The D flag is ignored.
    fn add_with_carry(&mut self, val: u8) {
        let a = self.a.0;
        let sum = u16::from(a) + u16::from(val) + u16::from(self.p.get(Flag::Carry));
        let res = (sum & 0xFF) as u8;
        self.overflow_check(a, val, res);
        self.p.set(Flag::Carry, sum > 0xFF);
        self.load_register(Register::A, res);
    }

    // overflow_check sets the V flag if the result of the ALU operation
    // caused a two's complement sign change.
    // Taken from http://www.righto.com/2012/12/the-6502-overflow-flag-explained.html
    fn overflow_check(&mut self, reg: u8, arg: u8, result: u8) {
        self.p
            .set(Flag::Overflow, (reg ^ result) & (arg ^ result) & 0x80 != 0x00);
    }

    // compare implements the logic for all CMP/CPX/CPY instructions.
    // C is an unsigned reg >= val, N/Z come from reg - val.
    fn compare(&mut self, reg: u8, val: u8) {
        self.p.set(Flag::Carry, reg >= val);
        self.nz_check(reg.wrapping_sub(val));
    }
}

fn adc(cpu: &mut CPU6502, op: Operation) -> usize {
    let (val, crossed) = cpu.fetch_operand(op.mode);
    cpu.add_with_carry(val);
    penalty(op, crossed)
}

fn sbc(cpu: &mut CPU6502, op: Operation) -> usize {
    let (val, crossed) = cpu.fetch_operand(op.mode);
    cpu.add_with_carry(!val);
    penalty(op, crossed)
}

fn cmp(cpu: &mut CPU6502, op: Operation) -> usize {
    let (val, crossed) = cpu.fetch_operand(op.mode);
    cpu.compare(cpu.a.0, val);
    penalty(op, crossed)
}

fn cpx(cpu: &mut CPU6502, op: Operation) -> usize {
    let (val, _) = cpu.fetch_operand(op.mode);
    cpu.compare(cpu.x.0, val);
    op.cycles
}

fn cpy(cpu: &mut CPU6502, op: Operation) -> usize {
    let (val, _) = cpu.fetch_operand(op.mode);
    cpu.compare(cpu.y.0, val);
    op.cycles
}
