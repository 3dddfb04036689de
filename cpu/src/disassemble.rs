//! disassemble provides functions for disassembling a given location.
use crate::{AddressMode, OpcodeTable};
use memory::Memory;
use std::num::Wrapping;

impl OpcodeTable {
    /// disassemble will take the given pc and Memory implementation and disassemble the segment
    /// at that location. It will return a string of the dissembly as well as the next pc
    /// to continue disassembling.
    /// As a real 6502 will wrap around if it's asked to step off the end
    /// this will do the same. i.e. disassembling 0xFFFF with a multi-byte opcode will result
    /// in reading 0x0000 and 0x0001 and returning a pc from that area as well.
    /// Bytes with no registered handler print as `.byte` and advance by one.
    #[must_use]
    pub fn disassemble(&self, pc: u16, r: &dyn Memory) -> (String, u16) {
        let pc = Wrapping(pc);
        let op = r.read(pc.0);
        let pc1 = r.read((pc + Wrapping(1)).0);
        let pc2 = r.read((pc + Wrapping(2)).0);

        let Some(operation) = self.operation(op) else {
            return (
                format!("{:04X} {op:02X} {:<8} .byte ${op:02X}", pc.0, ""),
                (pc + Wrapping(1)).0,
            );
        };
        let opcode = operation.op;

        // Sign extend so it can be added to PC for branch offsets
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
        let pc116 = Wrapping(i16::from(pc1 as i8) as u16);

        let (bytes, text) = match operation.mode {
            AddressMode::Implied => (String::new(), format!("{opcode}")),
            AddressMode::Accumulator => (String::new(), format!("{opcode} A")),
            AddressMode::Immediate => (format!("{pc1:02X}"), format!("{opcode} #${pc1:02X}")),
            AddressMode::ZeroPage => (format!("{pc1:02X}"), format!("{opcode} ${pc1:02X}")),
            AddressMode::ZeroPageX => (format!("{pc1:02X}"), format!("{opcode} ${pc1:02X},X")),
            AddressMode::ZeroPageY => (format!("{pc1:02X}"), format!("{opcode} ${pc1:02X},Y")),
            AddressMode::IndirectX => (format!("{pc1:02X}"), format!("{opcode} (${pc1:02X},X)")),
            AddressMode::IndirectY => (format!("{pc1:02X}"), format!("{opcode} (${pc1:02X}),Y")),
            AddressMode::Relative => (
                format!("{pc1:02X}"),
                format!(
                    "{opcode} ${pc1:02X} (${:04X})",
                    (pc + pc116 + Wrapping(2u16)).0
                ),
            ),
            AddressMode::Absolute => (
                format!("{pc1:02X} {pc2:02X}"),
                format!("{opcode} ${pc2:02X}{pc1:02X}"),
            ),
            AddressMode::AbsoluteX => (
                format!("{pc1:02X} {pc2:02X}"),
                format!("{opcode} ${pc2:02X}{pc1:02X},X"),
            ),
            AddressMode::AbsoluteY => (
                format!("{pc1:02X} {pc2:02X}"),
                format!("{opcode} ${pc2:02X}{pc1:02X},Y"),
            ),
            AddressMode::Indirect => (
                format!("{pc1:02X} {pc2:02X}"),
                format!("{opcode} (${pc2:02X}{pc1:02X})"),
            ),
        };

        let next = pc + Wrapping(1) + Wrapping(operation.mode.operand_bytes());
        (format!("{:04X} {op:02X} {bytes:<8} {text}", pc.0), next.0)
    }
}
