//! The opcode table mapping each of the 256 opcode bytes to its operation
//! metadata and handler.
use crate::instructions;
use crate::{AddressMode, CPUError, CPU6502};
use serde::Serialize;
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

// Opcode descriptions/timing/etc:
// http://obelisk.me.uk/6502/reference.html

/// `Opcode` defines all the documented NMOS 6502 mnemonics.
#[derive(
    Clone, Copy, Debug, Display, Default, PartialEq, Eq, Hash, EnumIter, EnumString, Serialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Opcode {
    /// Add with Carry A with the value at the operand address.
    ADC,

    /// Bitwise and operation.
    AND,

    /// Arithmetic shift left with possibly carry bit set as a result.
    ASL,

    /// Branch if carry is clear.
    BCC,

    /// Branch if carry is set.
    BCS,

    /// Branch if equal (Z is set).
    BEQ,

    /// Bit test by AND'ing against A and setting N/V based on the value.
    BIT,

    /// Branch on minus (N is set)
    BMI,

    /// Branch if not equal (Z is clear)
    BNE,

    /// Branch on plus (N is clear)
    BPL,

    /// Break execution. Pushes PC and P (with B set) and jumps through the IRQ vector.
    BRK,

    /// Branch if overflow (V) is clear.
    BVC,

    /// Branch if overflow (V) is set.
    BVS,

    /// Clear the C flag.
    CLC,

    /// Clear the D flag.
    CLD,

    /// Clear the I flag.
    CLI,

    /// Clear the V flag.
    CLV,

    /// Compare values with A setting Z based on whether they are equal or not.
    CMP,

    /// Compare values with X setting Z based on whether they are equal or not.
    CPX,

    /// Compare values with Y setting Z based on whether they are equal or not.
    CPY,

    /// Decrements the value at the operand address.
    DEC,

    /// Decrements the X register.
    DEX,

    /// Decrements the Y register.
    DEY,

    /// Exclusive OR (XOR) A with the value at the operand address.
    EOR,

    /// Increments the value at the operation address.
    INC,

    /// Increments the X register.
    INX,

    /// Increments the Y register.
    INY,

    /// Jumps to the value given by the operand address (16 bits).
    JMP,

    /// Jumps to a subroutine given by the operand address (16 bits). Before jumping pushes PC onto the stack so RTS can return to the PC after the JSR instruction.
    JSR,

    /// Loads the A register from the value at the operand address.
    LDA,

    /// Loads the X register from the value at the operand address.
    LDX,

    /// Loads the Y register from the value at the operand address.
    LDY,

    /// Logical shift right of the value at the operand address or the A register. Bit 0 is shifted into the C flag.
    LSR,

    /// No operation.
    #[default]
    NOP,

    /// ORs the value in A with the value at the operand address.
    ORA,

    /// Pushes A onto the stack.
    PHA,

    /// Pushes P onto the stack.
    PHP,

    /// Pulls A from the stack.
    PLA,

    /// Pulls P from the stack.
    PLP,

    /// Rotates left the value at the operand address or the A register. Bit 7 is shifted into the C flag and the C flag is shifted into bit 0.
    ROL,

    /// Rotates right the value at the operand address or the A register. Bit 0 is shifted into the C register the C flag is shifted into bit 7.
    ROR,

    /// Return from interrupt. Pops P and then PC off the stack.
    RTI,

    /// Return from subroutine. Pops the PC from the stack and sets execution to continue at that value.
    RTS,

    /// Subtract with carry the value in A with the value at the operand address.
    SBC,

    /// Set the C flag.
    SEC,

    /// Set the D flag.
    SED,

    /// Set the I flag.
    SEI,

    /// Stores the A register at the operand address.
    STA,

    /// Stores the X register at the operand address.
    STX,

    /// Stores the Y register at the operand address.
    STY,

    /// Loads the X register with the value of the A register.
    TAX,

    /// Loads the Y register with the value of the A register.
    TAY,

    /// Loads the X register with the value of the S register.
    TSX,

    /// Loads the A register with the value of the X register.
    TXA,

    /// Loads the S register with the value of the X register. No flags are set from S loads.
    TXS,

    /// Loads the A register with the value of the Y register.
    TYA,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
/// Operation defines an opcode plus its addressing mode together along with the
/// documented cycle count. Handlers get this passed in so one handler can serve
/// every addressing mode of an instruction.
pub struct Operation {
    /// op is the Opcode such as ADC, LDA, etc.
    pub op: Opcode,

    /// mode is a valid addressing mode for this opcode such as Absolute.
    pub mode: AddressMode,

    /// cycles is the base cycle count before any page cross or branch penalties.
    pub cycles: usize,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({} cycles)", self.op, self.mode, self.cycles)
    }
}

/// `Handler` executes one opcode. PC points just past the opcode byte on entry
/// and the return value is the total cycles the instruction took.
pub type Handler = fn(&mut CPU6502, Operation) -> usize;

/// `Entry` is one populated slot in the `OpcodeTable`.
#[derive(Clone, Copy)]
pub struct Entry {
    /// The metadata passed to the handler.
    pub operation: Operation,

    /// The function implementing it.
    pub handler: Handler,
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("operation", &self.operation)
            .finish_non_exhaustive()
    }
}

/// `OpcodeTable` maps opcode bytes to handlers. It's filled in once and then
/// shared (read only) by any number of CPU instances.
#[derive(Clone, Debug)]
pub struct OpcodeTable {
    entries: [Option<Entry>; 256],
}

impl Default for OpcodeTable {
    fn default() -> Self {
        Self::empty()
    }
}

impl OpcodeTable {
    /// `empty` returns a table with nothing registered. Every byte is illegal.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: [None; 256],
        }
    }

    /// `nmos` returns a table populated with every documented NMOS 6502 opcode.
    ///
    /// # Errors
    /// A family registering a byte another family already claimed is
    /// returned as `CPUError::DuplicateOpcode`.
    pub fn nmos() -> Result<Self, CPUError> {
        let mut t = Self::empty();
        instructions::register_all(&mut t)?;
        Ok(t)
    }

    /// `register` installs a handler for the given opcode byte.
    ///
    /// # Errors
    /// If the byte already has a handler `CPUError::DuplicateOpcode` is returned
    /// and the existing registration is left in place.
    pub fn register(
        &mut self,
        code: u8,
        op: Opcode,
        mode: AddressMode,
        cycles: usize,
        handler: Handler,
    ) -> Result<(), CPUError> {
        let slot = &mut self.entries[usize::from(code)];
        if let Some(existing) = slot {
            return Err(CPUError::DuplicateOpcode {
                op: code,
                existing: existing.operation,
            });
        }
        *slot = Some(Entry {
            operation: Operation { op, mode, cycles },
            handler,
        });
        Ok(())
    }

    /// `get` returns the entry for the given opcode byte if one is registered.
    #[must_use]
    pub fn get(&self, code: u8) -> Option<Entry> {
        self.entries[usize::from(code)]
    }

    /// `operation` returns just the metadata for the given opcode byte.
    #[must_use]
    pub fn operation(&self, code: u8) -> Option<Operation> {
        self.get(code).map(|e| e.operation)
    }

    /// `len` is the number of registered opcodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    /// `is_empty` is true if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `resolve_opcode` finds the byte implementing the given opcode and mode
    /// if one is registered.
    #[must_use]
    pub fn resolve_opcode(&self, op: Opcode, mode: AddressMode) -> Option<u8> {
        (0..=u8::MAX).find(|code| {
            self.operation(*code)
                .is_some_and(|o| o.op == op && o.mode == mode)
        })
    }
}
