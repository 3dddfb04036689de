//! cpu defines an NMOS 6502 CPU which executes one full instruction per `tick`
//! and reports how many clock cycles it took.
use std::cell::RefCell;
use std::fmt;
use std::num::Wrapping;
use std::rc::Rc;
use std::sync::Arc;

use chip::Chip;
use color_eyre::eyre::{ErrReport, Result};
use log::{debug, log_enabled, trace, Level};
use memory::{Memory, MAX_SIZE};
use serde::Serialize;
use strum_macros::{Display, EnumString};
use thiserror::Error;

mod addressing;
mod disassemble;
mod flags;
mod instructions;
mod opcodes;

pub use addressing::{AddressMode, Effective};
pub use flags::{Flag, Flags};
pub use memory::{IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};
pub use opcodes::{Entry, Handler, OpcodeTable, Opcode, Operation};


/// `STACK_START` is the location in memory where the stack page starts.
pub const STACK_START: u16 = 0x0100;

#[derive(Debug, Default, Display, Copy, Clone, PartialEq, Eq, EnumString, Serialize)]
/// `State` defines what the next `tick` will do.
pub enum State {
    /// A reset is pending and will be run at the start of the next `tick`.
    #[default]
    Reset,

    /// RDY is low so `tick` does nothing.
    Held,

    /// Executing instructions.
    Running,
}

/// `CPUError` defines specific conditions where `tick` or table
/// construction may return an error. Use this to determine specific internal issues.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CPUError {
    /// The opcode fetched has no handler registered. PC has already moved
    /// past the opcode byte but nothing else changed.
    #[error("Illegal opcode: {op:02X} at {pc:04X}")]
    IllegalOpcode {
        /// op is the opcode byte fetched.
        op: u8,
        /// pc is where it was fetched from.
        pc: u16,
    },

    /// An opcode byte was registered twice while building the table.
    #[error("Opcode {op:02X} already registered as {existing}")]
    DuplicateOpcode {
        /// op is the opcode byte registered twice.
        op: u8,
        /// existing is the registration already present.
        existing: Operation,
    },
}

/// Define the characteristics of the 6502 wanted.
pub struct ChipDef {
    /// Memory implementation.
    pub ram: Box<dyn Memory>,
}

impl Default for ChipDef {
    fn default() -> Self {
        Self {
            ram: Box::new([0u8; MAX_SIZE]),
        }
    }
}

/// `CPUState` is the public information about the CPU at a point in time.
/// Generally used for tracing and for hosts to report where execution ended.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CPUState {
    /// CPU state
    pub state: State,

    /// Accumulator register
    pub a: u8,

    /// X register
    pub x: u8,

    /// Y register
    pub y: u8,

    /// Stack pointer
    pub s: u8,

    /// Status register
    pub p: Flags,

    /// Program counter
    pub pc: u16,

    /// How many clocks have run since init
    pub clocks: usize,

    /// The dissasembly of the current instruction at PC
    pub dis: String,
}

impl fmt::Display for CPUState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>6} {:<24}: A: {:02X} X: {:02X} Y: {:02X} S: {:02X} P: {}",
            self.clocks, self.dis, self.a, self.x, self.y, self.s, self.p,
        )
    }
}

/// The NMOS 6502 implementation for the 6502 architecture.
pub struct CPU6502 {
    /// Accumulator register
    a: Wrapping<u8>,

    /// X register
    x: Wrapping<u8>,

    /// Y register
    y: Wrapping<u8>,

    /// Stack pointer
    s: Wrapping<u8>,

    /// Status register
    p: Flags,

    /// Program counter
    pc: Wrapping<u16>,

    /// Reset requested by the host, consumed on the next tick.
    pending_reset: bool,

    /// Latched NMI. Not serviced by this core.
    pending_nmi: bool,

    /// Latched IRQ. Not serviced by this core.
    pending_irq: bool,

    /// RDY line. When low `tick` does nothing.
    ready: bool,

    /// Total clocks since init.
    clocks: usize,

    /// Memory implementation.
    ram: Rc<RefCell<Box<dyn Memory>>>,

    /// Opcode dispatch table. Never mutated once the CPU owns it.
    table: Arc<OpcodeTable>,
}

impl fmt::Debug for CPU6502 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CPU NMOS")
            .field("a", &self.a.0)
            .field("x", &self.x.0)
            .field("y", &self.y.0)
            .field("s", &self.s.0)
            .field("p", &self.p)
            .field("pc", &self.pc.0)
            .field("state", &self.state())
            .field("nmi", &self.pending_nmi)
            .field("irq", &self.pending_irq)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for CPU6502 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (dis, _) = self.disassemble(self.pc.0);

        write!(
            f,
            "{:>6} {dis:<24}: A: {:02X} X: {:02X} Y: {:02X} S: {:02X} P: {}",
            self.clocks, self.a, self.x, self.y, self.s, self.p
        )
    }
}

impl PartialEq for CPU6502 {
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a
            && self.x == other.x
            && self.y == other.y
            && self.s == other.s
            && self.p == other.p
            && self.pc == other.pc
    }
}

impl CPU6502 {
    /// `new` builds a CPU with every register zeroed, the documented opcode
    /// table installed and a reset pending so the first `tick` loads PC from
    /// the reset vector.
    ///
    /// # Errors
    /// If the opcode table can't be built (duplicate registration) the error is
    /// returned and the CPU must not be used.
    pub fn new(def: ChipDef) -> Result<Self> {
        let table = OpcodeTable::nmos()?;
        Ok(Self::with_table(def, Arc::new(table)))
    }

    /// `with_table` is the same as `new` but uses a prebuilt (and possibly
    /// shared) opcode table.
    #[must_use]
    pub fn with_table(def: ChipDef, table: Arc<OpcodeTable>) -> Self {
        Self {
            a: Wrapping(0),
            x: Wrapping(0),
            y: Wrapping(0),
            s: Wrapping(0),
            p: Flags::default(),
            pc: Wrapping(0),
            pending_reset: true,
            pending_nmi: false,
            pending_irq: false,
            ready: true,
            clocks: 0,
            ram: Rc::new(RefCell::new(def.ram)),
            table,
        }
    }

    /// `table` returns the opcode table in use.
    #[must_use]
    pub fn table(&self) -> Arc<OpcodeTable> {
        Arc::clone(&self.table)
    }

    /// ram returns a reference to the Memory implementation.
    #[must_use]
    pub fn ram(&self) -> Rc<RefCell<Box<dyn Memory>>> {
        Rc::clone(&self.ram)
    }

    /// `a` returns the A register.
    #[must_use]
    pub const fn a(&self) -> u8 {
        self.a.0
    }

    /// `a_mut` sets the A register.
    pub fn a_mut(&mut self, new: u8) {
        self.a = Wrapping(new);
    }

    /// `x` returns the X register.
    #[must_use]
    pub const fn x(&self) -> u8 {
        self.x.0
    }

    /// `x_mut` sets the X register.
    pub fn x_mut(&mut self, new: u8) {
        self.x = Wrapping(new);
    }

    /// `y` returns the Y register.
    #[must_use]
    pub const fn y(&self) -> u8 {
        self.y.0
    }

    /// `y_mut` sets the Y register.
    pub fn y_mut(&mut self, new: u8) {
        self.y = Wrapping(new);
    }

    /// `s` returns the stack pointer.
    #[must_use]
    pub const fn s(&self) -> u8 {
        self.s.0
    }

    /// `s_mut` sets the stack pointer.
    pub fn s_mut(&mut self, new: u8) {
        self.s = Wrapping(new);
    }

    /// `p` returns the status register.
    #[must_use]
    pub const fn p(&self) -> Flags {
        self.p
    }

    /// `p_mut` sets the status register.
    pub fn p_mut(&mut self, new: Flags) {
        self.p = new;
    }

    /// pc returns the current PC value.
    #[must_use]
    pub const fn pc(&self) -> u16 {
        self.pc.0
    }

    /// `pc_mut` sets PC to the given address.
    pub fn pc_mut(&mut self, new: u16) {
        self.pc = Wrapping(new);
    }

    /// `clocks` is the total cycles run since init.
    #[must_use]
    pub const fn clocks(&self) -> usize {
        self.clocks
    }

    /// `flag` returns whether the given status flag is set.
    #[must_use]
    pub const fn flag(&self, flag: Flag) -> bool {
        self.p.get(flag)
    }

    /// `set_flag` sets or clears exactly one status flag.
    pub fn set_flag(&mut self, flag: Flag, on: bool) {
        self.p.set(flag, on);
    }

    /// `state` reports what the next `tick` will do.
    #[must_use]
    pub const fn state(&self) -> State {
        if self.pending_reset {
            State::Reset
        } else if !self.ready {
            State::Held
        } else {
            State::Running
        }
    }

    /// `reset` requests a reset. PC is loaded from the reset vector at the
    /// start of the next `tick`.
    pub fn reset(&mut self) {
        self.pending_reset = true;
    }

    /// `reset_pending` is true until a `tick` consumes the reset.
    #[must_use]
    pub const fn reset_pending(&self) -> bool {
        self.pending_reset
    }

    /// `set_ready` drives the RDY line. While low `tick` returns 0 cycles.
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    /// `ready` returns the RDY line state.
    #[must_use]
    pub const fn ready(&self) -> bool {
        self.ready
    }

    /// `raise_nmi` latches an NMI. This core records it but never services it.
    pub fn raise_nmi(&mut self) {
        self.pending_nmi = true;
    }

    /// `nmi_pending` returns the latched NMI state.
    #[must_use]
    pub const fn nmi_pending(&self) -> bool {
        self.pending_nmi
    }

    /// `raise_irq` latches an IRQ. This core records it but never services it.
    pub fn raise_irq(&mut self) {
        self.pending_irq = true;
    }

    /// `irq_pending` returns the latched IRQ state.
    #[must_use]
    pub const fn irq_pending(&self) -> bool {
        self.pending_irq
    }

    /// `read8` reads one byte through the memory interface.
    #[must_use]
    pub fn read8(&self, addr: u16) -> u8 {
        self.ram.borrow().read(addr)
    }

    /// `write8` writes one byte through the memory interface.
    pub fn write8(&mut self, addr: u16, val: u8) {
        self.ram.borrow_mut().write(addr, val);
    }

    /// `read16` reads a little endian word. addr+1 wraps at 0xFFFF.
    #[must_use]
    pub fn read16(&self, addr: u16) -> u16 {
        let lo = self.read8(addr);
        let hi = self.read8(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// `write16` writes a little endian word. addr+1 wraps at 0xFFFF.
    pub fn write16(&mut self, addr: u16, val: u16) {
        let [lo, hi] = val.to_le_bytes();
        self.write8(addr, lo);
        self.write8(addr.wrapping_add(1), hi);
    }

    /// `snapshot` captures the registers plus disassembly at PC.
    #[must_use]
    pub fn snapshot(&self) -> CPUState {
        let (dis, _) = self.disassemble(self.pc.0);
        CPUState {
            state: self.state(),
            a: self.a.0,
            x: self.x.0,
            y: self.y.0,
            s: self.s.0,
            p: self.p,
            pc: self.pc.0,
            clocks: self.clocks,
            dis,
        }
    }

    /// disassemble will disassemble the instruction at pc using this CPU's
    /// memory and opcode table. It returns the text plus the next pc.
    #[must_use]
    pub fn disassemble(&self, pc: u16) -> (String, u16) {
        let ram = self.ram.borrow();
        self.table.disassemble(pc, ram.as_ref())
    }

    // pop_stack pops the top value from the stack and adjusts
    // the stack pointer.
    fn pop_stack(&mut self) -> u8 {
        self.s += 1;
        self.read8(u16::from(self.s.0) + STACK_START)
    }

    // push_stack takes the given 8 bit value and pushes it into the stack and adjusts
    // the stack pointer.
    fn push_stack(&mut self, val: u8) {
        self.write8(u16::from(self.s.0) + STACK_START, val);
        self.s -= 1;
    }

    // zero_check sets the Z flag based on the value.
    fn zero_check(&mut self, val: u8) {
        self.p.set(Flag::Zero, val == 0x00);
    }

    // negative_check sets the N flag based on the value.
    fn negative_check(&mut self, val: u8) {
        self.p.set(Flag::Negative, val & 0x80 == 0x80);
    }

    // nz_check sets both N and Z from a result.
    fn nz_check(&mut self, val: u8) {
        self.zero_check(val);
        self.negative_check(val);
    }
}

impl Chip for CPU6502 {
    /// tick runs the reset sequence if one is pending and then (if RDY is high)
    /// executes exactly one instruction returning its cycle count.
    ///
    /// # Errors
    /// Fetching an opcode with no handler returns a report wrapping
    /// `CPUError::IllegalOpcode`. PC has moved past the opcode byte and no
    /// other state changed.
    fn tick(&mut self) -> Result<usize> {
        if self.pending_reset {
            self.pc = Wrapping(self.read16(RESET_VECTOR));
            self.pending_reset = false;
            debug!("reset: PC loaded from vector as {:04X}", self.pc);
        }

        if !self.ready {
            return Ok(0);
        }

        if log_enabled!(Level::Trace) {
            trace!("{self}");
        }

        let pc = self.pc.0;
        let op = self.read8(pc);
        self.pc += 1;

        let Some(entry) = self.table.get(op) else {
            return Err(ErrReport::new(CPUError::IllegalOpcode { op, pc }));
        };

        let cycles = (entry.handler)(self, entry.operation);
        self.clocks += cycles;
        Ok(cycles)
    }
}
