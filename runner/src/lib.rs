//! runner loads a flat memory image into an NMOS 6502 and runs it until it
//! traps in a self jump, hits an illegal opcode or uses up its instruction
//! budget.
use chip::Chip;
use color_eyre::eyre::{eyre, Result};
use cpu::{CPUError, CPUState, ChipDef, CPU6502, RESET_VECTOR};
use log::{debug, info, warn};
use memory::{FlatRAM, Memory, MAX_SIZE};
use serde::Serialize;
use std::fmt;
use std::fs::read;
use std::path::Path;
use strum_macros::{Display, EnumString};

#[cfg(test)]
mod tests;

/// `IllegalPolicy` decides what happens when the CPU fetches an opcode
/// with no handler.
#[derive(Clone, Copy, Debug, Default, Display, PartialEq, Eq, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum IllegalPolicy {
    /// Stop the run and report the opcode.
    #[default]
    Halt,

    /// Treat it as a single byte NOP taking 2 cycles and keep going.
    Nop,
}

/// `StopReason` is why `run` returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum StopReason {
    /// The instruction budget ran out.
    Limit,

    /// An instruction left PC where it started (i.e. JMP to itself or a
    /// branch of -2). Test images use this to signal they're done.
    Trap {
        /// Where the CPU is stuck.
        pc: u16,
    },

    /// An illegal opcode under `IllegalPolicy::Halt`.
    IllegalOpcode {
        /// The opcode byte.
        op: u8,
        /// Where it was fetched from.
        pc: u16,
    },
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Limit => write!(f, "instruction limit reached"),
            StopReason::Trap { pc } => write!(f, "trapped at {pc:04X}"),
            StopReason::IllegalOpcode { op, pc } => {
                write!(f, "illegal opcode {op:02X} at {pc:04X}")
            }
        }
    }
}

/// `Config` describes a single run.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Bytes to load. Everything else in RAM starts as zero.
    pub image: Vec<u8>,

    /// Address the first image byte is loaded at.
    pub offset: u16,

    /// If set this is written into the reset vector after loading.
    pub reset: Option<u16>,

    /// Maximum instructions to execute.
    pub max_instructions: usize,

    /// What to do with illegal opcodes.
    pub on_illegal: IllegalPolicy,
}

/// `Summary` is the result of a run.
#[derive(Clone, Debug, Serialize)]
pub struct Summary {
    /// Instructions executed (illegal opcodes run as NOP included).
    pub instructions: usize,

    /// Total cycles.
    pub cycles: usize,

    /// Why the run ended.
    pub stop: StopReason,

    /// CPU state at the end of the run.
    pub state: CPUState,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stopped: {}", self.stop)?;
        writeln!(f, "Instructions: {}", self.instructions)?;
        writeln!(f, "Cycles: {}", self.cycles)?;
        write!(f, "{}", self.state)
    }
}

/// `read_image` reads a memory image from disk.
///
/// # Errors
/// The file can't be read or is larger than the address space.
pub fn read_image(path: &Path) -> Result<Vec<u8>> {
    let bytes = read(path).map_err(|e| eyre!("can't read {}: {e}", path.display()))?;
    if bytes.len() > MAX_SIZE {
        return Err(eyre!(
            "{} is {} bytes which exceeds {MAX_SIZE}",
            path.display(),
            bytes.len()
        ));
    }
    Ok(bytes)
}

/// `run` loads the image described by config and ticks the CPU until one of
/// the `StopReason` conditions is met.
///
/// # Errors
/// The image doesn't fit at the given offset or the CPU returned an error
/// other than an illegal opcode.
pub fn run(config: &Config) -> Result<Summary> {
    let end = usize::from(config.offset) + config.image.len();
    if end > MAX_SIZE {
        return Err(eyre!(
            "image of {} bytes at offset {:04X} exceeds {MAX_SIZE}",
            config.image.len(),
            config.offset
        ));
    }

    let mut ram = Box::new(FlatRAM::new());
    ram.load(config.offset, &config.image);
    if let Some(reset) = config.reset {
        ram.load(RESET_VECTOR, &reset.to_le_bytes());
    }
    info!(
        "loaded {} bytes at {:04X}",
        config.image.len(),
        config.offset
    );

    let mut cpu = CPU6502::new(ChipDef { ram })?;
    let mut instructions = 0;
    let mut illegal_cycles = 0;

    let stop = loop {
        if instructions >= config.max_instructions {
            break StopReason::Limit;
        }

        // The first tick loads PC from the vector before fetching.
        let pc = if cpu.reset_pending() {
            cpu.read16(RESET_VECTOR)
        } else {
            cpu.pc()
        };

        if let Err(e) = cpu.tick() {
            let illegal = match e.downcast_ref::<CPUError>() {
                Some(&CPUError::IllegalOpcode { op, pc }) => Some((op, pc)),
                _ => None,
            };
            let Some((op, pc)) = illegal else {
                return Err(e);
            };
            match config.on_illegal {
                IllegalPolicy::Halt => break StopReason::IllegalOpcode { op, pc },
                IllegalPolicy::Nop => {
                    warn!("illegal opcode {op:02X} at {pc:04X} run as NOP");
                    illegal_cycles += 2;
                    instructions += 1;
                    continue;
                }
            }
        }
        instructions += 1;

        if cpu.pc() == pc {
            break StopReason::Trap { pc };
        }
    };

    let summary = Summary {
        instructions,
        cycles: cpu.clocks() + illegal_cycles,
        stop,
        state: cpu.snapshot(),
    };
    info!("{stop} after {instructions} instructions");
    debug!("final state: {}", summary.state);
    Ok(summary)
}
