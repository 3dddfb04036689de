//! disassembler prints the NMOS 6502 disassembly of a binary image.
use clap::Parser;
use clap_num::maybe_hex;
use color_eyre::eyre::{eyre, Result};
use mos6502::prelude::*;
use std::fs::read;

/// disassembler loads a binary image into a zeroed 64k RAM at the given
/// offset and disassembles it one instruction per line.
///
/// Without --count it stops once it has walked past the end of the image.
/// Bytes which aren't documented opcodes print as .byte entries.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(help = "Filename containing the binary image")]
    filename: String,

    #[arg(
        long, default_value_t = 0x0000, value_parser=maybe_hex::<u16>,
        help = "Offset into RAM to start loading data."
    )]
    offset: u16,

    #[arg(long, value_parser=maybe_hex::<u16>, help = "PC to start disassembling from. Defaults to the offset.")]
    start_pc: Option<u16>,

    #[arg(long, value_parser=maybe_hex::<usize>, help = "Number of instructions to print.")]
    count: Option<usize>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args: Args = Args::parse();

    let bytes = read(&args.filename).map_err(|e| eyre!("can't read {}: {e}", args.filename))?;
    let end = usize::from(args.offset) + bytes.len();
    if end > MAX_SIZE {
        return Err(eyre!(
            "{} is {} bytes which won't fit at offset {:04X}",
            args.filename,
            bytes.len(),
            args.offset
        ));
    }

    let mut ram = FlatRAM::new();
    ram.load(args.offset, &bytes);
    let table = OpcodeTable::nmos()?;

    let mut pc = args.start_pc.unwrap_or(args.offset);
    if let Some(count) = args.count {
        for _ in 0..count {
            let (dis, next) = table.disassemble(pc, &ram);
            println!("{dis}");
            pc = next;
        }
        return Ok(());
    }

    // PC can wrap so count down the bytes left rather than comparing addresses.
    let mut remaining = end.saturating_sub(usize::from(pc));
    while remaining > 0 {
        let (dis, next) = table.disassemble(pc, &ram);
        println!("{dis}");
        remaining = remaining.saturating_sub(usize::from(next.wrapping_sub(pc)));
        pc = next;
    }
    Ok(())
}
