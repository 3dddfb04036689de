//! runner executes a 6502 memory image on the NMOS core and reports how
//! the run ended.
use clap::Parser;
use clap_num::maybe_hex;
use color_eyre::eyre::Result;
use runner::{read_image, run, Config, IllegalPolicy};
use std::path::PathBuf;

/// runner loads a binary image into a zeroed 64k RAM and runs it.
///
/// Execution starts from the reset vector (optionally patched with --reset)
/// and continues until the program jumps to itself, an illegal opcode is
/// hit or --max-instructions have run.
///
/// Set `RUST_LOG=trace` to see every instruction as it executes.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(help = "Filename containing the binary image")]
    filename: PathBuf,

    #[arg(
        long, default_value_t = 0x0000, value_parser=maybe_hex::<u16>,
        help = "Offset into RAM to start loading data. All other RAM will be zero'd out."
    )]
    offset: u16,

    #[arg(long, value_parser=maybe_hex::<u16>, help = "Value to place in the reset vector after loading.")]
    reset: Option<u16>,

    #[arg(
        long, default_value_t = 100_000_000, value_parser=maybe_hex::<usize>,
        help = "Stop after this many instructions."
    )]
    max_instructions: usize,

    #[arg(
        long,
        default_value_t = IllegalPolicy::Halt,
        help = "What to do on an illegal opcode (halt or nop)."
    )]
    on_illegal: IllegalPolicy,

    #[arg(long, help = "Print the summary as JSON.")]
    json: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let args: Args = Args::parse();

    let config = Config {
        image: read_image(&args.filename)?,
        offset: args.offset,
        reset: args.reset,
        max_instructions: args.max_instructions,
        on_illegal: args.on_illegal,
    };

    let summary = run(&config)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{summary}");
    }
    Ok(())
}
