//! VMM - Main Entry Point
//!
//! Usage: vmm [OPTIONS] <ADDRESSES> <FRAMES> <POLICY>
//!
//! Translates every logical address in ADDRESSES through a TLB and page
//! table backed by BACKING_STORE.bin, writing one line per translation plus
//! any requested page table or TLB dumps and final statistics to the output
//! file (correct.txt by default).

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};

use vmm::io::read_commands;
use vmm::{
    ADDRESS_SPACE, DEFAULT_BACKING_STORE, DEFAULT_OUTPUT, FileBackingStore, PAGE_SIZE,
    ReplacementPolicy, Result, SessionConfig, Statistics, TLB_SIZE, Translator,
};

/// Command-line configuration
#[derive(Parser, Debug)]
#[command(name = "vmm", version, about = "Virtual memory manager with a TLB and demand paging")]
struct Cli {
    /// File of logical addresses, one per line; `PageTable` and `TLB` lines request dumps
    #[arg(value_name = "ADDRESSES")]
    addresses: PathBuf,

    /// Number of physical frames
    #[arg(value_name = "FRAMES")]
    frames: usize,

    /// Frame replacement policy (FIFO or LRU)
    #[arg(value_name = "POLICY")]
    policy: ReplacementPolicy,

    /// Number of TLB entries
    #[arg(long, default_value_t = TLB_SIZE)]
    tlb_size: usize,

    /// Page size in bytes, a power of two
    #[arg(long, default_value_t = PAGE_SIZE)]
    page_size: usize,

    /// Page image read on every page fault
    #[arg(long, value_name = "FILE", default_value = DEFAULT_BACKING_STORE)]
    backing_store: PathBuf,

    /// Report file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Main logic separated from main() for cleaner error handling
fn run(cli: &Cli) -> Result<Statistics> {
    // Step 1: Reject a bad configuration before touching any file
    let config = SessionConfig::new(cli.frames, cli.policy)
        .with_tlb_size(cli.tlb_size)
        .with_page_size(cli.page_size);
    config.validate()?;

    // Step 2: Read the address stream
    let commands = read_commands(&cli.addresses)?;
    log::info!("{} commands read from {}", commands.len(), cli.addresses.display());

    // Step 3: Open the backing store and build the session
    let store = FileBackingStore::open(&cli.backing_store, ADDRESS_SPACE)?;
    log::info!("backing store: {}", store.path().display());
    let mut translator = Translator::new(config, store)?;

    // Step 4: Translate and write the report
    let mut out = BufWriter::new(File::create(&cli.output)?);
    let stats = vmm::io::process(&mut translator, &commands, &mut out)?;

    log::info!("results written to {}", cli.output.display());
    Ok(stats)
}
