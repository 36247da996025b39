//! Memory management simulator - Main Entry Point
//!
//! Two subcommands drive the library:
//!
//!   replace - run a page replacement policy over a reference string and
//!             print the per-step frame table
//!   fit     - run a best-fit allocation script and print the final block map

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use memsim::allocator::{Allocator, Process};
use memsim::io::{read_fit_script, read_reference_string, FitOp};
use memsim::paging::{simulate, SimulationResult};
use memsim::policy::Policy;

#[derive(Parser)]
#[clap(name = "memsim")]
#[clap(version, about = "Best-fit partitioning and page replacement simulator", long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate page replacement over a reference string
    Replace(ReplaceArgs),
    /// Run a best-fit allocation script against one memory space
    Fit(FitArgs),
}

#[derive(clap::Args)]
struct ReplaceArgs {
    /// Eviction policy
    #[clap(short, long, value_enum)]
    policy: PolicyArg,

    /// Number of frames
    #[clap(short, long)]
    frames: usize,

    /// Read the reference string from a file instead of the command line
    #[clap(short, long, conflicts_with = "pages")]
    input: Option<String>,

    /// Reference string, e.g. `1 2 3 4 1 2 5`
    pages: Vec<u32>,

    /// Print a summary of the run to stderr
    #[clap(short, long)]
    verbose: bool,
}

#[derive(clap::Args)]
struct FitArgs {
    /// Total memory size managed by the allocator
    #[clap(short, long)]
    total: u32,

    /// Script file with one `alloc <id> <size>` or `free <id>` per line
    script: String,

    /// Print the block map after every operation, not just at the end
    #[clap(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    Fifo,
    Lru,
    Optimal,
    Lfu,
}

impl From<PolicyArg> for Policy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Fifo => Policy::Fifo,
            PolicyArg::Lru => Policy::Lru,
            PolicyArg::Optimal => Policy::Optimal,
            PolicyArg::Lfu => Policy::Lfu,
        }
    }
}

fn main() {
    let result = match Cli::parse().command {
        Commands::Replace(args) => run_replace(&args),
        Commands::Fit(args) => run_fit(&args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_replace(args: &ReplaceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let references = match &args.input {
        Some(path) => read_reference_string(path)?,
        None => args.pages.clone(),
    };

    let policy = Policy::from(args.policy);
    let result = simulate(policy, &references, args.frames)?;

    if args.verbose {
        eprintln!("Policy:     {:?}", policy);
        eprintln!("Frames:     {}", args.frames);
        eprintln!("References: {}", references.len());
        eprintln!();
    }

    print_trace_table(&result, args.frames);
    println!("{} faults.", result.fault_count);
    Ok(())
}

fn run_fit(args: &FitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ops = read_fit_script(&args.script)?;
    let mut alloc = Allocator::new(args.total);

    for op in ops {
        match op {
            FitOp::Alloc { id, size } => match alloc.allocate_best_fit(Process { id, size }) {
                Ok(block_id) => println!("Process {} allocated to block {}", id, block_id),
                Err(e) => println!("Process {} cannot be allocated: {}", id, e),
            },
            FitOp::Free { id } => match alloc.deallocate(id) {
                Ok(()) => println!("Process {} deallocated", id),
                Err(e) => println!("{}", e),
            },
        }
        if args.verbose {
            print_block_table(&alloc);
        }
    }

    if !args.verbose {
        print_block_table(&alloc);
    }
    Ok(())
}

/// Render the per-step frame table the way the interactive simulators do:
/// one row per reference, one column per frame, `-` for empty slots and an
/// `F` marker on faulting rows.
fn print_trace_table(result: &SimulationResult, frame_capacity: usize) {
    let rule: String = {
        let mut s = String::from("+-------+");
        for _ in 0..frame_capacity {
            s.push_str("---------+");
        }
        s.push_str("-------+");
        s
    };

    println!("{}", rule);
    print!("| Page  |");
    for i in 0..frame_capacity {
        print!(" Frame {} |", i + 1);
    }
    println!(" Fault |");
    println!("{}", rule);

    for step in &result.trace {
        print!("| {:>5} |", step.page);
        for slot in &step.frames {
            match slot {
                Some(page) => print!(" {:>7} |", page),
                None => print!(" {:>7} |", "-"),
            }
        }
        println!(" {:>5} |", if step.faulted { "F" } else { "-" });
    }
    println!("{}", rule);
}

fn print_block_table(alloc: &Allocator) {
    println!("+-------+------+-----------+");
    println!("| Block | Size | Allocated |");
    println!("+-------+------+-----------+");
    for block in alloc.snapshot() {
        println!(
            "| {:>5} | {:>4} | {:<9} |",
            block.id,
            block.size,
            if block.allocated { "Yes" } else { "No" }
        );
    }
    println!("+-------+------+-----------+");
}
