use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use env_logger::Env;

use bsort_rs::bsort::{
    Alphabet, BsortError, DEFAULT_CUTOFF, DEFAULT_KEY_SIZE, DEFAULT_RECORD_SIZE,
    DEFAULT_STACK_SIZE, SWITCH_TO_SHELL, SortConfig, sort_file,
};

const TOOL_NAME: &str = "fbsort";

#[derive(Parser)]
#[command(
    name = "fbsort",
    version,
    about = "Individually sort binary files inplace with a radix sort"
)]
struct Cli {
    /// Verbose output logging (repeat for more detail)
    #[arg(short = 'v', action = ArgAction::Count)]
    verbose: u8,

    /// Assume files are printable 7-bit ascii instead of binary
    #[arg(short = 'a')]
    ascii: bool,

    /// Size of overall record, in bytes
    #[arg(short = 'r', value_name = "###", default_value_t = DEFAULT_RECORD_SIZE)]
    record_size: usize,

    /// Size of comparable section of record, in bytes
    #[arg(short = 'k', value_name = "###", default_value_t = DEFAULT_KEY_SIZE)]
    key_size: usize,

    /// Pushahead stack size
    #[arg(short = 's', value_name = "###", default_value_t = DEFAULT_STACK_SIZE)]
    stack_size: usize,

    /// Recursion limit after which to use shell sort
    #[arg(short = 'c', value_name = "###", default_value_t = DEFAULT_CUTOFF)]
    cutoff: usize,

    /// Files to sort, each in place and in order
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,
}

fn print_usage() {
    eprintln!(
        "Usage: {} [-v] [-a] [-r ###] [-k ###] [-s ###] [-c ###] file1, file2 ...",
        TOOL_NAME
    );
    eprintln!("Individually sort binary files inplace with a radix sort");
    eprintln!();
    eprintln!("Sorting Options:");
    eprintln!();
    eprintln!("  -a       assume files are printable 7-bit ascii instead of binary");
    eprintln!(
        "  -k ###   size of comparable section of record, in bytes (default {})",
        DEFAULT_KEY_SIZE
    );
    eprintln!(
        "  -r ###   size of overall record, in bytes.  (default {})",
        DEFAULT_RECORD_SIZE
    );
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -v  verbose output logging");
    eprintln!();
    eprintln!("Tuning Options:");
    eprintln!();
    eprintln!("  -s ###   pushahead stack size.  (default {})", DEFAULT_STACK_SIZE);
    eprintln!(
        "  -c ###   recursion limit after which to use shell sort (defaults to {})",
        DEFAULT_CUTOFF
    );
}

fn fail(e: &BsortError) -> ! {
    eprintln!("{}: {}", TOOL_NAME, e);
    print_usage();
    process::exit(1);
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() {
    bsort_rs::common::reset_sigpipe();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                print_usage();
                process::exit(1);
            }
        },
    };

    init_logging(cli.verbose);

    let config = SortConfig {
        record_size: cli.record_size,
        key_size: cli.key_size,
        stack_size: cli.stack_size,
        cutoff: cli.cutoff,
        small_bucket: SWITCH_TO_SHELL,
        alphabet: if cli.ascii {
            Alphabet::ASCII
        } else {
            Alphabet::BINARY
        },
        verbosity: cli.verbose,
    };
    if let Err(e) = config.validate() {
        fail(&e);
    }

    let start = Instant::now();
    for path in &cli.files {
        if cli.verbose > 0 {
            println!("sorting {}", path.display());
        }
        if let Err(e) = sort_file(path, &config) {
            fail(&e);
        }
    }

    println!("Processing time: {:.3} s", start.elapsed().as_secs_f64());
}
