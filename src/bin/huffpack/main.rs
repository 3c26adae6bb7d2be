mod table_file;

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use huffpack::huffman::count_frequencies;
use huffpack::{HuffmanCodec, Radix64, StopSymbol};
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(version, about = "Huffman coding with a stop symbol and radix-64 text output")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count the bytes of a sample file and write a frequency table
    Train {
        sample: PathBuf,
        /// Where to write the table, stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Encode bytes with the codes of a frequency table
    Encode(CodecArgs),
    /// Decode the output of `encode`
    Decode(CodecArgs),
    /// Print the code of every byte in a frequency table
    Inspect {
        #[arg(short, long)]
        table: PathBuf,
    },
}

#[derive(Args)]
struct CodecArgs {
    #[arg(short, long)]
    table: PathBuf,
    /// Input file, stdin if omitted
    input: Option<PathBuf>,
    /// Skip the radix-64 layer and work on packed bytes
    #[arg(long)]
    raw: bool,
    /// Use the `-_` alphabet instead of `+/`
    #[arg(long)]
    url_safe: bool,
}

impl CodecArgs {
    fn radix64(&self) -> Radix64 {
        if self.url_safe {
            Radix64::URL_SAFE
        } else {
            Radix64::STANDARD
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Train { sample, output } => train(&sample, output.as_deref()),
        Commands::Encode(args) => encode(&args),
        Commands::Decode(args) => decode(&args),
        Commands::Inspect { table } => inspect(&table),
    }
}

fn read_input(input: Option<&Path>) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    match input {
        Some(path) => {
            File::open(path)
                .wrap_err_with(|| format!("opening {}", path.display()))?
                .read_to_end(&mut data)?;
        }
        None => {
            std::io::stdin().lock().read_to_end(&mut data)?;
        }
    }
    Ok(data)
}

fn load_codec(table: &Path) -> Result<HuffmanCodec<u8>> {
    let table = table_file::read(table)?;
    let codec = HuffmanCodec::build(table, StopSymbol::Null)?;
    debug!(
        "codec has {} symbols, longest code {} bits",
        codec.num_symbols(),
        codec.max_code_len()
    );
    Ok(codec)
}

fn train(sample: &Path, output: Option<&Path>) -> Result<()> {
    let data = read_input(Some(sample))?;
    let table = count_frequencies(data.iter().copied());
    info!(
        "counted {} distinct bytes in {} bytes of {}",
        table.len(),
        data.len(),
        sample.display()
    );
    match output {
        Some(path) => table_file::write(path, &table),
        None => {
            std::io::stdout().write_all(table_file::render(&table).as_bytes())?;
            Ok(())
        }
    }
}

fn encode(args: &CodecArgs) -> Result<()> {
    let codec = load_codec(&args.table)?;
    let data = read_input(args.input.as_deref())?;
    let packed = codec.encode(&data)?;
    info!(
        "encoded {} bytes into {} bytes ({:.3} bits per symbol entropy)",
        data.len(),
        packed.len(),
        codec.entropy()
    );

    let mut stdout = std::io::stdout().lock();
    if args.raw {
        stdout.write_all(&packed)?;
    } else {
        writeln!(stdout, "{}", args.radix64().encode(&packed))?;
    }
    Ok(())
}

fn decode(args: &CodecArgs) -> Result<()> {
    let codec = load_codec(&args.table)?;
    let data = read_input(args.input.as_deref())?;
    let packed = if args.raw {
        data
    } else {
        let text = std::str::from_utf8(&data).wrap_err("input is not radix-64 text")?;
        args.radix64().decode(text.trim())?
    };
    let symbols = codec.decode(&packed)?;
    info!("decoded {} bytes into {} bytes", packed.len(), symbols.len());

    std::io::stdout().lock().write_all(&symbols)?;
    Ok(())
}

fn inspect(table: &Path) -> Result<()> {
    let codec = load_codec(table)?;
    let mut stdout = std::io::stdout().lock();
    for (symbol, code) in codec.codes() {
        let shown = if symbol.is_ascii_graphic() {
            char::from(*symbol)
        } else {
            '.'
        };
        writeln!(stdout, "{:>3} {} {:>2} {}", symbol, shown, code.len, code)?;
    }
    let stop = codec.stop_code();
    writeln!(stdout, "stop    {:>2} {}", stop.len, stop)?;
    writeln!(stdout, "entropy: {:.4} bits per symbol", codec.entropy())?;
    writeln!(stdout, "fingerprint: {:016x}", codec.fingerprint())?;
    Ok(())
}
