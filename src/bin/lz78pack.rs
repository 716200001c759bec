use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};
use lz78pack::{
    first_difference, Alphabet, BatchCodec, BitFormat, CodecConfig, CompressStats,
    DecompressStats, Lz78Codec,
};

#[derive(Parser, Debug)]
#[command(name = "lz78pack")]
#[command(about = "Compress restricted-alphabet text with LZ78 and variable-width bit packing")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Show verbose statistics
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress text files into bit streams
    Compress(CodecArgs),
    /// Decompress bit streams back into text
    Decompress(CodecArgs),
    /// Check whether two files are identical (0=identical, 1=different, 2=error)
    Compare {
        left: PathBuf,
        right: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct CodecArgs {
    /// Input files (use - for stdin)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (use - for stdout); only valid with a single input
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Compressed stream format (default: text to write, auto to read)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Alphabet symbols in code order (default: letters, space, and . ? , : ; ` { | } ~)
    #[arg(short, long)]
    alphabet: Option<String>,

    /// Number of threads for multiple inputs (0 = auto, 1 = single-threaded)
    #[arg(short = 't', long, default_value = "0")]
    threads: usize,

    /// Compress trailing line endings instead of dropping them
    #[arg(long)]
    keep_line_endings: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Text,
    Packed,
    Auto,
}

impl From<FormatArg> for BitFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => BitFormat::Text,
            FormatArg::Packed => BitFormat::Packed,
            FormatArg::Auto => BitFormat::Auto,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Compress,
    Decompress,
}

/// Suffix for compressed files written next to their input
const COMPRESSED_EXTENSION: &str = "lz78";

/// Exit codes
const EXIT_OK: u8 = 0;
const EXIT_DIFFERENT: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(args) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(args: Args) -> Result<u8, Box<dyn std::error::Error>> {
    match args.command {
        Command::Compress(codec_args) => run_codec(Mode::Compress, &codec_args, args.verbose),
        Command::Decompress(codec_args) => run_codec(Mode::Decompress, &codec_args, args.verbose),
        Command::Compare { left, right } => run_compare(&left, &right),
    }
}

fn build_config(mode: Mode, args: &CodecArgs) -> Result<CodecConfig, Box<dyn std::error::Error>> {
    let alphabet = match &args.alphabet {
        Some(symbols) => Alphabet::from_symbols(symbols.as_bytes())?,
        None => Alphabet::text(),
    };
    let default_format = match mode {
        Mode::Compress => FormatArg::Text,
        Mode::Decompress => FormatArg::Auto,
    };

    Ok(CodecConfig {
        alphabet,
        format: args.format.unwrap_or(default_format).into(),
        num_threads: args.threads,
        trim_line_endings: !args.keep_line_endings,
    })
}

fn run_codec(mode: Mode, args: &CodecArgs, verbose: bool) -> Result<u8, Box<dyn std::error::Error>> {
    let config = build_config(mode, args)?;

    if args.inputs.len() > 1 {
        if args.output.is_some() {
            return Err("--output cannot be used with multiple inputs".into());
        }
        return run_batch(mode, config, &args.inputs, verbose);
    }

    let input_path = &args.inputs[0];
    let is_stdin = is_stdio(input_path);
    let output_path = match &args.output {
        Some(path) => path.clone(),
        None if is_stdin => PathBuf::from("-"),
        None => derive_output_path(mode, input_path),
    };

    if !is_stdin && !is_stdio(&output_path) && same_file(input_path, &output_path) {
        return Err(format!("output {} is the same file as the input", output_path.display()).into());
    }

    let input: Box<dyn Read> = if is_stdin {
        Box::new(io::stdin().lock())
    } else {
        Box::new(BufReader::new(File::open(input_path)?))
    };

    let codec = Lz78Codec::new(config);
    let start = Instant::now();

    // The output is only created once the whole input has been processed
    let mut buffer = Vec::new();
    match mode {
        Mode::Compress => {
            let stats = codec.compress_to(input, &mut buffer)?;
            if verbose {
                print_compress_stats(input_path, &stats, start);
            }
        }
        Mode::Decompress => {
            let stats = codec.decompress_to(input, &mut buffer)?;
            if verbose {
                print_decompress_stats(input_path, &stats, start);
            }
        }
    }

    if is_stdio(&output_path) {
        let mut stdout = io::stdout().lock();
        stdout.write_all(&buffer)?;
        stdout.flush()?;
    } else {
        write_output(&output_path, &buffer)?;
    }

    Ok(EXIT_OK)
}

fn run_batch(
    mode: Mode,
    config: CodecConfig,
    inputs: &[PathBuf],
    verbose: bool,
) -> Result<u8, Box<dyn std::error::Error>> {
    if inputs.iter().any(|path| is_stdio(path)) {
        return Err("stdin cannot be combined with other inputs".into());
    }

    let data = inputs.iter().map(std::fs::read).collect::<io::Result<Vec<_>>>()?;
    let batch = BatchCodec::new(config);
    let start = Instant::now();
    let mut failures = 0usize;

    match mode {
        Mode::Compress => {
            for (path, result) in inputs.iter().zip(batch.compress_all(&data)?) {
                match result {
                    Ok((compressed, stats)) => {
                        write_output(&derive_output_path(mode, path), &compressed)?;
                        if verbose {
                            print_compress_stats(path, &stats, start);
                        }
                    }
                    Err(e) => {
                        eprintln!("Error: {}: {}", path.display(), e);
                        failures += 1;
                    }
                }
            }
        }
        Mode::Decompress => {
            for (path, result) in inputs.iter().zip(batch.decompress_all(&data)?) {
                match result {
                    Ok((text, stats)) => {
                        write_output(&derive_output_path(mode, path), &text)?;
                        if verbose {
                            print_decompress_stats(path, &stats, start);
                        }
                    }
                    Err(e) => {
                        eprintln!("Error: {}: {}", path.display(), e);
                        failures += 1;
                    }
                }
            }
        }
    }

    if failures > 0 {
        warn!("{} of {} inputs failed", failures, inputs.len());
        Ok(EXIT_ERROR)
    } else {
        Ok(EXIT_OK)
    }
}

fn run_compare(left: &Path, right: &Path) -> Result<u8, Box<dyn std::error::Error>> {
    let left_data = std::fs::read(left)?;
    let right_data = std::fs::read(right)?;

    match first_difference(&left_data, &right_data) {
        None => {
            println!("The files are identical");
            Ok(EXIT_OK)
        }
        Some(position) => {
            println!("The files are not identical (first difference at byte {})", position);
            Ok(EXIT_DIFFERENT)
        }
    }
}

fn is_stdio(path: &Path) -> bool {
    path.to_str() == Some("-")
}

/// Whether both paths resolve to the same existing file
fn same_file(left: &Path, right: &Path) -> bool {
    match (std::fs::canonicalize(left), std::fs::canonicalize(right)) {
        (Ok(left), Ok(right)) => left == right,
        _ => false,
    }
}

/// `<input>.lz78` when compressing; the `.lz78` suffix removed (or `.out` added) when decompressing
fn derive_output_path(mode: Mode, input: &Path) -> PathBuf {
    match mode {
        Mode::Compress => {
            let mut name = input.as_os_str().to_owned();
            name.push(".");
            name.push(COMPRESSED_EXTENSION);
            PathBuf::from(name)
        }
        Mode::Decompress => {
            if input.extension().is_some_and(|ext| ext == COMPRESSED_EXTENSION) {
                input.with_extension("")
            } else {
                let mut name = input.as_os_str().to_owned();
                name.push(".out");
                PathBuf::from(name)
            }
        }
    }
}

fn write_output(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut output = BufWriter::new(File::create(path)?);
    output.write_all(data)?;
    output.flush()?;
    info!("wrote {}", path.display());
    Ok(())
}

fn print_compress_stats(path: &Path, stats: &CompressStats, start: Instant) {
    let elapsed = start.elapsed();
    eprintln!("Compression complete: {}", path.display());
    eprintln!("  Input symbols:    {}", stats.input_symbols);
    eprintln!("  Phrases:          {}", stats.phrases);
    eprintln!("  Records:          {}", stats.records);
    eprintln!("  Index-only tail:  {}", if stats.tail_record { "yes" } else { "no" });
    eprintln!("  Output bits:      {}", stats.output_bits);
    eprintln!("  Output bytes:     {}", stats.output_bytes);
    if stats.input_symbols > 0 {
        eprintln!("  Bits per symbol:  {:.3}", stats.output_bits as f64 / stats.input_symbols as f64);
    }
    eprintln!("  Time:             {:.2?}", elapsed);
}

fn print_decompress_stats(path: &Path, stats: &DecompressStats, start: Instant) {
    let elapsed = start.elapsed();
    eprintln!("Decompression complete: {}", path.display());
    eprintln!("  Input bytes:      {}", stats.input_bytes);
    eprintln!("  Input bits:       {}", stats.input_bits);
    eprintln!("  Records:          {}", stats.records);
    eprintln!("  Phrases:          {}", stats.phrases);
    eprintln!("  Index-only tail:  {}", if stats.tail_record { "yes" } else { "no" });
    eprintln!("  Output symbols:   {}", stats.output_symbols);
    eprintln!("  Time:             {:.2?}", elapsed);
}
