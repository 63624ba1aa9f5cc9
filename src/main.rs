//! imagemoji - Replace emoji with images

use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::debug;

use imagemoji::{CdnGenerator, Emojifier, SourceGenerator};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Treat input as plain text and insert <img> tags
    Text,
    /// Parse input as a full HTML document
    Html,
    /// Parse input as an HTML body fragment
    Fragment,
}

#[derive(Parser)]
#[command(name = "imagemoji")]
#[command(version, about = "Replace emoji with images", long_about = None)]
#[command(after_help = "EXAMPLES:
    echo 'I ❤️ emoji' | imagemoji              Rewrite text from stdin
    imagemoji --mode html page.html -o out.html  Rewrite an HTML document
    imagemoji --folder 72x72 --ext .png in.txt   Use PNG images")]
struct Cli {
    /// Input file, or - for stdin
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<String>,

    /// How to interpret the input
    #[arg(short, long, value_enum, default_value_t = Mode::Text)]
    mode: Mode,

    /// JSON file with image source settings (base, folder, ext)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Image base URL
    #[arg(long)]
    base: Option<String>,

    /// Image folder under the base URL
    #[arg(long)]
    folder: Option<String>,

    /// Image file extension, including the dot
    #[arg(long)]
    ext: Option<String>,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.quiet { "error" } else { "warn" };
    env_logger::init_from_env(Env::default().default_filter_or(level));

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> imagemoji::Result<()> {
    let generator = load_generator(cli)?;
    debug!("image sources: {generator:?}");

    let input = read_input(cli.input.as_deref())?;
    let emojifier = Emojifier::new();
    let how = Some(&generator as &dyn SourceGenerator);

    let output = match cli.mode {
        Mode::Text => emojifier.parse_str(&input, how),
        Mode::Html => emojifier.parse_html_document(&input, how),
        Mode::Fragment => emojifier.parse_html(&input, how),
    };

    match cli.output.as_deref() {
        Some(path) if path != "-" => fs::write(path, output)?,
        _ => io::stdout().write_all(output.as_bytes())?,
    }
    Ok(())
}

/// Config file first, then flags on top.
fn load_generator(cli: &Cli) -> imagemoji::Result<CdnGenerator> {
    let mut generator = match cli.config.as_deref() {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => CdnGenerator::default(),
    };

    if let Some(base) = &cli.base {
        generator = generator.with_base(base.as_str());
    }
    if let Some(folder) = &cli.folder {
        generator = generator.with_folder(folder.as_str());
    }
    if let Some(ext) = &cli.ext {
        generator = generator.with_ext(ext.as_str());
    }
    Ok(generator)
}

fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) if path != "-" => fs::read_to_string(path),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
