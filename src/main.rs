//! # escpos-press CLI
//!
//! Command-line interface for encoding and printing ESC/POS documents.
//!
//! ## Usage
//!
//! ```bash
//! # List built-in samples
//! escpos-press samples
//!
//! # Encode a node document (JSON) to a file
//! escpos-press render receipt.json -o receipt.bin
//!
//! # Print the code page table through a CUPS queue
//! escpos-press print asciitable -H cups.local -d receipts
//!
//! # Print straight to a network printer's raw port
//! escpos-press print receipt.json --raw 192.168.1.40
//! ```

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use escpos_press::{
    Escpos, EscposError, node, sample,
    transport::{Document, IppClient, IppConfig, JobSubmitter, RawClient, RawConfig},
};

/// escpos-press - ESC/POS receipt encoder
#[derive(Parser, Debug)]
#[command(name = "escpos-press")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List built-in samples
    Samples,

    /// Encode a node document or sample to a file
    Render {
        /// JSON node document, or a sample name
        input: String,

        /// Output file for the encoded bytes
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Encode and send to a printer
    Print {
        /// JSON node document, or a sample name
        input: String,

        /// IPP host
        #[arg(short = 'H', long, default_value = "localhost")]
        host: String,

        /// IPP port
        #[arg(short, long, default_value_t = 631)]
        port: u16,

        /// IPP printer (queue) name
        #[arg(short = 'd', long, default_value = "")]
        printer: String,

        /// IPP username
        #[arg(long, default_value = "")]
        user: String,

        /// IPP password
        #[arg(long, default_value = "")]
        pass: String,

        /// Use plain HTTP instead of TLS
        #[arg(long)]
        no_tls: bool,

        /// Accept self-signed certificates
        #[arg(long)]
        insecure: bool,

        /// Job name (defaults to the input name)
        #[arg(short, long)]
        job: Option<String>,

        /// Send to a raw socket (host or host:port) instead of IPP
        #[arg(long, value_name = "ADDR")]
        raw: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), EscposError> {
    match command {
        Commands::Samples => {
            println!("Available samples:");
            for name in sample::list_samples() {
                println!("  {}", name);
            }
        }

        Commands::Render { input, output } => {
            let data = encode_input(&input)?;
            std::fs::write(&output, &data)?;
            println!("Wrote {} bytes to {}", data.len(), output.display());
        }

        Commands::Print {
            input,
            host,
            port,
            printer,
            user,
            pass,
            no_tls,
            insecure,
            job,
            raw,
        } => {
            let data = encode_input(&input)?;
            let name = job.unwrap_or_else(|| job_name(&input));
            let document = Document::new(data, name);

            let submitter: Box<dyn JobSubmitter> = match raw {
                Some(addr) => Box::new(RawClient::new(RawConfig::parse(&addr)?)),
                None => Box::new(IppClient::new(IppConfig {
                    host,
                    port,
                    printer,
                    user,
                    password: pass,
                    tls: !no_tls,
                    accept_invalid_certs: insecure,
                })?),
            };

            println!("Printing {} ({} bytes)...", document.name, document.size());
            let runtime = tokio::runtime::Runtime::new()?;
            let handle = runtime.block_on(submitter.submit(&document))?;
            println!("Printed successfully: {}", handle);
        }
    }

    Ok(())
}

/// Bytes for a sample name or a JSON node document on disk.
///
/// Node documents are framed by init and end so the printer starts from
/// its defaults.
fn encode_input(input: &str) -> Result<Vec<u8>, EscposError> {
    let path = Path::new(input);
    if !path.exists() {
        if !sample::is_sample(input) {
            return Err(EscposError::InvalidNode(format!(
                "'{}' is neither a file nor a sample. Run `escpos-press samples` to list samples.",
                input
            )));
        }
        return sample::by_name(input)?.ok_or_else(|| {
            EscposError::InvalidNode(format!("Sample '{}' produced no output", input))
        });
    }

    let json = std::fs::read_to_string(path)?;
    let nodes = node::from_json(&json)?;

    let mut p = Escpos::buffer();
    p.init().write_nodes(&nodes)?.end();
    Ok(p.into_bytes())
}

fn job_name(input: &str) -> String {
    Path::new(input)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(input)
        .to_string()
}
