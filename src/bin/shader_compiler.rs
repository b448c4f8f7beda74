//! Usage: shader_compiler [--device N] [--gles-version 2|3] VERTEX_FILE FRAGMENT_FILE OUTPUT_FILE
//!
//! Set `RUST_LOG=info` to see which driver compiled the program.

use std::error::Error as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gles_shader_compiler::context::{ContextOptions, GlesContext};
use gles_shader_compiler::pipeline::{self, Outcome, Sources};
use gles_shader_compiler::Result;

#[derive(Parser, Debug)]
#[command(name = "shader_compiler", version, about = "Pre-compile a GL ES shader pair into a driver program binary")]
struct Arguments {
    vertex_file: PathBuf,
    fragment_file: PathBuf,
    output_file: PathBuf,
    /// EGL device index
    #[arg(long, default_value_t = 0)]
    device: usize,
    #[arg(long = "gles-version", default_value_t = 3, value_parser = clap::value_parser!(u8).range(2..=3))]
    gles_version: u8,
}

/// A pipeline error outranks a failure to tear the context down.
fn settle(outcome: Result<Outcome>, teardown: Result<()>) -> Result<Outcome> {
    match (outcome, teardown) {
        (Ok(outcome), Ok(())) => Ok(outcome),
        (Ok(_), Err(err)) => Err(err),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(teardown)) => {
            log::warn!("{teardown}");
            Err(err)
        }
    }
}

fn run(args: &Arguments) -> Result<()> {
    let sources = Sources::load(&args.vertex_file, &args.fragment_file)?;
    let context = GlesContext::create(&ContextOptions {
        device: args.device,
        gles_major: args.gles_version,
    })?;
    let stdout = std::io::stdout();
    let outcome = pipeline::run(&context, sources, &args.output_file, &mut stdout.lock());
    let outcome = settle(outcome, context.destroy())?;
    log::info!(
        "vertex={} fragment={} link={} binary={} bytes",
        outcome.vertex_compiled,
        outcome.fragment_compiled,
        outcome.linked,
        outcome.binary_len
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Arguments::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let prog = std::env::args().next().unwrap_or_else(|| "shader_compiler".to_string());
            eprintln!("{prog}: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
