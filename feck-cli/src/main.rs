use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use feck_core::Verbosity;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "feck", version, about = "feck v0.1.0")]
struct Cli {
    /// Increase diagnostic verbosity (shape dump, per-chunk digest compares).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print the keyed 64-bit localization digest of a byte range as hex.
    Digest {
        file: PathBuf,
        #[arg(long, default_value_t = 0)]
        skip: usize,
        /// Defaults to the remainder of the file from `--skip`.
        #[arg(long)]
        len: Option<usize>,
    },
    /// Build a recovery bundle for a file under shape (k, m).
    Prepare {
        file: PathBuf,
        #[arg(long)]
        k: usize,
        #[arg(long)]
        m: usize,
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Recover a (possibly damaged) file using its recovery bundle.
    Repair {
        file: PathBuf,
        #[arg(long)]
        bundle: PathBuf,
        /// Defaults to overwriting `file` in place.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbosity = Verbosity::new(cli.verbose as u32);
    match cli.cmd {
        Cmd::Digest { file, skip, len } => digest(&file, skip, len)?,
        Cmd::Prepare { file, k, m, out } => prepare(&file, &out, k, m, verbosity)?,
        Cmd::Repair { file, bundle, out } => repair(&file, &bundle, out.as_deref(), verbosity)?,
    }
    Ok(())
}

fn digest(file: &Path, skip: usize, len: Option<usize>) -> Result<()> {
    let bytes = fs::read(file).with_context(|| format!("read {}", file.display()))?;
    let len = len.unwrap_or_else(|| bytes.len().saturating_sub(skip));
    println!("{}", feck_core::digest_hex(&bytes, skip, len));
    Ok(())
}

fn prepare(file: &Path, bundle_out: &Path, k: usize, m: usize, verbosity: Verbosity) -> Result<()> {
    let data = fs::read(file).with_context(|| format!("read {}", file.display()))?;
    let bundle = feck_core::prepare(&data, k, m, verbosity)
        .with_context(|| format!("prepare bundle for {}", file.display()))?;
    fs::write(bundle_out, &bundle).with_context(|| format!("write {}", bundle_out.display()))?;
    println!("wrote {} ({} bytes) for k={k} m={m}", bundle_out.display(), bundle.len());
    Ok(())
}

fn repair(file: &Path, bundle: &Path, out: Option<&Path>, verbosity: Verbosity) -> Result<()> {
    let data = fs::read(file).with_context(|| format!("read {}", file.display()))?;
    let bundle_bytes = fs::read(bundle).with_context(|| format!("read {}", bundle.display()))?;
    let recovered = feck_core::repair(&data, bundle_bytes, verbosity)
        .with_context(|| format!("repair {} using {}", file.display(), bundle.display()))?;
    let out_path = out.unwrap_or(file);
    fs::write(out_path, &recovered).with_context(|| format!("write {}", out_path.display()))?;
    println!("recovered {} bytes into {}", recovered.len(), out_path.display());
    Ok(())
}
