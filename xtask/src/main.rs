use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for the rogue engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run fmt, clippy, tests and doc in order
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy with warnings denied
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Replay a long jittered frame script twice and require identical output
    Soak {
        /// Seed for the generated frame times
        #[arg(long, default_value = "42")]
        seed: u64,
        /// Number of frames to replay
        #[arg(long, default_value = "20000")]
        frames: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            fmt()?;
            clippy()?;
            cargo("test", &["test", "--workspace"])?;
            doc()?;
        }
        Commands::Fmt => fmt()?,
        Commands::Clippy => clippy()?,
        Commands::Test => cargo("test", &["test", "--workspace"])?,
        Commands::Doc => doc()?,
        Commands::Soak { seed, frames } => soak(seed, frames)?,
    }

    Ok(())
}

fn fmt() -> Result<()> {
    cargo("fmt", &["fmt", "--all", "--", "--check"])
}

fn clippy() -> Result<()> {
    cargo(
        "clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )
}

fn doc() -> Result<()> {
    cargo("doc", &["doc", "--workspace", "--no-deps"])
}

fn cargo(label: &str, args: &[&str]) -> Result<()> {
    println!("==> cargo {}", args.join(" "));
    let status = Command::new("cargo")
        .args(args)
        .status()
        .with_context(|| format!("spawn cargo {label}"))?;
    if !status.success() {
        anyhow::bail!("cargo {label} failed");
    }
    Ok(())
}

fn soak(seed: u64, frames: usize) -> Result<()> {
    let seed = seed.to_string();
    let count = frames.to_string();
    let args = [
        "run", "--quiet", "--release", "-p", "rogue-cli", "--", "replay", "--hz", "60",
        "--jitter", seed.as_str(), "--count", count.as_str(),
    ];

    let mut outputs = Vec::with_capacity(2);
    for pass in 1..=2 {
        println!("==> soak pass {pass}: {frames} frames, seed {seed}");
        let output = Command::new("cargo")
            .args(args)
            .output()
            .context("spawn replay")?;
        if !output.status.success() {
            anyhow::bail!("replay pass {pass} failed");
        }
        outputs.push(output.stdout);
    }

    if outputs[0] != outputs[1] {
        anyhow::bail!("replay output differs between passes");
    }
    println!("==> soak ok: {} bytes of identical output", outputs[0].len());
    Ok(())
}
