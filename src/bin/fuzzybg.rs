use std::{fs, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "fuzzybg", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Blur a raster image and write the result as a PNG.
    Blur(BlurArgs),
    /// Run a blur job described by a JSON file.
    Job(JobArgs),
}

#[derive(Parser, Debug)]
struct BlurArgs {
    /// Input image path (any format the `image` crate can decode).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Blur amount, 0 upwards.
    #[arg(long, default_value_t = fuzzybg::DEFAULT_AMOUNT)]
    amount: f64,
}

#[derive(Parser, Debug)]
struct JobArgs {
    /// Job JSON path.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Blur(args) => cmd_blur(args),
        Command::Job(args) => cmd_job(args),
    }
}

fn cmd_blur(args: BlurArgs) -> anyhow::Result<()> {
    let job = fuzzybg::BackdropJob {
        input: args.in_path,
        output: args.out,
        amount: args.amount,
    };
    fuzzybg::run_job(&job)?;
    Ok(())
}

fn cmd_job(args: JobArgs) -> anyhow::Result<()> {
    let json = fs::read_to_string(&args.in_path)
        .with_context(|| format!("open job '{}'", args.in_path.display()))?;
    let job = fuzzybg::BackdropJob::from_json_str(&json)?;
    fuzzybg::run_job(&job)?;
    Ok(())
}
