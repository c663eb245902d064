use anyhow::Result;
use clap::{Parser, Subcommand};
use ritk_displacement::config::{parse_size, RunArgs};
use ritk_displacement::{compute_field, render, verify, CliDevice, OutputFormat};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ritk-displacement")]
#[command(about = "Sample a spatial transform into a dense displacement field")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample a transform over a zero reference volume and print the field
    Run(RunArgs),

    /// Check that the identity transform yields an all-zero field
    Verify {
        /// Reference volume size in voxels, x,y,z
        #[arg(long, default_value = "10,10,10", value_parser = parse_size)]
        size: [usize; 3],

        /// Number of chunks along the slowest axis
        #[arg(short, long, default_value_t = 1)]
        chunks: usize,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let device = Default::default();

    match cli.command {
        Some(Commands::Verify { size, chunks }) => {
            verify(size, chunks, &device)?;
            println!("OK");
        }
        Some(Commands::Run(args)) => run(args, &device)?,
        None => run(cli.run, &device)?,
    }

    Ok(())
}

fn run(args: RunArgs, device: &CliDevice) -> Result<()> {
    let config = args.into_config();
    let field = compute_field(&config, device)?;
    print!("{}", render(&field, &config)?);
    if config.format == OutputFormat::Json {
        println!();
    }
    Ok(())
}
