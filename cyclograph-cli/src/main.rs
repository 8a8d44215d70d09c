use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "cyclograph", version)]
#[command(about = "Render the Fourier epicycle decomposition of an SVG path as an animated SVG")]
struct Cli {
    /// Input SVG containing the path to decompose.
    input: PathBuf,

    /// Output path for the animated SVG.
    out: PathBuf,

    /// Number of harmonics to analyze.
    harmonics: u32,

    /// Number of evenly spaced samples taken along the path.
    #[arg(long, default_value_t = 20_000)]
    samples: usize,

    /// Seconds per revolution of the fundamental epicycle.
    #[arg(long, default_value_t = 20.0)]
    cycle_seconds: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    anyhow::ensure!(cli.samples > 0, "--samples must be > 0");

    let bytes = std::fs::read(&cli.input)
        .with_context(|| format!("read input svg '{}'", cli.input.display()))?;
    let source = cyclograph::PathSource::from_svg_bytes(&bytes)?;

    let points = source.sample_points(cli.samples);
    let coefficients = cyclograph::fourier_series(&points, cli.harmonics);

    let opts = cyclograph::ChainOptions {
        cycle_seconds: cli.cycle_seconds,
        ..cyclograph::ChainOptions::default()
    };
    let doc = cyclograph::build_scene(
        cyclograph::PathData::from_svg(source.path_d()),
        source.canvas(),
        &coefficients,
        &opts,
    )?;
    let svg = cyclograph::write_svg(&doc);

    if let Some(parent) = cli.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&cli.out, svg)
        .with_context(|| format!("write svg '{}'", cli.out.display()))?;

    eprintln!("wrote {}", cli.out.display());
    Ok(())
}
