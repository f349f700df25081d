use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use webicons::{
    icon_gen::{self, GenerateOptions},
    logging,
    render::Background,
};

#[derive(Debug, Parser)]
#[command(
    name = "webicons",
    version,
    about = "Generate favicons, PWA icons and the Apple touch icon from a single SVG logo"
)]
struct Args {
    /// Path to the source SVG logo.
    #[arg(value_name = "SVG")]
    svg: PathBuf,

    /// Base output directory.
    #[arg(short, long, value_name = "DIR", default_value = "assets/icons")]
    out: PathBuf,

    /// Overwrite existing files (default: skip existing).
    #[arg(long)]
    overwrite: bool,

    /// Do not generate the maskable icon variant.
    #[arg(long)]
    no_maskable: bool,

    /// Background color for rendered PNGs (CSS color, e.g. "#ffffff").
    /// Default keeps SVG transparency.
    #[arg(long, value_name = "COLOR")]
    background: Option<Background>,
}

fn main() {
    logging::init();

    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    icon_gen::generate_icons(GenerateOptions {
        input: args.svg,
        output: args.out,
        overwrite: args.overwrite,
        include_maskable: !args.no_maskable,
        background: args.background,
    })
}
