use anyhow::Result;
use chat_icon_gen::{
    color::{parse_css_color, ColorSpec},
    generate::{DEFAULT_OUTPUT_DIR, DEFAULT_SIZE},
    generate_icons, BrandOverrides, FontFile, FontSet, GenerateOptions, IconRenderer,
    RenderConfig,
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "chat-icon-gen",
    about = "Draw the chat-bubble app icon in standard, dark and tinted appearances"
)]
struct Args {
    /// Asset catalog icon set to write into.
    #[clap(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Edge length of the generated PNGs in pixels.
    #[clap(short, long, value_name = "PX", default_value_t = DEFAULT_SIZE,
           value_parser = clap::value_parser!(u32).range(1..))]
    size: u32,

    /// Font for the "A" label, tried before the system fonts.
    #[clap(long, value_name = "PATH")]
    font: Option<PathBuf>,

    /// CJK-capable font for the "文" label, tried before the system fonts.
    #[clap(long, value_name = "PATH")]
    cjk_font: Option<PathBuf>,

    /// Top of the background gradient (CSS color format)
    #[clap(long, value_name = "COLOR", value_parser = parse_css_color)]
    background_top: Option<ColorSpec>,

    /// Bottom of the background gradient (CSS color format)
    #[clap(long, value_name = "COLOR", value_parser = parse_css_color)]
    background_bottom: Option<ColorSpec>,

    /// Fill of the front bubble (CSS color format)
    #[clap(long, value_name = "COLOR", value_parser = parse_css_color)]
    primary: Option<ColorSpec>,

    /// Fill of the rear bubble (CSS color format)
    #[clap(long, value_name = "COLOR", value_parser = parse_css_color)]
    secondary: Option<ColorSpec>,

    /// Log font discovery and other details to stderr
    #[clap(short, long)]
    verbose: bool,
}

/// Font probing logs at debug, so `--verbose` has to reach that far.
fn log_level(verbose: bool) -> tracing::Level {
    if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(log_level(args.verbose).into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut fonts = FontSet::system();
    if let Some(path) = args.font {
        fonts.latin.prepend(FontFile::new(path));
    }
    if let Some(path) = args.cjk_font {
        fonts.broad.prepend(FontFile::new(path));
    }

    let brand = BrandOverrides {
        background_top: args.background_top,
        background_bottom: args.background_bottom,
        primary: args.primary,
        secondary: args.secondary,
    };
    let renderer = IconRenderer::new(RenderConfig::default().with_brand(&brand), fonts);

    let options = GenerateOptions {
        output: args.output,
        size: args.size,
    };
    generate_icons(&renderer, &options)?;

    println!("\nIcon generation complete.");
    println!("Open Assets.xcassets in Xcode to check the icons.");
    Ok(())
}
