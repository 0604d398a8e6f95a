use std::{error::Error, path::PathBuf};

use clap::{Parser, ValueEnum};

use qrstyle::{
    export::DEFAULT_JPEG_QUALITY,
    matrix_to_svg, png_to_jpeg, png_to_pdf,
    render::shapes::{ball_names, frame_names},
    Content, Design, DotStyle, ECLevel, ModuleMatrix, RenderConfig, Renderer, SvgOptions,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Png,
    Jpeg,
    Pdf,
    Svg,
}

#[derive(Parser)]
#[command(name = "qrstyle", version, about = "Render styled QR codes")]
struct Cli {
    /// Text to encode
    payload: Option<String>,
    /// Structured content JSON file, e.g. {"type": "wifi", "data": {...}}
    #[arg(long, conflicts_with = "payload")]
    content: Option<PathBuf>,
    /// Design descriptor JSON file
    #[arg(long)]
    design: Option<PathBuf>,
    /// Render config JSON file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Use the per-module preview canvas profile
    #[arg(long)]
    preview: bool,
    /// Error correction level
    #[arg(long, value_parser = parse_ec_level)]
    ec_level: Option<ECLevel>,
    #[arg(long, value_enum, default_value = "png")]
    format: Format,
    /// JPEG quality
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY)]
    quality: u8,
    #[arg(short, long, default_value = "qr.png")]
    output: PathBuf,
    /// Read logos from local files and file:// URLs
    #[arg(long)]
    allow_local_logo: bool,
    /// Print the available style names and exit
    #[arg(long)]
    list_styles: bool,
}

fn parse_ec_level(s: &str) -> Result<ECLevel, String> {
    ECLevel::parse(s).ok_or_else(|| format!("unknown error correction level {s:?}, expected L, M, Q or H"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if cli.list_styles {
        println!("dots:    {}", DotStyle::ALL.join(", "));
        println!("frames:  {}", frame_names().collect::<Vec<_>>().join(", "));
        println!("balls:   {}", ball_names().collect::<Vec<_>>().join(", "));
        return Ok(());
    }

    let payload = match (&cli.payload, &cli.content) {
        (Some(payload), _) => payload.clone(),
        (None, Some(path)) => Content::from_json(&tokio::fs::read_to_string(path).await?)?.payload(),
        (None, None) => return Err("nothing to encode, pass a payload or --content".into()),
    };
    let design = match &cli.design {
        Some(path) => Design::from_json(&tokio::fs::read_to_string(path).await?),
        None => Design::default(),
    };
    let mut config = match &cli.config {
        Some(path) => RenderConfig::from_json(&tokio::fs::read_to_string(path).await?)?,
        None => RenderConfig::default(),
    };
    if cli.preview {
        config = config.profile(RenderConfig::preview().profile);
    }
    if let Some(ecl) = cli.ec_level {
        config = config.ec_level(ecl);
    }
    if cli.allow_local_logo {
        config = config.local_logos(true);
    }
    let renderer = Renderer::new(config);

    let bytes = match cli.format {
        Format::Png => renderer.generate(&payload, &design).await?,
        Format::Jpeg => png_to_jpeg(&renderer.generate(&payload, &design).await?, cli.quality)?,
        Format::Pdf => png_to_pdf(&renderer.generate(&payload, &design).await?)?,
        Format::Svg => {
            let matrix = ModuleMatrix::encode(payload.as_bytes(), renderer.config().ec_level)?;
            matrix_to_svg(&matrix, &SvgOptions::from_style(&design.resolve())).into_bytes()
        }
    };

    tokio::fs::write(&cli.output, &bytes).await?;
    log::info!("Wrote {} bytes to {}", bytes.len(), cli.output.display());
    Ok(())
}
