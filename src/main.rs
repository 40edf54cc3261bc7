use clap::Parser;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use ufo2fea::{Font, Ufo2FeaError};

/// Write a makeotf kern feature and glyph order for a UFO
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// UFO to read
    font: PathBuf,

    /// File to write the kern feature to (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Text placed, as comments, at the top of the feature
    #[arg(long)]
    header: Option<String>,

    /// Also write a makeotf glyph order file here
    #[arg(long)]
    glyph_order: Option<PathBuf>,

    /// JSON object of design name to production name, overriding the UFO's
    /// public.postscriptNames
    #[arg(long, requires = "glyph_order")]
    name_map: Option<PathBuf>,

    #[command(flatten)]
    verbosity: clap_verbosity_flag::Verbosity,
}

fn write_glyph_order(font: &Font, args: &Args, path: &Path) -> Result<(), Ufo2FeaError> {
    let provided: HashMap<String, String> = match &args.name_map {
        Some(map_path) => {
            let reader = std::io::BufReader::new(std::fs::File::open(map_path)?);
            serde_json::from_reader(reader)?
        }
        None => font.declared_production_names(),
    };
    let order = font.glyph_order();
    let names = ufo2fea::make_glyph_design_name_to_final_name_map(font, &order, Some(&provided))?;
    std::fs::write(path, ufo2fea::glyph_order_text(font, &order, &names))?;
    log::info!("Wrote glyph order to {}", path.display());
    Ok(())
}

fn run(args: &Args) -> Result<(), Ufo2FeaError> {
    let font = ufo2fea::load(&args.font)?;
    let before = std::time::Instant::now();
    let feature = ufo2fea::write_kern_feature(&font, args.header.as_deref())?;
    log::info!("Generated kern feature in {:.2?}", before.elapsed());
    match &args.output {
        Some(path) => std::fs::write(path, &feature)?,
        None if !feature.is_empty() => println!("{feature}"),
        None => {}
    }
    if let Some(path) = &args.glyph_order {
        write_glyph_order(&font, args, path)?;
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbosity.into())
        .init();
    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
