use anyhow::Context;
use clap::{ArgAction, Parser};
use drawover::config::Config;
use drawover::export;
use drawover::overlay::Overlay;
use drawover::replay::Script;
use drawover::surface::HeadlessHost;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "drawover")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("DRAWOVER_GIT_HASH"), ")"),
    about = "Drawing overlay for annotating web pages"
)]
struct Cli {
    /// Replay a JSON gesture script against a headless page
    #[arg(long, short = 'r', value_name = "SCRIPT")]
    replay: Option<PathBuf>,

    /// Write the resulting drawing to this file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE", requires = "replay")]
    output: Option<PathBuf>,

    /// Save the resulting drawing into the configured export directory
    #[arg(long, action = ArgAction::SetTrue, requires = "replay")]
    save: bool,

    /// Print the committed shapes as JSON instead of the drawing
    #[arg(long, action = ArgAction::SetTrue, requires = "replay")]
    shapes: bool,

    /// Size of the headless page, as WIDTHxHEIGHT
    #[arg(long, value_name = "WxH", default_value = "1280x2000", value_parser = parse_page_size)]
    page_size: (f64, f64),

    /// Use this config file instead of ~/.config/drawover/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write a documented default config file and exit
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "replay")]
    init_config: bool,
}

fn parse_page_size(value: &str) -> Result<(f64, f64), String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let parse = |part: &str| -> Result<f64, String> {
        match part.trim().parse::<f64>() {
            Ok(n) if n.is_finite() && n > 0.0 => Ok(n),
            _ => Err(format!("invalid page dimension '{part}'")),
        }
    };
    Ok((parse(width)?, parse(height)?))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        let path = Config::create_default_file()?;
        println!("Created config at {}", path.display());
        return Ok(());
    }

    let Some(script_path) = cli.replay else {
        // No flags: show usage
        println!("drawover: Drawing overlay for annotating web pages");
        println!();
        println!("Usage:");
        println!("  drawover --replay script.json             Print the resulting drawing");
        println!("  drawover --replay script.json --shapes    Print the committed shapes");
        println!("  drawover --replay script.json --save      Save into the export directory");
        println!("  drawover --init-config                    Write a default config file");
        println!("  drawover --help                           Show help");
        println!();
        println!("Scripts are JSON arrays of steps such as:");
        println!(r#"  [{{"op": "activate"}}, {{"op": "tool", "kind": "arrow"}},"#);
        println!(r#"   {{"op": "down", "x": 10, "y": 10}}, {{"op": "up", "x": 120, "y": 80}}]"#);
        return Ok(());
    };

    let config = match &cli.config {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file {} does not exist", path.display());
            }
            Config::load_from(path)?
        }
        None => Config::load()?,
    };

    let script = Script::load(&script_path)?;

    let (width, height) = cli.page_size;
    let mut overlay = Overlay::from_config(HeadlessHost::with_page_size(width, height), &config);
    let report = script.run(&mut overlay);
    log::info!(
        "Replayed {} steps: {} handled, {} ignored, {} shapes committed",
        report.steps,
        report.handled,
        report.ignored,
        report.committed
    );

    if cli.shapes {
        println!("{}", export::shapes_manifest(&overlay.shapes())?);
        return Ok(());
    }

    let markup = overlay.export_markup();

    if cli.save {
        let path = export::save_markup(&markup, &config.export)?;
        println!("Saved drawing to {}", path.display());
    } else if let Some(output) = cli.output {
        if markup.is_empty() {
            return Err(export::ExportError::NothingToExport.into());
        }
        std::fs::write(&output, &markup)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!("Wrote drawing to {}", output.display());
    } else {
        println!("{markup}");
    }

    Ok(())
}
