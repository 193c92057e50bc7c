#![deny(unsafe_code)]
//! CLI binary for the constel particle fields.
//!
//! Subcommands:
//! - `render <field>`: drive a field for N frames, write a PNG
//! - `list`: print available fields and palettes

mod error;

use clap::{Parser, Subcommand};
use constel_core::palette::{FieldPalette, Rgba};
use constel_core::{EngineError, Extent, FieldEngine, GlyphRaster, Seed};
use constel_engines::session::AnimationSession;
use constel_engines::surface::{draw_frame, Surface};
use constel_engines::EngineKind;
use constel_wordmark::typeface::Typeface;
use error::CliError;
use glam::{dvec2, DVec2};
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

/// Synthetic tick interval, about 60 frames per second.
const FRAME: Duration = Duration::from_micros(16_667);

#[derive(Parser)]
#[command(name = "constel", about = "Particle field animation CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Drive a field for N frames and write a PNG of the final frame.
    Render {
        /// Field name ("backdrop" or "wordmark").
        engine: String,

        /// Region width in pixels.
        #[arg(short = 'W', long, default_value_t = 960)]
        width: usize,

        /// Region height in pixels.
        #[arg(short = 'H', long, default_value_t = 540)]
        height: usize,

        /// Number of animation frames.
        #[arg(short, long, default_value_t = 600)]
        frames: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Palette name (aurora, ember, meadow, mono).
        #[arg(short, long)]
        palette: Option<String>,

        /// Wordmark text to trace.
        #[arg(short, long)]
        text: Option<String>,

        /// TTF/OTF font file for the wordmark glyphs.
        #[arg(long)]
        font: Option<PathBuf>,

        /// Hold the pointer at a position, as "x,y".
        #[arg(long)]
        pointer: Option<String>,

        /// Skip section activation; the field renders its spawn state.
        #[arg(long)]
        inactive: bool,

        /// Background color as a hex string.
        #[arg(long, default_value = "#0f172a")]
        background: String,

        /// Output file path.
        #[arg(short, long, default_value = "frame.png")]
        output: PathBuf,

        /// Field parameters as a JSON object string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// List available fields and palettes.
    List,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let engines = EngineKind::list_engines();
            let palettes = FieldPalette::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "engines": engines,
                    "palettes": palettes,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Fields:");
                for name in engines {
                    println!("  {name}");
                }
                println!("Palettes:");
                println!("  {}", palettes.join(", "));
            }
        }
        Command::Render {
            engine,
            width,
            height,
            frames,
            seed,
            palette,
            text,
            font,
            pointer,
            inactive,
            background,
            output,
            params,
        } => {
            let mut params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
            let overrides = params
                .as_object_mut()
                .ok_or_else(|| CliError::Input("--params must be a JSON object".into()))?;
            if let Some(name) = &palette {
                FieldPalette::from_name(name).map_err(|e| CliError::Input(e.to_string()))?;
                overrides.insert("palette".into(), serde_json::json!(name));
            }
            if let Some(text) = &text {
                overrides.insert("text".into(), serde_json::json!(text));
            }

            let background =
                Rgba::from_hex(&background).map_err(|e| CliError::Input(e.to_string()))?;

            let mut record = Seed::new(&engine, width, height, seed);
            record.params = params.clone();
            record.frames = frames;
            record.validate()?;

            let extent = Extent::new(width as f64, height as f64)?;
            let raster: Option<Box<dyn GlyphRaster>> = match &font {
                Some(path) => Some(Box::new(Typeface::from_path(path)?)),
                None => None,
            };

            let field = EngineKind::from_name(&engine, extent, seed, &params, raster)?;
            let mut session = AnimationSession::new(field);
            if inactive {
                session.start();
            } else {
                session.section_activated();
            }
            if let Some(spec) = &pointer {
                session.pointer_moved(parse_pointer(spec)?);
            }

            let mut now = Instant::now();
            for _ in 0..frames {
                session.tick(now)?;
                now += FRAME;
            }

            let w = u32::try_from(width).map_err(|_| EngineError::InvalidExtent)?;
            let h = u32::try_from(height).map_err(|_| EngineError::InvalidExtent)?;
            let mut surface = Surface::new(w, h)?;
            draw_frame(session.engine(), &mut surface, background);
            constel_engines::snapshot::write_png(&surface, &output)?;

            // Report the values the field actually ran with.
            let effective = session.engine().params();
            record.text = effective["text"].as_str().map(str::to_owned);
            if let Some(name) = effective["palette"].as_str() {
                record.palette = name.to_owned();
            }

            if cli.json {
                let mut info = serde_json::to_value(&record)?;
                if let Some(obj) = info.as_object_mut() {
                    obj.insert(
                        "output".into(),
                        serde_json::json!(output.display().to_string()),
                    );
                }
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {engine} ({width}x{height}, {} of {frames} frames, seed {seed}) -> {}",
                    session.frames(),
                    output.display()
                );
            }
        }
    }

    Ok(())
}

/// Parses an `x,y` pointer position.
fn parse_pointer(spec: &str) -> Result<DVec2, CliError> {
    let component = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|_| CliError::Input(format!("invalid --pointer, expected x,y: {spec}")))
    };
    match spec.split_once(',') {
        Some((x, y)) => Ok(dvec2(component(x)?, component(y)?)),
        None => Err(CliError::Input(format!(
            "invalid --pointer, expected x,y: {spec}"
        ))),
    }
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
