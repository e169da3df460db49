use anyhow::{bail, Context, Result};
use cli::Cli;
use srcprint::{Converter, OutputFormat, PageGeometry, Theme};
use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    if let Err(e) = try_main() {
        eprintln!("{}: {e:#}", console::style("Error").red());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<()> {
    use clap::Parser;
    let cli = Cli::parse();

    let format: OutputFormat = cli.format.parse()?;
    let geometry = build_geometry(&cli)?;

    let mut converter = Converter::new().with_geometry(geometry);

    if let Some(theme_path) = &cli.theme {
        let contents = std::fs::read_to_string(theme_path)
            .with_context(|| format!("Failed to read theme file {}", theme_path.display()))?;
        let theme = Theme::from_toml(&contents)
            .with_context(|| format!("Failed to parse theme file {}", theme_path.display()))?;
        converter = converter.with_theme(theme);
    }

    if let Some(grammar) = &cli.grammar {
        converter = converter.with_grammar_override(grammar.as_str());
    }

    let outfile = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension(format.extension()));

    let rendered = converter.convert_file(&cli.input, format)?;
    rendered
        .write_to(&outfile)
        .with_context(|| format!("Failed to write {}", outfile.display()))?;

    println!("Wrote {}", outfile.display());
    Ok(())
}

fn build_geometry(cli: &Cli) -> Result<PageGeometry> {
    let mut geometry = match cli.page_size.to_ascii_lowercase().as_str() {
        "letter" => PageGeometry::letter(),
        "a4" => PageGeometry::a4(),
        custom => {
            let Some((width, height)) = parse_dimensions(custom) else {
                bail!("Invalid page size `{custom}`, expected `letter`, `a4`, or WIDTHxHEIGHT in points");
            };
            PageGeometry {
                page_width_pt: width,
                page_height_pt: height,
                ..PageGeometry::letter()
            }
        }
    };

    if let Some(font_size) = cli.font_size {
        geometry.font_size_pt = font_size;
    }
    if let Some(line_height) = cli.line_height {
        geometry.line_height_pt = line_height;
    }
    if let Some(margin_in) = cli.margin {
        let margin_pt = margin_in * 72.0;
        geometry.margin_top_pt = margin_pt;
        geometry.margin_bottom_pt = margin_pt;
        geometry.margin_left_pt = margin_pt;
        geometry.margin_right_pt = margin_pt;
    }
    geometry.wrap_fallback_columns = cli.wrap_fallback;

    Ok(geometry)
}

fn parse_dimensions(spec: &str) -> Option<(f32, f32)> {
    let (width, height) = spec.split_once('x')?;
    let width: f32 = width.trim().parse().ok()?;
    let height: f32 = height.trim().parse().ok()?;
    if width > 0.0 && height > 0.0 {
        Some((width, height))
    } else {
        None
    }
}
