use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    /// Source file to convert
    pub input: PathBuf,

    /// Output file (defaults to the input path with the format's extension)
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Output format: pdf or txt
    #[clap(short, long, default_value = "pdf")]
    pub format: String,

    /// Force a grammar by language token (e.g. "py", "rust") instead of
    /// detecting it from the file
    #[clap(short, long)]
    pub grammar: Option<String>,

    /// Theme TOML file mapping token-kind categories to styles
    #[clap(short, long)]
    pub theme: Option<PathBuf>,

    /// Page size: "letter", "a4", or WIDTHxHEIGHT in points
    #[clap(long, default_value = "letter")]
    pub page_size: String,

    /// Body font size in points
    #[clap(long)]
    pub font_size: Option<f32>,

    /// Line height in points
    #[clap(long)]
    pub line_height: Option<f32>,

    /// Page margin on all four sides, in inches
    #[clap(long)]
    pub margin: Option<f32>,

    /// Hard-split column count for wrapping lines with no whitespace
    #[clap(long)]
    pub wrap_fallback: Option<usize>,
}
