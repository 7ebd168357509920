use std::error::Error;
use std::path::PathBuf;

use account_statement_pdf::config::{DEFAULT_INPUT_FILE, DEFAULT_LOGO_FILE, DEFAULT_OUTPUT_FILE};
use account_statement_pdf::fonts::{FontOptions, DEFAULT_FONT_FAMILY_NAME, FONTS_DIR_ENV};
use account_statement_pdf::StatementConfig;
use clap::Parser;
use log::error;

/// Renders an account statement JSON file to PDF and opens it.
///
/// Fonts are looked up in `--fonts-dir`, `STATEMENT_FONTS_DIR`, `assets/fonts`
/// next to the binary and the system Liberation Sans directories.
#[derive(Parser)]
#[command(author, version, about = "Render account statements to PDF")]
struct Cli {
    /// Statement JSON file.
    #[arg(short, long, env = "STATEMENT_INPUT", default_value = DEFAULT_INPUT_FILE)]
    input: PathBuf,

    /// Logo image placed at the top of the first page.
    #[arg(short, long, env = "STATEMENT_LOGO", default_value = DEFAULT_LOGO_FILE)]
    logo: PathBuf,

    /// Output PDF file; an existing file is replaced.
    #[arg(short, long, env = "STATEMENT_OUTPUT", default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Directory holding the font family files.
    #[arg(long, env = FONTS_DIR_ENV)]
    fonts_dir: Option<PathBuf>,

    /// Font family name, loaded from `<family>-Regular.ttf` and its siblings.
    #[arg(long, env = "STATEMENT_FONT_FAMILY", default_value = DEFAULT_FONT_FAMILY_NAME)]
    font_family: String,

    /// Operating system whose viewer command is used (linux, windows, macos).
    #[arg(long)]
    platform: Option<String>,

    /// Write the PDF without opening it.
    #[arg(long)]
    no_open: bool,
}

impl From<Cli> for StatementConfig {
    fn from(cli: Cli) -> Self {
        StatementConfig {
            input: cli.input,
            logo: cli.logo,
            output: cli.output,
            fonts: FontOptions::default()
                .with_directory(cli.fonts_dir)
                .with_family(cli.font_family),
            open_viewer: !cli.no_open,
            platform: cli.platform,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = StatementConfig::from(Cli::parse());

    match account_statement_pdf::run(&config) {
        Ok(generated) => {
            println!("PDF generated successfully.");
            println!(
                "Generated {} ({} bytes)",
                generated.path.display(),
                generated.size
            );
        }
        Err(err) => {
            error!("{}", error_chain(&err));
            std::process::exit(1);
        }
    }
}

fn error_chain(mut error: &(dyn Error + 'static)) -> String {
    let mut message = error.to_string();
    while let Some(source) = error.source() {
        message.push_str(": ");
        message.push_str(&source.to_string());
        error = source;
    }
    message
}
