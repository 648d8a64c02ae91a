use clap::{Parser, Subcommand};
use colored::Colorize;
use paleta::cli;
use paleta::config::PaletaConfig;
use paleta::contrast;
use paleta::credentials::{CredentialProvider, EnvCredentialProvider};
use paleta::error::PaletteError;
use paleta::export::ExportFormat;
use paleta::gemini::GeminiClient;
use paleta::history::HistoryStore;
use paleta::preview;
use paleta::types::{FullPaletteResponse, Model};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "paleta")]
#[command(version, about = "Generate a professional 5-color brand palette from three words", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a palette from three comma-separated descriptive words
    Generate {
        /// e.g. "bold, creative, modern"
        words: String,

        /// Model to use (defaults to the configured model)
        #[arg(long, value_enum)]
        model: Option<Model>,

        /// Do not record the result in history
        #[arg(long)]
        no_history: bool,
    },

    /// Print a stored palette in an export format
    Export {
        /// Output format
        #[arg(value_enum)]
        format: ExportFormat,

        /// History entry to export (0 = newest)
        #[arg(long, default_value = "0")]
        entry: usize,
    },

    /// List stored palettes, or show one in full
    History {
        /// Show this entry in full instead of the gallery
        #[arg(long)]
        entry: Option<usize>,
    },

    /// Write a stored preview mockup to a file
    Preview {
        /// History entry (0 = newest)
        #[arg(long, default_value = "0")]
        entry: usize,

        /// Destination file (prints the document to stdout when absent)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Open the document in the system viewer
        #[arg(long)]
        open: bool,
    },

    /// Recompute WCAG contrast ratios locally and compare with the
    /// service-reported figures
    Check {
        /// History entry (0 = newest)
        #[arg(long, default_value = "0")]
        entry: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter_layer = if cli.debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::new("info")
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Paleta v{}", env!("CARGO_PKG_VERSION"));

    let config = PaletaConfig::resolve()?;

    match cli.command {
        Commands::Generate {
            words,
            model,
            no_history,
        } => cmd_generate(&config, &words, model, no_history),
        Commands::Export { format, entry } => cmd_export(&config, format, entry),
        Commands::History { entry } => cmd_history(&config, entry),
        Commands::Preview { entry, out, open } => cmd_preview(&config, entry, out, open),
        Commands::Check { entry } => cmd_check(&config, entry),
    }
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_generate(
    config: &PaletaConfig,
    words_input: &str,
    model_flag: Option<Model>,
    no_history: bool,
) -> anyhow::Result<()> {
    let provider = EnvCredentialProvider::new();

    // Credential gate. Selection completing is not proof of a key; the
    // status is re-queried before proceeding.
    if !provider.has_key() {
        provider.request_selection()?;
        if !provider.has_key() {
            return Err(PaletteError::MissingCredential.into());
        }
    }

    let words = cli::parse_words(words_input)?;
    let model = cli::resolve_model(model_flag, config);
    let api_key = provider.api_key().ok_or(PaletteError::MissingCredential)?;

    println!(
        "Generating a palette for {} with {}...",
        format!("\"{}\"", words.join(", ")).bold(),
        model
    );

    let rt = tokio::runtime::Runtime::new()?;
    let generated = rt.block_on(async {
        // Fresh client per call so a just-selected key takes effect.
        let client = GeminiClient::new(&api_key)
            .with_base_url(&config.api.base_url)
            .with_timeout(Duration::from_secs(config.api.timeout_secs));
        client.generate(&words, model).await
    });

    let response = match generated {
        Ok(response) => response,
        Err(PaletteError::InvalidApiKey) => {
            // Revoke the credential-present state: the gate reappears on
            // the next run until a valid key is selected.
            eprintln!("{}", PaletteError::InvalidApiKey.to_string().bright_red());
            provider.request_selection()?;
            return Err(PaletteError::InvalidApiKey.into());
        }
        Err(e) => return Err(e.into()),
    };

    display_response(&response);

    let bad_refs = preview::disallowed_references(&response.preview_html);
    if !bad_refs.is_empty() {
        warn!(count = bad_refs.len(), "preview references unexpected external resources");
        for url in &bad_refs {
            eprintln!("{} unexpected preview reference: {}", "!".bright_yellow(), url);
        }
    }

    if no_history {
        return Ok(());
    }
    let mut store = HistoryStore::load(config.history_path());
    store.record(response)?;
    println!(
        "\nSaved to history ({} of {} entries).",
        store.len(),
        paleta::history::MAX_ENTRIES
    );
    Ok(())
}

fn cmd_export(config: &PaletaConfig, format: ExportFormat, entry: usize) -> anyhow::Result<()> {
    let store = HistoryStore::load(config.history_path());
    let response = cli::select_entry(store.entries(), entry)?;
    println!("{}", format.render(&response.palette));
    Ok(())
}

fn cmd_history(config: &PaletaConfig, entry: Option<usize>) -> anyhow::Result<()> {
    let store = HistoryStore::load(config.history_path());

    match entry {
        Some(index) => {
            let response = cli::select_entry(store.entries(), index)?;
            display_response(response);
        }
        None => {
            if store.is_empty() {
                println!("No palettes yet. Run `paleta generate \"three, descriptive, words\"`.");
                return Ok(());
            }
            println!("{}", "Recent palettes".bold());
            for (index, response) in store.entries().iter().enumerate() {
                let swatches: String = response
                    .palette
                    .entries()
                    .iter()
                    .map(|(_, color)| swatch(color.rgb))
                    .collect();
                let names: Vec<&str> = response
                    .palette
                    .entries()
                    .iter()
                    .map(|(_, color)| color.name.as_str())
                    .collect();
                println!("  {:>2}  {}  {}", index, swatches, names.join(", ").dimmed());
            }
        }
    }
    Ok(())
}

fn cmd_preview(
    config: &PaletaConfig,
    entry: usize,
    out: Option<PathBuf>,
    open: bool,
) -> anyhow::Result<()> {
    let store = HistoryStore::load(config.history_path());
    let response = cli::select_entry(store.entries(), entry)?;
    let html = &response.preview_html;

    for url in preview::disallowed_references(html) {
        eprintln!("{} unexpected preview reference: {}", "!".bright_yellow(), url);
    }

    match out {
        Some(path) => {
            preview::write_to(html, &path)?;
            println!("Preview written to {}", path.display());
            if open {
                open_in_viewer(&path)?;
            }
        }
        None if open => {
            // Transient handle: the file disappears when this scope ends.
            let handle = preview::write_temp(html)?;
            open_in_viewer(handle.path())?;
            println!("Previewing {} - press Enter to close.", handle.path().display());
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
        }
        None => {
            println!("{}", html);
        }
    }
    Ok(())
}

fn cmd_check(config: &PaletaConfig, entry: usize) -> anyhow::Result<()> {
    let store = HistoryStore::load(config.history_path());
    let response = cli::select_entry(store.entries(), entry)?;

    let findings = contrast::audit(response);
    if findings.is_empty() {
        println!("No verifiable combinations in this entry.");
        return Ok(());
    }

    println!("{}", "Local WCAG audit (reported vs computed)".bold());
    let mut disagreements = 0;
    for finding in &findings {
        let (fg, bg) = finding.combination;
        let mark = if finding.is_consistent() {
            "✓".bright_green()
        } else {
            disagreements += 1;
            "✗".bright_red()
        };
        println!(
            "  {} {:<24} reported {:>5.2}:1  computed {:>5.2}:1  AA {}  AAA {}",
            mark,
            format!("{} on {}", fg, bg),
            finding.reported_ratio,
            finding.computed_ratio,
            pass_fail(finding.computed_aa),
            pass_fail(finding.computed_aaa),
        );
    }

    if disagreements == 0 {
        println!("\nAll {} combinations agree with the reported figures.", findings.len());
    } else {
        println!(
            "\n{} of {} combinations disagree with the reported figures.",
            disagreements,
            findings.len()
        );
    }
    Ok(())
}

// ============================================================================
// Display
// ============================================================================

fn swatch(rgb: [u8; 3]) -> String {
    "  ".on_truecolor(rgb[0], rgb[1], rgb[2]).to_string()
}

fn pass_fail(pass: bool) -> colored::ColoredString {
    if pass {
        "pass".bright_green()
    } else {
        "fail".bright_red()
    }
}

fn display_response(response: &FullPaletteResponse) {
    display_palette(response);
    display_guidelines(response);
    display_accessibility(response);
}

fn display_palette(response: &FullPaletteResponse) {
    println!();
    println!("{}", "Palette".bold());
    for (role, color) in response.palette.entries() {
        println!(
            "  {} {:<12} {:<18} {}  rgb({}, {}, {})  hsl({}, {}%, {}%)",
            swatch(color.rgb),
            role.to_string().bright_cyan(),
            color.name,
            color.hex.bold(),
            color.rgb[0],
            color.rgb[1],
            color.rgb[2],
            color.hsl[0],
            color.hsl[1],
            color.hsl[2],
        );
    }
}

fn display_guidelines(response: &FullPaletteResponse) {
    if response.usage_guidelines.is_empty() {
        return;
    }
    println!();
    println!("{}", "Usage".bold());
    for guideline in &response.usage_guidelines {
        println!("  {}", guideline.color.to_string().bright_cyan());
        for item in &guideline.dos {
            println!("    {} {}", "+".bright_green(), item);
        }
        for item in &guideline.donts {
            println!("    {} {}", "-".bright_red(), item);
        }
        println!("    {}", guideline.psychology.dimmed());
    }
}

fn display_accessibility(response: &FullPaletteResponse) {
    if response.accessibility.is_empty() {
        return;
    }
    println!();
    println!("{}", "Accessibility (as reported by the service)".bold());
    for info in &response.accessibility {
        let (fg, bg) = info.combination;
        println!(
            "  {:<24} {:>5.2}:1  AA {}  AAA {}",
            format!("{} on {}", fg, bg),
            info.contrast_ratio,
            pass_fail(info.wcag_aa),
            pass_fail(info.wcag_aaa),
        );
    }
}

fn open_in_viewer(path: &Path) -> anyhow::Result<()> {
    let status = if cfg!(target_os = "macos") {
        std::process::Command::new("open").arg(path).status()
    } else if cfg!(target_os = "windows") {
        std::process::Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(path)
            .status()
    } else {
        std::process::Command::new("xdg-open").arg(path).status()
    }?;

    if !status.success() {
        anyhow::bail!("viewer exited with {}", status);
    }
    Ok(())
}
