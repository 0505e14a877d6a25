use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use pdf_compose::{
    ComposeOptions, HorizontalAlign, PageSizeMode, SkippedImage, VerticalAlign, image_details,
};
use pdf_compose_runtime::{ConvertCommand, ConvertUpdate, spawn_worker};
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "img2pdf", about = "Combine images into a PDF", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert images into one PDF
    Convert {
        /// Input images, in page order
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output PDF file or directory
        #[arg(short, long)]
        output: PathBuf,

        /// Page size mode
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Do not print page numbers
        #[arg(long)]
        no_page_numbers: bool,

        /// Number printed on the first page (1-999)
        #[arg(long)]
        start: Option<u32>,

        /// Horizontal position of the page number
        #[arg(long, value_enum)]
        h_align: Option<HAlignArg>,

        /// Vertical position of the page number
        #[arg(long, value_enum)]
        v_align: Option<VAlignArg>,

        /// Text printed before the page number (up to 10 characters)
        #[arg(long)]
        prefix: Option<String>,

        /// JPEG quality for embedded images (1-100)
        #[arg(long)]
        quality: Option<u8>,

        /// Document title
        #[arg(long)]
        title: Option<String>,

        /// Load settings from a JSON file, flags override it
        #[arg(long)]
        config: Option<PathBuf>,

        /// Save the effective settings to a JSON file
        #[arg(long)]
        save_config: Option<PathBuf>,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Show file details of images
    Info {
        #[arg(required = true, num_args = 1..)]
        images: Vec<PathBuf>,
    },

    /// List generated PDFs, newest first
    List {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Write the default settings to a JSON file
    Config {
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Fit,
    ScaleDown,
    NoScaling,
    Native,
    Grid,
}

#[derive(Clone, Copy, ValueEnum)]
enum HAlignArg {
    Start,
    Center,
    End,
}

#[derive(Clone, Copy, ValueEnum)]
enum VAlignArg {
    Top,
    Bottom,
}

impl From<ModeArg> for PageSizeMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Fit => Self::FitToA4,
            ModeArg::ScaleDown => Self::FitToA4ScaleDown,
            ModeArg::NoScaling => Self::NoScaling,
            ModeArg::Native => Self::ImageNativeSize,
            ModeArg::Grid => Self::GridPacked,
        }
    }
}

impl From<HAlignArg> for HorizontalAlign {
    fn from(arg: HAlignArg) -> Self {
        match arg {
            HAlignArg::Start => Self::Start,
            HAlignArg::Center => Self::Center,
            HAlignArg::End => Self::End,
        }
    }
}

impl From<VAlignArg> for VerticalAlign {
    fn from(arg: VAlignArg) -> Self {
        match arg {
            VAlignArg::Top => Self::Top,
            VAlignArg::Bottom => Self::Bottom,
        }
    }
}

/// Send one command and wait for its final update, echoing progress
async fn run_command(
    command_tx: &mpsc::UnboundedSender<ConvertCommand>,
    update_rx: &mut mpsc::UnboundedReceiver<ConvertUpdate>,
    command: ConvertCommand,
) -> Result<ConvertUpdate> {
    command_tx.send(command)?;

    while let Some(update) = update_rx.recv().await {
        match update {
            ConvertUpdate::Progress { current, total } => {
                eprint!("\rRendering page {}/{}", current, total);
                if current == total {
                    eprintln!();
                }
                let _ = std::io::stderr().flush();
            }
            ConvertUpdate::Error { message } => bail!(message),
            other => return Ok(other),
        }
    }

    bail!("Worker stopped unexpectedly")
}

fn print_skipped(skipped: &[SkippedImage]) {
    for s in skipped {
        println!("  Skipped {}: {}", s.description, s.reason);
    }
}

fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            mode,
            no_page_numbers,
            start,
            h_align,
            v_align,
            prefix,
            quality,
            title,
            config,
            save_config,
            stats_only,
        } => {
            let mut options = match &config {
                Some(path) => ComposeOptions::load(path).await?,
                None => ComposeOptions::default(),
            };

            if let Some(mode) = mode {
                options.page_size_mode = mode.into();
            }
            if no_page_numbers {
                options.page_numbers.show = false;
            }
            if let Some(start) = start {
                options.page_numbers.start_number = start;
            }
            if let Some(align) = h_align {
                options.page_numbers.horizontal_align = align.into();
            }
            if let Some(align) = v_align {
                options.page_numbers.vertical_align = align.into();
            }
            if let Some(prefix) = prefix {
                options.page_numbers.prefix_text = prefix;
            }
            if let Some(quality) = quality {
                options.jpeg_quality = quality;
            }
            if title.is_some() {
                options.title = title;
            }
            options.validate()?;

            if let Some(path) = &save_config {
                options.save(path).await?;
                log::info!("Saved settings to {}", path.display());
            }

            let (command_tx, mut update_rx) = spawn_worker();

            // Calculate and show statistics
            let stats = run_command(
                &command_tx,
                &mut update_rx,
                ConvertCommand::Stats {
                    images: input.clone(),
                    options: options.clone(),
                },
            )
            .await?;
            if let ConvertUpdate::Stats { stats, skipped } = stats {
                println!("Conversion Statistics:");
                println!("  Mode: {}", stats.mode.name());
                println!("  Source images: {}", stats.source_images);
                println!("  Output pages: {}", stats.output_pages);
                print_skipped(&skipped);
            }

            if stats_only {
                return Ok(());
            }

            let converted = run_command(
                &command_tx,
                &mut update_rx,
                ConvertCommand::Convert {
                    images: input,
                    options,
                    output,
                },
            )
            .await?;
            if let ConvertUpdate::Converted { report } = converted {
                print_skipped(&report.skipped);
                println!(
                    "Placed {} images on {} pages → {}",
                    report.images_placed,
                    report.pages,
                    report.output.display()
                );
            }
        }

        Commands::Info { images } => {
            for path in images {
                match image_details(&path) {
                    Ok(details) => println!(
                        "{}: {}x{} px, {}, {}",
                        details.file_name,
                        details.width,
                        details.height,
                        details
                            .format
                            .map(|f| format!("{:?}", f))
                            .unwrap_or_else(|| "unknown format".to_string()),
                        format_size(details.size_bytes)
                    ),
                    Err(e) => println!("{}: {}", path.display(), e),
                }
            }
        }

        Commands::List { dir } => {
            let (command_tx, mut update_rx) = spawn_worker();
            let update = run_command(&command_tx, &mut update_rx, ConvertCommand::ListOutputs { dir })
                .await?;
            if let ConvertUpdate::Outputs { entries } = update {
                if entries.is_empty() {
                    println!("No PDF files found");
                }
                for entry in entries {
                    println!(
                        "{}  {:>10}  {}",
                        entry.modified.format("%Y-%m-%d %H:%M"),
                        format_size(entry.size_bytes),
                        entry.path.display()
                    );
                }
            }
        }

        Commands::Config { output } => {
            ComposeOptions::default().save(&output).await?;
            println!("Default settings → {}", output.display());
        }
    }

    Ok(())
}
