use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use pdf_async_runtime::{ComposeCommand, ComposeUpdate, worker_task};
use pdf_quadrant::{CompositionPlan, DispatchOptions, Quadrant, SheetManifest, SystemSpooler};
use std::path::PathBuf;
use tokio::sync::mpsc;

mod logger;

#[derive(Parser)]
#[command(
    name = "papersave",
    about = "Place up to four PDFs on the quadrants of one page",
    version
)]
struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose the sheet and send it to the printer
    Print {
        #[command(flatten)]
        sheet: SheetArgs,

        #[command(flatten)]
        dispatch: DispatchArgs,
    },

    /// Compose the sheet and save it as a PDF file
    Download {
        #[command(flatten)]
        sheet: SheetArgs,

        #[command(flatten)]
        dispatch: DispatchArgs,
    },

    /// Show where each source would be placed, without writing anything
    Plan {
        #[command(flatten)]
        sheet: SheetArgs,
    },
}

#[derive(Args)]
struct SheetArgs {
    /// JSON manifest with the paper size and quadrant files
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Output paper size (overrides the manifest)
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// PDF for the top-left quadrant
    #[arg(long)]
    top_left: Option<PathBuf>,

    /// PDF for the top-right quadrant
    #[arg(long)]
    top_right: Option<PathBuf>,

    /// PDF for the bottom-left quadrant
    #[arg(long)]
    bottom_left: Option<PathBuf>,

    /// PDF for the bottom-right quadrant
    #[arg(long)]
    bottom_right: Option<PathBuf>,

    /// Write the assembled manifest to this file
    #[arg(long)]
    save_manifest: Option<PathBuf>,
}

#[derive(Args)]
struct DispatchArgs {
    /// Directory for saved files (downloads and print fallbacks)
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// File name prefix for saved files
    #[arg(long, default_value = "papersave")]
    prefix: String,

    /// Command used to print; the PDF path is appended
    #[arg(long, default_value = "lp")]
    print_command: String,

    /// Extra argument for the print command (repeatable)
    #[arg(long = "print-arg", allow_hyphen_values = true)]
    print_args: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    Letter,
}

impl From<PaperArg> for pdf_quadrant::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::Letter => Self::Letter,
        }
    }
}

impl From<DispatchArgs> for DispatchOptions {
    fn from(args: DispatchArgs) -> Self {
        Self {
            file_prefix: args.prefix,
            output_dir: args.output_dir,
            print_command: args.print_command,
            print_args: args.print_args,
        }
    }
}

impl SheetArgs {
    /// Merge the manifest file (if any) with per-quadrant flags
    async fn into_manifest(self) -> Result<SheetManifest> {
        let mut manifest = match &self.manifest {
            Some(path) => SheetManifest::load(path)
                .await
                .with_context(|| format!("Failed to load manifest {}", path.display()))?,
            None => SheetManifest::default(),
        };

        if let Some(paper) = self.paper {
            manifest.paper_size = paper.into();
        }

        let flags = [
            (Quadrant::TopLeft, self.top_left),
            (Quadrant::TopRight, self.top_right),
            (Quadrant::BottomLeft, self.bottom_left),
            (Quadrant::BottomRight, self.bottom_right),
        ];
        for (quadrant, path) in flags {
            if path.is_some() {
                manifest.set(quadrant, path);
            }
        }

        manifest.validate()?;

        if let Some(path) = &self.save_manifest {
            manifest.save(path).await?;
            log::info!("Wrote manifest {}", path.display());
        }

        Ok(manifest)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logger::CliLogger::new(level).init()?;

    let (command, spooler) = match cli.command {
        Commands::Print { sheet, dispatch } => {
            let options = DispatchOptions::from(dispatch);
            let spooler = SystemSpooler::from_options(&options);
            let request = load_request(sheet).await?;
            (ComposeCommand::Print { request, options }, spooler)
        }
        Commands::Download { sheet, dispatch } => {
            let request = load_request(sheet).await?;
            let options = DispatchOptions::from(dispatch);
            (
                ComposeCommand::Download { request, options },
                SystemSpooler::default(),
            )
        }
        Commands::Plan { sheet } => {
            let request = load_request(sheet).await?;
            (ComposeCommand::Plan { request }, SystemSpooler::default())
        }
    };

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, mut update_rx) = mpsc::unbounded_channel();
    let worker = tokio::spawn(worker_task(command_rx, update_tx, spooler));

    command_tx
        .send(command)
        .map_err(|_| anyhow::anyhow!("Composition worker is not running"))?;
    drop(command_tx);

    let update = update_rx
        .recv()
        .await
        .context("Composition worker stopped without a result")?;
    worker.await?;

    report(update)
}

async fn load_request(sheet: SheetArgs) -> Result<pdf_quadrant::CompositionRequest> {
    let manifest = sheet.into_manifest().await?;
    let request = manifest.into_request().await?;
    println!(
        "Sheet: {:?}, {} of 4 quadrants assigned",
        request.paper_size(),
        request.assigned_count()
    );
    Ok(request)
}

fn report(update: ComposeUpdate) -> Result<()> {
    match update {
        ComposeUpdate::PrintSubmitted => println!("Sent to printer"),
        ComposeUpdate::PrintFallback { path } => {
            println!("Printer unavailable, saved → {}", path.display());
        }
        ComposeUpdate::Downloaded { path } => println!("Saved → {}", path.display()),
        ComposeUpdate::Planned { plan } => print_plan(&plan),
        ComposeUpdate::Error { message } => bail!(message),
    }
    Ok(())
}

fn print_plan(plan: &CompositionPlan) {
    println!("Page: {} x {} pt", plan.page_width_pt, plan.page_height_pt);
    for quadrant in &plan.quadrants {
        let region = &quadrant.region;
        print!(
            "  {:<13} region ({}, {}) {} x {}",
            quadrant.quadrant.to_string(),
            region.x,
            region.y,
            region.width,
            region.height
        );
        match &quadrant.source {
            Some(source) => {
                let p = &source.placement;
                println!(
                    "  {} [{} x {} pt] scale {:.4} at ({:.2}, {:.2})",
                    source.name, source.width, source.height, p.scale, p.draw_x, p.draw_y
                );
                if source.page_count > 1 {
                    println!("{:>17}only the first of {} pages is used", "", source.page_count);
                }
            }
            None => println!("  (blank)"),
        }
    }
}
