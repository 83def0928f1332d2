use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use snapview::cli::{self, ShowOptions, Style};
use snapview::loader::Source;
use snapview::sort::SortDirection;

/// snapview — sortable, colour-coded viewer for snapper metrics reports.
#[derive(Parser)]
#[command(name = "snapview", version, about)]
struct Cli {
    /// Report document: an http(s) URL or a local path.
    #[arg(long, global = true, default_value = "data.json")]
    source: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Selection {
    /// Index of the report to display (see `reports`). Defaults to the first.
    #[arg(long)]
    report: Option<String>,

    /// Sort direction for snapper names.
    #[arg(long, value_enum, default_value_t = SortDirection::Ascending)]
    sort: SortDirection,
}

impl Selection {
    fn into_options(self) -> ShowOptions {
        ShowOptions {
            report: self.report,
            direction: self.sort,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the available reports.
    Reports,

    /// Display a report as a table.
    Show {
        #[command(flatten)]
        selection: Selection,

        /// Output style.
        #[arg(long, value_enum, default_value_t = Style::Text)]
        style: Style,

        /// Disable ANSI colours in text output.
        #[arg(long)]
        no_color: bool,
    },

    /// Write a report as a standalone HTML page.
    Export {
        #[command(flatten)]
        selection: Selection,

        /// Output file.
        #[arg(long, default_value = "report.html")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snapview=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let source = Source::parse(&args.source)?;
    let mut state = cli::load_state(&source);

    let output = match args.command {
        Commands::Reports => cli::cmd_reports(&state)?,
        Commands::Show {
            selection,
            style,
            no_color,
        } => {
            let color = !no_color && std::io::stdout().is_terminal();
            cli::cmd_show(&mut state, &selection.into_options(), style, color)?
        }
        Commands::Export { selection, out } => {
            cli::cmd_export(&mut state, &selection.into_options(), &out)?
        }
    };
    print!("{output}");
    Ok(())
}
