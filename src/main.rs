use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

mod app;
mod browse;
mod config;
mod engine;
mod error;
mod loader;
mod modal;
mod models;
mod query;
mod report;
mod store;
mod view;

use app::RosterApp;
use browse::BrowseCommand;
use config::Config;
use loader::{DirectorySource, RosterSource};
use modal::ModalState;
use models::{SortDirection, SortKey, ViewMode};

#[derive(Parser)]
#[command(name = "roster-viewer")]
#[command(about = "Read-only roster viewer for Group Scholar member groups", long_about = None)]
struct Cli {
    /// Directory holding member files and registrations.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Category shown for members whose record has none
    #[arg(long, global = true)]
    default_category: Option<String>,
    /// Reference date for "member since" text (defaults to today)
    #[arg(long, global = true)]
    as_of: Option<NaiveDate>,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List members matching a search and group filter
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        group: Option<String>,
        #[arg(long, value_enum, default_value_t = SortKey::Id)]
        sort: SortKey,
        #[arg(long)]
        desc: bool,
        #[arg(long, value_enum, default_value_t = ViewMode::Primary)]
        view: ViewMode,
        /// Emit display rows as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one member with their registered IDs
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Summary counts across the whole roster
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// List the distinct member groups
    Groups,
    /// Interactive browser reading commands from stdin
    Browse,
    /// Write a small demo roster into a directory
    SampleData {
        #[arg(long, default_value = "data")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let config = Config::from_env(cli.data_dir, cli.default_category, cli.as_of);

    if let Commands::SampleData { out } = &cli.command {
        let written = loader::write_sample(out)
            .await
            .with_context(|| format!("failed to write sample data to {}", out.display()))?;
        println!("Wrote {written} sample members to {}.", out.display());
        return Ok(());
    }

    let mut app = RosterApp::new();
    let source = DirectorySource::new(&config.data_dir, &config.default_category);
    match source.load().await {
        Ok(store) => app.install(store),
        Err(err) => app.fail(err),
    }

    match cli.command {
        Commands::List {
            search,
            group,
            sort,
            desc,
            view,
            json,
        } => {
            let direction = if desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            app.search(search.as_deref().unwrap_or_default());
            app.filter_by_group(group.as_deref().unwrap_or_default());
            app.query_mut().set_sort(sort, direction);
            app.switch_view(view);

            let roster = app.snapshot(config.as_of).context("cannot list members")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&roster)?);
            } else {
                print!("{}", report::build_listing(&roster));
            }
        }
        Commands::Show { id, json } => {
            let payload = app.select_record(&id).context("cannot show member")?;
            if json {
                println!("{}", serde_json::to_string_pretty(payload)?);
            } else {
                print!("{}", report::build_member_detail(payload, &config.default_category));
            }
        }
        Commands::Stats { json } => {
            let stats = app.stats().context("cannot compute statistics")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{}", report::build_stats(&stats));
            }
        }
        Commands::Groups => {
            let groups = app.groups().context("cannot list groups")?;
            print!("{}", report::build_groups(&groups));
        }
        Commands::Browse => browse_loop(&mut app, &config).await?,
        Commands::SampleData { .. } => {}
    }

    Ok(())
}

async fn browse_loop(app: &mut RosterApp, config: &Config) -> anyhow::Result<()> {
    let roster = app.snapshot(config.as_of).context("cannot browse members")?;
    print!("{}", report::build_listing(&roster));
    println!("{}", browse::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match browse::parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            BrowseCommand::Search(text) => app.search(&text),
            BrowseCommand::Group(group) => app.filter_by_group(&group),
            BrowseCommand::Sort(key) => app.sort(key),
            BrowseCommand::View(mode) => app.switch_view(mode),
            BrowseCommand::Open(id) => {
                match app.select_record(&id) {
                    Ok(payload) => {
                        print!("{}", report::build_member_detail(payload, &config.default_category))
                    }
                    Err(err) => println!("{err}"),
                }
                continue;
            }
            BrowseCommand::Close => {
                if app.dismiss_modal() {
                    println!("Detail closed.");
                }
            }
            BrowseCommand::Click(target) => {
                if app.click(target) {
                    println!("Detail closed.");
                }
            }
            BrowseCommand::Press(key) => {
                app.press(key);
            }
            BrowseCommand::List => {}
            BrowseCommand::Stats => {
                print!("{}", report::build_stats(&app.stats()?));
                continue;
            }
            BrowseCommand::Groups => {
                print!("{}", report::build_groups(&app.groups()?));
                continue;
            }
            BrowseCommand::Help => {
                println!("{}", browse::HELP);
                continue;
            }
            BrowseCommand::Quit => break,
        }

        match app.modal() {
            ModalState::Open(payload) => {
                print!("{}", report::build_member_detail(payload, &config.default_category))
            }
            ModalState::Closed => print!("{}", report::build_listing(&app.snapshot(config.as_of)?)),
        }
    }

    Ok(())
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("roster_viewer=debug,warn")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
