use chrono::{Local, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use proforma::config::{
    config_dir, load_config, load_config_or_default, resolve_base_url, BASE_URL_ENV,
    CONFIG_TEMPLATE,
};
use proforma::record::parse_timestamp;
use proforma::view::render_page;
use proforma::{
    load_all, load_into, Action, ApiClient, Config, DateRange, FilterState, PageState,
    ProformaError, Result, RowsPerPage, Store, Tab,
};

#[derive(Parser)]
#[command(name = "proforma")]
#[command(version, about = "List sales and telecaller proforma invoices", long_about = None)]
struct Cli {
    /// Path to config directory (default: XDG config dir)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// API base URL, overrides [api] base_url in config.toml
    #[arg(long, global = true, env = BASE_URL_ENV)]
    base_url: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config.toml
    Init,

    /// List proformas for a tab
    List {
        #[command(flatten)]
        view: ViewArgs,

        /// Print the current page as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Open a row's detail view (prints the navigation handoff)
    Open {
        /// Row number from the S.NO column of 'list'
        serial: usize,

        #[command(flatten)]
        view: ViewArgs,

        /// Write the handoff JSON to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show configuration and how many proformas each endpoint returns
    Status,
}

/// Filter and paging options shared by 'list' and 'open'
#[derive(Args)]
struct ViewArgs {
    /// Which role's proformas to show
    #[arg(short, long, value_enum, default_value = "sales")]
    tab: Tab,

    /// Date range filter (default: from config, else last-365-days)
    #[arg(short, long, value_enum)]
    range: Option<DateRange>,

    /// Search by employee ID or party name (case-insensitive)
    #[arg(short, long, default_value = "")]
    search: String,

    /// Page index, starting at 0
    #[arg(short, long, default_value_t = 0)]
    page: usize,

    /// Rows per page: 5, 10 or 25 (default: from config)
    #[arg(short = 'n', long)]
    rows_per_page: Option<RowsPerPage>,

    /// Evaluate date ranges as of this moment (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
    #[arg(long, value_name = "DATE")]
    as_of: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays usable for tables and JSON
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "proforma=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };
    let base_url = cli.base_url.as_deref();

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::List { view, json } => cmd_list(&cfg_dir, base_url, &view, json),
        Commands::Open {
            serial,
            view,
            output,
        } => cmd_open(&cfg_dir, base_url, serial, &view, output),
        Commands::Status => cmd_status(&cfg_dir, base_url),
    }
}

/// Initialize config directory with the template file
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(ProformaError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    println!("Initialized proforma config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Point it at your backend:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. List proformas:            proforma list --tab sales");

    Ok(())
}

fn parse_as_of(as_of: Option<&str>) -> Result<NaiveDateTime> {
    match as_of {
        Some(s) => parse_timestamp(s).ok_or_else(|| ProformaError::InvalidAsOf(s.to_string())),
        None => Ok(Local::now().naive_local()),
    }
}

fn client_for(config: &Config, base_url: Option<&str>) -> Result<ApiClient> {
    let url = resolve_base_url(config, base_url)?;
    Ok(ApiClient::new(url, config.api.timeout()))
}

/// Load both listings, then replay the command-line choices as view actions
fn build_store(
    cfg_dir: &Path,
    base_url: Option<&str>,
    view: &ViewArgs,
) -> Result<(Store, NaiveDateTime)> {
    let config = load_config_or_default(cfg_dir)?;
    let now = parse_as_of(view.as_of.as_deref())?;
    let client = client_for(&config, base_url)?;

    let mut store = Store::new(
        FilterState {
            date_range: config.list.date_range,
            ..FilterState::default()
        },
        PageState {
            page: 0,
            rows_per_page: config.list.rows_per_page,
        },
    );
    load_into(&client, &mut store);

    // Rows-per-page resets the page, so it goes before the page choice
    if let Some(rows) = view.rows_per_page {
        store.dispatch(Action::SetRowsPerPage(rows));
    }
    store.dispatch(Action::SetPage(view.page));
    store.dispatch(Action::SelectTab(view.tab));
    if let Some(range) = view.range {
        store.dispatch(Action::SetDateRange(range));
    }
    store.dispatch(Action::SetSearch(view.search.clone()));

    Ok((store, now))
}

/// List one page of proformas
fn cmd_list(cfg_dir: &Path, base_url: Option<&str>, view: &ViewArgs, json: bool) -> Result<()> {
    let (store, now) = build_store(cfg_dir, base_url, view)?;

    if json {
        let visible = store.visible(now);
        println!("{}", serde_json::to_string_pretty(&visible)?);
    } else {
        println!("{}", render_page(&store, now));
    }

    Ok(())
}

/// Hand the selected row to its detail view
fn cmd_open(
    cfg_dir: &Path,
    base_url: Option<&str>,
    serial: usize,
    view: &ViewArgs,
    output: Option<PathBuf>,
) -> Result<()> {
    let (store, now) = build_store(cfg_dir, base_url, view)?;

    let navigation = store
        .select(serial, now)
        .ok_or_else(|| ProformaError::RowNotOnPage {
            serial,
            page: store.page().page,
            shown: store.visible(now).len(),
        })?;
    let handoff = navigation.to_json()?;

    match output {
        Some(path) => {
            std::fs::write(&path, handoff)?;
            println!(
                "Opened {} in {}",
                navigation.state.proforma_data.pro_forma_number, navigation.destination
            );
            println!("  Saved: {}", path.display());
        }
        None => println!("{handoff}"),
    }

    Ok(())
}

fn format_count(count: Option<usize>) -> String {
    count.map_or_else(|| "unavailable".to_string(), |n| n.to_string())
}

/// Show configuration and endpoint record counts
fn cmd_status(cfg_dir: &Path, base_url: Option<&str>) -> Result<()> {
    if !cfg_dir.exists() && base_url.is_none() {
        return Err(ProformaError::ConfigNotFound(cfg_dir.to_path_buf()));
    }

    let config = if cfg_dir.exists() {
        load_config(cfg_dir)?
    } else {
        Config::default()
    };
    let client = client_for(&config, base_url)?;

    println!("Proforma Status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    println!("Sales endpoint:   {}", client.url(Tab::Sales));
    println!("Telecaller:       {}", client.url(Tab::Telecaller));
    println!("Rows per page:    {}", config.list.rows_per_page);
    match config.api.timeout() {
        Some(timeout) => println!("Timeout:          {}s", timeout.as_secs()),
        None => println!("Timeout:          none"),
    }
    println!();

    let mut sales = None;
    let mut telecaller = None;
    for action in load_all(&client) {
        match action {
            Action::SalesLoaded(records) => sales = Some(records.len()),
            Action::TelecallerLoaded(records) => telecaller = Some(records.len()),
            _ => {}
        }
    }

    println!("Sales proformas:      {}", format_count(sales));
    println!("Telecaller proformas: {}", format_count(telecaller));

    Ok(())
}
