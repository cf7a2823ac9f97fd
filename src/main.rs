use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};

use kommundata::filter::parse_range_predicate;
use kommundata::utils::logging::{
    create_spinner, finish_spinner, print_comparison, print_dataset_summary, print_details,
    print_insights, print_page,
};
use kommundata::{
    Averages, DashboardConfig, DashboardView, Dataset, FavoritesRepository, FilterSet,
    JsonFileFavorites, KommunError, MunicipalityRecord, Paginator, RecordSource, RecordStore,
    SortSpec, compare_municipalities, insights,
};

#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

/// Explore Swedish municipality statistics
#[derive(Parser)]
#[command(name = "kommundata")]
#[command(about = "kommundata - Search, sort and compare Swedish municipalities", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Record source: API base URL, .json export, or .parquet file or directory
    #[arg(short, long, global = true, value_name = "SOURCE")]
    source: Option<String>,

    /// File holding favorite municipality ids
    #[arg(long, global = true, default_value = "favorites.json")]
    favorites_file: PathBuf,

    /// Fail on the first invalid record instead of skipping it
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List municipalities matching the filters
    List {
        #[command(flatten)]
        view: ViewArgs,

        /// Page to show (1-indexed)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Records per page
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Show one municipality in detail
    Show {
        /// Municipality id
        id: String,
    },
    /// Compare up to three municipalities side by side
    Compare {
        /// Municipality ids
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Best municipality per metric and national averages
    Insights {
        #[command(flatten)]
        view: ViewArgs,

        /// Number of leading municipalities to list
        #[arg(long, default_value = "10")]
        top: usize,
    },
    /// Manage favorite municipalities
    #[command(subcommand)]
    Favorites(FavoritesCommand),
}

/// Filter and sort flags shared by `list` and `insights`
#[derive(Args)]
struct ViewArgs {
    /// Case-insensitive name search
    #[arg(short, long)]
    query: Option<String>,

    /// Numeric range filter, e.g. safety_score=60..100
    #[arg(short, long = "range", value_name = "FIELD=LO..HI")]
    ranges: Vec<String>,

    /// Sort as FIELD-ORDER, e.g. name-asc or price_per_sqm-desc
    #[arg(long, default_value = "population-desc")]
    sort: String,
}

impl ViewArgs {
    fn into_view(
        self,
        records: Vec<MunicipalityRecord>,
        paginator: Paginator,
    ) -> anyhow::Result<DashboardView> {
        let mut filters = FilterSet::dashboard_defaults();
        if let Some(query) = self.query {
            filters.set_query(query);
        }
        for arg in &self.ranges {
            let (field, range) =
                parse_range_predicate(arg).with_context(|| format!("Bad --range '{arg}'"))?;
            filters.set_range(field, range);
        }
        let sort = SortSpec::from_str(&self.sort)
            .with_context(|| format!("Bad --sort '{}'", self.sort))?;

        let view = DashboardView::new(records, paginator)
            .with_filters(filters)
            .with_sort(sort);
        if view.filters().active_filter_count() > 0 {
            info!("{} active filters", view.filters().active_filter_count());
        }
        Ok(view)
    }
}

#[derive(Subcommand)]
enum FavoritesCommand {
    /// List favorite ids
    List,
    /// Add an id if absent, remove it if present
    Toggle {
        /// Municipality id
        id: String,
    },
}

fn open_store(config: &DashboardConfig) -> anyhow::Result<Box<dyn RecordStore>> {
    let source = config.source.as_deref().with_context(|| {
        format!(
            "No record source given; pass --source or set {}",
            kommundata::config::SOURCE_ENV
        )
    })?;
    let source = RecordSource::parse(source)?;
    info!("Reading municipalities from {source}");
    Ok(source.open(config)?)
}

async fn load_dataset(store: &dyn RecordStore) -> anyhow::Result<Dataset> {
    let spinner = create_spinner(Some("Hämtar kommundata..."));
    let dataset = Dataset::load(store).await;
    finish_spinner(&spinner, None);

    print_dataset_summary(&dataset);
    if let Some(error) = &dataset.error {
        bail!("Failed to load municipalities: {error}");
    }
    Ok(dataset)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let default_level = if cli.verbose > 0 { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = DashboardConfig::from_env().context("Invalid environment configuration")?;
    if cli.source.is_some() {
        config.source = cli.source;
    }
    config.strict_validation |= cli.strict;
    log::debug!("{config}");

    match cli.command {
        Commands::List {
            view,
            page,
            page_size,
        } => {
            let paginator = Paginator::new(page_size.unwrap_or(config.page_size))?;

            let store = open_store(&config)?;
            let dataset = load_dataset(store.as_ref()).await?;

            let mut view = view.into_view(dataset.records, paginator)?;
            view.go_to_page(page);
            if page > view.total_pages() && !view.filtered().is_empty() {
                warn!("Page {page} is past the last page ({})", view.total_pages());
            }

            let favorites = JsonFileFavorites::open(&cli.favorites_file)?;
            print_page(&view.page(), &favorites.list());
        }
        Commands::Show { id } => {
            let store = open_store(&config)?;
            let record = store
                .get(&id)
                .await?
                .ok_or_else(|| KommunError::NotFound(id.clone()))?;
            print_details(&record, &config.domestic_country);

            let favorites = JsonFileFavorites::open(&cli.favorites_file)?;
            if favorites.get(&record.id) {
                println!("★ Favorit");
            }
        }
        Commands::Compare { ids } => {
            let store = open_store(&config)?;
            let records = compare_municipalities(store.as_ref(), &ids).await?;
            print_comparison(&records);
        }
        Commands::Insights { view, top } => {
            let store = open_store(&config)?;
            let dataset = load_dataset(store.as_ref()).await?;

            let view = view.into_view(dataset.records, Paginator::new(config.page_size)?)?;
            let records = view.filtered();
            print_insights(&insights(records), &Averages::of(records));
            println!("Topp {top} ({}):", view.sort_spec());
            for (rank, record) in view.leading(top).iter().enumerate() {
                println!(
                    "  {}. {} ({})",
                    rank + 1,
                    record.name,
                    kommundata::format::format_number(record.population)
                );
            }
        }
        Commands::Favorites(FavoritesCommand::List) => {
            let favorites = JsonFileFavorites::open(&cli.favorites_file)?;
            for id in favorites.list() {
                println!("{id}");
            }
        }
        Commands::Favorites(FavoritesCommand::Toggle { id }) => {
            let mut favorites = JsonFileFavorites::open(&cli.favorites_file)?;
            if favorites.toggle(&id)? {
                println!("Lade till {id} i favoriter");
            } else {
                println!("Tog bort {id} från favoriter");
            }
        }
    }

    Ok(())
}
