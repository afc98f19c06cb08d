use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use listing_core::{
    query::FilterField, status::classify, HttpDatasetFetcher, ListingClient, ViewState,
};
use shared::domain::DateRange;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod output;

use config::{load_settings, DEFAULT_CONFIG_FILE};

#[derive(Parser, Debug)]
#[command(name = "game-listing", about = "Browse the game release catalog")]
struct Cli {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[arg(long)]
    api_base_url: Option<String>,
    #[arg(long)]
    page_size: Option<u32>,
    #[arg(long)]
    featured_limit: Option<usize>,
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Group today's games by date instead of listing them flat.
    #[arg(long)]
    grouped: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load every view at once, as the landing page does.
    Overview,
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        publisher: Option<String>,
        #[arg(long)]
        platform: Option<String>,
        /// Only games flagged as featured.
        #[arg(long)]
        featured: bool,
        #[arg(long, requires = "end_date")]
        start_date: Option<NaiveDate>,
        #[arg(long, requires = "start_date")]
        end_date: Option<NaiveDate>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    Options,
    Today,
    Week {
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i64,
    },
    Featured,
    /// Show which status tag a free-text status maps to.
    Classify { status: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    if let Command::Classify { status } = &cli.command {
        let tag = classify(Some(status.as_str()));
        println!("{} ({})", tag.label(), tag.css_class());
        return Ok(());
    }

    let mut settings = load_settings(&cli.config)
        .with_context(|| format!("failed to load settings from '{}'", cli.config.display()))?;
    if let Some(url) = cli.api_base_url {
        settings.api_base_url = url;
    }
    if let Some(v) = cli.page_size {
        settings.page_size = v;
    }
    if let Some(v) = cli.featured_limit {
        settings.featured_limit = v;
    }
    if let Some(v) = cli.timeout_secs {
        settings.request_timeout_secs = v;
    }
    if cli.grouped {
        settings.today_grouped = true;
    }

    let fetcher = HttpDatasetFetcher::with_timeout(&settings.api_base_url, settings.request_timeout())
        .context("failed to create catalog fetcher")?;
    let base_url = fetcher.base_url().to_string();
    info!(api = %base_url, "using catalog API");
    let client = ListingClient::new(Arc::new(fetcher), settings.listing_settings());

    match cli.command {
        Command::Overview => {
            client.mount().await;
            let views = client.views().await;
            output::print_view("Featured", &views.featured, |panel| {
                output::print_featured(panel, &base_url)
            });
            if let Some(layout) = client.today_layout().await {
                output::print_view("Today", &ViewState::Loaded(layout), |layout| {
                    output::print_today(layout, &base_url)
                });
            } else {
                output::print_view("Today", &views.today, |_| {});
            }
            output::print_view("This week", &views.week, |week| {
                output::print_week(week, &base_url)
            });
            output::print_view("Filters", &views.filter_options, output::print_options);
            output::print_view("Games", &views.list, |page| {
                output::print_list(page, &base_url)
            });
        }
        Command::List {
            search,
            status,
            source,
            publisher,
            platform,
            featured,
            start_date,
            end_date,
            page,
        } => {
            let filters = [
                (FilterField::Search, search),
                (FilterField::Status, status),
                (FilterField::Source, source),
                (FilterField::Publisher, publisher),
                (FilterField::Platform, platform),
            ];
            for (field, value) in filters {
                if let Some(value) = value {
                    client.set_filter(field, &value).await;
                }
            }
            client.set_featured_only(featured).await;
            if let (Some(start), Some(end)) = (start_date, end_date) {
                client.set_date_range(Some(DateRange::new(start, end))).await;
            }

            client.submit_filters_at(page).await;
            let view = client.list_view().await;
            if let Some(err) = view.error() {
                bail!(err.clone());
            }
            if let Some(list) = view.loaded() {
                let total = list.pagination.total_pages;
                if page > total {
                    bail!("page {page} is out of range (1..={total})");
                }
            }
            output::print_view("Games", &view, |list| output::print_list(list, &base_url));
        }
        Command::Options => {
            client.reload_options().await;
            let views = client.views().await;
            if let Some(err) = views.filter_options.error() {
                bail!(err.clone());
            }
            output::print_view("Filters", &views.filter_options, output::print_options);
        }
        Command::Today => {
            client.reload_today().await;
            let views = client.views().await;
            if let Some(err) = views.today.error() {
                bail!(err.clone());
            }
            if let Some(layout) = client.today_layout().await {
                output::print_today(&layout, &base_url);
            }
        }
        Command::Week { offset } => {
            if !client.shift_week(offset).await {
                bail!("week offset {offset} is outside the supported calendar");
            }
            let views = client.views().await;
            if let Some(err) = views.week.error() {
                bail!(err.clone());
            }
            output::print_view("Week", &views.week, |week| output::print_week(week, &base_url));
        }
        Command::Featured => {
            client.reload_featured().await;
            let views = client.views().await;
            if let Some(err) = views.featured.error() {
                bail!(err.clone());
            }
            output::print_view("Featured", &views.featured, |panel| {
                output::print_featured(panel, &base_url)
            });
        }
        Command::Classify { .. } => {}
    }

    Ok(())
}
