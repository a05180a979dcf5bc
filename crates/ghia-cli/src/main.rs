//! Ghia CLI - console front end for the storefront core.
//!
//! Drives the same page state a browser would: product listings, dashboard
//! counters, the contact form, booking links and the animation preference.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ghia_core::{
    BookingForm, BookingMode, CatalogView, CategorySelection, ContactForm, PriceRange,
    ProductFilters, SortOrder, Storefront, StorefrontConfig,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "ghia")]
#[command(about = "Ghia Gym storefront from the terminal")]
struct Args {
    /// API base URL (overrides GHIA_API_BASE_URL)
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    /// Bearer token for authenticated endpoints (overrides GHIA_API_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List products with the products page filters
    Products {
        /// Category to include; repeat or comma-separate for several
        #[arg(short, long, value_delimiter = ',')]
        category: Vec<String>,

        /// Sort order: price_asc or price_desc
        #[arg(short, long)]
        sort: Option<String>,

        #[arg(long)]
        min_price: Option<f64>,

        #[arg(long)]
        max_price: Option<f64>,

        /// Print the page view as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the home page's featured products
    Featured,
    /// Show product, user and order counts
    Stats,
    /// Send a message through the contact form
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long)]
        message: String,
    },
    /// Print the link used to book a trainer
    BookingLink {
        #[arg(long, default_value = "")]
        trainer: String,

        /// Book through the online form instead of WhatsApp
        #[arg(long)]
        online: bool,

        /// WhatsApp number to contact for in-person sessions
        #[arg(long)]
        phone: Option<String>,
    },
    /// Show or change whether decorative animations play
    Animations {
        #[arg(value_enum)]
        action: Option<Toggle>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Toggle {
    On,
    Off,
    Toggle,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    let mut config = StorefrontConfig::from_env()?;
    if let Some(url) = args.api_base_url {
        config = config.with_api_base_url(url);
    }
    if let Some(token) = args.token {
        config = config.with_auth_token(Some(token));
    }

    let storefront = Storefront::new(config)?;
    info!("Using API at {}", storefront.config().api_base_url);

    match args.command {
        Command::Products {
            category,
            sort,
            min_price,
            max_price,
            json,
        } => {
            let catalog = storefront.product_catalog();
            let filters = ProductFilters::new(
                CategorySelection::from_joined(&category.join(",")),
                sort.as_deref().map(SortOrder::parse).unwrap_or_default(),
            );
            let defaults = PriceRange::default();
            let range = PriceRange::new(
                min_price.unwrap_or(defaults.min),
                max_price.unwrap_or(defaults.max),
            );
            if range.min > range.max {
                bail!("--min-price must not exceed --max-price");
            }

            catalog.set_selection(filters, range).await;
            catalog.activate().await;

            let view = catalog.view();
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_view(&view);
            }
        }
        Command::Featured => {
            let featured = storefront.featured_products();
            featured.activate().await;
            let state = featured.snapshot();
            if let Some(error) = state.error {
                bail!(error);
            }
            for item in state.data.unwrap_or_default() {
                println!("{:<24} {:>8.2}  {}", item.name, item.price, item.category);
            }
        }
        Command::Stats => {
            let stats = storefront.stats_counts();
            stats.activate().await;
            let summary = stats.summary();
            if let Some(error) = summary.error {
                bail!(error);
            }
            println!("Products: {}", summary.product_count);
            println!("Users:    {}", summary.user_count);
            println!("Orders:   {}", summary.order_count);
        }
        Command::Contact {
            name,
            email,
            phone,
            message,
        } => {
            let form = ContactForm {
                name,
                email,
                phone_number: phone,
                message,
            };
            storefront.submit_contact(&form).await?;
            println!("Message sent. We'll be in touch soon.");
        }
        Command::BookingLink {
            trainer,
            online,
            phone,
        } => {
            let mode = if online {
                BookingMode::Online
            } else {
                BookingMode::InPerson
            };
            match mode {
                BookingMode::Online => println!("{}", BookingForm::booking_path(&trainer, mode)),
                BookingMode::InPerson => {
                    let form = BookingForm::for_trainer(trainer);
                    println!("{}", form.whatsapp_url(phone.as_deref()));
                }
            }
        }
        Command::Animations { action } => {
            let preferences = storefront.preferences();
            let enabled = match action {
                None => preferences.animations_enabled(),
                Some(Toggle::On) => {
                    preferences.set_animations_enabled(true)?;
                    true
                }
                Some(Toggle::Off) => {
                    preferences.set_animations_enabled(false)?;
                    false
                }
                Some(Toggle::Toggle) => preferences.toggle_animations()?,
            };
            println!("Animations {}", if enabled { "on" } else { "off" });
        }
    }

    Ok(())
}

fn print_view(view: &CatalogView) {
    if let Some(error) = &view.error {
        eprintln!("warning: {}", error);
    }
    if view.items.is_empty() {
        println!("No products found.");
        return;
    }
    for item in &view.items {
        println!("{:<24} {:>8.2}  {}", item.name, item.price, item.category);
    }
}
