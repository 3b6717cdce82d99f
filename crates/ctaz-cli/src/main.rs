mod locate;
mod quote;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ctaz-cli")]
#[command(about = "Collision Towing AZ service-area and quote tools")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Nearest service-area city and distance to the shop for a coordinate.
    Nearest {
        #[command(flatten)]
        point: PointArgs,
    },
    /// Run the coverage map headlessly and print the resolved location.
    Locate {
        #[command(flatten)]
        point: PointArgs,
        #[arg(long, value_enum, default_value_t = ThemeArg::Light)]
        theme: ThemeArg,
    },
    /// Submit a quote request to the quote endpoint.
    Quote(Box<QuoteArgs>),
}

#[derive(Debug, Clone, Copy, PartialEq, Args)]
struct PointArgs {
    #[arg(long, allow_hyphen_values = true)]
    longitude: f64,
    #[arg(long, allow_hyphen_values = true)]
    latitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for ctaz_geo::MapTheme {
    fn from(theme: ThemeArg) -> Self {
        match theme {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Args)]
struct QuoteArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    phone: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    message: String,
    #[arg(long, default_value = "towing")]
    service: String,
    #[arg(long = "from", default_value = "")]
    from_address: String,
    #[arg(long = "to", default_value = "")]
    to_address: String,
    /// Calculated distance in miles.
    #[arg(long, default_value = "")]
    miles: String,
    /// Price before discounts; the active discount is applied to it.
    #[arg(long)]
    subtotal: Decimal,
    #[arg(long, default_value = "")]
    year: String,
    #[arg(long, default_value = "")]
    make: String,
    #[arg(long, default_value = "")]
    model: String,
    #[arg(long, default_value = "")]
    plate: String,
    #[arg(long, default_value = "")]
    registration_state: String,
    #[arg(long)]
    large: bool,
    #[arg(long, conflicts_with = "student")]
    veteran: bool,
    #[arg(long)]
    student: bool,
    /// Attach this exact position to the quote.
    #[arg(long, allow_hyphen_values = true, requires = "share_latitude")]
    share_longitude: Option<f64>,
    #[arg(long, allow_hyphen_values = true, requires = "share_longitude")]
    share_latitude: Option<f64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = ctaz_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Nearest { point }) => locate::run_nearest(&config, point)?,
        Some(Commands::Locate { point, theme }) => {
            locate::run_locate(&config, point, theme.into()).await?;
        }
        Some(Commands::Quote(args)) => quote::run_quote(&config, *args).await?,
        None => println!("ctaz-cli: use --help to list commands"),
    }

    Ok(())
}
