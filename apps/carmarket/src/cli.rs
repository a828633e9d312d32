use std::path::PathBuf;

use car_market::domain::listing::SortOrder;
use car_market::model::{CarFilter, Condition};
use clap::{Args, Parser, Subcommand};

/// CarMarket - car marketplace listings, accounts, comparison and favorites
#[derive(Parser)]
#[command(name = "carmarket")]
#[command(about = "CarMarket - car marketplace listings, accounts, comparison and favorites")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print current configuration and exit
    #[arg(long)]
    pub print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Keep all state in memory for this run
    #[arg(long, global = true)]
    pub mock: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check configuration
    Check,
    /// Browse and manage car listings
    #[command(subcommand)]
    Cars(CarsCommand),
    /// Accounts and the current session
    #[command(subcommand)]
    Auth(AuthCommand),
    /// Side-by-side comparison list
    #[command(subcommand)]
    Compare(CompareCommand),
    /// Saved cars
    #[command(subcommand)]
    Favorites(FavoritesCommand),
    /// Subscribe an address to the newsletter
    Newsletter { email: String },
    /// Send a message through the contact form
    Contact(ContactArgs),
}

#[derive(Subcommand)]
pub enum CarsCommand {
    /// List all cars, optionally of one condition
    List {
        #[arg(long)]
        condition: Option<Condition>,
    },
    /// Show one car
    Show { id: String },
    /// Free-text search over title, brand, model and city
    Search { query: String },
    /// Filter by attributes; every given criterion must match
    Filter(FilterArgs),
    /// Listing page view: title text, criteria, price range and sort order
    Browse {
        /// Substring of the title
        #[arg(long)]
        text: Option<String>,
        #[command(flatten)]
        criteria: FilterArgs,
        /// under2m, 2m-3m, 3m-5m, above5m or all
        #[arg(long, default_value = "all")]
        price_range: String,
        /// newest, price-asc, price-desc, year-desc or mileage-asc
        #[arg(long, default_value = "newest")]
        sort: SortOrder,
    },
    /// List a car for sale (seller session required)
    Add(PayloadArgs),
    /// Change fields of a listing (seller session required)
    Update {
        id: String,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Remove a listing (seller session required)
    Delete { id: String },
    /// Record a view of a listing
    View { id: String },
    /// Record an inquiry about a listing
    Inquire { id: String },
    /// Totals over all listings
    Stats,
    /// Distinct brands
    Brands,
    /// Distinct cities
    Cities,
    /// The signed-in seller's listings and totals
    Mine,
}

#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// new, used, certified or all
    #[arg(long)]
    pub condition: Option<String>,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub min_price: Option<u64>,
    #[arg(long)]
    pub max_price: Option<u64>,
    #[arg(long)]
    pub year: Option<i32>,
    #[arg(long)]
    pub fuel_type: Option<String>,
    #[arg(long)]
    pub transmission: Option<String>,
    #[arg(long)]
    pub body_type: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
}

impl TryFrom<FilterArgs> for CarFilter {
    type Error = String;

    fn try_from(args: FilterArgs) -> Result<Self, Self::Error> {
        let condition = match args.condition.as_deref() {
            Some(raw) => Condition::parse_optional(raw)?,
            None => None,
        };
        Ok(Self {
            condition,
            brand: args.brand,
            min_price: args.min_price,
            max_price: args.max_price,
            year: args.year,
            fuel_type: args.fuel_type,
            transmission: args.transmission,
            body_type: args.body_type,
            city: args.city,
        })
    }
}

/// JSON document given inline or as a file.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct PayloadArgs {
    /// Inline JSON
    #[arg(long)]
    pub json: Option<String>,
    /// Path to a JSON file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum AuthCommand {
    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        city: String,
        /// buyer or seller
        #[arg(long)]
        role: Option<String>,
    },
    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Change name, phone or city
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        city: Option<String>,
    },
    /// Change the password
    Password {
        #[arg(long)]
        old: String,
        #[arg(long)]
        new: String,
    },
    /// Switch between buyer and seller
    Role { role: String },
}

#[derive(Subcommand)]
pub enum CompareCommand {
    /// Add a car to the comparison
    Add { id: String },
    /// Remove a car from the comparison
    Remove { id: String },
    /// Empty the comparison
    Clear,
    /// Compared cars with the best price, mileage and year
    Show,
}

#[derive(Subcommand)]
pub enum FavoritesCommand {
    /// Add or remove a favorite
    Toggle { id: String },
    /// Favorite cars
    List,
    /// Remove all favorites
    Clear,
}

#[derive(Args, Debug, Clone)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long, default_value = "")]
    pub subject: String,
    #[arg(long)]
    pub message: String,
}
