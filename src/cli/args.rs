use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bistro-order")]
#[command(about = "Browse the menu and build a restaurant order from the terminal")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print order snapshots as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Menu file path (overrides MENU_FILE)
    #[arg(short, long, global = true)]
    pub menu: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List menu items
    Menu {
        /// Only show this category ("all" shows everything)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Add menu items to a fresh order and show the totals
    Quote {
        /// Menu item names, one per unit ordered
        #[arg(required = true)]
        items: Vec<String>,
        /// Place the order after adding the items
        #[arg(long)]
        checkout: bool,
    },
    /// Start an interactive ordering session
    Session,
    /// Request a table reservation (missing fields are prompted for)
    Reserve {
        /// Name for the booking
        #[arg(short, long)]
        name: Option<String>,
        /// Date as YYYY-MM-DD, today or later
        #[arg(short, long)]
        date: Option<String>,
        /// Time as HH:MM
        #[arg(short, long)]
        time: Option<String>,
    },
}
