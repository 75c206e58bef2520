//! Command-line argument definitions.
//!
//! # Responsibility
//! - Describe the full CLI surface for clap to parse.
//! - Keep parsing concerns out of the dispatch logic in `main`.

use clap::{Parser, Subcommand};

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "addressbook", version, about = "Manage persons and their addresses")]
pub struct Args {
    /// SQLite database file, created on first use
    #[arg(long, default_value = "addressbook.db")]
    pub db: PathBuf,

    /// Absolute directory for rolling log files; logging stays off when unset
    #[arg(long)]
    pub log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error); defaults per build mode
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List every person with their address count, newest first
    List,
    /// Case-insensitive substring search over names and phone numbers
    Search {
        /// Text to look for; a blank query lists everyone
        query: String,
    },
    /// Show one person with every owned address
    Show {
        person_id: i64,
    },
    /// Create a person
    AddPerson {
        /// First name (required, whitespace is trimmed)
        #[arg(long)]
        first: String,
        /// Last name (required, whitespace is trimmed)
        #[arg(long)]
        last: String,
        /// Phone number; omit to leave unset
        #[arg(long)]
        phone: Option<String>,
    },
    /// Overwrite a person's name and phone
    EditPerson {
        person_id: i64,
        /// First name (required, whitespace is trimmed)
        #[arg(long)]
        first: String,
        /// Last name (required, whitespace is trimmed)
        #[arg(long)]
        last: String,
        /// Phone number; omit to clear
        #[arg(long)]
        phone: Option<String>,
    },
    /// Delete a person together with every owned address
    DeletePerson {
        person_id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Attach an address to a person
    AddAddress {
        person_id: i64,
        /// Street-level line (required, whitespace is trimmed)
        #[arg(long)]
        line: String,
        /// Short label such as "Home" or "Work"
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        district: Option<String>,
    },
    /// Overwrite an address; the owning person never changes
    EditAddress {
        address_id: i64,
        /// Street-level line (required, whitespace is trimmed)
        #[arg(long)]
        line: String,
        /// Short label such as "Home" or "Work"; omit to clear
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        district: Option<String>,
    },
    /// Delete one address
    DeleteAddress {
        address_id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}
