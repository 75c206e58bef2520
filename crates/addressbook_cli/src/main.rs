//! Terminal front-end for the address book.
//!
//! # Responsibility
//! - Map subcommands onto core services.
//! - Own prompting and human-readable output; core stays silent.

use addressbook_core::db::open_db;
use addressbook_core::{
    default_log_level, init_logging, AddressForm, AddressService, DirectoryService, PersonDetail,
    PersonForm, PersonOverview, SqliteAddressRepository, SqlitePersonRepository,
};
use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;

use std::io::{self, Write};

mod commands;

use commands::{Args, Command};

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_dir) = args.log_dir.as_deref() {
        let level = effective_log_level(args.log_level.as_deref());
        init_logging(level, log_dir).map_err(|message| anyhow!(message))?;
    }

    let conn = open_db(&args.db)
        .with_context(|| format!("failed to open database at `{}`", args.db.display()))?;
    let directory = DirectoryService::new(
        SqlitePersonRepository::try_new(&conn)?,
        SqliteAddressRepository::try_new(&conn)?,
    );
    let addresses = AddressService::new(SqliteAddressRepository::try_new(&conn)?);

    match args.command {
        Command::List => {
            let overview = directory.list_overview()?;
            if overview.is_empty() {
                println!("no persons yet");
                return Ok(());
            }
            for entry in &overview {
                print_overview_line(entry);
            }
        }
        Command::Search { query } => {
            let hits = directory.search_people(&query)?;
            if hits.is_empty() {
                println!("no match for `{}`", query.trim());
                return Ok(());
            }
            for person in &hits {
                println!(
                    "#{} {} {}",
                    person.id,
                    person.full_name(),
                    person.phone.as_deref().unwrap_or("")
                );
            }
        }
        Command::Show { person_id } => {
            let Some(detail) = directory.person_detail(person_id)? else {
                bail!("person #{person_id} not found");
            };
            print_detail(&detail);
        }
        Command::AddPerson { first, last, phone } => {
            let form = PersonForm {
                first_name: first,
                last_name: last,
                phone: phone.unwrap_or_default(),
            };
            let id = directory.create_person(&form)?;
            println!("created person #{id}");
        }
        Command::EditPerson {
            person_id,
            first,
            last,
            phone,
        } => {
            let form = PersonForm {
                first_name: first,
                last_name: last,
                phone: phone.unwrap_or_default(),
            };
            directory.update_person(person_id, &form)?;
            println!("updated person #{person_id}");
        }
        Command::DeletePerson { person_id, yes } => {
            let Some(detail) = directory.person_detail(person_id)? else {
                bail!("person #{person_id} not found");
            };
            let prompt = format!(
                "delete {} and {} owned address(es)?",
                detail.person.full_name(),
                detail.addresses.len()
            );
            if !yes && !confirm(&prompt)? {
                println!("cancelled");
                return Ok(());
            }
            let removed = directory.delete_person(person_id)?;
            println!("deleted person #{person_id} and {removed} address(es)");
        }
        Command::AddAddress {
            person_id,
            line,
            title,
            city,
            district,
        } => {
            if directory.person_detail(person_id)?.is_none() {
                bail!("person #{person_id} not found");
            }
            let form = AddressForm {
                title: title.unwrap_or_default(),
                city: city.unwrap_or_default(),
                district: district.unwrap_or_default(),
                address_line: line,
            };
            let id = addresses.add_address(person_id, &form)?;
            println!("created address #{id} for person #{person_id}");
        }
        Command::EditAddress {
            address_id,
            line,
            title,
            city,
            district,
        } => {
            let form = AddressForm {
                title: title.unwrap_or_default(),
                city: city.unwrap_or_default(),
                district: district.unwrap_or_default(),
                address_line: line,
            };
            addresses.update_address(address_id, &form)?;
            println!("updated address #{address_id}");
        }
        Command::DeleteAddress { address_id, yes } => {
            let Some(address) = addresses.get_address(address_id)? else {
                bail!("address #{address_id} not found");
            };
            let prompt = format!("delete address `{}`?", address.display_text());
            if !yes && !confirm(&prompt)? {
                println!("cancelled");
                return Ok(());
            }
            addresses.remove_address(address_id)?;
            println!("deleted address #{address_id}");
        }
    }

    Ok(())
}

fn print_overview_line(entry: &PersonOverview) {
    println!(
        "#{:<5} {:<28} {:<18} {} address(es)",
        entry.person.id,
        entry.person.full_name(),
        entry.person.phone.as_deref().unwrap_or(""),
        entry.address_count
    );
}

fn print_detail(detail: &PersonDetail) {
    println!("#{} {}", detail.person.id, detail.person.full_name());
    match detail.person.phone.as_deref() {
        Some(phone) => println!("phone: {phone}"),
        None => println!("phone: (none)"),
    }
    println!("addresses ({}):", detail.addresses.len());
    for address in &detail.addresses {
        println!("  #{} {}", address.id, address.display_text());
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn effective_log_level(requested: Option<&str>) -> &str {
    match requested {
        Some(level) => level,
        None => default_log_level(),
    }
}

#[cfg(test)]
mod tests {
    use super::{default_log_level, effective_log_level};

    #[test]
    fn effective_log_level_prefers_the_requested_level() {
        let requested = Some("warn".to_string());
        assert_eq!(effective_log_level(requested.as_deref()), "warn");
    }

    #[test]
    fn effective_log_level_falls_back_to_the_build_default() {
        let requested: Option<String> = None;
        assert_eq!(
            effective_log_level(requested.as_deref()),
            default_log_level()
        );
    }
}
