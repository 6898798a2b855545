use anyhow::Result;
use cod_upnp_core::aggregate;
use cod_upnp_core::models::{OwnerMap, Protocol, Selector, normalize_label};
use log::warn;

use crate::utils::load_table;

pub fn run_games(table: Option<String>) -> Result<()> {
    let table = load_table(table.as_deref())?;
    for game in table.games() {
        println!("{}", game);
    }
    Ok(())
}

pub fn run_platforms(game: String, table: Option<String>) -> Result<()> {
    let table = load_table(table.as_deref())?;
    let platforms = table.platforms(&game);
    if platforms.is_empty() {
        warn!("Unknown game: {}", game);
    }
    for platform in platforms {
        println!("{}", platform);
    }
    Ok(())
}

pub fn run_ports(game: String, platform: String, table: Option<String>) -> Result<()> {
    let table = load_table(table.as_deref())?;
    let owners = aggregate(&table, &Selector::from(game.as_str()), &Selector::from(platform.as_str()))?;
    if owners.is_empty() {
        warn!("No ports found for game={} platform={}", game, platform);
        return Ok(());
    }

    print_owners(Protocol::TCP, &owners.tcp);
    print_owners(Protocol::UDP, &owners.udp);
    Ok(())
}

fn print_owners(protocol: Protocol, owners: &OwnerMap) {
    println!("{} ({} ports):", protocol, owners.len());
    for (port, owner) in owners {
        println!("  - {}: {}", port, normalize_label(owner));
    }
}
