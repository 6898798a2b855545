use anyhow::{Context, Result};
use cod_upnp_core::firewall::HostFirewall;
use cod_upnp_core::models::{PortOwnership, Selector};
use cod_upnp_core::router::IgdGateway;
use cod_upnp_core::services::{MappingLifecycle, close_mappings};
use cod_upnp_core::{GameTable, PortOpenService, aggregate};
use log::{info, warn};

use crate::utils::{load_config, load_table, parse_client_ip};

/// `open` コマンドの引数 (設定ファイルで補完される前の値)
pub struct OpenArgs {
    pub game: Option<String>,
    pub platform: Option<String>,
    pub ip: Option<String>,
    pub firewall: bool,
    pub dry_run_firewall: bool,
    pub probe: bool,
    pub lease: Option<u32>,
    pub config: Option<String>,
    pub table: Option<String>,
}

fn select(table: &GameTable, game: &str, platform: &str) -> Result<PortOwnership> {
    let owners = aggregate(table, &Selector::from(game), &Selector::from(platform))
        .context("ポート表の展開に失敗しました")?;
    if owners.is_empty() {
        warn!("No ports found for game={} platform={}", game, platform);
    } else {
        info!(
            "{} / {}: TCP {} ports, UDP {} ports",
            game,
            platform,
            owners.tcp.len(),
            owners.udp.len()
        );
    }
    Ok(owners)
}

pub async fn run_open(args: OpenArgs) -> Result<()> {
    // 設定ファイルからの読み込み (コマンドライン引数が優先)
    let cfg = match args.config.as_deref() {
        Some(path) => load_config(path)?,
        None => Default::default(),
    };

    let game = args.game.or(cfg.game).unwrap_or_else(|| Selector::ALL.to_string());
    let platform = args.platform.or(cfg.platform).unwrap_or_else(|| Selector::ALL.to_string());
    let ip_str = args
        .ip
        .or(cfg.client_ip)
        .ok_or_else(|| anyhow::anyhow!("--ip または --config が必要です"))?;
    let client_ip = parse_client_ip(&ip_str)?;
    let firewall = args.firewall || args.dry_run_firewall || cfg.firewall;
    let lifecycle = if args.probe || cfg.probe {
        MappingLifecycle::Probe
    } else {
        MappingLifecycle::Persistent
    };
    let lease = args.lease.or(cfg.lease_secs).unwrap_or(0);

    let table = load_table(args.table.or(cfg.table).as_deref())?;
    let owners = select(&table, &game, &platform)?;

    let gateway = IgdGateway::discover()
        .await
        .context("UPnP ルーターが見つかりませんでした")?
        .with_lease(lease);

    let host_firewall = firewall.then(|| HostFirewall::new(args.dry_run_firewall));
    let service = PortOpenService::new(&gateway, client_ip).with_lifecycle(lifecycle);
    let report = service.open(&owners, host_firewall.as_ref()).await;

    println!(
        "Mapped: {}  Already configured: {}  Failed: {}  Firewall rules: {}",
        report.mapped, report.duplicates, report.failed, report.firewall_rules
    );
    if lifecycle == MappingLifecycle::Probe {
        println!(
            "Probe mode: removed {} mappings ({} failed)",
            report.removed, report.remove_failed
        );
    }
    Ok(())
}

pub async fn run_close(game: String, platform: String, table: Option<String>) -> Result<()> {
    let table = load_table(table.as_deref())?;
    let owners = select(&table, &game, &platform)?;

    let gateway = IgdGateway::discover()
        .await
        .context("UPnP ルーターが見つかりませんでした")?;

    let report = close_mappings(&gateway, &owners).await;

    println!("Removed: {}  Failed: {}", report.removed, report.failed);
    Ok(())
}
