use anyhow::{Context, Result};
use cod_upnp_core::GameTable;
use cod_upnp_core::models::OpenConfig;
use log::info;
use std::net::IpAddr;

/// `--table` が指定されていればそのファイルを、なければ組み込みのポート表を返します。
pub fn load_table(path: Option<&str>) -> Result<GameTable> {
    match path {
        Some(path) => {
            info!("ポート表を読み込んでいます: {}", path);
            GameTable::from_json_file(path)
                .with_context(|| format!("ポート表 {} の読み込みに失敗しました", path))
        }
        None => Ok(GameTable::builtin()),
    }
}

pub fn load_config(path: &str) -> Result<OpenConfig> {
    let content = std::fs::read_to_string(path)
        .context(format!("設定ファイル {} の読み取りに失敗しました", path))?;
    let cfg: OpenConfig =
        serde_json::from_str(&content).context("設定ファイルのフォーマットが正しくありません")?;
    Ok(cfg)
}

pub fn parse_client_ip(input: &str) -> Result<IpAddr> {
    input
        .trim()
        .parse()
        .with_context(|| format!("Invalid client IP address: {}", input))
}
