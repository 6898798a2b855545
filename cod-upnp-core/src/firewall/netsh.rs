use log::{debug, info, warn};
use tokio::process::Command;

use super::traits::{FirewallError, FirewallRule, FirewallRules};

const NETSH: &str = "netsh";

/// [NetshFirewall]
/// Windows ファイアウォールへ `netsh advfirewall` でルールを追加します。
#[derive(Debug, Default, Clone)]
pub struct NetshFirewall;

impl NetshFirewall {
    pub fn new() -> Self {
        Self
    }

    /// [rule_args]
    /// `netsh` に渡す引数列を組み立てます。
    pub fn rule_args(rule: &FirewallRule) -> Vec<String> {
        vec![
            "advfirewall".into(),
            "firewall".into(),
            "add".into(),
            "rule".into(),
            format!("name={}", rule.name),
            format!("dir={}", rule.direction.as_str()),
            "action=allow".into(),
            format!("protocol={}", rule.protocol),
            format!("localport={}", rule.port),
        ]
    }
}

impl FirewallRules for NetshFirewall {
    async fn allow(&self, rule: &FirewallRule) -> Result<(), FirewallError> {
        let output = Command::new(NETSH)
            .args(Self::rule_args(rule))
            .output()
            .await
            .map_err(|source| FirewallError::Spawn {
                program: NETSH.to_string(),
                source,
            })?;

        // 終了コードは確認しない
        debug!(
            "netsh {} -> {}: {}{}",
            rule,
            output.status,
            String::from_utf8_lossy(&output.stdout).trim(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
        Ok(())
    }
}

/// [DryRunFirewall]
/// ルールを実行せずにログへ出力するだけの実装です。
#[derive(Debug, Default, Clone)]
pub struct DryRunFirewall;

impl FirewallRules for DryRunFirewall {
    async fn allow(&self, rule: &FirewallRule) -> Result<(), FirewallError> {
        info!("[dry-run] {} {}", NETSH, NetshFirewall::rule_args(rule).join(" "));
        Ok(())
    }
}

/// ファイアウォールの実装を実行時に切り替えるためのラッパーです。
#[derive(Debug, Clone)]
pub enum HostFirewall {
    Netsh(NetshFirewall),
    DryRun(DryRunFirewall),
}

impl HostFirewall {
    pub fn new(dry_run: bool) -> Self {
        if dry_run {
            HostFirewall::DryRun(DryRunFirewall)
        } else {
            if !cfg!(windows) {
                warn!("netsh は Windows 専用です。ルールの追加は失敗する可能性があります");
            }
            HostFirewall::Netsh(NetshFirewall)
        }
    }
}

impl FirewallRules for HostFirewall {
    async fn allow(&self, rule: &FirewallRule) -> Result<(), FirewallError> {
        match self {
            HostFirewall::Netsh(fw) => fw.allow(rule).await,
            HostFirewall::DryRun(fw) => fw.allow(rule).await,
        }
    }
}
