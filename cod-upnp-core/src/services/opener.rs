use log::{error, info, warn};
use std::net::IpAddr;

use crate::firewall::{FirewallRule, FirewallRules};
use crate::models::{PortOwnership, Protocol, normalize_label};
use crate::router::PortMapper;

/// [MappingLifecycle]
/// 追加したマッピングをどう扱うかの指定です。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MappingLifecycle {
    /// 追加したマッピングを残します (通常の動作)
    #[default]
    Persistent,
    /// 追加直後に削除します。ルーターが要求を受け付けるかの確認用です。
    Probe,
}

/// [OpenReport]
/// `open` の実行結果の集計です。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenReport {
    pub mapped: usize,
    pub duplicates: usize,
    pub failed: usize,
    /// Probe モードで削除したマッピング数
    pub removed: usize,
    /// Probe モードで削除に失敗したマッピング数
    pub remove_failed: usize,
    pub firewall_rules: usize,
}

/// [CloseReport]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloseReport {
    pub removed: usize,
    pub failed: usize,
}

/// [PortOpenService]
/// 集計済みのポート所有者マップに従って、ルーターへのマッピング要求と
/// ファイアウォールルールの追加を 1 ポートずつ順番に行います。
pub struct PortOpenService<'a, M: PortMapper> {
    mapper: &'a M,
    client_ip: IpAddr,
    lifecycle: MappingLifecycle,
}

impl<'a, M: PortMapper> PortOpenService<'a, M> {
    pub fn new(mapper: &'a M, client_ip: IpAddr) -> Self {
        Self {
            mapper,
            client_ip,
            lifecycle: MappingLifecycle::default(),
        }
    }

    pub fn with_lifecycle(mut self, lifecycle: MappingLifecycle) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// [open]
    /// TCP → UDP の順に、ポート番号の昇順でマッピングを追加します。
    ///
    /// 割り当て済みのポートやその他の失敗はログに残して次のポートへ進みます。
    /// `firewall` が指定されていれば、ポートごとに受信・送信の許可ルールも追加します。
    pub async fn open<F: FirewallRules>(
        &self,
        ownership: &PortOwnership,
        firewall: Option<&F>,
    ) -> OpenReport {
        let mut report = OpenReport::default();

        for (protocol, port, owner) in ownership.iter() {
            let label = normalize_label(owner);
            self.map_one(protocol, port, &label, &mut report).await;

            if let Some(fw) = firewall {
                for rule in FirewallRule::allow_pair(&label, protocol, port) {
                    match fw.allow(&rule).await {
                        Ok(()) => report.firewall_rules += 1,
                        Err(e) => warn!("{}", e),
                    }
                }
            }
        }

        info!(
            "マッピング完了: mapped={} duplicates={} failed={} removed={} remove_failed={} firewall_rules={}",
            report.mapped,
            report.duplicates,
            report.failed,
            report.removed,
            report.remove_failed,
            report.firewall_rules
        );
        report
    }

    async fn map_one(&self, protocol: Protocol, port: u16, label: &str, report: &mut OpenReport) {
        info!(
            "Add rule for the port {}:{}/{} on {} with description {}",
            protocol, port, port, self.client_ip, label
        );
        match self
            .mapper
            .add_port_mapping(port, protocol, port, self.client_ip, label)
            .await
        {
            Ok(()) => report.mapped += 1,
            Err(e) if e.is_duplicate() => {
                warn!("Port {} {} already configured", protocol, port);
                report.duplicates += 1;
                return;
            }
            Err(e) => {
                error!("{}", e);
                report.failed += 1;
                return;
            }
        }

        if self.lifecycle == MappingLifecycle::Probe {
            match self.mapper.delete_port_mapping(port, protocol).await {
                Ok(()) => report.removed += 1,
                Err(e) => {
                    error!("{}", e);
                    report.remove_failed += 1;
                }
            }
        }
    }
}

/// [close_mappings]
/// 所有者マップに含まれる全ポートのマッピングを削除します。
/// 失敗したポートはログに残して次のポートへ進みます。
pub async fn close_mappings<M: PortMapper>(mapper: &M, ownership: &PortOwnership) -> CloseReport {
    let mut report = CloseReport::default();
    for (protocol, port, _) in ownership.iter() {
        match mapper.delete_port_mapping(port, protocol).await {
            Ok(()) => {
                info!("Removed mapping {} {}", protocol, port);
                report.removed += 1;
            }
            Err(e) => {
                warn!("{}", e);
                report.failed += 1;
            }
        }
    }
    info!("削除完了: removed={} failed={}", report.removed, report.failed);
    report
}
