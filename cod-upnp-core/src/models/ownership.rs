use std::collections::BTreeMap;

use super::protocol::Protocol;

/// 複数のゲーム / プラットフォームが同じポートを要求した場合のラベル
pub const MULTI_OWNER: &str = "cod_multi";

/// [OwnerMap]
/// ポート番号 → 所有者ラベル。ポート番号の昇順で走査されます。
pub type OwnerMap = BTreeMap<u16, String>;

/// [PortOwnership]
/// 選択された組み合わせ全体から集計した、プロトコルごとのポート所有者マップです。
/// 呼び出しごとに新しく作られ、永続化はされません。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortOwnership {
    pub tcp: OwnerMap,
    pub udp: OwnerMap,
}

impl PortOwnership {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owners(&self, protocol: Protocol) -> &OwnerMap {
        match protocol {
            Protocol::TCP => &self.tcp,
            Protocol::UDP => &self.udp,
        }
    }

    /// [claim]
    /// `label` の組み合わせがポートを要求したことを記録します。
    ///
    /// 最初の要求者はそのままラベルとして残ります。2 回目以降の要求があった時点で
    /// `cod_multi` に置き換えられ、以後元のラベルに戻ることはありません。
    /// 同じ組み合わせから同じポートを 2 回要求しないのは呼び出し側の責任です。
    pub fn claim(&mut self, protocol: Protocol, port: u16, label: &str) {
        let map = match protocol {
            Protocol::TCP => &mut self.tcp,
            Protocol::UDP => &mut self.udp,
        };
        match map.get_mut(&port) {
            None => {
                map.insert(port, label.to_string());
            }
            Some(existing) => *existing = MULTI_OWNER.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.tcp.len() + self.udp.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tcp.is_empty() && self.udp.is_empty()
    }

    /// (プロトコル, ポート, ラベル) の順に TCP → UDP で走査します。
    pub fn iter(&self) -> impl Iterator<Item = (Protocol, u16, &str)> {
        let tcp = self.tcp.iter().map(|(p, l)| (Protocol::TCP, *p, l.as_str()));
        let udp = self.udp.iter().map(|(p, l)| (Protocol::UDP, *p, l.as_str()));
        tcp.chain(udp)
    }
}

/// 所有者ラベルを組み立てます (`"Modern Warfare_PC"` のように空白はそのまま)。
pub fn owner_label(game: &str, platform: &str) -> String {
    format!("{}_{}", game, platform)
}

/// [normalize_label]
/// ルーターやファイアウォールへ渡す直前に、空白を `_` に置き換えます。
pub fn normalize_label(label: &str) -> String {
    label.replace(' ', "_")
}
