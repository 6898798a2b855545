use std::fmt;
use thiserror::Error;

use crate::models::Protocol;

#[derive(Error, Debug)]
pub enum FirewallError {
    #[error("ファイアウォールコマンドの起動に失敗しました ({program}): {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// 通信方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
        }
    }
}

/// [FirewallRule]
/// クライアント側ファイアウォールに追加する 1 件の許可ルールです。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirewallRule {
    pub name: String,
    pub direction: Direction,
    pub protocol: Protocol,
    pub port: u16,
}

impl FirewallRule {
    /// 正規化済みラベルとポートから、受信・送信の 2 件のルールを作成します。
    pub fn allow_pair(label: &str, protocol: Protocol, port: u16) -> [FirewallRule; 2] {
        let name = format!("COD {} {}", label, port);
        [Direction::In, Direction::Out].map(|direction| FirewallRule {
            name: name.clone(),
            direction,
            protocol,
            port,
        })
    }
}

impl fmt::Display for FirewallRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {} {})",
            self.name,
            self.direction.as_str(),
            self.protocol,
            self.port
        )
    }
}

/// [FirewallRules]
/// 許可ルールを OS のファイアウォールへ追加するトレイトです。
/// コマンドの実行結果は検査しません (起動失敗のみエラーになります)。
#[allow(async_fn_in_trait)]
pub trait FirewallRules {
    async fn allow(&self, rule: &FirewallRule) -> Result<(), FirewallError>;
}
