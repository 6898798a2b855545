use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::protocol::Protocol;

/// [PortRanges]
/// 1 つのゲーム / プラットフォームの組み合わせで必要なポート範囲文字列の一覧です。
///
/// 各要素は単一のポート番号 (`"3074"`) か、両端を含む範囲 (`"27014-27050"`) です。
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct PortRanges {
    #[serde(rename = "TCP", default)]
    pub tcp: Vec<String>,
    #[serde(rename = "UDP", default)]
    pub udp: Vec<String>,
}

impl PortRanges {
    pub fn for_protocol(&self, protocol: Protocol) -> &[String] {
        match protocol {
            Protocol::TCP => &self.tcp,
            Protocol::UDP => &self.udp,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tcp.is_empty() && self.udp.is_empty()
    }
}

/// [Platform]
/// ゲームが対応しているクライアントプラットフォーム (PC, PS4 など) です。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Platform {
    pub name: String,
    #[serde(flatten)]
    pub ports: PortRanges,
}

/// [Game]
/// ゲームタイトルと、そのタイトルが対応するプラットフォームの一覧です。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Game {
    pub name: String,
    pub platforms: Vec<Platform>,
}

impl Game {
    pub fn platform(&self, name: &str) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.name == name)
    }
}

/// [Selector]
/// ゲーム名・プラットフォーム名の指定です。`all` (小文字のみ) は既知の全要素を意味します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    All,
    Named(String),
}

impl Selector {
    pub const ALL: &'static str = "all";

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Selector::All => true,
            Selector::Named(n) => n == name,
        }
    }
}

impl FromStr for Selector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::ALL {
            Ok(Selector::All)
        } else {
            Ok(Selector::Named(s.to_string()))
        }
    }
}

impl From<&str> for Selector {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(selector) => selector,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str(Self::ALL),
            Selector::Named(n) => f.write_str(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_all_is_exact_lowercase() {
        assert_eq!(Selector::from("all"), Selector::All);
        // "All" という名前のゲームやプラットフォームも指定できる
        assert_eq!(Selector::from("All"), Selector::Named("All".into()));
        assert!(!Selector::from("All").matches("PC"));
        assert_eq!(Selector::from("PC"), Selector::Named("PC".into()));
        assert!(Selector::All.matches("anything"));
        assert!(!Selector::from("PC").matches("PS4"));
    }

    #[test]
    fn platform_json_uses_protocol_keys() {
        let json = r#"{"name":"PC","TCP":["3074"],"UDP":["3478","4379-4380"]}"#;
        let platform: Platform = serde_json::from_str(json).unwrap();
        assert_eq!(platform.ports.tcp, vec!["3074"]);
        assert_eq!(platform.ports.for_protocol(Protocol::UDP).len(), 2);
    }
}
