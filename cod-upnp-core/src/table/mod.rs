mod builtin;

use log::debug;
use std::path::Path;
use thiserror::Error;

use crate::models::{Game, Platform, PortRanges};

#[derive(Error, Debug)]
pub enum TableError {
    #[error("ポート表ファイルの読み込みに失敗しました: {0}")]
    Io(#[from] std::io::Error),

    #[error("ポート表の JSON 形式が正しくありません: {0}")]
    Json(#[from] serde_json::Error),
}

/// [GameTable]
/// ゲーム名 → プラットフォーム名 → TCP / UDP ポート範囲 の参照表です。
///
/// 存在しないキーを引いた場合はエラーにせず、空の結果を返します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameTable {
    games: Vec<Game>,
}

impl GameTable {
    pub fn new(games: Vec<Game>) -> Self {
        Self { games }
    }

    /// [builtin]
    /// バイナリに組み込まれた Call of Duty のポート表を返します。
    pub fn builtin() -> Self {
        let games = builtin::GAMES
            .iter()
            .map(|g| Game {
                name: g.name.to_string(),
                platforms: g
                    .platforms
                    .iter()
                    .map(|p| Platform {
                        name: p.name.to_string(),
                        ports: PortRanges {
                            tcp: p.tcp.iter().map(|s| s.to_string()).collect(),
                            udp: p.udp.iter().map(|s| s.to_string()).collect(),
                        },
                    })
                    .collect(),
            })
            .collect();
        Self { games }
    }

    /// `[{"name": ..., "platforms": [{"name": ..., "TCP": [...], "UDP": [...]}]}]` 形式の JSON から読み込みます。
    pub fn from_json_str(json: &str) -> Result<Self, TableError> {
        let games: Vec<Game> = serde_json::from_str(json)?;
        Ok(Self { games })
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        debug!("Loading port table from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn entries(&self) -> &[Game] {
        &self.games
    }

    /// [games]
    /// 既知のゲーム名を表の順序で返します。
    pub fn games(&self) -> Vec<&str> {
        self.games.iter().map(|g| g.name.as_str()).collect()
    }

    pub fn game(&self, name: &str) -> Option<&Game> {
        self.games.iter().find(|g| g.name == name)
    }

    /// [platforms]
    /// ゲームが対応するプラットフォーム名を返します。未知のゲームは空です。
    pub fn platforms(&self, game: &str) -> Vec<&str> {
        self.game(game)
            .map(|g| g.platforms.iter().map(|p| p.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// [ports]
    /// (ゲーム, プラットフォーム) の TCP / UDP ポート範囲を返します。
    /// どちらかのキーが存在しなければ空のリストになります。
    pub fn ports(&self, game: &str, platform: &str) -> PortRanges {
        self.game(game)
            .and_then(|g| g.platform(platform))
            .map(|p| p.ports.clone())
            .unwrap_or_default()
    }
}

impl Default for GameTable {
    fn default() -> Self {
        Self::builtin()
    }
}
