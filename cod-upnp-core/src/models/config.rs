use serde::{Deserialize, Serialize};

/// [OpenConfig]
/// `open` コマンド用の JSON 設定ファイルの内容です。
/// 指定されなかった項目はコマンドライン引数またはデフォルト値で補われます。
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct OpenConfig {
    /// ポートを転送する先のクライアント IP アドレス
    pub client_ip: Option<String>,
    pub game: Option<String>,
    pub platform: Option<String>,
    /// ファイアウォールの許可ルールも追加するかどうか
    pub firewall: bool,
    /// 追加直後にマッピングを削除する (ルーターの動作確認用)
    pub probe: bool,
    /// リース期間 (秒)。0 または未指定は無期限です。
    pub lease_secs: Option<u32>,
    /// 組み込みの代わりに使うポート表 (JSON) のパス
    pub table: Option<String>,
}
