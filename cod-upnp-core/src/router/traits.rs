use std::net::IpAddr;
use thiserror::Error;

use crate::models::Protocol;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("UPnP ゲートウェイの検出に失敗しました: {0}")]
    Discovery(String),

    #[error("Port {protocol} {port} is already mapped")]
    AlreadyMapped { protocol: Protocol, port: u16 },

    #[error("Failed to add mapping {protocol} {port}: {reason}")]
    AddMapping {
        protocol: Protocol,
        port: u16,
        reason: String,
    },

    #[error("Failed to delete mapping {protocol} {port}: {reason}")]
    DeleteMapping {
        protocol: Protocol,
        port: u16,
        reason: String,
    },
}

impl RouterError {
    /// 既に同じポートが割り当て済みであることを示すエラーかどうか
    pub fn is_duplicate(&self) -> bool {
        matches!(self, RouterError::AlreadyMapped { .. })
    }
}

/// [PortMapper]
/// ルーターへのポートマッピング要求を抽象化するトレイトです。
/// 実際の UPnP 通信は外部ライブラリが担当し、ここではパラメータを渡すだけです。
#[allow(async_fn_in_trait)]
pub trait PortMapper {
    /// 外部ポートへの通信を `client_ip:internal_port` へ転送するマッピングを追加します。
    async fn add_port_mapping(
        &self,
        internal_port: u16,
        protocol: Protocol,
        external_port: u16,
        client_ip: IpAddr,
        description: &str,
    ) -> Result<(), RouterError>;

    /// 外部ポートのマッピングを削除します。
    async fn delete_port_mapping(&self, port: u16, protocol: Protocol) -> Result<(), RouterError>;
}
