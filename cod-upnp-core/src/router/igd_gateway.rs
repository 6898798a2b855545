use igd_next::aio::Gateway;
use igd_next::aio::tokio::Tokio;
use igd_next::{AddPortError, PortMappingProtocol, SearchOptions};
use log::{debug, info};
use std::net::{IpAddr, SocketAddr};

use super::traits::{PortMapper, RouterError};
use crate::models::Protocol;

impl From<Protocol> for PortMappingProtocol {
    fn from(protocol: Protocol) -> Self {
        match protocol {
            Protocol::TCP => PortMappingProtocol::TCP,
            Protocol::UDP => PortMappingProtocol::UDP,
        }
    }
}

/// [add_error]
/// `igd-next` のマッピング追加エラーを `RouterError` に変換します。
/// 他のクライアントに割り当て済みのポートは `AlreadyMapped` になります。
fn add_error(e: AddPortError, protocol: Protocol, port: u16) -> RouterError {
    match e {
        AddPortError::PortInUse => RouterError::AlreadyMapped { protocol, port },
        other => RouterError::AddMapping {
            protocol,
            port,
            reason: other.to_string(),
        },
    }
}

/// [IgdGateway]
/// `igd-next` で検出した UPnP IGD ゲートウェイ (ルーター) です。
pub struct IgdGateway {
    gateway: Gateway<Tokio>,
    /// マッピングのリース期間 (秒)。0 は無期限です。
    lease_secs: u32,
}

impl IgdGateway {
    /// [discover]
    /// LAN 上の UPnP ゲートウェイを 1 回だけ検索します。再試行は行いません。
    pub async fn discover() -> Result<Self, RouterError> {
        info!("UPnP ゲートウェイを検索中...");
        let gateway = igd_next::aio::tokio::search_gateway(SearchOptions::default())
            .await
            .map_err(|e| RouterError::Discovery(e.to_string()))?;
        info!("UPnP gateway found: {}", gateway.addr);

        match gateway.get_external_ip().await {
            Ok(ip) => info!("External IP: {}", ip),
            Err(e) => debug!("External IP unavailable: {}", e),
        }

        Ok(Self { gateway, lease_secs: 0 })
    }

    pub fn with_lease(mut self, lease_secs: u32) -> Self {
        self.lease_secs = lease_secs;
        self
    }
}

impl PortMapper for IgdGateway {
    async fn add_port_mapping(
        &self,
        internal_port: u16,
        protocol: Protocol,
        external_port: u16,
        client_ip: IpAddr,
        description: &str,
    ) -> Result<(), RouterError> {
        let local_addr = SocketAddr::new(client_ip, internal_port);
        self.gateway
            .add_port(
                protocol.into(),
                external_port,
                local_addr,
                self.lease_secs,
                description,
            )
            .await
            .map_err(|e| add_error(e, protocol, external_port))
    }

    async fn delete_port_mapping(&self, port: u16, protocol: Protocol) -> Result<(), RouterError> {
        self.gateway
            .remove_port(protocol.into(), port)
            .await
            .map_err(|e| RouterError::DeleteMapping {
                protocol,
                port,
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_in_use_is_a_duplicate() {
        let err = add_error(AddPortError::PortInUse, Protocol::TCP, 3074);
        assert!(err.is_duplicate());
        assert_eq!(err, RouterError::AlreadyMapped { protocol: Protocol::TCP, port: 3074 });
    }

    #[test]
    fn other_add_errors_are_failures() {
        let err = add_error(AddPortError::ActionNotAuthorized, Protocol::UDP, 3478);
        assert!(!err.is_duplicate());
        assert!(matches!(
            err,
            RouterError::AddMapping { protocol: Protocol::UDP, port: 3478, .. }
        ));
    }

    #[test]
    fn protocol_converts_to_igd_protocol() {
        assert!(matches!(PortMappingProtocol::from(Protocol::TCP), PortMappingProtocol::TCP));
        assert!(matches!(PortMappingProtocol::from(Protocol::UDP), PortMappingProtocol::UDP));
    }
}
