//! cod-upnp コアライブラリ
//! 
//! Call of Duty のオンラインプレイに必要な TCP / UDP ポートを算出し、
//! UPnP 対応ルーターへのポート開放とクライアント側ファイアウォールの設定を行います。

pub mod models;
pub mod table;
pub mod services;

// 主要な機能を外部に再公開
pub use table::GameTable;
pub use services::{aggregate, expand_ranges, PortOpenService};

// 外部との境界 (ルーター / OS ファイアウォール)
pub mod router;
pub mod firewall;
