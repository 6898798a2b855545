pub mod config;
pub mod game;
pub mod ownership;
pub mod protocol;

pub use config::OpenConfig;
pub use game::{Game, Platform, PortRanges, Selector};
pub use ownership::{MULTI_OWNER, OwnerMap, PortOwnership, normalize_label, owner_label};
pub use protocol::Protocol;
