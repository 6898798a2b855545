pub mod igd_gateway;
pub mod traits;

pub use igd_gateway::IgdGateway;
pub use traits::{PortMapper, RouterError};
