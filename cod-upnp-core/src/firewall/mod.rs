pub mod netsh;
pub mod traits;

pub use netsh::{DryRunFirewall, HostFirewall, NetshFirewall};
pub use traits::{Direction, FirewallError, FirewallRule, FirewallRules};
