pub mod opener;
pub mod ports;

pub use opener::{CloseReport, MappingLifecycle, OpenReport, PortOpenService, close_mappings};
pub use ports::{PortRangeError, aggregate, expand_ranges};
