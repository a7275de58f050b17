pub mod config;
pub mod error;
pub mod packet;
pub mod scenario;

pub use packet::{DropReason, Packet, PacketId, PacketStatus};

pub use config::{
    ClockMode, DropAttribution, ForwardPolicy, RoutingPolicy, SimConfig, SwitchConfig,
};
pub use error::ConfigError;
pub use scenario::{SimConfigOverride, TestAssertion, TestScenario};
