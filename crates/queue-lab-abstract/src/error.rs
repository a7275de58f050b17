use thiserror::Error;

/// Rejected configuration. Raised before any simulation state is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid configuration: at least one traffic source is required")]
    NoSources,
    #[error("invalid configuration: at least one switch is required")]
    NoSwitches,
    #[error("invalid configuration: switch {switch} has zero capacity")]
    ZeroCapacity { switch: usize },
    #[error("invalid configuration: packet size must be at least 1 byte")]
    ZeroPacketSize,
    #[error("invalid configuration: packet size range [{min}, {max}] is empty")]
    EmptySizeRange { min: u32, max: u32 },
    #[error("invalid configuration: generation delay range [{min}, {max}] ms is empty")]
    EmptyDelayRange { min: u64, max: u64 },
    #[error("invalid configuration: simulation duration must be positive")]
    ZeroDuration,
    #[error("invalid configuration: service interval must be positive")]
    ZeroServiceInterval,
    #[error("invalid configuration: sample interval must be positive")]
    ZeroSampleInterval,
    #[error("invalid configuration: ingress switch {switch} does not exist ({switches} switches)")]
    UnknownIngress { switch: usize, switches: usize },
}
