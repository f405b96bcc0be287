//! Cross-component integration flows.

pub mod exchange_flows;
pub mod listener_policies;
