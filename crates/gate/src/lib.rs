//! Per-channel duty gate for an automated chat agent.
//!
//! Operators toggle a channel "off duty"; while off duty the agent withholds
//! normal responses in that channel until toggled back. The toggle commands
//! write through [`store::DutyStore`], and [`enforcer::GateEnforcer`] reads
//! the same store on every inbound event to decide pass-through vs.
//! suppression. The host runtime supplies the store, the channel directory,
//! and outbound messaging via the traits in [`host`] and [`store`].

pub mod commands;
pub mod enforcer;
pub mod host;
pub mod store;

pub use {
    commands::DutyCommands,
    enforcer::{GateEnforcer, InboundEvent, Verdict},
    host::{ChannelDirectory, ChannelOutbound, DirectoryEntry},
    store::{DutyState, DutyStore},
};
