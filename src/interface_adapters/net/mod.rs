// Network adapter for the persistent external trigger channel.

pub mod trigger;

pub use trigger::{ChannelError, TriggerChannel, connect_trigger_channel};
