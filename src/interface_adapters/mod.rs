// Interface adapters: wire protocol, external channel and HTTP clients, local input.

pub mod clients;
pub mod input;
pub mod net;
pub mod protocol;
