//! mpx Player Embed
//!
//! Renders media fields as embedded mpx video players. The data service
//! client lives in [`mpx_client`]; the field formatter in [`player_formatter`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use mpx_client;
pub use player_formatter;

pub use mpx_client::{ClientRegistry, DataServiceConfig, RemoteFetchError};
pub use player_formatter::{FormRenderPass, FormatterSettings, PlayerFormatter};
