//! Network profiles of the Osmium chain.
//!
//! [`SelectedParams::select`] builds one profile from the registry, applies
//! the startup overrides allowed on devnet and regtest and wraps the result
//! together with the live quorum catalog. [`select_params`] does the same
//! for the process-wide handle read through [`params`].

pub mod args;
pub mod error;
pub mod global;
pub mod overrides;
pub mod params;
pub mod registry;
pub mod selected;

pub use args::ChainArgs;
pub use error::{ChainParamsError, Result};
pub use global::{params, select_params, try_params};
pub use overrides::{
    apply_overrides, parse_llmq_size, parse_vbparams, LlmqSizeOverride, VersionBitsOverride,
};
pub use params::ChainParams;
pub use registry::base_params;
pub use selected::SelectedParams;
