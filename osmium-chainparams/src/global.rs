//! Process-wide handle to the selected parameters.
//!
//! Selection happens once per process. Code that already holds an
//! `Arc<SelectedParams>` should pass it along instead of going through here.

use std::sync::{Arc, OnceLock};

use osmium_consensus::PowHasher;
use osmium_shared_types::Network;

use crate::args::ChainArgs;
use crate::error::{ChainParamsError, Result};
use crate::selected::SelectedParams;

static SELECTED: OnceLock<Arc<SelectedParams>> = OnceLock::new();

/// Selects `network` for the rest of the process lifetime.
///
/// Fails with [`ChainParamsError::AlreadySelected`] on a second call, and
/// leaves the handle unset if building the parameters fails.
pub fn select_params(
    network: Network,
    args: &ChainArgs,
    hasher: Option<&dyn PowHasher>,
) -> Result<Arc<SelectedParams>> {
    if let Some(current) = SELECTED.get() {
        return Err(ChainParamsError::AlreadySelected(current.network()));
    }
    let selected = Arc::new(SelectedParams::select(network, args, hasher)?);
    // a concurrent caller may have won the race since the check above
    SELECTED.set(Arc::clone(&selected)).map_err(|_| {
        ChainParamsError::AlreadySelected(SELECTED.get().map_or(network, |c| c.network()))
    })?;
    Ok(selected)
}

/// The selected parameters.
///
/// # Panics
///
/// Panics if [`select_params`] has not succeeded yet.
pub fn params() -> Arc<SelectedParams> {
    match try_params() {
        Ok(selected) => selected,
        Err(_) => panic!("chain parameters accessed before select_params"),
    }
}

pub fn try_params() -> Result<Arc<SelectedParams>> {
    SELECTED.get().cloned().ok_or(ChainParamsError::NotSelected)
}
