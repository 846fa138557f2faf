//! The process-wide handle. Kept in its own test binary so nothing else
//! in the suite observes the selection.

use osmium_chainparams::{params, select_params, try_params, ChainArgs, ChainParamsError};
use osmium_shared_types::Network;

#[test]
fn selection_happens_once() {
    assert_eq!(try_params().unwrap_err(), ChainParamsError::NotSelected);
    assert!(std::panic::catch_unwind(params).is_err());

    // a failed selection leaves the handle unset
    let bad = ChainArgs { dip3params: Some("nope".into()), ..Default::default() };
    assert!(select_params(Network::Regtest, &bad, None).is_err());
    assert!(try_params().is_err());

    let selected = select_params(Network::Regtest, &ChainArgs::default(), None).unwrap();
    assert_eq!(params().network(), Network::Regtest);
    assert!(std::sync::Arc::ptr_eq(&selected, &params()));

    assert_eq!(
        select_params(Network::Main, &ChainArgs::default(), None).unwrap_err(),
        ChainParamsError::AlreadySelected(Network::Regtest)
    );
    assert_eq!(params().network(), Network::Regtest);
}
