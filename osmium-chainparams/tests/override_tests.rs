//! Startup overrides on the devnet and regtest profiles.

use osmium_chainparams::{parse_llmq_size, parse_vbparams, ChainArgs, ChainParamsError, SelectedParams};
use osmium_shared_types::{DeploymentPos, LlmqType, Network};
use proptest::prelude::*;

fn regtest(args: ChainArgs) -> Result<SelectedParams, ChainParamsError> {
    SelectedParams::select(Network::Regtest, &args, None)
}

fn devnet(args: ChainArgs) -> Result<SelectedParams, ChainParamsError> {
    SelectedParams::select(Network::Devnet, &args, None)
}

#[test]
fn vbparams_with_four_fields_is_rejected() {
    let args = ChainArgs { vbparams: vec!["mn_rr:0:100:10".into()], ..Default::default() };
    let err = regtest(args).unwrap_err();
    assert!(matches!(err, ChainParamsError::MalformedOverride { what: "Version bits", .. }));
    assert!(err.to_string().starts_with("Version bits parameters malformed, expecting"));
}

#[test]
fn vbparams_with_eight_fields_updates_deployment() {
    let args = ChainArgs {
        vbparams: vec!["mn_rr:100:200:30:20:10:3:0".into()],
        ..Default::default()
    };
    let selected = regtest(args).unwrap();
    let mn_rr = selected.params().consensus.deployments[DeploymentPos::MnRr];
    assert_eq!(mn_rr.start_time, 100);
    assert_eq!(mn_rr.timeout, 200);
    assert_eq!(mn_rr.window_size, 30);
    assert_eq!(mn_rr.threshold_start, 20);
    assert_eq!(mn_rr.threshold_min, 10);
    assert_eq!(mn_rr.falloff_coeff, 3);
    assert!(!mn_rr.use_ehf);
    assert!(!selected.is_valid_mn_activation(mn_rr.bit, 150));
}

#[test]
fn vbparams_drive_activation_window() {
    let args = ChainArgs {
        vbparams: vec!["mn_rr:0:100:-1:-1:-1:-1:1".into()],
        ..Default::default()
    };
    let selected = regtest(args).unwrap();
    let bit = selected.params().consensus.deployments[DeploymentPos::MnRr].bit;
    assert!(selected.is_valid_mn_activation(bit, 50));
    assert!(!selected.is_valid_mn_activation(bit, 150));
    assert!(!selected.is_valid_mn_activation(bit, -1));
    // -1 kept the profile's window
    assert_eq!(selected.params().consensus.deployments[DeploymentPos::MnRr].window_size, 12);
}

#[test]
fn repeated_vbparams_apply_in_order() {
    let args = ChainArgs {
        vbparams: vec!["v20:1:2".into(), "testdummy:5:6".into(), "v20:3:4".into()],
        ..Default::default()
    };
    let selected = regtest(args).unwrap();
    let deployments = &selected.params().consensus.deployments;
    assert_eq!((deployments[DeploymentPos::V20].start_time, deployments[DeploymentPos::V20].timeout), (3, 4));
    assert_eq!(deployments[DeploymentPos::TestDummy].start_time, 5);
}

#[test]
fn regtest_heights() {
    let args = ChainArgs {
        dip3params: Some("100:150".into()),
        dip8params: Some("120".into()),
        budgetparams: Some("10:20:30".into()),
        ..Default::default()
    };
    let selected = regtest(args).unwrap();
    let consensus = &selected.params().consensus;
    assert_eq!((consensus.dip0003_height, consensus.dip0003_enforcement_height), (100, 150));
    assert_eq!(consensus.dip0008_height, 120);
    assert_eq!(consensus.masternode_payments_start_block, 10);
    assert_eq!(consensus.budget_payments_start_block, 20);
    assert_eq!(consensus.superblock_start_block, 30);
}

#[test]
fn regtest_height_errors() {
    let err = regtest(ChainArgs { dip3params: Some("100".into()), ..Default::default() }).unwrap_err();
    assert_eq!(
        err.to_string(),
        "DIP3 parameters malformed, expecting <activation>:<enforcement>"
    );

    let err = regtest(ChainArgs { dip3params: Some("x:150".into()), ..Default::default() }).unwrap_err();
    assert_eq!(err.to_string(), "Invalid activation height (x)");

    let err = regtest(ChainArgs { budgetparams: Some("1:2".into()), ..Default::default() }).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Budget parameters malformed, expecting <masternode>:<budget>:<superblock>"
    );
}

#[test]
fn llmq_test_resize_replaces_record() {
    let args = ChainArgs { llmqtestparams: Some("5:3".into()), ..Default::default() };
    let selected = regtest(args).unwrap();
    let test = selected.get_llmq(LlmqType::Test).unwrap();
    assert_eq!((test.size, test.min_size, test.threshold, test.dkg_bad_votes_threshold), (5, 3, 3, 3));
    assert_eq!(test.name, "llmq_test");
    // other records untouched
    assert_eq!(selected.get_llmq(LlmqType::TestInstantSend).unwrap().size, 3);
}

#[test]
fn regtest_instantsend_requires_rotation() {
    let ok = ChainArgs { llmqtestinstantsenddip0024: Some("llmq_test_dip0024".into()), ..Default::default() };
    let selected = regtest(ok).unwrap();
    assert_eq!(selected.params().consensus.llmq_type_dip0024_instantsend, LlmqType::TestDip0024);

    let bad = ChainArgs { llmqtestinstantsenddip0024: Some("llmq_test".into()), ..Default::default() };
    assert!(matches!(
        regtest(bad),
        Err(ChainParamsError::LlmqRotationMismatch { option: "llmqtestinstantsenddip0024", .. })
    ));
}

#[test]
fn devnet_role_overrides() {
    let args = ChainArgs {
        llmqchainlocks: Some("llmq_50_60".into()),
        llmqplatform: Some("llmq_100_67".into()),
        llmqmnhf: Some("llmq_devnet_platform".into()),
        ..Default::default()
    };
    let selected = devnet(args).unwrap();
    let consensus = &selected.params().consensus;
    assert_eq!(consensus.llmq_type_chainlocks, LlmqType::Llmq50_60);
    assert_eq!(consensus.llmq_type_platform, LlmqType::Llmq100_67);
    assert_eq!(consensus.llmq_type_mnhf, LlmqType::DevnetPlatform);
    assert_eq!(consensus.llmq_type_dip0024_instantsend, LlmqType::DevnetDip0024);
}

#[test]
fn devnet_role_errors() {
    let rotating = ChainArgs { llmqchainlocks: Some("llmq_devnet_dip0024".into()), ..Default::default() };
    assert_eq!(
        devnet(rotating).unwrap_err().to_string(),
        "LLMQ type llmq_devnet_dip0024 specified for -llmqchainlocks must NOT use rotation"
    );

    let flat = ChainArgs { llmqinstantsenddip0024: Some("llmq_devnet".into()), ..Default::default() };
    assert!(matches!(devnet(flat), Err(ChainParamsError::LlmqRotationMismatch { .. })));

    let unknown = ChainArgs { llmqplatform: Some("llmq_test".into()), ..Default::default() };
    assert_eq!(
        devnet(unknown).unwrap_err(),
        ChainParamsError::InvalidLlmqType { option: "llmqplatform", name: "llmq_test".into() }
    );
}

#[test]
fn devnet_subsidy_and_spacing() {
    let args = ChainArgs {
        highsubsidyblocks: Some("500".into()),
        highsubsidyfactor: Some("10".into()),
        powtargetspacing: Some("30".into()),
        llmqdevnetparams: Some("8:5".into()),
        ..Default::default()
    };
    let selected = devnet(args).unwrap();
    let consensus = &selected.params().consensus;
    assert_eq!(consensus.minimum_difficulty_blocks, 0);
    assert_eq!(consensus.high_subsidy_blocks, 500);
    assert_eq!(consensus.high_subsidy_factor, 10);
    assert_eq!(consensus.pow_target_spacing, 30);
    assert_eq!(selected.get_llmq(LlmqType::Devnet).unwrap().size, 8);
}

#[test]
fn devnet_spacing_must_be_positive() {
    let zero = ChainArgs { powtargetspacing: Some("0".into()), ..Default::default() };
    assert_eq!(devnet(zero).unwrap_err().to_string(), "Invalid value of powTargetSpacing (0)");
    let text = ChainArgs { powtargetspacing: Some("fast".into()), ..Default::default() };
    assert_eq!(
        devnet(text).unwrap_err().to_string(),
        "Invalid parsing of powTargetSpacing (fast)"
    );
}

#[test]
fn production_profiles_ignore_overrides() {
    let args = ChainArgs {
        dip3params: Some("1:2".into()),
        vbparams: vec!["bogus".into()],
        powtargetspacing: Some("0".into()),
        ..Default::default()
    };
    for network in [Network::Main, Network::Test] {
        let plain = SelectedParams::select(network, &ChainArgs::default(), None).unwrap();
        let overridden = SelectedParams::select(network, &args, None).unwrap();
        assert_eq!(plain.params(), overridden.params());
    }
}

#[test]
fn options_for_the_other_test_profile_are_ignored() {
    let devnet_only = ChainArgs { powtargetspacing: Some("0".into()), ..Default::default() };
    assert!(regtest(devnet_only).is_ok());
    let regtest_only = ChainArgs { dip8params: Some("x".into()), ..Default::default() };
    assert!(devnet(regtest_only).is_ok());
}

proptest! {
    #[test]
    fn override_parsing_never_panics(value in ".{0,40}") {
        let _ = parse_vbparams(&value);
        let _ = parse_llmq_size("LLMQ_TEST", &value);
    }

    #[test]
    fn colon_separated_integers_parse(a in -5i64..1000, b in -5i64..1000, w in 0i64..5000) {
        let vb = parse_vbparams(&format!("v20:{}:{}:{}:{}", a, b, w, w / 2)).unwrap();
        prop_assert_eq!(vb.deployment, DeploymentPos::V20);
        prop_assert_eq!((vb.start_time, vb.timeout), (a, b));
        prop_assert_eq!(vb.window_size, Some(w));
    }
}
