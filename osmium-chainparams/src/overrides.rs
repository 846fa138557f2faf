//! Startup overrides for the devnet and regtest profiles.
//!
//! Overrides run once, before the parameters are shared: [`apply_overrides`]
//! takes the freshly built parameters by value and hands back the adjusted
//! record. Main and test ignore every override.

use log::{info, warn};
use osmium_consensus::LlmqRole;
use osmium_shared_types::{DeploymentPos, LlmqType, Network};

use crate::args::ChainArgs;
use crate::error::{ChainParamsError, Result};
use crate::params::ChainParams;

const VBPARAMS_EXPECTED: &str = "<deployment>:<start>:<end> or \
     <deployment>:<start>:<end>:<window>:<threshold> or \
     <deployment>:<start>:<end>:<window>:<thresholdstart>:<thresholdmin>:<falloffcoeff>:<useehf>";

/// Parsed `-vbparams` value. Optional fields left as `None` keep the profile's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionBitsOverride {
    pub deployment: DeploymentPos,
    pub start_time: i64,
    pub timeout: i64,
    pub window_size: Option<i64>,
    pub threshold_start: Option<i64>,
    pub threshold_min: Option<i64>,
    pub falloff_coeff: Option<i64>,
    pub use_ehf: Option<bool>,
}

/// Parsed `<size>:<threshold>` quorum override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmqSizeOverride {
    pub size: u32,
    pub threshold: u32,
}

fn invalid(field: impl Into<String>, value: &str) -> ChainParamsError {
    ChainParamsError::InvalidOverrideValue { field: field.into(), value: value.to_string() }
}

fn parse_i64(field: &str, value: &str) -> Result<i64> {
    value.parse::<i64>().map_err(|_| invalid(field, value))
}

fn parse_i32(field: &str, value: &str) -> Result<i32> {
    value.parse::<i32>().map_err(|_| invalid(field, value))
}

/// An explicit `-1` means "leave unchanged".
fn unless_unset(value: i64) -> Option<i64> {
    (value != -1).then_some(value)
}

pub fn parse_vbparams(value: &str) -> Result<VersionBitsOverride> {
    let fields: Vec<&str> = value.split(':').collect();
    if !matches!(fields.len(), 3 | 5 | 8) {
        return Err(ChainParamsError::MalformedOverride {
            what: "Version bits",
            expected: VBPARAMS_EXPECTED,
        });
    }

    let start_time = parse_i64("nStartTime", fields[1])?;
    let timeout = parse_i64("nTimeout", fields[2])?;
    let (mut window_size, mut threshold_start) = (None, None);
    let (mut threshold_min, mut falloff_coeff, mut use_ehf) = (None, None, None);
    if fields.len() >= 5 {
        window_size = unless_unset(parse_i64("nWindowSize", fields[3])?);
        threshold_start = unless_unset(parse_i64("nThresholdStart", fields[4])?);
    }
    if fields.len() == 8 {
        threshold_min = unless_unset(parse_i64("nThresholdMin", fields[5])?);
        falloff_coeff = unless_unset(parse_i64("nFalloffCoeff", fields[6])?);
        use_ehf = unless_unset(parse_i64("nUseEHF", fields[7])?).map(|v| v > 0);
    }

    let deployment = DeploymentPos::from_name(fields[0])
        .ok_or_else(|| ChainParamsError::UnknownDeployment(fields[0].to_string()))?;

    Ok(VersionBitsOverride {
        deployment,
        start_time,
        timeout,
        window_size,
        threshold_start,
        threshold_min,
        falloff_coeff,
        use_ehf,
    })
}

/// Parses `<size>:<threshold>` for the quorum named `llmq_name`.
pub fn parse_llmq_size(llmq_name: &'static str, value: &str) -> Result<LlmqSizeOverride> {
    let fields: Vec<&str> = value.split(':').collect();
    if fields.len() != 2 {
        return Err(ChainParamsError::MalformedOverride {
            what: llmq_name,
            expected: "<size>:<threshold>",
        });
    }
    let size = parse_i32(&format!("{} size", llmq_name), fields[0])?;
    let threshold = parse_i32(&format!("{} threshold", llmq_name), fields[1])?;
    let size = u32::try_from(size).map_err(|_| invalid(format!("{} size", llmq_name), fields[0]))?;
    let threshold = u32::try_from(threshold)
        .map_err(|_| invalid(format!("{} threshold", llmq_name), fields[1]))?;
    Ok(LlmqSizeOverride { size, threshold })
}

/// Applies every override in `args` that `params.network` accepts.
pub fn apply_overrides(mut params: ChainParams, args: &ChainArgs) -> Result<ChainParams> {
    match params.network {
        Network::Main | Network::Test => {
            for option in args.regtest_options_set().into_iter().chain(args.devnet_options_set()) {
                warn!("Ignoring -{} on {}", option, params.network);
            }
        }
        Network::Regtest => {
            for option in args.devnet_options_set() {
                warn!("Ignoring devnet option -{} on regtest", option);
            }
            apply_regtest_overrides(&mut params, args)?;
        }
        Network::Devnet => {
            for option in args.regtest_options_set() {
                warn!("Ignoring regtest option -{} on devnet", option);
            }
            apply_devnet_overrides(&mut params, args)?;
        }
    }
    Ok(params)
}

fn apply_regtest_overrides(params: &mut ChainParams, args: &ChainArgs) -> Result<()> {
    for value in &args.vbparams {
        let vb = parse_vbparams(value)?;
        apply_version_bits(params, &vb);
    }

    if let Some(value) = &args.dip3params {
        let fields: Vec<&str> = value.split(':').collect();
        if fields.len() != 2 {
            return Err(ChainParamsError::MalformedOverride {
                what: "DIP3",
                expected: "<activation>:<enforcement>",
            });
        }
        let activation = parse_i32("activation height", fields[0])?;
        let enforcement = parse_i32("enforcement height", fields[1])?;
        info!("Setting DIP3 parameters to activation={}, enforcement={}", activation, enforcement);
        params.consensus.dip0003_height = activation;
        params.consensus.dip0003_enforcement_height = enforcement;
    }

    if let Some(value) = &args.dip8params {
        if value.split(':').count() != 1 {
            return Err(ChainParamsError::MalformedOverride {
                what: "DIP8",
                expected: "<activation>",
            });
        }
        let activation = parse_i32("activation height", value)?;
        info!("Setting DIP8 parameters to activation={}", activation);
        params.consensus.dip0008_height = activation;
    }

    if let Some(value) = &args.budgetparams {
        let fields: Vec<&str> = value.split(':').collect();
        if fields.len() != 3 {
            return Err(ChainParamsError::MalformedOverride {
                what: "Budget",
                expected: "<masternode>:<budget>:<superblock>",
            });
        }
        let masternode = parse_i32("masternode start height", fields[0])?;
        let budget = parse_i32("budget start block", fields[1])?;
        let superblock = parse_i32("superblock start height", fields[2])?;
        info!(
            "Setting budget parameters to masternode={}, budget={}, superblock={}",
            masternode, budget, superblock
        );
        params.consensus.masternode_payments_start_block = masternode;
        params.consensus.budget_payments_start_block = budget;
        params.consensus.superblock_start_block = superblock;
    }

    if let Some(value) = &args.llmqtestparams {
        let sizes = parse_llmq_size("LLMQ_TEST", value)?;
        resize_llmq(params, LlmqType::Test, "LLMQ_TEST", sizes)?;
    }
    if let Some(value) = &args.llmqtestinstantsendparams {
        let sizes = parse_llmq_size("LLMQ_TEST_INSTANTSEND", value)?;
        resize_llmq(params, LlmqType::TestInstantSend, "LLMQ_TEST_INSTANTSEND", sizes)?;
    }
    if let Some(name) = &args.llmqtestinstantsenddip0024 {
        assign_role(params, LlmqRole::InstantSend, "llmqtestinstantsenddip0024", name)?;
    }
    Ok(())
}

fn apply_devnet_overrides(params: &mut ChainParams, args: &ChainArgs) -> Result<()> {
    if args.minimumdifficultyblocks.is_some()
        || args.highsubsidyblocks.is_some()
        || args.highsubsidyfactor.is_some()
    {
        let consensus = &mut params.consensus;
        if let Some(value) = &args.minimumdifficultyblocks {
            consensus.minimum_difficulty_blocks = parse_i32("minimumdifficultyblocks", value)?;
        }
        if let Some(value) = &args.highsubsidyblocks {
            consensus.high_subsidy_blocks = parse_i32("highsubsidyblocks", value)?;
        }
        if let Some(value) = &args.highsubsidyfactor {
            consensus.high_subsidy_factor = parse_i32("highsubsidyfactor", value)?;
        }
        info!(
            "Setting minimumdifficultyblocks={}, highsubsidyblocks={}, highsubsidyfactor={}",
            consensus.minimum_difficulty_blocks,
            consensus.high_subsidy_blocks,
            consensus.high_subsidy_factor
        );
    }

    let roles = [
        (LlmqRole::ChainLocks, "llmqchainlocks", &args.llmqchainlocks),
        (LlmqRole::InstantSend, "llmqinstantsenddip0024", &args.llmqinstantsenddip0024),
        (LlmqRole::Platform, "llmqplatform", &args.llmqplatform),
        (LlmqRole::Mnhf, "llmqmnhf", &args.llmqmnhf),
    ];
    for (role, option, value) in roles {
        if let Some(name) = value {
            assign_role(params, role, option, name)?;
        }
    }

    if let Some(value) = &args.llmqdevnetparams {
        let sizes = parse_llmq_size("LLMQ_DEVNET", value)?;
        resize_llmq(params, LlmqType::Devnet, "LLMQ_DEVNET", sizes)?;
    }

    if let Some(value) = &args.powtargetspacing {
        let spacing = value
            .parse::<i64>()
            .map_err(|_| invalid("parsing of powTargetSpacing", value))?;
        if spacing < 1 {
            return Err(invalid("value of powTargetSpacing", value));
        }
        info!("Setting powTargetSpacing to {}", spacing);
        params.consensus.pow_target_spacing = spacing;
    }
    Ok(())
}

fn apply_version_bits(params: &mut ChainParams, vb: &VersionBitsOverride) {
    let deployment = &mut params.consensus.deployments[vb.deployment];
    deployment.start_time = vb.start_time;
    deployment.timeout = vb.timeout;
    if let Some(window_size) = vb.window_size {
        deployment.window_size = window_size;
    }
    if let Some(threshold_start) = vb.threshold_start {
        deployment.threshold_start = threshold_start;
    }
    if let Some(threshold_min) = vb.threshold_min {
        deployment.threshold_min = threshold_min;
    }
    if let Some(falloff_coeff) = vb.falloff_coeff {
        deployment.falloff_coeff = falloff_coeff;
    }
    if let Some(use_ehf) = vb.use_ehf {
        deployment.use_ehf = use_ehf;
    }
    info!(
        "Setting version bits activation parameters for {} to start={}, timeout={}, window={}, \
         thresholdstart={}, thresholdmin={}, falloffcoeff={}, useehf={}",
        vb.deployment.name(),
        deployment.start_time,
        deployment.timeout,
        deployment.window_size,
        deployment.threshold_start,
        deployment.threshold_min,
        deployment.falloff_coeff,
        deployment.use_ehf
    );
}

/// Replaces the `llmq_type` record with a copy carrying the new sizes.
fn resize_llmq(
    params: &mut ChainParams,
    llmq_type: LlmqType,
    llmq_name: &'static str,
    sizes: LlmqSizeOverride,
) -> Result<()> {
    let mut record = *params.consensus.llmqs.get(llmq_type).ok_or_else(|| {
        ChainParamsError::InvalidLlmqType { option: llmq_name, name: llmq_type.to_string() }
    })?;
    record.size = sizes.size;
    record.min_size = sizes.threshold;
    record.threshold = sizes.threshold;
    record.dkg_bad_votes_threshold = sizes.threshold;
    params.consensus.llmqs.replace(llmq_type, record);
    info!(
        "Setting {} parameters to size={}, threshold={}",
        llmq_name, sizes.size, sizes.threshold
    );
    Ok(())
}

/// Points `role` at the catalog entry called `name`.
fn assign_role(
    params: &mut ChainParams,
    role: LlmqRole,
    option: &'static str,
    name: &str,
) -> Result<()> {
    let record = params
        .consensus
        .llmqs
        .iter()
        .map(|(_, record)| *record)
        .find(|record| record.name == name)
        .ok_or_else(|| ChainParamsError::InvalidLlmqType { option, name: name.to_string() })?;

    if record.use_rotation != role.requires_rotation() {
        let rule = if role.requires_rotation() { "must use rotation" } else { "must NOT use rotation" };
        return Err(ChainParamsError::LlmqRotationMismatch { option, name: name.to_string(), rule });
    }

    params.consensus.set_llmq_type_for(role, record.llmq_type);
    info!("Setting {} to {}", option, record.llmq_type);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vbparams_field_counts() {
        assert!(parse_vbparams("mn_rr:0:100").is_ok());
        assert!(parse_vbparams("mn_rr:0:100:10:8").is_ok());
        assert!(parse_vbparams("mn_rr:0:100:10:8:6:5:1").is_ok());
        for bad in ["mn_rr", "mn_rr:0", "mn_rr:0:100:10", "mn_rr:0:100:10:8:6", "mn_rr:0:100:10:8:6:5:1:9"] {
            assert!(matches!(
                parse_vbparams(bad),
                Err(ChainParamsError::MalformedOverride { what: "Version bits", .. })
            ));
        }
    }

    #[test]
    fn vbparams_bad_integers_name_the_field() {
        assert_eq!(
            parse_vbparams("v20:soon:100"),
            Err(ChainParamsError::InvalidOverrideValue {
                field: "nStartTime".into(),
                value: "soon".into()
            })
        );
        assert!(matches!(
            parse_vbparams("v20:0:100:10:8:6:5:yes"),
            Err(ChainParamsError::InvalidOverrideValue { ref field, .. }) if field == "nUseEHF"
        ));
    }

    #[test]
    fn vbparams_unknown_deployment() {
        assert_eq!(
            parse_vbparams("segwit:0:100"),
            Err(ChainParamsError::UnknownDeployment("segwit".into()))
        );
    }

    #[test]
    fn vbparams_minus_one_keeps_value() {
        let vb = parse_vbparams("v20:1:2:-1:30:-1:-1:0").unwrap();
        assert_eq!(vb.window_size, None);
        assert_eq!(vb.threshold_start, Some(30));
        assert_eq!(vb.use_ehf, Some(false));
    }

    #[test]
    fn llmq_size_parsing() {
        assert_eq!(
            parse_llmq_size("LLMQ_TEST", "5:3"),
            Ok(LlmqSizeOverride { size: 5, threshold: 3 })
        );
        assert!(matches!(
            parse_llmq_size("LLMQ_TEST", "5"),
            Err(ChainParamsError::MalformedOverride { what: "LLMQ_TEST", .. })
        ));
        assert!(parse_llmq_size("LLMQ_TEST", "-5:3").is_err());
    }
}
