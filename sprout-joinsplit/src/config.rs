//! Configuration for JoinSplit proving and verification.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use sprout_chain::parameters::Network;

/// The file name of the Sprout Groth16 parameters.
pub const SPROUT_PARAMETERS_FILE: &str = "sprout-groth16.params";

/// Configuration for the Sprout proving system.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// The network whose chain parameters are in use.
    pub network: Network,

    /// The directory containing the Zcash parameter files.
    ///
    /// Defaults to the platform's Zcash parameters folder, if there is one.
    pub parameters_dir: Option<PathBuf>,

    /// The Sprout Groth16 parameter file name, relative to `parameters_dir`.
    pub sprout_parameters_file: String,

    /// Skip the preload of Groth16 parameters if this option is true.
    pub debug_skip_parameter_preload: bool,
}

impl Config {
    /// Returns the full path of the Sprout Groth16 parameters, if the
    /// parameters folder is known.
    pub fn sprout_parameters_path(&self) -> Option<PathBuf> {
        self.parameters_dir
            .as_ref()
            .map(|dir| dir.join(&self.sprout_parameters_file))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: Network::default(),
            parameters_dir: zcash_proofs::default_params_folder(),
            sprout_parameters_file: SPROUT_PARAMETERS_FILE.to_string(),
            debug_skip_parameter_preload: false,
        }
    }
}
