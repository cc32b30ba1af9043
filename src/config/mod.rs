pub mod file;
pub mod shell;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_pci_address, validate_positive_number, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "dlpar-harness")]
#[command(about = "Validates DLPAR add/remove/move of PCI and SR-IOV adapters through an HMC")]
pub struct CliConfig {
    /// SSH target of the HMC, as user@host
    #[arg(long, required_unless_present = "config")]
    pub hmc: Option<String>,

    /// SSH target of the partition's host OS; omit to run host commands locally
    #[arg(long)]
    pub host: Option<String>,

    /// Managed system name as known to the HMC
    #[arg(long, required_unless_present = "config")]
    pub managed_system: Option<String>,

    /// Name of the partition owning the adapter under test
    #[arg(long, required_unless_present = "config")]
    pub lpar_name: Option<String>,

    /// Destination partition for move validation; moves are skipped when unset
    #[arg(long)]
    pub target_lpar: Option<String>,

    /// Full PCI address of the adapter, e.g. 0001:08:00.0
    #[arg(long, required_unless_present = "config")]
    pub pci_device: Option<String>,

    /// Treat the adapter as an SR-IOV logical port
    #[arg(long)]
    pub sriov: bool,

    /// Number of remove/add/move iterations per scenario
    #[arg(long, default_value = "1")]
    pub iterations: usize,

    /// Load all settings from a TOML file instead of the flags above
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn managed_system(&self) -> &str {
        self.managed_system.as_deref().unwrap_or("")
    }

    fn lpar_name(&self) -> &str {
        self.lpar_name.as_deref().unwrap_or("")
    }

    fn target_lpar(&self) -> Option<&str> {
        self.target_lpar.as_deref()
    }

    fn pci_device(&self) -> &str {
        self.pci_device.as_deref().unwrap_or("")
    }

    fn sriov(&self) -> bool {
        self.sriov
    }

    fn iterations(&self) -> usize {
        self.iterations
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("hmc", self.hmc.as_deref().unwrap_or(""))?;
        validate_non_empty_string("managed_system", self.managed_system())?;
        validate_non_empty_string("lpar_name", self.lpar_name())?;
        validate_pci_address("pci_device", self.pci_device())?;
        validate_positive_number("iterations", self.iterations, 1)?;
        if let Some(target) = &self.target_lpar {
            validate_non_empty_string("target_lpar", target)?;
        }
        Ok(())
    }
}
