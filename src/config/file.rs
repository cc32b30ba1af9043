use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DlparError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_pci_address, validate_positive_number, Validate,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_iterations() -> usize {
    1
}

/// The same settings as the CLI flags, loadable from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub hmc: String,
    pub host: Option<String>,
    pub managed_system: String,
    pub lpar_name: String,
    pub target_lpar: Option<String>,
    pub pci_device: String,
    #[serde(default)]
    pub sriov: bool,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
}

impl FileConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| DlparError::ConfigError {
            message: format!("{}: {}", path.display(), e),
        })
    }
}

impl ConfigProvider for FileConfig {
    fn managed_system(&self) -> &str {
        &self.managed_system
    }

    fn lpar_name(&self) -> &str {
        &self.lpar_name
    }

    fn target_lpar(&self) -> Option<&str> {
        self.target_lpar.as_deref()
    }

    fn pci_device(&self) -> &str {
        &self.pci_device
    }

    fn sriov(&self) -> bool {
        self.sriov
    }

    fn iterations(&self) -> usize {
        self.iterations
    }
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("hmc", &self.hmc)?;
        validate_non_empty_string("managed_system", &self.managed_system)?;
        validate_non_empty_string("lpar_name", &self.lpar_name)?;
        validate_pci_address("pci_device", &self.pci_device)?;
        validate_positive_number("iterations", self.iterations, 1)?;
        Ok(())
    }
}
