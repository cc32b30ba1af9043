use crate::core::commands::{drmgr, DrmgrAction};
use crate::core::executor::DlparExecutor;
use crate::core::{lookup, preflight, slot};
use crate::domain::model::{DestLpar, DlparContext};
use crate::domain::ports::{CommandRunner, ConfigProvider};
use crate::utils::error::{DlparError, Result};

/// Drives the three validation scenarios against one adapter slot. Owns the
/// HMC and host shell sessions plus the settings resolved from config;
/// `setup` fills in the immutable slot context the scenarios read.
pub struct DlparHarness<H: CommandRunner, O: CommandRunner> {
    hmc: H,
    host: O,
    managed_system: String,
    lpar_name: String,
    target_lpar: Option<String>,
    pci_device: String,
    sriov: bool,
    iterations: usize,
    ctx: Option<DlparContext>,
}

impl<H: CommandRunner, O: CommandRunner> DlparHarness<H, O> {
    pub fn new<C: ConfigProvider>(hmc: H, host: O, config: &C) -> Self {
        Self {
            hmc,
            host,
            managed_system: config.managed_system().to_string(),
            lpar_name: config.lpar_name().to_string(),
            target_lpar: config.target_lpar().map(str::to_string),
            pci_device: config.pci_device().to_string(),
            sriov: config.sriov(),
            iterations: config.iterations(),
            ctx: None,
        }
    }

    /// Preconditions and discovery, run once before any scenario: both
    /// partitions must exist, the RSCT stack must be up, and the slot's
    /// identifiers are resolved and cached.
    pub fn setup(&mut self) -> Result<()> {
        self.require_lpar(&self.lpar_name)?;
        if let Some(target) = &self.target_lpar {
            self.require_lpar(target)?;
        }

        preflight::check_packages(&self.host)?;
        preflight::ensure_rsct_active(&self.host)?;

        let dest = match &self.target_lpar {
            Some(target) => Some(DestLpar {
                name: target.clone(),
                lpar_id: lookup::dest_lpar_id(&self.hmc, &self.managed_system, target)?,
            }),
            None => None,
        };

        let location_code = slot::resolve_location_code(&self.host, &self.pci_device)?;
        tracing::info!("location code for {}: {}", self.pci_device, location_code);

        let slot = lookup::slot_details(
            &self.hmc,
            &self.managed_system,
            &self.lpar_name,
            &location_code,
            self.sriov,
        )?;
        tracing::info!("slot details: {:?}", slot);

        self.ctx = Some(DlparContext {
            managed_system: self.managed_system.clone(),
            lpar_name: self.lpar_name.clone(),
            location_code,
            slot,
            dest,
        });
        Ok(())
    }

    /// Generic DLPAR cycle: remove, add, move round trip, repeated for the
    /// configured iteration count.
    pub fn io_cycle(&self) -> Result<()> {
        let ctx = self.context()?;
        let executor = DlparExecutor::new(&self.hmc, ctx);
        for iteration in 1..=self.iterations {
            tracing::info!("dlpar io cycle, iteration {}/{}", iteration, self.iterations);
            executor.remove()?;
            executor.add()?;
            executor.move_round_trip()?;
        }
        Ok(())
    }

    /// PCI hot-plug through the host's `drmgr -c pci`: remove/add cycles
    /// followed by a forced-remove pass.
    pub fn drmgr_pci(&self) -> Result<()> {
        let ctx = self.context()?;
        for iteration in 1..=self.iterations {
            tracing::info!("drmgr pci cycle, iteration {}/{}", iteration, self.iterations);
            self.host
                .run_command(&drmgr::pci(&ctx.location_code, DrmgrAction::Remove))?;
            self.host
                .run_command(&drmgr::pci(&ctx.location_code, DrmgrAction::Add))?;
        }
        for iteration in 1..=self.iterations {
            tracing::info!(
                "drmgr pci forced remove, iteration {}/{}",
                iteration,
                self.iterations
            );
            self.host
                .run_command(&drmgr::pci(&ctx.location_code, DrmgrAction::ForcedRemove))?;
        }
        Ok(())
    }

    /// PHB hot-plug through the host's `drmgr -c phb`.
    pub fn drmgr_phb(&self) -> Result<()> {
        let ctx = self.context()?;
        let phb = ctx.slot.phb();
        for iteration in 1..=self.iterations {
            tracing::info!("drmgr phb cycle, iteration {}/{}", iteration, self.iterations);
            self.host
                .run_command(&drmgr::phb(phb, DrmgrAction::Remove))?;
            self.host.run_command(&drmgr::phb(phb, DrmgrAction::Add))?;
        }
        Ok(())
    }

    /// The full suite: the three scenarios in sequence, aborting on the
    /// first failure.
    pub fn run_suite(&self) -> Result<()> {
        tracing::info!("running dlpar io cycle scenario");
        self.io_cycle()?;
        tracing::info!("running drmgr pci scenario");
        self.drmgr_pci()?;
        tracing::info!("running drmgr phb scenario");
        self.drmgr_phb()?;
        Ok(())
    }

    pub fn context(&self) -> Result<&DlparContext> {
        self.ctx.as_ref().ok_or_else(|| DlparError::ConfigError {
            message: "setup() must run before scenarios".to_string(),
        })
    }

    fn require_lpar(&self, lpar: &str) -> Result<()> {
        if lookup::lpar_exists(&self.hmc, &self.managed_system, lpar)? {
            Ok(())
        } else {
            Err(DlparError::LparNotFoundError {
                lpar: lpar.to_string(),
                managed_system: self.managed_system.clone(),
            })
        }
    }
}
