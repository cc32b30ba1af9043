use crate::core::commands::{chhwres, lshwres, HwresOp};
use crate::domain::model::{DlparContext, SlotDetails};
use crate::domain::ports::CommandRunner;
use crate::utils::error::{DlparError, Result};

/// Issues the DLPAR change commands against one slot and verifies each
/// effect by re-listing. Change commands are fire-and-forget; the listing
/// is the only feedback, so every operation ends with one.
pub struct DlparExecutor<'a, R: CommandRunner> {
    hmc: &'a R,
    ctx: &'a DlparContext,
}

impl<'a, R: CommandRunner> DlparExecutor<'a, R> {
    pub fn new(hmc: &'a R, ctx: &'a DlparContext) -> Self {
        Self { hmc, ctx }
    }

    /// Remove the slot from its owning partition, then assert the listing
    /// no longer names it.
    pub fn remove(&self) -> Result<()> {
        tracing::info!("dlpar remove of {}", self.resource());
        self.change(HwresOp::Remove)?;
        if self.listed_on(&self.ctx.lpar_name)? {
            return Err(self.verification_error(
                HwresOp::Remove,
                format!("still listed on lpar {} after remove", self.ctx.lpar_name),
            ));
        }
        Ok(())
    }

    /// Add the slot back to its owning partition, then assert the listing
    /// names it again.
    pub fn add(&self) -> Result<()> {
        tracing::info!("dlpar add of {}", self.resource());
        self.change(HwresOp::Add)?;
        if !self.listed_on(&self.ctx.lpar_name)? {
            return Err(self.verification_error(
                HwresOp::Add,
                format!("not listed on lpar {} after add", self.ctx.lpar_name),
            ));
        }
        Ok(())
    }

    /// Move the slot to the destination partition and back, asserting the
    /// listing state of both partitions after each leg. A run without a
    /// configured destination issues no command at all.
    pub fn move_round_trip(&self) -> Result<()> {
        let Some(dest) = self.ctx.dest.as_ref() else {
            tracing::debug!("no destination lpar configured, skipping move");
            return Ok(());
        };
        let SlotDetails::Io {
            drc_index, lpar_id, ..
        } = &self.ctx.slot
        else {
            tracing::warn!("move validation applies to io slots only, skipping for sriov");
            return Ok(());
        };

        tracing::info!(
            "dlpar move of {} from {} to {}",
            drc_index,
            self.ctx.lpar_name,
            dest.name
        );
        self.hmc.run_command(&chhwres::io_slot_move(
            &self.ctx.managed_system,
            lpar_id,
            &dest.name,
            drc_index,
        ))?;
        if self.listed_on(&self.ctx.lpar_name)? {
            return Err(self.verification_error(
                HwresOp::Move,
                format!(
                    "still listed on source lpar {} after move to {}",
                    self.ctx.lpar_name, dest.name
                ),
            ));
        }
        if !self.listed_on(&dest.name)? {
            return Err(self.verification_error(
                HwresOp::Move,
                format!("not listed on destination lpar {} after move", dest.name),
            ));
        }

        tracing::info!(
            "dlpar move of {} back from {} to {}",
            drc_index,
            dest.name,
            self.ctx.lpar_name
        );
        self.hmc.run_command(&chhwres::io_slot_move(
            &self.ctx.managed_system,
            &dest.lpar_id,
            &self.ctx.lpar_name,
            drc_index,
        ))?;
        if !self.listed_on(&self.ctx.lpar_name)? {
            return Err(self.verification_error(
                HwresOp::Move,
                format!(
                    "not listed on lpar {} after move back from {}",
                    self.ctx.lpar_name, dest.name
                ),
            ));
        }
        if self.listed_on(&dest.name)? {
            return Err(self.verification_error(
                HwresOp::Move,
                format!(
                    "still listed on destination lpar {} after move back to {}",
                    dest.name, self.ctx.lpar_name
                ),
            ));
        }
        Ok(())
    }

    fn change(&self, op: HwresOp) -> Result<()> {
        let cmd = match &self.ctx.slot {
            SlotDetails::Io {
                drc_index, lpar_id, ..
            } => chhwres::io_slot(&self.ctx.managed_system, op, lpar_id, drc_index),
            SlotDetails::Sriov {
                adapter_id,
                logical_port_id,
                phys_port_id,
                lpar_id,
                ..
            } => match op {
                HwresOp::Remove => chhwres::sriov_logport_remove(
                    &self.ctx.managed_system,
                    lpar_id,
                    adapter_id,
                    logical_port_id,
                ),
                HwresOp::Add => chhwres::sriov_logport_add(
                    &self.ctx.managed_system,
                    lpar_id,
                    phys_port_id,
                    adapter_id,
                    logical_port_id,
                ),
                HwresOp::Move => {
                    return Err(self.verification_error(
                        HwresOp::Move,
                        "sriov logical ports cannot be moved".to_string(),
                    ))
                }
            },
        };
        self.hmc.run_command(&cmd).map(|_| ())
    }

    /// Whether the listing for `lpar` still names the slot. The match is a
    /// plain substring scan over the unprojected listing, done here rather
    /// than with a remote grep.
    fn listed_on(&self, lpar: &str) -> Result<bool> {
        let cmd = if self.ctx.slot.is_sriov() {
            lshwres::sriov_logports(&self.ctx.managed_system, lpar)
        } else {
            lshwres::io_slots(&self.ctx.managed_system, lpar)
        };
        let output = self.hmc.run_command(&cmd)?;
        let key = self.ctx.slot.listing_key();
        let found = output.iter().any(|line| line.contains(key));
        tracing::debug!("{} listed on {}: {}", key, lpar, found);
        Ok(found)
    }

    fn resource(&self) -> &str {
        self.ctx.slot.listing_key()
    }

    fn verification_error(&self, op: HwresOp, detail: String) -> DlparError {
        DlparError::VerificationError {
            operation: op.name().to_string(),
            resource: self.resource().to_string(),
            detail,
        }
    }
}
