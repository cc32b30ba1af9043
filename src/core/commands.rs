//! Command builders for the vendor CLIs driven by the harness.
//!
//! The argument grammars of `lshwres`, `chhwres`, `drmgr` and `lssyscfg` are
//! fixed by the HMC/host tooling; centralizing them here keeps identifier
//! interpolation out of the operation code.

/// `chhwres -o` operation codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwresOp {
    Add,
    Remove,
    Move,
}

impl HwresOp {
    pub fn flag(self) -> &'static str {
        match self {
            HwresOp::Add => "a",
            HwresOp::Remove => "r",
            HwresOp::Move => "m",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HwresOp::Add => "add",
            HwresOp::Remove => "remove",
            HwresOp::Move => "move",
        }
    }
}

/// `drmgr` connector classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrmgrClass {
    Pci,
    Phb,
}

impl DrmgrClass {
    fn flag(self) -> &'static str {
        match self {
            DrmgrClass::Pci => "pci",
            DrmgrClass::Phb => "phb",
        }
    }
}

/// `drmgr` hot-plug actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrmgrAction {
    Remove,
    Add,
    /// `-R`: remove without waiting for the OS to quiesce the slot.
    ForcedRemove,
}

impl DrmgrAction {
    fn flag(self) -> &'static str {
        match self {
            DrmgrAction::Remove => "r",
            DrmgrAction::Add => "a",
            DrmgrAction::ForcedRemove => "R",
        }
    }
}

pub mod lshwres {
    /// List io slots of one lpar, projecting the fields the detail lookup
    /// splits apart: drc_index, lpar_id, drc_name, bus_id.
    pub fn io_slot_details(managed_system: &str, lpar: &str) -> String {
        format!(
            "lshwres -r io -m {} --rsubtype slot --filter lpar_names={} \
             -F drc_index,lpar_id,drc_name,bus_id",
            managed_system, lpar
        )
    }

    /// List SR-IOV ethernet logical ports of one lpar with the projection
    /// used by the detail lookup.
    pub fn sriov_logport_details(managed_system: &str, lpar: &str) -> String {
        format!(
            "lshwres -r sriov -m {} --rsubtype logport --level eth --filter lpar_names={} \
             -F adapter_id,logical_port_id,phys_port_id,lpar_id,location_code,drc_name",
            managed_system, lpar
        )
    }

    /// Unprojected io slot listing, scanned when verifying add/remove/move.
    pub fn io_slots(managed_system: &str, lpar: &str) -> String {
        format!(
            "lshwres -r io -m {} --rsubtype slot --filter lpar_names={}",
            managed_system, lpar
        )
    }

    /// Unprojected SR-IOV logical port listing for verification.
    pub fn sriov_logports(managed_system: &str, lpar: &str) -> String {
        format!(
            "lshwres -r sriov -m {} --rsubtype logport --level eth --filter lpar_names={}",
            managed_system, lpar
        )
    }

    /// The numeric lpar id of a partition, via the io slot listing.
    pub fn lpar_id(managed_system: &str, lpar: &str) -> String {
        format!(
            "lshwres -r io -m {} --rsubtype slot --filter lpar_names={} -F lpar_id",
            managed_system, lpar
        )
    }
}

pub mod chhwres {
    use super::HwresOp;

    /// Add or remove an io slot on the partition owning it.
    pub fn io_slot(managed_system: &str, op: HwresOp, lpar_id: &str, drc_index: &str) -> String {
        debug_assert!(op != HwresOp::Move, "moves need a target partition");
        format!(
            "chhwres -r io --rsubtype slot -m {} -o {} --id {} -l {}",
            managed_system,
            op.flag(),
            lpar_id,
            drc_index
        )
    }

    /// Move an io slot from the partition with `src_lpar_id` to the
    /// partition named `dest_lpar`.
    pub fn io_slot_move(
        managed_system: &str,
        src_lpar_id: &str,
        dest_lpar: &str,
        drc_index: &str,
    ) -> String {
        format!(
            "chhwres -r io --rsubtype slot -m {} -o m --id {} -t {} -l {}",
            managed_system, src_lpar_id, dest_lpar, drc_index
        )
    }

    pub fn sriov_logport_remove(
        managed_system: &str,
        lpar_id: &str,
        adapter_id: &str,
        logical_port_id: &str,
    ) -> String {
        format!(
            "chhwres -r sriov -m {} --rsubtype logport -o r --id {} \
             -a adapter_id={},logical_port_id={}",
            managed_system, lpar_id, adapter_id, logical_port_id
        )
    }

    pub fn sriov_logport_add(
        managed_system: &str,
        lpar_id: &str,
        phys_port_id: &str,
        adapter_id: &str,
        logical_port_id: &str,
    ) -> String {
        format!(
            "chhwres -r sriov -m {} --rsubtype logport -o a --id {} \
             -a phys_port_id={},adapter_id={},logical_port_id={},logical_port_type=eth",
            managed_system, lpar_id, phys_port_id, adapter_id, logical_port_id
        )
    }
}

pub mod drmgr {
    use super::{DrmgrAction, DrmgrClass};

    /// Hot-plug a PCI slot by location code. drmgr prompts for confirmation
    /// in this mode, hence the piped newline.
    pub fn pci(location_code: &str, action: DrmgrAction) -> String {
        format!(
            "echo -e \"\\n\" | drmgr -c {} -s {} -{}",
            DrmgrClass::Pci.flag(),
            location_code,
            action.flag()
        )
    }

    /// Hot-plug a PCI host bridge. The slot name drmgr expects is the
    /// literal string `PHB <id>`.
    pub fn phb(phb_id: &str, action: DrmgrAction) -> String {
        format!(
            "drmgr -c {} -s \"PHB {}\" -{}",
            DrmgrClass::Phb.flag(),
            phb_id,
            action.flag()
        )
    }
}

pub mod lssyscfg {
    /// Names of all lpars on the managed system.
    pub fn lpar_names(managed_system: &str) -> String {
        format!("lssyscfg -r lpar -m {} -F name", managed_system)
    }
}
