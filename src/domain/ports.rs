use crate::utils::error::Result;

/// A remote (or local) shell session. Both the HMC session and the host OS
/// session expose the same contract: run one command, get its output lines.
/// Failure semantics (non-zero exit, timeouts) are the implementor's job to
/// surface as errors.
pub trait CommandRunner {
    fn run_command(&self, command: &str) -> Result<Vec<String>>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run_command(&self, command: &str) -> Result<Vec<String>> {
        (**self).run_command(command)
    }
}

impl<T: CommandRunner + ?Sized> CommandRunner for Box<T> {
    fn run_command(&self, command: &str) -> Result<Vec<String>> {
        (**self).run_command(command)
    }
}

pub trait ConfigProvider {
    fn managed_system(&self) -> &str;
    fn lpar_name(&self) -> &str;
    fn target_lpar(&self) -> Option<&str>;
    fn pci_device(&self) -> &str;
    fn sriov(&self) -> bool;
    fn iterations(&self) -> usize;
}
