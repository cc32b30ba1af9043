use crate::domain::ports::CommandRunner;
use crate::utils::error::{DlparError, Result};

/// Packages the RSCT/DynamicRM stack needs before the HMC will accept DLPAR
/// requests for the partition.
pub const REQUIRED_PACKAGES: [&str; 6] = [
    "src",
    "rsct.core",
    "rsct.core.utils",
    "rsct.basic",
    "rsct.opt.storagerm",
    "DynamicRM",
];

/// Verify every required package is installed on the host, reporting all
/// missing ones in a single failure.
pub fn check_packages<R: CommandRunner>(host: &R) -> Result<()> {
    let mut missing = Vec::new();
    for pkg in REQUIRED_PACKAGES {
        if !package_installed(host, pkg)? {
            tracing::warn!("required package not installed: {}", pkg);
            missing.push(pkg.to_string());
        }
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DlparError::MissingPackagesError { packages: missing })
    }
}

/// `rpm -q` exits nonzero when the package is absent, so a command failure
/// that carries the "not installed" message is a probe answer; anything else
/// (an unreachable host, say) propagates as the error it is.
fn package_installed<R: CommandRunner>(host: &R, pkg: &str) -> Result<bool> {
    match host.run_command(&format!("rpm -q {}", pkg)) {
        Ok(output) => Ok(!output.iter().any(|line| line.contains("not installed"))),
        Err(DlparError::CommandError { detail, .. }) if detail.contains("not installed") => {
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Check the RSCT resource manager subsystems; if any is inoperative, start
/// the groups once and re-check. Still inoperative after that is fatal.
pub fn ensure_rsct_active<R: CommandRunner>(host: &R) -> Result<()> {
    if !any_inoperative(host)? {
        return Ok(());
    }
    tracing::info!("rsct services inoperative, starting rsct_rm and rsct groups");
    host.run_command("startsrc -g rsct_rm; startsrc -g rsct")?;
    if any_inoperative(host)? {
        return Err(DlparError::ServiceInactiveError);
    }
    Ok(())
}

fn any_inoperative<R: CommandRunner>(host: &R) -> Result<bool> {
    let status = host.run_command("lssrc -a")?;
    Ok(status.iter().any(|line| line.contains("inoperative")))
}
