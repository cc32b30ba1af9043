use clap::Parser;
use dlpar_harness::utils::{logger, validation::Validate};
use dlpar_harness::{
    CliConfig, CommandRunner, ConfigProvider, DlparHarness, FileConfig, LocalShell, Result,
    SshShell,
};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting dlpar-harness");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let outcome = match &cli.config {
        Some(path) => match FileConfig::load(path) {
            Ok(config) => validate_and_run(&config, &config.hmc, config.host.as_deref()),
            Err(e) => Err(e),
        },
        None => validate_and_run(&cli, cli.hmc.as_deref().unwrap_or(""), cli.host.as_deref()),
    };

    match outcome {
        Ok(()) => {
            tracing::info!("All dlpar scenarios passed");
            println!("All dlpar scenarios passed");
            Ok(())
        }
        Err(e) => {
            tracing::error!("dlpar validation failed: {}", e);
            eprintln!("dlpar validation failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn validate_and_run<C: ConfigProvider + Validate + std::fmt::Debug>(
    config: &C,
    hmc_target: &str,
    host_target: Option<&str>,
) -> Result<()> {
    config.validate()?;
    tracing::debug!("Resolved config: {:?}", config);

    let hmc = SshShell::new(hmc_target);
    let host: Box<dyn CommandRunner> = match host_target {
        Some(target) => Box::new(SshShell::new(target)),
        None => Box::new(LocalShell),
    };

    let mut harness = DlparHarness::new(hmc, host, config);
    harness.setup()?;
    harness.run_suite()
}
