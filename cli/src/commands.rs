//! Non-interactive subcommands.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;

use task_timer_config::{DeployConfig, TimerConfig};
use task_timer_deploy::{DEFAULT_SITE_DIR, StackSpec, synth};
use task_timer_types::ElapsedMs;

const DEFAULT_OUT_DIR: &str = "deploy.out";

#[derive(Debug, Args)]
pub struct DeployArgs {
    /// Domain name that serves the site.
    #[arg(long)]
    pub domain: Option<String>,
    /// Directory holding the compiled static site.
    #[arg(long)]
    pub site_dir: Option<PathBuf>,
    /// Directory the manifest is written to.
    #[arg(long)]
    pub out: Option<PathBuf>,
    #[arg(long)]
    pub stack_name: Option<String>,
    #[arg(long)]
    pub region: Option<String>,
    /// Account to deploy into; defaults to CDK_DEFAULT_ACCOUNT.
    #[arg(long)]
    pub account: Option<String>,
}

#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Duration in milliseconds.
    pub millis: u64,
    /// Print the field breakdown as JSON.
    #[arg(long, conflicts_with = "title")]
    pub json: bool,
    /// Print the compact window-title form (MM:SS or HH:MM:SS).
    #[arg(long)]
    pub title: bool,
}

/// Flags win over the `[deploy]` config section, which wins over defaults.
pub(crate) fn resolve_stack(
    args: DeployArgs,
    config: Option<&DeployConfig>,
) -> Result<(StackSpec, PathBuf)> {
    let domain = match args
        .domain
        .or_else(|| config.and_then(|c| c.domain.clone()))
    {
        Some(domain) => domain,
        None => bail!("no domain given: pass --domain or set [deploy] domain in the config"),
    };

    let mut spec = StackSpec::new(domain).with_site_dir(
        args.site_dir
            .or_else(|| config.and_then(|c| c.site_dir.clone()))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SITE_DIR)),
    );
    if let Some(name) = args
        .stack_name
        .or_else(|| config.and_then(|c| c.stack_name.clone()))
    {
        spec = spec.with_stack_name(name);
    }
    if let Some(region) = args.region.or_else(|| config.and_then(|c| c.region.clone())) {
        spec = spec.with_region(region);
    }
    if args.account.is_some() {
        spec = spec.with_account(args.account);
    }

    let out_dir = args
        .out
        .or_else(|| config.and_then(|c| c.out_dir.clone()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));
    Ok((spec, out_dir))
}

pub fn deploy(args: DeployArgs, config: Option<&TimerConfig>) -> Result<()> {
    let (spec, out_dir) = resolve_stack(args, config.and_then(|c| c.deploy.as_ref()))?;
    let output = synth(&spec, &out_dir)
        .with_context(|| format!("failed to synthesize stack {}", spec.stack_name))?;

    println!("Stack    {}", output.manifest.stack_name);
    println!("Domain   {}", spec.domain_name);
    println!(
        "Region   {}{}",
        spec.region,
        spec.account
            .as_deref()
            .map(|account| format!(" (account {account})"))
            .unwrap_or_default()
    );
    println!(
        "Assets   {} bytes from {}",
        output.manifest.total_asset_bytes(),
        spec.site_dir.display()
    );
    println!("Manifest {}", output.path.display());
    Ok(())
}

pub fn format(args: &FormatArgs) -> Result<()> {
    let elapsed = ElapsedMs::from_millis(args.millis);
    if args.json {
        println!("{}", serde_json::to_string(&elapsed.breakdown())?);
    } else if args.title {
        println!("{}", elapsed.breakdown().title());
    } else {
        println!("{elapsed}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{DeployArgs, resolve_stack};
    use std::path::PathBuf;
    use task_timer_config::DeployConfig;

    fn args() -> DeployArgs {
        DeployArgs {
            domain: None,
            site_dir: None,
            out: None,
            stack_name: None,
            region: None,
            account: Some("111122223333".to_string()),
        }
    }

    #[test]
    fn domain_is_required() {
        let err = resolve_stack(args(), None).unwrap_err();
        assert!(err.to_string().contains("--domain"));
    }

    #[test]
    fn flags_override_config() {
        let config = DeployConfig {
            domain: Some("config.example.com".to_string()),
            site_dir: Some(PathBuf::from("dist")),
            out_dir: Some(PathBuf::from("manifests")),
            stack_name: Some("ConfigStack".to_string()),
            region: None,
        };
        let mut a = args();
        a.domain = Some("flag.example.com".to_string());

        let (spec, out) = resolve_stack(a, Some(&config)).unwrap();
        assert_eq!(spec.domain_name, "flag.example.com");
        assert_eq!(spec.site_dir, PathBuf::from("dist"));
        assert_eq!(spec.stack_name, "ConfigStack");
        assert_eq!(spec.region, "us-east-1");
        assert_eq!(spec.account.as_deref(), Some("111122223333"));
        assert_eq!(out, PathBuf::from("manifests"));
    }

    #[test]
    fn defaults_apply_without_config() {
        let mut a = args();
        a.domain = Some("timer.example.com".to_string());
        let (spec, out) = resolve_stack(a, None).unwrap();
        assert_eq!(spec.site_dir, PathBuf::from("out"));
        assert_eq!(spec.stack_name, "TaskTimerStack");
        assert_eq!(out, PathBuf::from("deploy.out"));
    }
}
