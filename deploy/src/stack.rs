//! The hosting stack description: which domain serves which site directory.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::DeployError;

pub const DEFAULT_STACK_NAME: &str = "TaskTimerStack";
/// Certificates for a CDN distribution must be issued in us-east-1.
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_SITE_DIR: &str = "out";
pub const ACCOUNT_ENV_VAR: &str = "CDK_DEFAULT_ACCOUNT";

const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackSpec {
    pub stack_name: String,
    pub domain_name: String,
    pub site_dir: PathBuf,
    pub region: String,
    pub account: Option<String>,
}

impl StackSpec {
    /// A stack for `domain_name` with default name, region and site directory.
    /// The account comes from `CDK_DEFAULT_ACCOUNT` when set.
    pub fn new(domain_name: impl Into<String>) -> Self {
        Self {
            stack_name: DEFAULT_STACK_NAME.to_string(),
            domain_name: domain_name.into().trim().trim_end_matches('.').to_ascii_lowercase(),
            site_dir: PathBuf::from(DEFAULT_SITE_DIR),
            region: DEFAULT_REGION.to_string(),
            account: account_from_env(),
        }
    }

    pub fn with_stack_name(mut self, name: impl Into<String>) -> Self {
        self.stack_name = name.into();
        self
    }

    pub fn with_site_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.site_dir = dir.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_account(mut self, account: Option<String>) -> Self {
        self.account = account;
        self
    }

    pub fn validate(&self) -> Result<(), DeployError> {
        validate_domain(&self.domain_name)?;

        let name_ok = !self.stack_name.is_empty()
            && self
                .stack_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !name_ok {
            return Err(DeployError::InvalidStackName {
                name: self.stack_name.clone(),
            });
        }

        if self.region.trim().is_empty() {
            return Err(DeployError::EmptyRegion);
        }
        Ok(())
    }

    /// Apex domain whose hosted zone receives the alias record.
    #[must_use]
    pub fn hosted_zone(&self) -> &str {
        let labels: Vec<_> = self.domain_name.rsplitn(3, '.').collect();
        if labels.len() < 3 {
            return &self.domain_name;
        }
        let zone_len = labels[0].len() + labels[1].len() + 1;
        &self.domain_name[self.domain_name.len() - zone_len..]
    }

    #[must_use]
    pub fn site_url(&self) -> String {
        format!("https://{}", self.domain_name)
    }
}

fn account_from_env() -> Option<String> {
    std::env::var(ACCOUNT_ENV_VAR)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn validate_domain(domain: &str) -> Result<(), DeployError> {
    let invalid = |reason| DeployError::InvalidDomain {
        domain: domain.to_string(),
        reason,
    };

    if domain.is_empty() {
        return Err(invalid("empty"));
    }
    if domain.len() > MAX_DOMAIN_LEN {
        return Err(invalid("longer than 253 characters"));
    }
    if !domain.contains('.') {
        return Err(invalid("needs at least two labels"));
    }
    for label in domain.split('.') {
        if label.is_empty() {
            return Err(invalid("empty label"));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(invalid("label longer than 63 characters"));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(invalid("label starts or ends with '-'"));
        }
        if !label
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(invalid("only a-z, 0-9 and '-' are allowed"));
        }
    }
    Ok(())
}
