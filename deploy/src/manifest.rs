//! Declarative manifest of the hosting stack.
//!
//! The manifest lists the resources a provisioning tool creates for the site:
//!
//! ```text
//! Bucket <- BucketDeployment (assets)
//!   ^
//! Distribution (alias: domain, cert) <- DnsRecord (A alias in hosted zone)
//!   ^
//! Certificate (DNS validated)
//! ```

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::info;

use crate::assets::{ERROR_DOCUMENT, INDEX_DOCUMENT, SiteAsset};
use crate::error::DeployError;
use crate::stack::StackSpec;

pub const MANIFEST_VERSION: u32 = 1;

const BUCKET_ID: &str = "SiteBucket";
const CERTIFICATE_ID: &str = "SiteCertificate";
const DISTRIBUTION_ID: &str = "SiteDistribution";
const RECORD_ID: &str = "SiteAliasRecord";
const DEPLOYMENT_ID: &str = "SiteDeployment";

#[derive(Debug, Clone, Serialize)]
pub struct StackManifest {
    pub version: u32,
    pub stack_name: String,
    pub environment: Environment,
    pub synthesized_at: String,
    pub resources: Vec<Resource>,
    pub outputs: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Environment {
    pub account: Option<String>,
    pub region: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Resource {
    Bucket {
        id: &'static str,
        block_public_access: bool,
        /// The bucket only holds build output, so it goes with the stack.
        destroy_on_removal: bool,
    },
    Certificate {
        id: &'static str,
        domain_name: String,
        hosted_zone: String,
        validation: &'static str,
    },
    Distribution {
        id: &'static str,
        origin: &'static str,
        certificate: &'static str,
        aliases: Vec<String>,
        default_root_object: &'static str,
        error_document: Option<&'static str>,
        viewer_protocol_policy: &'static str,
    },
    DnsRecord {
        id: &'static str,
        hosted_zone: String,
        record_name: String,
        record_type: &'static str,
        target: &'static str,
    },
    BucketDeployment {
        id: &'static str,
        bucket: &'static str,
        distribution: &'static str,
        source_dir: PathBuf,
        invalidation_paths: Vec<&'static str>,
        assets: Vec<SiteAsset>,
    },
}

impl Resource {
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Resource::Bucket { id, .. }
            | Resource::Certificate { id, .. }
            | Resource::Distribution { id, .. }
            | Resource::DnsRecord { id, .. }
            | Resource::BucketDeployment { id, .. } => id,
        }
    }
}

impl StackManifest {
    #[must_use]
    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id() == id)
    }

    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.manifest.json", self.stack_name)
    }

    #[must_use]
    pub fn total_asset_bytes(&self) -> u64 {
        self.resources
            .iter()
            .filter_map(|r| match r {
                Resource::BucketDeployment { assets, .. } => {
                    Some(assets.iter().map(|a| a.size).sum::<u64>())
                }
                _ => None,
            })
            .sum()
    }
}

/// Builds the manifest for `spec` serving `assets`.
#[must_use]
pub fn synthesize(spec: &StackSpec, assets: Vec<SiteAsset>) -> StackManifest {
    let hosted_zone = spec.hosted_zone().to_string();
    let error_document = assets
        .iter()
        .any(|a| a.key == ERROR_DOCUMENT)
        .then_some(ERROR_DOCUMENT);

    let resources = vec![
        Resource::Bucket {
            id: BUCKET_ID,
            block_public_access: true,
            destroy_on_removal: true,
        },
        Resource::Certificate {
            id: CERTIFICATE_ID,
            domain_name: spec.domain_name.clone(),
            hosted_zone: hosted_zone.clone(),
            validation: "DNS",
        },
        Resource::Distribution {
            id: DISTRIBUTION_ID,
            origin: BUCKET_ID,
            certificate: CERTIFICATE_ID,
            aliases: vec![spec.domain_name.clone()],
            default_root_object: INDEX_DOCUMENT,
            error_document,
            viewer_protocol_policy: "redirect-to-https",
        },
        Resource::DnsRecord {
            id: RECORD_ID,
            hosted_zone,
            record_name: spec.domain_name.clone(),
            record_type: "A",
            target: DISTRIBUTION_ID,
        },
        Resource::BucketDeployment {
            id: DEPLOYMENT_ID,
            bucket: BUCKET_ID,
            distribution: DISTRIBUTION_ID,
            source_dir: spec.site_dir.clone(),
            invalidation_paths: vec!["/*"],
            assets,
        },
    ];

    let mut outputs = BTreeMap::new();
    outputs.insert("SiteUrl".to_string(), spec.site_url());
    outputs.insert("DomainName".to_string(), spec.domain_name.clone());
    outputs.insert("DistributionId".to_string(), DISTRIBUTION_ID.to_string());

    StackManifest {
        version: MANIFEST_VERSION,
        stack_name: spec.stack_name.clone(),
        environment: Environment {
            account: spec.account.clone(),
            region: spec.region.clone(),
        },
        synthesized_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        resources,
        outputs,
    }
}

/// Writes `<out_dir>/<stack_name>.manifest.json` via temp file + rename.
pub fn write_manifest(manifest: &StackManifest, out_dir: &Path) -> Result<PathBuf, DeployError> {
    let path = out_dir.join(manifest.file_name());
    let write_err = |source| DeployError::Write {
        path: path.clone(),
        source,
    };

    std::fs::create_dir_all(out_dir).map_err(write_err)?;
    let json = serde_json::to_vec_pretty(manifest)?;

    let mut tmp = NamedTempFile::new_in(out_dir).map_err(write_err)?;
    tmp.write_all(&json).map_err(write_err)?;
    tmp.write_all(b"\n").map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(&path).map_err(|e| write_err(e.error))?;

    info!(path = %path.display(), bytes = json.len(), "Wrote stack manifest");
    Ok(path)
}
