//! Hosting stack synthesis for the compiled static site.
//!
//! A [`StackSpec`] names the domain and the site output directory; [`synth`]
//! validates it, fingerprints the site files and writes a declarative
//! manifest for the provisioning tool.

mod assets;
mod error;
mod manifest;
mod stack;

use std::path::{Path, PathBuf};

pub use assets::{ERROR_DOCUMENT, INDEX_DOCUMENT, SiteAsset, collect_assets, content_type};
pub use error::DeployError;
pub use manifest::{
    Environment, MANIFEST_VERSION, Resource, StackManifest, synthesize, write_manifest,
};
pub use stack::{
    ACCOUNT_ENV_VAR, DEFAULT_REGION, DEFAULT_SITE_DIR, DEFAULT_STACK_NAME, StackSpec,
};

/// Result of a synth run.
#[derive(Debug)]
pub struct SynthOutput {
    pub manifest: StackManifest,
    pub path: PathBuf,
}

/// Validate `spec`, collect its site assets and write the manifest into `out_dir`.
pub fn synth(spec: &StackSpec, out_dir: &Path) -> Result<SynthOutput, DeployError> {
    spec.validate()?;
    let assets = collect_assets(&spec.site_dir)?;
    tracing::info!(
        stack = %spec.stack_name,
        domain = %spec.domain_name,
        assets = assets.len(),
        "Synthesizing stack"
    );
    let manifest = synthesize(spec, assets);
    let path = write_manifest(&manifest, out_dir)?;
    Ok(SynthOutput { manifest, path })
}
