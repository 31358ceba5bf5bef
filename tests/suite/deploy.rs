//! Stack synthesis against a real site directory on disk.

use serde_json::Value;
use tempfile::tempdir;

use task_timer_deploy::{DeployError, Resource, StackSpec, synth};

use crate::common::write_site;

fn spec_for(site: &std::path::Path) -> StackSpec {
    StackSpec::new("timer.example.com")
        .with_site_dir(site)
        .with_account(Some("123456789012".to_string()))
}

#[test]
fn synth_writes_manifest_for_site() {
    let dir = tempdir().unwrap();
    let site = dir.path().join("out");
    write_site(&site);
    let out = dir.path().join("deploy.out");

    let output = synth(&spec_for(&site), &out).unwrap();
    assert_eq!(output.path, out.join("TaskTimerStack.manifest.json"));

    let json: Value = serde_json::from_str(&std::fs::read_to_string(&output.path).unwrap()).unwrap();
    assert_eq!(json["version"], 1);
    assert_eq!(json["environment"]["region"], "us-east-1");
    assert_eq!(json["environment"]["account"], "123456789012");
    assert_eq!(json["outputs"]["SiteUrl"], "https://timer.example.com");

    let keys: Vec<&str> = json["resources"][4]["assets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, ["404.html", "_next/static/chunks/main.js", "index.html"]);

    assert!(matches!(
        output.manifest.resource("SiteDistribution"),
        Some(Resource::Distribution {
            error_document: Some("404.html"),
            ..
        })
    ));
}

#[test]
fn synth_rejects_invalid_domain_before_touching_disk() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("deploy.out");
    let spec = StackSpec::new("not a domain").with_site_dir(dir.path().join("missing"));

    let err = synth(&spec, &out).unwrap_err();
    assert!(matches!(err, DeployError::InvalidDomain { .. }));
    assert!(!out.exists());
}

#[test]
fn synth_requires_built_site() {
    let dir = tempdir().unwrap();
    let err = synth(&spec_for(&dir.path().join("out")), &dir.path().join("deploy.out"))
        .unwrap_err();
    assert!(matches!(err, DeployError::MissingSiteDir { .. }));
    assert!(err.to_string().contains("does not exist"));
}
