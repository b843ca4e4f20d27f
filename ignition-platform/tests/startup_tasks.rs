//! Full startup wiring: manifest in, one orchestrated run, side effects out.
//! Mirrors what the host entry point (and the CLI simulator) does.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tempfile::TempDir;

use ignition_core::{StartupOrchestrator, TraceOutcome};
use ignition_platform::capabilities::Capabilities;
use ignition_platform::channels::register_manifest_channels;
use ignition_platform::deeplink::{deeplink_task, DeepLinkRegistry, DeepLinkRoute};
use ignition_platform::manifest::{SplashConfig, StartupManifest};
use ignition_platform::permissions::{self, bootstrap_task};
use ignition_platform::services::{RecordingNotificationService, RecordingSplashHost};
use ignition_platform::splash::splash_task;

fn manifest() -> StartupManifest {
    StartupManifest {
        app_id: "com.example.shell".to_string(),
        app_name: "Example Shell".to_string(),
        splash: SplashConfig::default(),
        channels: vec![],
        deep_links: vec![DeepLinkRoute {
            pattern: "/tools".to_string(),
            target: "/tools".to_string(),
        }],
        startup_budget_ms: Some(2_000),
    }
}

/// Wire every built-in task the way a launch does and return the pieces
/// needed for assertions.
fn wire(
    api_level: u32,
    home: &TempDir,
) -> (
    StartupOrchestrator,
    Arc<RecordingSplashHost>,
    Arc<RecordingNotificationService>,
    Arc<Mutex<DeepLinkRegistry>>,
) {
    let manifest = manifest();
    let caps = Capabilities::from_api_level(api_level);
    let splash_host = Arc::new(RecordingSplashHost::new());
    let notifier = Arc::new(RecordingNotificationService::new(&caps));
    let registry = Arc::new(Mutex::new(DeepLinkRegistry::new()));

    let mut orch = StartupOrchestrator::new();
    if let Some(budget_ms) = manifest.startup_budget_ms {
        orch.set_default_budget(Duration::from_millis(budget_ms));
    }
    orch.register(splash_task(manifest.splash.clone(), splash_host.clone()))
        .expect("register splash");
    register_manifest_channels(&mut orch, &manifest, notifier.clone()).expect("channels");
    orch.register(bootstrap_task(home.path())).expect("permissions");
    orch.register(deeplink_task(registry.clone(), manifest.deep_links.clone()))
        .expect("deep links");

    (orch, splash_host, notifier, registry)
}

#[test]
fn modern_platform_launch_runs_every_registration() {
    let home = TempDir::new().expect("home");
    let (mut orch, splash_host, notifier, registry) = wire(34, &home);

    let report = orch.run(|| {}).expect("run");

    assert_eq!(
        report.names(),
        vec!["splash", "base-ready", "channel:default", "permissions", "deep-links"],
    );
    assert_eq!(splash_host.install_count(), 1);
    assert_eq!(notifier.channels().len(), 1);
    assert_eq!(registry.lock().expect("lock").len(), 1);
    assert!(
        permissions::store_path_at(home.path()).exists(),
        "first launch must seed the permission store"
    );
}

#[test]
fn legacy_platform_skips_channels_but_still_completes() {
    let home = TempDir::new().expect("home");
    let (mut orch, splash_host, notifier, _registry) = wire(25, &home);

    let report = orch.run(|| {}).expect("run");

    assert_eq!(splash_host.install_count(), 1, "splash is not version-gated");
    assert!(notifier.channels().is_empty(), "no channels below API 26");
    let channel = report
        .trace
        .iter()
        .find(|e| e.name == "channel:default")
        .expect("traced");
    assert_eq!(channel.outcome, TraceOutcome::Skipped);
}

#[test]
fn manifest_budget_becomes_the_default_for_every_task() {
    let home = TempDir::new().expect("home");
    let (orch, _, _, _) = wire(34, &home);
    assert_eq!(orch.default_budget(), Some(Duration::from_millis(2_000)));
}

#[test]
fn second_launch_skips_the_permission_bootstrap() {
    let home = TempDir::new().expect("home");

    let (mut first, _, _, _) = wire(34, &home);
    first.run(|| {}).expect("first launch");

    let (mut second, _, _, _) = wire(34, &home);
    let report = second.run(|| {}).expect("second launch");
    let perms = report
        .trace
        .iter()
        .find(|e| e.name == "permissions")
        .expect("traced");
    assert_eq!(perms.outcome, TraceOutcome::Skipped);
}
