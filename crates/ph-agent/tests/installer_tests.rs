mod common;

use common::{FakeSystem, TestEnv, fixed_now, profile_dir, sid, write_bytes};

use ph_agent::{InstallStep, InstallStepOutcome, Installer, Validator};
use ph_db::{StoreConnection, StoreMetaRepository};

use std::path::PathBuf;

use googletest::prelude::*;

/// A stand-in tracker executable outside the config directory.
fn tracker_binary(env: &TestEnv) -> PathBuf {
    let path = env.dir.path().join("build").join("logon-tracker.exe");
    write_bytes(&path, 128);
    path
}

fn machine(env: &TestEnv) -> FakeSystem {
    FakeSystem::new()
        .with_profile(sid(1001), &profile_dir(&env.users_dir(), "alice", 16), false)
        .with_profile(sid(1002), &profile_dir(&env.users_dir(), "bob", 16), false)
}

fn is_done(outcome: Option<&InstallStepOutcome>) -> bool {
    matches!(outcome, Some(InstallStepOutcome::Done { .. }))
}

#[tokio::test]
async fn given_clean_machine_when_installing_then_every_step_done_and_validator_passes() {
    // Given
    let env = TestEnv::new();
    let system = machine(&env);

    // When
    let report = Installer::new(&env.config, &system, &system)
        .with_tracker_source(tracker_binary(&env))
        .install(false, fixed_now())
        .await;

    // Then
    assert!(report.succeeded());
    assert!(is_done(report.step(InstallStep::VersionMarker)));
    assert!(is_done(report.step(InstallStep::TrackerArtifact)));
    assert!(is_done(report.step(InstallStep::LogonHook)));
    assert!(is_done(report.step(InstallStep::Seed)));

    let artifact = env.config.tracker_artifact_path();
    assert!(artifact.is_file());
    assert_that!(
        system.hook_command(&env.config.tracker.hook_name),
        some(eq(&artifact))
    );
    assert_that!(env.records().await, len(eq(2)));

    let pool = StoreConnection::open_read_only(&env.config.store_path())
        .await
        .unwrap();
    assert_that!(
        StoreMetaRepository::version(&pool).await.unwrap(),
        some(eq(ph_agent::AGENT_VERSION))
    );
    pool.close().await;

    // And: The result validates
    let validation = Validator::new(&env.config, &system).run().await;
    assert!(validation.compliant);
}

#[tokio::test]
async fn given_what_if_when_installing_then_nothing_created() {
    let env = TestEnv::new();
    let system = machine(&env);

    let report = Installer::new(&env.config, &system, &system)
        .with_tracker_source(tracker_binary(&env))
        .install(true, fixed_now())
        .await;

    assert!(report.what_if);
    assert!(
        report
            .steps
            .iter()
            .all(|step| matches!(step.outcome, InstallStepOutcome::Simulated { .. }))
    );
    assert!(!env.config.store_path().exists());
    assert!(!env.config.tracker_artifact_path().exists());
    assert_that!(system.hook_command(&env.config.tracker.hook_name), none());
}

#[tokio::test]
async fn given_existing_install_when_installing_again_then_records_not_duplicated() {
    let env = TestEnv::new();
    let system = machine(&env);
    let installer =
        Installer::new(&env.config, &system, &system).with_tracker_source(tracker_binary(&env));

    installer.install(false, fixed_now()).await;
    let report = installer.install(false, fixed_now()).await;

    assert!(report.succeeded());
    assert_that!(env.records().await, len(eq(2)));
}

#[tokio::test]
async fn given_hook_registration_failure_when_installing_then_remaining_steps_still_run() {
    let env = TestEnv::new();
    let system = machine(&env).failing_hook_registration();

    let report = Installer::new(&env.config, &system, &system)
        .with_tracker_source(tracker_binary(&env))
        .install(false, fixed_now())
        .await;

    assert!(!report.succeeded());
    assert!(matches!(
        report.step(InstallStep::LogonHook),
        Some(InstallStepOutcome::Failed { .. })
    ));
    assert!(is_done(report.step(InstallStep::Seed)));
    assert!(env.config.tracker_artifact_path().is_file());
}

#[tokio::test]
async fn given_missing_tracker_binary_when_installing_then_artifact_step_fails() {
    let env = TestEnv::new();
    let system = machine(&env);

    let report = Installer::new(&env.config, &system, &system)
        .with_tracker_source(env.dir.path().join("missing.exe"))
        .install(false, fixed_now())
        .await;

    assert!(matches!(
        report.step(InstallStep::TrackerArtifact),
        Some(InstallStepOutcome::Failed { .. })
    ));
    assert!(is_done(report.step(InstallStep::VersionMarker)));
}

#[tokio::test]
async fn given_installed_agent_when_uninstalling_then_everything_removed() {
    let env = TestEnv::new();
    let system = machine(&env);
    let installer =
        Installer::new(&env.config, &system, &system).with_tracker_source(tracker_binary(&env));
    installer.install(false, fixed_now()).await;

    let report = installer.uninstall(false).await;

    assert!(report.succeeded());
    assert!(is_done(report.step(InstallStep::LogonHook)));
    assert!(is_done(report.step(InstallStep::TrackerArtifact)));
    assert!(is_done(report.step(InstallStep::Store)));
    assert!(!env.config.store_path().exists());
    assert!(!env.config.tracker_artifact_path().exists());
    assert_that!(system.hook_command(&env.config.tracker.hook_name), none());
}

#[tokio::test]
async fn given_nothing_installed_when_uninstalling_then_every_step_not_found() {
    let env = TestEnv::new();
    let system = machine(&env);

    let report = Installer::new(&env.config, &system, &system).uninstall(false).await;

    assert!(report.succeeded());
    assert!(
        report
            .steps
            .iter()
            .all(|step| step.outcome == InstallStepOutcome::NotFound)
    );
}

#[tokio::test]
async fn given_what_if_when_uninstalling_then_nothing_removed() {
    let env = TestEnv::new();
    let system = machine(&env);
    let installer =
        Installer::new(&env.config, &system, &system).with_tracker_source(tracker_binary(&env));
    installer.install(false, fixed_now()).await;

    let report = installer.uninstall(true).await;

    assert!(report.what_if);
    assert!(env.config.store_path().exists());
    assert!(env.config.tracker_artifact_path().is_file());
    assert_that!(
        system.hook_command(&env.config.tracker.hook_name),
        some(anything())
    );
}
