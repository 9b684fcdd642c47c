mod common;

use common::{FakeSystem, TestEnv, fixed_now, profile_dir, record, sid, stored_record};

use ph_agent::{CandidateStatus, ReconcileOptions, ReconcileReport, Reconciler};
use ph_core::{LAST_LOGON_FORMAT, Sid};

use std::collections::BTreeSet;

use chrono::Duration;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

const MINUTES_PER_DAY: i64 = 24 * 60;
const MAX_AGE_MINUTES: i64 = 400 * MINUTES_PER_DAY;
const PROFILE_BYTES: usize = 64;

struct User {
    rid: u32,
    username: String,
    minutes_inactive: i64,
    loaded: bool,
}

impl User {
    fn numbered(index: usize, minutes_inactive: i64, loaded: bool) -> Self {
        Self {
            rid: 1000 + index as u32,
            username: format!("user{index}"),
            minutes_inactive,
            loaded,
        }
    }

    fn identity(&self) -> Sid {
        sid(self.rid)
    }
}

fn block_on<T>(future: impl Future<Output = T>) -> T {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

/// Store a record and a live profile for each user.
async fn seed(env: &TestEnv, users: &[User]) -> FakeSystem {
    let pool = env.store().await;
    let mut system = FakeSystem::new();

    for user in users {
        let dir = profile_dir(&env.users_dir(), &user.username, PROFILE_BYTES);
        let last_logon = (fixed_now().naive_local() - Duration::minutes(user.minutes_inactive))
            .format(LAST_LOGON_FORMAT)
            .to_string();
        stored_record(&pool, &record(user.identity(), &user.username, &last_logon, &dir)).await;
        system = system
            .with_profile(user.identity(), &dir, user.loaded)
            .with_account(&user.username);
    }

    pool.close().await;
    system
}

async fn reconcile(env: &TestEnv, system: &FakeSystem, options: &ReconcileOptions) -> ReconcileReport {
    let pool = env.store().await;
    let report = Reconciler::new(&env.config, system, system, system)
        .run(&pool, options, fixed_now())
        .await
        .unwrap();
    pool.close().await;
    report
}

fn options(env: &TestEnv, days_threshold: u32) -> ReconcileOptions {
    ReconcileOptions::from_config(&env.config).with_days_threshold(Some(days_threshold))
}

fn identities(report: &ReconcileReport) -> Vec<Sid> {
    report
        .candidates
        .iter()
        .map(|candidate| candidate.identity.clone())
        .collect()
}

/// `name` with each letter independently upper- or lower-cased.
fn any_casing(name: &'static str) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<bool>(), name.len()).prop_map(move |upper| {
        name.chars()
            .zip(upper)
            .map(|(c, up)| {
                if up {
                    c.to_ascii_uppercase()
                } else {
                    c.to_ascii_lowercase()
                }
            })
            .collect()
    })
}

// =========================================================================
// Property-Based Tests - Reconciliation
// =========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn given_any_ages_when_reconciled_then_only_records_older_than_threshold_are_candidates(
        ages in prop::collection::vec(0..MAX_AGE_MINUTES, 1..6),
        days_threshold in 1u32..200,
    ) {
        block_on(async {
            // Given
            let env = TestEnv::new();
            let users: Vec<User> = ages
                .iter()
                .enumerate()
                .map(|(index, minutes)| User::numbered(index, *minutes, false))
                .collect();
            let system = seed(&env, &users).await;

            // When
            let report = reconcile(&env, &system, &options(&env, days_threshold).with_dry_run(true)).await;

            // Then: Candidates are exactly the records strictly older than the threshold
            let threshold_minutes = i64::from(days_threshold) * MINUTES_PER_DAY;
            let expected: BTreeSet<Sid> = users
                .iter()
                .filter(|user| user.minutes_inactive > threshold_minutes)
                .map(User::identity)
                .collect();
            let actual: BTreeSet<Sid> = identities(&report).into_iter().collect();
            prop_assert_eq!(actual, expected);

            for candidate in &report.candidates {
                prop_assert!(candidate.days_inactive >= i64::from(days_threshold));
            }
            Ok::<(), TestCaseError>(())
        })?;
    }

    #[test]
    fn given_excluded_name_in_any_casing_when_reconciled_then_never_a_candidate(
        username in prop_oneof![
            Just("Administrator"),
            Just("Guest"),
            Just("DefaultAccount"),
            Just("WDAGUtilityAccount"),
            Just("Kiosk"),
        ].prop_flat_map(any_casing),
        days_inactive in 1i64..4000,
    ) {
        block_on(async {
            // Given: An excluded user of any age next to an ordinary stale one
            let env = TestEnv::new();
            let excluded = User {
                rid: 500,
                username: username.clone(),
                minutes_inactive: days_inactive * MINUTES_PER_DAY,
                loaded: false,
            };
            let ordinary = User::numbered(1, 200 * MINUTES_PER_DAY, false);
            let system = seed(&env, &[excluded, ordinary]).await;

            // When: A real run, with "kiosk" excluded by the caller
            let report = reconcile(
                &env,
                &system,
                &options(&env, 1).with_exclude_users(["kiosk"]),
            )
            .await;

            // Then
            prop_assert_eq!(identities(&report), vec![sid(1001)]);
            prop_assert!(system.has_account(&username));
            prop_assert!(env.users_dir().join(&username).exists());
            Ok::<(), TestCaseError>(())
        })?;
    }

    #[test]
    fn given_any_store_when_dry_run_then_real_run_removes_the_same_candidates(
        users in prop::collection::vec((0..MAX_AGE_MINUTES, any::<bool>()), 1..6),
        days_threshold in 1u32..200,
    ) {
        block_on(async {
            // Given
            let env = TestEnv::new();
            let users: Vec<User> = users
                .iter()
                .enumerate()
                .map(|(index, (minutes, loaded))| User::numbered(index, *minutes, *loaded))
                .collect();
            let system = seed(&env, &users).await;
            let options = options(&env, days_threshold);

            // When
            let preview = reconcile(&env, &system, &options.clone().with_dry_run(true)).await;
            let real = reconcile(&env, &system, &options).await;

            // Then
            prop_assert_eq!(identities(&preview), identities(&real));
            prop_assert_eq!(preview.summary.stale, real.summary.stale);
            prop_assert_eq!(preview.summary.removed, real.summary.removed);
            prop_assert_eq!(preview.summary.reclaimed_bytes, real.summary.reclaimed_bytes);
            prop_assert_eq!(preview.summary.skipped, real.summary.skipped);
            prop_assert!(
                real.candidates
                    .iter()
                    .all(|candidate| candidate.status == CandidateStatus::Success)
            );
            Ok::<(), TestCaseError>(())
        })?;
    }
}
