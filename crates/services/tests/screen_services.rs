use std::sync::Arc;

use backend::{ApiError, Backend, InMemoryBackend};
use posture_core::model::{
    Physiotherapist, PostureProblem, Prize, PrizeId, ProblemId, ProgressId, ProgressRecord,
    Severity, TherapistId, User, UserId, UserProfile,
};
use posture_core::time::{fixed_clock, fixed_now};
use services::{DashboardError, DashboardService, ScanService, TherapistDirectory};
use uuid::Uuid;

fn signed_in(store: &InMemoryBackend) -> UserId {
    let id = UserId::new(1);
    store
        .seed_user(User::new(id, "amir@example.com", "Amir"))
        .unwrap();
    store
        .seed_profile(UserProfile::new(id, "Amir Hosseini", Some(1990), Some(180), Some(75.0)))
        .unwrap();
    id
}

fn problem(id: u64, name: &str, severity: Severity) -> PostureProblem {
    PostureProblem::new(ProblemId::new(id), name, "", severity, Some(fixed_now()))
}

#[tokio::test]
async fn dashboard_combines_every_account_resource() {
    let store = InMemoryBackend::new();
    let user = signed_in(&store);
    store
        .seed_problems(user, vec![problem(1, "Forward head", Severity::Moderate)])
        .unwrap();
    store
        .seed_prizes(
            user,
            vec![Prize::new(PrizeId::new(1), "First week", "", Some(fixed_now()))],
        )
        .unwrap();
    store
        .seed_record(ProgressRecord::new(
            ProgressId::new(Uuid::new_v4()),
            ProblemId::new(1),
            1,
            4,
            fixed_now(),
        ))
        .unwrap();

    let backend = Backend::from_in_memory(&store);
    let service = DashboardService::new(
        backend.accounts.clone(),
        backend.problems.clone(),
        backend.progress.clone(),
        fixed_clock(),
    );

    let dashboard = service.load().await.unwrap();
    assert_eq!(dashboard.user.id(), user);
    assert_eq!(dashboard.profile.full_name(), "Amir Hosseini");
    assert_eq!(dashboard.problems.len(), 1);
    assert_eq!(dashboard.prizes.len(), 1);
    assert_eq!(dashboard.records.len(), 1);
    assert_eq!(dashboard.overall_percent(), 25);
    assert_eq!(dashboard.loaded_at, fixed_now());
}

#[tokio::test]
async fn dashboard_without_a_signed_in_user_is_unauthorized() {
    let backend = Backend::in_memory();
    let service = DashboardService::new(
        backend.accounts,
        backend.problems,
        backend.progress,
        fixed_clock(),
    );

    let err = service.load().await.unwrap_err();
    assert!(matches!(err, DashboardError::Api(ApiError::Unauthorized)));
}

#[tokio::test]
async fn scan_surfaces_the_worst_finding() {
    let store = InMemoryBackend::new();
    store
        .seed_findings(vec![
            problem(1, "Rounded shoulders", Severity::Mild),
            problem(2, "Kyphosis", Severity::Severe),
        ])
        .unwrap();

    let service = ScanService::new(Arc::new(store), fixed_clock());
    let outcome = service.analyze_capture(&[1, 2, 3]).await.unwrap();

    assert_eq!(outcome.problems.len(), 2);
    assert_eq!(outcome.worst_severity(), Some(Severity::Severe));
    assert_eq!(outcome.scanned_at, fixed_now());
}

#[tokio::test]
async fn directory_narrows_by_query() {
    let store = InMemoryBackend::new();
    store
        .seed_therapists(vec![
            Physiotherapist::new(
                TherapistId::new(1),
                "Sara Mohammadi",
                "Spinal rehabilitation",
                "Tehran",
                Some("sara@example.com".to_owned()),
            ),
            Physiotherapist::new(
                TherapistId::new(2),
                "Reza Karimi",
                "Sports physiotherapy",
                "Isfahan",
                None,
            ),
        ])
        .unwrap();

    let directory = TherapistDirectory::new(Arc::new(store));
    assert_eq!(directory.list().await.unwrap().len(), 2);

    let spinal = directory.matching("spinal").await.unwrap();
    assert_eq!(spinal.len(), 1);
    assert_eq!(spinal[0].email(), Some("sara@example.com"));

    assert!(directory.matching("Shiraz").await.unwrap().is_empty());
}
