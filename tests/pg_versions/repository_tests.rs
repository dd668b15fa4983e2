//! Token-guarded writes against `PostgreSQL`.

use crate::pg_versions::helpers::{PgContext, pg_context};
use openversion::version::{
    domain::{BranchName, ConcurrencyToken, DomainVersion, ProjectId, ReleaseNumber},
    ports::VersionRepository,
};
use rstest::rstest;

fn proposed(project: i64, branch: &str, release: ReleaseNumber) -> DomainVersion {
    DomainVersion::proposed(
        ProjectId::new(project).expect("valid project"),
        BranchName::new(branch).expect("valid branch"),
        release,
        None,
    )
}

#[rstest]
#[ignore = "requires a PostgreSQL server in OPENVERSION_TEST_DATABASE_URL"]
fn insert_then_update_rotates_token(#[from(pg_context)] ctx: PgContext) {
    let seed = proposed(1, "main", ReleaseNumber::MAJOR_SEED);
    ctx.rt
        .block_on(ctx.repository.save_version(&seed))
        .expect("insert should succeed");
    let first = ctx
        .rt
        .block_on(ctx.repository.current_versions(ProjectId::DEFAULT))
        .expect("read should succeed");
    let observed = first.main().expect("main stored").clone();
    assert!(!observed.id().is_unsaved());

    let bumped = proposed(1, "main", ReleaseNumber::new(1, 1, 0, 0))
        .with_concurrency_token(observed.concurrency_token());
    ctx.rt
        .block_on(ctx.repository.save_version(&bumped))
        .expect("guarded update should succeed");

    let second = ctx
        .rt
        .block_on(ctx.repository.current_versions(ProjectId::DEFAULT))
        .expect("read should succeed");
    let main = second.main().expect("main stored");
    assert_eq!(main.id(), observed.id());
    assert_eq!(main.release_number(), "1.1.0.0");
    assert_ne!(main.concurrency_token(), observed.concurrency_token());
}

#[rstest]
#[ignore = "requires a PostgreSQL server in OPENVERSION_TEST_DATABASE_URL"]
fn stale_token_is_a_conflict(#[from(pg_context)] ctx: PgContext) {
    let seed = proposed(1, "qa", ReleaseNumber::QA_SEED);
    ctx.rt
        .block_on(ctx.repository.save_version(&seed))
        .expect("insert should succeed");
    let token = Some(ConcurrencyToken::new());
    let stale = proposed(1, "qa", ReleaseNumber::new(0, 0, 2, 0)).with_concurrency_token(token);

    let err = ctx
        .rt
        .block_on(ctx.repository.save_version(&stale))
        .expect_err("token does not match");
    assert!(err.is_concurrency_conflict());

    let snapshot = ctx
        .rt
        .block_on(ctx.repository.current_versions(ProjectId::DEFAULT))
        .expect("read should succeed");
    let stored = snapshot.get("qa").expect("qa stored");
    assert_eq!(stored.release_number(), "0.0.1.0");
}

#[rstest]
#[ignore = "requires a PostgreSQL server in OPENVERSION_TEST_DATABASE_URL"]
fn duplicate_insert_is_a_conflict(#[from(pg_context)] ctx: PgContext) {
    let seed = proposed(1, "fix/a", ReleaseNumber::FEATURE_SEED);
    ctx.rt
        .block_on(ctx.repository.save_version(&seed))
        .expect("insert should succeed");
    let err = ctx
        .rt
        .block_on(ctx.repository.save_version(&seed))
        .expect_err("row appeared after the writer's read");
    assert!(err.is_concurrency_conflict());
}

#[rstest]
#[ignore = "requires a PostgreSQL server in OPENVERSION_TEST_DATABASE_URL"]
fn snapshots_are_scoped_to_the_project(#[from(pg_context)] ctx: PgContext) {
    for project in [1, 2] {
        let seed = proposed(project, "main", ReleaseNumber::MAJOR_SEED);
        ctx.rt
            .block_on(ctx.repository.save_version(&seed))
            .expect("insert should succeed");
    }
    let qa = proposed(2, "qa", ReleaseNumber::QA_SEED);
    ctx.rt
        .block_on(ctx.repository.save_version(&qa))
        .expect("insert should succeed");

    let other = ProjectId::new(2).expect("valid project");
    let snapshot = ctx
        .rt
        .block_on(ctx.repository.current_versions(other))
        .expect("read should succeed");
    assert_eq!(snapshot.len(), 2);
    assert!(snapshot.get("qa").is_some());
}
