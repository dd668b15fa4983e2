//! Compute service over the `PostgreSQL` adapter.

use crate::pg_versions::helpers::{PgContext, PgRepository, pg_context};
use openversion::cancellation::Cancellation;
use openversion::version::{
    rules::VersionBumper,
    services::{
        ComputeNextVersionRequest, ComputeNextVersionResult, ComputeNextVersionService,
        ProjectVersionsService,
    },
};
use rstest::rstest;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

type PgCompute = ComputeNextVersionService<PgRepository, VersionBumper>;

fn compute_service(ctx: &PgContext) -> PgCompute {
    let calculator = Arc::new(VersionBumper::new());
    ComputeNextVersionService::new(Arc::clone(&ctx.repository), calculator)
}

async fn compute_qa(service: PgCompute) -> ComputeNextVersionResult<String> {
    let never = Cancellation::never();
    let next = service
        .compute_next_version(ComputeNextVersionRequest::new("qa"), &never)
        .await?;
    Ok(next.formatted())
}

#[rstest]
#[ignore = "requires a PostgreSQL server in OPENVERSION_TEST_DATABASE_URL"]
fn release_train_is_persisted(#[from(pg_context)] ctx: PgContext) {
    let service = compute_service(&ctx);
    let never = Cancellation::never();
    let major = HashMap::from([("isMajor".to_owned(), Some("true".to_owned()))]);

    let steps = [
        ComputeNextVersionRequest::new("main").with_context(major),
        ComputeNextVersionRequest::new("main"),
        ComputeNextVersionRequest::new("qa"),
        ComputeNextVersionRequest::new("feature/login"),
    ];
    let versions: Vec<_> = steps
        .into_iter()
        .map(|request| {
            ctx.rt
                .block_on(service.compute_next_version(request, &never))
                .expect("compute should succeed")
                .formatted()
        })
        .collect();

    let expected = [
        "1.0.0.0",
        "1.1.0.0+minor",
        "1.1.1.0+qa",
        "1.1.0.1+feature-login",
    ];
    assert_eq!(versions, expected);

    let listing_service = ProjectVersionsService::new(Arc::clone(&ctx.repository));
    let listing = ctx
        .rt
        .block_on(listing_service.project_versions(1, &never))
        .expect("listing should succeed");
    let names: Vec<_> = listing
        .versions
        .iter()
        .map(|version| version.identifier_name.as_str())
        .collect();
    assert_eq!(names, ["feature/login", "main", "qa"]);
}

#[rstest]
#[ignore = "requires a PostgreSQL server in OPENVERSION_TEST_DATABASE_URL"]
fn concurrent_computes_yield_distinct_versions(#[from(pg_context)] ctx: PgContext) {
    let service = compute_service(&ctx).with_max_attempts(5);

    let results = ctx.rt.block_on(async {
        let first = tokio::spawn(compute_qa(service.clone()));
        let second = tokio::spawn(compute_qa(service.clone()));
        [
            first.await.expect("task should join"),
            second.await.expect("task should join"),
        ]
    });

    let versions: BTreeSet<_> = results
        .into_iter()
        .map(|result| result.expect("compute should succeed"))
        .collect();
    let expected = BTreeSet::from(["0.0.1.0+qa".to_owned(), "0.0.2.0+qa".to_owned()]);
    assert_eq!(versions, expected);
}
