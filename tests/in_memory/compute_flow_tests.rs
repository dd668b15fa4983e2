//! Multi-branch compute sequences against the in-memory store.

use super::helpers::{Harness, harness, major, next};
use openversion::version::services::ComputeNextVersionRequest;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn release_train_across_branches(harness: Harness) {
    let compute = &harness.compute;
    let major_bump = ComputeNextVersionRequest::new("main").with_context(major());

    assert_eq!(next(compute, major_bump).await, "1.0.0.0");
    assert_eq!(
        next(compute, ComputeNextVersionRequest::new("qa")).await,
        "1.0.1.0+qa"
    );
    assert_eq!(
        next(compute, ComputeNextVersionRequest::new("qa")).await,
        "1.0.2.0+qa"
    );
    assert_eq!(
        next(compute, ComputeNextVersionRequest::new("feature/search")).await,
        "1.0.0.1+feature-search"
    );
    assert_eq!(
        next(compute, ComputeNextVersionRequest::new("main")).await,
        "1.1.0.0+minor"
    );
    assert_eq!(
        next(compute, ComputeNextVersionRequest::new("feature/search")).await,
        "1.0.0.2+feature-search"
    );
    assert_eq!(
        next(compute, ComputeNextVersionRequest::new("fix/typo")).await,
        "1.1.0.1+fix-typo"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn projects_count_independently(harness: Harness) {
    let compute = &harness.compute;

    assert_eq!(
        next(compute, ComputeNextVersionRequest::new("main")).await,
        "0.1.0.0+minor"
    );
    let other_project = ComputeNextVersionRequest::new("main").with_project_id(2);
    assert_eq!(next(compute, other_project).await, "0.1.0.0+minor");
    assert_eq!(
        next(compute, ComputeNextVersionRequest::new("main")).await,
        "0.2.0.0+minor"
    );
    assert_eq!(harness.repository.row_count().expect("count rows"), 2);
}
