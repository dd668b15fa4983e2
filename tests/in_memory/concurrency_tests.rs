//! Racing computes resolved by optimistic retry.

use super::helpers::{Harness, harness};
use openversion::cancellation::Cancellation;
use openversion::version::services::ComputeNextVersionRequest;
use rstest::rstest;
use std::collections::BTreeSet;

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_computes_yield_distinct_sequential_versions(harness: Harness) {
    let tasks: Vec<_> = (0..2)
        .map(|_| {
            let compute = harness.compute.clone();
            tokio::spawn(async move {
                let never = Cancellation::never();
                compute
                    .compute_next_version(ComputeNextVersionRequest::new("qa"), &never)
                    .await
            })
        })
        .collect();

    let mut versions = BTreeSet::new();
    for task in tasks {
        let next = task
            .await
            .expect("task should join")
            .expect("compute should succeed");
        versions.insert(next.formatted());
    }

    let expected: BTreeSet<String> = ["0.0.1.0+qa", "0.0.2.0+qa"]
        .into_iter()
        .map(str::to_owned)
        .collect();
    assert_eq!(versions, expected);
}
