//! When steps for next-version BDD scenarios.

use super::world::{NextVersionWorld, run_async};
use openversion::cancellation::Cancellation;
use openversion::version::services::ComputeNextVersionRequest;
use rstest_bdd_macros::when;
use std::collections::HashMap;

#[when(r#"the next version of "{branch}" is computed"#)]
fn compute_next_version(world: &mut NextVersionWorld, branch: String) {
    let request = ComputeNextVersionRequest::new(branch);
    let never = Cancellation::never();
    let next = run_async(world.service.compute_next_version(request, &never));
    world.last_result = Some(next);
}

#[when(r#"a major release of "{branch}" is computed"#)]
fn compute_major_version(world: &mut NextVersionWorld, branch: String) {
    let major = HashMap::from([("isMajor".to_owned(), Some("true".to_owned()))]);
    let request = ComputeNextVersionRequest::new(branch).with_context(major);
    let never = Cancellation::never();
    let next = run_async(world.service.compute_next_version(request, &never));
    world.last_result = Some(next);
}
