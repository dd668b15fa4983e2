//! Then steps for next-version BDD scenarios.

use super::world::{NextVersionWorld, run_async};
use openversion::cancellation::Cancellation;
use openversion::version::{
    ports::VersionBumpError,
    services::{ComputeNextVersionError, ErrorKind},
};
use rstest_bdd_macros::then;

#[then(r#"the next version is "{expected}""#)]
fn next_version_is(world: &NextVersionWorld, expected: String) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing compute result"))?;
    let next = result
        .as_ref()
        .map_err(|err| eyre::eyre!("computation failed: {err}"))?;
    eyre::ensure!(
        next.formatted() == expected,
        "expected {expected}, found {}",
        next.formatted()
    );
    Ok(())
}

#[then(r#"the computation fails because no rule handles "{branch}""#)]
fn computation_fails_unsupported(
    world: &NextVersionWorld,
    branch: String,
) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing compute result"))?;
    match result {
        Err(err @ ComputeNextVersionError::Bump(VersionBumpError::UnsupportedBranch(name)))
            if *name == branch =>
        {
            eyre::ensure!(
                err.kind() == ErrorKind::UnsupportedBranch,
                "unexpected kind {:?}",
                err.kind()
            );
            Ok(())
        }
        other => Err(eyre::eyre!("expected unsupported branch {branch}, got {other:?}")),
    }
}

#[then(r#"project {project:u32} lists {count:usize} versions starting with "{first}""#)]
fn project_lists_versions(
    world: &NextVersionWorld,
    project: u32,
    count: usize,
    first: String,
) -> Result<(), eyre::Report> {
    let cancellation = Cancellation::never();
    let pending = world
        .listing
        .project_versions(i64::from(project), &cancellation);
    let listing = run_async(pending).map_err(|err| eyre::eyre!("listing failed: {err}"))?;
    eyre::ensure!(
        listing.versions.len() == count,
        "expected {count} versions, found {}",
        listing.versions.len()
    );
    let head = listing
        .versions
        .first()
        .ok_or_else(|| eyre::eyre!("listing is empty"))?;
    eyre::ensure!(
        head.identifier_name == first,
        "expected {first} first, found {}",
        head.identifier_name
    );
    Ok(())
}
