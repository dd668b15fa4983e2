//! Given steps for next-version BDD scenarios.

use super::world::{NextVersionWorld, run_async};
use eyre::WrapErr;
use openversion::version::{
    domain::{BranchName, DomainVersion, ProjectId, ReleaseNumber},
    ports::VersionRepository,
};
use rstest_bdd_macros::given;

#[given("an empty version store")]
fn empty_store(world: &NextVersionWorld) -> Result<(), eyre::Report> {
    let count = world
        .repository
        .row_count()
        .wrap_err("count stored versions")?;
    eyre::ensure!(count == 0, "expected an empty store, found {count} rows");
    Ok(())
}

#[given(r#""{branch}" is at "{release}""#)]
fn branch_is_at(
    world: &NextVersionWorld,
    branch: String,
    release: String,
) -> Result<(), eyre::Report> {
    let name = BranchName::new(branch).wrap_err("parse scenario branch")?;
    let number = ReleaseNumber::parse(&release).wrap_err("parse scenario release")?;
    let snapshot = run_async(world.repository.current_versions(ProjectId::DEFAULT))
        .wrap_err("read current versions")?;
    let version = DomainVersion::proposed(ProjectId::DEFAULT, name.clone(), number, None)
        .with_concurrency_token(snapshot.token_for(&name));
    run_async(world.repository.save_version(&version)).wrap_err("seed scenario version")?;
    Ok(())
}
