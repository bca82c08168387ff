// lazyapp-core/src/build/batch.rs
use lazyapp_common::config::Config;
use lazyapp_common::error::{LazyAppError, Result};
use lazyapp_common::model::descriptor::LaunchDescriptor;
use lazyapp_common::model::request::AppRequest;
use lazyapp_common::repository::Repository;
use tracing::{debug, info};

use super::assemble::assemble;
use crate::check::collision::{detect_collisions, PreDescriptor};

/// Phase one: reference checks plus the batch-wide collision scan. Nothing is assembled here.
pub fn check_batch(requests: &[AppRequest], repository: &Repository) -> Result<()> {
    let entries = requests
        .iter()
        .map(PreDescriptor::from_request)
        .collect::<Result<Vec<_>>>()?;
    match detect_collisions(&entries, repository)? {
        Some(report) => Err(LazyAppError::CollisionDetected(report)),
        None => Ok(()),
    }
}

/// Builds every descriptor of a batch, or none of them.
pub fn build_batch(
    requests: &[AppRequest],
    repository: &Repository,
    config: &Config,
) -> Result<Vec<LaunchDescriptor>> {
    debug!("Checking batch of {} apps", requests.len());
    check_batch(requests, repository)?;

    let descriptors = requests
        .iter()
        .map(|request| assemble(request, repository, config))
        .collect::<Result<Vec<_>>>()?;
    info!("Built {} launch descriptors", descriptors.len());
    Ok(descriptors)
}
