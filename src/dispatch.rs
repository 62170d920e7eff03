//! Update-pipeline collaborator contract.

use async_trait::async_trait;

use crate::bot::MockBot;
use crate::types::Update;

/// Error type pipelines report back through [`Dispatch::feed_update`].
pub type DispatchError = Box<dyn std::error::Error + Send + Sync>;

/// The application's update-processing pipeline.
///
/// `feed_update` must return only once every matching handler has finished
/// with the update; the harness relies on that to make post-feed state reads
/// consistent. Handlers perform their platform actions through the supplied
/// [`MockBot`], which records them against the simulation state instead of
/// doing network I/O.
#[async_trait]
pub trait Dispatch: Send + Sync {
    async fn feed_update(&self, bot: &MockBot, update: Update) -> Result<(), DispatchError>;
}
