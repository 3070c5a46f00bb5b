//! Collection expansion.

use std::collections::BTreeSet;

use tracing::{info, instrument, warn};

use crate::addon::{AddonSet, MergeCounts};

use super::response::{CollectionDetails, CollectionEntry, RESULT_OK};
use super::{COLLECTION_DETAILS_PATH, WorkshopClient, WorkshopError, batch_params};

/// Outcome of one collection expansion batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionReport {
    /// Collections whose members were queued.
    pub resolved: usize,
    /// Collections the service reported as failed.
    pub failed: usize,
    /// Member ids queued vs. already present, over all collections.
    pub merged: MergeCounts,
}

impl WorkshopClient {
    /// Expands `collections` into their member items and queues them.
    ///
    /// All collections are requested in a single call. An empty set is a no-op
    /// and sends nothing.
    ///
    /// # Errors
    ///
    /// Returns [`WorkshopError`] if the call fails, the body cannot be decoded,
    /// or the batch-level `result`/`resultcount` check fails. Collections that
    /// individually report failure are skipped, not errors.
    #[instrument(skip_all, fields(collections = collections.len()))]
    pub async fn resolve_collections(
        &self,
        collections: &BTreeSet<u64>,
        addons: &mut AddonSet,
    ) -> Result<CollectionReport, WorkshopError> {
        if collections.is_empty() {
            return Ok(CollectionReport::default());
        }

        info!(count = collections.len(), "Resolving collections");
        let endpoint = self.endpoint(COLLECTION_DETAILS_PATH);
        let params = batch_params("collectioncount", collections.iter().copied());
        let details: CollectionDetails = self
            .post_batch(&endpoint, &params, collections.len())
            .await?;

        Ok(expand_collections(details.collectiondetails, addons))
    }
}

/// Queues the children of every successfully resolved collection.
pub(crate) fn expand_collections(
    entries: Vec<CollectionEntry>,
    addons: &mut AddonSet,
) -> CollectionReport {
    let mut report = CollectionReport::default();

    for entry in entries {
        let collection = entry.publishedfileid;
        if entry.result != RESULT_OK {
            warn!(
                collection,
                result = entry.result,
                "Could not get details for collection"
            );
            report.failed += 1;
            continue;
        }

        let counts = addons.merge_ids(entry.children.iter().map(|child| child.publishedfileid));
        info!(
            collection,
            added = counts.added,
            omitted = counts.omitted,
            "Queued addons from collection"
        );
        report.resolved += 1;
        report.merged.absorb(counts);
    }

    report
}
