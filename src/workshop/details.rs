//! Item metadata resolution.

use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::addon::AddonSet;
use crate::download::local_file_name;

use super::response::{PublishedFileDetails, PublishedFileEntry, RESULT_OK};
use super::{FILE_DETAILS_PATH, WorkshopClient, WorkshopError, batch_params};

impl WorkshopClient {
    /// Fetches metadata for every queued addon and marks downloadable ones.
    ///
    /// All ids are requested in a single call. Records are annotated in place;
    /// no ids are added or removed. Returns the number of addons that are now
    /// eligible for download.
    ///
    /// # Errors
    ///
    /// Returns [`WorkshopError`] if the call fails, the body cannot be decoded,
    /// the batch-level `result`/`resultcount` check fails, or no addon ended up
    /// eligible ([`WorkshopError::NoEligibleItems`]).
    #[instrument(skip_all, fields(addons = addons.len()))]
    pub async fn resolve_addons(&self, addons: &mut AddonSet) -> Result<usize, WorkshopError> {
        let endpoint = self.endpoint(FILE_DETAILS_PATH);
        if addons.is_empty() {
            return Err(WorkshopError::no_eligible_items(endpoint, 0));
        }

        let requested = addons.len();
        let params = batch_params("itemcount", addons.ids());
        let details: PublishedFileDetails =
            self.post_batch(&endpoint, &params, requested).await?;

        apply_details(&self.base_url, details.publishedfiledetails, addons);

        let eligible = addons.eligible_count();
        if eligible == 0 {
            return Err(WorkshopError::no_eligible_items(endpoint, requested));
        }
        info!(eligible, requested, "Resolved addon details");
        Ok(eligible)
    }
}

/// Copies metadata from the catalog entries into the matching records.
pub(crate) fn apply_details(
    base_url: &Url,
    entries: Vec<PublishedFileEntry>,
    addons: &mut AddonSet,
) {
    for entry in entries {
        let id = entry.publishedfileid;
        let Some(record) = addons.get_mut(id) else {
            warn!(id, "Catalog returned an addon that was not requested");
            continue;
        };

        if entry.result != RESULT_OK {
            warn!(id, result = entry.result, "Could not get details for addon");
            continue;
        }

        record.name = entry.title;
        record.file = local_file_name(id, &entry.filename);
        record.size = entry.file_size;

        if entry.file_url.is_empty() {
            warn!(
                id,
                name = %record.name,
                "Addon has no downloadable file; it may be private or hidden"
            );
            continue;
        }

        record.url = absolute_file_url(base_url, &entry.file_url);
        record.download_eligible = !record.url.is_empty() && !record.file.is_empty();
        debug!(id, file = %record.file, url = %record.url, "addon ready");
    }
}

/// Resolves a possibly relative file URL against the API base.
fn absolute_file_url(base_url: &Url, file_url: &str) -> String {
    if Url::parse(file_url).is_ok() {
        return file_url.to_string();
    }
    base_url
        .join(file_url)
        .map_or_else(|_| file_url.to_string(), String::from)
}
