//! Operations that combine several registry calls.
//!
//! Tag dates come from one manifest request per tag, issued one after another
//! in server order. Nothing here caches between calls.

use crate::client::Transport;
use crate::digest::Digest;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::registry::Registry;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;


/// A tag paired with the `Last-Modified` date of its manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagDate {
    pub tag: String,
    pub date: DateTime<Utc>,
}

impl TagDate {
    pub fn new(tag: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            tag: tag.into(),
            date,
        }
    }
}

/// Sorts tags oldest first. Tags with equal dates keep their relative order.
pub fn sort_by_date(mut tags: Vec<TagDate>) -> Vec<TagDate> {
    tags.sort_by_key(|t| t.date);
    tags
}

/// Tags to delete and tags to keep under a retention policy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RetentionPlan {
    /// Oldest tags, in deletion order
    pub delete: Vec<TagDate>,
    /// The newest tags
    pub keep: Vec<TagDate>,
}

/// Splits a date-sorted tag list so the `keep` newest tags survive.
///
/// When there are `keep` tags or fewer, nothing is scheduled for deletion.
pub fn retention_split(mut sorted: Vec<TagDate>, keep: usize) -> RetentionPlan {
    let delete_count = sorted.len().saturating_sub(keep);
    let keep = sorted.split_off(delete_count);
    RetentionPlan {
        delete: sorted,
        keep,
    }
}

/// Sums the layer sizes of one manifest, counting each digest once.
///
/// The config blob is not included.
pub fn layer_size(manifest: &Manifest) -> u64 {
    let by_digest: HashMap<&str, u64> = manifest
        .layers
        .iter()
        .map(|layer| (layer.digest.as_str(), layer.size))
        .collect();
    by_digest.values().sum()
}

/// Result of [`Registry::delete_keeping`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetentionOutcome {
    /// The image has no more than `keep` tags; nothing was deleted.
    NotEnoughTags { available: usize },
    /// Tags deleted, oldest first.
    Deleted { deleted: Vec<String> },
    /// Dry run: tags that would have been deleted, oldest first.
    Planned { tags: Vec<String> },
}

/// Progress reported while [`Registry::delete_keeping_with`] deletes tags.
///
/// A `Deleting` event without a matching `Deleted` marks the tag whose
/// deletion failed; every earlier `Deleted` tag is already gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteProgress<'a> {
    /// The DELETE for `tag` is about to be sent.
    Deleting { tag: &'a str },
    /// `tag` was deleted.
    Deleted { tag: &'a str, digest: &'a Digest },
}

impl<T: Transport> Registry<T> {
    /// Lists the tags of `image` sorted by date, oldest first.
    pub fn tags_by_date(&self, image: &str) -> Result<Vec<TagDate>> {
        let tags = self.list_tags(image)?;
        self.sorted_tag_dates(image, tags)
    }

    fn sorted_tag_dates(&self, image: &str, tags: Vec<String>) -> Result<Vec<TagDate>> {
        let mut dated = Vec::with_capacity(tags.len());
        for tag in tags {
            let date = self.image_tag_date(image, &tag)?;
            dated.push(TagDate { tag, date });
        }
        Ok(sort_by_date(dated))
    }

    /// Deletes every tag of `image` except the `keep` newest.
    ///
    /// Tag dates are only fetched when there is something to delete.
    /// Deletions run oldest first and stop at the first failure, leaving
    /// the remaining tags in place. With `dry_run` set no DELETE is sent.
    pub fn delete_keeping(
        &self,
        image: &str,
        keep: usize,
        dry_run: bool,
    ) -> Result<RetentionOutcome> {
        self.delete_keeping_with(image, keep, dry_run, |_| {})
    }

    /// Like [`Registry::delete_keeping`], reporting each deletion to
    /// `on_progress` as it happens.
    ///
    /// The batch is not atomic. When it fails partway the error carries only
    /// the failed request, so callers that need the deleted prefix must
    /// collect it from the `Deleted` events.
    pub fn delete_keeping_with<F>(
        &self,
        image: &str,
        keep: usize,
        dry_run: bool,
        mut on_progress: F,
    ) -> Result<RetentionOutcome>
    where
        F: FnMut(DeleteProgress<'_>),
    {
        let tags = self.list_tags(image)?;
        let available = tags.len();
        if available <= keep {
            tracing::debug!(image, available, keep, "nothing to delete");
            return Ok(RetentionOutcome::NotEnoughTags { available });
        }

        let sorted = self.sorted_tag_dates(image, tags)?;
        let plan = retention_split(sorted, keep);
        let tags: Vec<String> = plan.delete.into_iter().map(|t| t.tag).collect();
        tracing::debug!(image, count = tags.len(), keep, dry_run, "retention plan");

        if dry_run {
            return Ok(RetentionOutcome::Planned { tags });
        }

        for tag in &tags {
            on_progress(DeleteProgress::Deleting { tag });
            let digest = self.delete_image_by_tag(image, tag)?;
            on_progress(DeleteProgress::Deleted {
                tag,
                digest: &digest,
            });
        }

        Ok(RetentionOutcome::Deleted { deleted: tags })
    }

    /// Total layer size of `image` across all of its tags.
    ///
    /// Layers are deduplicated within each manifest only; a layer shared by
    /// two tags is counted once per tag.
    pub fn total_size(&self, image: &str) -> Result<u64> {
        let mut total = 0;
        for tag in self.list_tags(image)? {
            let manifest = self.image_manifest(image, &tag)?;
            total += layer_size(&manifest);
        }
        Ok(total)
    }
}
