use crate::format::Formattable;
use chrono::{DateTime, Utc};
use libnexus::format::{format_age, format_date, format_size};
use libnexus::{DeleteProgress, Registry, RetentionOutcome, Transport};
use serde::Serialize;
use tabled::Tabled;

pub mod handlers;

/// Images in the configured repository
#[derive(Debug, Serialize)]
pub struct ImageList {
    pub images: Vec<String>,
    pub total: usize,
}

impl Formattable for ImageList {
    fn format_pretty(&self) -> String {
        let mut lines = self.images.clone();
        lines.push(format!("Total images: {}", self.total));
        lines.join("\n")
    }
}

/// One tag with the date its manifest was last modified
#[derive(Debug, Serialize)]
pub struct TagEntry {
    pub tag: String,
    pub created: DateTime<Utc>,
}

/// Tags of an image, oldest first
#[derive(Debug, Serialize)]
pub struct TagList {
    pub image: String,
    pub tags: Vec<TagEntry>,
}

impl Formattable for TagList {
    fn format_pretty(&self) -> String {
        let mut lines: Vec<String> = self
            .tags
            .iter()
            .map(|t| {
                format!(
                    "{} created at {} ({})",
                    t.tag,
                    format_date(&t.created),
                    format_age(&t.created)
                )
            })
            .collect();
        lines.push(format!(
            "There are {} images for {}",
            self.tags.len(),
            self.image
        ));
        lines.join("\n")
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct LayerRow {
    #[tabled(rename = "DIGEST")]
    pub digest: String,
    #[tabled(rename = "SIZE")]
    pub size: u64,
}

/// Manifest summary of `image:tag`
#[derive(Debug, Serialize)]
pub struct ImageInfo {
    pub image: String,
    pub tag: String,
    /// Size of the image config blob
    pub size: u64,
    pub layers: Vec<LayerRow>,
}

impl Formattable for ImageInfo {
    fn format_pretty(&self) -> String {
        use tabled::{Table, settings::Style};

        let mut output = format!(
            "Image: {}:{}\nSize: {}\nLayers:",
            self.image, self.tag, self.size
        );
        if !self.layers.is_empty() {
            let table = Table::new(&self.layers).with(Style::empty()).to_string();
            output.push('\n');
            output.push_str(&table);
        }
        output
    }
}

/// Total layer size of all tags of an image
#[derive(Debug, Serialize)]
pub struct SizeReport {
    pub image: String,
    pub size: u64,
    pub human: String,
}

impl Formattable for SizeReport {
    fn format_pretty(&self) -> String {
        format!("{} {} ({})", self.size, self.image, self.human)
    }
}

/// What `image delete` was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteMode {
    /// Delete one tag
    Tag(String),
    /// Delete all but the newest N tags
    Keep(usize),
}

/// Resolves the `--tag` / `--keep` combination. A tag wins over `--keep`,
/// and `--keep 0` counts as not given.
pub fn delete_mode(tag: Option<&str>, keep: Option<usize>) -> Result<DeleteMode, String> {
    match (tag.map(str::trim).filter(|t| !t.is_empty()), keep) {
        (Some(tag), _) => Ok(DeleteMode::Tag(tag.to_string())),
        (None, Some(keep)) if keep > 0 => Ok(DeleteMode::Keep(keep)),
        _ => Err(
            "You should either specify the tag or how many images you want to keep".to_string(),
        ),
    }
}

pub(crate) fn list_images<T: Transport>(registry: &Registry<T>) -> Result<ImageList, String> {
    let images = registry
        .list_images()
        .map_err(|e| format!("Failed to list images: {}", e))?;

    Ok(ImageList {
        total: images.len(),
        images,
    })
}

pub(crate) fn list_tags<T: Transport>(
    registry: &Registry<T>,
    image: &str,
) -> Result<TagList, String> {
    let tags = registry
        .tags_by_date(image)
        .map_err(|e| format!("Failed to list tags for '{}': {}", image, e))?;

    Ok(TagList {
        image: image.to_string(),
        tags: tags
            .into_iter()
            .map(|t| TagEntry {
                tag: t.tag,
                created: t.date,
            })
            .collect(),
    })
}

pub(crate) fn image_info<T: Transport>(
    registry: &Registry<T>,
    image: &str,
    tag: &str,
) -> Result<ImageInfo, String> {
    let manifest = registry
        .image_manifest(image, tag)
        .map_err(|e| format!("Failed to fetch manifest for {}:{}: {}", image, tag, e))?;

    Ok(ImageInfo {
        image: image.to_string(),
        tag: tag.to_string(),
        size: manifest.config.size,
        layers: manifest
            .layers
            .into_iter()
            .map(|layer| LayerRow {
                digest: layer.digest,
                size: layer.size,
            })
            .collect(),
    })
}

/// Line printed before a tag is deleted, or in its place on a dry run.
pub(crate) fn deletion_notice(image: &str, tag: &str, dry_run: bool) -> String {
    let verb = if dry_run { "would" } else { "will" };
    format!("{}:{} image {} be deleted ...", image, tag, verb)
}

/// Deletes one tag and returns the deleted digest. A dry run only resolves it.
pub(crate) fn delete_tag<T: Transport>(
    registry: &Registry<T>,
    image: &str,
    tag: &str,
    dry_run: bool,
) -> Result<String, String> {
    let digest = if dry_run {
        registry.resolve_digest(image, tag)
    } else {
        registry.delete_image_by_tag(image, tag)
    };

    digest
        .map(|d| d.to_string())
        .map_err(|e| format!("Failed to delete {}:{}: {}", image, tag, e))
}

/// Deletes all but the `keep` newest tags, passing each deletion to
/// `on_progress` as it happens. On failure the tags already reported as
/// deleted stay deleted.
pub(crate) fn delete_keeping<T, F>(
    registry: &Registry<T>,
    image: &str,
    keep: usize,
    dry_run: bool,
    on_progress: F,
) -> Result<RetentionOutcome, String>
where
    T: Transport,
    F: FnMut(DeleteProgress<'_>),
{
    registry
        .delete_keeping_with(image, keep, dry_run, on_progress)
        .map_err(|e| format!("Failed to delete old tags of '{}': {}", image, e))
}

pub(crate) fn total_size<T: Transport>(
    registry: &Registry<T>,
    image: &str,
) -> Result<SizeReport, String> {
    let size = registry
        .total_size(image)
        .map_err(|e| format!("Failed to compute size of '{}': {}", image, e))?;

    Ok(SizeReport {
        image: image.to_string(),
        size,
        human: format_size(size),
    })
}
