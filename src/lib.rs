use std::path::{Path, PathBuf};

pub mod area;
pub mod category;
pub mod cleaner;
pub mod document;
pub mod error;
pub mod filter;
pub mod partitioner;
pub mod settings;

pub use area::AreaOfInterest;
pub use category::Category;
pub use document::{Feature, InputCollection};
pub use error::{ExtractError, Result};
pub use partitioner::{OutputGroup, WrittenGroup};
pub use settings::Settings;

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct ExtractSummary {
    pub category: Category,
    pub input_features: usize,
    pub groups: Vec<WrittenGroup>,
}

impl ExtractSummary {
    pub fn kept_features(&self) -> usize {
        self.groups.iter().map(|g| g.feature_count).sum()
    }
}

/// Identifies the category of `collection`, filters its features against
/// `area` and splits the survivors into output groups. Nothing is written.
pub fn process_collection(
    collection: InputCollection,
    input_path: &Path,
    area: &AreaOfInterest,
    settings: &Settings,
) -> Result<(Category, Vec<OutputGroup>)> {
    let category = Category::from_name(&collection.name)?;
    log::info!(
        "GeoJSON file contains {} {} features.",
        collection.features.len(),
        category
    );

    let accepted = filter::filter_category(category, collection.features, area, settings);
    log::info!("Found {} {} features of interest.", accepted.len(), category);

    Ok((category, partitioner::partition(category, accepted, input_path)))
}

/// Reads `input`, extracts the features around the configured center and
/// writes the output groups to `output_dir`, or to the configured output
/// path when `output_dir` is `None`.
pub fn extract_file(
    input: &Path,
    output_dir: Option<&Path>,
    settings: &Settings,
) -> Result<ExtractSummary> {
    let collection = document::read_input(input)?;
    let input_features = collection.features.len();

    let area = AreaOfInterest::from_center(&settings.center);
    let (category, groups) = process_collection(collection, input, &area, settings)?;

    let output_dir: PathBuf = output_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| settings.output_path.clone());
    let groups = partitioner::write_groups(&groups, &output_dir)?;

    Ok(ExtractSummary {
        category,
        input_features,
        groups,
    })
}
