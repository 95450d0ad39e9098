use std::fs;
use std::path::{Path, PathBuf};

use crate::category::Category;
use crate::document::{Feature, OutputCollection};
use crate::error::{ExtractError, Result};
use crate::filter::Accepted;

/// A named set of features bound for one output file.
#[derive(Debug, Clone)]
pub struct OutputGroup {
    pub name: String,
    pub file_name: String,
    pub features: Vec<Feature>,
}

/// What was written for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenGroup {
    pub name: String,
    pub path: PathBuf,
    pub feature_count: usize,
}

/// Splits accepted features into output groups.
///
/// Class airspace yields one group per class code, in first-seen order. Every
/// other category yields exactly one group, even when it is empty.
pub fn partition(
    category: Category,
    accepted: Vec<Accepted>,
    input_path: &Path,
) -> Vec<OutputGroup> {
    match category {
        Category::ClassAirspace => partition_by_class(accepted, input_path),
        _ => vec![OutputGroup {
            name: category.group_name().to_string(),
            file_name: input_file_name(category, input_path),
            features: accepted.into_iter().map(|a| a.feature).collect(),
        }],
    }
}

fn partition_by_class(accepted: Vec<Accepted>, input_path: &Path) -> Vec<OutputGroup> {
    let suffix = input_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();

    let mut by_class: Vec<(String, Vec<Feature>)> = Vec::new();
    for Accepted { group_key, feature } in accepted {
        let Some(class) = group_key else {
            continue;
        };
        match by_class.iter_mut().find(|(key, _)| *key == class) {
            Some((_, features)) => features.push(feature),
            None => by_class.push((class, vec![feature])),
        }
    }

    by_class
        .into_iter()
        .map(|(class, features)| {
            log::info!("Found {} in {}", features.len(), class);
            OutputGroup {
                name: format!("Class_Airspace_{class}"),
                file_name: format!("Airspace_{class}{suffix}"),
                features,
            }
        })
        .collect()
}

fn input_file_name(category: Category, input_path: &Path) -> String {
    input_path
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}.geojson", category.token()))
}

/// Creates `dir` if it is missing. Only the last path component is created;
/// a missing parent is an error.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir(dir).map_err(|e| ExtractError::filesystem(dir, e))?;
    log::info!("Created output directory: {}", dir.display());
    Ok(())
}

/// Writes every group into `output_dir`. Groups already written stay on disk
/// if a later one fails.
pub fn write_groups(groups: &[OutputGroup], output_dir: &Path) -> Result<Vec<WrittenGroup>> {
    ensure_output_dir(output_dir)?;

    let mut written = Vec::with_capacity(groups.len());
    for group in groups {
        let path = output_dir.join(&group.file_name);
        OutputCollection::new(&group.name, &group.features).write_to(&path)?;
        log::info!("Wrote {} ({} features)", path.display(), group.features.len());
        written.push(WrittenGroup {
            name: group.name.clone(),
            path,
            feature_count: group.features.len(),
        });
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn accepted(key: Option<&str>, ident: &str) -> Accepted {
        Accepted {
            group_key: key.map(str::to_string),
            feature: serde_json::from_value(json!({
                "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
                "properties": { "name": ident }
            }))
            .unwrap(),
        }
    }

    fn idents(group: &OutputGroup) -> Vec<String> {
        group
            .features
            .iter()
            .map(|f| f.property("name").unwrap().as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn single_group_named_after_category_and_input() {
        let groups = partition(
            Category::AtsRoute,
            vec![accepted(None, "J1"), accepted(None, "V2")],
            Path::new("/data/ATS_Route.geojson"),
        );
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "ATS_Routes");
        assert_eq!(groups[0].file_name, "ATS_Route.geojson");
        assert_eq!(idents(&groups[0]), vec!["J1", "V2"]);
    }

    #[test]
    fn empty_single_group_is_still_produced() {
        let groups = partition(Category::Runways, vec![], Path::new("Runways.geojson"));
        assert_eq!(groups.len(), 1);
        assert!(groups[0].features.is_empty());
    }

    #[test]
    fn airspace_groups_by_class_in_first_seen_order() {
        let groups = partition(
            Category::ClassAirspace,
            vec![
                accepted(Some("D"), "one"),
                accepted(Some("B"), "two"),
                accepted(Some("D"), "three"),
            ],
            Path::new("Class_Airspace.json"),
        );
        let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Class_Airspace_D", "Class_Airspace_B"]);
        assert_eq!(groups[0].file_name, "Airspace_D.json");
        assert_eq!(groups[1].file_name, "Airspace_B.json");
        assert_eq!(idents(&groups[0]), vec!["one", "three"]);
        assert_eq!(idents(&groups[1]), vec!["two"]);
    }

    #[test]
    fn airspace_without_features_writes_nothing() {
        let groups = partition(Category::ClassAirspace, vec![], Path::new("a.geojson"));
        assert!(groups.is_empty());
    }

    #[test]
    fn output_dir_is_created_one_level_only() {
        let tmp = tempfile::tempdir().unwrap();
        let single = tmp.path().join("out");
        ensure_output_dir(&single).unwrap();
        assert!(single.is_dir());

        let nested = tmp.path().join("missing").join("out");
        assert!(matches!(
            ensure_output_dir(&nested),
            Err(ExtractError::Filesystem { .. })
        ));
    }
}
