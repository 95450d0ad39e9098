use crate::area::AreaOfInterest;
use crate::category::Category;
use crate::cleaner::clean_properties;
use crate::document::Feature;
use crate::settings::{AirspaceSettings, RunwaySettings, Settings};

const LENGTH_KEY: &str = "LENGTH";
const DESIGNATOR_KEY: &str = "DESIGNATOR";
const LOCAL_TYPE_KEY: &str = "LOCAL_TYPE";

/// Outcome of a category's business rule for one feature.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Keep the feature; `Some` carries the key of the output group it goes to.
    Keep(Option<String>),
    Drop(&'static str),
}

/// A feature that passed every check, with properties already cleaned.
#[derive(Debug, Clone)]
pub struct Accepted {
    pub group_key: Option<String>,
    pub feature: Feature,
}

/// Runs the shared filtering loop with the rule that belongs to `category`.
pub fn filter_category(
    category: Category,
    features: Vec<Feature>,
    area: &AreaOfInterest,
    settings: &Settings,
) -> Vec<Accepted> {
    let allowlist = category.allowlist(settings);
    match category {
        Category::Runways => filter_features(features, area, allowlist, |f| {
            runway_decision(&settings.runways, f)
        }),
        Category::ClassAirspace => filter_features(features, area, allowlist, |f| {
            airspace_decision(&settings.class_airspace, f)
        }),
        Category::DesignatedPoints | Category::AtsRoute => {
            filter_features(features, area, allowlist, |_| Decision::Keep(None))
        }
    }
}

/// Keeps features whose representative point lies in `area` and that pass
/// `rule`, replacing their properties with the allowlisted set. Input order is
/// preserved.
pub fn filter_features<F>(
    features: Vec<Feature>,
    area: &AreaOfInterest,
    allowlist: &[String],
    rule: F,
) -> Vec<Accepted>
where
    F: Fn(&Feature) -> Decision,
{
    let mut accepted = Vec::new();

    for (index, mut feature) in features.into_iter().enumerate() {
        let Some(anchor) = feature.representative_point() else {
            log::warn!("Skipping feature {index}: no usable geometry");
            continue;
        };

        if !area.contains_point(&anchor) {
            continue;
        }

        let group_key = match rule(&feature) {
            Decision::Keep(key) => key,
            Decision::Drop(reason) => {
                log::debug!("Dropping feature {index}: {reason}");
                continue;
            }
        };

        let cleaned = feature
            .properties()
            .map(|props| clean_properties(props, allowlist))
            .unwrap_or_default();
        feature.set_properties(cleaned);

        accepted.push(Accepted { group_key, feature });
    }

    accepted
}

pub fn runway_decision(settings: &RunwaySettings, feature: &Feature) -> Decision {
    let Some(length) = feature.property(LENGTH_KEY).and_then(|v| v.as_f64()) else {
        return Decision::Drop("runway has no numeric LENGTH");
    };
    if length < settings.minimum_length {
        return Decision::Drop("runway shorter than minimum length");
    }

    if !settings.helipads {
        let designator = feature.property(DESIGNATOR_KEY).and_then(|v| v.as_str());
        if designator == Some(settings.helipad_designator.as_str()) {
            return Decision::Drop("helipads are excluded");
        }
    }

    Decision::Keep(None)
}

pub fn airspace_decision(settings: &AirspaceSettings, feature: &Feature) -> Decision {
    match feature.property(LOCAL_TYPE_KEY).and_then(|v| v.as_str()) {
        Some(class) if settings.classes.iter().any(|c| c == class) => {
            Decision::Keep(Some(class.to_string()))
        }
        _ => Decision::Drop("airspace class not configured"),
    }
}
