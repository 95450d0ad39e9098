use std::fmt;

use crate::error::{ExtractError, Result};
use crate::settings::Settings;

/// The dataset kinds this tool knows how to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Runways,
    ClassAirspace,
    DesignatedPoints,
    AtsRoute,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Runways,
        Category::ClassAirspace,
        Category::DesignatedPoints,
        Category::AtsRoute,
    ];

    /// Matches a document `name` case-insensitively.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "runways" => Ok(Category::Runways),
            "class_airspace" => Ok(Category::ClassAirspace),
            "designated_points" => Ok(Category::DesignatedPoints),
            "ats_route" => Ok(Category::AtsRoute),
            _ => Err(ExtractError::UnrecognizedCategory(name.to_string())),
        }
    }

    /// Lower-case token used in documents and in the settings file.
    pub fn token(self) -> &'static str {
        match self {
            Category::Runways => "runways",
            Category::ClassAirspace => "class_airspace",
            Category::DesignatedPoints => "designated_points",
            Category::AtsRoute => "ats_route",
        }
    }

    /// Collection name written into single-group outputs.
    pub fn group_name(self) -> &'static str {
        match self {
            Category::Runways => "Runways",
            Category::ClassAirspace => "Class_Airspace",
            Category::DesignatedPoints => "Designated_Points",
            Category::AtsRoute => "ATS_Routes",
        }
    }

    pub fn allowlist(self, settings: &Settings) -> &[String] {
        match self {
            Category::Runways => &settings.runways.properties,
            Category::ClassAirspace => &settings.class_airspace.properties,
            Category::DesignatedPoints => &settings.designated_points.properties,
            Category::AtsRoute => &settings.ats_route.properties,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.group_name())
    }
}
