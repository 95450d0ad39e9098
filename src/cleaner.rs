use geojson::JsonObject;

/// Source attributes that are renamed to the canonical `name`.
pub const IDENTIFIER_KEYS: [&str; 3] = ["IDENT", "NAME", "DESIGNATOR"];

/// Output key that identifier-like attributes are renamed to.
pub const NAME_KEY: &str = "name";

/// Keeps only allowlisted attributes and renames identifiers to `name`.
///
/// Attributes are visited in input order, so when several identifier-like
/// attributes survive the allowlist the last one wins.
pub fn clean_properties(properties: &JsonObject, allowlist: &[String]) -> JsonObject {
    let mut cleaned = JsonObject::new();
    for (key, value) in properties {
        if !allowlist.iter().any(|a| a == key) {
            continue;
        }
        if IDENTIFIER_KEYS.contains(&key.as_str()) {
            cleaned.insert(NAME_KEY.to_string(), value.clone());
        } else {
            cleaned.insert(key.clone(), value.clone());
        }
    }
    cleaned
}
