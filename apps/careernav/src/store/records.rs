//! Typed, versioned records on top of the string store.
//!
//! Written form: `{"version": 1, "saved_at": "<RFC 3339>", "data": <payload>}`.
//! Reads also accept a bare payload with no wrapper. Anything undecodable
//! (malformed JSON, wrong shape, a version newer than this build) reads as
//! absent, so callers can always fall back to a default.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::Store;

pub const RECORD_VERSION: u32 = 1;

#[derive(Serialize)]
struct Record<'a, T: Serialize> {
    version: u32,
    saved_at: DateTime<Utc>,
    data: &'a T,
}

/// Serializes `value` into a versioned record under `key`, replacing what was there.
pub fn save<T: Serialize>(store: &dyn Store, key: &str, value: &T) {
    let record = Record {
        version: RECORD_VERSION,
        saved_at: Utc::now(),
        data: value,
    };
    match serde_json::to_string(&record) {
        Ok(json) => store.set(key, &json),
        Err(e) => warn!(error = %e, key, "record serialization failed; store unchanged"),
    }
}

/// Reads the record under `key`. `None` when missing or undecodable.
pub fn load<T: DeserializeOwned>(store: &dyn Store, key: &str) -> Option<T> {
    let text = store.get(key)?;
    decode(&text)
        .inspect_err(|reason| warn!(key, reason = %reason, "stored record ignored"))
        .ok()
}

/// Reads the record under `key`, falling back to `T::default()`.
pub fn load_or_default<T: DeserializeOwned + Default>(store: &dyn Store, key: &str) -> T {
    load(store, key).unwrap_or_default()
}

/// True when the key holds anything at all, decodable or not.
pub fn exists(store: &dyn Store, key: &str) -> bool {
    store.get(key).is_some()
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T, String> {
    let value: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
    let payload = unwrap_record(value)?;
    serde_json::from_value(payload).map_err(|e| e.to_string())
}

/// Strips the versioned wrapper if present. Bare payloads pass through.
fn unwrap_record(value: Value) -> Result<Value, String> {
    let mut map = match value {
        Value::Object(map) => map,
        other => return Ok(other),
    };
    let version = match map.get("version").and_then(Value::as_u64) {
        Some(v) if map.len() <= 3 && map.contains_key("data") => v,
        _ => return Ok(Value::Object(map)),
    };
    if version > u64::from(RECORD_VERSION) {
        return Err(format!(
            "record version {version} is newer than supported version {RECORD_VERSION}"
        ));
    }
    Ok(map.remove("data").unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Profile, Recommendation, SkillEntry, SkillSet};
    use crate::models::career::catalog;
    use crate::recommend::synthesizer::synthesize;
    use crate::store::{keys, MemoryStore};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    #[test]
    fn test_profile_round_trip() {
        let store = MemoryStore::new();
        let profile = Profile {
            name: Some("Sai".into()),
            cgpa: Some("8.7".into()),
            college: Some("JNTU".into()),
            ..Profile::default()
        };
        save(&store, keys::PROFILE, &profile);
        assert_eq!(load::<Profile>(&store, keys::PROFILE), Some(profile));
    }

    #[test]
    fn test_skills_round_trip() {
        let store = MemoryStore::new();
        let skills = SkillSet {
            skills: vec![SkillEntry::new("Rust", 7), SkillEntry::new("Rust", 9)],
        };
        save(&store, keys::SKILLS, &skills);
        assert_eq!(load::<SkillSet>(&store, keys::SKILLS), Some(skills));
    }

    #[test]
    fn test_recommendations_round_trip() {
        let store = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(3);
        let recs = synthesize(None, None, None, &catalog(), &mut rng);
        save(&store, keys::RECOMMENDATIONS, &recs);
        assert_eq!(
            load::<Vec<Recommendation>>(&store, keys::RECOMMENDATIONS),
            Some(recs)
        );
    }

    #[test]
    fn test_written_form_is_versioned() {
        let store = MemoryStore::new();
        save(&store, keys::PROFILE, &json!({ "name": "Sai" }));
        let raw: Value = serde_json::from_str(&store.get(keys::PROFILE).unwrap()).unwrap();
        assert_eq!(raw["version"], 1);
        assert!(raw["saved_at"].is_string());
        assert_eq!(raw["data"]["name"], "Sai");
    }

    #[test]
    fn test_bare_payload_is_accepted() {
        let store = MemoryStore::new();
        store.set(keys::PROFILE, r#"{"name":"Legacy","cgpa":"9.1"}"#);
        let profile: Profile = load(&store, keys::PROFILE).unwrap();
        assert_eq!(profile.name.as_deref(), Some("Legacy"));
        assert_eq!(profile.cgpa.as_deref(), Some("9.1"));
    }

    #[test]
    fn test_malformed_json_reads_as_default() {
        let store = MemoryStore::new();
        store.set(keys::RECOMMENDATIONS, "{not json");
        let recs: Vec<Recommendation> = load_or_default(&store, keys::RECOMMENDATIONS);
        assert!(recs.is_empty());
        assert!(exists(&store, keys::RECOMMENDATIONS));
    }

    #[test]
    fn test_wrong_shape_reads_as_absent() {
        let store = MemoryStore::new();
        store.set(keys::SKILLS, r#"{"skills": "python"}"#);
        assert!(load::<SkillSet>(&store, keys::SKILLS).is_none());
    }

    #[test]
    fn test_future_version_reads_as_absent() {
        let store = MemoryStore::new();
        store.set(keys::PROFILE, r#"{"version": 99, "data": {"name": "Future"}}"#);
        assert!(load::<Profile>(&store, keys::PROFILE).is_none());
    }

    #[test]
    fn test_null_payload_round_trips() {
        let store = MemoryStore::new();
        save(&store, keys::PROFILE, &Value::Null);
        assert_eq!(load::<Value>(&store, keys::PROFILE), Some(Value::Null));
    }
}
