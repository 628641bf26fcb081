use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Student profile. Every field is optional and the whole record is replaced on save.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Profile {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub degree: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub cgpa: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub specialization: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub year_of_study: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub college: Option<String>,
}

impl Profile {
    /// CGPA as displayed in reasoning text; blank counts as missing.
    pub fn cgpa_label(&self) -> Option<&str> {
        self.cgpa.as_deref().filter(|c| !c.is_empty())
    }
}

/// Accepts strings, numbers, and booleans (forms send CGPA either way); null → None.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_cgpa_is_accepted() {
        let profile: Profile = serde_json::from_value(json!({ "cgpa": 8.5 })).unwrap();
        assert_eq!(profile.cgpa_label(), Some("8.5"));
    }

    #[test]
    fn test_missing_fields_default_to_none() {
        let profile: Profile = serde_json::from_value(json!({ "name": "Sai" })).unwrap();
        assert_eq!(profile.name.as_deref(), Some("Sai"));
        assert!(profile.college.is_none());
        assert!(profile.cgpa_label().is_none());
    }

    #[test]
    fn test_blank_cgpa_has_no_label() {
        let profile = Profile {
            cgpa: Some(String::new()),
            ..Profile::default()
        };
        assert!(profile.cgpa_label().is_none());
    }
}
