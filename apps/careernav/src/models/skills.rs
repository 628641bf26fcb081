use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillEntry {
    pub skill_name: String,
    /// Intended 0–10; not clamped.
    #[serde(default)]
    pub proficiency_level: i64,
}

impl SkillEntry {
    pub fn new(skill_name: impl Into<String>, proficiency_level: i64) -> Self {
        Self {
            skill_name: skill_name.into(),
            proficiency_level,
        }
    }
}

/// Ordered skill list. Names are not required to be unique.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SkillSet {
    #[serde(default)]
    pub skills: Vec<SkillEntry>,
}

impl SkillSet {
    /// Seed shown by an empty skills form.
    pub fn starter() -> Self {
        Self {
            skills: vec![SkillEntry::new("Python", 8)],
        }
    }

    /// Trims names and replaces blank ones with "Unknown".
    pub fn normalized(self) -> Self {
        let skills = self
            .skills
            .into_iter()
            .map(|s| {
                let name = s.skill_name.trim();
                SkillEntry {
                    skill_name: if name.is_empty() {
                        "Unknown".to_string()
                    } else {
                        name.to_string()
                    },
                    proficiency_level: s.proficiency_level,
                }
            })
            .collect();
        Self { skills }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_fills_blank_names() {
        let set = SkillSet {
            skills: vec![SkillEntry::new("  ", 3), SkillEntry::new(" SQL ", 12)],
        }
        .normalized();
        assert_eq!(set.skills[0].skill_name, "Unknown");
        assert_eq!(set.skills[1].skill_name, "SQL");
        // out-of-range levels are kept as given
        assert_eq!(set.skills[1].proficiency_level, 12);
    }

    #[test]
    fn test_missing_level_defaults_to_zero() {
        let set: SkillSet =
            serde_json::from_str(r#"{"skills":[{"skill_name":"Go"}]}"#).unwrap();
        assert_eq!(set.skills[0].proficiency_level, 0);
    }

    #[test]
    fn test_starter_has_python() {
        assert_eq!(SkillSet::starter().skills, vec![SkillEntry::new("Python", 8)]);
    }
}
