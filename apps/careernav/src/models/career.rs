use serde::{Deserialize, Serialize};

/// Immutable reference entry in the career catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Career {
    pub id: String,
    pub career_name: String,
    pub description: String,
    pub avg_salary: String,
    pub required_skills: Vec<String>,
    pub growth_rate: String,
    pub job_outlook: String,
}

impl Career {
    fn entry(
        id: &str,
        career_name: &str,
        description: &str,
        avg_salary: &str,
        required_skills: &[&str],
        growth_rate: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            career_name: career_name.to_string(),
            description: description.to_string(),
            avg_salary: avg_salary.to_string(),
            required_skills: required_skills.iter().map(|s| s.to_string()).collect(),
            growth_rate: growth_rate.to_string(),
            job_outlook: "Excellent".to_string(),
        }
    }
}

/// The reference catalog, in the order recommendations are ranked.
pub fn catalog() -> Vec<Career> {
    vec![
        Career::entry(
            "c1",
            "Data Scientist",
            "Analyze complex data...",
            "12 LPA",
            &["Python", "ML", "Statistics"],
            "High (28%)",
        ),
        Career::entry(
            "c2",
            "Software Engineer",
            "Build software...",
            "10 LPA",
            &["Java", "DSA", "SQL"],
            "High (22%)",
        ),
        Career::entry(
            "c3",
            "Product Manager",
            "Lead product...",
            "15 LPA",
            &["Strategy", "Analytics"],
            "High (25%)",
        ),
    ]
}

/// Looks a career up by id or display name; an unknown key resolves to the
/// first entry so a detail view always has something to show.
pub fn find<'a>(careers: &'a [Career], key: &str) -> Option<&'a Career> {
    careers
        .iter()
        .find(|c| c.id == key || c.career_name == key)
        .or_else(|| careers.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_and_ids() {
        let ids: Vec<String> = catalog().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, ["c1", "c2", "c3"]);
    }

    #[test]
    fn test_find_by_id_and_name() {
        let careers = catalog();
        assert_eq!(find(&careers, "c2").unwrap().career_name, "Software Engineer");
        assert_eq!(find(&careers, "Product Manager").unwrap().id, "c3");
    }

    #[test]
    fn test_find_unknown_falls_back_to_first() {
        let careers = catalog();
        assert_eq!(find(&careers, "c99").unwrap().id, "c1");
        assert!(find(&[], "c1").is_none());
    }
}
