use serde::{Deserialize, Deserializer, Serialize};

/// One entry of `data/meetings.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearGroup {
    pub year: i64,
    /// `null` or missing reads as empty, so the group is skipped.
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<EventRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// "March" or "March 15"; only the leading month name is used for ordering.
    #[serde(default, deserialize_with = "null_as_default")]
    pub month: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "slidesUrl", default)]
    pub slides_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PartnerRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TeamMemberRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub social: Option<SocialLinks>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub cv: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProviderRecord {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    /// `None` when the data has no contact list; the template's markup is then kept.
    #[serde(default)]
    pub contacts: Option<Vec<ContactRecord>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContactRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Treats `Some("")` like `None`, the way the site's data files use empty strings.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let groups: Vec<YearGroup> = serde_json::from_value(serde_json::json!([
            {"year": 2024, "events": [
                {"month": "March 15", "title": "Kickoff", "slidesUrl": "https://example.org/s.pdf"},
                {"title": "Untimed"}
            ]},
            {"year": 2023}
        ]))
        .unwrap();

        assert_eq!(groups[0].events[0].slides_url.as_deref(), Some("https://example.org/s.pdf"));
        assert_eq!(groups[0].events[1].month, "");
        assert!(groups[1].events.is_empty());
    }

    #[test]
    fn test_nulls_read_as_defaults() {
        let groups: Vec<YearGroup> = serde_json::from_value(serde_json::json!([
            {"year": 2025, "events": [{"month": null, "title": null}]},
            {"year": 2024, "events": null}
        ]))
        .unwrap();

        assert_eq!(groups[0].events[0].month, "");
        assert_eq!(groups[0].events[0].title, "");
        assert!(groups[1].events.is_empty());

        let providers: Vec<ProviderRecord> = serde_json::from_value(serde_json::json!([
            {"company": "A", "contacts": null},
            {"company": "B"},
            {"company": "C", "contacts": []}
        ]))
        .unwrap();
        assert_eq!(providers[0].contacts, None);
        assert_eq!(providers[1].contacts, None);
        assert_eq!(providers[2].contacts, Some(vec![]));
    }

    #[test]
    fn test_present_ignores_empty_strings() {
        assert_eq!(present(&Some("x".to_string())), Some("x"));
        assert_eq!(present(&Some(String::new())), None);
        assert_eq!(present(&None), None);
    }
}
