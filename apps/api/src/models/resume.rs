use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit JSON `null` the same as a missing field.
/// Form state coming from older clients sends `null` for untouched sections.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Like `nullable`, and a `null` element inside the list becomes a blank entry.
fn nullable_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let items = Option::<Vec<Option<T>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items.into_iter().map(Option::unwrap_or_default).collect())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable")]
    pub phone: String,
    #[serde(default, deserialize_with = "nullable")]
    pub location: String,
    #[serde(default, deserialize_with = "nullable")]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub company: String,
    #[serde(default, deserialize_with = "nullable")]
    pub location: String,
    #[serde(default, deserialize_with = "nullable")]
    pub start_date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub end_date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default, deserialize_with = "nullable")]
    pub school: String,
    #[serde(default, deserialize_with = "nullable")]
    pub degree: String,
    #[serde(default, deserialize_with = "nullable")]
    pub field: String,
    #[serde(default, deserialize_with = "nullable")]
    pub start_date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub end_date: String,
}

/// The structured resume form: everything the user has entered so far.
///
/// Missing or `null` fields decode to empty values, so a partially filled
/// form always deserializes. Empty strings in the list sections are input
/// placeholders and are ignored by every consumer that counts entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    #[serde(default, deserialize_with = "nullable")]
    pub personal_info: PersonalInfo,
    #[serde(default, deserialize_with = "nullable_items")]
    pub experiences: Vec<Experience>,
    #[serde(default, deserialize_with = "nullable_items")]
    pub education: Vec<Education>,
    #[serde(default, deserialize_with = "nullable_items")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "nullable_items")]
    pub certifications: Vec<String>,
    #[serde(default, deserialize_with = "nullable_items")]
    pub hobbies: Vec<String>,
}

impl Default for ResumeData {
    /// The blank form: one empty row per repeatable section.
    fn default() -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            experiences: vec![Experience::default()],
            education: vec![Education::default()],
            skills: vec![String::new()],
            certifications: vec![String::new()],
            hobbies: vec![String::new()],
        }
    }
}

impl ResumeData {
    pub fn filled_skills(&self) -> Vec<&str> {
        filled(&self.skills)
    }

    pub fn filled_certifications(&self) -> Vec<&str> {
        filled(&self.certifications)
    }

    pub fn filled_hobbies(&self) -> Vec<&str> {
        filled(&self.hobbies)
    }
}

fn filled(items: &[String]) -> Vec<&str> {
    items
        .iter()
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect()
}
