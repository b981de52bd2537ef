use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::models::profile::{EducationEntry, ExperienceEntry, SocialChannel};

/// Submission body for the save and download endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payload {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
    pub photo: String,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectPayload>,
    pub socials: SocialLinks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub technologies: Vec<String>,
}

/// Non-blank social links, kept in channel order and sent as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SocialLinks(pub Vec<(SocialChannel, String)>);

#[cfg(test)]
impl SocialLinks {
    pub fn get(&self, channel: SocialChannel) -> Option<&str> {
        self.0
            .iter()
            .find(|(c, _)| *c == channel)
            .map(|(_, v)| v.as_str())
    }
}

impl Serialize for SocialLinks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (channel, url) in &self.0 {
            map.serialize_entry(channel.key(), url)?;
        }
        map.end()
    }
}
