use serde::Serialize;

use crate::form::entries::{Entry, EntryList};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub start_date: String,
    pub end_date: String,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationField {
    Institution,
    Degree,
    StartDate,
    EndDate,
    Details,
}

impl Entry for EducationEntry {
    type Field = EducationField;

    fn set(&mut self, field: EducationField, value: String) {
        match field {
            EducationField::Institution => self.institution = value,
            EducationField::Degree => self.degree = value,
            EducationField::StartDate => self.start_date = value,
            EducationField::EndDate => self.end_date = value,
            EducationField::Details => self.details = value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
    pub responsibilities: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceField {
    Company,
    Role,
    StartDate,
    EndDate,
    Responsibilities,
}

impl Entry for ExperienceEntry {
    type Field = ExperienceField;

    fn set(&mut self, field: ExperienceField, value: String) {
        match field {
            ExperienceField::Company => self.company = value,
            ExperienceField::Role => self.role = value,
            ExperienceField::StartDate => self.start_date = value,
            ExperienceField::EndDate => self.end_date = value,
            ExperienceField::Responsibilities => self.responsibilities = value,
        }
    }
}

/// A project as typed into the form. `technologies` stays comma-delimited
/// until the payload is assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: String,
    pub link: String,
    pub description: String,
    pub technologies: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectField {
    Title,
    Link,
    Description,
    Technologies,
}

impl Entry for ProjectDraft {
    type Field = ProjectField;

    fn set(&mut self, field: ProjectField, value: String) {
        match field {
            ProjectField::Title => self.title = value,
            ProjectField::Link => self.link = value,
            ProjectField::Description => self.description = value,
            ProjectField::Technologies => self.technologies = value,
        }
    }
}

/// Social channels in display and submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialChannel {
    Website,
    Github,
    Linkedin,
    Twitter,
    Dribbble,
}

impl SocialChannel {
    pub const ALL: [SocialChannel; 5] = [
        SocialChannel::Website,
        SocialChannel::Github,
        SocialChannel::Linkedin,
        SocialChannel::Twitter,
        SocialChannel::Dribbble,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SocialChannel::Website => "website",
            SocialChannel::Github => "github",
            SocialChannel::Linkedin => "linkedin",
            SocialChannel::Twitter => "twitter",
            SocialChannel::Dribbble => "dribbble",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SocialChannel::Website => "Website",
            SocialChannel::Github => "GitHub",
            SocialChannel::Linkedin => "LinkedIn",
            SocialChannel::Twitter => "Twitter",
            SocialChannel::Dribbble => "Dribbble",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(key))
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// One slot per channel, indexed by `SocialChannel`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Socials([String; 5]);

impl Socials {
    pub fn get(&self, channel: SocialChannel) -> &str {
        &self.0[channel.index()]
    }

    pub fn with(&self, channel: SocialChannel, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.0[channel.index()] = value.into();
        next
    }

    /// Channels paired with their raw values, in channel order.
    pub fn iter(&self) -> impl Iterator<Item = (SocialChannel, &str)> {
        SocialChannel::ALL
            .into_iter()
            .map(move |c| (c, self.get(c)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Title,
    Email,
    Phone,
    Location,
    Summary,
    Skills,
    Certifications,
}

/// Every field the payload depends on. Request progress and the recent
/// list live in the editor, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
    pub photo: String,
    pub skills: String,
    pub certifications: String,
    pub education: EntryList<EducationEntry>,
    pub experience: EntryList<ExperienceEntry>,
    pub projects: EntryList<ProjectDraft>,
    pub socials: Socials,
}

impl FormState {
    pub fn with_field(&self, field: ProfileField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match field {
            ProfileField::Name => next.name = value,
            ProfileField::Title => next.title = value,
            ProfileField::Email => next.email = value,
            ProfileField::Phone => next.phone = value,
            ProfileField::Location => next.location = value,
            ProfileField::Summary => next.summary = value,
            ProfileField::Skills => next.skills = value,
            ProfileField::Certifications => next.certifications = value,
        }
        next
    }

    pub fn with_photo(&self, data_url: impl Into<String>) -> Self {
        Self {
            photo: data_url.into(),
            ..self.clone()
        }
    }

    pub fn with_social(&self, channel: SocialChannel, value: impl Into<String>) -> Self {
        Self {
            socials: self.socials.with(channel, value),
            ..self.clone()
        }
    }
}
