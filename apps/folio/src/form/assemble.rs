use crate::models::payload::{Payload, ProjectPayload, SocialLinks};
use crate::models::profile::{FormState, ProjectDraft};

/// Splits a comma-delimited field into trimmed, non-empty pieces.
/// Order is kept and duplicates are not removed.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn project_payload(draft: &ProjectDraft) -> ProjectPayload {
    ProjectPayload {
        title: draft.title.clone(),
        link: non_blank(&draft.link),
        description: non_blank(&draft.description),
        technologies: split_list(&draft.technologies),
    }
}

/// Derives the submission payload from the current form. Pure: the same
/// form always yields the same payload.
pub fn assemble_payload(form: &FormState) -> Payload {
    let socials = form
        .socials
        .iter()
        .filter_map(|(channel, url)| non_blank(url).map(|url| (channel, url)))
        .collect();

    Payload {
        name: form.name.clone(),
        title: form.title.clone(),
        email: form.email.clone(),
        phone: form.phone.clone(),
        location: form.location.clone(),
        summary: form.summary.clone(),
        photo: form.photo.clone(),
        skills: split_list(&form.skills),
        certifications: split_list(&form.certifications),
        // Education and experience go out exactly as typed, blank rows included.
        education: form.education.as_slice().to_vec(),
        experience: form.experience.as_slice().to_vec(),
        projects: form.projects.iter().map(project_payload).collect(),
        socials: SocialLinks(socials),
    }
}
