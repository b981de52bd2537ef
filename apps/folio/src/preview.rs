//! Plain-text preview of the profile as it would appear on the CV.

use std::fmt::Write;

use crate::form::split_list;
use crate::models::profile::FormState;

fn or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

fn joined_non_empty(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .copied()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{title}\n{}", "-".repeat(title.chars().count()));
}

/// Renders the form the way the preview panel shows it: placeholders for a
/// missing name and title, and empty sections left out.
pub fn render_preview(form: &FormState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", or(&form.name, "Your Name"));
    let _ = writeln!(out, "{}", or(&form.title, "Your Title"));
    let contact = joined_non_empty(&[form.email.as_str(), form.phone.as_str(), form.location.as_str()], " · ");
    if !contact.is_empty() {
        let _ = writeln!(out, "{contact}");
    }
    if !form.photo.is_empty() {
        let _ = writeln!(out, "[photo attached]");
    }

    if !form.summary.is_empty() {
        section(&mut out, "Summary");
        let _ = writeln!(out, "{}", form.summary);
    }

    let skills = split_list(&form.skills);
    if !form.skills.is_empty() {
        section(&mut out, "Skills");
        let _ = writeln!(out, "{}", skills.join(" | "));
    }

    let certifications = split_list(&form.certifications);
    if !form.certifications.is_empty() {
        section(&mut out, "Certifications");
        let _ = writeln!(out, "{}", certifications.join(" | "));
    }

    if form
        .education
        .iter()
        .any(|e| !e.institution.is_empty() || !e.degree.is_empty())
    {
        section(&mut out, "Education");
        for e in &form.education {
            let _ = writeln!(
                out,
                "{} · {}",
                or(&e.degree, "Degree"),
                or(&e.institution, "Institution")
            );
            let dates = joined_non_empty(&[e.start_date.as_str(), e.end_date.as_str()], " - ");
            if !dates.is_empty() {
                let _ = writeln!(out, "  {dates}");
            }
            if !e.details.is_empty() {
                let _ = writeln!(out, "  {}", e.details);
            }
        }
    }

    if form
        .experience
        .iter()
        .any(|x| !x.company.is_empty() || !x.role.is_empty())
    {
        section(&mut out, "Experience");
        for x in &form.experience {
            let _ = writeln!(
                out,
                "{} · {}",
                or(&x.role, "Role"),
                or(&x.company, "Company")
            );
            let dates = joined_non_empty(&[x.start_date.as_str(), x.end_date.as_str()], " - ");
            if !dates.is_empty() {
                let _ = writeln!(out, "  {dates}");
            }
            if !x.responsibilities.is_empty() {
                let _ = writeln!(out, "  {}", x.responsibilities);
            }
        }
    }

    if form
        .projects
        .iter()
        .any(|p| !p.title.is_empty() || !p.description.is_empty())
    {
        section(&mut out, "Projects");
        for p in &form.projects {
            let _ = write!(out, "{}", or(&p.title, "Project"));
            if !p.link.is_empty() {
                let _ = write!(out, " <{}>", p.link);
            }
            let _ = writeln!(out);
            if !p.description.is_empty() {
                let _ = writeln!(out, "  {}", p.description);
            }
            let technologies = split_list(&p.technologies);
            if !technologies.is_empty() {
                let _ = writeln!(out, "  {}", technologies.join(" | "));
            }
        }
    }

    let socials: Vec<_> = form.socials.iter().filter(|(_, url)| !url.is_empty()).collect();
    if !socials.is_empty() {
        section(&mut out, "Socials");
        for (channel, url) in socials {
            let _ = writeln!(out, "{}: {url}", channel.label());
        }
    }

    out
}
