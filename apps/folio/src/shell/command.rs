use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::models::profile::{
    EducationField, ExperienceField, ProfileField, ProjectField, SocialChannel,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Education,
    Experience,
    Projects,
}

/// A field inside one of the repeated sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Education(EducationField),
    Experience(ExperienceField),
    Project(ProjectField),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Show,
    Payload,
    Status,
    Recent,
    Save,
    Download,
    Wait,
    Quit,
    Set(ProfileField, String),
    Social(SocialChannel, String),
    Add(Section),
    /// `index` is zero-based; the shell speaks one-based positions.
    Edit {
        index: usize,
        field: EntryField,
        value: String,
    },
    Remove(Section, usize),
    Photo(PathBuf),
    ClearPhoto,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("Missing {0}")]
    Missing(&'static str),

    #[error("Unknown {kind} '{value}'")]
    Unknown { kind: &'static str, value: String },

    #[error("Positions start at 1, got '{0}'")]
    BadPosition(String),
}

pub const HELP: &str = "\
Commands:
  set <name|title|email|phone|location|summary|skills|certifications> <value>
  social <website|github|linkedin|twitter|dribbble> [url]
  add <education|experience|project>
  edit <education|experience|project> <n> <field> <value>
  remove <education|experience|project> <n>
  photo <path> | photo clear
  show        preview the profile
  payload     print the submission payload as JSON
  status      show save/download progress
  recent      list recently saved portfolios
  save        save the portfolio to the backend
  download    download the generated CV
  wait        wait for running requests to finish
  quit";

/// Splits off the next whitespace-delimited word.
fn next_word<'a>(rest: &mut &'a str) -> Option<&'a str> {
    let trimmed = rest.trim_start();
    if trimmed.is_empty() {
        *rest = trimmed;
        return None;
    }
    let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
    let (word, tail) = trimmed.split_at(end);
    *rest = tail;
    Some(word)
}

fn parse_section(word: Option<&str>) -> Result<Section, ParseError> {
    match word.map(str::to_ascii_lowercase).as_deref() {
        Some("education") => Ok(Section::Education),
        Some("experience") => Ok(Section::Experience),
        Some("project") | Some("projects") => Ok(Section::Projects),
        Some(other) => Err(ParseError::Unknown {
            kind: "section",
            value: other.to_string(),
        }),
        None => Err(ParseError::Missing("section")),
    }
}

fn parse_position(word: Option<&str>) -> Result<usize, ParseError> {
    let word = word.ok_or(ParseError::Missing("position"))?;
    match word.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(ParseError::BadPosition(word.to_string())),
    }
}

fn parse_profile_field(word: &str) -> Option<ProfileField> {
    Some(match word {
        "name" => ProfileField::Name,
        "title" => ProfileField::Title,
        "email" => ProfileField::Email,
        "phone" => ProfileField::Phone,
        "location" => ProfileField::Location,
        "summary" => ProfileField::Summary,
        "skills" => ProfileField::Skills,
        "certifications" | "certs" => ProfileField::Certifications,
        _ => return None,
    })
}

fn parse_entry_field(section: Section, word: &str) -> Option<EntryField> {
    Some(match section {
        Section::Education => EntryField::Education(match word {
            "institution" => EducationField::Institution,
            "degree" => EducationField::Degree,
            "start" | "start_date" => EducationField::StartDate,
            "end" | "end_date" => EducationField::EndDate,
            "details" => EducationField::Details,
            _ => return None,
        }),
        Section::Experience => EntryField::Experience(match word {
            "company" => ExperienceField::Company,
            "role" => ExperienceField::Role,
            "start" | "start_date" => ExperienceField::StartDate,
            "end" | "end_date" => ExperienceField::EndDate,
            "responsibilities" => ExperienceField::Responsibilities,
            _ => return None,
        }),
        Section::Projects => EntryField::Project(match word {
            "title" => ProjectField::Title,
            "link" => ProjectField::Link,
            "description" => ProjectField::Description,
            "technologies" | "tech" => ProjectField::Technologies,
            _ => return None,
        }),
    })
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut rest = line;
        let verb = next_word(&mut rest)
            .map(str::to_ascii_lowercase)
            .ok_or(ParseError::Missing("command"))?;

        let command = match verb.as_str() {
            "help" | "?" => Command::Help,
            "show" | "preview" => Command::Show,
            "payload" => Command::Payload,
            "status" => Command::Status,
            "recent" => Command::Recent,
            "save" => Command::Save,
            "download" => Command::Download,
            "wait" => Command::Wait,
            "quit" | "exit" => Command::Quit,
            "set" => {
                let word = next_word(&mut rest).ok_or(ParseError::Missing("field"))?;
                let field = parse_profile_field(&word.to_ascii_lowercase()).ok_or_else(|| {
                    ParseError::Unknown {
                        kind: "field",
                        value: word.to_string(),
                    }
                })?;
                Command::Set(field, rest.trim().to_string())
            }
            "social" => {
                let word = next_word(&mut rest).ok_or(ParseError::Missing("channel"))?;
                let channel = SocialChannel::from_key(word).ok_or_else(|| ParseError::Unknown {
                    kind: "channel",
                    value: word.to_string(),
                })?;
                Command::Social(channel, rest.trim().to_string())
            }
            "add" => Command::Add(parse_section(next_word(&mut rest))?),
            "edit" => {
                let section = parse_section(next_word(&mut rest))?;
                let index = parse_position(next_word(&mut rest))?;
                let word = next_word(&mut rest).ok_or(ParseError::Missing("field"))?;
                let field = parse_entry_field(section, &word.to_ascii_lowercase()).ok_or_else(
                    || ParseError::Unknown {
                        kind: "field",
                        value: word.to_string(),
                    },
                )?;
                Command::Edit {
                    index,
                    field,
                    value: rest.trim().to_string(),
                }
            }
            "remove" | "rm" => {
                let section = parse_section(next_word(&mut rest))?;
                Command::Remove(section, parse_position(next_word(&mut rest))?)
            }
            "photo" => match rest.trim() {
                "" => return Err(ParseError::Missing("photo path")),
                "clear" => Command::ClearPhoto,
                path => Command::Photo(PathBuf::from(path)),
            },
            _ => return Err(ParseError::UnknownCommand(verb)),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_keeps_rest_of_line() {
        assert_eq!(
            "set skills React, , Tailwind ,Figma".parse(),
            Ok(Command::Set(
                ProfileField::Skills,
                "React, , Tailwind ,Figma".to_string()
            ))
        );
        assert_eq!(
            "SET Name   Jane Doe  ".parse(),
            Ok(Command::Set(ProfileField::Name, "Jane Doe".to_string()))
        );
    }

    #[test]
    fn test_edit_uses_one_based_positions() {
        assert_eq!(
            "edit project 2 tech Rust, tokio".parse(),
            Ok(Command::Edit {
                index: 1,
                field: EntryField::Project(ProjectField::Technologies),
                value: "Rust, tokio".to_string(),
            })
        );
        assert_eq!(
            "edit education 0 degree BSc".parse::<Command>(),
            Err(ParseError::BadPosition("0".to_string()))
        );
    }

    #[test]
    fn test_field_must_belong_to_section() {
        assert_eq!(
            "edit experience 1 degree BSc".parse::<Command>(),
            Err(ParseError::Unknown {
                kind: "field",
                value: "degree".to_string()
            })
        );
    }

    #[test]
    fn test_social_without_url_clears() {
        assert_eq!(
            "social github".parse(),
            Ok(Command::Social(SocialChannel::Github, String::new()))
        );
    }

    #[test]
    fn test_photo_commands() {
        assert_eq!(
            "photo ./me and you.png".parse(),
            Ok(Command::Photo(PathBuf::from("./me and you.png")))
        );
        assert_eq!("photo clear".parse(), Ok(Command::ClearPhoto));
        assert_eq!(
            "photo".parse::<Command>(),
            Err(ParseError::Missing("photo path"))
        );
    }

    #[test]
    fn test_remove_and_unknown() {
        assert_eq!(
            "rm education 1".parse(),
            Ok(Command::Remove(Section::Education, 0))
        );
        assert_eq!(
            "launch".parse::<Command>(),
            Err(ParseError::UnknownCommand("launch".to_string()))
        );
    }
}
