use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::CommentError;

/// The post being commented on. Used as a reference corpus only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcePost {
    pub content: String,
    pub author: String,
    pub url: String,
}

impl SourcePost {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub title: String,
    pub company: String,
}

/// Commenter's profile, scraped by the caller. Optional prompt context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub name: String,
    pub headline: String,
    pub experience: Vec<Experience>,
    pub skills: Vec<String>,
}

impl UserProfile {
    /// Whether the profile carries anything worth putting in a prompt.
    pub fn has_context(&self) -> bool {
        !self.name.is_empty() || !self.headline.is_empty() || !self.experience.is_empty()
    }

    /// "title at company" for the first two positions.
    pub fn experience_summary(&self) -> String {
        self.experience
            .iter()
            .take(2)
            .map(|e| format!("{} at {}", e.title, e.company))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Read a profile saved as JSON (the shape the extension scrapes).
    pub fn load_from(path: &Path) -> Result<Self, CommentError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Up to five skills, comma separated.
    pub fn skills_summary(&self) -> String {
        self.skills
            .iter()
            .take(5)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
