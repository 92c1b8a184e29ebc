//! Well-known template kinds and their metadata.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Descriptive metadata attached to every template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateMetadata {
    /// Display name.
    pub name: String,
    pub description: String,
    /// Change categories the template is meant for.
    pub suitable_for: Vec<String>,
}

/// Template identity: one of the four built-in kinds or a custom name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Feature,
    Bugfix,
    Hotfix,
    Docs,
    Custom(String),
}

impl TemplateKind {
    /// The four kinds that ship with curated metadata and content.
    pub const BUILTIN: [TemplateKind; 4] = [
        TemplateKind::Feature,
        TemplateKind::Bugfix,
        TemplateKind::Hotfix,
        TemplateKind::Docs,
    ];

    /// Resolve a template file stem. Matching is exact and case-sensitive.
    pub fn from_name(name: &str) -> Self {
        match name {
            "feature" => Self::Feature,
            "bugfix" => Self::Bugfix,
            "hotfix" => Self::Hotfix,
            "docs" => Self::Docs,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Template key (file stem).
    pub fn name(&self) -> &str {
        match self {
            Self::Feature => "feature",
            Self::Bugfix => "bugfix",
            Self::Hotfix => "hotfix",
            Self::Docs => "docs",
            Self::Custom(name) => name,
        }
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// Metadata from the built-in table, or a generated default for custom names.
    pub fn metadata(&self) -> TemplateMetadata {
        let (display, description, suitable_for): (&str, &str, &[&str]) = match self {
            Self::Feature => (
                "Feature",
                "For new features and enhancements",
                &[
                    "New functionality",
                    "Feature enhancements",
                    "New API endpoints",
                    "UI/UX improvements",
                ],
            ),
            Self::Bugfix => (
                "Bug Fix",
                "For fixing bugs and issues",
                &[
                    "Bug fixes",
                    "Error handling improvements",
                    "Performance fixes",
                    "Security fixes",
                ],
            ),
            Self::Hotfix => (
                "Hotfix",
                "For critical production issues",
                &[
                    "Critical production bugs",
                    "Security vulnerabilities",
                    "Service outages",
                    "Data corruption fixes",
                ],
            ),
            Self::Docs => (
                "Documentation",
                "For documentation changes",
                &[
                    "README updates",
                    "API documentation",
                    "Code comments",
                    "Architecture docs",
                ],
            ),
            Self::Custom(name) => {
                return TemplateMetadata {
                    name: title_case(name),
                    description: format!("Template for {}", name),
                    suitable_for: Vec::new(),
                };
            }
        };

        TemplateMetadata {
            name: display.to_string(),
            description: description.to_string(),
            suitable_for: suitable_for.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Default markdown body for built-in kinds.
    pub fn builtin_content(&self) -> Option<&'static str> {
        match self {
            Self::Feature => Some(include_str!("../../templates/feature.md")),
            Self::Bugfix => Some(include_str!("../../templates/bugfix.md")),
            Self::Hotfix => Some(include_str!("../../templates/hotfix.md")),
            Self::Docs => Some(include_str!("../../templates/docs.md")),
            Self::Custom(_) => None,
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Title-case a name: letters following a non-letter are uppercased,
/// all other letters lowercased ("release_notes" -> "Release_Notes").
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_is_letter = false;

    for c in name.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }

    out
}
