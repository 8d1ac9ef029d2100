use serde::Deserialize;
use thiserror::Error;

pub const ALL_CATEGORIES: &str = "All";

const EMBEDDED_CONTENT: &str = include_str!("../content/portfolio.json");

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to parse portfolio content: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("portfolio content lists no projects")]
    NoProjects,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub profile: Profile,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub summary: String,
    pub social: Social,
    pub hero_image: String,
    pub hero_image_alt: String,
    pub resume_path: String,
    pub resume_file_name: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Social {
    pub email: String,
    pub linkedin: String,
    pub github: String,
}

impl Social {
    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.email)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub description: String,
    pub live_url: String,
    pub category: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub role: String,
    pub company: String,
    pub dates: String,
    #[serde(default)]
    pub details: Vec<String>,
    #[serde(default)]
    pub certificate: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub dates: String,
}

impl Portfolio {
    /// The content bundled into the binary at build time.
    pub fn embedded() -> Result<Self, ContentError> {
        Self::from_json(EMBEDDED_CONTENT)
    }

    pub fn from_json(raw: &str) -> Result<Self, ContentError> {
        let portfolio: Self = serde_json::from_str(raw)?;

        if portfolio.projects.is_empty() {
            return Err(ContentError::NoProjects);
        }

        Ok(portfolio)
    }

    pub fn project_titles(&self) -> Vec<String> {
        self.projects
            .iter()
            .map(|project| project.title.clone())
            .collect()
    }

    pub fn to_log_fields(&self) -> serde_json::Value {
        serde_json::json!({
            "skills": self.skills.len(),
            "projects": self.projects.len(),
            "experience": self.experience.len(),
            "education": self.education.len(),
        })
    }
}

/// Which projects the projects section shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    pub fn select(label: &str) -> Self {
        if label == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Category(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Category(category) => category,
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => project.category == *category,
        }
    }
}

/// "All" followed by each distinct category in first-seen order.
pub fn categories(projects: &[Project]) -> Vec<String> {
    let mut labels = vec![ALL_CATEGORIES.to_string()];

    for project in projects {
        if !labels.iter().any(|label| *label == project.category) {
            labels.push(project.category.clone());
        }
    }

    labels
}

pub fn filter_projects<'a>(projects: &'a [Project], filter: &CategoryFilter) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|project| filter.matches(project))
        .collect()
}
