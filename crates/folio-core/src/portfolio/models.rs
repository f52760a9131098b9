use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::media::{media_list, MediaItem};
use crate::{Error, Result};

/// Owner details shown in the header, hero and contact sections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Site {
    pub name: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub contact: Contact,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    /// Resume document (URL or path)
    #[serde(default)]
    pub resume: Option<String>,
    /// Portfolio document (URL or path)
    #[serde(default)]
    pub portfolio: Option<String>,
}

impl Contact {
    /// Labelled links in display order
    pub fn links(&self) -> Vec<(&'static str, String)> {
        let mut links = Vec::new();
        if let Some(ref email) = self.email {
            links.push(("Email", format!("mailto:{email}")));
        }
        if let Some(ref url) = self.linkedin {
            links.push(("LinkedIn", url.clone()));
        }
        if let Some(ref url) = self.resume {
            links.push(("Resume", url.clone()));
        }
        if let Some(ref url) = self.portfolio {
            links.push(("Portfolio", url.clone()));
        }
        links
    }
}

/// One gallery section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    /// Year or short caption under the title
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub media: Vec<String>,
    /// Embedded video shown first in the gallery
    #[serde(default)]
    pub video: Option<String>,
}

impl Project {
    pub fn media_items(&self) -> Vec<MediaItem> {
        media_list(self)
    }
}

/// Navigation group in the Work menu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavBucket {
    pub name: String,
    /// Project ids in menu order
    #[serde(default)]
    pub projects: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Portfolio {
    #[serde(default)]
    pub site: Site,
    #[serde(default, rename = "project")]
    pub projects: Vec<Project>,
    #[serde(default, rename = "bucket")]
    pub buckets: Vec<NavBucket>,
}

impl Portfolio {
    /// Load, validate and resolve a portfolio file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut portfolio = Self::from_toml(&content)?;

        let base_dir = path.parent().unwrap_or(Path::new("."));
        portfolio.resolve_paths(base_dir);

        info!(
            "Loaded portfolio from {} ({} projects, {} buckets)",
            path.display(),
            portfolio.projects.len(),
            portfolio.buckets.len()
        );
        Ok(portfolio)
    }

    /// Parse and validate portfolio TOML without touching the filesystem
    pub fn from_toml(content: &str) -> Result<Self> {
        let portfolio: Portfolio =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    /// Check ids are present and unique and buckets reference known projects
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for project in &self.projects {
            if project.id.trim().is_empty() {
                return Err(Error::InvalidPortfolio(format!(
                    "project '{}' has an empty id",
                    project.title
                )));
            }
            if !ids.insert(project.id.as_str()) {
                return Err(Error::InvalidPortfolio(format!(
                    "duplicate project id '{}'",
                    project.id
                )));
            }
            if project.media.is_empty() && project.video.is_none() {
                warn!("Project '{}' has no media", project.id);
            }
        }

        for bucket in &self.buckets {
            if let Some(missing) = bucket.projects.iter().find(|id| !ids.contains(id.as_str())) {
                return Err(Error::InvalidPortfolio(format!(
                    "bucket '{}' references unknown project '{}'",
                    bucket.name, missing
                )));
            }
        }

        Ok(())
    }

    pub fn project(&self, id: &str) -> Result<&Project> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::ProjectNotFound(id.to_string()))
    }

    pub fn project_index(&self, id: &str) -> Option<usize> {
        self.projects.iter().position(|p| p.id == id)
    }

    /// Projects not listed in any bucket
    pub fn unbucketed(&self) -> Vec<&Project> {
        let listed: HashSet<&str> = self
            .buckets
            .iter()
            .flat_map(|b| b.projects.iter().map(String::as_str))
            .collect();
        self.projects
            .iter()
            .filter(|p| !listed.contains(p.id.as_str()))
            .collect()
    }

    /// Make relative media and document paths relative to `base_dir`
    fn resolve_paths(&mut self, base_dir: &Path) {
        for project in &mut self.projects {
            for media in &mut project.media {
                *media = resolve(base_dir, media);
            }
        }
        let contact = &mut self.site.contact;
        for doc in [&mut contact.resume, &mut contact.portfolio].into_iter().flatten() {
            *doc = resolve(base_dir, doc);
        }
    }
}

fn resolve(base_dir: &Path, raw: &str) -> String {
    if raw.contains("://") || raw.starts_with("mailto:") {
        return raw.to_string();
    }
    let expanded = crate::config::expand_tilde(Path::new(raw));
    if expanded.is_absolute() {
        return expanded.to_string_lossy().into_owned();
    }
    let joined: PathBuf = base_dir.join(expanded);
    joined.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [site]
        name = "Ada Marsh"
        tagline = "Urban Designer"
        tags = ["Public Realm", "Installations"]

        [site.contact]
        email = "ada@example.com"
        resume = "docs/resume.pdf"

        [[project]]
        id = "breath"
        title = "Liminal Breath"
        year = "2024"
        video = "https://www.youtube.com/embed/z5wdWnmcaOI"
        media = ["images/one.jpg", "https://cdn.example.com/two.jpg"]

        [[project]]
        id = "horizon"
        title = "Horizon"

        [[bucket]]
        name = "Built Work"
        projects = ["breath"]
    "#;

    #[test]
    fn test_parse_sample() {
        let portfolio = Portfolio::from_toml(SAMPLE).unwrap();
        assert_eq!(portfolio.site.name, "Ada Marsh");
        assert_eq!(portfolio.projects.len(), 2);
        assert_eq!(portfolio.buckets[0].projects, vec!["breath"]);
        assert_eq!(portfolio.project("breath").unwrap().media_items().len(), 3);
        assert_eq!(portfolio.project_index("horizon"), Some(1));
    }

    #[test]
    fn test_unknown_project() {
        let portfolio = Portfolio::from_toml(SAMPLE).unwrap();
        assert!(matches!(
            portfolio.project("nope"),
            Err(Error::ProjectNotFound(_))
        ));
    }

    #[test]
    fn test_unbucketed() {
        let portfolio = Portfolio::from_toml(SAMPLE).unwrap();
        let rest: Vec<_> = portfolio.unbucketed().iter().map(|p| p.id.clone()).collect();
        assert_eq!(rest, vec!["horizon"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let content = r#"
            [[project]]
            id = "a"
            title = "A"
            [[project]]
            id = "a"
            title = "Again"
        "#;
        assert!(matches!(
            Portfolio::from_toml(content),
            Err(Error::InvalidPortfolio(_))
        ));
    }

    #[test]
    fn test_bad_bucket_reference_rejected() {
        let content = r#"
            [[project]]
            id = "a"
            title = "A"
            [[bucket]]
            name = "Work"
            projects = ["a", "b"]
        "#;
        let err = Portfolio::from_toml(content).unwrap_err();
        assert!(err.to_string().contains("'b'"));
    }

    #[test]
    fn test_relative_paths_resolved() {
        let mut portfolio = Portfolio::from_toml(SAMPLE).unwrap();
        portfolio.resolve_paths(Path::new("/srv/site"));
        let project = portfolio.project("breath").unwrap();
        assert_eq!(project.media[0], "/srv/site/images/one.jpg");
        assert_eq!(project.media[1], "https://cdn.example.com/two.jpg");
        assert_eq!(
            portfolio.site.contact.resume.as_deref(),
            Some("/srv/site/docs/resume.pdf")
        );
    }

    #[test]
    fn test_contact_links() {
        let portfolio = Portfolio::from_toml(SAMPLE).unwrap();
        let links = portfolio.site.contact.links();
        assert_eq!(links[0], ("Email", "mailto:ada@example.com".to_string()));
        assert_eq!(links[1].0, "Resume");
    }
}
