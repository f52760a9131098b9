use anyhow::{bail, Result};

use folio_core::{AppConfig, MediaItem, MediaSource, Portfolio};

/// Validate the portfolio and every media reference that can be checked offline
pub fn run(config: &AppConfig) -> Result<()> {
    let path = config.content_path();
    let portfolio = Portfolio::load(&path)?;
    println!("Portfolio: {}", path.display());

    let mut problems = Vec::new();
    for project in &portfolio.projects {
        let items = project.media_items();
        if items.is_empty() {
            problems.push(format!("{}: no media", project.id));
        }
        for item in &items {
            if let Some(problem) = check_item(item) {
                problems.push(format!("{}: {}", project.id, problem));
            }
        }
    }
    for (label, link) in portfolio.site.contact.links() {
        if let Ok(MediaSource::Local(path)) = MediaSource::parse(&link) {
            if !link.starts_with("mailto:") && !path.exists() {
                problems.push(format!("contact {label}: missing file {}", path.display()));
            }
        }
    }

    println!(
        "  {} projects, {} buckets, {} unbucketed",
        portfolio.projects.len(),
        portfolio.buckets.len(),
        portfolio.unbucketed().len()
    );

    if problems.is_empty() {
        println!("  OK");
        return Ok(());
    }
    for problem in &problems {
        println!("  - {problem}");
    }
    bail!("{} problem(s) found", problems.len());
}

fn check_item(item: &MediaItem) -> Option<String> {
    if item.is_embedded_video() {
        return item
            .video_id()
            .is_none()
            .then(|| format!("unrecognized video link {}", item.url()));
    }
    match MediaSource::parse(item.url()) {
        Ok(MediaSource::Local(path)) if !path.exists() => {
            Some(format!("missing file {}", path.display()))
        }
        Ok(_) => None,
        Err(e) => Some(format!("{}: {}", item.url(), e)),
    }
}
