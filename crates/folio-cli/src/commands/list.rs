use anyhow::Result;

use folio_core::{AppConfig, Portfolio};

pub fn run(config: &AppConfig) -> Result<()> {
    let portfolio = Portfolio::load(&config.content_path())?;

    if portfolio.projects.is_empty() {
        println!("No projects yet.");
        println!("\nTo create a sample portfolio, run:");
        println!("  folio init");
        return Ok(());
    }

    println!("{} ({} projects):\n", portfolio.site.name, portfolio.projects.len());

    for project in &portfolio.projects {
        let year = project
            .year
            .as_deref()
            .map(|y| format!(" ({y})"))
            .unwrap_or_default();
        let items = project.media_items();
        let videos = items.iter().filter(|i| !i.is_image()).count();

        println!("  {} - {}{}", project.id, project.title, year);
        println!("    {} media, {} video", items.len(), videos);
    }

    if !portfolio.buckets.is_empty() {
        println!("\nBuckets:");
        for bucket in &portfolio.buckets {
            println!("  {}: {}", bucket.name, bucket.projects.join(", "));
        }
    }

    Ok(())
}
