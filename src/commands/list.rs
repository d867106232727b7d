//! List site content

use anyhow::Result;

use crate::Site;

/// List the posts of the site, newest first
pub fn run(site: &Site) -> Result<()> {
    let posts = site.loader().load_all()?;

    println!("Posts ({}):", posts.len());
    for post in posts {
        println!(
            "  {} - {} [{}] -> /posts/{}",
            post.published.format("%Y-%m-%d"),
            post.title,
            post.id,
            post.slug
        );
    }

    Ok(())
}
