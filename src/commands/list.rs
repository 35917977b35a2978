//! List site content

use anyhow::Result;

use crate::Blog;

/// List site content by type
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    let loader = blog.loader();

    match content_type {
        "post" | "posts" => {
            let posts = loader.list_all()?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}]{}",
                    post.metadata.date().unwrap_or_else(|| "????-??-??".to_string()),
                    post.metadata.title().unwrap_or_else(|| post.identifier.clone()),
                    post.metadata.category().unwrap_or("-"),
                    post.metadata
                        .status()
                        .map(|s| format!(" <{}>", s))
                        .unwrap_or_default()
                );
            }
        }
        "category" | "categories" => {
            let categories = loader.categories()?;
            println!("Categories ({}):", categories.len());
            for category in categories {
                println!("  {} ({}) -> {}", category.name, category.count, category.slug);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category",
                content_type
            );
        }
    }

    Ok(())
}
