//! Show a single post with its neighbours

use anyhow::Result;

use crate::content::excerpt::excerpt;
use crate::helpers::post_url;
use crate::Blog;

/// Print a post's metadata, excerpt and navigation
pub fn run(blog: &Blog, identifier: &str) -> Result<()> {
    let post = blog.loader().find_by_identifier(identifier)?;

    println!("{}", post_url(&blog.config, &post.identifier));
    println!("{}", serde_yaml::to_string(&post.metadata)?.trim_end());
    println!();
    println!("{}", excerpt(&post.raw_body, blog.config.excerpt_length));
    println!();
    match &post.next {
        Some(next) => println!("next:     {} ({})", next.title, next.identifier),
        None => println!("next:     -"),
    }
    match &post.previous {
        Some(previous) => println!("previous: {} ({})", previous.title, previous.identifier),
        None => println!("previous: -"),
    }

    Ok(())
}
