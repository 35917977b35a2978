//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# Site
title: bugabsurd.pl
subtitle: Data Stream
description: ''
author: ''
language: pl

# URL
url: http://localhost:4000
root: /

# Directory
posts_dir: posts
public_dir: public
static_dir: static
post_dir: posts
category_dir: kategoria

# Content
content_extension: mdx
# Posts whose date starts with this year are listed above everything else
pinned_date: '3069'
excerpt_length: 150
critical_statuses:
  - KRYTYCZNY
  - USZKODZONY
highlight_theme: base16-ocean.dark

# Home page; leave out to use the built-in texts
# manifesto:
#   - Rzeczywistość jest błędem w oprogramowaniu.
# operator_note:
#   - Cześć, jestem operatorem.
# operator_image: /images/operator.jpg
"#;

const DEFAULT_STYLESHEET: &str = r#"body { background: #0d0d0d; color: #d1d5db; font-family: 'Source Code Pro', monospace; margin: 0; }
main { max-width: 56rem; margin: 0 auto; padding: 2rem 1rem 4rem; }
a { color: #48bb78; text-decoration: none; }
a:hover { text-decoration: underline; }
.scanlines { pointer-events: none; position: fixed; inset: 0; background: repeating-linear-gradient(0deg, rgba(0,0,0,.15) 0, rgba(0,0,0,.15) 1px, transparent 1px, transparent 3px); }
.glitch-text { position: relative; }
.glitch-text:hover::after { content: attr(data-text); position: absolute; left: 2px; top: 0; color: #f56565; clip-path: inset(40% 0 30% 0); }
.entry { margin-bottom: 2.5rem; }
.entry-meta { color: #6b7280; display: flex; flex-wrap: wrap; gap: 0 1rem; }
.entry-excerpt { color: #9ca3af; font-family: 'Inter', sans-serif; line-height: 1.6; }
.status-critical { color: #ef4444; font-weight: bold; }
.status-ok { color: #22c55e; }
.post-image img { max-width: 100%; border-radius: .5rem; }
.post-image-caption { font-size: .75rem; text-align: center; color: #6b7280; }
.post-nav { display: flex; justify-content: space-between; margin-top: 4rem; }
.holographic-quote { margin: 2rem 0; padding: 1rem 1.5rem; border-left: 3px solid #48bb78; background: rgba(72,187,120,.06); color: #e5e7eb; font-style: italic; text-shadow: -1px 0 rgba(245,101,101,.6), 1px 0 rgba(56,189,248,.6); }
.hero { min-height: 50vh; display: flex; flex-direction: column; justify-content: center; text-align: center; }
.manifesto { font-size: 1.25rem; color: #d1d5db; }
.manifesto-line { opacity: 0; animation: fade-in 1s forwards; }
.manifesto-final { font-size: 1.75rem; font-weight: bold; color: #fff; }
.boot-sequence { margin-top: 3rem; color: #6b7280; font-size: .875rem; }
.typewriter-text { display: inline-block; overflow: hidden; white-space: nowrap; }
.accent { color: #48bb78; }
.operator { margin: 6rem 0; }
.operator h2 { text-align: center; color: #48bb78; }
.operator-grid { display: grid; grid-template-columns: 2fr 3fr; gap: 2rem; align-items: center; }
.operator-photo { max-width: 100%; border-radius: .5rem; border: 1px solid #374151; }
@keyframes fade-in { to { opacity: 1; } }
.stream-footer { margin-top: 5rem; text-align: center; color: #4b5563; font-size: .75rem; }
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("posts"))?;
    fs::create_dir_all(target_dir.join("static/css"))?;
    fs::create_dir_all(target_dir.join("static/images"))?;

    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{:?} already exists", config_path);
    }
    fs::write(&config_path, DEFAULT_CONFIG)?;
    fs::write(target_dir.join("static/css/glitch.css"), DEFAULT_STYLESHEET)?;

    let today = chrono::Local::now().format("%Y-%m-%d");
    let sample_post = format!(
        r#"---
title: Witaj w cyber surrealiźmie
date: "{}"
category: Cyber Surrealizm
status: STABILNY
---

<p data-excerpt>
  Rzeczywistość jest błędem w oprogramowaniu. Ten log jest pierwszym śladem.
</p>

## Jak pisać

Każdy plik `.mdx` w katalogu `posts` to jeden log. Akapit oznaczony
atrybutem `data-excerpt` trafia na listę jako zajawka; bez niego zajawką jest
pierwszy **pogrubiony fragment** albo początek tekstu.
"#,
        today
    );
    fs::write(target_dir.join("posts/witaj.mdx"), sample_post)?;

    Ok(())
}
