//! CLI entry point for bugabsurd

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bugabsurd::commands::new::NewPost;

#[derive(Parser)]
#[command(name = "bugabsurd")]
#[command(version)]
#[command(about = "A static site generator for a glitch-styled MDX blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new blog
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Category of the post
        #[arg(short = 'k', long, default_value = "Cyber Surrealizm")]
        category: String,

        /// Status badge shown next to the post
        #[arg(short, long)]
        status: Option<String>,

        /// File name without extension (defaults to the slugified title)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local server that renders pages on every request
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Delete the public folder
    Clean,

    /// List site content
    List {
        /// Type of content to list (post, category)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Show one post with its previous and next posts
    Show {
        /// Post identifier (file name without extension, may be percent-encoded)
        identifier: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "bugabsurd=debug,info"
    } else {
        "bugabsurd=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing blog in {:?}", target_dir);
            bugabsurd::commands::init::init_site(&target_dir)?;
            println!("Initialized blog in {:?}", target_dir);
        }

        Commands::New {
            title,
            category,
            status,
            path,
        } => {
            let blog = bugabsurd::Blog::new(&base_dir)?;
            let file = bugabsurd::commands::new::create_post(
                &blog,
                &NewPost {
                    title: &title,
                    category: &category,
                    status: status.as_deref(),
                    identifier: path.as_deref(),
                },
            )?;
            println!("Created: {:?}", file);
        }

        Commands::Generate { watch } => {
            let blog = bugabsurd::Blog::new(&base_dir)?;
            tracing::info!("Generating static files...");

            blog.generate()?;
            println!("Generated successfully!");

            if watch {
                bugabsurd::commands::generate::watch(&blog).await?;
            }
        }

        Commands::Server { port, ip } => {
            let blog = bugabsurd::Blog::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            bugabsurd::server::start(&blog, &ip, port).await?;
        }

        Commands::Clean => {
            let blog = bugabsurd::Blog::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let blog = bugabsurd::Blog::new(&base_dir)?;
            bugabsurd::commands::list::run(&blog, &r#type)?;
        }

        Commands::Show { identifier } => {
            let blog = bugabsurd::Blog::new(&base_dir)?;
            bugabsurd::commands::show::run(&blog, &identifier)?;
        }

        Commands::Version => {
            println!("bugabsurd version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
