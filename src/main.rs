use clap::{Parser, Subcommand};
use flipbook::config::{self, ViewerConfig};
use flipbook::types::Manifest;
use flipbook::viewer::{SoundCue, Viewer};
use flipbook::{generate, output, scan, simulate};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "flipbook")]
#[command(about = "Page-turn image viewer: book manifests and static flipbooks")]
#[command(long_about = "\
Page-turn image viewer: book manifests and static flipbooks

A book is a directory of page images. Pages are ordered by filename with
numbers compared by value, so page2.jpg comes before page10.jpg.

Book structure:

  public/
  ├── flip.mp3                 # Page-flip sound (optional)
  └── book/
      ├── book.json            # Generated manifest
      ├── cover.jpg
      ├── page1.jpg
      └── page10.png

Running 'flipbook' with no command writes book.json for the configured book.
Run 'flipbook gen-config' to print a documented flipbook.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file
    #[arg(long, default_value = config::CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Book directory (overrides book.dir)
    #[arg(long, global = true)]
    book: Option<PathBuf>,

    /// Output directory for the generated site
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the book directory and write its manifest (default)
    Manifest,
    /// Scan without writing and compare against the existing manifest
    Check,
    /// Render the static HTML flipbook from the manifest
    Generate,
    /// Replay input events from stdin against the viewer
    Simulate,
    /// Print a stock flipbook.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Manifest) {
        Command::Manifest => {
            let (_, book_dir, manifest_path) = resolve_book(&cli.config, cli.book.as_deref())?;
            let manifest = scan::build_manifest(&book_dir, &manifest_path)?;
            output::print_manifest_output(&manifest, &manifest_path);
        }
        Command::Check => {
            let (_, book_dir, manifest_path) = resolve_book(&cli.config, cli.book.as_deref())?;
            println!("==> Checking {}", book_dir.display());
            let scanned = scan::scan(&book_dir)?;
            let on_disk = Manifest::load(&manifest_path).ok();
            output::print_check_output(&scanned, on_disk.as_ref());
        }
        Command::Generate => {
            let (viewer_config, book_dir, manifest_path) =
                resolve_book(&cli.config, cli.book.as_deref())?;
            let manifest = Manifest::load(&manifest_path)?;
            println!("==> Generating flipbook \u{2192} {}", cli.output.display());
            let summary = generate::generate(&manifest, &viewer_config, &book_dir, &cli.output)?;
            output::print_generate_output(&manifest, &summary);
        }
        Command::Simulate => {
            let (viewer_config, book_dir, manifest_path) =
                resolve_book(&cli.config, cli.book.as_deref())?;
            let sound = if viewer_config.sound.enabled {
                let path = site_root(&book_dir).join(&viewer_config.sound.path);
                SoundCue::load(&path, viewer_config.sound.volume)
            } else {
                None
            };
            let mut viewer = Viewer::load(&manifest_path, &viewer_config.book.base_url, sound);
            let steps = simulate::run(&mut viewer, std::io::stdin().lock())?;
            output::print_steps(&steps, viewer.page_count());
            if let Some(cue) = viewer.sound() {
                println!("Sound: {} played {} times", cue.path().display(), cue.plays());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config and apply the `--book` override.
///
/// Returns the config with the book directory and manifest path it resolves to.
fn resolve_book(
    config_path: &Path,
    book: Option<&Path>,
) -> Result<(ViewerConfig, PathBuf, PathBuf), config::ConfigError> {
    let mut viewer_config = config::load_config(config_path)?;
    if let Some(book) = book {
        viewer_config.book.dir = book.to_path_buf();
    }
    let book_dir = viewer_config.book.dir.clone();
    let manifest_path = viewer_config.manifest_path();
    Ok((viewer_config, book_dir, manifest_path))
}

/// The directory the viewer is served from: the book directory's parent.
fn site_root(book_dir: &Path) -> &Path {
    book_dir.parent().unwrap_or(Path::new("."))
}
