use clap::Parser;
use pressgang::build;
use pressgang::config::BuildConfig;
use pressgang::render::MaudTemplates;
use pressgang::watch;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pressgang")]
#[command(version)]
#[command(about = "Static site generator for a single personal website")]
#[command(long_about = "\
Static site generator for a single personal website

Posts are Markdown files with YAML front matter. Every run converts source
images to WebP, validates and normalizes all posts, then wipes and rebuilds
the output directory from scratch.

Content structure:

  content/
  ├── posts/                       # Markdown posts (any nesting)
  │   ├── on-writing-well.md       # ---\\n<yaml>\\n---\\n<markdown>
  │   └── 2023-05-05-10-00-00.md   # Short post: name = title = date
  └── images/                      # Converted to .webp in place

Front matter requires description, tags, uuid, date, and type; a post with
an image must also carry image-alt. One bad post stops the whole build —
nothing is published until the source is fixed.")]
struct Cli {
    /// Content directory (posts/ and images/)
    #[arg(long)]
    source: Option<PathBuf>,

    /// Output directory — wiped and rebuilt every run
    #[arg(long)]
    output: Option<PathBuf>,

    /// Builder-side static files (css/, fonts/, assets/)
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Watch for changes and rebuild automatically
    #[arg(short, long)]
    watch: bool,
}

fn main() {
    let cli = Cli::parse();

    let mut config = match BuildConfig::load(Path::new(".")) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    if let Some(source) = cli.source {
        config.source_root = source;
    }
    if let Some(output) = cli.output {
        config.output_root = output;
    }
    if let Some(assets) = cli.assets {
        config.assets_root = assets;
    }
    config.watch = cli.watch;

    let engine = MaudTemplates;

    if config.watch {
        println!("Watching {} for changes...", config.source_root.display());
        let result = watch::run(&config, &engine, |outcome| match outcome {
            Ok(report) => println!("{}", report.summary()),
            Err(e) => eprintln!("Error: {e}"),
        });
        if let Err(e) = result {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    } else {
        match build::build(&config, &engine, None) {
            Ok(report) => println!("{}", report.summary()),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}
