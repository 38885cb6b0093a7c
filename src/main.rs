//! quire's main application entry point.
//! Parses arguments, loads the corpus and template, and writes the
//! composed page.

use std::io::Write;
use std::path::Path;

use quire::{
    cli::{get_args, Args},
    compositor::{compose, read_template},
    corpus::Corpus,
    error::{default_error_handler, Result},
    loader::{ArticleLoader, ManifestLoader},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads and sorts the articles named by the manifest
/// 2. Reads the template into memory
/// 3. Composes the page into a buffer
/// 4. Writes the buffer to the output only once composition succeeded
fn run(args: Args) -> Result<()> {
    let articles = ManifestLoader::new(&args.manifest).load()?;
    let corpus = Corpus::new(articles, args.sort);

    let template = read_template(&args.template)?;
    let name = args.template.display().to_string();

    let mut page = Vec::new();
    compose(&name, &template, &corpus, args.force_article.as_deref(), &mut page)?;

    if args.output == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&page)?;
        stdout.flush()?;
    } else {
        let output = Path::new(&args.output);
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output, &page)?;
        log::debug!("Wrote {} byte(s) to {}", page.len(), output.display());
    }
    Ok(())
}
