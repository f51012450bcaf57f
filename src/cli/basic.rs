//! Gallery commands: listing, inspection, paging and word clouds.

use std::{future::Future, path::Path};

use crate::{
    analytics::cloud::{cloud_words, CloudOptions},
    backend::{create_source, AnySource, DatasetSource},
    config::GalleryConfig,
    dataset::fields,
    error::{Error, Result},
    loader::DatasetLoader,
    preferences::{FilePreferences, MemoryPreferences, PreferenceStore},
    view::Session,
};

type CliSession = Session<AnySource, Box<dyn PreferenceStore>>;

/// Options of the `page` command.
pub(crate) struct PageArgs {
    pub query: String,
    /// One-based page number.
    pub page: usize,
    pub page_size: Option<usize>,
    pub json: bool,
}

/// Load the configuration file, or defaults when none is given.
pub(crate) fn load_config(path: Option<&Path>) -> Result<GalleryConfig> {
    match path {
        Some(path) => GalleryConfig::from_file(path),
        None => Ok(GalleryConfig::default()),
    }
}

fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(Error::io_no_path)?;
    Ok(runtime.block_on(future))
}

fn open_session(config: &GalleryConfig) -> Result<CliSession> {
    let source = create_source(config.source.clone())?;
    let loader = DatasetLoader::new(config.datasets.clone(), source);
    let preferences: Box<dyn PreferenceStore> = match &config.preferences_path {
        Some(path) => Box::new(FilePreferences::open(path)?),
        None => Box::new(MemoryPreferences::new()),
    };
    Ok(Session::new(loader, config.gallery_state(), preferences))
}

/// List registered datasets.
pub(crate) fn cmd_datasets(config: &GalleryConfig) -> Result<()> {
    let source = create_source(config.source.clone())?;
    let loader = DatasetLoader::new(config.datasets.clone(), source);
    for (id, path) in loader.registry().iter() {
        println!("{:<12} {}", id, loader.source().location(path));
    }
    Ok(())
}

/// Display dataset information.
pub(crate) fn cmd_info(config: &GalleryConfig, id: &str) -> Result<()> {
    let source = create_source(config.source.clone())?;
    let loader = DatasetLoader::new(config.datasets.clone(), source);
    let dataset = block_on(loader.load(id))??;

    println!("Dataset: {}", id);
    println!("Rows: {}", dataset.len());
    println!("Dropped rows: {}", dataset.dropped_rows());
    println!("Fields: {}", dataset.header().len());
    for field in dataset.header() {
        println!("  - {}", field);
    }
    Ok(())
}

/// Display one page of a dataset.
pub(crate) fn cmd_page(config: &GalleryConfig, id: &str, args: &PageArgs) -> Result<()> {
    if args.page == 0 {
        return Err(Error::invalid_config("page numbers start at 1"));
    }
    let session = open_session(config)?;
    if let Some(size) = args.page_size {
        session.set_page_size(size)?;
    }
    block_on(session.load(id))??;
    session.set_query(&args.query);

    if !session.go_to_page(args.page - 1) {
        return Err(Error::invalid_config(format!(
            "page {} is out of range (1-{})",
            args.page,
            session.state().page_count()
        )));
    }

    let view = session.view_model();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!(
        "Page {}/{} ({} of {} rows match, {} per page)",
        view.page_index + 1,
        view.page_count,
        view.filtered_rows,
        view.total_rows,
        view.page_size
    );
    for row in &view.rows {
        println!(
            "{:>8}  {}  {}",
            row.text(fields::ID),
            row.text(fields::IMAGE_ALT),
            row.text(fields::ARTICLE_URL)
        );
    }
    Ok(())
}

/// Display the word cloud of a dataset.
pub(crate) fn cmd_cloud(
    config: &GalleryConfig,
    id: &str,
    query: &str,
    top: usize,
    json: bool,
) -> Result<()> {
    let session = open_session(config)?;
    block_on(session.load(id))??;
    session.set_query(query);

    let words = {
        let state = session.state();
        let options = CloudOptions::default().with_max_words(top);
        cloud_words(state.word_frequencies(), &options, state.zoom())
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&words)?);
        return Ok(());
    }
    if words.is_empty() {
        println!("No words to display");
        return Ok(());
    }
    for word in &words {
        println!("{:>6}  {:>5.1}  {}", word.value, word.font_size, word.text);
    }
    Ok(())
}
