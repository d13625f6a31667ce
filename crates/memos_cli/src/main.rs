//! Command-line front end over a plain-directory vault.
//!
//! # Responsibility
//! - Create, list and edit memos in `<vault>/<daily folder>/YYYY-MM-DD.md`.
//! - Read settings from `<vault>/.memos.json` when present.

mod local_store;

use clap::{Parser, Subcommand};
use local_store::LocalMemoStore;
use log::info;
use memos_core::document::line::restore_line_breaks;
use memos_core::service::feed::{page_window, PageSlot};
use memos_core::{
    default_log_level, init_logging, AppContext, ContentType, FeedPage, FilterSpec, FsVault,
    MemoMutator, MemoService, MemoSettings, MemoWriter,
};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const SETTINGS_FILE: &str = ".memos.json";

type CliResult = Result<(), Box<dyn Error>>;

#[derive(Parser)]
#[command(name = "memos")]
#[command(about = "Daily-note memos from the terminal")]
#[command(version = memos_core::core_version())]
struct Cli {
    /// Vault root directory
    #[arg(long, default_value = ".", global = true)]
    vault: PathBuf,

    /// Absolute directory for rolling log files (logging is off when unset)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Append a memo to today's daily note
    Add {
        /// Memo text; `\n` in the text becomes a line break
        content: String,

        /// Store as an open task
        #[arg(long)]
        task: bool,
    },

    /// Show one page of the memo feed
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Only memos carrying this tag (or a child tag)
        #[arg(long)]
        tag: Option<String>,

        /// Only memos containing this text
        #[arg(long)]
        text: Option<String>,

        /// NOT_TAGGED, LINKED, IMAGED or CONNECTED
        #[arg(long = "type")]
        content_type: Option<String>,
    },

    /// Replace text inside an existing memo
    Edit {
        id: String,
        original: String,
        replacement: String,

        /// Note owning the memo, when it is not a daily note
        #[arg(long)]
        path: Option<String>,
    },

    /// List tags with memo counts
    Tags,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, &log_dir.to_string_lossy())?;
    }

    let settings = load_settings(&cli.vault)?;
    let vault = FsVault::new(&cli.vault)
        .with_daily_note_folder(settings.daily_note_folder.clone())
        .with_daily_note_template(format!("{}\n", settings.insert_after));

    match cli.command {
        Commands::Add { content, task } => add(&vault, &settings, &content, task),
        Commands::List {
            page,
            tag,
            text,
            content_type,
        } => {
            let mut filter = FilterSpec::default();
            if let Some(tag) = tag {
                filter = filter.with_tag(tag);
            }
            if let Some(text) = text {
                filter = filter.with_text(text);
            }
            if let Some(value) = content_type {
                let parsed = ContentType::parse(&value)
                    .ok_or_else(|| format!("unknown content type `{value}`"))?;
                filter = filter.with_content_type(parsed);
            }
            list(&vault, settings, filter, page)
        }
        Commands::Edit {
            id,
            original,
            replacement,
            path,
        } => edit(&vault, settings, &id, &original, &replacement, path.as_deref()),
        Commands::Tags => tags(&vault, settings),
    }
}

fn load_settings(vault: &Path) -> Result<MemoSettings, Box<dyn Error>> {
    let path = vault.join(SETTINGS_FILE);
    if !path.is_file() {
        return Ok(MemoSettings::default());
    }
    Ok(MemoSettings::from_json_file(&path)?)
}

fn add(vault: &FsVault, settings: &MemoSettings, content: &str, task: bool) -> CliResult {
    let writer = MemoWriter::new(vault, vault, settings);
    let memo = writer.create(&content.replace("\\n", "\n"), task, None)?;
    info!("event=cli_add module=cli status=ok");
    println!("{} {}", memo.id, memo.path);
    Ok(())
}

fn list(vault: &FsVault, settings: MemoSettings, filter: FilterSpec, page: usize) -> CliResult {
    let store = LocalMemoStore::new(vault);
    let mut context = AppContext::new(settings);
    MemoService::new(&mut context, &store).fetch_all_memos()?;
    context.set_filter(filter);

    let feed = context.feed(page);
    for memo in &feed.items {
        println!(
            "{}  {:<9}  {}  {}",
            memo.id,
            memo.memo_type.as_str(),
            memo.created_at,
            restore_line_breaks(&memo.content).replace('\n', "\n    ")
        );
    }
    print_pager(&feed);
    Ok(())
}

fn print_pager(feed: &FeedPage) {
    let slots = page_window(feed.page, feed.total_pages);
    if slots.is_empty() {
        return;
    }
    let bar = slots
        .into_iter()
        .map(|slot| match slot {
            PageSlot::Page(page) if page == feed.page => format!("[{page}]"),
            PageSlot::Page(page) => page.to_string(),
            PageSlot::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    println!("-- {bar} ({} memos)", feed.total_items);
}

fn edit(
    vault: &FsVault,
    settings: MemoSettings,
    id: &str,
    original: &str,
    replacement: &str,
    path: Option<&str>,
) -> CliResult {
    let store = LocalMemoStore::new(vault);
    let mutator = MemoMutator::new(vault, vault);
    let mut context = AppContext::new(settings);
    let mut service = MemoService::new(&mut context, &store);
    service.fetch_all_memos()?;

    let memo = service.update_memo(
        &mutator,
        id,
        original,
        &replacement.replace("\\n", "\n"),
        None,
        path,
    )?;
    println!("{} {}", memo.id, memo.path);
    Ok(())
}

fn tags(vault: &FsVault, settings: MemoSettings) -> CliResult {
    let store = LocalMemoStore::new(vault);
    let mut context = AppContext::new(settings);
    let mut service = MemoService::new(&mut context, &store);
    service.fetch_all_memos()?;
    service.update_tags_state();

    for (tag, count) in &service.context().get_state().tag_counts {
        println!("{count:>4}  #{tag}");
    }
    Ok(())
}
