use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use directory_core::{
    bootstrap, DirectoryContext, HttpUserDataSource, MountedDirectory, UserDataSource,
};
use shared::domain::{SortKey, UserId};
use tracing::info;

/// Loads the user directory from a running server, replays interactions and prints the
/// rendered markup.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    server_url: String,
    /// Text typed into the search field.
    #[arg(long)]
    search: Option<String>,
    /// Sort toggle to activate (`alphabet` or `age`); repeat to activate again.
    #[arg(long = "toggle")]
    toggles: Vec<SortKey>,
    /// Id of the row to select.
    #[arg(long)]
    select: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let source = HttpUserDataSource::new(&args.server_url)
        .with_context(|| format!("invalid server url '{}'", args.server_url))?;
    let Some(html) = render(&source, &args).await? else {
        return Ok(ExitCode::FAILURE);
    };
    println!("{html}");
    Ok(ExitCode::SUCCESS)
}

/// Mounts the directory from `source` and replays `args` against it. `None` means the
/// initial load failed; `bootstrap` has already logged the cause.
async fn render<S>(source: &S, args: &Args) -> Result<Option<String>>
where
    S: UserDataSource + ?Sized,
{
    let Ok(directory) = bootstrap(source, DirectoryContext::new()).await else {
        return Ok(None);
    };
    replay(&directory, args)?;
    Ok(Some(directory.html()))
}

fn replay(directory: &MountedDirectory, args: &Args) -> Result<()> {
    if let Some(phrase) = &args.search {
        let field = directory
            .search_field()
            .context("search field is not mounted")?;
        directory.input(field, phrase);
        info!(%phrase, shown = directory.listed_names().len(), "search applied");
    }

    for key in &args.toggles {
        let toggle = directory
            .sort_toggle(*key)
            .with_context(|| format!("sort toggle {key:?} is not mounted"))?;
        directory.activate(toggle);
        info!(mode = ?directory.store().sort_mode(), "sort toggled");
    }

    if let Some(raw_id) = &args.select {
        let id = UserId::Text(raw_id.clone());
        let row = directory
            .row(&id)
            .with_context(|| format!("no listed row for user id {raw_id}"))?;
        directory.activate(row);
        info!(user_id = %raw_id, "row selected");
    }

    Ok(())
}
