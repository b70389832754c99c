use clap::Parser;
use color_eyre::Result;
use shelfmark::{
    Config, Profile, SqliteStorage,
    cli::{self, Cli, Commands},
};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    let args = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if args.dev { Profile::Dev } else { Profile::Prod };

    let config = Config::load_with_profile(profile)?;

    let db_path = config.get_database_path();
    let storage = SqliteStorage::new(
        db_path
            .to_str()
            .ok_or_else(|| color_eyre::eyre::eyre!("Database path contains invalid UTF-8"))?,
    )?;

    match args.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let app = shelfmark::tui::App::new(config, storage)?;
            shelfmark::tui::run_event_loop(app)?;
        }
        Commands::Search { query } => cli::handle_search(query)?,
        Commands::Add {
            title,
            author,
            shelf,
            pages,
        } => cli::handle_add(title, author, shelf, pages, &storage)?,
        Commands::Remove { id, shelf } => cli::handle_remove(id, shelf, &storage)?,
        Commands::Progress { id, page } => cli::handle_progress(id, page, &storage)?,
        Commands::Shelves => cli::handle_shelves(&storage)?,
        Commands::Review { id, text, rating } => cli::handle_review(id, text, rating, &storage)?,
        Commands::Unreview { id, review_id } => cli::handle_unreview(id, review_id, &storage)?,
        Commands::Note { id, text } => cli::handle_note(id, text, &storage)?,
        Commands::Unnote { id, note_id } => cli::handle_unnote(id, note_id, &storage)?,
        Commands::Quote { id, text, page } => cli::handle_quote(id, text, page, &storage)?,
        Commands::Unquote { id, quote_id } => cli::handle_unquote(id, quote_id, &storage)?,
        Commands::Goals { yearly, monthly } => cli::handle_goals(yearly, monthly, &storage)?,
        Commands::Stats => cli::handle_stats(&storage)?,
        Commands::Export => cli::handle_export(&storage)?,
        Commands::Theme { mode } => cli::handle_theme(mode, &storage)?,
    }

    Ok(())
}
