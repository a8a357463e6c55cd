//! Adapta browser, driven from the terminal.
//!
//! Runs the browser shell against a headless engine. Each input line is an
//! action; after every action pending engine events are pumped and the
//! window state is printed.

mod commands;
mod headless;
mod terminal_host;

use anyhow::Result;
use browser::{BrowserSettings, BrowserView, Bookmarks, NewTabPage, SharedState};
use clap::Parser;
use commands::Command;
use headless::HeadlessEngine;
use std::io::{self, BufRead as _, Write as _};
use std::path::PathBuf;
use terminal_host::TerminalHost;

#[derive(Parser, Debug)]
#[command(name = "adapta", about = "A tabbed web browser shell")]
struct Args {
    /// Directory for bookmarks and other profile data.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Directory containing settings.json and the home page assets.
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Start in dark mode regardless of the settings file.
    #[arg(long)]
    dark: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if let Some(data_dir) = args.data_dir {
        paths::set_custom_data_dir(data_dir);
    }
    if let Some(config_dir) = args.config_dir {
        paths::set_custom_config_dir(config_dir);
    }

    let mut settings = BrowserSettings::load(&paths::settings_file());
    if args.dark {
        settings.dark_mode = true;
    }
    log::info!(
        "[adapta] data dir {}, config dir {}",
        paths::data_dir().display(),
        paths::config_dir().display()
    );

    let bookmarks = Bookmarks::load(paths::bookmarks_file());
    let new_tab_page = NewTabPage::new(settings.home_assets_dir(), std::env::temp_dir());
    let shared = SharedState::new(settings, bookmarks, new_tab_page);

    let mut host = TerminalHost;
    let mut view = BrowserView::new(Box::new(HeadlessEngine), shared);
    view.pump_events(&mut host);
    print_window(&view);
    println!("type \"help\" for commands");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            break;
        }

        match commands::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{}", commands::HELP),
            Ok(Command::Show) => {}
            Ok(Command::Action(action)) => {
                if !view.dispatch(action, &mut host) {
                    println!("nothing to do");
                }
            }
            Err(error) => println!("{error:#}"),
        }

        view.pump_events(&mut host);
        print_window(&view);
    }

    Ok(())
}

fn print_window(view: &BrowserView) {
    let toolbar = view.toolbar_state();
    let back = if toolbar.can_go_back { "←" } else { " " };
    let forward = if toolbar.can_go_forward { "→" } else { " " };
    println!(
        "{back} {forward} [{}] {} {}",
        toolbar.address_text, toolbar.bookmark_glyph, toolbar.theme_glyph
    );

    for (index, tab) in view.tab_strip_items().iter().enumerate() {
        let marker = if tab.is_active { "*" } else { " " };
        println!(" {marker}{} {}", index + 1, tab.title);
    }

    if toolbar.downloads_visible {
        println!(" downloads ({} active):", toolbar.downloads_in_progress);
        for row in view.download_rows() {
            println!("  {}. {}  {}", row.id.index() + 1, row.file_name, row.status_line);
        }
    }
}
