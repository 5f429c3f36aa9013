mod app;
mod config;
mod format;
mod html;
mod load;
mod model;
mod page;
mod pager;
mod renderer;
mod sample;
mod site;
mod source;
mod ui;
mod view;

use app::App;
use clap::{ArgAction, Parser, Subcommand};
use config::SiteConfig;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use html::render_all;
use indicatif::{ProgressBar, ProgressStyle};
use page::{DEFAULT_TEMPLATE, Page, PageError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use site::Site;
use source::{DataSource, SiteRoot};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;
use view::views;

/// Renders a tabletop club's catalog, masters and gallery listings from static JSON
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON config file (defaults to the user config dir, then built-in lists)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory or base URL that data locations are relative to
    #[arg(long, global = true)]
    root: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the lists in the terminal (default)
    Browse,
    /// Render the lists into a static HTML page
    Render {
        /// Page template with mount points (built-in page if omitted)
        #[arg(short, long)]
        template: Option<PathBuf>,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Seed for the random catalog picks, for reproducible pages
        #[arg(long)]
        seed: Option<u64>,
        /// Start the masters window at this position
        #[arg(long, default_value_t = 0)]
        masters_at: usize,
        /// Start the gallery window at this position
        #[arg(long, default_value_t = 0)]
        gallery_at: usize,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = SiteConfig::load(cli.config.as_deref())?;
    if let Some(root) = cli.root {
        config.root = root;
    }
    let source = DataSource::new(SiteRoot::parse(&config.root)?);

    match cli.command.unwrap_or(Commands::Browse) {
        Commands::Render {
            template,
            output,
            seed,
            masters_at,
            gallery_at,
        } => {
            init_tracing(cli.verbose, None);
            let page = match template {
                Some(path) => Page::from_file(&path)?,
                None => Page::new(DEFAULT_TEMPLATE),
            };
            let options = RenderOptions {
                seed,
                masters_at,
                gallery_at,
            };
            let html = render_page(&config, &source, page, &options).await?;
            match output {
                Some(path) => {
                    std::fs::write(&path, html)?;
                    eprintln!("Wrote {}", path.display());
                }
                None => print!("{}", html),
            }
        }
        Commands::Browse => {
            // The UI owns the terminal, so logs only go to a file.
            if let Some(path) = browse_log_path() {
                init_tracing(cli.verbose, Some(&path));
            }

            let mut app = App::new(Site::new(&config), source);
            app.reload();

            let mut terminal = ratatui::init();
            let result = run_app(&mut terminal, &mut app).await;
            ratatui::restore();

            if let Err(e) = result {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Log to stderr, or to `log_file` when the terminal is taken by the UI.
fn init_tracing(verbose: u8, log_file: Option<&Path>) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match log_file.map(std::fs::File::create) {
        Some(Ok(file)) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        // No usable log file: stay silent rather than draw over the UI.
        Some(Err(_)) => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

fn browse_log_path() -> Option<PathBuf> {
    let dirs = config::project_dirs()?;
    let cache_dir = dirs.cache_dir();
    std::fs::create_dir_all(cache_dir).ok()?;
    Some(cache_dir.join("tabletop-showcase.log"))
}

struct RenderOptions {
    seed: Option<u64>,
    masters_at: usize,
    gallery_at: usize,
}

/// Load every list concurrently, then mount the results into `page`.
async fn render_page(
    config: &SiteConfig,
    source: &DataSource,
    mut page: Page,
    options: &RenderOptions,
) -> Result<String, PageError> {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut site = Site::new(config);
    let requests = site.begin_reload();

    let pb = ProgressBar::new(requests.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar().template("{spinner:.green} [{bar:20.cyan/blue}] {pos}/{len} {msg}") {
        pb.set_style(style.progress_chars("#>-"));
    }

    let mut pending: FuturesUnordered<_> = requests
        .into_iter()
        .map(|request| load::perform(source, request))
        .collect();
    while let Some(event) = pending.next().await {
        pb.set_message(format!("{:?}", event.list));
        site.apply(event, &mut rng);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let failures = site.failures();
    if !failures.is_empty() {
        eprintln!("{} list(s) failed to load; their containers stay empty", failures.len());
    }

    site.masters.seek(options.masters_at);
    site.gallery.seek(options.gallery_at);
    mount_site(&site, &mut page)?;
    page.render()
}

/// Mount every list and its controls into the page.
fn mount_site(site: &Site, page: &mut Page) -> Result<(), PageError> {
    let locale = &site.locale;
    for catalog in &site.catalogs {
        let nodes = render_all(&views(catalog.list.view_set(), locale));
        page.mount(catalog.list.mount(), &nodes)?;
    }

    let nodes = render_all(&views(site.masters.view_set(), locale));
    page.mount(site.masters.mount(), &nodes)?;
    page.set_controls(&site.masters_config.controls, site.masters.controls())?;

    let nodes = render_all(&views(site.gallery.view_set(), locale));
    page.mount(site.gallery.mount(), &nodes)?;
    page.set_controls(&site.gallery_config.controls, site.gallery.controls())?;

    info!(
        catalogs = site.catalogs.len(),
        masters = site.masters.view_set().len(),
        gallery = site.gallery.view_set().len(),
        "page mounted"
    );
    Ok(())
}

async fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.drain_events();
        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Poll for events with a short timeout so finished loads show up promptly
        if crossterm::event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                handle_key(app, key);
            }
        } else {
            // Let spawned loads make progress on this runtime.
            tokio::task::yield_now().await;
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('r') => app.reload(),
        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
        KeyCode::Left | KeyCode::Char('h') => {
            app.prev();
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.next();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, body: &str) {
        let path = dir.join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    fn fixture_site(dir: &Path) {
        write(
            dir,
            "data/boardgames.json",
            r#"[
                {"title":"A","description":"d","players":{"min":2,"max":4}},
                {"title":"B","description":"e"},
                {"title":"C","description":"f"},
                {"title":"D","description":"g"}
            ]"#,
        );
        write(dir, "data/rpg.json", r#"[{"title":"Mothership","description":"Space horror","tags":["horror","sci-fi"]}]"#);
        // wargames.json is left out on purpose.
        let masters: Vec<String> = (0..7)
            .map(|i| format!(r#"{{"name":"M{i}","image":"m{i}.jpg","systems":["D&D","Fate"]}}"#))
            .collect();
        write(dir, "data/masters.json", &format!("[{}]", masters.join(",")));
        write(dir, "data/gallery.json", r#"[{"image":"g1.jpg"},{"image":"g2.jpg","alt":"Finals"}]"#);
    }

    fn options(seed: u64) -> RenderOptions {
        RenderOptions {
            seed: Some(seed),
            masters_at: 0,
            gallery_at: 0,
        }
    }

    #[tokio::test]
    async fn test_render_page_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        fixture_site(dir.path());
        let config = SiteConfig::default();
        let source = DataSource::new(SiteRoot::Local(dir.path().to_path_buf()));

        let html = render_page(&config, &source, Page::new(DEFAULT_TEMPLATE), &options(1))
            .await
            .unwrap();

        // Three of four board games, one RPG, no wargames.
        assert_eq!(html.matches("class=\"game-row\"").count(), 4);
        assert!(html.contains(r#"<span class="tag">horror</span><span class="tag">sci-fi</span>"#));
        assert!(html.contains(r#"<div id="wargames-list" class="games-list"></div>"#));

        // Masters window of three with arrows, prev disabled.
        assert_eq!(html.matches("class=\"master-card\"").count(), 3);
        assert!(html.contains(">M0<") && html.contains(">M2<") && !html.contains(">M3<"));
        assert!(html.contains("D&amp;D, Fate"));
        assert!(html.contains(r#"<div class="masters-arrows" style="display:flex">"#));
        assert!(html.contains(r#"<button id="masters-prev" class="arrow" disabled>"#));
        assert!(html.contains(r#"<button id="masters-next" class="arrow">"#));

        // Gallery fits in its window: arrows hidden, alt fallback applied.
        assert!(html.contains(r#"<div class="gallery-arrows" style="display:none">"#));
        assert!(html.contains(r#"<img src="g1.jpg" alt="Фото клубу">"#));
        assert!(html.contains(r#"<img src="g2.jpg" alt="Finals">"#));
    }

    #[tokio::test]
    async fn test_render_page_is_reproducible_with_seed() {
        let dir = tempfile::tempdir().unwrap();
        fixture_site(dir.path());
        let config = SiteConfig::default();
        let source = DataSource::new(SiteRoot::Local(dir.path().to_path_buf()));

        let a = render_page(&config, &source, Page::new(DEFAULT_TEMPLATE), &options(9)).await.unwrap();
        let b = render_page(&config, &source, Page::new(DEFAULT_TEMPLATE), &options(9)).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_render_page_at_last_masters_window() {
        let dir = tempfile::tempdir().unwrap();
        fixture_site(dir.path());
        let config = SiteConfig::default();
        let source = DataSource::new(SiteRoot::Local(dir.path().to_path_buf()));
        let opts = RenderOptions {
            seed: Some(2),
            masters_at: 100,
            gallery_at: 0,
        };

        let html = render_page(&config, &source, Page::new(DEFAULT_TEMPLATE), &opts).await.unwrap();
        assert!(html.contains(">M4<") && html.contains(">M6<") && !html.contains(">M3<"));
        assert!(html.contains(r#"<button id="masters-prev" class="arrow">"#));
        assert!(html.contains(r#"<button id="masters-next" class="arrow" disabled>"#));
    }

    #[test]
    fn test_handle_key_pages_focused_window() {
        let mut app = App::new(
            Site::new(&SiteConfig::default()),
            DataSource::new(SiteRoot::Local(PathBuf::from("."))),
        );
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);

        handle_key(&mut app, press(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key(&mut app, press(KeyCode::Right));
        assert!(!app.show_help);

        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.focus, site::WindowId::Gallery);

        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
