//! Thread History terminal front end
//!
//! Drives a thread history panel over the on-disk SQLite store.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use thread_history_core::{
    default_data_dir, ChannelNotifier, NoopAffordance, Notice, NoticeLevel, OpenThreadSlot,
    PanelConfig, PointerEvent, PointerEvents, SqliteSettings, SqliteThreadStore, Storage,
    StoredThread, Viewport,
};
use thread_history_ui::{PanelContext, PanelController, TextRenderer};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "thread-history")]
#[command(version)]
#[command(about = "Browse, resize and prune conversation threads")]
struct Cli {
    /// Window width used to pick sidebar or overlay presentation
    #[arg(long, default_value_t = 1280)]
    window_width: u32,

    /// Print the list view model as JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the thread list
    List,
    /// Create one thread per argument, using it as the first message
    Seed {
        #[arg(value_name = "TEXT", required = true)]
        messages: Vec<String>,
    },
    /// Delete threads; several ids run as one batch
    Delete {
        #[arg(value_name = "THREAD_ID", required = true)]
        ids: Vec<String>,
    },
    /// Drag the panel edge to `x`
    Width {
        #[arg(allow_negative_numbers = true)]
        x: f32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let data_dir = default_data_dir()?;
    info!("Using data directory {:?}", data_dir);
    let storage = Storage::new_with_path(&data_dir)
        .with_context(|| format!("opening thread database in {}", data_dir.display()))?;

    let store = Arc::new(SqliteThreadStore::new(storage.clone()));
    let settings = Arc::new(SqliteSettings::new(storage));
    let config = PanelConfig::load(settings.as_ref());

    let viewport = Viewport::new(config.wide_layout_min_width, cli.window_width);
    let pointer = PointerEvents::new();
    let (notifier, mut notices) = ChannelNotifier::new();

    let mut panel = PanelController::mount(
        config,
        PanelContext {
            store: store.clone(),
            settings,
            open_thread: Arc::new(OpenThreadSlot::new()),
            notifier: Arc::new(notifier),
            affordance: Arc::new(NoopAffordance),
            viewport: viewport.signal(),
            pointer: pointer.clone(),
            width_observer: Some(Arc::new(|width: u32| debug!("Panel width is now {}", width))),
        },
    );
    // The narrow layout only draws while the overlay is open
    panel.set_overlay_open(true);
    panel.refresh().await;

    match cli.command {
        Commands::List => {}
        Commands::Seed { messages } => {
            for text in messages {
                let thread = StoredThread::from_first_message(text);
                println!("created {}", thread.id);
                store.insert(thread).await?;
            }
            panel.refresh().await;
        }
        Commands::Delete { ids } => {
            if let [id] = ids.as_slice() {
                panel.request_delete(id)?;
            } else {
                panel.toggle_selection_mode();
                for id in &ids {
                    panel.click_thread(id);
                }
                panel.request_batch_delete()?;
            }
            let report = panel.confirm_delete().await?;
            println!("{}", report.message());
        }
        Commands::Width { x } => {
            panel.begin_resize();
            pointer.dispatch(PointerEvent::Move { x });
            pointer.dispatch(PointerEvent::Up);
            panel.pump_pointer_events();
            println!("width {}", panel.width());
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&panel.list_view())?);
    } else {
        let mut renderer = TextRenderer::new();
        panel.render(&mut renderer);
        print!("{}", renderer.as_str());
    }
    print_notices(&mut notices);

    Ok(())
}

fn print_notices(notices: &mut UnboundedReceiver<Notice>) {
    while let Ok(notice) = notices.try_recv() {
        match notice.level {
            NoticeLevel::Success => println!("ok: {}", notice.message),
            NoticeLevel::Error => eprintln!("error: {}", notice.message),
        }
    }
}
