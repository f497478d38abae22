use env_logger::{Builder, Target};
use log::LevelFilter;
use medianotes::{CONFIG_DIRECTORY, LOG_FILENAME, app_core::MediaNotes, collect_notes};
use std::fs::{self, File};

// The terminal belongs to the UI, so logs go to a file
fn init_logger() -> anyhow::Result<()> {
    let dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Config folder not present on system!"))?
        .join(CONFIG_DIRECTORY);
    fs::create_dir_all(&dir)?;
    let file = File::create(dir.join(LOG_FILENAME))?;

    let mut builder = Builder::new();
    builder
        .target(Target::Pipe(Box::new(file)))
        .filter_level(LevelFilter::Warn)
        .filter_module("medianotes", LevelFilter::Info);

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    }
    builder.init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logger()?;

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if args.is_empty() {
        eprintln!("usage: medianotes <note.md | folder>...");
        std::process::exit(2);
    }

    let notes = collect_notes(&args)?;
    MediaNotes::new(&notes)?.run()?;
    Ok(())
}
