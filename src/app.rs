//! Wires the command line, config and collaborators to the sharing engine.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use thiserror::Error;
use tracing::{debug, info};

use crate::cli::{Cli, Command, STDIO_BUFFER};
use crate::clipboard::{Clipboard, FileClipboard, StdioClipboard};
use crate::config::{AppConfig, ConfigError, save_config};
use crate::console::{ConsoleNotifier, TerminalPrompt, describe};
use crate::markers::{MarkerRecord, RegionId, WorldPoint};
use crate::sharing::{AlwaysConfirm, ConfirmPrompt, Outcome, SharingEngine, Step};
use crate::store::{ConfigMarkerStore, StoreError};

type Engine = SharingEngine<ConfigMarkerStore, Box<dyn Clipboard>, ConsoleNotifier>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot ask for confirmation while reading markers from stdin; pass --yes")]
    PromptNeedsTerminal,
}

/// Run one command to completion.
pub fn run(cli: Cli, config: &mut AppConfig) -> Result<ExitCode, AppError> {
    let regions = if cli.regions.is_empty() {
        config.data.active_regions.clone()
    } else {
        cli.regions.clone()
    };
    let confirm = config.data.confirm && !cli.yes;
    debug!("Active regions: {:?}", regions);

    let outcome = match cli.command {
        Command::Regions { regions: ref new } => {
            update_regions(config, new.clone())?;
            return Ok(ExitCode::SUCCESS);
        }
        Command::List { all } => {
            let engine = open_engine(&cli, config)?;
            list(&engine, all, &regions)?;
            return Ok(ExitCode::SUCCESS);
        }
        Command::Export => open_engine(&cli, config)?.export(&regions),
        Command::Import { dry_run: true } => preview_import(&mut open_engine(&cli, config)?),
        Command::Import { dry_run: false } => {
            if confirm && buffer_is_stdio(&cli, config) {
                return Err(AppError::PromptNeedsTerminal);
            }
            open_engine(&cli, config)?.import(prompt(confirm).as_mut())
        }
        Command::Clear { dry_run: true } => {
            preview_clear(&mut open_engine(&cli, config)?, &regions)
        }
        Command::Clear { dry_run: false } => {
            open_engine(&cli, config)?.clear(&regions, prompt(confirm).as_mut())
        }
        Command::Mark {
            x,
            y,
            plane,
            color,
            ref label,
            ref waves,
            ref roles,
        } => {
            let mut record = MarkerRecord::from_world_point(WorldPoint::new(x, y, plane));
            if let Some(color) = color {
                record = record.with_color(color);
            }
            if let Some(label) = label {
                record = record.with_label(label.as_str());
            }
            if !waves.is_empty() {
                record = record.with_waves(waves.clone());
            }
            if !roles.is_empty() {
                record = record.with_roles(roles.clone());
            }
            open_engine(&cli, config)?.mark(record)
        }
    };

    Ok(if outcome.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn buffer_path(cli: &Cli, config: &AppConfig) -> PathBuf {
    cli.buffer.clone().unwrap_or_else(|| config.buffer_path())
}

fn buffer_is_stdio(cli: &Cli, config: &AppConfig) -> bool {
    buffer_path(cli, config) == Path::new(STDIO_BUFFER)
}

fn open_engine(cli: &Cli, config: &AppConfig) -> Result<Engine, AppError> {
    let store_path = cli.store.clone().unwrap_or_else(|| config.store_path());
    let store = ConfigMarkerStore::open(store_path)?;

    let clipboard: Box<dyn Clipboard> = if buffer_is_stdio(cli, config) {
        Box::new(StdioClipboard)
    } else {
        let clipboard = FileClipboard::new(buffer_path(cli, config));
        debug!("Using text buffer {:?}", clipboard.path());
        Box::new(clipboard)
    };

    Ok(SharingEngine::new(store, clipboard, ConsoleNotifier))
}

fn prompt(confirm: bool) -> Box<dyn ConfirmPrompt> {
    if confirm {
        Box::new(TerminalPrompt)
    } else {
        Box::new(AlwaysConfirm)
    }
}

fn update_regions(config: &mut AppConfig, regions: Vec<RegionId>) -> Result<(), AppError> {
    if regions.is_empty() {
        println!("{}", format_regions(&config.data.active_regions));
        return Ok(());
    }

    config.set_active_regions(regions);
    save_config(config)?;
    info!("Default active regions set to {:?}", config.data.active_regions);
    println!("{}", format_regions(&config.data.active_regions));
    Ok(())
}

fn format_regions(regions: &[RegionId]) -> String {
    if regions.is_empty() {
        return "No default active regions.".to_string();
    }
    regions
        .iter()
        .map(RegionId::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn list(engine: &Engine, all: bool, regions: &[RegionId]) -> Result<(), AppError> {
    let regions = if all {
        engine.store().regions()
    } else {
        regions.to_vec()
    };

    let records = engine.collect_records(&regions)?;
    debug!("Listing {} markers from {:?}", records.len(), engine.store().path());
    for record in &records {
        println!("{}", describe(record));
    }
    Ok(())
}

fn preview_import(engine: &mut Engine) -> Outcome {
    match engine.prepare_import() {
        Step::Done(outcome) => outcome,
        Step::Confirm(pending) => {
            for record in pending.candidates() {
                println!("{}", describe(record));
            }
            engine.decline(pending)
        }
    }
}

fn preview_clear(engine: &mut Engine, regions: &[RegionId]) -> Outcome {
    match engine.prepare_clear(regions) {
        Step::Done(outcome) => outcome,
        Step::Confirm(pending) => {
            println!("{} markers would be cleared.", pending.count());
            if !pending.unreadable().is_empty() {
                println!(
                    "Unreadable markers in regions {:?} would be cleared.",
                    pending.unreadable()
                );
            }
            engine.decline(pending)
        }
    }
}
