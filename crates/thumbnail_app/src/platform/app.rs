use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use engine_logging::{engine_info, engine_warn};
use log::LevelFilter;
use thumbnail_core::{update, AppState, AppViewModel, Effect, Msg, SessionState};
use thumbnail_engine::{parse_category_config, parse_items};

use super::cli::Cli;
use super::effects::EffectRunner;
use super::persistence::{self, RememberedInputs};
use super::render;
use super::settings;

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    engine_logging::initialize(cli.log.destination(), level);

    let remembered = persistence::load_remembered(&cli.output_dir);
    let config_path = input_path(cli.config.as_ref(), remembered.config_path.as_ref(), "--config")?;
    let games_path = input_path(cli.games.as_ref(), remembered.games_path.as_ref(), "--games")?;
    let category = if cli.all {
        None
    } else {
        cli.category.clone().or_else(|| remembered.category.clone())
    };
    let mode = cli
        .mode
        .clone()
        .or_else(|| remembered.mode.as_deref().and_then(|m| m.parse().ok()))
        .unwrap_or_default();

    let config_text = read_input(&config_path)?;
    let config = parse_category_config(&config_text).with_context(|| {
        format!("could not read the category configuration in {}", config_path.display())
    })?;
    let games_text = read_input(&games_path)?;
    let items = parse_items(&games_text)
        .with_context(|| format!("could not read the games list in {}", games_path.display()))?;
    engine_info!("Loaded {} configured apps and {} games", config.len(), items.len());

    let mut session = Session::default();
    session.dispatch(Msg::ConfigLoaded(config));
    session.dispatch(Msg::ItemsLoaded(items));
    session.dispatch(Msg::CategorySelected(category.clone()));
    session.dispatch(Msg::ModeSelected(mode.clone()));

    let view = session.view();
    if cli.list_categories {
        for line in render::category_lines(&view) {
            println!("{line}");
        }
        return Ok(());
    }

    if let Some(label) = view.selected_category.as_deref() {
        if !session.state.index().contains(label) {
            engine_warn!("Category {:?} does not exist in the configuration", label);
        }
    }
    if !view.generate_enabled {
        bail!(
            "nothing to export: {} contains no games",
            view.selected_category.as_deref().unwrap_or("the games list")
        );
    }

    let settings = settings::load_settings(&cli.output_dir);
    let runner = EffectRunner::new(settings.engine_config(&cli.output_dir))
        .context("could not start the download engine")?;

    let effects = session.dispatch(Msg::GenerateClicked);
    session.run_until_idle(&runner, effects)?;
    let view = session.view();
    if let Some(error) = view.last_error.as_deref() {
        bail!("building the archive failed: {error}");
    }
    for line in render::failure_lines(&view) {
        println!("{line}");
    }
    if let Some(line) = render::summary_line(&view) {
        println!("{line}");
    }

    let effects = session.dispatch(Msg::SaveClicked);
    session.run_until_idle(&runner, effects)?;
    let view = session.view();
    if let Some(error) = view.last_error.as_deref() {
        bail!("saving the archive failed: {error}");
    }
    if let Some(path) = view.saved_path.as_deref() {
        println!("Saved {path}");
    }

    persistence::save_remembered(
        &cli.output_dir,
        &RememberedInputs {
            config_path: Some(config_path),
            games_path: Some(games_path),
            category,
            mode: Some(mode.to_string()),
        },
    );
    Ok(())
}

fn input_path(
    given: Option<&PathBuf>,
    remembered: Option<&PathBuf>,
    flag: &str,
) -> anyhow::Result<PathBuf> {
    given
        .or(remembered)
        .cloned()
        .with_context(|| format!("{flag} is required (no previous run to reuse)"))
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))
}

/// Owns the core state and applies messages to it.
#[derive(Default)]
struct Session {
    state: AppState,
    last_progress: Option<String>,
}

impl Session {
    fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        if self.state.consume_dirty() {
            self.render_progress();
        }
        effects
    }

    fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Feed engine messages back until the build or save started by `effects` settles.
    fn run_until_idle(&mut self, runner: &EffectRunner, effects: Vec<Effect>) -> anyhow::Result<()> {
        if effects.is_empty() {
            return Ok(());
        }
        runner.enqueue(effects);
        while self.state.session() != SessionState::Idle {
            let msg = runner
                .next_msg()
                .context("the download engine stopped unexpectedly")?;
            let effects = self.dispatch(msg);
            runner.enqueue(effects);
        }
        if self.last_progress.take().is_some() {
            eprintln!();
        }
        Ok(())
    }

    fn render_progress(&mut self) {
        if self.state.session() != SessionState::Building {
            return;
        }
        let line = render::progress_line(self.state.view().progress);
        if self.last_progress.as_deref() != Some(line.as_str()) {
            eprint!("\r{line}");
            let _ = std::io::stderr().flush();
            self.last_progress = Some(line);
        }
    }
}
