use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ConfigLoaded(config) => {
            state.set_config(config);
            Vec::new()
        }
        Msg::ItemsLoaded(items) => {
            state.set_items(items);
            Vec::new()
        }
        Msg::CategorySelected(category) => {
            state.set_category(category);
            Vec::new()
        }
        Msg::ModeSelected(mode) => {
            state.set_mode(mode);
            Vec::new()
        }
        Msg::GenerateClicked => match state.begin_build() {
            Some(items) => vec![Effect::BuildArchive {
                items,
                mode: state.mode().clone(),
            }],
            None => Vec::new(),
        },
        Msg::BuildProgress(progress) => {
            state.apply_progress(progress);
            Vec::new()
        }
        Msg::BuildFinished {
            packaged,
            byte_len,
            failures,
        } => {
            state.finish_build(packaged, byte_len, failures);
            Vec::new()
        }
        Msg::BuildFailed(message) | Msg::SaveFailed(message) => {
            state.fail(message);
            Vec::new()
        }
        Msg::SaveClicked => match state.begin_save() {
            Some(filename) => vec![Effect::SaveArchive { filename }],
            None => Vec::new(),
        },
        Msg::ArchiveSaved { path } => {
            state.finish_save(path);
            Vec::new()
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}
