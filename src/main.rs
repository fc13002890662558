use anyhow::{Context, Result};
use std::io;
use wordle_game::cli::{CliInterface, parse_cli};
use wordle_game::game_state::{GameInterface, Session, game_loop};
use wordle_game::theme::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, ThemeSettings,
    get_preferences_path,
};
use wordle_game::tui::TuiInterface;
use wordle_game::wordbank::{
    EMBEDDED_WORDBANK, FixedWordSupply, RandomWordSupply, TargetWord, WordSupply,
    load_wordbank_from_file, load_wordbank_from_str,
};
use wordle_game::{info_log, logging};

fn build_supply(cli: &wordle_game::cli::Cli) -> Result<Box<dyn WordSupply>> {
    if let Some(word) = &cli.word {
        let target = TargetWord::new(word).with_context(|| format!("Invalid --word '{word}'"))?;
        return Ok(Box::new(FixedWordSupply::new(target)));
    }

    let words = match &cli.wordbank_path {
        Some(path) => load_wordbank_from_file(path)
            .with_context(|| format!("Failed to load word bank from '{path}'"))?,
        None => load_wordbank_from_str(EMBEDDED_WORDBANK),
    };
    info_log!("Loaded {} words", words.len());

    Ok(match cli.seed {
        Some(seed) => Box::new(RandomWordSupply::seeded(words, seed)),
        None => Box::new(RandomWordSupply::new(words)),
    })
}

fn preference_store() -> Box<dyn PreferenceStore> {
    match get_preferences_path() {
        Some(path) => Box::new(FilePreferenceStore::new(path)),
        None => {
            log::warn!("No config directory; theme will not be saved");
            Box::new(MemoryPreferenceStore::new())
        }
    }
}

fn main() -> Result<()> {
    let cli = parse_cli();
    let log_file = match &cli.log_file {
        Some(path) => Some(path.clone()),
        None if !cli.plain => logging::default_log_path(),
        None => None,
    };
    logging::init(log_file.as_deref()).context("Failed to set up logging")?;

    let mut session = Session::new(build_supply(&cli)?);
    let mut settings = ThemeSettings::load(preference_store());

    let mut interface: Box<dyn GameInterface> = if cli.plain {
        Box::new(CliInterface::new(io::stdin().lock()))
    } else {
        Box::new(TuiInterface::new().context("Failed to start the terminal UI")?)
    };

    game_loop(&mut session, &mut settings, interface.as_mut());
    Ok(())
}
