//! Terminal 2048 runner (default binary).

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use tui_2048::app::App;
use tui_2048::audio::{AudioSink, BellAudio, NullAudio};
use tui_2048::config::Config;
use tui_2048::core::{GameState, MonotonicClock};
use tui_2048::input::CrosstermInput;
use tui_2048::logging;
use tui_2048::term::{GameView, TerminalRenderer};

fn main() -> Result<()> {
    let config = Config::parse();
    if let Some(path) = logging::init(&config)? {
        info!(path = %path.display(), "logging to file");
    }

    let mut term = TerminalRenderer::new(GameView::default());
    term.enter()?;

    let result = run(&config, &mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(config: &Config, term: &mut TerminalRenderer) -> Result<()> {
    let game = GameState::with_settings(config.game_settings());
    let mut app = App::new(
        game,
        term,
        open_audio(config),
        CrosstermInput::new(),
        MonotonicClock::new(),
    );
    app.run()
}

fn open_audio(config: &Config) -> Box<dyn AudioSink> {
    if config.mute {
        return Box::new(NullAudio);
    }

    #[cfg(feature = "rodio")]
    match tui_2048::audio::RodioAudio::try_new() {
        Ok(audio) => return Box::new(audio),
        Err(err) => warn!(error = %err, "audio device unavailable, using terminal bell"),
    }

    #[cfg(not(feature = "rodio"))]
    warn!("built without the rodio feature, using terminal bell");

    Box::new(BellAudio::new())
}
