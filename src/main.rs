use color_eyre::{Result, eyre::WrapErr};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::File;
use std::io::stdout;
use std::path::Path;

use shooter::app::App;
use shooter::consts::{ASSET_DIR, LOG_FILE};
use shooter::terminal;
use shooter::textures::Textures;

fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging()?;

    // Assets load before the terminal is taken over so a failure prints cleanly
    let textures = Textures::load(Path::new(ASSET_DIR))?;

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    info!(
        "keyboard enhancement supported: {}",
        supports_keyboard_enhancement
    );

    let result = run(textures, supports_keyboard_enhancement);
    let restored = terminal::restore(
        &mut stdout(),
        supports_keyboard_enhancement,
        disable_raw_mode,
    );

    result.and(restored)
}

/// Takes over the terminal and plays until quit. The caller restores the
/// terminal whether this succeeds or not.
fn run(textures: Textures, supports_keyboard_enhancement: bool) -> Result<()> {
    enable_raw_mode().wrap_err("couldn't enable raw mode")?;
    let mut stdout = stdout();
    terminal::enter(&mut stdout, supports_keyboard_enhancement)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).wrap_err("couldn't create terminal")?;
    terminal.hide_cursor()?;

    App::new(textures, supports_keyboard_enhancement).run(&mut terminal)
}

/// Logs go to a file since the alternate screen owns stdout.
/// Verbosity follows `RUST_LOG`, defaulting to info.
fn init_logging() -> Result<()> {
    let file = File::create(LOG_FILE).wrap_err_with(|| format!("couldn't create {LOG_FILE}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .write_style(env_logger::WriteStyle::Never)
        .init();
    Ok(())
}
