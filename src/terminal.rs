use color_eyre::{Result, eyre::WrapErr};
use crossterm::{
    cursor::Show,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Switches `out` to the alternate screen and, when the terminal supports it,
/// asks for key release reporting. Raw mode is left to the caller.
pub fn enter<W: Write>(out: &mut W, keyboard_enhancement: bool) -> Result<()> {
    execute!(out, EnterAlternateScreen).wrap_err("couldn't enter alternate screen")?;

    // Enable keyboard enhancement AFTER entering alternate screen
    if keyboard_enhancement {
        execute!(
            out,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )
        .wrap_err("couldn't push keyboard enhancement flags")?;
    }

    Ok(())
}

/// Undoes [`enter`] and raw mode. Every step is attempted even when an
/// earlier one fails; the first failure is returned.
pub fn restore<W: Write>(
    out: &mut W,
    keyboard_enhancement: bool,
    disable_raw_mode: impl FnOnce() -> io::Result<()>,
) -> Result<()> {
    let flags = if keyboard_enhancement {
        execute!(out, PopKeyboardEnhancementFlags)
    } else {
        Ok(())
    };
    let raw = disable_raw_mode();
    let screen = execute!(out, LeaveAlternateScreen);
    let cursor = execute!(out, Show);

    flags
        .wrap_err("couldn't pop keyboard enhancement flags")
        .and(raw.wrap_err("couldn't disable raw mode"))
        .and(screen.wrap_err("couldn't leave alternate screen"))
        .and(cursor.wrap_err("couldn't show cursor"))
}
