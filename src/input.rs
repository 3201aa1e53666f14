use crate::error::Error;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io::{self, Stdout, Write};

/// Blocking line input. `Ok(None)` means the player closed the input
/// (end of input, Esc, Ctrl-C or Ctrl-D).
pub trait InputSource
{
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, Error>;
}

struct RawModeGuard;

impl RawModeGuard
{
    fn enter() -> io::Result<Self>
    {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard
{
    fn drop(&mut self)
    {
        let _ = terminal::disable_raw_mode();
    }
}

/// Reads keys in raw mode so Ctrl-C and Esc come back as an interrupted
/// read instead of killing the process.
pub struct TerminalInput
{
    stdout: Stdout,
}

impl TerminalInput
{
    pub fn new() -> Self
    {
        Self {
            stdout: io::stdout(),
        }
    }

    fn echo(&mut self, text: &str) -> io::Result<()>
    {
        self.stdout.write_all(text.as_bytes())?;
        self.stdout.flush()
    }
}

impl Default for TerminalInput
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl InputSource for TerminalInput
{
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, Error>
    {
        self.echo(prompt)?;
        let _raw = RawModeGuard::enter()?;
        let mut buffer = String::new();

        loop {
            let Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) = event::read()?
            else {
                continue;
            };
            if kind == KeyEventKind::Release {
                continue;
            }

            match code {
                KeyCode::Esc => {
                    self.echo("\r\n")?;
                    return Ok(None);
                }
                KeyCode::Char('c') | KeyCode::Char('d')
                    if modifiers.contains(KeyModifiers::CONTROL) =>
                {
                    self.echo("\r\n")?;
                    return Ok(None);
                }
                KeyCode::Enter => {
                    self.echo("\r\n")?;
                    return Ok(Some(buffer));
                }
                KeyCode::Backspace => {
                    if buffer.pop().is_some() {
                        self.echo("\x08 \x08")?;
                    }
                }
                KeyCode::Char(ch) => {
                    buffer.push(ch);
                    let mut encoded = [0u8; 4];
                    self.echo(ch.encode_utf8(&mut encoded))?;
                }
                _ => {}
            }
        }
    }
}
