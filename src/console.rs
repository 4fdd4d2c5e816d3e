//! Terminal output capability.
//!
//! The controller and the table printer only write through [`Console`], so
//! the paging policy can be exercised without a real terminal.

use std::io::{self, IsTerminal, Write};
use std::process::{Command, Stdio};
use tracing::debug;

const DEFAULT_PAGER: &str = "less";

pub trait Console {
    /// Write one block of text followed by a newline.
    fn echo(&mut self, text: &str) -> io::Result<()>;

    /// Show text through an interactive pager.
    fn echo_via_pager(&mut self, text: &str) -> io::Result<()>;

    /// Number of rows visible in the terminal, if output goes to one.
    fn height(&self) -> Option<usize>;
}

/// Console bound to the process standard output.
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        Self
    }

    fn pager_command() -> Option<Command> {
        let pager = std::env::var("PAGER").unwrap_or_else(|_| DEFAULT_PAGER.to_string());
        let mut parts = pager.split_whitespace();
        let program = parts.next()?;
        let mut command = Command::new(program);
        command.args(parts);
        if std::env::var_os("LESS").is_none() {
            command.env("LESS", "FRX");
        }
        Some(command)
    }
}

impl Console for StdConsole {
    fn echo(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", text)?;
        stdout.flush()
    }

    fn echo_via_pager(&mut self, text: &str) -> io::Result<()> {
        let spawned = Self::pager_command().map(|mut command| command.stdin(Stdio::piped()).spawn());

        let mut child = match spawned {
            Some(Ok(child)) => child,
            Some(Err(e)) => {
                debug!("Failed to start pager ({}), writing directly", e);
                return self.echo(text);
            }
            None => return self.echo(text),
        };

        if let Some(mut stdin) = child.stdin.take() {
            // The pager may quit before reading everything.
            match writeln!(stdin, "{}", text) {
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
                other => other?,
            }
        }
        child.wait()?;
        Ok(())
    }

    fn height(&self) -> Option<usize> {
        if !io::stdout().is_terminal() {
            return None;
        }
        crossterm::terminal::size()
            .ok()
            .map(|(_columns, rows)| rows as usize)
    }
}

/// Console that keeps everything in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryConsole {
    height: Option<usize>,
    output: Vec<String>,
    paged: usize,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend to be a terminal with `height` rows.
    pub fn with_height(height: usize) -> Self {
        Self {
            height: Some(height),
            ..Self::default()
        }
    }

    /// Every block written so far, in order.
    pub fn lines(&self) -> &[String] {
        &self.output
    }

    pub fn output(&self) -> String {
        self.output.join("\n")
    }

    /// How many blocks went through the pager.
    pub fn paged(&self) -> usize {
        self.paged
    }
}

impl Console for MemoryConsole {
    fn echo(&mut self, text: &str) -> io::Result<()> {
        self.output.push(text.to_string());
        Ok(())
    }

    fn echo_via_pager(&mut self, text: &str) -> io::Result<()> {
        self.paged += 1;
        self.output.push(text.to_string());
        Ok(())
    }

    fn height(&self) -> Option<usize> {
        self.height
    }
}
