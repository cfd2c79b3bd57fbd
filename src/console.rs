//! Console collaborator for framestep
//!
//! Line-buffered text output plus the blocking integer read behind the
//! jump-to-frame prompt. The status line is overwritten in place with a
//! carriage return, the way progress readouts usually are; messages that
//! interleave with it first terminate the pending line.

use crate::utils::error::{PlayerError, Result};
use std::io::{BufRead, Write};

/// Console trait for status output and prompts
pub trait Console {
    /// Overwrite the single status line in place (no newline)
    fn status(&mut self, line: &str) -> Result<()>;

    /// Print a newline-terminated message
    fn message(&mut self, text: &str) -> Result<()>;

    /// Print a prompt and block for one line of input
    fn read_line(&mut self, prompt: &str) -> Result<String>;
}

/// Console implementation over stdin/stdout
pub struct StdConsole {
    /// A status line has been written and not yet terminated
    status_pending: bool,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            status_pending: false,
        }
    }

    fn finish_status(&mut self) -> Result<()> {
        if self.status_pending {
            println!();
            self.status_pending = false;
        }
        Ok(())
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn status(&mut self, line: &str) -> Result<()> {
        print!("\r{}", line);
        std::io::stdout().flush()?;
        self.status_pending = true;
        Ok(())
    }

    fn message(&mut self, text: &str) -> Result<()> {
        self.finish_status()?;
        println!("{}", text);
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.finish_status()?;
        print!("{}", prompt);
        std::io::stdout().flush()?;

        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

/// Parse a 1-based frame entry from the jump prompt into a 0-based
/// position
///
/// # Arguments
///
/// * `input` - Raw console entry
/// * `frame_count` - Total frames in the loaded stream
pub fn parse_frame_entry(input: &str, frame_count: u64) -> Result<u64> {
    let value: u64 = input
        .trim()
        .parse()
        .map_err(|_| PlayerError::InvalidInput(format!("not a frame number: {:?}", input)))?;

    if value < 1 || value > frame_count {
        return Err(PlayerError::InvalidInput(format!(
            "frame {} outside 1-{}",
            value, frame_count
        )));
    }

    Ok(value - 1)
}
