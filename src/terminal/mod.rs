use anyhow::Result;
use colored::*;

pub struct Terminal {
    colors_enabled: bool,
}

impl Terminal {
    pub fn new(colors_enabled: bool) -> Result<Self> {
        Ok(Self { colors_enabled })
    }

    pub async fn print_info(&self, message: &str) -> Result<()> {
        if self.colors_enabled {
            eprintln!("{}", message.bright_blue());
        } else {
            eprintln!("{}", message);
        }
        Ok(())
    }

    pub async fn print_error(&self, message: &str) -> Result<()> {
        if self.colors_enabled {
            eprintln!("{}", message.bright_red());
        } else {
            eprintln!("{}", message);
        }
        Ok(())
    }

    pub fn colorize_prompt(&self, prompt: &str) -> String {
        if self.colors_enabled {
            prompt.bright_magenta().bold().to_string()
        } else {
            prompt.to_string()
        }
    }
}
