//! `ignition caps [--api-level <n>] [--json]`

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use ignition_platform::capabilities::Capabilities;

/// Show platform capability flags for an API level.
#[derive(Args, Debug)]
pub struct CapsArgs {
    /// Platform API level to inspect.
    #[arg(long, default_value_t = 34)]
    pub api_level: u32,

    /// Emit capability flags as JSON.
    #[arg(long)]
    pub json: bool,
}

impl CapsArgs {
    pub fn run(self) -> Result<()> {
        let caps = Capabilities::from_api_level(self.api_level);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&caps)?);
            return Ok(());
        }

        println!("API level {}", caps.api_level);
        println!("  notification channels  {}", flag(caps.supports_channels));
        println!("  themed splash screen   {}", flag(caps.supports_themed_splash));
        Ok(())
    }
}

fn flag(supported: bool) -> String {
    if supported {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}
