//! Photo Diary - Entry Point
//!
//! | Command | Description |
//! |---------|-------------|
//! | `pdiary status` | Current plan, usage and capabilities |
//! | `pdiary plans` | Plan catalogue |
//! | `pdiary generate` | Consume one AI generation |
//! | `pdiary reset` | Reset the monthly usage counter |
//! | `pdiary photo <date>` | Whether a photo from `date` is usable |
//! | `pdiary purchase <plan>` | Buy a plan through the purchase backend |
//! | `pdiary restore` | Restore the last purchase |

// Force-link pdiary-providers to ensure linkme registrations are included
extern crate pdiary_providers;

use clap::Parser;
use pdiary::cli::{Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
