use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use termsnake::app::App;
use termsnake::config::Config;

/// Classic snake in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Board width in cells, walls included
    #[arg(long, default_value_t = 50)]
    width: i16,

    /// Board height in cells, walls included
    #[arg(long, default_value_t = 20)]
    height: i16,

    /// Extra lethal rings inside the outer wall
    #[arg(long, default_value_t = 0)]
    margin: i16,

    /// Milliseconds per tick at game start
    #[arg(long = "speed", default_value_t = 150)]
    speed_ms: u64,

    /// Fastest tick interval the game ramps to, in milliseconds
    #[arg(long = "floor", default_value_t = 80)]
    floor_ms: u64,

    /// Speed-up per food eaten, in milliseconds
    #[arg(long = "step", default_value_t = 5)]
    step_ms: u64,

    /// Fixed seed for food placement (reproducible games)
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn into_config(self) -> Config {
        Config {
            width: self.width,
            height: self.height,
            margin: self.margin,
            initial_speed: Duration::from_millis(self.speed_ms),
            speed_floor: Duration::from_millis(self.floor_ms),
            speed_decrement: Duration::from_millis(self.step_ms),
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut app = App::new(args.into_config())?;
    app.run()
}
