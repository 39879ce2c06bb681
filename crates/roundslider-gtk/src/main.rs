use clap::Parser;
use relm4::prelude::*;
use roundslider::InteractionMode;
use roundslider_gtk::config;
use roundslider_gtk::gui::app::{AppInit, AppModel};
use roundslider_gtk::sys::runtime;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Hosts a round slider in a GTK window", long_about = None)]
struct Args {
    /// Slider options file (TOML). Defaults to the user config directory.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the interaction mode from the config ("surface" or "handle")
    #[arg(short, long)]
    mode: Option<InteractionMode>,

    /// Writes the default config file if none exists, prints its path and exits
    #[arg(long)]
    write_default: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => config::get_config_path()?,
    };

    if args.write_default {
        let path = config::write_default_config(&config_path)?;
        println!("{}", path.display());
        return Ok(());
    }

    let options = config::load_options(&config_path, args.mode)?;
    log::info!("Loaded slider options from {}", config_path.display());

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx, config_path.clone());

    let app = RelmApp::new("org.roundslider.demo").with_args(Vec::new());

    app.run::<AppModel>(AppInit {
        options,
        config_path,
        mode_override: args.mode,
        rx,
    });
    Ok(())
}
