//! Entry point for the **winsnap** daemon.
//!
//! Spawns the command sources and the foreground poller on background
//! threads and runs every placement on the main thread, one command at a
//! time.
//!
//! ```text
//! winsnap [--config <path>] [--list-operations]
//! ```

use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::mpsc;
use winsnap::backend::virtual_desktop::VirtualDesktop;
use winsnap::command::Command;
use winsnap::config::Config;
use winsnap::ipc::listener::UnixSocketListener;
use winsnap::placer::{Outcome, Placer, PlacementError};
use winsnap::poller::{ForegroundPoller, LastActiveWindow};
use winsnap::registry::OPERATIONS;
use winsnap::traits::{CommandSource, WindowSystem};

/// Value following `flag` on the command line.
fn arg_value(flag: &str) -> Option<String> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == flag {
            return args.next();
        }
    }
    None
}

/// Load the config from `--config` or the XDG default, falling back to
/// compiled-in defaults.
fn load_config() -> Config {
    let Some(path) = arg_value("--config")
        .map(PathBuf::from)
        .or_else(Config::default_path)
    else {
        info!("no config location, using defaults");
        return Config::default();
    };
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

fn list_operations() {
    for op in OPERATIONS {
        println!("{:<20} {:<24} variants: {}", op.name, op.display_name, op.arity());
    }
}

//  Main

fn main() {
    env_logger::init();

    if std::env::args().any(|a| a == "--list-operations") {
        list_operations();
        return;
    }

    let config = load_config();
    let desktop = match VirtualDesktop::from_config(&config.desktop) {
        Ok(d) => d,
        Err(e) => {
            error!("failed to build desktop: {}", e);
            std::process::exit(1);
        }
    };
    match desktop.enumerate_monitors() {
        Ok(m) => info!("found {} monitor(s)", m.len()),
        Err(e) => warn!("failed to query monitors: {}", e),
    }

    let mut placer = Placer::with_config(desktop.clone(), &config.placement);

    let last_active = LastActiveWindow::new();
    placer.set_last_active(last_active.clone());
    let poller = {
        let ws = desktop.clone();
        let classifier = placer.classifier().clone();
        ForegroundPoller::spawn(config.placement.poll_interval(), last_active, move || {
            let fg = ws.foreground_window().ok()?;
            classifier.is_zonable(&ws, fg).then_some(fg)
        })
    };

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    spawn_command_sources(cmd_tx);

    run(&mut placer, cmd_rx);
    poller.stop();
}

fn run<W: WindowSystem>(placer: &mut Placer<W>, cmd_rx: mpsc::Receiver<Command>) {
    info!("winsnap running");
    for cmd in cmd_rx {
        match placer.handle(cmd) {
            Ok(Outcome::Applied(rect)) => info!("{}: moved to {}", cmd, rect),
            Ok(Outcome::NoOp) => info!("{}: already in place", cmd),
            Ok(Outcome::Maximized) => info!("{}: maximized", cmd),
            Ok(Outcome::Topmost(on)) => info!("{}: always on top {}", cmd, on),
            Err(e @ PlacementError::NotZonable(_)) => warn!("{}: {}", cmd, e),
            Err(e) => error!("{}: {}", cmd, e),
        }
    }
    info!("all command sources closed, exiting");
}

//  Helpers

fn spawn_command_sources(tx: mpsc::Sender<Command>) {
    let path = UnixSocketListener::default_path();
    std::thread::spawn(move || {
        let mut source = UnixSocketListener::new(&path);
        if let Err(e) = source.run(tx) {
            error!("socket listener error: {}", e);
        }
    });
}
