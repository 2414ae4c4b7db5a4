// Halfkey CLI
// Grabs the keyboard, remaps every key event and injects the result through uinput

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::LevelFilter;

use halfkey_core::config::Config;
use halfkey_core::event::{EventLoop, EventLoopError};
use halfkey_core::output::{VirtualDevice, VIRTUAL_DEVICE_NAME};
use halfkey_core::{run_self_test, Action, DeviceFilter, Dispatcher, HalfKeyboard};

/// Half-keyboard driver: hold space to type the other half of the keyboard
#[derive(Parser, Debug)]
#[command(name = "halfkey")]
#[command(version)]
#[command(about = "Half-keyboard driver for Linux evdev keyboards", long_about = None)]
struct Args {
    /// TOML configuration file (default: ~/.config/halfkey/config.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Manually specify devices to remap (can be used multiple times)
    #[arg(short, long, value_name = "DEVICE")]
    devices: Vec<String>,

    /// Mirror mode: all keys reversed
    #[arg(short, long)]
    mirror_mode: bool,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// List available keyboard devices
    #[arg(long)]
    list_devices: bool,

    /// Validate config and exit
    #[arg(long)]
    check_config: bool,

    /// Replay the built-in key sequences and exit
    #[arg(long)]
    self_test: bool,
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Merge command line overrides into the file configuration.
///
/// CLI --devices > config [devices].only > autodetect.
fn resolve_config(mut config: Config, args: &Args) -> Config {
    if !args.devices.is_empty() {
        config.device_filter = args.devices.clone();
    }
    config.mirror_mode |= args.mirror_mode;
    config
}

fn load_config(args: &Args) -> Result<Config> {
    let config = match &args.config {
        Some(path) => Config::from_toml_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load_default().context("loading default config")?,
    };
    Ok(resolve_config(config, args))
}

/// Main application state
struct Application {
    config: Config,
    /// Cleared by the signal thread to stop the event loop
    running: Arc<AtomicBool>,
}

impl Application {
    fn new(config: Config) -> Self {
        Self {
            config,
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    fn check_config(&self) {
        println!("Configuration is valid");
        println!("  mirror_mode = {}", self.config.mirror_mode);
        println!("  devices = {:?}", self.config.device_filter);
        println!("  poll_timeout_ms = {}", self.config.poll_timeout_ms);
        if let Some(key) = self.config.emergency_eject_key {
            println!("  emergency_eject_key = {}", key);
        }
        println!("  priority = {}", self.config.priority);
    }

    fn list_devices() -> Result<()> {
        let devices = EventLoop::list_devices()?;
        println!("Found {} keyboard device(s):", devices.len());
        for device in &devices {
            match &device.path {
                Some(path) => println!("  {}: {} ({})", device.index, device.name, path),
                None => println!("  {}: {}", device.index, device.name),
            }
        }
        Ok(())
    }

    fn self_test() -> Result<()> {
        let mismatches = run_self_test();
        for mismatch in &mismatches {
            eprintln!("{}", mismatch);
        }
        if !mismatches.is_empty() {
            bail!("self test failed with {} error(s)", mismatches.len());
        }
        println!("Self test passed");
        Ok(())
    }

    /// Ask for a scheduling priority; failure (usually missing privileges)
    /// is reported but not fatal
    fn set_priority(priority: i32) {
        let ret = unsafe { libc::setpriority(libc::PRIO_PROCESS, 0, priority) };
        if ret != 0 {
            log::error!(
                "setpriority({}) failed: {}",
                priority,
                std::io::Error::last_os_error()
            );
        }
        let current = unsafe { libc::getpriority(libc::PRIO_PROCESS, 0) };
        log::info!("Process priority set at {}", current);
    }

    fn install_signal_handlers(&self) -> Result<()> {
        use signal_hook::consts::{SIGINT, SIGQUIT, SIGTERM};
        use signal_hook::iterator::Signals;

        let mut signals =
            Signals::new([SIGINT, SIGTERM, SIGQUIT]).context("installing signal handlers")?;
        let running = self.running.clone();

        std::thread::spawn(move || {
            if let Some(signal) = signals.forever().next() {
                log::warn!("Received signal {}, shutting down", signal);
                running.store(false, Ordering::SeqCst);
            }
        });
        Ok(())
    }

    fn run(&self) -> Result<()> {
        Self::set_priority(self.config.priority);

        self.install_signal_handlers()?;

        let filter = DeviceFilter::new(self.config.device_filter.clone());
        let mut event_loop = EventLoop::new_with_grab(&filter).context("grabbing keyboards")?;
        log::info!("Remapping {:?}", event_loop.device_names());

        let output = VirtualDevice::new(VIRTUAL_DEVICE_NAME).context("creating uinput device")?;
        let remapper = HalfKeyboard::new().with_mirror_mode(self.config.mirror_mode);
        let mut dispatcher = Dispatcher::new(remapper, output);

        let result = self.run_main_loop(&mut event_loop, &mut dispatcher);

        // Nothing may stay held once the devices are handed back
        if let Err(e) = dispatcher.release_all() {
            log::error!("Failed to release held keys: {}", e);
        }
        event_loop.ungrab_all();

        result
    }

    fn run_main_loop(
        &self,
        event_loop: &mut EventLoop,
        dispatcher: &mut Dispatcher<VirtualDevice>,
    ) -> Result<()> {
        let timeout_ms = self.config.poll_timeout_ms as i32;
        println!("halfkey is running. Press Ctrl+C to exit.");

        while self.running.load(Ordering::SeqCst) {
            let events = match event_loop.poll_for_events(timeout_ms) {
                Ok(events) => events,
                Err(EventLoopError::Evdev(msg)) => {
                    bail!("lost input device: {}", msg);
                }
                Err(e) => return Err(e.into()),
            };

            for event in events {
                if Some(event.key) == self.config.emergency_eject_key
                    && event.action == Action::Press
                {
                    log::warn!("Emergency eject key pressed. Stopping halfkey.");
                    self.running.store(false, Ordering::SeqCst);
                    break;
                }

                log::trace!("{} from {}", event.key, event.device_name);
                if let Err(e) = dispatcher.dispatch(event.key, event.action, event.timestamp) {
                    log::error!("Error sending output: {}", e);
                }
            }
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(log_level(args.verbose))
        .parse_default_env()
        .init();

    log::info!("-- HalfKey driver {} --", env!("CARGO_PKG_VERSION"));

    if args.list_devices {
        return Application::list_devices();
    }

    if args.self_test {
        return Application::self_test();
    }

    let app = Application::new(load_config(&args)?);

    if args.check_config {
        app.check_config();
        return Ok(());
    }

    let result = app.run();
    log::info!("-- Terminating --");
    result
}
