use clap::{ArgAction, Parser, Subcommand, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::display::types::{PixelDepth, ScalerWindow, Screen};

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level app configuration, as read from YAML.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub log_level: Option<String>,       // e.g., "info" | "debug"
    pub screen: Option<Screen>,          // 0 | 1
    pub buffer_count: Option<u32>,       // buffers assumed per framebuffer, 1 | 2
    pub use_scaler: Option<bool>,        // scaler for large 32bpp modes
    pub check_capacity: Option<bool>,
    pub allow_legacy_driver: Option<bool>,
    pub devices: Option<DeviceConfig>,
    pub console: Option<ConsoleConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DeviceConfig {
    pub disp: Option<PathBuf>,  // e.g. "/dev/disp"
    pub fb0: Option<PathBuf>,
    pub fb1: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConsoleConfig {
    pub program: Option<PathBuf>, // fbset binary
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub screen: Screen,
    pub buffer_count: u32,
    pub use_scaler: bool,
    pub check_capacity: bool,
    pub allow_legacy_driver: bool,
    pub disp_device: PathBuf,
    pub fb_devices: [PathBuf; 2],
    pub console_program: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen: Screen::Zero,
            buffer_count: 2,
            use_scaler: true,
            check_capacity: true,
            allow_legacy_driver: false,
            disp_device: PathBuf::from("/dev/disp"),
            fb_devices: [PathBuf::from("/dev/fb0"), PathBuf::from("/dev/fb1")],
            console_program: PathBuf::from("fbset"),
        }
    }
}

impl Settings {
    pub fn fb_device(&self, screen: Screen) -> &Path {
        &self.fb_devices[screen.index() as usize]
    }
}

impl Config {
    /// Collapse the optional layers onto the built-in defaults.
    pub fn settings(&self) -> Settings {
        let d = Settings::default();
        let devices = self.devices.clone().unwrap_or_default();
        Settings {
            screen: self.screen.unwrap_or(d.screen),
            buffer_count: self.buffer_count.unwrap_or(d.buffer_count),
            use_scaler: self.use_scaler.unwrap_or(d.use_scaler),
            check_capacity: self.check_capacity.unwrap_or(d.check_capacity),
            allow_legacy_driver: self.allow_legacy_driver.unwrap_or(d.allow_legacy_driver),
            disp_device: devices.disp.unwrap_or(d.disp_device),
            fb_devices: [
                devices.fb0.unwrap_or_else(|| d.fb_devices[0].clone()),
                devices.fb1.unwrap_or_else(|| d.fb_devices[1].clone()),
            ],
            console_program: self
                .console
                .as_ref()
                .and_then(|c| c.program.clone())
                .unwrap_or(d.console_program),
        }
    }
}

/// CLI. Option fields layer over YAML; the subcommand selects the transition.
#[derive(Debug, Parser, Clone)]
#[command(name = "dispswitch", about = "Change the display output and mode of sunxi devices", version)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, short = 'c', value_hint = ValueHint::FilePath, global = true)]
    pub config: Option<PathBuf>,
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    /// Shorthand for --log-level debug
    #[arg(long, short = 'v', action = ArgAction::SetTrue, global = true)]
    pub debug: bool,
    /// Screen to operate on (0 or 1)
    #[arg(long, short = 's', global = true)]
    pub screen: Option<Screen>,
    /// Buffers per framebuffer assumed by the capacity check (1 or 2)
    #[arg(long, short = 'b', global = true)]
    pub buffers: Option<u32>,
    /// Never engage the scaler for large 32bpp modes
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    pub no_scaler: bool,
    /// Skip the framebuffer capacity check
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    pub no_capacity_check: bool,
    /// Proceed on display drivers older than 1.0
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    pub force_legacy: bool,
    #[arg(long, value_hint = ValueHint::FilePath, global = true)]
    pub disp_device: Option<PathBuf>,
    #[arg(long, value_hint = ValueHint::FilePath, global = true)]
    pub fb0: Option<PathBuf>,
    #[arg(long, value_hint = ValueHint::FilePath, global = true)]
    pub fb1: Option<PathBuf>,
    /// Console framebuffer tool
    #[arg(long, value_hint = ValueHint::ExecutablePath, global = true)]
    pub fbset: Option<PathBuf>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    pub dump_config: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Arguments shared by the HDMI mode commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::Args)]
pub struct ModeArgs {
    /// HDMI/TV mode number (see `modes`)
    pub mode: u32,
    /// Pixel depth in bits (16, 24 or 32); unchanged when omitted
    pub depth: Option<PixelDepth>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show information about the current mode of both screens
    #[command(name = "info")]
    Info,
    /// List HDMI/TV mode numbers
    #[command(name = "modes")]
    Modes,
    /// Switch output from LCD to HDMI
    #[command(name = "switchtohdmi")]
    SwitchToHdmi(ModeArgs),
    /// Switch to HDMI even if the driver reports the mode unsupported
    #[command(name = "switchtohdmiforce")]
    SwitchToHdmiForce(ModeArgs),
    /// Switch output from HDMI to LCD (sets 32bpp)
    #[command(name = "switchtolcd")]
    SwitchToLcd,
    /// Change the HDMI mode, optionally with a new pixel depth
    #[command(name = "changehdmimode")]
    ChangeHdmiMode(ModeArgs),
    /// Change the HDMI mode even if the driver reports it unsupported
    #[command(name = "changehdmimodeforce")]
    ChangeHdmiModeForce(ModeArgs),
    /// Change the pixel depth of the current HDMI mode
    #[command(name = "changepixeldepth")]
    ChangePixelDepth {
        depth: PixelDepth,
    },
    /// Turn off whichever output is active
    #[command(name = "displayoff")]
    DisplayOff,
    /// Turn the LCD on when no output is active
    #[command(name = "lcdon")]
    LcdOn,
    /// Turn HDMI on when no output is active
    #[command(name = "enablehdmi")]
    EnableHdmi(ModeArgs),
    /// Turn HDMI on even if the driver reports the mode unsupported
    #[command(name = "enablehdmiforce")]
    EnableHdmiForce(ModeArgs),
    /// Scale a source window onto a destination window
    #[command(name = "rescale")]
    Rescale {
        src_width: u32,
        src_height: u32,
        dst_width: u32,
        dst_height: u32,
    },
    /// Put the layer back into normal (unscaled) mode
    #[command(name = "disablescaler")]
    DisableScaler,
}

impl Command {
    /// Whether the command talks to the hardware at all
    pub fn needs_hardware(&self) -> bool {
        !matches!(self, Command::Modes)
    }

    pub fn rescale_window(&self) -> Option<ScalerWindow> {
        match *self {
            Command::Rescale { src_width, src_height, dst_width, dst_height } => Some(ScalerWindow {
                src_width,
                src_height,
                dst_width,
                dst_height,
            }),
            _ => None,
        }
    }
}

/// Public entry point: read YAML, merge CLI overrides, validate.
pub fn load(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;

    Ok(cfg)
}

/// Pretty YAML of the effective config (nice for debugging)
pub fn dump(cfg: &Config) -> Result<String, ConfigError> {
    Ok(serde_yaml::to_string(cfg)?)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/dispswitch/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/dispswitch/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/dispswitch.yaml");
        if p.exists() { return Some(p) }
    }
    // project local, then system wide
    for candidate in &["dispswitch.yaml", "/etc/dispswitch.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_yaml(&s)
}

pub fn parse_yaml(s: &str) -> Result<Config, ConfigError> {
    let cfg: Config = serde_yaml::from_str(s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some()           { dst.log_level = src.log_level; }
    if src.screen.is_some()              { dst.screen = src.screen; }
    if src.buffer_count.is_some()        { dst.buffer_count = src.buffer_count; }
    if src.use_scaler.is_some()          { dst.use_scaler = src.use_scaler; }
    if src.check_capacity.is_some()      { dst.check_capacity = src.check_capacity; }
    if src.allow_legacy_driver.is_some() { dst.allow_legacy_driver = src.allow_legacy_driver; }
    match (&mut dst.devices, src.devices) {
        (None, Some(c)) => dst.devices = Some(c),
        (Some(d), Some(s)) => merge_devices(d, s),
        _ => {}
    }
    match (&mut dst.console, src.console) {
        (None, Some(c)) => dst.console = Some(c),
        (Some(d), Some(s)) => { if s.program.is_some() { d.program = s.program; } }
        _ => {}
    }
}

fn merge_devices(dst: &mut DeviceConfig, src: DeviceConfig) {
    if src.disp.is_some() { dst.disp = src.disp; }
    if src.fb0.is_some()  { dst.fb0 = src.fb0; }
    if src.fb1.is_some()  { dst.fb1 = src.fb1; }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some() { cfg.log_level = cli.log_level.clone(); }
    if cli.debug               { cfg.log_level = Some("debug".to_string()); }
    if cli.screen.is_some()    { cfg.screen = cli.screen; }
    if cli.buffers.is_some()   { cfg.buffer_count = cli.buffers; }
    if cli.no_scaler           { cfg.use_scaler = Some(false); }
    if cli.no_capacity_check   { cfg.check_capacity = Some(false); }
    if cli.force_legacy        { cfg.allow_legacy_driver = Some(true); }

    let any_device = cli.disp_device.is_some() || cli.fb0.is_some() || cli.fb1.is_some();
    if any_device && cfg.devices.is_none() {
        cfg.devices = Some(DeviceConfig::default());
    }
    if let Some(devices) = cfg.devices.as_mut() {
        if cli.disp_device.is_some() { devices.disp = cli.disp_device.clone(); }
        if cli.fb0.is_some()         { devices.fb0 = cli.fb0.clone(); }
        if cli.fb1.is_some()         { devices.fb1 = cli.fb1.clone(); }
    }
    if cli.fbset.is_some() {
        cfg.console.get_or_insert_with(ConsoleConfig::default).program = cli.fbset.clone();
    }
}

/// Put any invariants here (required fields, ranges, etc.)
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(n) = cfg.buffer_count {
        if n != 1 && n != 2 {
            return Err(ConfigError::Validation("buffer_count must be 1 or 2".into()));
        }
    }
    if let Some(level) = cfg.log_level.as_deref() {
        if level.parse::<log::LevelFilter>().is_err() {
            return Err(ConfigError::Validation(format!("unknown log_level '{}'", level)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["dispswitch"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let s = Config::default().settings();
        assert_eq!(s.screen, Screen::Zero);
        assert_eq!(s.buffer_count, 2);
        assert!(s.use_scaler);
        assert!(s.check_capacity);
        assert!(!s.allow_legacy_driver);
        assert_eq!(s.fb_device(Screen::One), Path::new("/dev/fb1"));
    }

    #[test]
    fn test_yaml_then_cli_precedence() {
        let mut cfg = parse_yaml(
            "screen: 1\nbuffer_count: 1\nuse_scaler: true\ndevices:\n  fb0: /dev/graphics/fb0\n",
        )
        .unwrap();
        let c = cli(&["--no-scaler", "--fb1", "/tmp/fb1", "switchtolcd"]);
        apply_cli_overrides(&mut cfg, &c);
        validate(&cfg).unwrap();

        let s = cfg.settings();
        assert_eq!(s.screen, Screen::One);
        assert_eq!(s.buffer_count, 1);
        assert!(!s.use_scaler);
        assert_eq!(s.fb_devices[0], PathBuf::from("/dev/graphics/fb0"));
        assert_eq!(s.fb_devices[1], PathBuf::from("/tmp/fb1"));
        assert_eq!(s.disp_device, PathBuf::from("/dev/disp"));
    }

    #[test]
    fn test_bad_screen_rejected_by_yaml() {
        assert!(matches!(parse_yaml("screen: 2\n"), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_bad_buffer_count_rejected() {
        let cfg = parse_yaml("buffer_count: 3\n").unwrap();
        assert!(matches!(validate(&cfg), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut dst = parse_yaml("check_capacity: false\nconsole:\n  program: /usr/sbin/fbset\n").unwrap();
        merge(&mut dst, parse_yaml("log_level: debug\n").unwrap());
        assert_eq!(dst.check_capacity, Some(false));
        assert_eq!(dst.log_level.as_deref(), Some("debug"));
        assert_eq!(dst.settings().console_program, PathBuf::from("/usr/sbin/fbset"));
    }

    #[test]
    fn test_command_parsing() {
        let c = cli(&["switchtohdmi", "8", "32"]);
        assert_eq!(
            c.command,
            Command::SwitchToHdmi(ModeArgs { mode: 8, depth: Some(PixelDepth::Bpp32) })
        );

        let c = cli(&["-s", "1", "changehdmimodeforce", "28"]);
        assert_eq!(c.screen, Some(Screen::One));
        assert_eq!(c.command, Command::ChangeHdmiModeForce(ModeArgs { mode: 28, depth: None }));

        let c = cli(&["rescale", "1920", "1080", "1280", "720"]);
        assert_eq!(
            c.command.rescale_window(),
            Some(ScalerWindow { src_width: 1920, src_height: 1080, dst_width: 1280, dst_height: 720 })
        );

        assert!(Cli::try_parse_from(["dispswitch", "changepixeldepth", "8"]).is_err());
        assert!(Cli::try_parse_from(["dispswitch", "switchtohdmi"]).is_err());
    }

    #[test]
    fn test_dump_round_trips() {
        let cfg = parse_yaml("screen: 1\nuse_scaler: false\n").unwrap();
        let yaml = dump(&cfg).unwrap();
        let again = parse_yaml(&yaml).unwrap();
        assert_eq!(again.settings(), cfg.settings());
    }
}
