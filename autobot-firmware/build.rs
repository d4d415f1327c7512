//! Build script for autobot-firmware
//!
//! - Passes the cortex-m-rt and defmt linker scripts
//! - Validates robot.toml and generates `ROBOT_CONFIG` from it

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use autobot_core::config::RobotConfig;

fn main() {
    setup_linker();
    let config = load_config();
    write_config(&config);
}

/// Linker scripts; memory.x comes from embassy-stm32's `memory-x` feature
fn setup_linker() {
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read, parse and validate robot.toml
fn load_config() -> RobotConfig {
    println!("cargo:rerun-if-changed=robot.toml");

    let config_path = Path::new("robot.toml");
    if !config_path.exists() {
        fail(
            "robot.toml not found!",
            &[
                "The firmware requires a robot.toml configuration file.",
                "Please create one in the autobot-firmware directory.",
            ],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read robot.toml", &[e.to_string().as_str()]),
    };

    let config: RobotConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            let msg = e.to_string();
            let lines: Vec<&str> = msg.lines().collect();
            fail("Invalid robot.toml", &lines)
        }
    };

    if let Err(e) = config.validate() {
        fail(
            "Invalid values in robot.toml",
            &[
                format!("{:?}", e).as_str(),
                "See the comments in robot.toml for valid ranges.",
            ],
        );
    }

    println!("cargo:warning=robot.toml validated successfully");
    config
}

/// Abort the build with a boxed error message
fn fail(title: &str, details: &[&str]) -> ! {
    let body = details
        .iter()
        .map(|line| format!("║  {:<64} ║", truncate(line)))
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}

/// Shorten a banner line to 62 characters, cutting on a char boundary
fn truncate(line: &str) -> String {
    if line.chars().count() > 62 {
        let head: String = line.chars().take(59).collect();
        format!("{}...", head)
    } else {
        line.to_string()
    }
}

/// Emit `robot_config.rs` into OUT_DIR
fn write_config(config: &RobotConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));

    let s = &config.sonar;
    let e = &config.encoder;
    let l = &config.line;
    let d = &config.drive;
    let c = &config.control;

    let source = format!(
        "// Generated from robot.toml by build.rs\n\
         pub const ROBOT_CONFIG: RobotConfig = RobotConfig {{\n\
         \x20   sonar: SonarConfig {{ tick_ns: {}, near_threshold_cm: {}, trigger_period_us: {}, trigger_pulse_us: {} }},\n\
         \x20   encoder: EncoderConfig {{ counts_per_rev: {} }},\n\
         \x20   line: LineConfig {{ stop_threshold: {}, resume_threshold: {} }},\n\
         \x20   drive: DriveConfig {{ max_duty_percent: {}, turn_ratio_percent: {}, backward_ratio_percent: {}, pwm_frequency_hz: {} }},\n\
         \x20   control: ControlConfig {{ tick_ms: {}, status_interval_ms: {} }},\n\
         }};\n",
        s.tick_ns,
        s.near_threshold_cm,
        s.trigger_period_us,
        s.trigger_pulse_us,
        e.counts_per_rev,
        l.stop_threshold,
        l.resume_threshold,
        d.max_duty_percent,
        d.turn_ratio_percent,
        d.backward_ratio_percent,
        d.pwm_frequency_hz,
        c.tick_ms,
        c.status_interval_ms,
    );

    let path = out_dir.join("robot_config.rs");
    if let Err(e) = fs::write(&path, source) {
        fail("Failed to write generated config", &[e.to_string().as_str()]);
    }
}
