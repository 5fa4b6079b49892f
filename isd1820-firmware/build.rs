//! Build script for isd1820-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml at compile time
//! - Generates board constants and the pin binding macro

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use isd1820_core::config::{Isd1820Config, PinBinding, PinConfig, TimerClockConfig};
use isd1820_core::Signal;
use isd1820_hal::TimerClock;
use serde::Deserialize;

/// Core timer counters on the F4 are 16 bits wide
const MAX_TICKS: u32 = u16::MAX as u32;

/// Pins the Nucleo board already uses (user button, SWD)
const RESERVED_PINS: [(&str, PinConfig); 3] = [
    ("user button", PinConfig::new('C', 13)),
    ("SWDIO", PinConfig::new('A', 13)),
    ("SWCLK", PinConfig::new('A', 14)),
];

/// Layout of board.toml
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BoardFile {
    pins: PinBinding,
    #[serde(default)]
    timer: TimerClockConfig,
    #[serde(default)]
    recorder: RecorderSection,
    #[serde(default)]
    demo: DemoSection,
}

/// `[recorder]` section; the timer clock lives in its own `[timer]` section
#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RecorderSection {
    settle_ms: u32,
    pulse_ms: u32,
    rosc_ohms: u32,
}

impl Default for RecorderSection {
    fn default() -> Self {
        let config = Isd1820Config::default();
        Self {
            settle_ms: config.settle_ms,
            pulse_ms: config.pulse_ms,
            rosc_ohms: config.rosc_ohms,
        }
    }
}

/// `[demo]` section
#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DemoSection {
    self_test: bool,
    record_ms: u32,
    play_ms: u32,
    long_press_ms: u32,
}

impl Default for DemoSection {
    fn default() -> Self {
        Self {
            self_test: true,
            record_ms: 5_000,
            play_ms: 5_000,
            long_press_ms: 800,
        }
    }
}

fn main() {
    setup_linker();
    let board = validate_config();
    generate_board(&board);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate board.toml configuration at compile time
fn validate_config() -> BoardFile {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml describing the wiring.       ║\n\
            ║  Please create one in the isd1820-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Bad pin names and unknown keys surface here as parse errors
    let board: BoardFile = match toml::from_str(&config_content) {
        Ok(board) => board,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid board.toml                                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let mut errors = Vec::new();
    errors.extend(validate_pins(&board.pins));
    errors.extend(validate_timing(&board));

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml validation failed                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    // Over-long recordings are truncated by the chip, not rejected
    let limit_ms = board.recorder.rosc_ohms / 10;
    if board.demo.record_ms > limit_ms {
        println!(
            "cargo:warning=[demo] record_ms = {} exceeds the {} ms the chip holds at {} ohms",
            board.demo.record_ms, limit_ms, board.recorder.rosc_ohms
        );
    }

    println!("cargo:warning=board.toml validated successfully");
    board
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn validate_pins(pins: &PinBinding) -> Vec<String> {
    let mut errors = Vec::new();

    if let Err(e) = pins.validate() {
        errors.push(format!("[pins] {:?}", e));
    }

    for signal in Signal::ALL {
        let pin = pins.get(signal);
        for (owner, reserved) in RESERVED_PINS {
            if pin == reserved {
                errors.push(format!(
                    "[pins] {} on {} collides with the {}",
                    signal.label(),
                    pin,
                    owner
                ));
            }
        }
    }

    errors
}

fn validate_timing(board: &BoardFile) -> Vec<String> {
    let mut errors = Vec::new();
    let timer = &board.timer;

    if timer.kernel_clock_hz == 0 {
        errors.push("[timer] kernel_clock_hz must be non-zero".to_string());
    }
    if timer.prescaler > MAX_TICKS {
        errors.push(format!("[timer] prescaler must be 0-{}", MAX_TICKS));
    }

    let clock = TimerClock::new(timer.kernel_clock_hz, timer.prescaler);
    if clock.tick_hz() == 0 {
        errors.push("[timer] prescaler leaves a tick rate below 1 Hz".to_string());
    } else {
        for (key, ms) in [("record_ms", board.demo.record_ms), ("play_ms", board.demo.play_ms)] {
            if clock.reload_for_ms(ms) > MAX_TICKS {
                errors.push(format!(
                    "[demo] {} = {} overflows the 16-bit timer at {} Hz",
                    key,
                    ms,
                    clock.tick_hz()
                ));
            }
        }
    }

    if board.recorder.pulse_ms == 0 {
        errors.push("[recorder] pulse_ms must be non-zero".to_string());
    }
    if board.demo.long_press_ms == 0 {
        errors.push("[demo] long_press_ms must be non-zero".to_string());
    }

    errors
}

/// Write `board.rs` into OUT_DIR
fn generate_board(board: &BoardFile) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let pins = &board.pins;
    let recorder = &board.recorder;

    let code = format!(
        "// Generated by build.rs from board.toml\n\
        \n\
        /// Recorder timing and countdown timer clock\n\
        pub const RECORDER_CONFIG: Isd1820Config = Isd1820Config {{\n\
        \x20   settle_ms: {settle},\n\
        \x20   pulse_ms: {pulse},\n\
        \x20   rosc_ohms: {rosc},\n\
        \x20   timer: TimerClockConfig {{\n\
        \x20       kernel_clock_hz: {kernel},\n\
        \x20       prescaler: {psc},\n\
        \x20   }},\n\
        }};\n\
        \n\
        /// Prescaler written to the countdown timer\n\
        pub const TIMER_PRESCALER: u16 = {psc};\n\
        \n\
        /// Run the blocking record-then-play check at boot\n\
        pub const SELF_TEST: bool = {self_test};\n\
        \n\
        /// Button demo record length (ms)\n\
        pub const DEMO_RECORD_MS: u32 = {record_ms};\n\
        \n\
        /// Button demo play length (ms)\n\
        pub const DEMO_PLAY_MS: u32 = {play_ms};\n\
        \n\
        /// Hold time that turns a press into a long press (ms)\n\
        pub const LONG_PRESS_MS: u64 = {long_press};\n\
        \n\
        /// Configure the control pins bound in board.toml\n\
        macro_rules! control_pins {{\n\
        \x20   ($p:ident) => {{\n\
        \x20       isd1820_hal_stm32::pins::control_pins($p.{rec}, $p.{pl}, $p.{pe}, $p.{ft})\n\
        \x20   }};\n\
        }}\n",
        settle = recorder.settle_ms,
        pulse = recorder.pulse_ms,
        rosc = recorder.rosc_ohms,
        kernel = board.timer.kernel_clock_hz,
        psc = board.timer.prescaler,
        self_test = board.demo.self_test,
        record_ms = board.demo.record_ms,
        play_ms = board.demo.play_ms,
        long_press = board.demo.long_press_ms,
        rec = pins.record,
        pl = pins.play_level,
        pe = pins.play_edge,
        ft = pins.feed_through,
    );

    fs::write(out_dir.join("board.rs"), code).unwrap();
}
