//! marquee-cli - Command-line interface for marquee LED signs
//!
//! Sends one operation per invocation, or prints the frames with `--dry-run`.

mod commands;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use marquee_client::{DumpTransport, SignController, UdpConfig, UdpTransport};
use marquee_protocol::{
    Color, DisplayAttributes, HorizontalAlign, MotionMode, Session, VerticalAlign, DEFAULT_PORT,
};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "marquee-cli")]
#[command(about = "Command-line interface for marquee LED signs")]
#[command(version)]
struct Cli {
    /// Sign host name or IP address
    #[arg(short, long, env = "MARQUEE_SIGN")]
    sign: Option<String>,

    /// Sign UDP port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Group address on the command bus
    #[arg(long, default_value_t = 1)]
    group: u8,

    /// Unit address on the command bus
    #[arg(long, default_value_t = 1)]
    unit: u8,

    /// Drive letter holding the frame files
    #[arg(short, long, default_value_t = 'E')]
    drive: char,

    /// First sequence number to send
    #[arg(long, default_value_t = 1)]
    sequence: u16,

    /// Delay after each datagram, in milliseconds
    #[arg(long, default_value_t = 300)]
    pace_ms: u64,

    /// Print frames as hex on stdout instead of sending them
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Restart the sign
    Reset,

    /// Leave the built-in test pattern
    TestReset,

    /// Freeze the display
    Pause,

    /// Resume the display
    Resume,

    /// Set the sign's clock to local time
    TimeSync,

    /// Re-upload CONFIG.SYS and factory defaults
    RedoSettings,

    /// Replace the playlist with frames 0..COUNT
    Frames {
        /// Number of frames
        count: u32,
    },

    /// Write text to a frame
    Text {
        /// Frame index (0-675)
        index: u32,

        /// Frame text; may contain markup such as {r}, {f} or {12}
        text: String,

        #[command(flatten)]
        attributes: AttributeArgs,
    },

    /// Delete a file on the sign
    Delete {
        /// Path on the sign
        path: String,
    },

    /// List markup tags and attribute names
    Tags,
}

/// Display attributes; anything left out keeps its default.
#[derive(Args)]
struct AttributeArgs {
    /// Transition into the frame
    #[arg(long)]
    move_in: Option<MotionMode>,

    /// Transition out of the frame
    #[arg(long)]
    move_out: Option<MotionMode>,

    /// Text color
    #[arg(short, long)]
    color: Option<Color>,

    /// Background color
    #[arg(short, long)]
    background: Option<Color>,

    /// Flash the whole frame
    #[arg(long)]
    flash: bool,

    /// Speed level 0-6
    #[arg(long)]
    speed: Option<u8>,

    /// Vertical alignment
    #[arg(long)]
    vert_align: Option<VerticalAlign>,

    /// Horizontal alignment
    #[arg(long)]
    horiz_align: Option<HorizontalAlign>,

    /// Use fixed-width glyph spacing
    #[arg(long)]
    fixed_width: bool,
}

impl AttributeArgs {
    fn into_attributes(self) -> DisplayAttributes {
        let defaults = DisplayAttributes::default();
        DisplayAttributes {
            move_in: self.move_in.unwrap_or(defaults.move_in),
            move_out: self.move_out.unwrap_or(defaults.move_out),
            color: self.color.unwrap_or(defaults.color),
            background: self.background.unwrap_or(defaults.background),
            flash: self.flash,
            speed: self.speed.unwrap_or(defaults.speed),
            vert_align: self.vert_align.unwrap_or(defaults.vert_align),
            horiz_align: self.horiz_align.unwrap_or(defaults.horiz_align),
            typeset: !self.fixed_width,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // Handle tags locally (no sign needed)
    if let Commands::Tags = cli.command {
        println!("{}", commands::tags());
        return Ok(());
    }

    let session = Session::new(cli.group, cli.unit)
        .with_drive(cli.drive)?
        .with_sequence(cli.sequence);

    let result = if cli.dry_run {
        let mut sign = SignController::new(DumpTransport::new(std::io::stdout()), session);
        commands::execute(&mut sign, cli.command)
    } else {
        let Some(host) = cli.sign.as_deref() else {
            eprintln!(
                "{}: --sign (or MARQUEE_SIGN) is required unless --dry-run is set",
                "Error".red()
            );
            std::process::exit(2);
        };
        let config = UdpConfig::new(host)
            .with_port(cli.port)
            .with_pace(Duration::from_millis(cli.pace_ms));
        let transport = UdpTransport::connect(&config).map_err(|e| {
            eprintln!("{}: {}", "Connection failed".red(), e);
            e
        })?;
        let mut sign = SignController::new(transport, session);
        commands::execute(&mut sign, cli.command)
    };

    match result {
        // Dry-run frames own stdout
        Ok(output) if cli.dry_run => eprintln!("{}", output),
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("{}: {}", "Error".red(), e);
            std::process::exit(1);
        }
    }

    Ok(())
}
