//! Command execution.

use crate::Commands;
use colored::Colorize;
use marquee_client::{SignController, Transmit};
use marquee_protocol::tables::{FONT_DIGITS, FONT_SELECT, MARKUP_TAGS};
use marquee_protocol::{Color, FileName, HorizontalAlign, MotionMode, VerticalAlign};

/// Executes a command and returns the formatted output.
pub fn execute<T: Transmit>(
    sign: &mut SignController<T>,
    cmd: Commands,
) -> Result<String, Box<dyn std::error::Error>> {
    match cmd {
        Commands::Reset => {
            sign.reset()?;
            Ok(format!("{} reset", "Sent".green()))
        }

        Commands::TestReset => {
            sign.test_reset()?;
            Ok(format!("{} test reset", "Sent".green()))
        }

        Commands::Pause => {
            sign.pause()?;
            Ok(format!("{} pause", "Sent".green()))
        }

        Commands::Resume => {
            sign.resume()?;
            Ok(format!("{} resume", "Sent".green()))
        }

        Commands::TimeSync => {
            sign.time_sync()?;
            Ok(format!("{} clock to local time", "Synchronized".green()))
        }

        Commands::RedoSettings => {
            sign.redo_settings()?;
            Ok(format!(
                "{} settings for drive {}",
                "Restored".green(),
                char::from(sign.session().drive()).to_string().cyan()
            ))
        }

        Commands::Frames { count } => {
            sign.set_frame_count(count)?;
            Ok(format!(
                "{} playlist with {} frame(s)",
                "Uploaded".green(),
                count
            ))
        }

        Commands::Text {
            index,
            text,
            attributes,
        } => {
            let file = FileName::checked(index)?;
            sign.set_text(index, &text, &attributes.into_attributes())?;
            Ok(format!(
                "{} frame {} ({})",
                "Wrote".green(),
                index,
                file.to_string().cyan()
            ))
        }

        Commands::Delete { path } => {
            sign.delete_file(&path)?;
            Ok(format!("{} {}", "Deleted".green(), path.cyan()))
        }

        Commands::Tags => Ok(tags()),
    }
}

/// Lists everything that can appear in markup or attribute flags.
pub fn tags() -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", "Markup tags".bold()));
    for digit in FONT_DIGITS {
        output.push_str(&format!(
            "  {:<10}{:02x} {:02x}\n",
            format!("{{{}}}", char::from(*digit)),
            FONT_SELECT,
            digit
        ));
    }
    for (tag, bytes) in MARKUP_TAGS {
        output.push_str(&format!(
            "  {:<10}{:02x} {:02x}\n",
            format!("{{{}}}", tag),
            bytes[0],
            bytes[1]
        ));
    }

    output.push_str(&format!(
        "\n{}\n",
        names_line("Motion modes", MotionMode::ALL.iter().map(|m| m.name()))
    ));
    output.push_str(&format!(
        "{}\n",
        names_line("Colors", Color::ALL.iter().map(|c| c.name()))
    ));
    output.push_str(&format!(
        "{}\n",
        names_line("Vertical", VerticalAlign::ALL.iter().map(|v| v.name()))
    ));
    output.push_str(&names_line(
        "Horizontal",
        HorizontalAlign::ALL.iter().map(|h| h.name()),
    ));

    output
}

fn names_line<'a>(title: &str, names: impl Iterator<Item = &'a str>) -> String {
    format!(
        "{}\n  {}",
        title.bold(),
        names.collect::<Vec<_>>().join(", ")
    )
}
