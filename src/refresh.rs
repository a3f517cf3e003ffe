//! Periodic playlist refresh.

use crate::config::FrameConfig;
use chrono::{Local, NaiveDateTime};
use marquee_client::{ClientError, SignController, Transmit};

/// Republishes the whole playlist using the local clock.
pub fn run_cycle<T: Transmit>(
    sign: &mut SignController<T>,
    frames: &[FrameConfig],
) -> Result<(), ClientError> {
    run_cycle_at(sign, frames, &Local::now().naive_local())
}

/// Republishes the whole playlist.
///
/// The display is paused while files are rewritten, so a half-written
/// playlist is never shown. On error the sign may be left paused; the next
/// cycle starts over from `test_reset`.
pub fn run_cycle_at<T: Transmit>(
    sign: &mut SignController<T>,
    frames: &[FrameConfig],
    now: &NaiveDateTime,
) -> Result<(), ClientError> {
    sign.test_reset()?;
    sign.pause()?;
    sign.time_sync_at(now)?;
    sign.set_frame_count(frames.len() as u32)?;
    for (index, frame) in frames.iter().enumerate() {
        sign.set_text(index as u32, &frame.text, &frame.attributes)?;
    }
    sign.resume()?;

    tracing::debug!(
        "Refreshed {} frame(s), next sequence {}",
        frames.len(),
        sign.session().sequence()
    );
    Ok(())
}
