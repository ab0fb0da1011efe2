use std::time::Duration;

use crate::{error::DetectError, geometry::GeometrySource};

pub const DEFAULT_MAX_RETRIES: u32 = 10;
pub const DEFAULT_DELAY: Duration = Duration::from_millis(50);

/// Wait until the surface reports a non-zero inner size.
///
/// Freshly opened popups report 0x0 for a short while. The size is checked once up
/// front and again after each of up to `max_retries` sleeps of `delay`.
pub async fn wait_until_stable<G>(
    source: &G,
    max_retries: u32,
    delay: Duration,
) -> Result<(), DetectError>
where
    G: GeometrySource + ?Sized,
{
    let mut retries_left = max_retries;

    loop {
        if !source.inner_size().is_degenerate() {
            return Ok(());
        }

        if retries_left == 0 {
            return Err(DetectError::NeverStabilized {
                retries: max_retries,
                delay,
            });
        }

        tokio::time::sleep(delay).await;
        retries_left -= 1;
    }
}
