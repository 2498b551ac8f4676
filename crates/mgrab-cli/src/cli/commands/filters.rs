//! `mgrab set-filters` – replace the session's admission policy.

use anyhow::Result;

use mgrab_core::capture::CaptureCoordinator;
use mgrab_core::classify::ResourceCategory;
use mgrab_core::command::{dispatch, Command};
use mgrab_core::filter::FilterConfig;
use mgrab_core::state_db::StateDb;

use super::session::expect_ok;

pub async fn run_set_filters(
    coordinator: &mut CaptureCoordinator,
    db: &StateDb,
    types: Vec<String>,
    image_formats: Vec<String>,
    video_formats: Vec<String>,
    audio_formats: Vec<String>,
) -> Result<()> {
    let filters = filter_config_from_args(types, image_formats, video_formats, audio_formats)?
        .ok_or_else(|| anyhow::anyhow!("no filter flags given; nothing to update"))?;

    expect_ok(dispatch(coordinator, db, Command::UpdateFilters { filters }).await)?;
    println!("Filters updated. Existing captures are unaffected.");
    Ok(())
}

/// Build a FilterConfig from CLI flags. Returns None when no flag was given
/// at all; unspecified format lists fall back to the defaults.
pub(crate) fn filter_config_from_args(
    types: Vec<String>,
    image_formats: Vec<String>,
    video_formats: Vec<String>,
    audio_formats: Vec<String>,
) -> Result<Option<FilterConfig>> {
    if types.is_empty()
        && image_formats.is_empty()
        && video_formats.is_empty()
        && audio_formats.is_empty()
    {
        return Ok(None);
    }

    let mut config = FilterConfig::default();
    if !types.is_empty() {
        config.resource_types = types
            .iter()
            .map(|t| {
                ResourceCategory::parse(t)
                    .ok_or_else(|| anyhow::anyhow!("unknown resource category: {t}"))
            })
            .collect::<Result<Vec<_>>>()?;
    }
    if !image_formats.is_empty() {
        config.image_formats = image_formats;
    }
    if !video_formats.is_empty() {
        config.video_formats = video_formats;
    }
    if !audio_formats.is_empty() {
        config.audio_formats = audio_formats;
    }
    Ok(Some(config))
}
