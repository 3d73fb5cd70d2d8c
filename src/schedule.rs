use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Section list is empty")]
    EmptyCatalog,
    #[error("Section {0} has zero length")]
    EmptySection(usize),
}

/// Two-level address of today's entry in the catalog. All indices are 1-based.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleReference {
    pub day_index: u32,
    pub section_index: u32,
    pub position_in_section: u32,
}

/// Map `now` to a position in a catalog of sections with the given lengths.
///
/// Day 1 is the epoch's day. An epoch in the future still yields day 1. Once the
/// elapsed day count runs past the end of the catalog the reference stays on the
/// last position of the last section.
pub fn resolve(
    now: NaiveDateTime,
    epoch: NaiveDateTime,
    section_lengths: &[u32],
) -> Result<ScheduleReference, ScheduleError> {
    validate(section_lengths)?;

    let elapsed = now.signed_duration_since(epoch).num_days();
    let day_index = u32::try_from(elapsed.saturating_add(1).max(1)).unwrap_or(u32::MAX);

    let mut running_total: u32 = 0;
    for (idx, &length) in section_lengths.iter().enumerate() {
        if day_index <= running_total.saturating_add(length) {
            return Ok(ScheduleReference {
                day_index,
                section_index: idx as u32 + 1,
                position_in_section: day_index - running_total,
            });
        }
        running_total = running_total.saturating_add(length);
    }

    log::warn!(
        "day {} is past the end of the catalog ({} entries), holding on the last entry",
        day_index,
        running_total
    );
    let last = section_lengths.len();
    Ok(ScheduleReference {
        day_index,
        section_index: last as u32,
        position_in_section: section_lengths[last - 1],
    })
}

pub fn validate(section_lengths: &[u32]) -> Result<(), ScheduleError> {
    if section_lengths.is_empty() {
        return Err(ScheduleError::EmptyCatalog);
    }
    if let Some(idx) = section_lengths.iter().position(|&len| len == 0) {
        return Err(ScheduleError::EmptySection(idx + 1));
    }
    Ok(())
}
