//! Round and completion statistics.

/// `100 * part / whole` rounded half up, 0 when `whole` is 0.
pub(crate) fn percent_rounded(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((200 * part + whole) / (2 * whole)) as u32
}

/// Share of a round's cards classified as mastered.
pub fn accuracy(mastered: usize, not_mastered: usize) -> u32 {
    percent_rounded(mastered, mastered + not_mastered)
}

/// Completion efficiency as the study screen has always reported it.
///
/// Attempts are estimated as every finally-mastered card being seen once per
/// round, so the result is `100 / round` whatever the per-round counts were.
pub fn efficiency(final_mastered_count: usize, round: u32) -> u32 {
    let extra_rounds = round.saturating_sub(1) as usize;
    let total_attempts = final_mastered_count + extra_rounds * final_mastered_count;
    percent_rounded(final_mastered_count, total_attempts)
}
