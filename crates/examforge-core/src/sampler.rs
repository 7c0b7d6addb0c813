//! Stratified sampling of question pools by bloom level.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{BloomLevel, Question};

/// Draw up to `target_count` questions from `pool`, pulling each bloom level
/// toward its target ratio.
///
/// Levels named in `distribution` are sampled without replacement at
/// `round(target_count * ratio)` questions each (round half away from zero),
/// capped by the level's group size. Any shortfall is then filled uniformly
/// at random from the unpicked remainder, without regard to level. If the
/// pool itself is too small the result is short; the caller surfaces that,
/// the sampler does not retry.
pub fn stratified_sample<R: Rng + ?Sized>(
    pool: &[Question],
    target_count: usize,
    distribution: &BTreeMap<BloomLevel, f64>,
    rng: &mut R,
) -> Vec<Question> {
    let mut groups: BTreeMap<BloomLevel, Vec<usize>> = BTreeMap::new();
    for (idx, q) in pool.iter().enumerate() {
        groups.entry(q.bloom).or_default().push(idx);
    }

    let mut picked: Vec<usize> = Vec::with_capacity(target_count);
    let mut taken = vec![false; pool.len()];

    for (level, &ratio) in distribution {
        let wanted = (target_count as f64 * ratio).round() as usize;
        if wanted == 0 {
            continue;
        }
        let Some(group) = groups.get(level) else {
            continue;
        };
        for &idx in group.choose_multiple(rng, wanted.min(group.len())) {
            picked.push(idx);
            taken[idx] = true;
        }
    }

    if picked.len() < target_count {
        let remaining: Vec<usize> = (0..pool.len()).filter(|&i| !taken[i]).collect();
        let shortfall = target_count - picked.len();
        picked.extend(
            remaining
                .choose_multiple(rng, shortfall.min(remaining.len()))
                .copied(),
        );
    }

    picked.truncate(target_count);
    picked.into_iter().map(|idx| pool[idx].clone()).collect()
}
