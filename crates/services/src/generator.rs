use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::{HashMap, HashSet};

use drill_core::{Item, TaskConfig, TaskSet};

use crate::error::GenerateError;
use crate::sampler::{UsageBins, pick_k_with_fairness};
use crate::selector::balanced_question_index;

//
// ─── TASK GENERATION ───────────────────────────────────────────────────────────
//

/// Generates `set_count` task sets from a high-priority pool of `strong`
/// items and a `normal` pool.
///
/// Each set reserves up to `choice_count - 1` slots for strong items so
/// they appear in nearly every set, fills the rest from the normal pool,
/// and backfills from leftover strong items and the full union when a pool
/// runs dry. Choices are shuffled so pool origin is not positionally
/// visible. Question targets are drawn per repetition against one usage
/// map shared across the whole run.
///
/// # Errors
///
/// Returns `GenerateError::InsufficientPool` when the distinct union of
/// both pools is smaller than `choice_count`; no partial result is
/// produced. The remaining variants signal invariant violations that
/// cannot occur once the pool check passed.
pub fn generate_task<R: Rng + ?Sized>(
    strong: &[Item],
    normal: &[Item],
    config: &TaskConfig,
    rng: &mut R,
) -> Result<Vec<TaskSet>, GenerateError> {
    let choice_count = config.choice_count();

    let mut union: Vec<Item> = strong.iter().chain(normal.iter()).cloned().collect();
    dedup_preserving_order(&mut union);
    if union.len() < choice_count {
        return Err(GenerateError::InsufficientPool {
            available: union.len(),
            needed: choice_count,
        });
    }

    // Pool-local bins even out which items appear as choices across sets;
    // the question map evens out which choice gets asked.
    let mut strong_bins = UsageBins::new();
    let mut normal_bins = UsageBins::new();
    let mut question_usage: HashMap<Item, u32> =
        union.iter().map(|item| (item.clone(), 0)).collect();

    let mut sets = Vec::with_capacity(config.set_count());
    for _ in 0..config.set_count() {
        let choices = build_choices(
            strong,
            normal,
            &union,
            choice_count,
            &mut strong_bins,
            &mut normal_bins,
            rng,
        )?;

        let mut questions = Vec::with_capacity(config.repetition_count());
        for _ in 0..config.repetition_count() {
            let index = balanced_question_index(&choices, &question_usage, rng)
                .ok_or(GenerateError::NoCandidate)?;
            *question_usage.entry(choices[index].clone()).or_insert(0) += 1;
            questions.push(index);
        }

        sets.push(TaskSet::new(choices, questions)?);
    }

    Ok(sets)
}

/// Assembles one set's choice list: strong picks, normal fill, backfill,
/// final shuffle.
fn build_choices<R: Rng + ?Sized>(
    strong: &[Item],
    normal: &[Item],
    union: &[Item],
    choice_count: usize,
    strong_bins: &mut UsageBins,
    normal_bins: &mut UsageBins,
    rng: &mut R,
) -> Result<Vec<Item>, GenerateError> {
    let need_strong = choice_count.saturating_sub(1).min(strong.len());
    let mut choices = pick_k_with_fairness(strong, need_strong, strong_bins, rng);

    let remaining = choice_count - choices.len();
    let normal_left: Vec<Item> = normal
        .iter()
        .filter(|item| !choices.contains(item))
        .cloned()
        .collect();
    choices.extend(pick_k_with_fairness(&normal_left, remaining, normal_bins, rng));

    // Normal pool exhausted: top up with unused strong items in pool order.
    if choices.len() < choice_count {
        let need_more = choice_count - choices.len();
        let strong_left: Vec<Item> = strong
            .iter()
            .filter(|item| !choices.contains(item))
            .take(need_more)
            .cloned()
            .collect();
        choices.extend(strong_left);
    }

    dedup_preserving_order(&mut choices);

    // Last resort: fill from the distinct union of both pools.
    if choices.len() < choice_count {
        let need_more = choice_count - choices.len();
        let fill: Vec<Item> = union
            .iter()
            .filter(|item| !choices.contains(item))
            .take(need_more)
            .cloned()
            .collect();
        choices.extend(fill);
    }

    if choices.len() < choice_count {
        return Err(GenerateError::IncompleteSet {
            got: choices.len(),
            needed: choice_count,
        });
    }

    choices.shuffle(rng);
    Ok(choices)
}

fn dedup_preserving_order(items: &mut Vec<Item>) {
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn items(labels: &[&str]) -> Vec<Item> {
        labels.iter().map(|&l| Item::from(l)).collect()
    }

    fn config(choices: usize, reps: usize, sets: usize) -> TaskConfig {
        TaskConfig::new(choices, reps, sets).unwrap()
    }

    #[test]
    fn insufficient_union_pool_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = generate_task(&[], &items(&["X", "Y"]), &config(3, 1, 1), &mut rng).unwrap_err();
        assert_eq!(
            err,
            GenerateError::InsufficientPool {
                available: 2,
                needed: 3
            }
        );
    }

    #[test]
    fn overlapping_pools_count_distinct_items_once() {
        let mut rng = StdRng::seed_from_u64(2);
        let err = generate_task(
            &items(&["X", "Y"]),
            &items(&["Y", "X"]),
            &config(3, 1, 1),
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, GenerateError::InsufficientPool { available: 2, .. }));
    }

    #[test]
    fn sets_have_distinct_choices_and_in_range_questions() {
        let mut rng = StdRng::seed_from_u64(3);
        let strong = items(&["A", "B"]);
        let normal = items(&["C", "D", "E", "F"]);
        let cfg = config(4, 3, 6);

        let sets = generate_task(&strong, &normal, &cfg, &mut rng).unwrap();
        assert_eq!(sets.len(), 6);
        for set in &sets {
            assert_eq!(set.choice_count(), 4);
            let mut unique = set.choices().to_vec();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), 4);

            assert_eq!(set.repetition_count(), 3);
            for &question in set.questions() {
                assert!(question < 4);
            }
        }
    }

    #[test]
    fn strong_items_are_reserved_up_to_choice_count_minus_one() {
        let mut rng = StdRng::seed_from_u64(4);
        let strong = items(&["A", "B"]);
        let normal = items(&["C", "D", "E"]);

        let sets = generate_task(&strong, &normal, &config(3, 2, 1), &mut rng).unwrap();
        let set = &sets[0];
        // need_strong = min(3 - 1, 2) = 2: both strong items must be in.
        assert!(set.choices().contains(&Item::from("A")));
        assert!(set.choices().contains(&Item::from("B")));
        assert_eq!(set.choice_count(), 3);
    }

    #[test]
    fn normal_items_appear_evenly_across_sets() {
        let mut rng = StdRng::seed_from_u64(5);
        let normal = items(&["C", "D", "E", "F"]);
        // No strong items: 10 sets of 2 draw 20 normal slots over 4 items.
        let sets = generate_task(&[], &normal, &config(2, 1, 10), &mut rng).unwrap();

        let mut appearances: HashMap<&Item, u32> = HashMap::new();
        for set in &sets {
            for choice in set.choices() {
                *appearances.entry(choice).or_insert(0) += 1;
            }
        }
        for item in &normal {
            assert_eq!(appearances.get(item), Some(&5), "uneven exposure of {item}");
        }
    }

    #[test]
    fn exhausted_normal_pool_backfills_from_strong() {
        let mut rng = StdRng::seed_from_u64(6);
        let strong = items(&["A", "B", "C", "D"]);
        let normal = items(&["E"]);

        // choice_count 4 wants 3 strong + 1 normal; a second set may need
        // strong backfill once E is the only normal item.
        let sets = generate_task(&strong, &normal, &config(4, 1, 3), &mut rng).unwrap();
        for set in &sets {
            assert_eq!(set.choice_count(), 4);
            let mut unique = set.choices().to_vec();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), 4);
        }
    }

    #[test]
    fn single_choice_sets_draw_from_normal_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        let normal = items(&["C", "D"]);
        // choice_count 1 reserves no strong slots at all.
        let sets = generate_task(&items(&["A"]), &normal, &config(1, 1, 4), &mut rng).unwrap();
        for set in &sets {
            assert_eq!(set.choice_count(), 1);
            assert_eq!(set.questions(), &[0]);
        }
    }

    #[test]
    fn question_targets_stay_balanced_across_the_run() {
        let mut rng = StdRng::seed_from_u64(8);
        let normal = items(&["C", "D"]);
        // One set, both items shown, 10 repetitions: the shared usage map
        // must keep the split at 5/5.
        let sets = generate_task(&[], &normal, &config(2, 10, 1), &mut rng).unwrap();

        let set = &sets[0];
        let mut asked: HashMap<&Item, u32> = HashMap::new();
        for rep in 0..set.repetition_count() {
            *asked.entry(set.question_item(rep).unwrap()).or_insert(0) += 1;
        }
        assert_eq!(asked.values().copied().collect::<Vec<_>>(), vec![5, 5]);
    }
}
