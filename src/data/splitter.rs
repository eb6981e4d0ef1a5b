// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Shuffles encoded training items and splits them into a training
// set and a held-out validation set used for per-epoch loss and
// perplexity.
//
// Idiom files are usually grouped by topic or source, so splitting
// without a shuffle would give a validation set drawn from only one
// or two files.
//
// A fraction of 1.0 keeps everything for training; the trainer then
// skips validation.

use rand::seq::SliceRandom;

/// Shuffle `items` and split into (train, validation).
///
/// `train_fraction` is clamped to [0, 1]. A non-empty input always
/// keeps at least one item for training.
pub fn split_train_val<T>(mut items: Vec<T>, train_fraction: f64) -> (Vec<T>, Vec<T>) {
    items.shuffle(&mut rand::thread_rng());

    let total    = items.len();
    let fraction = train_fraction.clamp(0.0, 1.0);
    let split_at = ((total as f64) * fraction).round() as usize;
    let split_at = split_at.clamp(total.min(1), total);

    let val = items.split_off(split_at);

    tracing::debug!("Dataset split: {} training, {} validation", items.len(), val.len());
    (items, val)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sizes() {
        let (train, val) = split_train_val((0..100).collect::<Vec<_>>(), 0.9);
        assert_eq!(train.len(), 90);
        assert_eq!(val.len(), 10);
    }

    #[test]
    fn test_nothing_lost() {
        let (mut train, val) = split_train_val((0..37).collect::<Vec<_>>(), 0.7);
        train.extend(val);
        train.sort();
        assert_eq!(train, (0..37).collect::<Vec<_>>());
    }

    #[test]
    fn test_full_fraction_has_no_validation() {
        let (train, val) = split_train_val(vec![1, 2, 3], 1.0);
        assert_eq!(train.len(), 3);
        assert!(val.is_empty());
    }

    #[test]
    fn test_keeps_one_training_item() {
        let (train, val) = split_train_val(vec!["only"], 0.1);
        assert_eq!(train, vec!["only"]);
        assert!(val.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let (train, val) = split_train_val(Vec::<u8>::new(), 0.8);
        assert!(train.is_empty() && val.is_empty());
    }
}
