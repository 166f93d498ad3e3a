//! Random binary message generation from an injectable random source.

use rand::Rng;

/// Draw a uniformly random '0'/'1' message of the requested length.
pub fn random_binary_message<R: Rng>(rng: &mut R, length: usize) -> String {
    let mut message = String::with_capacity(length);
    for _ in 0..length {
        message.push(if rng.gen_bool(0.5) { '1' } else { '0' });
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_message_length_and_alphabet() {
        let mut rng = StdRng::seed_from_u64(1);
        let message = random_binary_message(&mut rng, 5);
        assert_eq!(message.len(), 5);
        assert!(message.chars().all(|ch| ch == '0' || ch == '1'));
    }

    #[test]
    fn test_deterministic_under_seed() {
        let mut first = StdRng::seed_from_u64(99);
        let mut second = StdRng::seed_from_u64(99);
        assert_eq!(
            random_binary_message(&mut first, 64),
            random_binary_message(&mut second, 64)
        );
    }

    #[test]
    fn test_both_symbols_appear() {
        let mut rng = StdRng::seed_from_u64(3);
        let message = random_binary_message(&mut rng, 256);
        assert!(message.contains('0'));
        assert!(message.contains('1'));
    }
}
