//! Sandbox word-salad generator fed by user-entered lines.
//!
//! A deliberately crude pseudo-Markov toy: it draws random words from every
//! stored line. The more lines the user feeds it, the more variety it has.

use rand::seq::SliceRandom;
use rand::Rng;

/// Generate a babble line from the stored pool.
///
/// Empty pool yields nothing. With fewer than three words total there is not
/// enough material to shuffle, so a stored line is returned verbatim.
pub fn generate_line<R: Rng>(lines: &[String], rng: &mut R) -> Option<String> {
    if lines.is_empty() {
        return None;
    }

    let words: Vec<&str> = lines
        .iter()
        .flat_map(|line| line.split_whitespace())
        .collect();
    if words.len() < 3 {
        return lines.choose(rng).cloned();
    }

    let length = rng.gen_range(5..=12);
    let picked: Vec<&str> = (0..length)
        .filter_map(|_| words.choose(rng).copied())
        .collect();
    Some(picked.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[test]
    fn test_empty_pool_yields_nothing() {
        assert_eq!(generate_line(&[], &mut rng()), None);
    }

    #[test]
    fn test_tiny_pool_returns_stored_line_verbatim() {
        let lines = vec!["two words".to_string()];
        assert_eq!(
            generate_line(&lines, &mut rng()),
            Some("two words".to_string())
        );
    }

    #[test]
    fn test_generated_words_come_from_pool() {
        let lines = vec![
            "the comet sails past".to_string(),
            "dust rings the temple".to_string(),
        ];
        let vocabulary: Vec<&str> = lines.iter().flat_map(|l| l.split_whitespace()).collect();

        let line = generate_line(&lines, &mut rng()).unwrap();
        for word in line.split_whitespace() {
            assert!(vocabulary.contains(&word), "unexpected word {word}");
        }
    }

    #[test]
    fn test_generated_length_in_range() {
        let lines = vec!["one two three four five".to_string()];
        let line = generate_line(&lines, &mut rng()).unwrap();
        let count = line.split_whitespace().count();
        assert!((5..=12).contains(&count));
    }
}
