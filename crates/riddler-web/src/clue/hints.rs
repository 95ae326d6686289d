//! Hint generation from an answer's shape.

use rand::Rng;
use rand::seq::IndexedRandom;

use riddler_common::Category;

fn category_tips(category: Category) -> &'static [&'static str] {
    match category {
        Category::Logic => &[
            "Think process of elimination",
            "Consider order and state changes",
            "Test simple cases first",
        ],
        Category::Math => &[
            "Estimate before you compute",
            "Watch units and totals",
            "Look for symmetry",
        ],
        Category::Wordplay => &[
            "Listen to sounds, not spelling",
            "Homophones might help",
            "Think prefixes and suffixes",
        ],
        Category::General => &[
            "Lateral thinking helps",
            "Focus on the key noun",
            "Rephrase the question",
        ],
    }
}

/// Hints derived from the letters and words of the answer
fn structural_hints<R: Rng + ?Sized>(answer: &str, rng: &mut R) -> Vec<String> {
    let answer = answer.trim();
    let letters: Vec<char> = answer.chars().filter(|c| c.is_alphabetic()).collect();
    let words = answer.split_whitespace().count();

    let mut hints = Vec::new();
    if let (Some(first), Some(last)) = (letters.first(), letters.last()) {
        hints.push(format!("Starts with: {}", first.to_uppercase()));
        hints.push(format!("Ends with: {}", last.to_uppercase()));
        hints.push(format!("Letters: {}", letters.len()));

        let vowels = letters
            .iter()
            .filter(|c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
            .count();
        let consonants = letters.len() - vowels;
        if vowels > 0 {
            hints.push(format!("Vowels: {}", vowels));
        }
        if consonants > 0 {
            hints.push(format!("Consonants: {}", consonants));
        }

        let mut unique: Vec<String> = letters.iter().map(|c| c.to_uppercase().to_string()).collect();
        unique.sort();
        unique.dedup();
        if let Some(pick) = unique.choose(rng) {
            hints.push(format!("Contains: {}", pick));
        }
    }
    if words > 0 {
        hints.push(format!("Words: {}", words));
        if words > 1 {
            hints.push(format!("Words: {} · Letters: {}", words, letters.len()));
        }
    }
    hints
}

/// Up to two structural hints plus one category tip
pub fn make_hints<R: Rng + ?Sized>(answer: &str, category: Category, rng: &mut R) -> Vec<String> {
    let structural = structural_hints(answer, rng);
    let take = structural.len().min(2);

    let mut chosen: Vec<String> = structural.choose_multiple(rng, take).cloned().collect();
    if let Some(tip) = category_tips(category).choose(rng) {
        chosen.push((*tip).to_string());
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_structural_hints_for_map() {
        let mut rng = StdRng::seed_from_u64(1);
        let hints = structural_hints("A map", &mut rng);
        assert!(hints.contains(&"Starts with: A".to_string()));
        assert!(hints.contains(&"Ends with: P".to_string()));
        assert!(hints.contains(&"Letters: 4".to_string()));
        assert!(hints.contains(&"Vowels: 2".to_string()));
        assert!(hints.contains(&"Consonants: 2".to_string()));
        assert!(hints.contains(&"Words: 2 · Letters: 4".to_string()));
    }

    #[test]
    fn test_make_hints_has_two_structural_and_a_tip() {
        let mut rng = StdRng::seed_from_u64(2);
        let hints = make_hints("An echo", Category::Logic, &mut rng);
        assert_eq!(hints.len(), 3);
        assert!(category_tips(Category::Logic).contains(&hints[2].as_str()));
    }

    #[test]
    fn test_make_hints_without_letters() {
        let mut rng = StdRng::seed_from_u64(3);
        let hints = make_hints("42", Category::Math, &mut rng);
        // Only "Words: 1" is derivable
        assert_eq!(hints.len(), 2);
        assert_eq!(hints[0], "Words: 1");

        let hints = make_hints("   ", Category::General, &mut rng);
        assert_eq!(hints.len(), 1);
    }
}
