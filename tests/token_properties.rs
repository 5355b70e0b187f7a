//! Property tests for the tokenizer and merge heuristic

use iguana::core::config::ButtonScheme;
use iguana::movelist::{detokenize, merge, tokenize};
use proptest::prelude::*;

const ATOMS: &[&str] = &[
    "B", "DB", "D", "DF", "F", "UF", "U", "UB", "a", "b", "c", "x", "y", "z", "s",
];

fn render_atom(atom: &str) -> String {
    match atom {
        "B" | "DB" | "D" | "DF" | "F" | "UF" | "U" | "UB" => format!("_{}", atom),
        button => format!("^{}", button.to_uppercase()),
    }
}

proptest! {
    #[test]
    fn tokenize_is_total(input in "[ -~]{0,64}", compress in any::<bool>()) {
        let tokens = tokenize(&input, compress);
        let _ = detokenize(&tokens, ButtonScheme::Letters);
        let _ = detokenize(&tokens, ButtonScheme::Strike);
    }

    #[test]
    fn uncompressed_round_trip(atoms in prop::collection::vec(prop::sample::select(ATOMS), 0..12)) {
        let notation = atoms.join(", ");
        let expected: String = atoms.iter().map(|a| render_atom(a)).collect();
        let tokens = tokenize(&notation, false);
        prop_assert_eq!(detokenize(&tokens, ButtonScheme::Letters), expected);
    }

    #[test]
    fn one_token_per_atom(atoms in prop::collection::vec(prop::sample::select(ATOMS), 0..12)) {
        let notation = atoms.join(",");
        prop_assert_eq!(tokenize(&notation, false).chars().count(), atoms.len());
    }

    #[test]
    fn merge_of_one_is_identity(s in "\\PC{0,24}") {
        prop_assert_eq!(merge(&[s.clone()]), s);
    }

    #[test]
    fn merge_of_mirrored_pair_is_first(s in "[0-9a-z+]{1,12}") {
        let reversed: String = s.chars().rev().collect();
        prop_assert_eq!(merge(&[s.clone(), reversed]), s);
    }
}
