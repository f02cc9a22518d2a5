//! Property-based tests: chunk folding.

use proptest::prelude::*;
use wenxin_types::GenerationChunk;

proptest! {
    #[test]
    fn fold_equals_concatenation(parts in proptest::collection::vec(any::<String>(), 1..16)) {
        let folded = parts
            .iter()
            .cloned()
            .map(GenerationChunk::new)
            .reduce(|acc, c| acc + c)
            .unwrap();
        prop_assert_eq!(folded.text, parts.concat());
        prop_assert!(folded.generation_info.is_none());
    }

    #[test]
    fn fold_is_associative(a in ".*", b in ".*", c in ".*") {
        let left = (GenerationChunk::new(a.clone()) + GenerationChunk::new(b.clone()))
            + GenerationChunk::new(c.clone());
        let right = GenerationChunk::new(a)
            + (GenerationChunk::new(b) + GenerationChunk::new(c));
        prop_assert_eq!(left, right);
    }
}
