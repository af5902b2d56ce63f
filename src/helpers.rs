use strsim::levenshtein;

/// Find the most similar name from a list of candidates.
///
/// Only names within two edits are suggested.
pub fn find_similar_name<'a>(target: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|candidate| (*candidate, levenshtein(target, candidate)))
        .filter(|(_, distance)| *distance <= 2)
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}
