use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub text: String,
    pub similarity: f64,
    pub index: usize,
}

/// Renders ranked results as the labelled context block the generation prompts cite.
///
/// Each result becomes `[Context n]\n<text>` (1-based), separated by `\n\n---\n\n`.
pub fn build_context(results: &[RetrievalResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, r)| format!("[Context {}]\n{}", i + 1, r.text))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(text: &str, similarity: f64, index: usize) -> RetrievalResult {
        RetrievalResult {
            text: text.to_string(),
            similarity,
            index,
        }
    }

    #[test]
    fn test_build_context_empty() {
        assert_eq!(build_context(&[]), "");
    }

    #[test]
    fn test_build_context_labels_in_rank_order() {
        let results = vec![result("Refunds take 5 days.", 0.9, 4), result("Shipping is free.", 0.7, 1)];

        assert_eq!(
            build_context(&results),
            "[Context 1]\nRefunds take 5 days.\n\n---\n\n[Context 2]\nShipping is free."
        );
    }
}
