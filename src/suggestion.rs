// src/suggestion.rs
// "Did you mean" suggestions for input that is not a known command.

const MAX_SUGGESTIONS: usize = 3;
const MIN_SIMILARITY: f64 = 0.7;

/// Every command keyword the parser understands.
pub const COMMAND_KEYWORDS: &[&str] = &[
    "start",
    "init",
    "bye",
    "bank-account",
    "list bank trackers",
    "check-balance",
    "deposit",
    "withdraw",
    "delete bank-account",
    "goal",
    "list goals",
    "delete goal",
    "commit goal",
    "done goal",
    "find#",
    "add income",
    "spent",
    "split",
    "settle",
    "list all income",
    "list all expenditure",
    "list month income",
    "list month expenditure",
    "check income",
    "check expenditure",
    "delete income",
    "delete expenditure",
    "graph",
    "undo",
    "add instalment",
    "delete instalment",
    "list all instalments",
    "lent",
    "borrowed",
    "list all loans",
    "list incoming loans",
    "list outgoing loans",
    "paid",
    "received",
    "delete loan",
];

/// Keywords that look like the start of `input`, most similar first.
pub fn suggest_commands(input: &str) -> Vec<&'static str> {
    let words: Vec<&str> = input.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(&'static str, f64)> = COMMAND_KEYWORDS
        .iter()
        .map(|&keyword| {
            let width = keyword.split_whitespace().count().min(words.len());
            let head = words[..width].join(" ");
            (keyword, strsim::jaro_winkler(&head, keyword))
        })
        .filter(|(_, similarity)| *similarity > MIN_SIMILARITY)
        .collect();

    scored.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(keyword, _)| keyword)
        .collect()
}
