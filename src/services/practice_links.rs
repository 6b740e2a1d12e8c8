use crate::models::form::DsaLevel;

pub const BEGINNER_PRACTICE_URL: &str =
    "https://www.geeksforgeeks.org/top-50-dsa-problems-for-beginners/";
pub const MEDIUM_PRACTICE_URL: &str = "https://leetcode.com/problemset/all/?difficulty=MEDIUM";
pub const HARD_PRACTICE_URL: &str = "https://leetcode.com/problemset/all/?difficulty=HARD";

const PRACTICE_LINKS: [(&str, &str); 3] = [
    ("beginner", BEGINNER_PRACTICE_URL),
    ("medium", MEDIUM_PRACTICE_URL),
    ("hard", HARD_PRACTICE_URL),
];

/// Practice problem list for a difficulty level, or "" for anything unrecognised
pub fn resolve_practice_link(level: &str) -> &'static str {
    PRACTICE_LINKS
        .iter()
        .find(|(name, _)| *name == level)
        .map(|(_, url)| *url)
        .unwrap_or("")
}

pub fn practice_link_for(level: Option<DsaLevel>) -> &'static str {
    level.map(|level| resolve_practice_link(level.as_str())).unwrap_or("")
}
