//! UI language selection and string lookup

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Chinese,
}

impl Language {
    /// The other language (toggle key)
    pub fn toggled(self) -> Self {
        match self {
            Language::English => Language::Chinese,
            Language::Chinese => Language::English,
        }
    }
}

/// String table lookup, provided by the host
pub trait Localizer {
    fn lookup(&self, language: Language, key: &str) -> Option<String>;

    /// Lookup with the key itself as fallback
    fn text(&self, language: Language, key: &str) -> String {
        self.lookup(language, key).unwrap_or_else(|| key.to_string())
    }
}

/// Built-in table covering every key the scenes use
#[derive(Debug, Clone)]
pub struct BuiltinLocalizer {
    table: HashMap<(Language, &'static str), &'static str>,
}

const ENTRIES: &[(&str, &str, &str)] = &[
    ("title", "Space Plane", "太空战机"),
    ("pressStart", "Press SPACE to start", "按 空格 键开始游戏"),
    ("score", "Score: ", "得分: "),
    ("paused", "PAUSED", "暂停"),
    ("endScore", "Your score: ", "你的得分: "),
    ("gameOver", "GAME OVER", "游戏结束"),
    ("inputName", "Enter your name", "请输入你的名字"),
    ("ensureName", "Press ENTER to confirm", "按回车键确认"),
    ("scoreList", "Leaderboard", "得分榜"),
    ("restartGame", "Press J to restart", "按 J 键重新开始游戏"),
];

impl Default for BuiltinLocalizer {
    fn default() -> Self {
        let mut table = HashMap::with_capacity(ENTRIES.len() * 2);
        for &(key, en, zh) in ENTRIES {
            table.insert((Language::English, key), en);
            table.insert((Language::Chinese, key), zh);
        }
        Self { table }
    }
}

impl Localizer for BuiltinLocalizer {
    fn lookup(&self, language: Language, key: &str) -> Option<String> {
        self.table.get(&(language, key)).map(|s| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(Language::English.toggled(), Language::Chinese);
        assert_eq!(Language::English.toggled().toggled(), Language::English);
    }

    #[test]
    fn test_lookup_and_fallback() {
        let loc = BuiltinLocalizer::default();
        assert_eq!(loc.text(Language::English, "paused"), "PAUSED");
        assert_eq!(loc.text(Language::Chinese, "paused"), "暂停");
        assert_eq!(loc.text(Language::English, "missingKey"), "missingKey");
    }
}
