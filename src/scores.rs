//! High-score table
//!
//! A bounded list of `{name, score}` entries kept sorted from best to worst
//! and stored on disk as a JSON array, rewritten wholesale on every save.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Cap used for tables read back from disk
pub const LOADED_MAX_SCORES: usize = 5;

/// One entry of the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub name: String,
    pub score: u32,
}

impl Score {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scores {
    max_scores: usize,
    scores: Vec<Score>,
}

impl Scores {
    /// Keep the best `max_scores` of `scores`
    pub fn new(max_scores: usize, mut scores: Vec<Score>) -> Self {
        sort_descending(&mut scores);
        scores.truncate(max_scores);
        Self { max_scores, scores }
    }

    /// Table shipped with a fresh install
    pub fn default_table(max_scores: usize) -> Self {
        Self::new(
            max_scores,
            vec![
                Score::new("Joe", 100),
                Score::new("Jack", 80),
                Score::new("Averell", 60),
                Score::new("William", 40),
            ],
        )
    }

    pub fn max_scores(&self) -> usize {
        self.max_scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Score> {
        self.scores.iter()
    }

    /// Worst score still in the table
    pub fn lowest(&self) -> Option<&Score> {
        self.scores.last()
    }

    /// Whether `score` would make it into the table
    pub fn is_highscore(&self, score: u32) -> bool {
        if self.scores.len() < self.max_scores {
            return true;
        }
        self.lowest().is_some_and(|lowest| score > lowest.score)
    }

    /// Insert `entry` if it is a high score, evicting the lowest at capacity
    pub fn add_score(&mut self, entry: Score) -> bool {
        if !self.is_highscore(entry.score) {
            return false;
        }

        if self.scores.len() >= self.max_scores {
            self.scores.pop();
        }
        self.scores.push(entry);
        sort_descending(&mut self.scores);
        true
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json =
            serde_json::to_string_pretty(&self.scores).context("Failed to serialize scores")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write scores to {:?}", path))?;

        info!(path = ?path, entries = self.scores.len(), "saved high scores");
        Ok(())
    }

    /// Read a saved table.
    ///
    /// The cap is always [`LOADED_MAX_SCORES`], whatever cap the table had
    /// when it was saved.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scores from {:?}", path))?;
        let scores: Vec<Score> =
            serde_json::from_str(&json).context("Failed to deserialize scores")?;

        Ok(Self::new(LOADED_MAX_SCORES, scores))
    }

    /// Load `path`, or start from [`Scores::default_table`] if it does not exist yet
    pub fn load_or_default(path: &Path, max_scores: usize) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default_table(max_scores))
        }
    }
}

/// Best first; ties keep their insertion order
fn sort_descending(scores: &mut [Score]) {
    scores.sort_by(|a, b| b.score.cmp(&a.score));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn values(scores: &Scores) -> Vec<u32> {
        scores.iter().map(|s| s.score).collect()
    }

    #[test]
    fn test_new_sorts_and_caps() {
        let scores = Scores::new(
            2,
            vec![Score::new("a", 1), Score::new("b", 30), Score::new("c", 20)],
        );
        assert_eq!(values(&scores), vec![30, 20]);
    }

    #[test]
    fn test_default_table() {
        let scores = Scores::default_table(5);
        assert_eq!(values(&scores), vec![100, 80, 60, 40]);
        assert_eq!(scores.iter().next().map(|s| s.name.as_str()), Some("Joe"));
    }

    #[test]
    fn test_is_highscore() {
        let scores = Scores::default_table(5);
        // Room left: anything qualifies
        assert!(scores.is_highscore(0));

        let full = Scores::default_table(4);
        assert!(!full.is_highscore(40));
        assert!(full.is_highscore(41));

        let none = Scores::new(0, Vec::new());
        assert!(!none.is_highscore(1000));
    }

    #[test]
    fn test_add_score_keeps_cap_and_order() {
        let mut scores = Scores::default_table(5);

        assert!(scores.add_score(Score::new("Lucky", 70)));
        assert_eq!(values(&scores), vec![100, 80, 70, 60, 40]);

        assert!(scores.add_score(Score::new("Rantanplan", 90)));
        assert_eq!(values(&scores), vec![100, 90, 80, 70, 60]);
        assert_eq!(scores.len(), 5);

        assert!(!scores.add_score(Score::new("Ma", 60)));
        assert_eq!(values(&scores), vec![100, 90, 80, 70, 60]);

        for score in [5, 500, 61, 1, 99] {
            scores.add_score(Score::new("x", score));
            assert!(scores.len() <= 5);
            assert!(values(&scores).windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut scores = Scores::new(3, Vec::new());
        scores.add_score(Score::new("first", 10));
        scores.add_score(Score::new("second", 10));
        let names: Vec<&str> = scores.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scores.json");

        let mut scores = Scores::default_table(5);
        scores.add_score(Score::new("Lucky", 70));
        scores.save(&path).unwrap();

        let loaded = Scores::load(&path).unwrap();
        assert_eq!(loaded, scores);
    }

    #[test]
    fn test_load_always_caps_at_five() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scores.json");

        let mut scores = Scores::new(8, Vec::new());
        for score in 1..=8 {
            scores.add_score(Score::new("p", score * 10));
        }
        scores.save(&path).unwrap();

        let loaded = Scores::load(&path).unwrap();
        assert_eq!(loaded.max_scores(), LOADED_MAX_SCORES);
        assert_eq!(values(&loaded), vec![80, 70, 60, 50, 40]);

        let small = Scores::new(2, vec![Score::new("a", 1)]);
        small.save(&path).unwrap();
        assert_eq!(Scores::load(&path).unwrap().max_scores(), LOADED_MAX_SCORES);
    }

    #[test]
    fn test_file_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("scores.json");

        Scores::new(5, vec![Score::new("Joe", 100)]).save(&path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw, serde_json::json!([{ "name": "Joe", "score": 100 }]));
    }

    #[test]
    fn test_load_or_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        let scores = Scores::load_or_default(&path, 3).unwrap();
        assert_eq!(values(&scores), vec![100, 80, 60]);

        std::fs::write(&path, "not json").unwrap();
        assert!(Scores::load_or_default(&path, 3).is_err());
    }
}
