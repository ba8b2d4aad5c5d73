//! Class label table for ImageNet-style models.
//!
//! Loaded from a `labels.txt` next to the model: one label per line, in
//! class-index order. Blank lines and surrounding whitespace are dropped.

use std::path::Path;

/// Ordered class labels, indexed by model output position.
#[derive(Debug, Clone)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    /// Load labels from a `labels.txt` file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("read {}: {e}", path.display()))?;
        let table = Self::parse(&text);
        anyhow::ensure!(
            !table.is_empty(),
            "no labels found in {}",
            path.display()
        );
        Ok(table)
    }

    /// Parse labels from text, one per line.
    pub fn parse(text: &str) -> Self {
        let labels = text
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        Self { labels }
    }

    /// Label for a class index, if known.
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.labels.get(idx).map(|s| s.as_str())
    }

    /// Label for a class index, falling back to `"class <idx>"`.
    pub fn get_or_index(&self, idx: usize) -> String {
        match self.get(idx) {
            Some(label) => label.to_string(),
            None => format!("class {idx}"),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_blank_lines_and_trims() {
        let table = LabelTable::parse("tench\n\n  goldfish  \ngreat white shark\n");
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(1), Some("goldfish"));
    }

    #[test]
    fn get_out_of_range_is_none() {
        let table = LabelTable::parse("tench\n");
        assert!(table.get(1).is_none());
    }

    #[test]
    fn get_or_index_falls_back() {
        let table = LabelTable::parse("tench\n");
        assert_eq!(table.get_or_index(0), "tench");
        assert_eq!(table.get_or_index(7), "class 7");
    }

    #[test]
    fn empty_text_yields_empty_table() {
        let table = LabelTable::parse("\n\n");
        assert!(table.is_empty());
    }
}
