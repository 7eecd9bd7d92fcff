use std::collections::HashSet;
use serde::{Serialize, Deserialize};

use crate::error::StoryError;

/// One full-viewport page of the story
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageInfo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
}

impl PageInfo {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: String::new(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }
}

/// Ordered, immutable sequence of pages. Never empty.
#[derive(Debug, Clone)]
pub struct PageSet {
    pages: Vec<PageInfo>,
}

impl PageSet {
    pub fn new(pages: Vec<PageInfo>) -> Result<Self, StoryError> {
        if pages.is_empty() {
            return Err(StoryError::EmptyStory);
        }
        let mut seen = HashSet::new();
        for page in &pages {
            if !seen.insert(page.id.as_str()) {
                return Err(StoryError::DuplicatePageId(page.id.clone()));
            }
        }
        Ok(Self { pages })
    }

    /// Anonymous pages `page-0..page-{count-1}`, as discovered from a document
    pub fn with_count(count: usize) -> Result<Self, StoryError> {
        Self::new(
            (0..count)
                .map(|idx| PageInfo::new(format!("page-{}", idx), format!("Page {}", idx + 1)))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.pages.len() - 1
    }

    pub fn get(&self, idx: usize) -> Option<&PageInfo> {
        self.pages.get(idx)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.pages.iter().position(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageInfo> {
        self.pages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_page_set_rejected() {
        assert!(matches!(PageSet::new(Vec::new()), Err(StoryError::EmptyStory)));
        assert!(matches!(PageSet::with_count(0), Err(StoryError::EmptyStory)));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let pages = vec![PageInfo::new("a", "A"), PageInfo::new("a", "Again")];
        assert!(matches!(PageSet::new(pages), Err(StoryError::DuplicatePageId(id)) if id == "a"));
    }

    #[test]
    fn test_lookup() {
        let pages = PageSet::with_count(3).unwrap();
        assert_eq!(pages.last_index(), 2);
        assert_eq!(pages.index_of("page-1"), Some(1));
        assert_eq!(pages.get(2).map(|p| p.title.as_str()), Some("Page 3"));
        assert!(pages.get(3).is_none());
    }
}
