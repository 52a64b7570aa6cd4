//! Outline tree: chapters, sections, subsections.

use super::ordering::{self, compare_section_ids};
use serde::{Deserialize, Serialize};

/// Deepest level of the outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SubsectionRepr")]
pub struct Subsection {
    pub title: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SubsectionRepr {
    Title(String),
    Full { title: String },
}

impl From<SubsectionRepr> for Subsection {
    fn from(repr: SubsectionRepr) -> Self {
        match repr {
            SubsectionRepr::Title(title) | SubsectionRepr::Full { title } => Self { title },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SectionRepr")]
pub struct Section {
    pub title: String,
    pub subsections: Vec<Subsection>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SectionRepr {
    Title(String),
    Full {
        title: String,
        #[serde(default)]
        subsections: Vec<Subsection>,
    },
}

impl From<SectionRepr> for Section {
    fn from(repr: SectionRepr) -> Self {
        match repr {
            SectionRepr::Title(title) => Self {
                title,
                subsections: Vec::new(),
            },
            SectionRepr::Full { title, subsections } => Self { title, subsections },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ChapterRepr")]
pub struct Chapter {
    pub title: String,
    pub sections: Vec<Section>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChapterRepr {
    Title(String),
    Full {
        title: String,
        #[serde(default)]
        sections: Vec<Section>,
    },
}

impl From<ChapterRepr> for Chapter {
    fn from(repr: ChapterRepr) -> Self {
        match repr {
            ChapterRepr::Title(title) => Self {
                title,
                sections: Vec::new(),
            },
            ChapterRepr::Full { title, sections } => Self { title, sections },
        }
    }
}

impl Subsection {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subsections: Vec::new(),
        }
    }

    pub fn with_subsection(mut self, title: impl Into<String>) -> Self {
        self.subsections.push(Subsection::new(title));
        self
    }
}

impl Chapter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }
}

/// One node of the outline, addressed by its dot path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// "1", "1.2" or "1.2.3"
    pub id: String,
    pub title: String,
    /// 1 = chapter, 2 = section, 3 = subsection
    pub level: usize,
    /// Title of the enclosing entry
    pub parent_title: Option<String>,
}

/// A book's table of contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Outline {
    pub chapters: Vec<Chapter>,
}

impl Outline {
    pub fn new(chapters: Vec<Chapter>) -> Self {
        Self { chapters }
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    /// Every node flattened with its dot-path id, in numeric order
    pub fn entries(&self) -> Vec<OutlineEntry> {
        let mut entries = Vec::new();
        for (c, chapter) in self.chapters.iter().enumerate() {
            let chapter_id = (c + 1).to_string();
            entries.push(OutlineEntry {
                id: chapter_id.clone(),
                title: chapter.title.clone(),
                level: 1,
                parent_title: None,
            });
            for (s, section) in chapter.sections.iter().enumerate() {
                let section_id = format!("{}.{}", chapter_id, s + 1);
                entries.push(OutlineEntry {
                    id: section_id.clone(),
                    title: section.title.clone(),
                    level: 2,
                    parent_title: Some(chapter.title.clone()),
                });
                for (k, subsection) in section.subsections.iter().enumerate() {
                    entries.push(OutlineEntry {
                        id: format!("{}.{}", section_id, k + 1),
                        title: subsection.title.clone(),
                        level: 3,
                        parent_title: Some(section.title.clone()),
                    });
                }
            }
        }
        entries.sort_by(|a, b| compare_section_ids(&a.id, &b.id));
        entries
    }

    /// Look up one entry by id
    pub fn entry(&self, id: &str) -> Option<OutlineEntry> {
        let id = id.trim();
        self.entries().into_iter().find(|e| e.id == id)
    }

    /// Titles of the entries that precede `id` under the same parent
    pub fn previous_sibling_titles(&self, id: &str) -> Vec<String> {
        let id = id.trim();
        let parent = ordering::parent_id(id);
        let level = ordering::depth(id);

        self.entries()
            .into_iter()
            .filter(|e| e.level == level && ordering::parent_id(&e.id) == parent)
            .filter(|e| compare_section_ids(&e.id, id).is_lt())
            .map(|e| e.title)
            .collect()
    }

    /// Total number of sections across chapters
    pub fn section_count(&self) -> usize {
        self.chapters.iter().map(|c| c.sections.len()).sum()
    }
}
