//! Seed prompts that open each collaboration

/// Templates for the first user message of a run
pub struct PromptTemplate;

impl PromptTemplate {
    /// Seed prompt for title generation
    pub fn title_seed(topic: &str) -> String {
        format!("Let's collaborate on a title for a book about: {}", topic)
    }

    /// Seed prompt for table of contents generation
    pub fn toc_seed(title: &str, topic: &str, min_chapters: usize, max_chapters: usize) -> String {
        format!(
            "Let's collaborate on a detailed table of contents for a book titled '{}' \
             about {}. The book should have between {} and {} chapters, each with 2-5 \
             sections. Structure the TOC in a clear format that can be parsed as JSON, \
             with chapters and sections.",
            title, topic, min_chapters, max_chapters
        )
    }

    /// Seed prompt for section content generation
    pub fn section_seed(
        book_title: &str,
        section_id: &str,
        section_title: &str,
        parent_title: Option<&str>,
        previous_section_titles: &[String],
        min_words: usize,
        max_words: usize,
    ) -> String {
        let mut prompt = format!(
            "Let's collaborate on writing the content for section '{}' (section {}) of the book '{}'. ",
            section_title, section_id, book_title
        );

        if let Some(parent) = parent_title {
            prompt.push_str(&format!("This section is part of the chapter '{}'. ", parent));
        }

        prompt.push_str(&format!(
            "The content should be between {} and {} words, well-structured, informative, \
             and engaging. Focus on providing valuable content for the reader.",
            min_words, max_words
        ));

        if !previous_section_titles.is_empty() {
            prompt.push_str("\n\nPrevious sections in this chapter:\n- ");
            prompt.push_str(&previous_section_titles.join("\n- "));
        }

        prompt
    }
}
