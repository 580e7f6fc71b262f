//! Fits command output into Discord's embed limits.
//!
//! Discord rejects the whole reply when any limit is exceeded, so long lists
//! are split across several embeds. Whatever still does not fit in one message
//! is dropped and counted in a footer on the last embed.

use poise::serenity_prelude as serenity;

/// Fields allowed in a single embed.
pub const MAX_FIELDS_PER_EMBED: usize = 25;
/// Embeds allowed in a single message.
pub const MAX_EMBEDS_PER_MESSAGE: usize = 10;
/// Characters allowed in an embed title.
pub const MAX_TITLE_CHARS: usize = 256;
/// Characters allowed in a field name.
pub const MAX_FIELD_NAME_CHARS: usize = 256;
/// Characters allowed in a field value.
pub const MAX_FIELD_VALUE_CHARS: usize = 1024;
/// Characters allowed in an embed description.
pub const MAX_DESCRIPTION_CHARS: usize = 4096;
/// Characters allowed in plain message content.
pub const MAX_CONTENT_CHARS: usize = 2000;
/// Characters allowed across all embeds of one message.
pub const MAX_MESSAGE_CHARS: usize = 6000;
/// Part of the message budget kept free for the overflow footer.
const FOOTER_RESERVE: usize = 64;

/// Shortens `text` to at most `max_chars` characters, ending with `…` when cut.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// One embed field, already cut to Discord's limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Bold heading of the field
    pub name: String,
    /// Body text, never empty
    pub value: String,
}

impl Field {
    /// Builds a field, truncating long text and filling an empty value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        let value = if value.trim().is_empty() {
            "\u{200b}".to_string()
        } else {
            truncate(&value, MAX_FIELD_VALUE_CHARS)
        };
        Self {
            name: truncate(&name.into(), MAX_FIELD_NAME_CHARS),
            value,
        }
    }

    fn char_len(&self) -> usize {
        self.name.chars().count() + self.value.chars().count()
    }
}

/// A titled group of fields, such as one menu category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Title for every embed the section spans
    pub title: String,
    /// Fields in display order
    pub fields: Vec<Field>,
}

impl Section {
    /// Creates a section.
    #[must_use]
    pub fn new(title: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            title: title.into(),
            fields,
        }
    }
}

/// One embed worth of fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedPage {
    /// Embed title
    pub title: String,
    /// At most [`MAX_FIELDS_PER_EMBED`] fields
    pub fields: Vec<Field>,
}

/// Sections laid out into embeds that fit one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbedPlan {
    /// Embeds to send, at most [`MAX_EMBEDS_PER_MESSAGE`]
    pub pages: Vec<EmbedPage>,
    /// Fields that did not fit
    pub omitted: usize,
}

impl EmbedPlan {
    /// Lays `sections` out in order. Once something does not fit, it and
    /// every later field are counted as omitted.
    #[must_use]
    pub fn build(sections: Vec<Section>) -> Self {
        let budget = MAX_MESSAGE_CHARS - FOOTER_RESERVE;
        let mut plan = Self::default();
        let mut used = 0;
        let mut full = false;

        for section in sections {
            let title = truncate(&section.title, MAX_TITLE_CHARS);
            let title_len = title.chars().count();
            let mut section_page_open = false;

            for field in section.fields {
                if full {
                    plan.omitted += 1;
                    continue;
                }

                let needs_page = !section_page_open
                    || plan
                        .pages
                        .last()
                        .is_some_and(|page| page.fields.len() >= MAX_FIELDS_PER_EMBED);
                let cost = field.char_len() + if needs_page { title_len } else { 0 };

                if (needs_page && plan.pages.len() >= MAX_EMBEDS_PER_MESSAGE)
                    || used + cost > budget
                {
                    full = true;
                    plan.omitted += 1;
                    continue;
                }

                if needs_page {
                    plan.pages.push(EmbedPage {
                        title: title.clone(),
                        fields: Vec::new(),
                    });
                    section_page_open = true;
                }
                used += cost;
                if let Some(page) = plan.pages.last_mut() {
                    page.fields.push(field);
                }
            }
        }
        plan
    }

    /// Whether nothing was laid out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total characters the embeds will carry, excluding the footer.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.pages
            .iter()
            .map(|page| {
                page.title.chars().count() + page.fields.iter().map(Field::char_len).sum::<usize>()
            })
            .sum()
    }

    /// Renders the plan, adding an `…and N more` footer when fields were dropped.
    #[must_use]
    pub fn into_embeds(self, color: u32) -> Vec<serenity::CreateEmbed> {
        let last = self.pages.len().saturating_sub(1);
        let omitted = self.omitted;

        self.pages
            .into_iter()
            .enumerate()
            .map(|(index, page)| {
                let embed = serenity::CreateEmbed::default()
                    .title(page.title)
                    .color(color)
                    .fields(
                        page.fields
                            .into_iter()
                            .map(|field| (field.name, field.value, false)),
                    );
                if index == last && omitted > 0 {
                    embed.footer(serenity::CreateEmbedFooter::new(format!(
                        "…and {omitted} more"
                    )))
                } else {
                    embed
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(count: usize, value_len: usize) -> Vec<Field> {
        (0..count)
            .map(|i| Field::new(format!("Item {i}"), "x".repeat(value_len)))
            .collect()
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        let cut = truncate("abcdefghij", 5);
        assert_eq!(cut, "abcd…");
        assert_eq!(cut.chars().count(), 5);
        // Multi-byte characters are counted, not bytes
        assert_eq!(truncate("ééééé", 3), "éé…");
    }

    #[test]
    fn test_field_limits() {
        let field = Field::new("n".repeat(300), "v".repeat(2000));
        assert_eq!(field.name.chars().count(), MAX_FIELD_NAME_CHARS);
        assert_eq!(field.value.chars().count(), MAX_FIELD_VALUE_CHARS);
        assert!(field.value.ends_with('…'));

        let empty = Field::new("Soup", "");
        assert_eq!(empty.value, "\u{200b}");
    }

    #[test]
    fn test_section_splits_after_25_fields() {
        let plan = EmbedPlan::build(vec![Section::new("Entrées", fields(26, 10))]);
        assert_eq!(plan.pages.len(), 2);
        assert_eq!(plan.pages[0].fields.len(), MAX_FIELDS_PER_EMBED);
        assert_eq!(plan.pages[1].fields.len(), 1);
        assert_eq!(plan.pages[1].title, "Entrées");
        assert_eq!(plan.omitted, 0);
    }

    #[test]
    fn test_each_section_starts_a_new_embed() {
        let plan = EmbedPlan::build(vec![
            Section::new("Entrées", fields(2, 10)),
            Section::new("Empty", Vec::new()),
            Section::new("Desserts", fields(1, 10)),
        ]);
        let titles: Vec<&str> = plan.pages.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Entrées", "Desserts"]);
    }

    #[test]
    fn test_message_budget_is_respected() {
        let plan = EmbedPlan::build(vec![Section::new("Entrées", fields(30, 400))]);
        assert!(plan.omitted > 0);
        assert_eq!(plan.pages.iter().map(|p| p.fields.len()).sum::<usize>() + plan.omitted, 30);
        assert!(plan.char_len() <= MAX_MESSAGE_CHARS - FOOTER_RESERVE);
    }

    #[test]
    fn test_embed_count_is_capped() {
        let sections = (0..12)
            .map(|i| Section::new(format!("Section {i}"), fields(1, 5)))
            .collect();
        let plan = EmbedPlan::build(sections);
        assert_eq!(plan.pages.len(), MAX_EMBEDS_PER_MESSAGE);
        assert_eq!(plan.omitted, 2);
    }

    #[test]
    fn test_later_fields_are_dropped_once_full() {
        // The first section fills the budget, so the small one after it is dropped too
        let plan = EmbedPlan::build(vec![
            Section::new("Big", fields(20, 1000)),
            Section::new("Small", fields(1, 1)),
        ]);
        assert!(plan.pages.iter().all(|p| p.title == "Big"));
        assert_eq!(plan.pages.iter().map(|p| p.fields.len()).sum::<usize>() + plan.omitted, 21);
    }
}
