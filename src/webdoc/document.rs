//! The flat element list of a page.

use super::{Element, Text, TextBlock, TextDocument};

/// A simplified view of the page: its logical elements in document order.
#[derive(Debug, Clone, Default)]
pub struct Document<'a> {
    pub elements: Vec<Element<'a>>,
}

impl<'a> Document<'a> {
    /// Concatenated output of every content element.
    #[must_use]
    pub fn generate_output(&self, text_only: bool) -> String {
        let mut output = String::new();
        for element in self.elements.iter().filter(|e| e.is_content()) {
            output.push_str(&element.generate_output(text_only));
            if text_only {
                output.push('\n');
            }
        }
        output
    }

    /// Groups consecutive texts sharing a group number into blocks.
    ///
    /// Labels are moved from the texts onto their blocks.
    pub fn create_text_document(&mut self) -> TextDocument<'a> {
        let mut blocks = Vec::new();
        let mut current: Vec<(usize, &mut Text<'a>)> = Vec::new();
        let mut previous_group = None;

        for (index, element) in self.elements.iter_mut().enumerate() {
            let Element::Text(text) = element else {
                continue;
            };
            if previous_group.is_some_and(|g| g != text.group_number) && !current.is_empty() {
                blocks.push(TextBlock::new(std::mem::take(&mut current)));
            }
            previous_group = Some(text.group_number);
            current.push((index, text));
        }
        if !current.is_empty() {
            blocks.push(TextBlock::new(current));
        }

        TextDocument::new(blocks)
    }

    /// Image URLs of every content image, figure and table.
    #[must_use]
    pub fn image_urls(&self) -> Vec<String> {
        let mut urls = Vec::new();
        for element in self.elements.iter().filter(|e| e.is_content()) {
            match element {
                Element::Image(image) => urls.extend(image.urls()),
                Element::Figure(figure) => urls.extend(figure.urls()),
                Element::Table(table) => urls.extend(table.image_urls()),
                _ => {}
            }
        }
        urls
    }
}
