use dom_distiller::converter::DomConverter;
use dom_distiller::dom::{self, NodeRef};
use dom_distiller::extractor::ArticleExtractor;
use dom_distiller::filter::document::NestedElementRetainer;
use dom_distiller::filter::heuristic::{DocumentTitleMatch, SimilarSiblingContent};
use dom_distiller::filter::simple::BoilerplateBlock;
use dom_distiller::filter::{DocumentFilter, TextBlockFilter};
use dom_distiller::label::Label;
use dom_distiller::table::{self, Reason, TableType};
use dom_distiller::webdoc::{Document, Element, TagType, TextDocument};
use dom_distiller::word_counter::WordCounterKind;

fn root(dom: &dom::Document) -> NodeRef<'_> {
    dom.select("html").nodes()[0]
}

fn web_document(dom: &dom::Document) -> Document<'_> {
    DomConverter::new(None).convert(root(dom), Box::new(WordCounterKind::Fast))
}

fn content_flags(doc: &TextDocument) -> Vec<bool> {
    doc.text_blocks.iter().map(|b| b.is_content()).collect()
}

fn paragraph(word: &str, n: usize) -> String {
    let words: Vec<String> = (0..n).map(|i| format!("{word}{i}")).collect();
    format!("<p>{}.</p>", words.join(" "))
}

const MIXED_PAGE: &str = r#"<html><body>
    <ul><li><a href="/">Home</a></li><li><a href="/n">News</a> and more</li></ul>
    <div><p>Short intro.</p><p>A <a href="/x">linked phrase</a> inside a sentence of plain words.</p></div>
    <blockquote>Quoted text that goes on for a little while longer than the rest.</blockquote>
    <div><a href="/a">Only</a> <a href="/b">links</a></div>
    </body></html>"#;

#[test]
fn link_density_is_bounded() {
    let dom = dom::parse(MIXED_PAGE);
    let mut document = web_document(&dom);
    let doc = document.create_text_document();

    assert!(!doc.text_blocks.is_empty());
    for block in &doc.text_blocks {
        assert!((0.0..=1.0).contains(&block.link_density), "{}", block.link_density);
        if block.num_words == 0 {
            assert!(block.link_density.abs() < f64::EPSILON);
        }
    }
}

#[test]
fn boilerplate_removal_is_idempotent() {
    let dom = dom::parse(MIXED_PAGE);
    let mut document = web_document(&dom);
    let mut doc = document.create_text_document();
    doc.text_blocks[1].set_is_content(true);
    doc.text_blocks[3].set_is_content(true);

    let filter = BoilerplateBlock::new(None);
    filter.process(&mut doc);
    let once: Vec<String> = doc.text_blocks.iter().map(|b| b.text.clone()).collect();
    assert!(!filter.process(&mut doc));
    let twice: Vec<String> = doc.text_blocks.iter().map(|b| b.text.clone()).collect();

    assert_eq!(once, twice);
    assert!(content_flags(&doc).iter().all(|&c| c));
}

#[test]
fn pipeline_never_adds_blocks() {
    let html = format!(
        "<html><body><ul><li><a href=\"/\">Home</a></li></ul><div>{}{}</div>\
         <ol><li>A closing list item</li></ol><div><a href=\"/c\">Contact</a></div></body></html>",
        paragraph("alpha", 60),
        paragraph("beta", 30)
    );
    let dom = dom::parse(&html);
    let mut document = web_document(&dom);
    let mut doc = document.create_text_document();
    let before = doc.text_blocks.len();

    ArticleExtractor::new(&WordCounterKind::Fast, &[]).extract(&mut doc);
    assert!(doc.text_blocks.len() <= before);
    assert!(doc.text_blocks.iter().any(|b| b.is_content()));
}

#[test]
fn role_grid_table_is_data_even_with_one_row() {
    let dom = dom::parse(r#"<table role="grid"><tbody><tr><td>a</td></tr></tbody></table>"#);
    let node = dom.select("table").nodes()[0];
    assert_eq!(table::classify(&node), (TableType::Data, Reason::RoleTable));
}

#[test]
fn single_row_table_is_layout() {
    let dom = dom::parse("<table><tbody><tr><td>a</td></tr></tbody></table>");
    let node = dom.select("table").nodes()[0];
    assert_eq!(table::classify(&node).0, TableType::Layout);
}

#[test]
fn title_after_site_name_is_labelled() {
    let dom = dom::parse("<html><body><h1>My Great Article</h1><p>Body text of the page.</p></body></html>");
    let mut document = web_document(&dom);
    let mut doc = document.create_text_document();
    let titles = vec!["Breaking News | My Great Article".to_string()];

    assert!(DocumentTitleMatch::new(&WordCounterKind::Fast, &titles).process(&mut doc));
    assert!(doc.text_blocks[0].has_label(Label::Title));
    assert!(!doc.text_blocks[1].has_label(Label::Title));
}

#[test]
fn similar_sibling_becomes_content() {
    let dom = dom::parse("<html><body><div><div>text</div><div>text</div></div></body></html>");
    let mut document = web_document(&dom);
    let mut doc = document.create_text_document();
    doc.text_blocks[0].set_is_content(true);

    let filter = SimilarSiblingContent {
        max_block_distance: 3,
        ..SimilarSiblingContent::default()
    };
    assert!(filter.process(&mut doc));
    assert_eq!(content_flags(&doc), vec![true, true]);
}

#[test]
fn nested_element_markers_stay_balanced() {
    let html = format!(
        "<html><body><blockquote><ul><li>{}</li><li>{}</li></ul></blockquote><pre>code</pre></body></html>",
        paragraph("alpha", 10),
        paragraph("beta", 10)
    );
    let dom = dom::parse(&html);
    let mut document = web_document(&dom);
    let mut doc = document.create_text_document();
    for block in &mut doc.text_blocks {
        if block.text.contains("alpha") {
            block.set_is_content(true);
        }
    }
    doc.apply_to_model(&mut document);
    NestedElementRetainer.process(&mut document);

    let mut depth = 0i32;
    for element in &document.elements {
        if let Element::Tag(tag) = element {
            if !tag.is_content {
                continue;
            }
            match tag.tag_type {
                TagType::Start => depth += 1,
                TagType::End => depth -= 1,
            }
            assert!(depth >= 0);
        }
    }
    assert_eq!(depth, 0);

    let output = document.generate_output(false);
    assert!(output.contains("<blockquote>"));
    assert!(output.contains("</blockquote>"));
    assert!(!output.contains("<pre>"));
}
