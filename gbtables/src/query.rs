//! Minimal lookup interface over a parsed opcode page, so that table extraction doesn't depend
//! on a particular HTML library.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

/// Lookups needed to extract an opcode table from a document.
pub trait DocumentQuery {
    /// Handle to an element of the document.
    type Element<'a>
    where
        Self: 'a;

    /// Finds the first element with the given tag name and id.
    fn find_by_id(&self, tag: &str, id: &str) -> Option<Self::Element<'_>>;

    /// Finds the first element below `parent` with the given tag name which carries `class`.
    fn find_marked<'a>(
        &'a self,
        parent: &Self::Element<'a>,
        tag: &str,
        class: &str,
    ) -> Option<Self::Element<'a>>;

    /// Concatenated text content of the element.
    fn text<'a>(&'a self, element: &Self::Element<'a>) -> String;
}

static WITH_ID: Lazy<Selector> =
    Lazy::new(|| Selector::parse("[id]").expect("attribute selector is valid"));

impl DocumentQuery for Html {
    type Element<'a> = ElementRef<'a>;

    fn find_by_id(&self, tag: &str, id: &str) -> Option<ElementRef<'_>> {
        self.select(&WITH_ID)
            .find(|el| el.value().name() == tag && el.value().id() == Some(id))
    }

    fn find_marked<'a>(
        &'a self,
        parent: &ElementRef<'a>,
        tag: &str,
        class: &str,
    ) -> Option<ElementRef<'a>> {
        parent
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == tag && el.value().classes().any(|c| c == class))
    }

    fn text<'a>(&'a self, element: &ElementRef<'a>) -> String {
        element.text().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<div id="op-00">not a cell</div>
<table><tr>
<td id="op-00"><span class="mnemonic"> NOP </span><br><span class="bytes">1</span></td>
<td id="op-d3"><span class="illegal">-</span></td>
<td id="op-cb11"><div><span class="op mnemonic">RL <b>C</b></span></div></td>
</tr></table>
</body></html>"#;

    #[test]
    fn finds_cell_by_tag_and_id() {
        let doc = Html::parse_document(PAGE);
        let cell = doc.find_by_id("td", "op-00").unwrap();
        assert_eq!(cell.value().name(), "td");
        assert!(doc.find_by_id("td", "op-01").is_none());
        assert!(doc.find_by_id("span", "op-00").is_none());
    }

    #[test]
    fn finds_nested_marker_and_text() {
        let doc = Html::parse_document(PAGE);

        let cell = doc.find_by_id("td", "op-00").unwrap();
        let mnemonic = doc.find_marked(&cell, "span", "mnemonic").unwrap();
        assert_eq!(doc.text(&mnemonic), " NOP ");

        let cell = doc.find_by_id("td", "op-cb11").unwrap();
        let mnemonic = doc.find_marked(&cell, "span", "mnemonic").unwrap();
        assert_eq!(doc.text(&mnemonic), "RL C");
    }

    #[test]
    fn missing_marker() {
        let doc = Html::parse_document(PAGE);
        let cell = doc.find_by_id("td", "op-d3").unwrap();
        assert!(doc.find_marked(&cell, "span", "mnemonic").is_none());
    }
}
