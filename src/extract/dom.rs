// src/extract/dom.rs

use scraper::{ElementRef, Html};

/// The slice of an element tree the extractor needs: tag name, text, and the
/// elements nested inside it in document order.
pub trait DomNode: Copy {
    /// Tag name of the element (`h2`, `table`, `td`, ...).
    fn kind(&self) -> &str;

    /// All text nodes under this element, in document order, untouched.
    fn text_fragments(&self) -> Vec<&str>;

    /// Every element strictly inside this one, pre-order.
    fn inner_elements(&self) -> Vec<Self>;

    fn is(&self, kind: &str) -> bool {
        self.kind().eq_ignore_ascii_case(kind)
    }

    /// Text exactly as it appears in the document.
    fn raw_text(&self) -> String {
        self.text_fragments().concat()
    }

    /// Each fragment trimmed, blanks dropped, the rest glued together.
    fn trimmed_text(&self) -> String {
        self.text_fragments()
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl<'a> DomNode for ElementRef<'a> {
    fn kind(&self) -> &str {
        self.value().name()
    }

    fn text_fragments(&self) -> Vec<&str> {
        self.text().collect()
    }

    fn inner_elements(&self) -> Vec<Self> {
        self.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .collect()
    }
}

/// A document flattened into its elements in document order, so "the next X
/// after Y" becomes an index scan.
#[derive(Debug, Clone)]
pub struct DocumentOrder<N> {
    nodes: Vec<N>,
}

impl<N: DomNode> DocumentOrder<N> {
    pub fn from_root(root: N) -> Self {
        let mut nodes = vec![root];
        nodes.extend(root.inner_elements());
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First element at or after `start` matching `pred`.
    pub fn find_from<P>(&self, start: usize, mut pred: P) -> Option<(usize, N)>
    where
        P: FnMut(&N) -> bool,
    {
        self.nodes
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, n)| pred(n))
            .map(|(i, n)| (i, *n))
    }

    /// First element strictly after `index` matching `pred`.
    pub fn find_after<P>(&self, index: usize, pred: P) -> Option<(usize, N)>
    where
        P: FnMut(&N) -> bool,
    {
        self.find_from(index + 1, pred)
    }
}

impl<'a> DocumentOrder<ElementRef<'a>> {
    pub fn of_document(html: &'a Html) -> Self {
        Self::from_root(html.root_element())
    }
}
