// src/core/html.rs
//! Tolerant HTML tree + a small CSS selector engine.
//!
//! The source pages are served as loose HTML. The parser never fails: it
//! builds whatever tree the markup implies, closes unmatched elements at the
//! nearest matching ancestor, ends an open `p`/`li`/`option`/row/cell when
//! the next one of its kind starts, ignores stray end tags, and keeps
//! `<script>`/`<style>` bodies as raw text. Tree walks use explicit stacks,
//! so nesting depth is bounded only by memory.
//!
//! Supported selector subset (enough for the page specs):
//! `tag`, `*`, `.class`, `#id`, `[attr]`, `[attr='v']`, `:contains('text')`,
//! descendant (space), child (`>`), adjacent sibling (`+`) and lists (`,`).

use thiserror::Error;

use super::sanitize::normalize_entities;

pub type NodeId = usize;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
];
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// (opening tags, open elements they end, open elements that stop the search)
const IMPLIED_END: &[(&[&str], &[&str], &[&str])] = &[
    (&["p"], &["p"], &["div", "section", "article", "li", "td", "th", "table", "button", "body"]),
    (&["li"], &["li"], &["ul", "ol", "menu"]),
    (&["option"], &["option"], &["select", "datalist", "optgroup"]),
    (&["tr"], &["tr", "td", "th"], &["table", "tbody", "thead", "tfoot"]),
    (&["td", "th"], &["td", "th"], &["tr", "table"]),
    (&["dt", "dd"], &["dt", "dd"], &["dl"]),
];

#[derive(Debug)]
enum NodeData {
    Root,
    Element { name: String, attrs: Vec<(String, String)> },
    Text(String),
}

#[derive(Debug)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Parsed document. Node 0 is always the synthetic root.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Case-insensitive find for ASCII needles.
fn find_ci(hay: &str, needle: &str) -> Option<usize> {
    let h = hay.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || h.len() < n.len() {
        return None;
    }
    (0..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

impl Document {
    pub fn parse(html: &str) -> Self {
        let mut doc = Document {
            nodes: vec![Node { data: NodeData::Root, parent: None, children: Vec::new() }],
        };
        let mut stack: Vec<NodeId> = vec![0];
        let mut pos = 0usize;

        while pos < html.len() {
            let parent = *stack.last().unwrap_or(&0);
            let Some(rel) = html[pos..].find('<') else {
                doc.push_text(parent, &html[pos..], true);
                break;
            };
            let lt = pos + rel;
            if lt > pos {
                doc.push_text(parent, &html[pos..lt], true);
            }
            let rest = &html[lt..];

            if rest.starts_with("<!--") {
                pos = rest.find("-->").map_or(html.len(), |e| lt + e + 3);
                continue;
            }
            if rest.starts_with("<!") || rest.starts_with("<?") {
                pos = rest.find('>').map_or(html.len(), |e| lt + e + 1);
                continue;
            }
            if let Some(after) = rest.strip_prefix("</") {
                let Some(end) = after.find('>') else { break };
                let name = to_lower(after[..end].trim());
                // Stray end tags are dropped; a matching open element closes
                // everything opened inside it.
                if let Some(i) = stack.iter().rposition(|&id| doc.tag(id) == Some(name.as_str())) {
                    if i > 0 {
                        stack.truncate(i);
                    }
                }
                pos = lt + 2 + end + 1;
                continue;
            }
            if !rest[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
                doc.push_text(parent, "<", false);
                pos = lt + 1;
                continue;
            }

            let Some((tag, consumed)) = parse_start_tag(rest) else {
                doc.push_text(parent, rest, true);
                break;
            };
            pos = lt + consumed;
            doc.close_implied(&mut stack, &tag.name);
            let parent = *stack.last().unwrap_or(&0);
            let is_void = VOID_ELEMENTS.contains(&tag.name.as_str());
            let is_raw = RAW_TEXT_ELEMENTS.contains(&tag.name.as_str());
            let close = format!("</{}", tag.name);
            let id = doc.push_element(parent, tag.name, tag.attrs);

            if is_raw {
                let end = find_ci(&html[pos..], &close).map_or(html.len(), |e| pos + e);
                doc.push_text(id, &html[pos..end], false);
                pos = html[end..].find('>').map_or(html.len(), |e| end + e + 1);
                continue;
            }
            if !tag.self_closing && !is_void {
                stack.push(id);
            }
        }
        doc
    }

    pub fn root(&self) -> ElementRef<'_> {
        ElementRef { doc: self, id: 0 }
    }

    pub fn select(&self, selector: &Selector) -> Vec<ElementRef<'_>> {
        self.root().select(selector)
    }

    fn push_text(&mut self, parent: NodeId, raw: &str, decode: bool) {
        if raw.is_empty() {
            return;
        }
        let text = if decode { normalize_entities(raw) } else { s!(raw) };
        let id = self.nodes.len();
        self.nodes.push(Node { data: NodeData::Text(text), parent: Some(parent), children: Vec::new() });
        self.nodes[parent].children.push(id);
    }

    fn push_element(&mut self, parent: NodeId, name: String, attrs: Vec<(String, String)>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            data: NodeData::Element { name, attrs },
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id].data {
            NodeData::Element { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    fn attr(&self, id: NodeId, key: &str) -> Option<&str> {
        match &self.nodes[id].data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    fn is_element(&self, id: NodeId) -> bool {
        matches!(self.nodes[id].data, NodeData::Element { .. })
    }

    /// An open `p`, `li`, `option`, row or cell ends where the next one of
    /// its kind starts, unless a containing list, table or block comes first.
    fn close_implied(&self, stack: &mut Vec<NodeId>, opening: &str) {
        let Some(&(_, closes, boundary)) = IMPLIED_END.iter().find(|(t, ..)| t.contains(&opening)) else {
            return;
        };
        let mut cut = None;
        for i in (1..stack.len()).rev() {
            let Some(open) = self.tag(stack[i]) else { continue };
            if boundary.contains(&open) {
                break;
            }
            if closes.contains(&open) {
                cut = Some(i);
            }
        }
        if let Some(i) = cut {
            stack.truncate(i);
        }
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let mut pending = vec![id];
        while let Some(n) = pending.pop() {
            match &self.nodes[n].data {
                NodeData::Text(t) => out.push_str(t),
                _ => pending.extend(self.nodes[n].children.iter().rev()),
            }
        }
    }

    fn text_of(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn prev_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.nodes[id].parent?;
        let siblings = &self.nodes[parent].children;
        let at = siblings.iter().position(|&c| c == id)?;
        siblings[..at].iter().rev().copied().find(|&c| self.is_element(c))
    }

    fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.nodes[id].parent?;
        let siblings = &self.nodes[parent].children;
        let at = siblings.iter().position(|&c| c == id)?;
        siblings[at + 1..].iter().copied().find(|&c| self.is_element(c))
    }

    /// Element descendants in document order.
    fn descendants(&self, id: NodeId, out: &mut Vec<NodeId>) {
        let mut pending: Vec<NodeId> = self.nodes[id].children.iter().rev().copied().collect();
        while let Some(c) = pending.pop() {
            if self.is_element(c) {
                out.push(c);
                pending.extend(self.nodes[c].children.iter().rev());
            }
        }
    }
}

struct StartTag {
    name: String,
    attrs: Vec<(String, String)>,
    self_closing: bool,
}

/// Parse `<name attr=... >` at the start of `s`. Returns the tag and the
/// number of bytes consumed, or None if the tag never closes.
fn parse_start_tag(s: &str) -> Option<(StartTag, usize)> {
    let b = s.as_bytes();
    let mut i = 1;
    while i < b.len() && !b[i].is_ascii_whitespace() && b[i] != b'>' && b[i] != b'/' {
        i += 1;
    }
    let name = to_lower(&s[1..i]);
    let mut attrs = Vec::new();

    loop {
        while i < b.len() && b[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= b.len() {
            return None;
        }
        match b[i] {
            b'>' => return Some((StartTag { name, attrs, self_closing: false }, i + 1)),
            b'/' if b.get(i + 1) == Some(&b'>') => {
                return Some((StartTag { name, attrs, self_closing: true }, i + 2));
            }
            b'/' => {
                i += 1;
                continue;
            }
            _ => {}
        }

        let key_start = i;
        while i < b.len() && !b[i].is_ascii_whitespace() && !matches!(b[i], b'=' | b'>' | b'/') {
            i += 1;
        }
        let key = to_lower(&s[key_start..i]);
        while i < b.len() && b[i].is_ascii_whitespace() {
            i += 1;
        }
        if i < b.len() && b[i] == b'=' {
            i += 1;
            while i < b.len() && b[i].is_ascii_whitespace() {
                i += 1;
            }
            let value = match b.get(i) {
                Some(&q) if q == b'"' || q == b'\'' => {
                    let end = s[i + 1..].find(q as char)? + i + 1;
                    let v = &s[i + 1..end];
                    i = end + 1;
                    v
                }
                Some(_) => {
                    let start = i;
                    while i < b.len() && !b[i].is_ascii_whitespace() && b[i] != b'>' {
                        i += 1;
                    }
                    &s[start..i]
                }
                None => return None,
            };
            attrs.push((key, normalize_entities(value)));
        } else if !key.is_empty() {
            attrs.push((key, s!()));
        }
    }
}

/* ---------------- Element handle ---------------- */

#[derive(Clone, Copy, Debug)]
pub struct ElementRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl PartialEq for ElementRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl<'a> ElementRef<'a> {
    pub fn name(&self) -> &'a str {
        self.doc.tag(self.id).unwrap_or("")
    }

    pub fn attr(&self, key: &str) -> Option<&'a str> {
        self.doc.attr(self.id, key)
    }

    /// Concatenated text of all descendant text nodes, untrimmed.
    pub fn text(&self) -> String {
        self.doc.text_of(self.id)
    }

    /// Text of the direct child nodes, skipping child elements whose tag is
    /// listed in `skip`.
    pub fn own_text_excluding(&self, skip: &[&str]) -> String {
        let mut out = String::new();
        for &c in &self.doc.nodes[self.id].children {
            if let Some(tag) = self.doc.tag(c) {
                if skip.contains(&tag) {
                    continue;
                }
            }
            self.doc.collect_text(c, &mut out);
        }
        out
    }

    /// Text of the first child node (text or element), if any.
    pub fn first_child_text(&self) -> Option<String> {
        self.doc.nodes[self.id].children.first().map(|&c| self.doc.text_of(c))
    }

    pub fn next_element_sibling(&self) -> Option<ElementRef<'a>> {
        self.doc.next_element_sibling(self.id).map(|id| ElementRef { doc: self.doc, id })
    }

    /// Whether this element itself matches `selector`, checked against the
    /// whole document.
    pub fn is(&self, selector: &Selector) -> bool {
        selector.matches(self.doc, self.id, 0)
    }

    /// Descendant elements matching `selector`, in document order. Ancestor
    /// and sibling conditions are only checked inside this element.
    pub fn select(&self, selector: &Selector) -> Vec<ElementRef<'a>> {
        let mut all = Vec::new();
        self.doc.descendants(self.id, &mut all);
        all.into_iter()
            .filter(|&n| selector.matches(self.doc, n, self.id))
            .map(|id| ElementRef { doc: self.doc, id })
            .collect()
    }
}

/* ---------------- Selectors ---------------- */

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected '{found}' at offset {at} in selector `{selector}`")]
    Unexpected { selector: String, found: char, at: usize },
    #[error("unterminated {what} in selector `{selector}`")]
    Unterminated { selector: String, what: &'static str },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
    Adjacent,
}

#[derive(Clone, Debug, Default)]
struct Compound {
    tag: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
    contains: Vec<String>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.classes.is_empty() && self.attrs.is_empty() && self.contains.is_empty()
    }

    fn matches(&self, doc: &Document, id: NodeId) -> bool {
        let Some(tag) = doc.tag(id) else { return false };
        if let Some(t) = &self.tag {
            if t != "*" && t != tag {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let class_attr = doc.attr(id, "class").unwrap_or("");
            if !self.classes.iter().all(|c| class_attr.split_ascii_whitespace().any(|x| x == c)) {
                return false;
            }
        }
        for (name, value) in &self.attrs {
            match (doc.attr(id, name), value) {
                (None, _) => return false,
                (Some(v), Some(want)) if v != want => return false,
                _ => {}
            }
        }
        if !self.contains.is_empty() {
            let text = doc.text_of(id);
            if !self.contains.iter().all(|c| text.contains(c.as_str())) {
                return false;
            }
        }
        true
    }
}

/// One comma-free selector; `parts[i].0` relates `parts[i - 1]` to `parts[i]`.
#[derive(Clone, Debug)]
struct Complex {
    parts: Vec<(Combinator, Compound)>,
}

#[derive(Clone, Debug)]
pub struct Selector {
    alternatives: Vec<Complex>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        SelectorParser { src: input, chars: input.char_indices().collect(), pos: 0 }.parse()
    }

    fn matches(&self, doc: &Document, id: NodeId, scope: NodeId) -> bool {
        self.alternatives
            .iter()
            .any(|c| match_from(doc, &c.parts, c.parts.len() - 1, id, scope))
    }
}

fn match_from(doc: &Document, parts: &[(Combinator, Compound)], idx: usize, id: NodeId, scope: NodeId) -> bool {
    let (comb, compound) = &parts[idx];
    if !compound.matches(doc, id) {
        return false;
    }
    if idx == 0 {
        return true;
    }
    match comb {
        Combinator::Child => match doc.nodes[id].parent {
            Some(p) if id != scope => match_from(doc, parts, idx - 1, p, scope),
            _ => false,
        },
        Combinator::Descendant => {
            let mut cur = id;
            while cur != scope {
                let Some(p) = doc.nodes[cur].parent else { return false };
                if match_from(doc, parts, idx - 1, p, scope) {
                    return true;
                }
                cur = p;
            }
            false
        }
        Combinator::Adjacent => {
            if id == scope {
                return false;
            }
            doc.prev_element_sibling(id)
                .is_some_and(|prev| match_from(doc, parts, idx - 1, prev, scope))
        }
    }
}

struct SelectorParser<'s> {
    src: &'s str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl SelectorParser<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, c)| c)
    }

    fn unexpected(&self, found: char) -> SelectorError {
        let at = self.chars.get(self.pos).map_or(self.src.len(), |&(i, _)| i);
        SelectorError::Unexpected { selector: s!(self.src), found, at }
    }

    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn ident(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                out.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        out
    }

    /// Quoted or bare argument, up to (not including) `stop`.
    fn argument(&mut self, stop: char, what: &'static str) -> Result<String, SelectorError> {
        self.skip_ws();
        let mut out = String::new();
        match self.peek() {
            Some(q @ ('\'' | '"')) => {
                self.pos += 1;
                loop {
                    match self.peek() {
                        Some(c) if c == q => { self.pos += 1; break; }
                        Some(c) => { out.push(c); self.pos += 1; }
                        None => return Err(SelectorError::Unterminated { selector: s!(self.src), what }),
                    }
                }
                self.skip_ws();
            }
            _ => {
                while let Some(c) = self.peek() {
                    if c == stop { break; }
                    out.push(c);
                    self.pos += 1;
                }
                out = s!(out.trim_end());
            }
        }
        if self.peek() != Some(stop) {
            return Err(SelectorError::Unterminated { selector: s!(self.src), what });
        }
        self.pos += 1;
        Ok(out)
    }

    fn compound(&mut self) -> Result<Compound, SelectorError> {
        let mut c = Compound::default();
        if self.peek() == Some('*') {
            self.pos += 1;
            c.tag = Some(s!("*"));
        } else {
            let tag = self.ident();
            if !tag.is_empty() {
                c.tag = Some(to_lower(&tag));
            }
        }
        loop {
            match self.peek() {
                Some('.') => {
                    self.pos += 1;
                    let class = self.ident();
                    if class.is_empty() { return Err(self.unexpected('.')); }
                    c.classes.push(class);
                }
                Some('#') => {
                    self.pos += 1;
                    let id = self.ident();
                    if id.is_empty() { return Err(self.unexpected('#')); }
                    c.attrs.push((s!("id"), Some(id)));
                }
                Some('[') => {
                    self.pos += 1;
                    self.skip_ws();
                    let name = to_lower(&self.ident());
                    if name.is_empty() {
                        return Err(self.unexpected(self.peek().unwrap_or(']')));
                    }
                    self.skip_ws();
                    match self.peek() {
                        Some(']') => { self.pos += 1; c.attrs.push((name, None)); }
                        Some('=') => {
                            self.pos += 1;
                            let v = self.argument(']', "attribute selector")?;
                            c.attrs.push((name, Some(v)));
                        }
                        Some(other) => return Err(self.unexpected(other)),
                        None => return Err(SelectorError::Unterminated { selector: s!(self.src), what: "attribute selector" }),
                    }
                }
                Some(':') => {
                    self.pos += 1;
                    let pseudo = self.ident();
                    if pseudo != "contains" || self.peek() != Some('(') {
                        return Err(self.unexpected(':'));
                    }
                    self.pos += 1;
                    let text = self.argument(')', ":contains()")?;
                    c.contains.push(text);
                }
                _ => break,
            }
        }
        Ok(c)
    }

    fn parse(mut self) -> Result<Selector, SelectorError> {
        let mut alternatives = Vec::new();
        let mut parts: Vec<(Combinator, Compound)> = Vec::new();
        let mut pending: Option<Combinator> = None;

        loop {
            let saw_ws = self.skip_ws();
            match self.peek() {
                None => break,
                Some(',') => {
                    if parts.is_empty() || pending.is_some() { return Err(self.unexpected(',')); }
                    self.pos += 1;
                    alternatives.push(Complex { parts: std::mem::take(&mut parts) });
                    continue;
                }
                Some(sym @ ('>' | '+')) => {
                    if parts.is_empty() || pending.is_some() { return Err(self.unexpected(sym)); }
                    self.pos += 1;
                    pending = Some(if sym == '>' { Combinator::Child } else { Combinator::Adjacent });
                    continue;
                }
                Some(_) => {}
            }
            let comb = match pending.take() {
                Some(c) => c,
                None if !parts.is_empty() && saw_ws => Combinator::Descendant,
                None if parts.is_empty() => Combinator::Descendant,
                None => return Err(self.unexpected(self.peek().unwrap_or(' '))),
            };
            let compound = self.compound()?;
            if compound.is_empty() {
                return Err(self.unexpected(self.peek().unwrap_or(' ')));
            }
            parts.push((comb, compound));
        }

        if pending.is_some() {
            return Err(SelectorError::Unterminated { selector: s!(self.src), what: "combinator" });
        }
        if !parts.is_empty() {
            alternatives.push(Complex { parts });
        }
        if alternatives.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(Selector { alternatives })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(doc: &Document, sel: &str) -> Vec<String> {
        let sel = Selector::parse(sel).unwrap();
        doc.select(&sel).iter().map(|e| e.text().trim().to_string()).collect()
    }

    #[test]
    fn parses_loose_markup() {
        let doc = Document::parse(r#"<div class="a b"><p>one<br>two</p><img src=x.png><span>three</div><!-- gone --></span>"#);
        assert_eq!(texts(&doc, "div"), vec!["onetwothree"]);
        assert_eq!(texts(&doc, "div.b > p"), vec!["onetwo"]);
        let img = Selector::parse("img").unwrap();
        assert_eq!(doc.select(&img)[0].attr("src"), Some("x.png"));
    }

    #[test]
    fn raw_text_elements_do_not_nest() {
        let doc = Document::parse("<script>if (a < b) { x = '<div>'; }</script><div>real</div>");
        assert_eq!(texts(&doc, "div"), vec!["real"]);
    }

    #[test]
    fn descendant_child_and_adjacent() {
        let doc = Document::parse(
            r#"<section class="s"><div><a>deep</a></div><a>direct</a></section>
               <div class="row"><div class="name">Taste</div><div class="stars"><i class="on"></i><i class="on"></i><i></i></div></div>"#,
        );
        assert_eq!(texts(&doc, "section a"), vec!["deep", "direct"]);
        assert_eq!(texts(&doc, "section.s > a"), vec!["direct"]);
        let on = Selector::parse(".name:contains('Taste') + div.stars .on").unwrap();
        assert_eq!(doc.select(&on).len(), 2);
        let off = Selector::parse(".name:contains('Decor') + div.stars .on").unwrap();
        assert!(doc.select(&off).is_empty());
    }

    #[test]
    fn attribute_selectors() {
        let doc = Document::parse(r#"<span itemprop="priceRange"><a>$101-200</a></span><span itemprop=other>x</span>"#);
        assert_eq!(texts(&doc, "[itemprop='priceRange'] > a"), vec!["$101-200"]);
        assert_eq!(texts(&doc, "[itemprop]").len(), 2);
        assert_eq!(texts(&doc, r#"span[itemprop="other"]"#), vec!["x"]);
    }

    #[test]
    fn selector_lists_keep_document_order() {
        let doc = Document::parse("<b>1</b><i>2</i><b>3</b>");
        assert_eq!(texts(&doc, "i, b"), vec!["1", "2", "3"]);
    }

    #[test]
    fn scoped_select_does_not_escape_scope() {
        let doc = Document::parse(r#"<div class="outer"><div class="review"><a>in</a></div></div>"#);
        let review = doc.select(&Selector::parse(".review").unwrap())[0];
        let sel = Selector::parse(".outer a").unwrap();
        assert!(review.select(&sel).is_empty());
        assert_eq!(doc.select(&sel).len(), 1);
    }

    #[test]
    fn own_text_skips_listed_children() {
        let doc = Document::parse(r#"<div class="c">Great <a>link</a>food<br><img>!</div>"#);
        let c = doc.select(&Selector::parse(".c").unwrap())[0];
        assert_eq!(c.own_text_excluding(&["a", "br", "img"]), "Great food!");
        assert_eq!(c.first_child_text().as_deref(), Some("Great "));
    }

    #[test]
    fn unclosed_siblings_end_implicitly() {
        let doc = Document::parse("<ul><li>a<ul><li>b<li>c</ul><li>d</ul><p>one<p>two</p><div><p>three<p>four</div>");
        assert_eq!(texts(&doc, "ul > li").len(), 4);
        assert_eq!(texts(&doc, "li li"), vec!["b", "c"]);
        assert_eq!(texts(&doc, "p"), vec!["one", "two", "three", "four"]);
        assert!(texts(&doc, "p p").is_empty());
        assert_eq!(texts(&doc, "div > p"), vec!["three", "four"]);

        let doc = Document::parse("<table><tr><td>1<td>2<tr><td>3</table><select><option>x<option>y</select>");
        assert_eq!(texts(&doc, "table > tr").len(), 2);
        assert_eq!(texts(&doc, "tr > td"), vec!["1", "2", "3"]);
        assert_eq!(texts(&doc, "select > option"), vec!["x", "y"]);
    }

    #[test]
    fn huge_unclosed_pages_stay_shallow() {
        let doc = Document::parse(&"<p>x".repeat(100_000));
        let p = Selector::parse("p").unwrap();
        let all = doc.select(&p);
        assert_eq!(all.len(), 100_000);
        assert_eq!(all[99_999].text(), "x");
    }

    #[test]
    fn deep_nesting_does_not_recurse() {
        let html = format!("{}deep", "<div>".repeat(100_000));
        let doc = Document::parse(&html);
        assert_eq!(doc.root().text(), "deep");
        assert_eq!(doc.select(&Selector::parse("div").unwrap()).len(), 100_000);
    }

    #[test]
    fn sibling_and_self_matching() {
        let doc = Document::parse(r#"<div class="row"><span class="name">A</span>text<div class="stars"></div></div>"#);
        let name = doc.select(&Selector::parse(".name").unwrap())[0];
        let next = name.next_element_sibling().unwrap();
        assert!(next.is(&Selector::parse("div.stars").unwrap()));
        assert!(!name.is(&Selector::parse("div").unwrap()));
        assert!(next.next_element_sibling().is_none());
    }

    #[test]
    fn bad_selectors_are_rejected() {
        assert!(matches!(Selector::parse("  "), Err(SelectorError::Empty)));
        assert!(Selector::parse("div >").is_err());
        assert!(Selector::parse("[attr='x'").is_err());
        assert!(Selector::parse(":hover").is_err());
    }
}
