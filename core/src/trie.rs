//! Prefix trie over the spellings of a scheme, for longest-match tokenizing.
use ahash::AHashMap;

use crate::scheme::Category;

/// Position of a grapheme inside its scheme: category plus list index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub category: Category,
    pub index: usize,
}

impl Slot {
    pub fn new(category: Category, index: usize) -> Self {
        Self { category, index }
    }
}

/// A piece of tokenized text. `slot` is `None` for characters the scheme
/// does not spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub slot: Option<Slot>,
}

impl Token<'_> {
    pub fn category(&self) -> Option<Category> {
        self.slot.map(|slot| slot.category)
    }

    /// True if the token is the grapheme at `index` of `category`.
    pub fn is(&self, category: Category, index: usize) -> bool {
        self.slot == Some(Slot { category, index })
    }

    pub fn is_consonant(&self) -> bool {
        self.category().is_some_and(Category::is_consonant)
    }
}

/// Trie mapping every spelling a scheme accepts to its [`Slot`].
///
/// # Example
/// ```
/// use sanscript_core::{Category, GraphemeTrie, Slot};
///
/// let mut trie = GraphemeTrie::new();
/// trie.insert("k", Slot::new(Category::Consonants, 0));
/// trie.insert("kh", Slot::new(Category::Consonants, 1));
///
/// assert_eq!(trie.longest_match("kha"), Some((2, Slot::new(Category::Consonants, 1))));
/// assert_eq!(trie.longest_match("ka"), Some((1, Slot::new(Category::Consonants, 0))));
/// assert_eq!(trie.longest_match("a"), None);
/// ```
#[derive(Debug, Default)]
pub struct GraphemeTrie {
    root: TrieNode,
    len: usize,
    max_depth: usize,
}

#[derive(Debug, Default)]
struct TrieNode {
    children: AHashMap<char, Box<TrieNode>>,
    slot: Option<Slot>,
}

impl GraphemeTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a spelling. The first slot stored for a spelling is kept;
    /// returns `false` if the spelling was already present.
    pub fn insert(&mut self, spelling: &str, slot: Slot) -> bool {
        if spelling.is_empty() {
            return false;
        }
        let mut node = &mut self.root;
        let mut depth = 0;
        for ch in spelling.chars() {
            node = node.children.entry(ch).or_default();
            depth += 1;
        }
        if node.slot.is_some() {
            return false;
        }
        node.slot = Some(slot);
        self.len += 1;
        self.max_depth = self.max_depth.max(depth);
        true
    }

    /// Slot of an exact spelling.
    pub fn get(&self, spelling: &str) -> Option<Slot> {
        let mut node = &self.root;
        for ch in spelling.chars() {
            node = node.children.get(&ch)?;
        }
        node.slot
    }

    /// Longest stored spelling that prefixes `text`, as (byte length, slot).
    pub fn longest_match(&self, text: &str) -> Option<(usize, Slot)> {
        let mut node = &self.root;
        let mut best = None;
        for (offset, ch) in text.char_indices() {
            match node.children.get(&ch) {
                Some(child) => node = child,
                None => break,
            }
            if let Some(slot) = node.slot {
                best = Some((offset + ch.len_utf8(), slot));
            }
        }
        best
    }

    /// Split `text` into longest-match tokens.
    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        let mut rest = text;
        while let Some(ch) = rest.chars().next() {
            let (len, slot) = match self.longest_match(rest) {
                Some((len, slot)) => (len, Some(slot)),
                None => (ch.len_utf8(), None),
            };
            tokens.push(Token {
                text: &rest[..len],
                slot,
            });
            rest = &rest[len..];
        }
        tokens
    }

    /// Number of stored spellings.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Length in characters of the longest stored spelling.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consonant(index: usize) -> Slot {
        Slot::new(Category::Consonants, index)
    }

    #[test]
    fn first_insert_wins() {
        let mut trie = GraphemeTrie::new();
        assert!(trie.insert("க", consonant(0)));
        assert!(!trie.insert("க", consonant(1)));
        assert_eq!(trie.get("க"), Some(consonant(0)));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn prefix_is_not_a_match() {
        let mut trie = GraphemeTrie::new();
        trie.insert("kSh", consonant(34));
        assert_eq!(trie.get("kS"), None);
        assert_eq!(trie.longest_match("kSa"), None);
    }

    #[test]
    fn tokenize_keeps_unknown_characters() {
        let mut trie = GraphemeTrie::new();
        trie.insert("k", consonant(0));
        trie.insert("kh", consonant(1));
        trie.insert("a", Slot::new(Category::Vowels, 0));

        let tokens = trie.tokenize("kha#k");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, ["kh", "a", "#", "k"]);
        assert_eq!(tokens[2].slot, None);
        assert!(tokens[0].is_consonant());
        assert!(tokens[1].is(Category::Vowels, 0));
    }

    #[test]
    fn multibyte_spellings() {
        let mut trie = GraphemeTrie::new();
        trie.insert("क्ष", consonant(34));
        trie.insert("क", consonant(0));
        assert_eq!(trie.max_depth(), 3);
        let (len, slot) = trie.longest_match("क्षा").unwrap();
        assert_eq!(&"क्षा"[..len], "क्ष");
        assert_eq!(slot, consonant(34));
    }
}
