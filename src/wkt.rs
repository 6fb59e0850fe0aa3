// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Recognizer for well-known-text geometry encodings.
//!
//! The literal type sniffer only needs to decide whether a literal *is* a
//! geometry, so this is a recognizer, not a reader: it validates the shape
//! of the text without building coordinates. Keyword matching alone is not
//! enough (`POINTER` must not pass), hence the small scanner.

struct Scanner<'a> {
    rest: &'a str,
}

const KEYWORDS: [&str; 7] = [
    "GEOMETRYCOLLECTION",
    "MULTILINESTRING",
    "MULTIPOLYGON",
    "MULTIPOINT",
    "LINESTRING",
    "POLYGON",
    "POINT",
];

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Scanner { rest: text }
    }

    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn eat(&mut self, c: char) -> bool {
        if let Some(r) = self.rest.strip_prefix(c) {
            self.rest = r;
            true
        } else {
            false
        }
    }

    fn eat_keyword_ci(&mut self, kw: &str) -> bool {
        let Some(head) = self.rest.get(..kw.len()) else {
            return false;
        };
        if !head.eq_ignore_ascii_case(kw) {
            return false;
        }
        // Reject a longer identifier that merely starts with the keyword.
        let tail = self.rest[kw.len()..].chars().next();
        if matches!(tail, Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            return false;
        }
        self.rest = &self.rest[kw.len()..];
        true
    }

    fn tagged_geometry(&mut self) -> bool {
        self.skip_ws();
        let mut matched = None;
        for keyword in KEYWORDS {
            if self.eat_keyword_ci(keyword) {
                matched = Some(keyword);
                break;
            }
        }
        let Some(kw) = matched else {
            return false;
        };
        self.skip_ws();
        // Optional dimension qualifier.
        for q in ["ZM", "Z", "M"] {
            if self.eat_keyword_ci(q) {
                self.skip_ws();
                break;
            }
        }
        if self.eat_keyword_ci("EMPTY") {
            return true;
        }
        if kw == "GEOMETRYCOLLECTION" {
            self.collection_body()
        } else {
            self.coordinate_body()
        }
    }

    /// `( geometry [, geometry]* )`
    fn collection_body(&mut self) -> bool {
        if !self.eat('(') {
            return false;
        }
        loop {
            if !self.tagged_geometry() {
                return false;
            }
            self.skip_ws();
            if self.eat(',') {
                continue;
            }
            return self.eat(')');
        }
    }

    /// Balanced parentheses containing only numbers, commas and nested
    /// parentheses. At least one number must appear.
    fn coordinate_body(&mut self) -> bool {
        if !self.eat('(') {
            return false;
        }
        let mut depth = 1usize;
        let mut saw_digit = false;
        let mut chars = self.rest.char_indices();
        for (i, c) in &mut chars {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        self.rest = &self.rest[i + 1..];
                        return saw_digit;
                    }
                }
                '0'..='9' => saw_digit = true,
                '+' | '-' | '.' | ',' | 'e' | 'E' => {}
                c if c.is_whitespace() => {}
                _ => return false,
            }
        }
        false
    }
}

/// Whether `text` is a well-known-text geometry encoding.
pub fn is_wkt(text: &str) -> bool {
    let mut scanner = Scanner::new(text);
    if !scanner.tagged_geometry() {
        return false;
    }
    scanner.skip_ws();
    scanner.rest.is_empty()
}

#[cfg(test)]
mod tests {
    use super::is_wkt;

    #[test]
    fn accepts_common_encodings() {
        assert!(is_wkt("POINT (1 2)"));
        assert!(is_wkt("point(1.5 -2.5)"));
        assert!(is_wkt("LINESTRING (0 0, 10 10)"));
        assert!(is_wkt("POLYGON ((0 0, 4 0, 4 4, 0 4, 0 0))"));
        assert!(is_wkt("MULTIPOLYGON (((0 0, 1 0, 1 1, 0 0)))"));
        assert!(is_wkt("POINT Z (1 2 3)"));
        assert!(is_wkt("GEOMETRYCOLLECTION (POINT (1 2), LINESTRING (0 0, 1 1))"));
        assert!(is_wkt("POINT EMPTY"));
    }

    #[test]
    fn rejects_lookalikes() {
        assert!(!is_wkt("POINTER (1 2)"));
        assert!(!is_wkt("POINT"));
        assert!(!is_wkt("POINT (a b)"));
        assert!(!is_wkt("POINT (1 2"));
        assert!(!is_wkt("POINT (1 2) trailing"));
        assert!(!is_wkt("POINT ()"));
        assert!(!is_wkt("10"));
        assert!(!is_wkt("abc"));
        assert!(!is_wkt(""));
    }
}
