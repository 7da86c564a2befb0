// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

/// Longest control word name RTF allows.
const MAX_CONTROL_WORD_LEN: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RtfToken<'a> {
    GroupStart,
    GroupEnd,
    /// `\name` or `\nameN`, e.g. `\pict`, `\bliptag-12`.
    ControlWord { name: &'a str, param: Option<i32> },
    /// A backslash followed by one non-letter, e.g. `\*` or `\~`.
    ControlSymbol(char),
    /// `\'hh`
    HexEscape(u8),
    /// A run of plain text, line breaks included.
    Text(&'a str),
    /// Raw bytes following `\binN`.
    Binary(&'a [u8]),
}

/// Splits RTF into tokens, each paired with its byte offset in the input.
///
/// Only the lexical structure is handled: no destinations, no character
/// sets. Malformed input never fails; a stray backslash at the end is
/// simply dropped.
pub(crate) struct RtfLexer<'a> {
    input: &'a str,
    pos: usize,
    pending_binary: usize,
}

impl<'a> RtfLexer<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            pending_binary: 0,
        }
    }

    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    fn take_binary(&mut self) -> RtfToken<'a> {
        let end = (self.pos + self.pending_binary).min(self.input.len());
        let data = &self.bytes()[self.pos..end];
        self.pos = end;
        while !self.input.is_char_boundary(self.pos) {
            self.pos += 1;
        }
        self.pending_binary = 0;
        RtfToken::Binary(data)
    }

    fn take_text(&mut self) -> RtfToken<'a> {
        let start = self.pos;
        while let Some(b) = self.bytes().get(self.pos) {
            if matches!(b, b'{' | b'}' | b'\\') {
                break;
            }
            self.pos += 1;
        }
        // Only ASCII delimiters end a run, so both ends are char boundaries
        RtfToken::Text(&self.input[start..self.pos])
    }

    /// Called with `pos` just after a backslash.
    fn take_control(&mut self) -> Option<RtfToken<'a>> {
        let bytes = self.bytes();
        let first = *bytes.get(self.pos)?;

        if first.is_ascii_alphabetic() {
            let start = self.pos;
            while self.pos < bytes.len()
                && bytes[self.pos].is_ascii_alphabetic()
                && self.pos - start < MAX_CONTROL_WORD_LEN
            {
                self.pos += 1;
            }
            let name = &self.input[start..self.pos];
            let param = self.take_param();
            if bytes.get(self.pos) == Some(&b' ') {
                self.pos += 1;
            }
            if name == "bin" {
                self.pending_binary =
                    param.and_then(|n| usize::try_from(n).ok()).unwrap_or(0);
            }
            return Some(RtfToken::ControlWord { name, param });
        }

        if first == b'\'' {
            let hex = bytes.get(self.pos + 1..self.pos + 3);
            let value = hex
                .and_then(|h| std::str::from_utf8(h).ok())
                .and_then(|h| u8::from_str_radix(h, 16).ok());
            if let Some(value) = value {
                self.pos += 3;
                return Some(RtfToken::HexEscape(value));
            }
        }

        let symbol = self.input[self.pos..].chars().next()?;
        self.pos += symbol.len_utf8();
        Some(RtfToken::ControlSymbol(symbol))
    }

    fn take_param(&mut self) -> Option<i32> {
        let bytes = self.bytes();
        let start = self.pos;
        let mut end = start;
        if bytes.get(end) == Some(&b'-') {
            end += 1;
        }
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end == digits_start {
            return None;
        }
        self.pos = end;
        self.input[start..end].parse().ok()
    }
}

impl<'a> Iterator for RtfLexer<'a> {
    type Item = (usize, RtfToken<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let offset = self.pos;
            if self.pending_binary > 0 {
                return Some((offset, self.take_binary()));
            }
            let byte = *self.bytes().get(self.pos)?;
            let token = match byte {
                b'{' => {
                    self.pos += 1;
                    Some(RtfToken::GroupStart)
                }
                b'}' => {
                    self.pos += 1;
                    Some(RtfToken::GroupEnd)
                }
                b'\\' => {
                    self.pos += 1;
                    self.take_control()
                }
                _ => Some(self.take_text()),
            };
            match token {
                Some(token) => return Some((offset, token)),
                // A trailing backslash ends the input
                None if self.pos >= self.input.len() => return None,
                None => continue,
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::RtfToken::*;
    use super::*;

    fn tokens(rtf: &str) -> Vec<RtfToken<'_>> {
        RtfLexer::new(rtf).map(|(_, token)| token).collect()
    }

    #[test]
    fn groups_words_and_text() {
        assert_eq!(
            tokens(r"{\rtf1\ansi hello}"),
            vec![
                GroupStart,
                ControlWord {
                    name: "rtf",
                    param: Some(1)
                },
                ControlWord {
                    name: "ansi",
                    param: None
                },
                Text("hello"),
                GroupEnd,
            ]
        );
    }

    #[test]
    fn negative_parameters_are_parsed() {
        assert_eq!(
            tokens(r"\bliptag-888 ab"),
            vec![
                ControlWord {
                    name: "bliptag",
                    param: Some(-888)
                },
                Text("ab"),
            ]
        );
    }

    #[test]
    fn a_lone_minus_is_not_a_parameter() {
        assert_eq!(
            tokens(r"\b-x"),
            vec![
                ControlWord {
                    name: "b",
                    param: None
                },
                Text("-x"),
            ]
        );
    }

    #[test]
    fn only_one_space_is_eaten_as_delimiter() {
        assert_eq!(
            tokens(r"\par  x"),
            vec![
                ControlWord {
                    name: "par",
                    param: None
                },
                Text(" x"),
            ]
        );
    }

    #[test]
    fn symbols_and_hex_escapes() {
        assert_eq!(
            tokens(r"{\*\'e9\~\'zz}"),
            vec![
                GroupStart,
                ControlSymbol('*'),
                HexEscape(0xe9),
                ControlSymbol('~'),
                ControlSymbol('\''),
                Text("zz"),
                GroupEnd,
            ]
        );
    }

    #[test]
    fn binary_data_is_taken_raw() {
        assert_eq!(
            tokens("\\bin3 {}\\x}"),
            vec![
                ControlWord {
                    name: "bin",
                    param: Some(3)
                },
                Binary(b"{}\\"),
                Text("x"),
                GroupEnd,
            ]
        );
    }

    #[test]
    fn truncated_binary_data_stops_at_the_end() {
        assert_eq!(
            tokens(r"\bin10 ab"),
            vec![
                ControlWord {
                    name: "bin",
                    param: Some(10)
                },
                Binary(b"ab"),
            ]
        );
    }

    #[test]
    fn offsets_point_at_the_token_start() {
        let offsets: Vec<usize> = RtfLexer::new(r"{\pict ab}")
            .map(|(offset, _)| offset)
            .collect();
        assert_eq!(offsets, vec![0, 1, 7, 9]);
    }

    #[test]
    fn trailing_backslash_is_dropped() {
        assert_eq!(tokens("a\\"), vec![Text("a")]);
    }

    #[test]
    fn non_ascii_text_is_kept_whole() {
        assert_eq!(
            tokens("{é\\ü}"),
            vec![GroupStart, Text("é"), ControlSymbol('ü'), GroupEnd]
        );
    }
}
