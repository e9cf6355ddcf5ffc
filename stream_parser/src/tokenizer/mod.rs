/// Destructive, resumable splitter over a mutable byte buffer.
///
/// Works like `strtok_r`: leading delimiters are skipped, a token runs up to
/// the next delimiter byte, and that delimiter is overwritten with `0` in
/// place. Every byte of `delimiters` counts as a delimiter. Tokens are handed
/// out as disjoint slices of the original buffer, so earlier tokens stay
/// valid while later ones are taken.
///
/// # Example
/// ```
/// let mut line = *b"LED ON";
/// let mut tokens = Tokenizer::new(&mut line, b" ");
/// assert_eq!(tokens.next_token().as_deref(), Some(&b"LED"[..]));
/// ```
pub struct Tokenizer<'a> {
    rest: &'a mut [u8],
    delimiters: &'a [u8],
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a mut [u8], delimiters: &'a [u8]) -> Self {
        Self {
            rest: input,
            delimiters,
        }
    }

    fn is_delimiter(&self, byte: u8) -> bool {
        self.delimiters.contains(&byte)
    }

    /// Returns the next non-empty token, or `None` once the input is used up.
    pub fn next_token(&mut self) -> Option<&'a mut [u8]> {
        let rest = core::mem::take(&mut self.rest);
        let start = rest.iter().position(|&b| !self.is_delimiter(b))?;
        let rest = &mut rest[start..];

        match rest.iter().position(|&b| self.is_delimiter(b)) {
            Some(end) => {
                let (token, tail) = rest.split_at_mut(end);
                tail[0] = 0;
                self.rest = &mut tail[1..];
                Some(token)
            }
            None => Some(rest),
        }
    }

    /// Bytes not yet tokenized.
    pub fn remainder(&self) -> &[u8] {
        self.rest
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = &'a mut [u8];

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
