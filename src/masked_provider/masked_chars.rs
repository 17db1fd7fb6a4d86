use crate::locale::MaskLocale;
use crate::masked_provider::mask_token::MaskToken;
use std::slice;

/// Parameters for rendering.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RenderFlags {
    pub(crate) prompt_char: char,
    pub(crate) password_char: Option<char>,
    pub(crate) include_prompt: bool,
    pub(crate) include_literals: bool,
}

/// Iterates the rendered characters of part of the mask.
#[derive(Debug, Clone)]
pub(crate) struct MaskedChars<'a> {
    pub(crate) iter_mask: slice::Iter<'a, MaskToken>,
    pub(crate) locale: &'a dyn MaskLocale,
    pub(crate) flags: RenderFlags,

    // index into the iterated slice
    pub(crate) pos: usize,
    // without the prompt nothing after this index is rendered
    pub(crate) last: Option<usize>,
}

impl<'a> Iterator for MaskedChars<'a> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let t = self.iter_mask.next()?;
            let pos = self.pos;
            self.pos += 1;

            if !self.flags.include_prompt && self.last.is_none_or(|v| pos > v) {
                return None;
            }

            let r = match (t.is_editable(), t.input) {
                (true, Some(c)) => Some(self.flags.password_char.unwrap_or(c)),
                (true, None) => {
                    if self.flags.include_prompt {
                        Some(self.flags.prompt_char)
                    } else {
                        Some(' ')
                    }
                }
                (false, _) => {
                    if self.flags.include_literals {
                        Some(t.display_char(self.locale))
                    } else {
                        None
                    }
                }
            };
            if r.is_some() {
                break r;
            }
        }
    }
}

/// Render `length` positions starting at `start`.
///
/// Without the prompt an unassigned position is shown as a space.
/// The output stops at the last assigned position or the last literal,
/// whichever comes later. Literals only count if they are shown.
pub(crate) fn render(
    tokens: &[MaskToken],
    locale: &dyn MaskLocale,
    flags: RenderFlags,
    start: usize,
    length: usize,
) -> String {
    let len = tokens.len();
    if length == 0 || start >= len {
        return String::new();
    }
    let window = &tokens[start..start + length.min(len - start)];

    let last_assigned = window.iter().rposition(|v| v.is_assigned());
    let last_literal = if flags.include_literals {
        window.iter().rposition(|v| !v.is_editable())
    } else {
        None
    };

    MaskedChars {
        iter_mask: window.iter(),
        locale,
        flags,
        pos: 0,
        last: last_assigned.max(last_literal),
    }
    .collect()
}
