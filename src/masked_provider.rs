//!
//! Masked text provider.
//!
//! Compiles a mask and keeps the assigned characters for each
//! position. All edits are validated against the character class
//! of the target positions. An edit either succeeds completely or
//! leaves the content untouched.
//!
//! Mask characters:
//!
//! * `0`: ASCII digit, required.
//! * `9`: ASCII digit or space, optional.
//! * `#`: ASCII digit, `+`, `-` or space, optional.
//! * `L`: letter, required.
//! * `?`: letter or space, optional.
//! * `&`: any printable character, required.
//! * `C`: any printable character or space, optional.
//! * `A`: letter or digit, required.
//! * `a`: letter, digit or space, optional.
//!
//! * `.`, `,`, `:`, `/` and `$`: decimal separator, group separator,
//!   time separator, date separator and currency symbol of the locale.
//!
//! * `<`, `>`: convert the following input to lower/upper case.
//! * `|`: stop case conversion.
//! * `\`: escapes the next character.
//! * everything else is a literal.
//!
//! ```
//! use rat_mask::MaskedProvider;
//!
//! let mut m = MaskedProvider::new("00/00/0000").expect("mask");
//! m.add_str("12251978");
//! assert_eq!(m.to_string(), "12/25/1978");
//! ```
//!

use crate::event::{EditResult, ResultHint};
use crate::locale::{LocaleSymbols, MaskLocale};
use crate::masked_provider::mask_op::{
    find_from, find_in_range, is_assigned, is_edit, is_non_edit, is_unassigned,
};
use crate::masked_provider::mask_token::{MaskToken, parse_mask};
use crate::masked_provider::masked_chars::{RenderFlags, render};
use crate::{MaskError, upos_type};
use log::{debug, trace};
use std::fmt::{Display, Formatter};
use std::ops::Range;

pub mod mask_token;

mod mask_op;
mod masked_chars;

/// Prompt char used when nothing else is configured.
pub const DEFAULT_PROMPT_CHAR: char = '_';

/// Password char that can be used for hiding the input.
pub const DEFAULT_PASSWORD_CHAR: char = '*';

/// Direction for the search functions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    #[default]
    Forward,
    Backward,
}

/// Everything the mask operations need besides the positions.
#[derive(Debug, Clone)]
pub(crate) struct MaskConfig {
    pub(crate) locale: Box<dyn MaskLocale>,
    pub(crate) prompt_char: char,
    pub(crate) password_char: Option<char>,
    pub(crate) allow_prompt_as_input: bool,
    pub(crate) ascii_only: bool,
    pub(crate) include_prompt: bool,
    pub(crate) include_literals: bool,
    pub(crate) reset_on_prompt: bool,
    pub(crate) reset_on_space: bool,
    pub(crate) skip_literals: bool,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            locale: Box::new(LocaleSymbols::invariant()),
            prompt_char: DEFAULT_PROMPT_CHAR,
            password_char: None,
            allow_prompt_as_input: true,
            ascii_only: false,
            include_prompt: false,
            include_literals: true,
            reset_on_prompt: true,
            reset_on_space: true,
            skip_literals: true,
        }
    }
}

/// Masked text editing.
#[derive(Debug, Clone)]
pub struct MaskedProvider {
    mask: String,
    cfg: MaskConfig,
    tokens: Vec<MaskToken>,
}

/// Construction parameters for a [MaskedProvider].
#[derive(Debug, Clone)]
pub struct MaskedProviderBuilder {
    mask: String,
    cfg: MaskConfig,
}

impl MaskedProviderBuilder {
    /// Locale symbols for the placeholders and case conversion.
    ///
    /// The default uses the invariant symbols.
    pub fn locale(mut self, locale: impl MaskLocale + 'static) -> Self {
        self.cfg.locale = Box::new(locale);
        self
    }

    /// Can the prompt char be entered as input.
    /// Only relevant if reset-on-prompt is switched off.
    pub fn allow_prompt_as_input(mut self, allow: bool) -> Self {
        self.cfg.allow_prompt_as_input = allow;
        self
    }

    /// Only 7-bit ASCII is accepted for letters and characters.
    pub fn ascii_only(mut self, ascii: bool) -> Self {
        self.cfg.ascii_only = ascii;
        self
    }

    /// Prompt char for unassigned positions.
    pub fn prompt_char(mut self, prompt: char) -> Self {
        self.cfg.prompt_char = prompt;
        self
    }

    /// Password char. Assigned positions are rendered with this.
    pub fn password_char(mut self, password: Option<char>) -> Self {
        self.cfg.password_char = password;
        self
    }

    /// Compile the mask.
    pub fn build(self) -> Result<MaskedProvider, MaskError> {
        check_prompt_password(self.cfg.prompt_char, self.cfg.password_char)?;
        let tokens = parse_mask(&self.mask, self.cfg.locale.as_ref())?;
        Ok(MaskedProvider {
            mask: self.mask,
            cfg: self.cfg,
            tokens,
        })
    }
}

fn check_prompt_password(prompt: char, password: Option<char>) -> Result<(), MaskError> {
    if !crate::is_valid_input_char(prompt) {
        return Err(MaskError::InvalidPromptChar(prompt));
    }
    if let Some(password) = password {
        if !crate::is_valid_password_char(password) {
            return Err(MaskError::InvalidPasswordChar(password));
        }
        if password == prompt {
            return Err(MaskError::PromptPasswordConflict(password));
        }
    }
    Ok(())
}

impl Display for MaskedProvider {
    /// Honors the include-prompt and include-literals flags, but
    /// ignores the password char.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = self.render_string(true, self.cfg.include_prompt, self.cfg.include_literals);
        write!(f, "{}", s)
    }
}

impl MaskedProvider {
    /// New provider with the default settings.
    pub fn new(mask: &str) -> Result<Self, MaskError> {
        Self::builder(mask).build()
    }

    /// Builder for more settings.
    pub fn builder(mask: &str) -> MaskedProviderBuilder {
        MaskedProviderBuilder {
            mask: mask.to_string(),
            cfg: MaskConfig::default(),
        }
    }

    /// The mask.
    #[inline]
    pub fn mask(&self) -> &str {
        &self.mask
    }

    /// Locale.
    #[inline]
    pub fn locale(&self) -> &dyn MaskLocale {
        self.cfg.locale.as_ref()
    }

    /// Compiled positions.
    #[inline]
    pub fn tokens(&self) -> &[MaskToken] {
        &self.tokens
    }

    /// Prompt char.
    #[inline]
    pub fn prompt_char(&self) -> char {
        self.cfg.prompt_char
    }

    /// Change the prompt char.
    ///
    /// Only changes the rendering, the assigned characters stay as
    /// they are.
    pub fn set_prompt_char(&mut self, prompt: char) -> Result<(), MaskError> {
        check_prompt_password(prompt, self.cfg.password_char)?;
        self.cfg.prompt_char = prompt;
        Ok(())
    }

    /// Password char.
    #[inline]
    pub fn password_char(&self) -> Option<char> {
        self.cfg.password_char
    }

    /// Change the password char. None renders the assigned
    /// characters as they are.
    pub fn set_password_char(&mut self, password: Option<char>) -> Result<(), MaskError> {
        check_prompt_password(self.cfg.prompt_char, password)?;
        self.cfg.password_char = password;
        Ok(())
    }

    /// Is a password char set.
    #[inline]
    pub fn is_password(&self) -> bool {
        self.cfg.password_char.is_some()
    }

    /// Switch password mode on or off.
    ///
    /// Uses [DEFAULT_PASSWORD_CHAR] unless that is the prompt char.
    pub fn set_password(&mut self, password: bool) {
        if !password {
            self.cfg.password_char = None;
        } else if self.cfg.password_char.is_none() {
            if self.cfg.prompt_char != DEFAULT_PASSWORD_CHAR {
                self.cfg.password_char = Some(DEFAULT_PASSWORD_CHAR);
            } else {
                self.cfg.password_char = Some(DEFAULT_PROMPT_CHAR);
            }
        }
    }

    /// Can the prompt char be used as input.
    #[inline]
    pub fn allow_prompt_as_input(&self) -> bool {
        self.cfg.allow_prompt_as_input
    }

    /// Only 7-bit ASCII for letters and characters.
    #[inline]
    pub fn ascii_only(&self) -> bool {
        self.cfg.ascii_only
    }

    /// Render the prompt char for unassigned positions.
    #[inline]
    pub fn include_prompt(&self) -> bool {
        self.cfg.include_prompt
    }

    #[inline]
    pub fn set_include_prompt(&mut self, include: bool) {
        self.cfg.include_prompt = include;
    }

    /// Render literals.
    #[inline]
    pub fn include_literals(&self) -> bool {
        self.cfg.include_literals
    }

    #[inline]
    pub fn set_include_literals(&mut self, include: bool) {
        self.cfg.include_literals = include;
    }

    /// The prompt char as input resets the position.
    #[inline]
    pub fn reset_on_prompt(&self) -> bool {
        self.cfg.reset_on_prompt
    }

    #[inline]
    pub fn set_reset_on_prompt(&mut self, reset: bool) {
        self.cfg.reset_on_prompt = reset;
    }

    /// Space as input resets the position.
    #[inline]
    pub fn reset_on_space(&self) -> bool {
        self.cfg.reset_on_space
    }

    #[inline]
    pub fn set_reset_on_space(&mut self, reset: bool) {
        self.cfg.reset_on_space = reset;
    }

    /// Input that matches a literal is consumed by the literal.
    #[inline]
    pub fn skip_literals(&self) -> bool {
        self.cfg.skip_literals
    }

    #[inline]
    pub fn set_skip_literals(&mut self, skip: bool) {
        self.cfg.skip_literals = skip;
    }
}

impl MaskedProvider {
    /// Runs the operation on a copy of the positions first. Only if
    /// that succeeds it is repeated for the live positions.
    fn edit<F>(&mut self, op: F) -> EditResult
    where
        F: Fn(&mut [MaskToken], &MaskConfig) -> EditResult,
    {
        let mut scratch = self.tokens.clone();
        let r = op(&mut scratch, &self.cfg);
        if !r.success {
            trace!("rejected {:?}", r);
            return r;
        }
        op(&mut self.tokens, &self.cfg)
    }

    fn check_pos(&self, pos: upos_type) -> Option<EditResult> {
        if pos as usize >= self.tokens.len() {
            Some(EditResult::fail(pos as usize, ResultHint::PositionOutOfRange))
        } else {
            None
        }
    }

    fn check_range(&self, start: upos_type, end: upos_type) -> Option<EditResult> {
        if end as usize >= self.tokens.len() {
            Some(EditResult::fail(end as usize, ResultHint::PositionOutOfRange))
        } else if start > end {
            Some(EditResult::fail(start as usize, ResultHint::PositionOutOfRange))
        } else {
            None
        }
    }

    /// Append the character after the last assigned position.
    pub fn add_char(&mut self, c: char) -> EditResult {
        self.edit(|t, cfg| mask_op::add_char(t, cfg, c))
    }

    /// Append the string after the last assigned position.
    ///
    /// Fails without any change if one of the characters is rejected.
    pub fn add_str(&mut self, s: &str) -> EditResult {
        self.edit(|t, cfg| mask_op::add_str(t, cfg, s))
    }

    /// Reset all positions.
    pub fn clear(&mut self) -> EditResult {
        let r = mask_op::clear(&mut self.tokens);
        debug!("clear {:?}", r);
        r
    }

    /// Insert the character at the given position and shift the
    /// assigned characters to the right.
    pub fn insert_char_at(&mut self, c: char, pos: upos_type) -> EditResult {
        let mut buf = [0u8; 4];
        self.insert_str_at(c.encode_utf8(&mut buf), pos)
    }

    /// Insert the string at the given position and shift the
    /// assigned characters to the right.
    pub fn insert_str_at(&mut self, s: &str, pos: upos_type) -> EditResult {
        if let Some(r) = self.check_pos(pos) {
            return r;
        }
        self.edit(|t, cfg| mask_op::insert_str_at(t, cfg, s, pos as usize))
    }

    /// Remove the last assigned character.
    pub fn remove(&mut self) -> EditResult {
        mask_op::remove(&mut self.tokens)
    }

    /// Remove the character at the position and shift the following
    /// assigned characters to the left.
    pub fn remove_at(&mut self, pos: upos_type) -> EditResult {
        self.remove_range(pos, pos)
    }

    /// Remove the characters in the inclusive range `start..=end` and
    /// shift the following assigned characters to the left.
    pub fn remove_range(&mut self, start: upos_type, end: upos_type) -> EditResult {
        if let Some(r) = self.check_range(start, end) {
            return r;
        }
        self.edit(|t, cfg| mask_op::remove_range(t, cfg, start as usize, end as usize))
    }

    /// Replace the character at the position. If the position is a
    /// literal the next edit position is used.
    pub fn replace_char(&mut self, c: char, pos: upos_type) -> EditResult {
        if let Some(r) = self.check_pos(pos) {
            return r;
        }
        self.edit(|t, cfg| mask_op::replace_char(t, cfg, c, pos as usize))
    }

    /// Replace the inclusive range `start..=end` with the character.
    pub fn replace_char_range(&mut self, c: char, start: upos_type, end: upos_type) -> EditResult {
        if let Some(r) = self.check_range(start, end) {
            return r;
        }
        self.edit(|t, cfg| mask_op::replace_char_range(t, cfg, c, start as usize, end as usize))
    }

    /// Overwrite starting at the position.
    ///
    /// An empty string removes the character at the position.
    pub fn replace_str(&mut self, s: &str, pos: upos_type) -> EditResult {
        if let Some(r) = self.check_pos(pos) {
            return r;
        }
        self.edit(|t, cfg| mask_op::replace_str(t, cfg, s, pos as usize))
    }

    /// Replace the inclusive range `start..=end` with the string.
    ///
    /// An empty string removes the range.
    pub fn replace_str_range(&mut self, s: &str, start: upos_type, end: upos_type) -> EditResult {
        if let Some(r) = self.check_range(start, end) {
            return r;
        }
        self.edit(|t, cfg| mask_op::replace_str_range(t, cfg, s, start as usize, end as usize))
    }

    /// Replace the complete content.
    ///
    /// An empty string clears everything.
    pub fn set(&mut self, s: &str) -> EditResult {
        self.edit(|t, cfg| mask_op::set(t, cfg, s))
    }
}

impl MaskedProvider {
    /// Would the character be accepted at this position.
    pub fn verify_char(&self, c: char, pos: upos_type) -> EditResult {
        if let Some(r) = self.check_pos(pos) {
            return r;
        }
        match mask_op::test_char(&self.tokens, &self.cfg, c, pos as usize) {
            Ok(hint) => EditResult::ok(pos as usize, hint),
            Err(hint) => EditResult::fail(pos as usize, hint),
        }
    }

    /// Would the character be consumed at this position without
    /// being stored. Out of range is false.
    pub fn verify_escape_char(&self, c: char, pos: upos_type) -> bool {
        if pos as usize >= self.tokens.len() {
            return false;
        }
        mask_op::is_escape(&self.tokens, &self.cfg, c, pos as usize)
    }

    /// Would the string be accepted starting at position 0.
    pub fn verify_string(&self, s: &str) -> EditResult {
        mask_op::verify_string(&self.tokens, &self.cfg, s)
    }
}

impl MaskedProvider {
    /// Number of positions.
    #[inline]
    pub fn len(&self) -> upos_type {
        self.tokens.len() as upos_type
    }

    /// The mask has no positions at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of edit positions.
    pub fn edit_position_count(&self) -> upos_type {
        self.tokens.iter().filter(|v| v.is_editable()).count() as upos_type
    }

    /// Number of assigned edit positions.
    pub fn assigned_edit_position_count(&self) -> upos_type {
        self.tokens.iter().filter(|v| v.is_assigned()).count() as upos_type
    }

    /// Number of unassigned edit positions.
    pub fn available_edit_position_count(&self) -> upos_type {
        self.edit_position_count() - self.assigned_edit_position_count()
    }

    /// All required positions are assigned.
    pub fn mask_completed(&self) -> bool {
        self.tokens
            .iter()
            .filter(|v| v.mask.is_required())
            .all(|v| v.input.is_some())
    }

    /// All edit positions are assigned.
    pub fn mask_full(&self) -> bool {
        self.tokens
            .iter()
            .filter(|v| v.is_editable())
            .all(|v| v.input.is_some())
    }

    /// Last assigned position.
    pub fn last_assigned_position(&self) -> Option<upos_type> {
        mask_op::last_assigned(&self.tokens).map(|v| v as upos_type)
    }

    /// All edit positions in ascending order.
    pub fn edit_positions(&self) -> impl Iterator<Item = upos_type> + '_ {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_editable())
            .map(|(i, _)| i as upos_type)
    }

    /// Is this an edit position. Out of range is false.
    pub fn is_edit_position(&self, pos: upos_type) -> bool {
        self.tokens
            .get(pos as usize)
            .map(|v| v.is_editable())
            .unwrap_or(false)
    }

    /// Is this an unassigned edit position. Out of range is false.
    pub fn is_available_position(&self, pos: upos_type) -> bool {
        self.tokens
            .get(pos as usize)
            .map(|v| v.is_editable() && v.input.is_none())
            .unwrap_or(false)
    }

    fn find_range(
        &self,
        range: Range<upos_type>,
        dir: SearchDirection,
        pred: fn(&MaskToken) -> bool,
    ) -> Option<upos_type> {
        if range.is_empty() {
            return None;
        }
        find_in_range(
            &self.tokens,
            range.start as usize,
            range.end as usize - 1,
            dir,
            pred,
        )
        .map(|v| v as upos_type)
    }

    fn find_from(
        &self,
        pos: upos_type,
        dir: SearchDirection,
        pred: fn(&MaskToken) -> bool,
    ) -> Option<upos_type> {
        find_from(&self.tokens, pos as usize, dir, pred).map(|v| v as upos_type)
    }

    /// First edit position in the range. Searches from the end
    /// of the range for [SearchDirection::Backward].
    pub fn find_edit_position(
        &self,
        range: Range<upos_type>,
        dir: SearchDirection,
    ) -> Option<upos_type> {
        self.find_range(range, dir, is_edit)
    }

    /// First literal position in the range.
    pub fn find_non_edit_position(
        &self,
        range: Range<upos_type>,
        dir: SearchDirection,
    ) -> Option<upos_type> {
        self.find_range(range, dir, is_non_edit)
    }

    /// First assigned edit position in the range.
    pub fn find_assigned_edit_position(
        &self,
        range: Range<upos_type>,
        dir: SearchDirection,
    ) -> Option<upos_type> {
        self.find_range(range, dir, is_assigned)
    }

    /// First unassigned edit position in the range.
    pub fn find_unassigned_edit_position(
        &self,
        range: Range<upos_type>,
        dir: SearchDirection,
    ) -> Option<upos_type> {
        self.find_range(range, dir, is_unassigned)
    }

    /// Edit position from here to the end or to the start.
    /// The position itself is included.
    pub fn find_edit_position_from(
        &self,
        pos: upos_type,
        dir: SearchDirection,
    ) -> Option<upos_type> {
        self.find_from(pos, dir, is_edit)
    }

    /// Literal position from here to the end or to the start.
    pub fn find_non_edit_position_from(
        &self,
        pos: upos_type,
        dir: SearchDirection,
    ) -> Option<upos_type> {
        self.find_from(pos, dir, is_non_edit)
    }

    /// Assigned edit position from here to the end or to the start.
    pub fn find_assigned_edit_position_from(
        &self,
        pos: upos_type,
        dir: SearchDirection,
    ) -> Option<upos_type> {
        self.find_from(pos, dir, is_assigned)
    }

    /// Unassigned edit position from here to the end or to the start.
    pub fn find_unassigned_edit_position_from(
        &self,
        pos: upos_type,
        dir: SearchDirection,
    ) -> Option<upos_type> {
        self.find_from(pos, dir, is_unassigned)
    }
}

impl MaskedProvider {
    fn render_string(&self, ignore_password: bool, prompt: bool, literals: bool) -> String {
        self.render_range(ignore_password, prompt, literals, 0, self.len())
    }

    /// Render a part of the mask.
    ///
    /// * ignore_password: show the assigned characters even if a
    ///   password char is set.
    /// * include_prompt: show unassigned positions with the prompt char.
    ///   Otherwise they are shown as space, and the text ends with the
    ///   last assigned position or the last shown literal.
    /// * include_literals: show literals.
    pub fn render_range(
        &self,
        ignore_password: bool,
        include_prompt: bool,
        include_literals: bool,
        start: upos_type,
        length: upos_type,
    ) -> String {
        let flags = RenderFlags {
            prompt_char: self.cfg.prompt_char,
            password_char: if ignore_password {
                None
            } else {
                self.cfg.password_char
            },
            include_prompt,
            include_literals,
        };
        render(
            &self.tokens,
            self.cfg.locale.as_ref(),
            flags,
            start as usize,
            length as usize,
        )
    }

    /// Complete text with prompt and literals. Honors the password char.
    pub fn to_display_string(&self) -> String {
        self.render_string(false, true, true)
    }

    /// Text as configured with the include-prompt and include-literals
    /// flags. Honors the password char.
    pub fn to_masked_string(&self) -> String {
        self.render_string(false, self.cfg.include_prompt, self.cfg.include_literals)
    }

    /// Character as it is displayed at the position.
    pub fn char_at(&self, pos: upos_type) -> Result<char, MaskError> {
        let Some(tok) = self.tokens.get(pos as usize) else {
            return Err(MaskError::IndexOutOfRange(pos, self.len()));
        };
        Ok(match (tok.is_editable(), tok.input) {
            (true, Some(c)) => self.cfg.password_char.unwrap_or(c),
            (true, None) => self.cfg.prompt_char,
            (false, _) => tok.display_char(self.cfg.locale.as_ref()),
        })
    }
}
