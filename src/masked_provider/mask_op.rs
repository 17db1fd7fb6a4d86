//!
//! Validation and mutation on the compiled mask.
//!
//! Every mutating operation validates before it touches a position,
//! but some of them have already changed parts of the sequence when a
//! later step fails. The provider runs them on a scratch copy first
//! and repeats them on the live sequence only if the copy succeeded.
//!

use crate::event::{EditResult, ResultHint};
use crate::masked_provider::MaskConfig;
use crate::masked_provider::SearchDirection;
use crate::masked_provider::mask_token::MaskToken;

/// Failing hint together with the offending position.
type Reject = (usize, ResultHint);

/// Find the first position in `[start, end]` in the given direction.
/// The range is clamped to the sequence.
pub(crate) fn find_in_range(
    tokens: &[MaskToken],
    start: usize,
    end: usize,
    dir: SearchDirection,
    pred: impl Fn(&MaskToken) -> bool,
) -> Option<usize> {
    if tokens.is_empty() {
        return None;
    }
    let end = end.min(tokens.len() - 1);
    if start > end {
        return None;
    }
    match dir {
        SearchDirection::Forward => (start..=end).find(|&i| pred(&tokens[i])),
        SearchDirection::Backward => (start..=end).rev().find(|&i| pred(&tokens[i])),
    }
}

/// Search from `pos` to the end or to the start of the sequence.
pub(crate) fn find_from(
    tokens: &[MaskToken],
    pos: usize,
    dir: SearchDirection,
    pred: impl Fn(&MaskToken) -> bool,
) -> Option<usize> {
    match dir {
        SearchDirection::Forward => find_in_range(tokens, pos, usize::MAX, dir, pred),
        SearchDirection::Backward => find_in_range(tokens, 0, pos, dir, pred),
    }
}

#[inline]
pub(crate) fn is_edit(t: &MaskToken) -> bool {
    t.is_editable()
}

#[inline]
pub(crate) fn is_non_edit(t: &MaskToken) -> bool {
    !t.is_editable()
}

#[inline]
pub(crate) fn is_assigned(t: &MaskToken) -> bool {
    t.is_assigned()
}

#[inline]
pub(crate) fn is_unassigned(t: &MaskToken) -> bool {
    t.is_editable() && t.input.is_none()
}

#[inline]
fn next_edit(tokens: &[MaskToken], pos: usize) -> Option<usize> {
    find_from(tokens, pos, SearchDirection::Forward, is_edit)
}

pub(crate) fn last_assigned(tokens: &[MaskToken]) -> Option<usize> {
    find_from(tokens, usize::MAX, SearchDirection::Backward, is_assigned)
}

/// Character is consumed at this position without being stored.
///
/// This is a matching literal or one of the reset characters.
pub(crate) fn is_escape(tokens: &[MaskToken], cfg: &MaskConfig, c: char, pos: usize) -> bool {
    let tok = &tokens[pos];
    if !tok.is_editable() {
        cfg.skip_literals && c == tok.display_char(cfg.locale.as_ref())
    } else {
        (cfg.reset_on_prompt && c == cfg.prompt_char) || (cfg.reset_on_space && c == ' ')
    }
}

/// Validate one character at one position. No side effects.
pub(crate) fn test_char(
    tokens: &[MaskToken],
    cfg: &MaskConfig,
    c: char,
    pos: usize,
) -> Result<ResultHint, ResultHint> {
    if !crate::is_valid_input_char(c) {
        return Err(ResultHint::InvalidInput);
    }

    let tok = &tokens[pos];
    if !tok.is_editable() {
        return if cfg.skip_literals && c == tok.display_char(cfg.locale.as_ref()) {
            Ok(ResultHint::CharacterEscaped)
        } else {
            Err(ResultHint::NonEditPosition)
        };
    }

    if c == cfg.prompt_char {
        if cfg.reset_on_prompt {
            return Ok(reset_hint(tok));
        }
        if !cfg.allow_prompt_as_input {
            return Err(ResultHint::PromptCharNotAllowed);
        }
    }

    if c == ' ' && cfg.reset_on_space {
        return Ok(reset_hint(tok));
    }

    tok.mask.accepts(c, cfg.ascii_only)?;

    if tok.input == Some(c) {
        Ok(ResultHint::NoEffect)
    } else {
        Ok(ResultHint::Success)
    }
}

// Resetting a filled position changes it, resetting an
// empty one just consumes the character.
fn reset_hint(tok: &MaskToken) -> ResultHint {
    if tok.input.is_some() {
        ResultHint::SideEffect
    } else {
        ResultHint::CharacterEscaped
    }
}

/// Store a character that passed [test_char].
fn set_char(tokens: &mut [MaskToken], cfg: &MaskConfig, c: char, pos: usize) {
    if is_escape(tokens, cfg, c, pos) {
        reset_char(tokens, pos);
        return;
    }
    let tok = &mut tokens[pos];
    if tok.is_editable() {
        tok.input = Some(tok.convert_case(c, cfg.locale.as_ref()));
    }
}

fn reset_char(tokens: &mut [MaskToken], pos: usize) {
    let tok = &mut tokens[pos];
    if tok.is_editable() {
        tok.input = None;
    }
}

/// Reset all edit positions in `[start, end]`.
fn reset_string(tokens: &mut [MaskToken], start: usize, end: usize) {
    let end = end.min(tokens.len().saturating_sub(1));
    for pos in start..=end {
        reset_char(tokens, pos);
    }
}

fn test_set_char(
    tokens: &mut [MaskToken],
    cfg: &MaskConfig,
    c: char,
    pos: usize,
) -> Result<ResultHint, ResultHint> {
    let hint = test_char(tokens, cfg, c, pos)?;
    if matches!(hint, ResultHint::Success | ResultHint::SideEffect) {
        set_char(tokens, cfg, c, pos);
    }
    Ok(hint)
}

/// Validate a string starting at `pos`. No side effects.
///
/// Escaped characters stay at their position, all others move forward
/// to the next edit position. Returns the last position used and the
/// greatest hint.
pub(crate) fn test_string(
    tokens: &[MaskToken],
    cfg: &MaskConfig,
    s: &str,
    pos: usize,
) -> Result<(usize, ResultHint), Reject> {
    let len = tokens.len();
    let mut hint = ResultHint::Unknown;
    let mut p = pos;
    if s.is_empty() {
        return Ok((pos, hint));
    }

    for c in s.chars() {
        if p >= len {
            return Err((len, ResultHint::UnavailableEditPosition));
        }
        if !is_escape(tokens, cfg, c, p) {
            p = next_edit(tokens, p).ok_or((len, ResultHint::UnavailableEditPosition))?;
        }
        let h = test_char(tokens, cfg, c, p).map_err(|h| (p, h))?;
        hint = hint.max(h);
        p += 1;
    }

    Ok((p - 1, hint))
}

/// Store a string that passed [test_string].
fn set_string(tokens: &mut [MaskToken], cfg: &MaskConfig, s: &str, pos: usize) {
    let mut p = pos;
    for c in s.chars() {
        if p >= tokens.len() {
            break;
        }
        if !is_escape(tokens, cfg, c, p) {
            let Some(np) = next_edit(tokens, p) else {
                break;
            };
            p = np;
        }
        set_char(tokens, cfg, c, p);
        p += 1;
    }
}

fn test_set_string(
    tokens: &mut [MaskToken],
    cfg: &MaskConfig,
    s: &str,
    pos: usize,
) -> Result<(usize, ResultHint), Reject> {
    let r = test_string(tokens, cfg, s, pos)?;
    set_string(tokens, cfg, s, pos);
    Ok(r)
}

fn result(r: Result<(usize, ResultHint), Reject>) -> EditResult {
    match r {
        Ok((pos, hint)) => EditResult::ok(pos, hint),
        Err((pos, hint)) => EditResult::fail(pos, hint),
    }
}

/// Append after the last assigned position.
pub(crate) fn add_char(tokens: &mut [MaskToken], cfg: &MaskConfig, c: char) -> EditResult {
    let len = tokens.len();
    let start = match last_assigned(tokens) {
        Some(last) if last + 1 >= len => {
            return EditResult::fail(len, ResultHint::UnavailableEditPosition);
        }
        Some(last) => last + 1,
        None => 0,
    };
    let Some(pos) = next_edit(tokens, start) else {
        return EditResult::fail(len, ResultHint::UnavailableEditPosition);
    };
    match test_set_char(tokens, cfg, c, pos) {
        Ok(hint) => EditResult::ok(pos, hint),
        Err(hint) => EditResult::fail(pos, hint),
    }
}

/// Append a string after the last assigned position.
pub(crate) fn add_str(tokens: &mut [MaskToken], cfg: &MaskConfig, s: &str) -> EditResult {
    let start = last_assigned(tokens).map(|v| v + 1).unwrap_or(0);
    if s.is_empty() {
        return EditResult::ok(start, ResultHint::NoEffect);
    }
    result(test_set_string(tokens, cfg, s, start))
}

/// Reset all edit positions.
pub(crate) fn clear(tokens: &mut [MaskToken]) -> EditResult {
    if last_assigned(tokens).is_none() {
        return EditResult::ok(0, ResultHint::NoEffect);
    }
    for tok in tokens.iter_mut() {
        tok.input = None;
    }
    EditResult::ok(0, ResultHint::Success)
}

/// Insert at `pos` and shift the assigned characters right.
///
/// `pos` must be a valid position.
pub(crate) fn insert_str_at(
    tokens: &mut [MaskToken],
    cfg: &MaskConfig,
    s: &str,
    pos: usize,
) -> EditResult {
    let len = tokens.len();
    if s.is_empty() {
        return EditResult::ok(pos, ResultHint::NoEffect);
    }

    let (test_pos, mut hint) = match test_string(tokens, cfg, s, pos) {
        Ok(v) => v,
        Err((p, h)) => return EditResult::fail(p, h),
    };

    let first_src = next_edit(tokens, pos);
    let last = last_assigned(tokens);
    let shift = match (first_src, last) {
        (Some(src), Some(last)) if src <= last && src <= test_pos => {
            find_in_range(tokens, src, test_pos, SearchDirection::Forward, is_assigned).is_some()
        }
        _ => false,
    };

    if shift {
        if test_pos + 1 >= len {
            return EditResult::fail(len, ResultHint::UnavailableEditPosition);
        }
        let (Some(first_src), Some(last)) = (first_src, last) else {
            return EditResult::fail(len, ResultHint::UnavailableEditPosition);
        };

        // pair every edit position from the insert point up to the last
        // assigned one with its destination behind the inserted text.
        let mut moves = Vec::new();
        let mut src = Some(first_src);
        let mut dst = next_edit(tokens, test_pos + 1);
        while let Some(s) = src {
            if s > last {
                break;
            }
            let Some(d) = dst else {
                return EditResult::fail(len, ResultHint::UnavailableEditPosition);
            };
            if let Some(c) = tokens[s].input {
                match test_char(tokens, cfg, c, d) {
                    Ok(h) => hint = hint.max(h),
                    Err(h) => return EditResult::fail(d, h),
                }
            }
            moves.push((s, d));
            src = next_edit(tokens, s + 1);
            dst = next_edit(tokens, d + 1);
        }

        for (s, d) in moves.into_iter().rev() {
            match tokens[s].input {
                Some(c) => set_char(tokens, cfg, c, d),
                None => reset_char(tokens, d),
            }
        }
    }

    set_string(tokens, cfg, s, pos);
    EditResult::ok(test_pos, hint)
}

/// Remove the last assigned character.
pub(crate) fn remove(tokens: &mut [MaskToken]) -> EditResult {
    match last_assigned(tokens) {
        Some(last) => {
            reset_char(tokens, last);
            EditResult::ok(last, ResultHint::Success)
        }
        None => EditResult::ok(0, ResultHint::NoEffect),
    }
}

/// Remove the edit positions in `[start, end]` and shift the
/// following assigned characters left.
///
/// The range must be valid.
pub(crate) fn remove_range(
    tokens: &mut [MaskToken],
    cfg: &MaskConfig,
    start: usize,
    end: usize,
) -> EditResult {
    let last = last_assigned(tokens);
    let first_dst = find_in_range(tokens, start, end, SearchDirection::Forward, is_edit);

    let (Some(first_dst), Some(last)) = (first_dst, last) else {
        return EditResult::ok(start, ResultHint::NoEffect);
    };
    if first_dst > last {
        return EditResult::ok(start, ResultHint::NoEffect);
    }

    let mut hint = ResultHint::NoEffect;
    if find_in_range(tokens, start, end, SearchDirection::Forward, is_assigned).is_some() {
        hint = ResultHint::Success;
    }

    let mut reset_start = start;
    if end < last {
        let mut moves = Vec::new();
        let mut src = next_edit(tokens, end + 1);
        let mut dst = Some(first_dst);
        while let Some(s) = src {
            if s > last {
                break;
            }
            let Some(d) = dst else {
                break;
            };
            if let Some(c) = tokens[s].input {
                if let Err(h) = test_char(tokens, cfg, c, d) {
                    return EditResult::fail(d, h);
                }
            }
            moves.push((s, d));
            src = next_edit(tokens, s + 1);
            dst = next_edit(tokens, d + 1);
        }

        if hint == ResultHint::NoEffect {
            hint = ResultHint::SideEffect;
        }

        for &(s, d) in moves.iter() {
            match tokens[s].input {
                Some(c) => {
                    set_char(tokens, cfg, c, d);
                    reset_char(tokens, s);
                }
                None => reset_char(tokens, d),
            }
        }
        if let Some(&(_, d)) = moves.last() {
            reset_start = d + 1;
        }
    }

    if reset_start <= end {
        reset_string(tokens, reset_start, end);
    }

    EditResult::ok(start, hint)
}

/// Replace the character at `pos`, or at the next edit position.
///
/// `pos` must be a valid position.
pub(crate) fn replace_char(
    tokens: &mut [MaskToken],
    cfg: &MaskConfig,
    c: char,
    pos: usize,
) -> EditResult {
    let p = if is_escape(tokens, cfg, c, pos) {
        Some(pos)
    } else {
        next_edit(tokens, pos)
    };
    let Some(p) = p else {
        return EditResult::fail(pos, ResultHint::UnavailableEditPosition);
    };
    match test_set_char(tokens, cfg, c, p) {
        Ok(hint) => EditResult::ok(p, hint),
        Err(hint) => EditResult::fail(p, hint),
    }
}

/// Replace the range `[start, end]` with a single character.
///
/// The range must be valid.
pub(crate) fn replace_char_range(
    tokens: &mut [MaskToken],
    cfg: &MaskConfig,
    c: char,
    start: usize,
    end: usize,
) -> EditResult {
    if start == end {
        match test_set_char(tokens, cfg, c, start) {
            Ok(hint) => EditResult::ok(start, hint),
            Err(hint) => EditResult::fail(start, hint),
        }
    } else {
        let mut buf = [0u8; 4];
        replace_str_range(tokens, cfg, c.encode_utf8(&mut buf), start, end)
    }
}

/// Overwrite starting at `pos`.
///
/// `pos` must be a valid position.
pub(crate) fn replace_str(
    tokens: &mut [MaskToken],
    cfg: &MaskConfig,
    s: &str,
    pos: usize,
) -> EditResult {
    if s.is_empty() {
        return remove_range(tokens, cfg, pos, pos);
    }
    result(test_set_string(tokens, cfg, s, pos))
}

/// Replace the range `[start, end]` with the string.
///
/// A shorter string removes the rest of the range, a longer one
/// shifts the assigned characters after the range to the right.
/// The range must be valid.
pub(crate) fn replace_str_range(
    tokens: &mut [MaskToken],
    cfg: &MaskConfig,
    s: &str,
    start: usize,
    end: usize,
) -> EditResult {
    let len = tokens.len();
    if s.is_empty() {
        return remove_range(tokens, cfg, start, end);
    }

    let (test_pos, mut hint) = match test_string(tokens, cfg, s, start) {
        Ok(v) => v,
        Err((p, h)) => return EditResult::fail(p, h),
    };

    if let Some(last) = last_assigned(tokens) {
        if test_pos < end {
            let r = remove_range(tokens, cfg, test_pos + 1, end);
            if !r.success {
                return r;
            }
            if r.hint == ResultHint::Success && hint != ResultHint::Success {
                hint = ResultHint::SideEffect;
            }
        } else if test_pos > end && last > end {
            let mut moves = Vec::new();
            let mut src = next_edit(tokens, end + 1);
            let mut dst = next_edit(tokens, test_pos + 1);
            while let Some(s) = src {
                if s > last {
                    break;
                }
                let Some(d) = dst else {
                    return EditResult::fail(len, ResultHint::UnavailableEditPosition);
                };
                if let Some(c) = tokens[s].input {
                    match test_char(tokens, cfg, c, d) {
                        Ok(ResultHint::Success) => hint = hint.max(ResultHint::Success),
                        Ok(_) => {}
                        Err(h) => return EditResult::fail(d, h),
                    }
                }
                moves.push((s, d));
                src = next_edit(tokens, s + 1);
                dst = next_edit(tokens, d + 1);
            }

            for (s, d) in moves.into_iter().rev() {
                match tokens[s].input {
                    Some(c) => set_char(tokens, cfg, c, d),
                    None => reset_char(tokens, d),
                }
            }
        }
    }

    set_string(tokens, cfg, s, start);
    EditResult::ok(test_pos, hint)
}

/// Replace everything.
///
/// Positions after the new text are reset.
pub(crate) fn set(tokens: &mut [MaskToken], cfg: &MaskConfig, s: &str) -> EditResult {
    if s.is_empty() {
        return clear(tokens);
    }
    match test_set_string(tokens, cfg, s, 0) {
        Ok((test_pos, hint)) => {
            if test_pos + 1 < tokens.len() {
                reset_string(tokens, test_pos + 1, tokens.len() - 1);
            }
            EditResult::ok(test_pos, hint)
        }
        Err((p, h)) => EditResult::fail(p, h),
    }
}

/// Is there room for the string, and is it valid.
pub(crate) fn verify_string(tokens: &[MaskToken], cfg: &MaskConfig, s: &str) -> EditResult {
    if s.is_empty() {
        return EditResult::ok(0, ResultHint::NoEffect);
    }
    result(test_string(tokens, cfg, s, 0))
}

