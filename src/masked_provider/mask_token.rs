use crate::MaskError;
use crate::event::ResultHint;
use crate::locale::MaskLocale;
use log::debug;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};

/// Case conversion for an edit position.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CaseShift {
    /// `|` or nothing at all.
    #[default]
    None,
    /// `>`
    Upper,
    /// `<`
    Lower,
}

/// Character class of one position of the mask.
#[derive(Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Mask {
    /// `0` ASCII digit, required
    DigitRequired,
    /// `9` ASCII digit or space
    DigitOrSpace,
    /// `#` ASCII digit, sign or space
    DigitOrSign,
    /// `L` letter, required
    LetterRequired,
    /// `?` letter or space
    LetterOptional,
    /// `&` any printable character, required
    CharRequired,
    /// `C` any printable character
    CharOptional,
    /// `A` letter or digit, required
    AlnumRequired,
    /// `a` letter or digit or space
    AlnumOptional,
    /// `.` decimal separator of the locale
    DecimalSep,
    /// `,` grouping separator of the locale
    GroupSep,
    /// `:` time separator of the locale
    TimeSep,
    /// `/` date separator of the locale
    DateSep,
    /// `$` currency symbol of the locale
    Currency,
    /// Anything else.
    Literal,
}

/// One position of the compiled mask.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct MaskToken {
    /// Character class.
    pub mask: Mask,
    /// Case conversion in effect when the position was compiled.
    pub case: CaseShift,
    /// The mask character. For a literal it's the literal itself.
    pub mask_char: char,
    /// Index into the locale symbol for the separator classes.
    pub sym_idx: usize,
    /// Assigned character.
    pub input: Option<char>,
}

impl Display for Mask {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mask::DigitRequired => "0",
            Mask::DigitOrSpace => "9",
            Mask::DigitOrSign => "#",
            Mask::LetterRequired => "L",
            Mask::LetterOptional => "?",
            Mask::CharRequired => "&",
            Mask::CharOptional => "C",
            Mask::AlnumRequired => "A",
            Mask::AlnumOptional => "a",
            Mask::DecimalSep => ".",
            Mask::GroupSep => ",",
            Mask::TimeSep => ":",
            Mask::DateSep => "/",
            Mask::Currency => "$",
            Mask::Literal => "\\",
        };
        write!(f, "{}", s)
    }
}

impl Debug for Mask {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Debug for MaskToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let case = match self.case {
            CaseShift::None => "",
            CaseShift::Upper => ">",
            CaseShift::Lower => "<",
        };
        match self.mask {
            Mask::Literal => write!(f, "\\{}", self.mask_char),
            Mask::DecimalSep | Mask::GroupSep | Mask::TimeSep | Mask::DateSep | Mask::Currency => {
                write!(f, "{:?}{}", self.mask, self.sym_idx)
            }
            _ => match self.input {
                Some(c) => write!(f, "{}{:?}={:?}", case, self.mask, c),
                None => write!(f, "{}{:?}", case, self.mask),
            },
        }
    }
}

impl Mask {
    /// Class for a mask character. Case modifiers and the escape char
    /// are handled by the compiler and are not a class.
    pub(crate) fn from_mask_char(c: char) -> Option<Mask> {
        match c {
            '0' => Some(Mask::DigitRequired),
            '9' => Some(Mask::DigitOrSpace),
            '#' => Some(Mask::DigitOrSign),
            'L' => Some(Mask::LetterRequired),
            '?' => Some(Mask::LetterOptional),
            '&' => Some(Mask::CharRequired),
            'C' => Some(Mask::CharOptional),
            'A' => Some(Mask::AlnumRequired),
            'a' => Some(Mask::AlnumOptional),
            '.' => Some(Mask::DecimalSep),
            ',' => Some(Mask::GroupSep),
            ':' => Some(Mask::TimeSep),
            '/' => Some(Mask::DateSep),
            '$' => Some(Mask::Currency),
            _ => None,
        }
    }

    /// Accepts user input.
    #[inline]
    pub fn is_editable(&self) -> bool {
        match self {
            Mask::DigitRequired
            | Mask::DigitOrSpace
            | Mask::DigitOrSign
            | Mask::LetterRequired
            | Mask::LetterOptional
            | Mask::CharRequired
            | Mask::CharOptional
            | Mask::AlnumRequired
            | Mask::AlnumOptional => true,
            Mask::DecimalSep
            | Mask::GroupSep
            | Mask::TimeSep
            | Mask::DateSep
            | Mask::Currency
            | Mask::Literal => false,
        }
    }

    /// Must be filled for a completed mask.
    #[inline]
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            Mask::DigitRequired | Mask::LetterRequired | Mask::CharRequired | Mask::AlnumRequired
        )
    }

    /// Is replaced by a locale symbol.
    #[inline]
    pub fn is_locale_symbol(&self) -> bool {
        matches!(
            self,
            Mask::DecimalSep | Mask::GroupSep | Mask::TimeSep | Mask::DateSep | Mask::Currency
        )
    }

    /// The locale symbol for this class.
    pub(crate) fn locale_symbol<'a>(&self, locale: &'a dyn MaskLocale) -> &'a str {
        match self {
            Mask::DecimalSep => locale.decimal_separator(),
            Mask::GroupSep => locale.group_separator(),
            Mask::TimeSep => locale.time_separator(),
            Mask::DateSep => locale.date_separator(),
            Mask::Currency => locale.currency_symbol(),
            _ => "",
        }
    }

    /// Test the character class.
    ///
    /// Prompt and reset handling is done before this, here
    /// only the class itself is checked.
    pub(crate) fn accepts(&self, c: char, ascii_only: bool) -> Result<(), ResultHint> {
        match self {
            Mask::DigitOrSign => {
                if !(is_digit(c) || c == '-' || c == '+' || c == ' ') {
                    return Err(ResultHint::DigitExpected);
                }
            }
            Mask::DigitRequired => {
                if !is_digit(c) {
                    return Err(ResultHint::DigitExpected);
                }
            }
            Mask::DigitOrSpace => {
                if !(is_digit(c) || c == ' ') {
                    return Err(ResultHint::DigitExpected);
                }
            }
            Mask::LetterRequired => {
                if !c.is_alphabetic() {
                    return Err(ResultHint::LetterExpected);
                }
                if ascii_only && !c.is_ascii_alphabetic() {
                    return Err(ResultHint::AsciiCharacterExpected);
                }
            }
            Mask::LetterOptional => {
                if !(c.is_alphabetic() || c == ' ') {
                    return Err(ResultHint::LetterExpected);
                }
                if ascii_only && !(c.is_ascii_alphabetic() || c == ' ') {
                    return Err(ResultHint::AsciiCharacterExpected);
                }
            }
            Mask::CharRequired => {
                if ascii_only && !c.is_ascii_graphic() {
                    return Err(ResultHint::AsciiCharacterExpected);
                }
            }
            Mask::CharOptional => {
                if ascii_only && !(c.is_ascii_graphic() || c == ' ') {
                    return Err(ResultHint::AsciiCharacterExpected);
                }
            }
            Mask::AlnumRequired => {
                if !c.is_alphanumeric() {
                    return Err(ResultHint::AlphanumericCharacterExpected);
                }
                if ascii_only && !c.is_ascii_alphanumeric() {
                    return Err(ResultHint::AsciiCharacterExpected);
                }
            }
            Mask::AlnumOptional => {
                if !(c.is_alphanumeric() || c == ' ') {
                    return Err(ResultHint::AlphanumericCharacterExpected);
                }
                if ascii_only && !(c.is_ascii_alphanumeric() || c == ' ') {
                    return Err(ResultHint::AsciiCharacterExpected);
                }
            }
            Mask::DecimalSep
            | Mask::GroupSep
            | Mask::TimeSep
            | Mask::DateSep
            | Mask::Currency
            | Mask::Literal => return Err(ResultHint::Unknown),
        }
        Ok(())
    }
}

#[inline]
fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

impl MaskToken {
    fn new(mask: Mask, case: CaseShift, mask_char: char, sym_idx: usize) -> Self {
        Self {
            mask,
            case,
            mask_char,
            sym_idx,
            input: None,
        }
    }

    /// Accepts user input.
    #[inline]
    pub fn is_editable(&self) -> bool {
        self.mask.is_editable()
    }

    /// Editable and filled.
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.mask.is_editable() && self.input.is_some()
    }

    /// Character shown for a literal or locale symbol.
    ///
    /// The locale symbol is resolved each time, so a changed
    /// locale is reflected immediately.
    pub fn display_char(&self, locale: &dyn MaskLocale) -> char {
        if self.mask.is_locale_symbol() {
            self.mask
                .locale_symbol(locale)
                .chars()
                .nth(self.sym_idx)
                .unwrap_or(self.mask_char)
        } else {
            self.mask_char
        }
    }

    /// Apply the case conversion of this position.
    pub(crate) fn convert_case(&self, c: char, locale: &dyn MaskLocale) -> char {
        match self.case {
            CaseShift::None => c,
            CaseShift::Upper => locale.to_upper(c),
            CaseShift::Lower => locale.to_lower(c),
        }
    }
}

/// Compile the mask.
///
/// Each locale placeholder expands to one position per character
/// of the symbol. An empty symbol gives no position at all.
pub(crate) fn parse_mask(
    mask_str: &str,
    locale: &dyn MaskLocale,
) -> Result<Vec<MaskToken>, MaskError> {
    if mask_str.is_empty() {
        return Err(MaskError::InvalidMask(mask_str.to_string()));
    }
    if !mask_str.chars().all(crate::is_valid_mask_char) {
        return Err(MaskError::InvalidMask(mask_str.to_string()));
    }

    let mut out = Vec::<MaskToken>::new();

    let mut case = CaseShift::None;
    let mut esc = false;
    for m in mask_str.chars() {
        if esc {
            esc = false;
            out.push(MaskToken::new(Mask::Literal, case, m, 0));
            continue;
        }

        match m {
            '\\' => {
                esc = true;
            }
            '<' => {
                case = CaseShift::Lower;
            }
            '>' => {
                case = CaseShift::Upper;
            }
            '|' => {
                case = CaseShift::None;
            }
            c => match Mask::from_mask_char(c) {
                Some(mask) if mask.is_locale_symbol() => {
                    let sym = mask.locale_symbol(locale);
                    for (idx, _) in sym.chars().enumerate() {
                        out.push(MaskToken::new(mask, case, c, idx));
                    }
                }
                Some(mask) => {
                    out.push(MaskToken::new(mask, case, c, 0));
                }
                None => {
                    out.push(MaskToken::new(Mask::Literal, case, c, 0));
                }
            },
        }
    }

    debug!("parse_mask {:?} -> {:?}", mask_str, out);

    Ok(out)
}
