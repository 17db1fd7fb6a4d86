//!
//! Culture dependent symbols for the mask.
//!
//! The placeholders `.`, `,`, `:`, `/` and `$` in a mask are replaced
//! with the symbols of a [MaskLocale]. The locale also does the case
//! conversion for `<` and `>`.
//!

use crate::Locale;
use dyn_clone::{DynClone, clone_box};
use format_num_pattern::NumberSymbols;
use pure_rust_locales::locale_match;
use std::fmt::Debug;

/// Provides the separator symbols and case conversion.
pub trait MaskLocale: DynClone + Debug {
    /// Decimal separator for `.`
    fn decimal_separator(&self) -> &str;

    /// Grouping separator for `,`
    fn group_separator(&self) -> &str;

    /// Time separator for `:`
    fn time_separator(&self) -> &str;

    /// Date separator for `/`
    fn date_separator(&self) -> &str;

    /// Currency symbol for `$`
    fn currency_symbol(&self) -> &str;

    /// Upper case conversion. Characters that don't map to a
    /// single character are kept as they are.
    fn to_upper(&self, c: char) -> char {
        single_char(c.to_uppercase()).unwrap_or(c)
    }

    /// Lower case conversion. Characters that don't map to a
    /// single character are kept as they are.
    fn to_lower(&self, c: char) -> char {
        single_char(c.to_lowercase()).unwrap_or(c)
    }
}

impl Clone for Box<dyn MaskLocale> {
    fn clone(&self) -> Self {
        clone_box(self.as_ref())
    }
}

fn single_char(mut it: impl Iterator<Item = char>) -> Option<char> {
    let c = it.next()?;
    if it.next().is_none() { Some(c) } else { None }
}

/// Plain set of symbols.
///
/// The default is the invariant culture: `.` `,` `:` `/` and `¤`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSymbols {
    pub decimal_sep: String,
    pub group_sep: String,
    pub time_sep: String,
    pub date_sep: String,
    pub currency_sym: String,
}

impl Default for LocaleSymbols {
    fn default() -> Self {
        Self::invariant()
    }
}

impl LocaleSymbols {
    /// Culture independent symbols.
    pub fn invariant() -> Self {
        Self {
            decimal_sep: ".".to_string(),
            group_sep: ",".to_string(),
            time_sep: ":".to_string(),
            date_sep: "/".to_string(),
            currency_sym: "¤".to_string(),
        }
    }

    /// Symbols for the given locale.
    ///
    /// Number symbols are taken from format_num_pattern, the date and
    /// time separators are extracted from the locales date/time format.
    pub fn from_locale(loc: Locale) -> Self {
        let num = NumberSymbols::numeric(loc);
        let mon = NumberSymbols::monetary(loc);

        let date_fmt = locale_match!(loc => LC_TIME::D_FMT);
        let time_fmt = locale_match!(loc => LC_TIME::T_FMT);

        Self {
            decimal_sep: num.decimal_sep.to_string(),
            group_sep: num
                .decimal_grp
                .map(|v| v.to_string())
                .unwrap_or_default(),
            time_sep: format_separator(time_fmt).unwrap_or(':').to_string(),
            date_sep: format_separator(date_fmt).unwrap_or('/').to_string(),
            currency_sym: mon.currency_sym.as_str().to_string(),
        }
    }

    /// Symbols for the locale of the system.
    ///
    /// Falls back to the invariant symbols if the system
    /// locale is not known.
    pub fn system() -> Self {
        let Some(loc) = sys_locale::get_locale() else {
            return Self::invariant();
        };
        let loc = loc.replace('-', "_");
        match Locale::try_from(loc.as_str()) {
            Ok(loc) => Self::from_locale(loc),
            Err(_) => Self::invariant(),
        }
    }

    /// Custom symbols.
    pub fn new(
        decimal_sep: impl Into<String>,
        group_sep: impl Into<String>,
        time_sep: impl Into<String>,
        date_sep: impl Into<String>,
        currency_sym: impl Into<String>,
    ) -> Self {
        Self {
            decimal_sep: decimal_sep.into(),
            group_sep: group_sep.into(),
            time_sep: time_sep.into(),
            date_sep: date_sep.into(),
            currency_sym: currency_sym.into(),
        }
    }
}

impl MaskLocale for LocaleSymbols {
    fn decimal_separator(&self) -> &str {
        &self.decimal_sep
    }

    fn group_separator(&self) -> &str {
        &self.group_sep
    }

    fn time_separator(&self) -> &str {
        &self.time_sep
    }

    fn date_separator(&self) -> &str {
        &self.date_sep
    }

    fn currency_symbol(&self) -> &str {
        &self.currency_sym
    }
}

/// First character in a strftime pattern that is neither part of
/// a conversion nor alphanumeric.
fn format_separator(fmt: &str) -> Option<char> {
    let mut it = fmt.chars();
    while let Some(c) = it.next() {
        if c == '%' {
            // flags and modifiers, then the conversion itself.
            for d in it.by_ref() {
                if !matches!(d, '-' | '_' | '0' | '^' | '#' | 'E' | 'O') {
                    break;
                }
            }
        } else if !c.is_alphanumeric() && !c.is_whitespace() {
            return Some(c);
        }
    }
    None
}
