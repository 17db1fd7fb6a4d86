#![doc = include_str!("../readme.md")]
#![allow(clippy::uninlined_format_args)]
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use unicode_general_category::get_general_category;

pub mod locale;
pub mod masked_provider;

pub use locale::{LocaleSymbols, MaskLocale};
pub use masked_provider::mask_token::{CaseShift, Mask, MaskToken};
pub use masked_provider::{
    DEFAULT_PASSWORD_CHAR, DEFAULT_PROMPT_CHAR, MaskedProvider, MaskedProviderBuilder,
    SearchDirection,
};
pub use pure_rust_locales::Locale;

pub mod event {
    //!
    //! Outcome of validation and editing.
    //!

    use crate::upos_type;

    /// Detailed outcome of a validation or edit operation.
    ///
    /// The variants are ordered by precedence. When several characters
    /// are processed in one operation the greatest hint is reported.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub enum ResultHint {
        /// Nothing has been evaluated yet.
        Unknown,
        /// Accepted, but the position already held this character.
        NoEffect,
        /// Accepted, the character was consumed without being stored.
        /// Literal match or a reset-char on an empty position.
        CharacterEscaped,
        /// Accepted and stored.
        Success,
        /// Accepted, and other positions have been changed as well.
        SideEffect,
        /// Only 7-bit ASCII is accepted.
        AsciiCharacterExpected,
        /// Letter or digit expected.
        AlphanumericCharacterExpected,
        /// Digit expected.
        DigitExpected,
        /// Letter expected.
        LetterExpected,
        /// The prompt char can't be used as input.
        PromptCharNotAllowed,
        /// Control characters and the like.
        InvalidInput,
        /// No edit position left to take the character.
        UnavailableEditPosition,
        /// Position or range outside the mask.
        PositionOutOfRange,
        /// The position holds a literal.
        NonEditPosition,
    }

    impl ResultHint {
        /// The hint signals an accepted operation.
        pub fn is_success(self) -> bool {
            matches!(
                self,
                ResultHint::NoEffect
                    | ResultHint::CharacterEscaped
                    | ResultHint::Success
                    | ResultHint::SideEffect
            )
        }

        /// The hint signals a rejected operation.
        pub fn is_failure(self) -> bool {
            self > ResultHint::SideEffect
        }
    }

    /// Result of any validation or edit operation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EditResult {
        /// Operation succeeded.
        pub success: bool,
        /// Position of interest. For success this is the last position
        /// touched, for a failure the offending position.
        pub position: upos_type,
        /// Details.
        pub hint: ResultHint,
    }

    impl EditResult {
        pub(crate) fn ok(position: usize, hint: ResultHint) -> Self {
            Self {
                success: true,
                position: position as upos_type,
                hint,
            }
        }

        pub(crate) fn fail(position: usize, hint: ResultHint) -> Self {
            Self {
                success: false,
                position: position as upos_type,
                hint,
            }
        }
    }

    impl From<EditResult> for bool {
        fn from(value: EditResult) -> Self {
            value.success
        }
    }
}

/// Hard failures.
///
/// Everything that is just rejected input is reported
/// with an [EditResult](event::EditResult) instead.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MaskError {
    /// The mask is empty or contains a character that can't be printed.
    InvalidMask(String),
    /// Indicates that the passed position was out of bounds.
    ///
    /// Contains the position attempted and the length of the mask.
    IndexOutOfRange(upos_type, upos_type),
    /// The prompt char can't be printed.
    InvalidPromptChar(char),
    /// The password char can't be printed.
    InvalidPasswordChar(char),
    /// Prompt and password char must differ.
    PromptPasswordConflict(char),
}

impl Display for MaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for MaskError {}

/// Position type.
#[allow(non_camel_case_types)]
pub type upos_type = u32;

/// A printable character.
///
/// Letters, decimal digits, punctuation, symbols and space.
/// Marks, format and private-use characters don't count.
pub fn is_printable_char(c: char) -> bool {
    use unicode_general_category::GeneralCategory as GC;

    c == ' '
        || matches!(
            get_general_category(c),
            GC::UppercaseLetter
                | GC::LowercaseLetter
                | GC::TitlecaseLetter
                | GC::ModifierLetter
                | GC::OtherLetter
                | GC::DecimalNumber
                | GC::ConnectorPunctuation
                | GC::DashPunctuation
                | GC::OpenPunctuation
                | GC::ClosePunctuation
                | GC::InitialPunctuation
                | GC::FinalPunctuation
                | GC::OtherPunctuation
                | GC::MathSymbol
                | GC::CurrencySymbol
                | GC::ModifierSymbol
                | GC::OtherSymbol
        )
}

/// Can this char be used as input at all.
pub fn is_valid_input_char(c: char) -> bool {
    is_printable_char(c)
}

/// Can this char be used in a mask.
pub fn is_valid_mask_char(c: char) -> bool {
    is_printable_char(c)
}

/// Can this char be used as password char.
pub fn is_valid_password_char(c: char) -> bool {
    is_printable_char(c)
}
