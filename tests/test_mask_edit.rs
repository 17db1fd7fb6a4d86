use rat_mask::MaskedProvider;
use rat_mask::event::ResultHint;

#[test]
fn test_add_date() {
    let mut m = MaskedProvider::new("00/00/0000").expect("mask");
    let r = m.add_str("12251978");
    assert!(r.success);
    assert_eq!(r.position, 9);
    assert_eq!(r.hint, ResultHint::Success);
    assert_eq!(m.to_string(), "12/25/1978");
    assert!(m.mask_full());
    assert!(m.mask_completed());
}

#[test]
fn test_add_char() {
    let mut m = MaskedProvider::new("00/00").expect("mask");

    let r = m.add_char('1');
    assert!(r.success);
    assert_eq!(r.position, 0);
    assert_eq!(r.hint, ResultHint::Success);
    let r = m.add_char('2');
    assert_eq!(r.position, 1);

    // the next edit position is behind the literal
    let r = m.add_char('/');
    assert!(!r.success);
    assert_eq!(r.position, 3);
    assert_eq!(r.hint, ResultHint::DigitExpected);

    let r = m.add_char('3');
    assert!(r.success);
    assert_eq!(r.position, 3);
    assert_eq!(m.to_display_string(), "12/3_");

    let r = m.add_char('x');
    assert!(!r.success);
    assert_eq!(r.position, 4);
    assert_eq!(r.hint, ResultHint::DigitExpected);
    assert_eq!(m.to_display_string(), "12/3_");

    let r = m.add_char('4');
    assert!(r.success);
    let r = m.add_char('5');
    assert!(!r.success);
    assert_eq!(r.position, 5);
    assert_eq!(r.hint, ResultHint::UnavailableEditPosition);
    assert_eq!(m.to_display_string(), "12/34");
}

#[test]
fn test_add_after_last_assigned() {
    let mut m = MaskedProvider::new("000").expect("mask");
    m.replace_char('9', 2);
    assert_eq!(m.to_display_string(), "__9");

    // free positions before the last assigned one are not used.
    let r = m.add_char('1');
    assert!(!r.success);
    assert_eq!(r.hint, ResultHint::UnavailableEditPosition);
}

#[test]
fn test_add_str_atomic() {
    let mut m = MaskedProvider::new("0000").expect("mask");
    let r = m.add_str("12a4");
    assert!(!r.success);
    assert_eq!(r.position, 2);
    assert_eq!(r.hint, ResultHint::DigitExpected);
    assert_eq!(m.to_display_string(), "____");
    assert_eq!(m.assigned_edit_position_count(), 0);

    let r = m.add_str("12");
    assert!(r.success);
    let r = m.add_str("345");
    assert!(!r.success);
    assert_eq!(r.position, 4);
    assert_eq!(r.hint, ResultHint::UnavailableEditPosition);
    assert_eq!(m.to_display_string(), "12__");

    let r = m.add_str("");
    assert!(r.success);
    assert_eq!(r.position, 2);
    assert_eq!(r.hint, ResultHint::NoEffect);
}

#[test]
fn test_case_shift() {
    let mut m = MaskedProvider::new(">AA").expect("mask");
    let r = m.add_str("ab");
    assert!(r.success);
    assert_eq!(m.to_string(), "AB");
    assert_eq!(m.tokens()[0].input, Some('A'));

    let mut m = MaskedProvider::new("<LL").expect("mask");
    m.add_str("AB");
    assert_eq!(m.to_string(), "ab");

    let mut m = MaskedProvider::new(">L|L").expect("mask");
    m.add_str("ab");
    assert_eq!(m.to_string(), "Ab");
}

#[test]
fn test_sign() {
    let mut m = MaskedProvider::new("#0").expect("mask");
    let r = m.add_str("-5");
    assert!(r.success);
    assert_eq!(m.to_string(), "-5");
    m.set("+5");
    assert_eq!(m.to_string(), "+5");
    let r = m.set("5-");
    assert!(!r.success);
    assert_eq!(r.position, 1);
    assert_eq!(r.hint, ResultHint::DigitExpected);
}

#[test]
fn test_invalid_input() {
    let mut m = MaskedProvider::new("CC").expect("mask");
    let r = m.add_char('\t');
    assert!(!r.success);
    assert_eq!(r.position, 0);
    assert_eq!(r.hint, ResultHint::InvalidInput);

    let r = m.add_char('\n');
    assert_eq!(r.hint, ResultHint::InvalidInput);

    let r = m.add_char('€');
    assert!(r.success);
}

#[test]
fn test_non_printable_input() {
    let mut m = MaskedProvider::new("&&").expect("mask");
    // zero width space, combining acute, private use
    for c in ['\u{200B}', '\u{0301}', '\u{E000}', '\u{A0}'] {
        let r = m.verify_char(c, 0);
        assert!(!r.success);
        assert_eq!(r.hint, ResultHint::InvalidInput);

        let r = m.add_char(c);
        assert_eq!(r.hint, ResultHint::InvalidInput);
        assert_eq!(m.assigned_edit_position_count(), 0);
    }

    for c in ['x', '7', '!', '€', '+', '^', '©', 'ä'] {
        assert!(m.verify_char(c, 0).success);
    }

    assert!(MaskedProvider::new("00\u{200B}00").is_err());
    assert!(MaskedProvider::builder("00").prompt_char('\u{E000}').build().is_err());
}

#[test]
fn test_ascii_only() {
    let mut m = MaskedProvider::builder("LL")
        .ascii_only(true)
        .build()
        .expect("mask");
    let r = m.add_char('ä');
    assert!(!r.success);
    assert_eq!(r.hint, ResultHint::AsciiCharacterExpected);
    let r = m.add_char('1');
    assert_eq!(r.hint, ResultHint::LetterExpected);
    let r = m.add_char('a');
    assert!(r.success);

    let mut m = MaskedProvider::builder("&")
        .ascii_only(true)
        .build()
        .expect("mask");
    let r = m.add_char('€');
    assert_eq!(r.hint, ResultHint::AsciiCharacterExpected);

    let mut m = MaskedProvider::new("LL").expect("mask");
    let r = m.add_char('ä');
    assert!(r.success);
}

#[test]
fn test_prompt_input() {
    let mut m = MaskedProvider::new("00").expect("mask");
    let r = m.add_char('_');
    assert!(r.success);
    assert_eq!(r.hint, ResultHint::CharacterEscaped);
    assert_eq!(m.assigned_edit_position_count(), 0);

    let mut m = MaskedProvider::builder("CC")
        .allow_prompt_as_input(false)
        .build()
        .expect("mask");
    m.set_reset_on_prompt(false);
    let r = m.add_char('_');
    assert!(!r.success);
    assert_eq!(r.position, 0);
    assert_eq!(r.hint, ResultHint::PromptCharNotAllowed);

    let mut m = MaskedProvider::new("CC").expect("mask");
    m.set_reset_on_prompt(false);
    let r = m.add_char('_');
    assert!(r.success);
    assert_eq!(r.hint, ResultHint::Success);
    assert_eq!(m.tokens()[0].input, Some('_'));
}

#[test]
fn test_reset_on_space() {
    let mut m = MaskedProvider::new("0000").expect("mask");
    let r = m.set("12 4");
    assert!(r.success);
    assert_eq!(r.position, 3);
    assert_eq!(m.assigned_edit_position_count(), 3);
    assert_eq!(m.to_display_string(), "12_4");

    let r = m.replace_char(' ', 0);
    assert!(r.success);
    assert_eq!(r.position, 0);
    assert_eq!(r.hint, ResultHint::SideEffect);
    assert_eq!(m.to_display_string(), "_2_4");

    let r = m.replace_char(' ', 0);
    assert!(r.success);
    assert_eq!(r.hint, ResultHint::CharacterEscaped);

    m.set_reset_on_space(false);
    let r = m.replace_char(' ', 0);
    assert!(!r.success);
    assert_eq!(r.hint, ResultHint::DigitExpected);
}

#[test]
fn test_insert_empty_buffer() {
    let mut m = MaskedProvider::new("000-00-0000").expect("mask");
    let r = m.insert_char_at('5', 0);
    assert!(r.success);
    assert_eq!(r.position, 0);
    assert_eq!(r.hint, ResultHint::Success);
    assert_eq!(m.tokens()[0].input, Some('5'));
    assert!(m.tokens()[1..].iter().all(|v| v.input.is_none()));
    assert_eq!(m.assigned_edit_position_count(), 1);
    assert_eq!(m.to_display_string(), "5__-__-____");
}

#[test]
fn test_insert_shift() {
    let mut m = MaskedProvider::new("000-00-0000").expect("mask");
    m.set("1234");
    assert_eq!(m.to_display_string(), "123-4_-____");

    let r = m.insert_char_at('9', 0);
    assert!(r.success);
    assert_eq!(r.position, 0);
    assert_eq!(r.hint, ResultHint::Success);
    assert_eq!(m.to_display_string(), "912-34-____");

    let r = m.remove_at(0);
    assert!(r.success);
    assert_eq!(r.hint, ResultHint::Success);
    assert_eq!(m.to_display_string(), "123-4_-____");

    let r = m.insert_char_at('7', 2);
    assert!(r.success);
    assert_eq!(m.to_display_string(), "127-34-____");
    m.remove_at(2);

    // a literal position inserts at the next edit position
    let r = m.insert_char_at('7', 3);
    assert!(r.success);
    assert_eq!(r.position, 4);
    assert_eq!(m.to_display_string(), "123-74-____");
}

#[test]
fn test_insert_gap() {
    let mut m = MaskedProvider::new("0000").expect("mask");
    m.set("1 34");
    assert_eq!(m.to_display_string(), "1_34");

    // lands on a free position, nothing to shift
    let r = m.insert_char_at('2', 1);
    assert!(r.success);
    assert_eq!(m.to_display_string(), "1234");
}

#[test]
fn test_insert_full() {
    let mut m = MaskedProvider::new("00").expect("mask");
    m.set("12");

    let r = m.insert_char_at('3', 0);
    assert!(!r.success);
    assert_eq!(r.position, 2);
    assert_eq!(r.hint, ResultHint::UnavailableEditPosition);
    assert_eq!(m.to_display_string(), "12");

    let r = m.insert_char_at('3', 1);
    assert!(!r.success);
    assert_eq!(r.hint, ResultHint::UnavailableEditPosition);
    assert_eq!(m.to_display_string(), "12");

    let r = m.insert_char_at('3', 2);
    assert!(!r.success);
    assert_eq!(r.position, 2);
    assert_eq!(r.hint, ResultHint::PositionOutOfRange);

    let r = m.insert_str_at("", 0);
    assert!(r.success);
    assert_eq!(r.hint, ResultHint::NoEffect);
}

#[test]
fn test_insert_remove_roundtrip() {
    let mut m = MaskedProvider::new("0000").expect("mask");
    m.set("123");
    let before = m.tokens().to_vec();

    let r = m.insert_str_at("9", 0);
    assert!(r.success);
    assert_eq!(m.to_display_string(), "9123");
    let r = m.remove_range(0, 0);
    assert!(r.success);
    assert_eq!(m.tokens(), &before[..]);

    // no more room
    m.insert_str_at("9", 0);
    let r = m.insert_str_at("8", 0);
    assert!(!r.success);
    assert_eq!(r.hint, ResultHint::UnavailableEditPosition);
    assert_eq!(m.to_display_string(), "9123");
}

#[test]
fn test_remove() {
    let mut m = MaskedProvider::new("000").expect("mask");
    m.set("12");

    let r = m.remove();
    assert!(r.success);
    assert_eq!(r.position, 1);
    assert_eq!(r.hint, ResultHint::Success);
    assert_eq!(m.to_display_string(), "1__");

    let r = m.remove();
    assert_eq!(r.position, 0);
    assert_eq!(r.hint, ResultHint::Success);

    let r = m.remove();
    assert!(r.success);
    assert_eq!(r.position, 0);
    assert_eq!(r.hint, ResultHint::NoEffect);
}

#[test]
fn test_remove_range() {
    let mut m = MaskedProvider::new("00000").expect("mask");
    m.set("12345");

    let r = m.remove_range(1, 2);
    assert!(r.success);
    assert_eq!(r.position, 1);
    assert_eq!(r.hint, ResultHint::Success);
    assert_eq!(m.to_display_string(), "145__");

    let r = m.remove_range(0, 4);
    assert!(r.success);
    assert_eq!(r.hint, ResultHint::Success);
    assert_eq!(m.to_display_string(), "_____");

    let r = m.remove_range(0, 1);
    assert!(r.success);
    assert_eq!(r.hint, ResultHint::NoEffect);

    let r = m.remove_range(1, 5);
    assert!(!r.success);
    assert_eq!(r.position, 5);
    assert_eq!(r.hint, ResultHint::PositionOutOfRange);

    let r = m.remove_range(2, 1);
    assert!(!r.success);
    assert_eq!(r.position, 2);
    assert_eq!(r.hint, ResultHint::PositionOutOfRange);
}

#[test]
fn test_remove_literal() {
    let mut m = MaskedProvider::new("00-00").expect("mask");
    m.set("1234");
    assert_eq!(m.to_display_string(), "12-34");

    let r = m.remove_at(1);
    assert!(r.success);
    assert_eq!(m.to_display_string(), "13-4_");

    let r = m.remove_at(2);
    assert!(r.success);
    assert_eq!(r.position, 2);
    assert_eq!(r.hint, ResultHint::NoEffect);
    assert_eq!(m.to_display_string(), "13-4_");

    let r = m.remove_range(3, 4);
    assert!(r.success);
    assert_eq!(m.to_display_string(), "13-__");

    let r = m.remove_range(3, 4);
    assert_eq!(r.hint, ResultHint::NoEffect);
}

#[test]
fn test_remove_shift_only() {
    let mut m = MaskedProvider::new("0000").expect("mask");
    m.set("1 34");

    // nothing removed, but the tail moved.
    let r = m.remove_at(1);
    assert!(r.success);
    assert_eq!(r.position, 1);
    assert_eq!(r.hint, ResultHint::SideEffect);
    assert_eq!(m.to_display_string(), "134_");
}

#[test]
fn test_replace_char() {
    let mut m = MaskedProvider::new("LL").expect("mask");
    let r = m.replace_char('3', 0);
    assert!(!r.success);
    assert_eq!(r.position, 0);
    assert_eq!(r.hint, ResultHint::LetterExpected);
    assert_eq!(m.to_display_string(), "__");
    assert_eq!(m.assigned_edit_position_count(), 0);

    m.set("ab");
    let r = m.replace_char('c', 1);
    assert!(r.success);
    assert_eq!(r.hint, ResultHint::Success);
    assert_eq!(m.to_display_string(), "ac");
    let r = m.replace_char('c', 1);
    assert!(r.success);
    assert_eq!(r.hint, ResultHint::NoEffect);

    let r = m.replace_char('c', 2);
    assert!(!r.success);
    assert_eq!(r.hint, ResultHint::PositionOutOfRange);
}

#[test]
fn test_replace_char_literal() {
    let mut m = MaskedProvider::new("00-00").expect("mask");
    m.set("1234");

    let r = m.replace_char('9', 2);
    assert!(r.success);
    assert_eq!(r.position, 3);
    assert_eq!(m.to_display_string(), "12-94");

    let r = m.replace_char('-', 2);
    assert!(r.success);
    assert_eq!(r.position, 2);
    assert_eq!(r.hint, ResultHint::CharacterEscaped);
    assert_eq!(m.to_display_string(), "12-94");

    let mut m = MaskedProvider::new("00-").expect("mask");
    let r = m.replace_char('1', 2);
    assert!(!r.success);
    assert_eq!(r.position, 2);
    assert_eq!(r.hint, ResultHint::UnavailableEditPosition);
}

#[test]
fn test_replace_char_range() {
    let mut m = MaskedProvider::new("0000").expect("mask");
    m.set("1234");

    let r = m.replace_char_range('9', 1, 1);
    assert!(r.success);
    assert_eq!(m.to_display_string(), "1934");

    let r = m.replace_char_range('9', 1, 2);
    assert!(r.success);
    assert_eq!(r.position, 1);
    assert_eq!(r.hint, ResultHint::SideEffect);
    assert_eq!(m.to_display_string(), "194_");
}

#[test]
fn test_replace_str() {
    let mut m = MaskedProvider::new("000000").expect("mask");
    m.set("123456");

    let r = m.replace_str("99", 2);
    assert!(r.success);
    assert_eq!(r.position, 3);
    assert_eq!(m.to_display_string(), "129956");

    let r = m.replace_str("", 0);
    assert!(r.success);
    assert_eq!(r.hint, ResultHint::Success);
    assert_eq!(m.to_display_string(), "29956_");

    let r = m.replace_str("x", 0);
    assert!(!r.success);
    assert_eq!(m.to_display_string(), "29956_");
}

#[test]
fn test_replace_str_range() {
    // shorter
    let mut m = MaskedProvider::new("000000").expect("mask");
    m.set("123456");
    let r = m.replace_str_range("9", 1, 3);
    assert!(r.success);
    assert_eq!(r.position, 1);
    assert_eq!(r.hint, ResultHint::Success);
    assert_eq!(m.to_display_string(), "1956__");

    // longer
    let mut m = MaskedProvider::new("000000").expect("mask");
    m.set("1234");
    let r = m.replace_str_range("789", 0, 0);
    assert!(r.success);
    assert_eq!(r.position, 2);
    assert_eq!(m.to_display_string(), "789234");

    // longer, no room
    let mut m = MaskedProvider::new("0000").expect("mask");
    m.set("1234");
    let r = m.replace_str_range("78", 0, 0);
    assert!(!r.success);
    assert_eq!(r.hint, ResultHint::UnavailableEditPosition);
    assert_eq!(m.to_display_string(), "1234");

    // same length
    let r = m.replace_str_range("98", 1, 2);
    assert!(r.success);
    assert_eq!(r.position, 2);
    assert_eq!(m.to_display_string(), "1984");

    // empty
    let r = m.replace_str_range("", 1, 2);
    assert!(r.success);
    assert_eq!(m.to_display_string(), "14__");

    let r = m.replace_str_range("1", 2, 1);
    assert!(!r.success);
    assert_eq!(r.hint, ResultHint::PositionOutOfRange);
}

#[test]
fn test_consecutive_literals() {
    let mut m = MaskedProvider::new("00--00").expect("mask");
    let r = m.set("1234");
    assert!(r.success);
    assert_eq!(m.to_display_string(), "12--34");

    let r = m.set("12--34");
    assert!(r.success);
    assert_eq!(r.position, 5);
    assert_eq!(m.to_display_string(), "12--34");
    assert_eq!(m.assigned_edit_position_count(), 4);

    let r = m.replace_char('9', 2);
    assert!(r.success);
    assert_eq!(r.position, 4);
    assert_eq!(m.to_display_string(), "12--94");

    let r = m.replace_str("-8", 2);
    assert!(r.success);
    assert_eq!(r.position, 4);
    assert_eq!(m.to_display_string(), "12--84");

    // no room behind the literals
    let r = m.insert_char_at('0', 2);
    assert!(!r.success);
    assert_eq!(r.hint, ResultHint::UnavailableEditPosition);
    assert_eq!(m.to_display_string(), "12--84");

    let mut m = MaskedProvider::new("00--000").expect("mask");
    m.set("1234");
    assert_eq!(m.to_display_string(), "12--34_");
    let r = m.insert_char_at('0', 2);
    assert!(r.success);
    assert_eq!(r.position, 4);
    assert_eq!(m.to_display_string(), "12--034");

    let r = m.remove_at(1);
    assert!(r.success);
    assert_eq!(m.to_display_string(), "10--34_");
}

#[test]
fn test_set_clear() {
    let mut m = MaskedProvider::new("0000").expect("mask");
    let r = m.set("1234");
    assert!(r.success);
    assert_eq!(r.position, 3);

    let r = m.set("56");
    assert!(r.success);
    assert_eq!(r.position, 1);
    assert_eq!(m.to_display_string(), "56__");

    let r = m.set("5x");
    assert!(!r.success);
    assert_eq!(r.position, 1);
    assert_eq!(r.hint, ResultHint::DigitExpected);
    assert_eq!(m.to_display_string(), "56__");

    let r = m.set("");
    assert!(r.success);
    assert_eq!(r.hint, ResultHint::Success);
    assert_eq!(m.to_display_string(), "____");

    let r = m.clear();
    assert!(r.success);
    assert_eq!(r.hint, ResultHint::NoEffect);
}

#[test]
fn test_escape_count() {
    let mut m = MaskedProvider::new("00/00").expect("mask");
    let r = m.set("12/34");
    assert!(r.success);
    assert_eq!(r.hint, ResultHint::Success);
    assert_eq!(m.assigned_edit_position_count(), 4);
    assert_eq!(m.to_string(), "12/34");

    let r = m.set("1 / 4");
    assert!(r.success);
    assert_eq!(m.assigned_edit_position_count(), 2);
    assert_eq!(m.to_display_string(), "1_/_4");
}

#[test]
fn test_verify_no_mutation() {
    let mut m = MaskedProvider::new("00-00").expect("mask");
    m.set("12");
    let before = m.tokens().to_vec();

    let r = m.verify_string("12x");
    assert!(!r.success);
    assert_eq!(r.position, 3);
    assert_eq!(r.hint, ResultHint::DigitExpected);

    let r = m.verify_string("12-34");
    assert!(r.success);
    assert_eq!(r.position, 4);

    let r = m.verify_string("");
    assert!(r.success);
    assert_eq!(r.hint, ResultHint::NoEffect);

    let r = m.verify_string("123456");
    assert!(!r.success);
    assert_eq!(r.hint, ResultHint::UnavailableEditPosition);

    let r = m.verify_char('a', 0);
    assert!(!r.success);
    assert_eq!(r.hint, ResultHint::DigitExpected);
    let r = m.verify_char('1', 0);
    assert!(r.success);
    assert_eq!(r.hint, ResultHint::NoEffect);
    let r = m.verify_char('1', 9);
    assert!(!r.success);
    assert_eq!(r.hint, ResultHint::PositionOutOfRange);
    let r = m.verify_char('1', 2);
    assert!(!r.success);
    assert_eq!(r.hint, ResultHint::NonEditPosition);

    assert!(m.verify_escape_char('-', 2));
    assert!(m.verify_escape_char(' ', 0));
    assert!(m.verify_escape_char('_', 3));
    assert!(!m.verify_escape_char('1', 0));
    assert!(!m.verify_escape_char('-', 9));

    assert_eq!(m.tokens(), &before[..]);
}

#[test]
fn test_failed_edit_no_mutation() {
    let mut m = MaskedProvider::new("000-00").expect("mask");
    m.set("12345");
    let before = m.tokens().to_vec();

    assert!(!m.add_char('6').success);
    assert!(!m.add_str("6").success);
    assert!(!m.insert_str_at("9", 0).success);
    assert!(!m.insert_str_at("x", 4).success);
    assert!(!m.replace_str("1x", 0).success);
    assert!(!m.replace_str_range("9999", 0, 1).success);
    assert!(!m.remove_range(4, 9).success);
    assert!(!m.set("123456").success);

    assert_eq!(m.tokens(), &before[..]);
}

#[test]
fn test_clone_independent() {
    let mut m = MaskedProvider::new("0000").expect("mask");
    m.set("12");
    let mut m2 = m.clone();
    m2.add_str("34");
    assert_eq!(m.to_display_string(), "12__");
    assert_eq!(m2.to_display_string(), "1234");
}
