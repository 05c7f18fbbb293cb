// Integration coverage for the rewrite laws and seed scenarios,
// exercised end to end through the public `catena` API rather than
// against the rewriter's internal state.

use catena::{rewrite_source, DEFAULT_GAS};

fn assert_residual(source: &str, expect: &str) {
    let result = rewrite_source(source, DEFAULT_GAS).unwrap();
    assert_eq!(result.to_string(), expect, "rewriting {:?}", source);
}

#[test]
fn seed_scenarios() {
    let cases = [
        ("[foo] B", "[foo] [foo]"),
        ("[foo] C", ""),
        ("[foo] [bar] D", "[bar] [foo]"),
        ("[foo] [bar] F", "[foo bar]"),
        ("[foo] G", "[[foo]]"),
        ("[foo] H", "foo"),
        ("[foo] [bar] [value] J H", "[value] foo"),
        ("[foo] [bar] [value] K H", "[value] bar"),
        ("[foo] [bar] L H", "[foo] [bar]"),
        ("\"Hello\" \"world\" D", "\"world\" \"Hello\""),
        ("{ Hello, world. }", "{ Hello, world. }"),
    ];
    for (source, expect) in cases {
        assert_residual(source, expect);
    }
}

#[test]
fn n_is_a_permanent_stuck_marker() {
    assert_residual("[foo] N", "[foo] N");
    // Gas left over after hitting N doesn't matter: it's a hard stuck.
    let once = rewrite_source("[foo] N", DEFAULT_GAS).unwrap();
    let twice = catena::rewrite(once.clone(), DEFAULT_GAS);
    assert_eq!(once, twice);
}

#[test]
fn h_on_non_value_thunks() {
    assert_residual("x H", "x H");
}

#[test]
fn f_starved_of_operands_thunks() {
    assert_residual("[foo] F", "[foo] F");
}

#[test]
fn unknown_constant_thunks_like_n() {
    assert_residual("[foo] ZORP", "[foo] ZORP");
}

#[test]
fn zero_gas_leaves_input_untouched() {
    let input = catena::read("[foo] [bar] D").unwrap();
    let result = catena::rewrite(input.clone(), 0);
    assert_eq!(result, input);
}

#[test]
fn malformed_source_is_a_read_error_not_a_panic() {
    assert!(rewrite_source("[foo", DEFAULT_GAS).is_err());
    assert!(rewrite_source("\"unterminated", DEFAULT_GAS).is_err());
}

#[test]
fn dictionary_backed_rewrite_substitutes_bindings() {
    let dict = catena::Dictionary::new();
    dict.define("twice", catena::read("B").unwrap());
    let input = catena::read("[foo] twice").unwrap();
    let result = catena::rewrite_with(input, DEFAULT_GAS, Some(&dict));
    assert_eq!(result.to_string(), "[foo] [foo]");
}
