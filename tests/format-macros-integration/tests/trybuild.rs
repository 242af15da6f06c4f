//! trybuild compile-time tests for format_macros

#[test]
fn trybuild_format_macros() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/formatted_ok.rs");
    t.pass("tests/trybuild/annotated_ok.rs");
}
