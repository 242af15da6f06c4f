use format_abstractions::{DefaultFormatterCatalog, Formatter, ParseError};
use format_common::Locale;
use format_macros::Formatted;

#[derive(Formatted)]
#[formatted(SlugFormatter)]
struct Slug(String);

#[derive(Default)]
struct SlugFormatter;

impl Formatter<Slug> for SlugFormatter {
    fn format(&self, value: &Slug, _locale: &Locale) -> String {
        value.0.replace(' ', "-")
    }

    fn parse(&self, formatted: &str, _locale: &Locale) -> Result<Slug, ParseError> {
        Ok(Slug(formatted.replace('-', " ")))
    }
}

fn main() {
    assert!(DefaultFormatterCatalog::global().contains::<Slug>());
}
