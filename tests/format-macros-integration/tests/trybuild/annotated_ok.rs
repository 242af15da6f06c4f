use format_abstractions::Annotated;
use format_impl::CurrencyFormat;
use format_macros::Annotated;
use rust_decimal::Decimal;

#[derive(Annotated)]
struct Payment {
    #[annotate(CurrencyFormat::with_fraction_digits(0))]
    amount: Decimal,
    reference: String,
}

fn main() {
    assert_eq!(Payment::field_names().len(), 2);
    let amount = Payment::field_descriptor("amount").unwrap();
    assert_eq!(
        amount.annotation::<CurrencyFormat>().unwrap().fraction_digits,
        Some(0)
    );
}
