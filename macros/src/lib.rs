//! Procedural macros for the `choice` crate.

use proc_macro::TokenStream;

mod pat;

/// Matches on a `Choice` by the types of its alternatives.
///
/// See the `choice` crate for details.
#[proc_macro]
pub fn match_choice(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as pat::ChoiceMatch);
    pat::expand_match(input).into()
}
