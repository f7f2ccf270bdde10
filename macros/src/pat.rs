use std::{fmt::Display, iter};

use const_random::const_random;
use convert_case::{Case, Casing};
use either::Either;
use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    spanned::Spanned,
    visit::{self, Visit},
    *,
};

/// What one arm's pattern says about the alternatives it covers.
#[derive(Default)]
struct Shape {
    /// `name @ ...` at the top of the pattern, moved onto the next peel.
    binding: Option<PatIdent>,
    catch_all: bool,
    peels: Vec<(Type, Pat)>,
    refutable: bool,

    nested: bool,
    error: Option<syn::Error>,
}

impl Shape {
    fn of(pat: &Pat) -> syn::Result<Self> {
        let mut shape = Shape::default();
        shape.visit_pat(pat);
        match shape.error.take() {
            Some(err) => Err(err),
            None => Ok(shape),
        }
    }

    fn fail(&mut self, tokens: impl ToTokens, message: impl Display) {
        self.error
            .get_or_insert_with(|| syn::Error::new_spanned(tokens, message));
    }

    /// Records `pat` as the pattern for alternative `ty`.
    fn peel(&mut self, ty: Type, pat: &Pat) {
        if self.peels.iter().any(|(seen, _)| *seen == ty) {
            return self.fail(
                ty,
                "splitting the same alternative type into multiple patterns is not supported",
            );
        }
        let pat = match self.binding.take() {
            Some(mut binding) => {
                binding.subpat = Some((Token![@](pat.span()), Box::new(pat.clone())));
                Pat::Ident(binding)
            }
            None => pat.clone(),
        };
        self.peels.push((ty, pat));
    }

    /// Some alternative both arms accept unconditionally.
    fn overlap(&self, earlier: &Self) -> Option<syn::Error> {
        if self.refutable || earlier.refutable {
            return None;
        }
        let (ty, _) = self
            .peels
            .iter()
            .find(|(ty, _)| earlier.peels.iter().any(|(seen, _)| seen == ty))?;
        Some(syn::Error::new_spanned(
            ty,
            "multiple irrefutable patterns on the same alternative type are not supported",
        ))
    }

    fn visit_top(&mut self, pat: &Pat) {
        match pat {
            // A bare `PascalCase` ident names a unit struct.
            Pat::Ident(ident)
                if ident.subpat.is_none() && ident.ident.to_string().is_case(Case::Pascal) =>
            {
                let path = Path::from(ident.ident.clone());
                self.peel(Type::Path(TypePath { qself: None, path }), pat);
            }
            Pat::Ident(ident) => {
                self.binding = Some(PatIdent {
                    subpat: None,
                    ..ident.clone()
                });
                visit::visit_pat(self, pat);
            }

            Pat::Struct(PatStruct { qself, path, .. })
            | Pat::TupleStruct(PatTupleStruct { qself, path, .. })
            | Pat::Path(PatPath { qself, path, .. }) => {
                let ty = Type::Path(TypePath {
                    qself: qself.clone(),
                    path: path.clone(),
                });
                self.nested = true;
                visit::visit_pat(self, pat);
                self.nested = false;
                self.peel(ty, pat);
            }

            // `()` is the unit alternative.
            Pat::Tuple(tuple) if tuple.elems.is_empty() => self.peel(parse_quote!(()), pat),

            Pat::Lit(PatLit { lit, .. }) => {
                self.refutable = true;
                match literal_type(lit) {
                    Ok(ty) => self.peel(ty, pat),
                    Err(message) => self.fail(pat, message),
                }
            }

            Pat::Paren(_) => visit::visit_pat(self, pat),
            Pat::Or(_) => match self.binding.take() {
                Some(binding) => self.fail(
                    binding,
                    "root ident bindings on different alternative types are not supported",
                ),
                None => visit::visit_pat(self, pat),
            },

            Pat::Wild(_) | Pat::Rest(_) | Pat::Range(ExprRange { start: None, end: None, .. }) => {
                self.catch_all = true
            }

            _ => self.fail(
                pat,
                format_args!("pattern {} is not supported", pat.to_token_stream()),
            ),
        }
    }

    fn visit_inner(&mut self, pat: &Pat) {
        match pat {
            Pat::Const(_) | Pat::Lit(_) => self.refutable = true,
            Pat::Range(ExprRange { start, end, .. }) if start.is_some() || end.is_some() => {
                self.refutable = true
            }
            _ => {}
        }
        visit::visit_pat(self, pat)
    }
}

impl Visit<'_> for Shape {
    fn visit_pat(&mut self, pat: &Pat) {
        if self.nested {
            self.visit_inner(pat)
        } else {
            self.visit_top(pat)
        }
    }
}

/// The alternative type a literal pattern stands for.
fn literal_type(lit: &Lit) -> std::result::Result<Type, &'static str> {
    let suffixed = |suffix: &str, missing: &'static str| -> std::result::Result<Type, &'static str> {
        parse_str(suffix).map_err(|_| missing)
    };
    Ok(match lit {
        Lit::Str(_) => parse_quote!(&str),
        Lit::ByteStr(_) => parse_quote!(&[u8]),
        Lit::CStr(_) => parse_quote!(&::core::ffi::CStr),
        Lit::Byte(_) => parse_quote!(u8),
        Lit::Char(_) => parse_quote!(char),
        Lit::Bool(_) => parse_quote!(bool),
        Lit::Int(int) => {
            return suffixed(
                int.suffix(),
                "please specify the suffix of the integer literal",
            )
        }
        Lit::Float(float) => {
            return suffixed(
                float.suffix(),
                "please specify the suffix of the float literal",
            )
        }
        _ => return Err("this kind of literal is not supported"),
    })
}

pub struct ChoiceArm {
    shape: Shape,
    guard: Option<Box<Expr>>,
    body: Box<Expr>,
}

impl ChoiceArm {
    fn steps(&self) -> impl Iterator<Item = Step<'_>> {
        let body = &*self.body;
        if self.shape.catch_all {
            return Either::Left(iter::once(Step::Rest { body }));
        }
        let guard = self.guard.as_deref();
        let refutable = self.shape.refutable;
        Either::Right(self.shape.peels.iter().map(move |(ty, pat)| Step::Peel {
            ty,
            pat,
            guard,
            body,
            refutable,
        }))
    }
}

impl Parse for ChoiceArm {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let Arm {
            attrs,
            pat,
            guard,
            body,
            ..
        } = input.parse()?;

        if let Some(attr) = attrs.first() {
            return Err(syn::Error::new_spanned(
                attr,
                "custom attributes are not supported on match arms",
            ));
        }

        let mut shape = Shape::of(&pat)?;
        if shape.peels.is_empty() && !shape.catch_all {
            return Err(syn::Error::new(
                pat.span(),
                "cannot infer alternative types; please specify at least one alternative type \
                 in the pattern",
            ));
        }
        shape.refutable |= guard.is_some();

        Ok(ChoiceArm {
            shape,
            guard: guard.map(|(_, guard)| guard),
            body,
        })
    }
}

pub struct ChoiceMatch {
    scrutinee: Expr,
    attrs: Vec<Attribute>,
    arms: Vec<ChoiceArm>,
}

impl Parse for ChoiceMatch {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let scrutinee = Expr::parse_without_eager_brace(input)?;

        let content;
        syn::braced!(content in input);
        let attrs = content.call(Attribute::parse_inner)?;

        let mut arms = Vec::new();
        while !content.is_empty() {
            arms.push(content.parse()?);
        }

        Ok(ChoiceMatch {
            scrutinee,
            attrs,
            arms,
        })
    }
}

/// One link of the lowered chain. Each link rebinds the remaining choice,
/// and the chain ends at a choice with no alternatives left.
enum Step<'a> {
    /// Takes whatever is left.
    Rest { body: &'a Expr },
    /// Takes alternative `ty` when `pat` (and `guard`) accept it.
    Peel {
        ty: &'a Type,
        pat: &'a Pat,
        guard: Option<&'a Expr>,
        body: &'a Expr,
        refutable: bool,
    },
}

impl Step<'_> {
    fn lower(&self, rest: &Ident, exit: &Lifetime) -> TokenStream {
        match self {
            Step::Rest { body } => quote! {
                let #rest = match #rest.exhaust() {
                    #[allow(unreachable_code)]
                    Err(_) => {
                        #[warn(unreachable_code)]
                        let value = { #body };
                        break #exit value;
                    }
                    Ok(empty) => empty,
                };
            },
            Step::Peel {
                ty,
                pat,
                guard,
                body,
                refutable,
            } => {
                let guard = guard.map(|guard| quote!(if #guard));
                let taken = quote! {
                    #[allow(unreachable_code, clippy::diverging_sub_expression)]
                    Ok(#pat) #guard => {
                        #[warn(unreachable_code, clippy::diverging_sub_expression)]
                        let value = { #body };
                        break #exit value;
                    }
                };
                if *refutable {
                    // A rejected value is put back; the alternatives stay.
                    quote! {
                        let #rest = match #rest.try_take::<#ty, _>() {
                            #taken
                            Ok(value) => ::choice::Choice::new(value),
                            Err(kept) => kept,
                        };
                    }
                } else {
                    quote! {
                        let #rest = match #rest.try_unwrap::<#ty, _>() {
                            #taken
                            Err(remainder) => remainder,
                        };
                    }
                }
            }
        }
    }
}

pub fn expand_match(input: ChoiceMatch) -> TokenStream {
    let ChoiceMatch {
        scrutinee,
        attrs,
        arms,
    } = input;

    for (index, arm) in arms.iter().enumerate() {
        let earlier = &arms[..index];
        if let Some(err) = earlier.iter().find_map(|e| arm.shape.overlap(&e.shape)) {
            return err.to_compile_error();
        }
    }

    let rest = format_ident!("__choice_rest{}", const_random!(u32));
    let exit = Lifetime::new(
        &format!("'__choice_arms{}", const_random!(u32)),
        Span::call_site(),
    );
    let steps = arms
        .iter()
        .flat_map(|arm| arm.steps())
        .map(|step| step.lower(&rest, &exit));

    quote! {{
        let #rest = #scrutinee;
        #exit: {
            #(#attrs)*
            #(#steps)*
            ::choice::Choice::<()>::unreachable(#rest)
        }
    }}
}
