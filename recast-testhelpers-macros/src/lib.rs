use unsynn::*;

unsynn! {
    /// Everything before the body: attributes, qualifiers, `fn`, name and signature.
    struct Header {
        tokens: Any<Cons<Except<BraceGroup>, TokenTree>>,
    }

    struct TestFn {
        header: Header,
        body: BraceGroup,
        _end: EndOfStream,
    }
}

impl Header {
    fn declares_fn(&self) -> bool {
        self.tokens
            .to_token_stream()
            .into_iter()
            .any(|tt| matches!(&tt, TokenTree::Ident(ident) if ident == "fn"))
    }
}

/// Like `#[test]`, with tracing set up before the body runs.
///
/// ```ignore
/// #[recast_testhelpers::test]
/// fn converts() {
///     // events from the engine show up in the test output
/// }
/// ```
///
/// An argument replaces the inner test attribute, e.g.
/// `#[recast_testhelpers::test(tokio::test)]`.
#[proc_macro_attribute]
pub fn test(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let item = TokenStream::from(item);
    let test_fn = match item.to_token_iter().parse::<TestFn>() {
        Ok(test_fn) if test_fn.header.declares_fn() => test_fn,
        _ => {
            return quote::quote! {
                ::core::compile_error!("#[recast_testhelpers::test] expects a function");
            }
            .into();
        }
    };
    let header = test_fn.header.tokens.to_token_stream();
    let body = test_fn.body.0.stream();

    let test_attr = if attr.is_empty() {
        quote::quote! { #[::core::prelude::rust_2024::test] }
    } else {
        let attr = TokenStream::from(attr);
        quote::quote! { #[#attr] }
    };

    quote::quote! {
        #test_attr
        #header {
            ::recast_testhelpers::setup();

            #body
        }
    }
    .into()
}
