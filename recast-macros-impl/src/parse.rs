use proc_macro2::{Delimiter, Literal, Spacing, Span, TokenStream, TokenTree};
use quote::quote_spanned;
use unsynn::*;

keyword! {
    KStruct = "struct";
    KPub = "pub";
}

unsynn! {
    /// Visibility: `pub`, `pub(crate)`... or nothing
    enum Vis {
        PubIn(Cons<KPub, ParenthesisGroup>),
        Pub(KPub),
    }

    /// An outer attribute: `#[...]`
    struct Attribute {
        _pound: Pound,
        content: BracketGroup,
    }

    /// `struct Name ...`, with everything after the name left unparsed
    struct RecordDecl {
        attrs: Vec<Attribute>,
        vis: Option<Vis>,
        _kw_struct: KStruct,
        name: Ident,
        rest: Vec<TokenTree>,
    }

    /// One named field, already split off the body at its comma
    struct FieldDecl {
        attrs: Vec<Attribute>,
        vis: Option<Vis>,
        name: Ident,
        _colon: Colon,
        ty: Vec<TokenTree>,
    }
}

/// A derive error, reported at a span.
#[derive(Debug, Clone)]
pub struct DeriveError {
    /// what went wrong
    pub message: String,
    /// where
    pub span: Span,
}

impl DeriveError {
    fn new(span: Span, message: impl Into<String>) -> Self {
        DeriveError {
            message: message.into(),
            span,
        }
    }

    /// Renders the error as a `compile_error!` invocation.
    pub fn to_compile_error(&self) -> TokenStream {
        let message = &self.message;
        quote_spanned! { self.span =>
            ::core::compile_error!(#message);
        }
    }
}

/// A parsed record.
#[derive(Debug, Clone)]
pub struct PRecord {
    /// type name
    pub name: proc_macro2::Ident,
    /// named fields, in declaration order
    pub fields: Vec<PField>,
    /// methods registered with `#[recast(methods(...))]`
    pub methods: Vec<proc_macro2::Ident>,
}

/// A parsed named field.
#[derive(Debug, Clone)]
pub struct PField {
    /// field name, as written
    pub name: proc_macro2::Ident,
    /// field type tokens
    pub ty: TokenStream,
    /// annotation from `#[recast("...")]`, empty when absent
    pub annotation: String,
    /// declared with any `pub` visibility
    pub public: bool,
    /// `#[recast(flatten)]`
    pub flatten: bool,
}

impl PField {
    /// Field name without a raw identifier prefix.
    pub fn name_str(&self) -> String {
        let name = self.name.to_string();
        name.strip_prefix("r#").map(str::to_owned).unwrap_or(name)
    }
}

impl PRecord {
    /// Parses a `struct` item.
    pub fn parse(input: TokenStream) -> std::result::Result<Self, DeriveError> {
        let mut it = input.to_token_iter();
        let decl = it.parse::<RecordDecl>().map_err(|_| {
            DeriveError::new(
                Span::call_site(),
                "#[derive(Recast)] only supports structs with named fields",
            )
        })?;

        let mut methods = Vec::new();
        for attr in &decl.attrs {
            let Some(args) = recast_attr_args(attr)? else {
                continue;
            };
            for item in split_commas(args) {
                methods.extend(parse_container_item(&item)?);
            }
        }

        let name: proc_macro2::Ident = decl.name.clone();
        let body = match decl.rest.as_slice() {
            [TokenTree::Group(g)] if g.delimiter() == Delimiter::Brace => g.stream(),
            [TokenTree::Punct(p)] if p.as_char() == ';' => TokenStream::new(),
            [TokenTree::Punct(p), ..] if p.as_char() == '<' => {
                return Err(DeriveError::new(
                    p.span(),
                    "#[derive(Recast)] does not support generic records",
                ));
            }
            [TokenTree::Group(g), ..] if g.delimiter() == Delimiter::Parenthesis => {
                return Err(DeriveError::new(
                    g.span(),
                    "#[derive(Recast)] does not support tuple structs",
                ));
            }
            _ => {
                return Err(DeriveError::new(
                    name.span(),
                    "#[derive(Recast)] only supports structs with named fields",
                ));
            }
        };

        let fields = split_fields(body)
            .into_iter()
            .map(parse_field)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(PRecord {
            name,
            fields,
            methods,
        })
    }
}

fn parse_field(chunk: TokenStream) -> std::result::Result<PField, DeriveError> {
    let span = chunk
        .clone()
        .into_iter()
        .next()
        .map(|tt| tt.span())
        .unwrap_or_else(Span::call_site);
    let mut it = chunk.to_token_iter();
    let decl = it
        .parse::<FieldDecl>()
        .map_err(|_| DeriveError::new(span, "expected a named field: `name: Type`"))?;

    let mut field = PField {
        name: decl.name.clone(),
        ty: decl.ty.iter().cloned().collect(),
        annotation: String::new(),
        public: decl.vis.is_some(),
        flatten: false,
    };
    let mut annotated = false;

    for attr in &decl.attrs {
        let Some(args) = recast_attr_args(attr)? else {
            continue;
        };
        for item in split_commas(args) {
            match item.as_slice() {
                [TokenTree::Literal(lit)] => {
                    if annotated {
                        return Err(DeriveError::new(
                            lit.span(),
                            "a field takes at most one recast annotation",
                        ));
                    }
                    field.annotation = unquote(lit)?;
                    annotated = true;
                }
                [TokenTree::Ident(id)] if id == "flatten" => field.flatten = true,
                _ => {
                    let span = item.first().map(|tt| tt.span()).unwrap_or(span);
                    return Err(DeriveError::new(
                        span,
                        "expected a string annotation or `flatten`",
                    ));
                }
            }
        }
    }

    Ok(field)
}

fn parse_container_item(item: &[TokenTree]) -> std::result::Result<Vec<proc_macro2::Ident>, DeriveError> {
    match item {
        [TokenTree::Ident(id), TokenTree::Group(g)]
            if id == "methods" && g.delimiter() == Delimiter::Parenthesis =>
        {
            split_commas(g.stream())
                .into_iter()
                .map(|method| match method.as_slice() {
                    [TokenTree::Ident(m)] => Ok(m.clone()),
                    _ => Err(DeriveError::new(g.span(), "expected a list of method names")),
                })
                .collect()
        }
        _ => {
            let span = item.first().map(|tt| tt.span()).unwrap_or_else(Span::call_site);
            Err(DeriveError::new(span, "expected `methods(...)`"))
        }
    }
}

/// The parenthesized arguments of a `#[recast(...)]` attribute, `None` for any other attribute.
fn recast_attr_args(attr: &Attribute) -> std::result::Result<Option<TokenStream>, DeriveError> {
    let tokens: Vec<TokenTree> = attr.content.0.stream().into_iter().collect();
    match tokens.as_slice() {
        [TokenTree::Ident(id), TokenTree::Group(g)]
            if id == "recast" && g.delimiter() == Delimiter::Parenthesis =>
        {
            Ok(Some(g.stream()))
        }
        [TokenTree::Ident(id), ..] if id == "recast" => {
            Err(DeriveError::new(id.span(), "expected `#[recast(...)]`"))
        }
        _ => Ok(None),
    }
}

fn unquote(lit: &Literal) -> std::result::Result<String, DeriveError> {
    let repr = lit.to_string();
    let inner = repr
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| DeriveError::new(lit.span(), "expected a string literal"))?;
    if inner.contains('\\') {
        return Err(DeriveError::new(
            lit.span(),
            "escape sequences are not allowed in recast annotations",
        ));
    }
    Ok(inner.to_owned())
}

/// Splits on top-level commas. Groups are single tokens, so only generics need tracking.
fn split_commas(stream: TokenStream) -> Vec<Vec<TokenTree>> {
    let mut items = Vec::new();
    let mut current = Vec::new();
    for tt in stream {
        match &tt {
            TokenTree::Punct(p) if p.as_char() == ',' => {
                if !current.is_empty() {
                    items.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(tt),
        }
    }
    if !current.is_empty() {
        items.push(current);
    }
    items
}

/// Splits a record body into one token stream per field.
///
/// Commas inside `<...>` belong to the field type; the `>` of a `->` does not close anything.
fn split_fields(body: TokenStream) -> Vec<TokenStream> {
    let mut fields = Vec::new();
    let mut current: Vec<TokenTree> = Vec::new();
    let mut depth = 0usize;
    let mut after_dash = false;

    for tt in body {
        let mut dash = false;
        if let TokenTree::Punct(p) = &tt {
            match p.as_char() {
                '<' => depth += 1,
                '>' if !after_dash => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    if !current.is_empty() {
                        fields.push(current.drain(..).collect());
                    }
                    after_dash = false;
                    continue;
                }
                '-' => dash = p.spacing() == Spacing::Joint,
                _ => {}
            }
        }
        after_dash = dash;
        current.push(tt);
    }
    if !current.is_empty() {
        fields.push(current.into_iter().collect());
    }
    fields
}
